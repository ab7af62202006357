//! Line interpolation and brush footprints

/// Bresenham's line algorithm - generates all tile coordinates along a line.
///
/// Inclusive of both endpoints, always returns at least the start point,
/// and never emits the same point twice in a row.
pub fn interpolate_line(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
    let mut points = Vec::new();

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        points.push((x, y));

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }

    points
}

/// Grid cells covered by one logical brush contact.
///
/// Size 1 is the single center cell and size 3 a 3x3 block centered on
/// it. Size 2 is a 2x2 block anchored at the center cell (no negative
/// offset) - erase painting depends on this exact anchoring. Sizes are
/// clamped to 1..=3.
pub fn brush_footprint(cx: i32, cy: i32, size: u32) -> Vec<(i32, i32)> {
    match size {
        0 | 1 => vec![(cx, cy)],
        2 => vec![(cx, cy), (cx + 1, cy), (cx, cy + 1), (cx + 1, cy + 1)],
        _ => {
            let mut cells = Vec::with_capacity(9);
            for dy in -1..=1 {
                for dx in -1..=1 {
                    cells.push((cx + dx, cy + dy));
                }
            }
            cells
        }
    }
}
