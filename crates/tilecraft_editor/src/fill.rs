//! Bounded breadth-first flood fill

use std::collections::{HashSet, VecDeque};
use tilecraft_core::{LayerId, Scene};

/// Result of one flood fill: the cells that were written, and whether
/// the fill stopped early because it hit the tile cap.
#[derive(Debug, Default)]
pub struct FillOutcome {
    pub changed: Vec<(u32, u32)>,
    pub limit_reached: bool,
}

impl FillOutcome {
    pub fn count(&self) -> usize {
        self.changed.len()
    }
}

/// Flood fill the 4-connected region around a seed cell with `fill_value`.
///
/// The value at the seed is the target value; a seed that is out of
/// bounds or already equal to `fill_value` is a no-op. Expansion is
/// breadth-first, never revisits a cell, and stops after `max_tiles`
/// writes, reporting `limit_reached` so callers can warn about runaway
/// fills. The caller is responsible for pairing each changed coordinate
/// with the original target value when building an undo diff.
pub fn flood_fill(
    scene: &mut Scene,
    layer: LayerId,
    start_x: i32,
    start_y: i32,
    fill_value: u32,
    max_tiles: usize,
) -> FillOutcome {
    let mut outcome = FillOutcome::default();

    if !scene.in_bounds(start_x, start_y) || max_tiles == 0 {
        return outcome;
    }

    let start = (start_x as u32, start_y as u32);
    let target = scene.tile(layer, start.0, start.1);
    if target == fill_value {
        return outcome;
    }

    let width = scene.width;
    let height = scene.height;
    let mut queue = VecDeque::new();
    let mut visited = HashSet::new();
    queue.push_back(start);

    while let Some((x, y)) = queue.pop_front() {
        if !visited.insert((x, y)) {
            continue;
        }
        if scene.tile(layer, x, y) != target {
            continue;
        }
        if outcome.changed.len() >= max_tiles {
            // A matching cell remains beyond the cap.
            outcome.limit_reached = true;
            break;
        }

        scene.set_tile(layer, x, y, fill_value);
        outcome.changed.push((x, y));

        if x > 0 {
            queue.push_back((x - 1, y));
        }
        if x < width - 1 {
            queue.push_back((x + 1, y));
        }
        if y > 0 {
            queue.push_back((x, y - 1));
        }
        if y < height - 1 {
            queue.push_back((x, y + 1));
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn scene_5x5() -> Scene {
        Scene::new("fill".to_string(), 5, 5, 32)
    }

    #[test]
    fn test_fill_whole_empty_layer() {
        // Scenario: filling an all-zero 5x5 layer covers all 25 cells
        // without hitting a generous limit.
        let mut scene = scene_5x5();
        let outcome = flood_fill(&mut scene, LayerId::Ground, 0, 0, 3, 100);

        assert_eq!(outcome.count(), 25);
        assert!(!outcome.limit_reached);
        for y in 0..5 {
            for x in 0..5 {
                assert_eq!(scene.tile(LayerId::Ground, x, y), 3);
            }
        }
    }

    #[test]
    fn test_fill_never_revisits_and_respects_limit() {
        let mut scene = scene_5x5();
        let outcome = flood_fill(&mut scene, LayerId::Ground, 2, 2, 9, 10);

        assert_eq!(outcome.count(), 10);
        assert!(outcome.limit_reached);

        let unique: HashSet<_> = outcome.changed.iter().collect();
        assert_eq!(unique.len(), outcome.changed.len());

        let written = (0..5)
            .flat_map(|y| (0..5).map(move |x| (x, y)))
            .filter(|&(x, y)| scene.tile(LayerId::Ground, x, y) == 9)
            .count();
        assert_eq!(written, 10);
    }

    #[test]
    fn test_fill_stops_at_region_border() {
        let mut scene = scene_5x5();
        // Wall of 1s down column 2 splits the layer.
        for y in 0..5 {
            scene.set_tile(LayerId::Ground, 2, y, 1);
        }

        let outcome = flood_fill(&mut scene, LayerId::Ground, 0, 0, 7, 100);
        assert_eq!(outcome.count(), 10);
        assert_eq!(scene.tile(LayerId::Ground, 2, 2), 1);
        assert_eq!(scene.tile(LayerId::Ground, 3, 0), 0);
    }

    #[test]
    fn test_fill_noop_cases() {
        let mut scene = scene_5x5();

        // Seed out of bounds.
        let outcome = flood_fill(&mut scene, LayerId::Ground, -1, 0, 7, 100);
        assert_eq!(outcome.count(), 0);

        // Seed already equals the fill value.
        scene.set_tile(LayerId::Ground, 1, 1, 7);
        let outcome = flood_fill(&mut scene, LayerId::Ground, 1, 1, 7, 100);
        assert_eq!(outcome.count(), 0);
        assert!(!outcome.limit_reached);
    }

    #[test]
    fn test_exact_cap_is_not_reported_truncated() {
        let mut scene = scene_5x5();
        let outcome = flood_fill(&mut scene, LayerId::Ground, 0, 0, 4, 25);
        assert_eq!(outcome.count(), 25);
        assert!(!outcome.limit_reached);
    }
}
