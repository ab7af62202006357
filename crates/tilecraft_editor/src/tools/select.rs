//! Select tool - tile sub-machine
//!
//! A mode state machine over one rectangular selection: marquee
//! selection, move, clipboard copy/paste, one-shot flood fill, and
//! delete. Entity handling for the same gesture stream lives in
//! `tools::entity`; the `Editor` session interleaves the two.

use tilecraft_core::{Scene, EMPTY_TILE};
use tracing::warn;

use crate::commands::{
    History, Operation, SelectionBounds, SelectionData, SelectionRestore, TileClipboard,
};
use crate::fill::flood_fill;
use crate::state::{ChangeTracker, EditorState};
use crate::tools::entity::EntityDrag;
use crate::tools::resolve_paint_value;

/// Mode of the tile sub-machine. A selection snapshot exists only in
/// `Selected`/`Moving`, a move offset only in `Moving`, and the armed
/// one-shot actions are modes of their own, so illegal combinations are
/// unrepresentable.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SelectMode {
    #[default]
    Idle,
    /// Flood fill armed; the next pointer-down triggers it.
    FillArmed,
    /// Paste armed; the next pointer-down stamps the clipboard.
    Pasting,
    /// Dragging out a marquee rectangle.
    Selecting {
        anchor: (i32, i32),
        current: (i32, i32),
        /// The selection the drag started on top of, if any. A
        /// no-movement tap on it clears instead of re-selecting, and a
        /// long-press converts it into a move.
        prior: Option<SelectionData>,
        moved: bool,
    },
    /// A finalized rectangle with its snapshot.
    Selected { selection: SelectionData },
    /// Moving the selected rectangle. `grab` anchors the pointer's
    /// first touch; `offset` is the current displacement in tiles.
    Moving {
        selection: SelectionData,
        grab: Option<(i32, i32)>,
        offset: (i32, i32),
    },
}

/// Selection state shared by the select tool's two halves and mutated
/// by undo/redo of operations that restore selections.
#[derive(Debug, Default)]
pub struct SelectionState {
    pub tile: SelectMode,
    /// Currently selected entity ids.
    pub entities: Vec<uuid::Uuid>,
    pub(crate) entity_drag: Option<EntityDrag>,
}

impl SelectionState {
    /// Discard all transient selection state.
    pub fn clear(&mut self) {
        self.tile = SelectMode::Idle;
        self.entities.clear();
        self.entity_drag = None;
    }

    /// Bounds of the active tile selection, if one exists.
    pub fn tile_bounds(&self) -> Option<SelectionBounds> {
        match &self.tile {
            SelectMode::Selected { selection } | SelectMode::Moving { selection, .. } => {
                Some(selection.bounds)
            }
            _ => None,
        }
    }
}

/// Consume a pointer-down that triggers an armed one-shot action or
/// anchors an armed move. Returns true when the event was handled.
pub fn handle_armed(
    scene: &mut Scene,
    state: &EditorState,
    selection: &mut SelectionState,
    history: &mut History,
    clipboard: &TileClipboard,
    tracker: &mut ChangeTracker,
    tile: (i32, i32),
) -> bool {
    if matches!(selection.tile, SelectMode::Pasting) {
        paste_at(scene, state, selection, history, clipboard, tracker, tile);
        return true;
    }
    if matches!(selection.tile, SelectMode::FillArmed) {
        fill_at(scene, state, selection, history, tracker, tile);
        return true;
    }
    if let SelectMode::Moving { grab, .. } = &mut selection.tile {
        // Armed via arm_move: the first touch anchors the offset.
        *grab = Some(tile);
        return true;
    }
    false
}

/// Start a marquee drag at the given tile. If the press landed inside
/// the existing selection, that selection is carried as `prior`.
pub fn begin_selecting(selection: &mut SelectionState, tile: (i32, i32)) {
    let prior = match std::mem::take(&mut selection.tile) {
        SelectMode::Selected { selection: data } if data.bounds.contains(tile.0, tile.1) => {
            Some(data)
        }
        _ => None,
    };
    selection.tile = SelectMode::Selecting {
        anchor: tile,
        current: tile,
        prior,
        moved: false,
    };
}

pub fn pointer_move(selection: &mut SelectionState, tile: (i32, i32)) {
    match &mut selection.tile {
        SelectMode::Selecting {
            anchor,
            current,
            moved,
            ..
        } => {
            *current = tile;
            if tile != *anchor {
                *moved = true;
            }
        }
        SelectMode::Moving {
            grab: Some(grab),
            offset,
            ..
        } => {
            *offset = (tile.0 - grab.0, tile.1 - grab.1);
        }
        _ => {}
    }
}

pub fn pointer_up(
    scene: &mut Scene,
    state: &EditorState,
    selection: &mut SelectionState,
    history: &mut History,
    tracker: &mut ChangeTracker,
) {
    match std::mem::take(&mut selection.tile) {
        SelectMode::Selecting {
            anchor,
            current,
            prior,
            moved,
        } => {
            // A tap without movement on top of an existing selection
            // deselects it.
            if prior.is_some() && !moved {
                selection.tile = SelectMode::Idle;
                return;
            }
            let bounds = SelectionBounds::from_drag(anchor, current, scene, state.active_layer);
            selection.tile = SelectMode::Selected {
                selection: SelectionData::capture(scene, bounds),
            };
        }
        SelectMode::Moving {
            selection: data,
            grab: Some(_),
            offset,
        } => {
            commit_move(scene, state, selection, history, tracker, data, offset);
        }
        other => selection.tile = other,
    }
}

/// Convert a long-press on the pressed-on selection into a move,
/// anchored at the press. Returns true when consumed.
pub fn long_press(selection: &mut SelectionState) -> bool {
    if matches!(
        &selection.tile,
        SelectMode::Selecting { prior: Some(_), moved: false, .. }
    ) {
        if let SelectMode::Selecting { anchor, prior: Some(data), .. } =
            std::mem::take(&mut selection.tile)
        {
            selection.tile = SelectMode::Moving {
                selection: data,
                grab: Some(anchor),
                offset: (0, 0),
            };
            return true;
        }
    }
    false
}

/// Toolbar action: arm a move of the current selection. The next
/// pointer-down anchors it.
pub fn arm_move(selection: &mut SelectionState) {
    if let SelectMode::Selected { selection: data } = std::mem::take(&mut selection.tile) {
        selection.tile = SelectMode::Moving {
            selection: data,
            grab: None,
            offset: (0, 0),
        };
    }
}

/// Toolbar action: arm a paste. Ignored when the clipboard is empty.
pub fn arm_paste(selection: &mut SelectionState, clipboard: &TileClipboard) {
    if clipboard.has_data() {
        selection.tile = SelectMode::Pasting;
    }
}

/// Toolbar action: disarm the selection and arm a one-shot flood fill.
pub fn arm_fill(selection: &mut SelectionState) {
    selection.tile = SelectMode::FillArmed;
}

/// Deep-copy the current snapshot into the clipboard. No effect without
/// an active selection.
pub fn copy_selection(selection: &SelectionState, clipboard: &mut TileClipboard) {
    if let SelectMode::Selected { selection: data } = &selection.tile {
        clipboard.copy(data);
    }
}

/// Zero every non-empty cell inside the current rectangle, push one
/// operation, and refresh the cached snapshot.
pub fn delete_selection(
    scene: &mut Scene,
    state: &EditorState,
    selection: &mut SelectionState,
    history: &mut History,
    tracker: &mut ChangeTracker,
) {
    let SelectMode::Selected { selection: data } = &selection.tile else {
        return;
    };
    let bounds = data.bounds;
    if state.is_layer_locked(bounds.layer) {
        return;
    }

    let mut changes = Vec::new();
    for dy in 0..bounds.height {
        for dx in 0..bounds.width {
            let (x, y) = (bounds.x + dx, bounds.y + dy);
            let old = scene.tile(bounds.layer, x, y);
            if old == EMPTY_TILE {
                continue;
            }
            scene.set_tile(bounds.layer, x, y, EMPTY_TILE);
            changes.push(crate::commands::TileChange {
                layer: bounds.layer,
                x,
                y,
                old,
                new: EMPTY_TILE,
            });
        }
    }

    if !changes.is_empty() {
        history.push(Operation::TileEdit {
            description: "Delete Selection".to_string(),
            changes,
            selection: Some(SelectionRestore {
                before: Some(bounds),
                after: Some(bounds),
            }),
        });
        tracker.mark();
    }

    selection.tile = SelectMode::Selected {
        selection: SelectionData::capture(scene, bounds),
    };
}

/// Abort whatever tile gesture is in flight without committing. Armed
/// modes survive; an interrupted move returns to `Selected`.
pub fn cancel(selection: &mut SelectionState) {
    match std::mem::take(&mut selection.tile) {
        SelectMode::Selecting { prior: Some(data), .. } => {
            selection.tile = SelectMode::Selected { selection: data };
        }
        SelectMode::Selecting { .. } => selection.tile = SelectMode::Idle,
        SelectMode::Moving { selection: data, .. } => {
            selection.tile = SelectMode::Selected { selection: data };
        }
        other => selection.tile = other,
    }
}

/// Commit a finished move: zero the sources, stamp the snapshot at the
/// clamped destination, and push one operation that also restores the
/// selection rectangle on undo/redo.
fn commit_move(
    scene: &mut Scene,
    state: &EditorState,
    selection: &mut SelectionState,
    history: &mut History,
    tracker: &mut ChangeTracker,
    data: SelectionData,
    offset: (i32, i32),
) {
    let bounds = data.bounds;

    if state.is_layer_locked(bounds.layer) || offset == (0, 0) {
        selection.tile = SelectMode::Selected { selection: data };
        return;
    }

    // Clamp so the shifted rectangle never leaves the scene.
    let min_dx = -(bounds.x as i32);
    let max_dx = (scene.width - bounds.width) as i32 - bounds.x as i32;
    let min_dy = -(bounds.y as i32);
    let max_dy = (scene.height - bounds.height) as i32 - bounds.y as i32;
    let dx = offset.0.clamp(min_dx, max_dx);
    let dy = offset.1.clamp(min_dy, max_dy);

    if (dx, dy) == (0, 0) {
        selection.tile = SelectMode::Selected { selection: data };
        return;
    }

    // Deduplicated per-cell diff: sources go empty, destinations take
    // the snapshot values (destinations win where the two overlap).
    let mut cells: std::collections::HashMap<(u32, u32), (u32, u32)> =
        std::collections::HashMap::new();
    for j in 0..bounds.height {
        for i in 0..bounds.width {
            let (x, y) = (bounds.x + i, bounds.y + j);
            cells.insert((x, y), (scene.tile(bounds.layer, x, y), EMPTY_TILE));
        }
    }
    for j in 0..bounds.height {
        for i in 0..bounds.width {
            let x = (bounds.x + i) as i32 + dx;
            let y = (bounds.y + j) as i32 + dy;
            let (x, y) = (x as u32, y as u32);
            let value = data.value_at(i, j);
            if let Some(cell) = cells.get_mut(&(x, y)) {
                cell.1 = value;
            } else {
                cells.insert((x, y), (scene.tile(bounds.layer, x, y), value));
            }
        }
    }

    let mut changes = Vec::new();
    for (&(x, y), &(old, new)) in &cells {
        scene.set_tile(bounds.layer, x, y, new);
        if old != new {
            changes.push(crate::commands::TileChange {
                layer: bounds.layer,
                x,
                y,
                old,
                new,
            });
        }
    }

    let new_bounds = SelectionBounds {
        x: (bounds.x as i32 + dx) as u32,
        y: (bounds.y as i32 + dy) as u32,
        ..bounds
    };

    if !changes.is_empty() {
        history.push(Operation::TileEdit {
            description: "Move Selection".to_string(),
            changes,
            selection: Some(SelectionRestore {
                before: Some(bounds),
                after: Some(new_bounds),
            }),
        });
        tracker.mark();
    }

    selection.tile = SelectMode::Selected {
        selection: SelectionData::capture(scene, new_bounds),
    };
}

/// Stamp the clipboard snapshot at the tapped tile into the active
/// layer, bounds-clipped, and select the pasted footprint.
fn paste_at(
    scene: &mut Scene,
    state: &EditorState,
    selection: &mut SelectionState,
    history: &mut History,
    clipboard: &TileClipboard,
    tracker: &mut ChangeTracker,
    tile: (i32, i32),
) {
    let Some(data) = clipboard.paste() else {
        selection.tile = SelectMode::Idle;
        return;
    };
    let layer = state.active_layer;
    if state.is_layer_locked(layer) {
        // Preserve the armed mode; the action is simply inert.
        return;
    }

    // Intersect the pasted footprint with the scene.
    let x0 = tile.0.max(0);
    let y0 = tile.1.max(0);
    let x1 = (tile.0 + data.bounds.width as i32).min(scene.width as i32);
    let y1 = (tile.1 + data.bounds.height as i32).min(scene.height as i32);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let mut changes = Vec::new();
    for y in y0..y1 {
        for x in x0..x1 {
            let value = data.value_at((x - tile.0) as u32, (y - tile.1) as u32);
            let (x, y) = (x as u32, y as u32);
            let old = scene.tile(layer, x, y);
            if old != value {
                scene.set_tile(layer, x, y, value);
                changes.push(crate::commands::TileChange { layer, x, y, old, new: value });
            }
        }
    }

    let new_bounds = SelectionBounds {
        x: x0 as u32,
        y: y0 as u32,
        width: (x1 - x0) as u32,
        height: (y1 - y0) as u32,
        layer,
    };

    if !changes.is_empty() {
        history.push(Operation::TileEdit {
            description: "Paste Tiles".to_string(),
            changes,
            selection: Some(SelectionRestore {
                before: None,
                after: Some(new_bounds),
            }),
        });
        tracker.mark();
    }

    selection.tile = SelectMode::Selected {
        selection: SelectionData::capture(scene, new_bounds),
    };
}

/// Trigger the armed one-shot flood fill at the tapped tile.
fn fill_at(
    scene: &mut Scene,
    state: &EditorState,
    selection: &mut SelectionState,
    history: &mut History,
    tracker: &mut ChangeTracker,
    tile: (i32, i32),
) {
    // The arm is one-shot: whatever happens, the trigger is consumed.
    selection.tile = SelectMode::Idle;

    let layer = state.active_layer;
    if state.is_layer_locked(layer) {
        return;
    }
    let Some(value) = resolve_paint_value(scene, state) else {
        return;
    };
    if !scene.in_bounds(tile.0, tile.1) {
        return;
    }

    let target = scene.tile(layer, tile.0 as u32, tile.1 as u32);
    let outcome = flood_fill(scene, layer, tile.0, tile.1, value, state.max_fill_tiles);
    if outcome.limit_reached {
        warn!(
            filled = outcome.count(),
            limit = state.max_fill_tiles,
            "flood fill stopped at the tile cap"
        );
    }
    if outcome.changed.is_empty() {
        return;
    }

    let changes = outcome
        .changed
        .iter()
        .map(|&(x, y)| crate::commands::TileChange { layer, x, y, old: target, new: value })
        .collect();
    history.push(Operation::TileEdit {
        description: "Flood Fill".to_string(),
        changes,
        selection: None,
    });
    tracker.mark();
}
