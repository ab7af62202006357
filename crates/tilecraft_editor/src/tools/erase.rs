//! Erase tool: clears cells through the brush footprint, one undo group
//! per gesture

use std::collections::HashMap;

use tilecraft_core::{LayerId, Scene, EMPTY_TILE};

use crate::commands::{History, Operation};
use crate::geometry::{brush_footprint, interpolate_line};
use crate::state::{ChangeTracker, EditorState};
use crate::tools::{drain_changes, record_change};

/// Transient state of one erase gesture. The history group opened on
/// pointer-down is closed on pointer-up even when nothing was erased.
#[derive(Debug, Default)]
pub struct EraseGesture {
    erasing: bool,
    layer: Option<LayerId>,
    brush_size: u32,
    locked: bool,
    last_tile: Option<(i32, i32)>,
}

impl EraseGesture {
    pub fn is_erasing(&self) -> bool {
        self.erasing
    }

    fn reset(&mut self) {
        self.erasing = false;
        self.layer = None;
        self.brush_size = 1;
        self.locked = false;
        self.last_tile = None;
    }
}

pub fn pointer_down(
    scene: &mut Scene,
    state: &EditorState,
    gesture: &mut EraseGesture,
    history: &mut History,
    tracker: &mut ChangeTracker,
    tile: (i32, i32),
) {
    gesture.reset();
    gesture.erasing = true;
    gesture.layer = Some(state.active_layer);
    gesture.brush_size = state.brush_size;
    gesture.locked = state.is_layer_locked(state.active_layer);

    // Always paired with end_group on pointer-up, even when the layer
    // is locked and the whole gesture is a no-op.
    history.begin_group("Erase Tiles");

    erase_at(scene, gesture, history, tracker, tile);
    gesture.last_tile = Some(tile);
}

pub fn pointer_move(
    scene: &mut Scene,
    gesture: &mut EraseGesture,
    history: &mut History,
    tracker: &mut ChangeTracker,
    tile: (i32, i32),
) {
    if !gesture.erasing {
        return;
    }
    if gesture.last_tile == Some(tile) {
        return;
    }

    match gesture.last_tile {
        Some((lx, ly)) => {
            let line = interpolate_line(lx, ly, tile.0, tile.1);
            erase_cells(scene, gesture, history, tracker, &line);
        }
        None => erase_at(scene, gesture, history, tracker, tile),
    }
    gesture.last_tile = Some(tile);
}

pub fn pointer_up(gesture: &mut EraseGesture, history: &mut History) {
    if gesture.erasing {
        history.end_group();
    }
    gesture.reset();
}

/// Abort the gesture, reverting every cell the open group erased.
pub fn cancel(
    scene: &mut Scene,
    gesture: &mut EraseGesture,
    history: &mut History,
    selection: &mut crate::tools::select::SelectionState,
    tracker: &mut ChangeTracker,
) {
    if gesture.erasing {
        let operations = history.cancel_group();
        for operation in operations.iter().rev() {
            operation.undo(scene, selection, tracker);
        }
    }
    gesture.reset();
}

fn erase_at(
    scene: &mut Scene,
    gesture: &mut EraseGesture,
    history: &mut History,
    tracker: &mut ChangeTracker,
    tile: (i32, i32),
) {
    erase_cells(scene, gesture, history, tracker, &[tile]);
}

/// Clear the brush footprint of every listed cell, committing the
/// event's changes as one operation inside the gesture group.
fn erase_cells(
    scene: &mut Scene,
    gesture: &mut EraseGesture,
    history: &mut History,
    tracker: &mut ChangeTracker,
    cells: &[(i32, i32)],
) {
    if gesture.locked {
        return;
    }
    let Some(layer) = gesture.layer else {
        return;
    };

    let mut changes: HashMap<(u32, u32), (u32, u32)> = HashMap::new();
    for &(cx, cy) in cells {
        for (x, y) in brush_footprint(cx, cy, gesture.brush_size) {
            if !scene.in_bounds(x, y) {
                continue;
            }
            let (x, y) = (x as u32, y as u32);
            let old = scene.tile(layer, x, y);
            if old == EMPTY_TILE {
                continue;
            }
            scene.set_tile(layer, x, y, EMPTY_TILE);
            record_change(&mut changes, x, y, old, EMPTY_TILE);
            tracker.mark();
        }
    }

    if !changes.is_empty() {
        history.push(Operation::TileEdit {
            description: "Erase Tiles".to_string(),
            changes: drain_changes(&mut changes, layer),
            selection: None,
        });
    }
}
