//! Reversible operations as plain data
//!
//! Operations carry absolute before/after payloads and are applied by a
//! single pure function, so the history stack can be serialized and
//! inspected without invoking arbitrary code. `execute` and `undo` are
//! idempotent under repeated cycling.

use serde::{Deserialize, Serialize};
use tilecraft_core::{EntityInstance, LayerId, Scene};
use uuid::Uuid;

use crate::commands::clipboard::{SelectionBounds, SelectionData};
use crate::state::ChangeTracker;
use crate::tools::select::{SelectMode, SelectionState};

/// The atomic unit of reversible tile mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileChange {
    pub layer: LayerId,
    pub x: u32,
    pub y: u32,
    pub old: u32,
    pub new: u32,
}

/// One entity's net displacement within a move operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovedEntity {
    pub id: Uuid,
    pub from: [f32; 2],
    pub to: [f32; 2],
}

/// Selection rectangle state carried by operations that must re-select
/// on undo/redo (move, paste, delete). `None` on a side means the
/// selection is cleared when stepping to that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRestore {
    pub before: Option<SelectionBounds>,
    pub after: Option<SelectionBounds>,
}

/// A reversible editing step. Produced by the tools, owned by `History`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Operation {
    /// Batch tile changes (painting strokes, fills, moves, pastes).
    TileEdit {
        description: String,
        changes: Vec<TileChange>,
        /// Present on operations that also restore the selection
        /// rectangle and mode; absent on plain strokes.
        selection: Option<SelectionRestore>,
    },
    /// Net entity displacement of one drag gesture.
    EntityMove {
        description: String,
        moves: Vec<MovedEntity>,
    },
    /// Entities added in one step (duplicate). Undo removes them.
    EntityAdd {
        description: String,
        instances: Vec<EntityInstance>,
        selection_before: Vec<Uuid>,
        selection_after: Vec<Uuid>,
    },
    /// Entities removed in one step (delete). Undo restores them.
    EntityRemove {
        description: String,
        instances: Vec<EntityInstance>,
        selection_before: Vec<Uuid>,
        selection_after: Vec<Uuid>,
    },
    /// Several operations committed as one undo step.
    Group {
        description: String,
        operations: Vec<Operation>,
    },
}

impl Operation {
    pub fn description(&self) -> &str {
        match self {
            Operation::TileEdit { description, .. }
            | Operation::EntityMove { description, .. }
            | Operation::EntityAdd { description, .. }
            | Operation::EntityRemove { description, .. }
            | Operation::Group { description, .. } => description,
        }
    }

    /// An operation with no payload has no visible effect; callers may
    /// skip pushing it.
    pub fn is_empty(&self) -> bool {
        match self {
            Operation::TileEdit { changes, .. } => changes.is_empty(),
            Operation::EntityMove { moves, .. } => moves.is_empty(),
            Operation::EntityAdd { instances, .. } | Operation::EntityRemove { instances, .. } => {
                instances.is_empty()
            }
            Operation::Group { operations, .. } => operations.iter().all(|op| op.is_empty()),
        }
    }

    /// Apply in the forward (redo) direction.
    pub fn execute(
        &self,
        scene: &mut Scene,
        selection: &mut SelectionState,
        tracker: &mut ChangeTracker,
    ) {
        self.apply(scene, selection, tracker, false);
    }

    /// Apply in the reverse (undo) direction.
    pub fn undo(
        &self,
        scene: &mut Scene,
        selection: &mut SelectionState,
        tracker: &mut ChangeTracker,
    ) {
        self.apply(scene, selection, tracker, true);
    }

    fn apply(
        &self,
        scene: &mut Scene,
        selection: &mut SelectionState,
        tracker: &mut ChangeTracker,
        reverse: bool,
    ) {
        match self {
            Operation::TileEdit {
                changes,
                selection: restore,
                ..
            } => {
                for change in changes {
                    let value = if reverse { change.old } else { change.new };
                    scene.set_tile(change.layer, change.x, change.y, value);
                }
                if let Some(restore) = restore {
                    let bounds = if reverse { restore.before } else { restore.after };
                    selection.tile = match bounds {
                        // Re-snapshot after the writes so the restored
                        // selection carries current values.
                        Some(bounds) => SelectMode::Selected {
                            selection: SelectionData::capture(scene, bounds),
                        },
                        None => SelectMode::Idle,
                    };
                }
            }
            Operation::EntityMove { moves, .. } => {
                for moved in moves {
                    if let Some(entity) = scene.get_entity_mut(moved.id) {
                        entity.position = if reverse { moved.from } else { moved.to };
                    }
                }
            }
            Operation::EntityAdd {
                instances,
                selection_before,
                selection_after,
                ..
            } => {
                if reverse {
                    for instance in instances {
                        scene.remove_entity(instance.id);
                    }
                    selection.entities = selection_before.clone();
                } else {
                    for instance in instances {
                        if scene.get_entity(instance.id).is_none() {
                            scene.add_entity(instance.clone());
                        }
                    }
                    selection.entities = selection_after.clone();
                }
            }
            Operation::EntityRemove {
                instances,
                selection_before,
                selection_after,
                ..
            } => {
                if reverse {
                    for instance in instances {
                        if scene.get_entity(instance.id).is_none() {
                            scene.add_entity(instance.clone());
                        }
                    }
                    selection.entities = selection_before.clone();
                } else {
                    for instance in instances {
                        scene.remove_entity(instance.id);
                    }
                    selection.entities = selection_after.clone();
                }
            }
            Operation::Group { operations, .. } => {
                if reverse {
                    for op in operations.iter().rev() {
                        op.apply(scene, selection, tracker, true);
                    }
                } else {
                    for op in operations {
                        op.apply(scene, selection, tracker, false);
                    }
                }
                return;
            }
        }
        tracker.mark();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (Scene, SelectionState, ChangeTracker) {
        (
            Scene::new("ops".to_string(), 10, 10, 32),
            SelectionState::default(),
            ChangeTracker::default(),
        )
    }

    #[test]
    fn test_tile_edit_execute_undo_cycle() {
        let (mut scene, mut selection, mut tracker) = fixture();
        let op = Operation::TileEdit {
            description: "Paint Tiles".to_string(),
            changes: vec![
                TileChange { layer: LayerId::Ground, x: 1, y: 1, old: 0, new: 7 },
                TileChange { layer: LayerId::Ground, x: 2, y: 1, old: 0, new: 7 },
            ],
            selection: None,
        };

        op.execute(&mut scene, &mut selection, &mut tracker);
        assert_eq!(scene.tile(LayerId::Ground, 1, 1), 7);

        op.undo(&mut scene, &mut selection, &mut tracker);
        assert_eq!(scene.tile(LayerId::Ground, 1, 1), 0);

        // Idempotent under repeated cycling.
        op.execute(&mut scene, &mut selection, &mut tracker);
        op.execute(&mut scene, &mut selection, &mut tracker);
        assert_eq!(scene.tile(LayerId::Ground, 2, 1), 7);
    }

    #[test]
    fn test_selection_restore() {
        let (mut scene, mut selection, mut tracker) = fixture();
        let bounds = SelectionBounds { x: 2, y: 2, width: 3, height: 3, layer: LayerId::Ground };
        let op = Operation::TileEdit {
            description: "Paste Tiles".to_string(),
            changes: vec![TileChange { layer: LayerId::Ground, x: 2, y: 2, old: 0, new: 5 }],
            selection: Some(SelectionRestore { before: None, after: Some(bounds) }),
        };

        op.execute(&mut scene, &mut selection, &mut tracker);
        match &selection.tile {
            SelectMode::Selected { selection: data } => {
                assert_eq!(data.bounds, bounds);
                assert_eq!(data.value_at(0, 0), 5);
            }
            other => panic!("expected Selected, got {other:?}"),
        }

        op.undo(&mut scene, &mut selection, &mut tracker);
        assert_eq!(selection.tile, SelectMode::Idle);
    }

    #[test]
    fn test_entity_remove_round_trip() {
        let (mut scene, mut selection, mut tracker) = fixture();
        let entity = EntityInstance::new("NPC".to_string(), [10.0, 10.0]);
        let id = entity.id;
        scene.add_entity(entity.clone());
        selection.entities = vec![id];

        let op = Operation::EntityRemove {
            description: "Delete Entities".to_string(),
            instances: vec![entity],
            selection_before: vec![id],
            selection_after: vec![],
        };

        op.execute(&mut scene, &mut selection, &mut tracker);
        assert!(scene.get_entity(id).is_none());
        assert!(selection.entities.is_empty());

        op.undo(&mut scene, &mut selection, &mut tracker);
        assert!(scene.get_entity(id).is_some());
        assert_eq!(selection.entities, vec![id]);
    }

    #[test]
    fn test_group_undoes_in_reverse_order() {
        let (mut scene, mut selection, mut tracker) = fixture();
        // Two edits touching the same cell; order matters.
        let op = Operation::Group {
            description: "Erase Tiles".to_string(),
            operations: vec![
                Operation::TileEdit {
                    description: "step".to_string(),
                    changes: vec![TileChange { layer: LayerId::Ground, x: 0, y: 0, old: 3, new: 5 }],
                    selection: None,
                },
                Operation::TileEdit {
                    description: "step".to_string(),
                    changes: vec![TileChange { layer: LayerId::Ground, x: 0, y: 0, old: 5, new: 9 }],
                    selection: None,
                },
            ],
        };

        scene.set_tile(LayerId::Ground, 0, 0, 3);
        op.execute(&mut scene, &mut selection, &mut tracker);
        assert_eq!(scene.tile(LayerId::Ground, 0, 0), 9);

        op.undo(&mut scene, &mut selection, &mut tracker);
        assert_eq!(scene.tile(LayerId::Ground, 0, 0), 3);
    }

    #[test]
    fn test_operations_serialize() {
        let op = Operation::TileEdit {
            description: "Paint Tiles".to_string(),
            changes: vec![TileChange { layer: LayerId::Props, x: 4, y: 2, old: 0, new: 11 }],
            selection: None,
        };
        let json = serde_json::to_string(&op).unwrap();
        let parsed: Operation = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.description(), "Paint Tiles");
        assert!(!parsed.is_empty());
    }
}
