//! Undo/redo stacks with gesture grouping

use tilecraft_core::Scene;
use tracing::warn;

use crate::commands::Operation;
use crate::state::ChangeTracker;
use crate::tools::select::SelectionState;

/// Stores operation history for undo/redo.
///
/// Operations are pushed after their changes have already been applied
/// to the scene (the tools mutate first, then record). A gesture that
/// produces many small operations brackets them in `begin_group` /
/// `end_group` so they commit as one reversible step; the pair must
/// always match, and an empty group is silently dropped.
#[derive(Debug, Default)]
pub struct History {
    undo_stack: Vec<Operation>,
    redo_stack: Vec<Operation>,
    open_group: Option<(String, Vec<Operation>)>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an already-applied operation. Empty operations are
    /// dropped. While a group is open the operation joins it instead of
    /// landing on the undo stack.
    pub fn push(&mut self, operation: Operation) {
        if operation.is_empty() {
            return;
        }
        if let Some((_, operations)) = &mut self.open_group {
            operations.push(operation);
        } else {
            self.undo_stack.push(operation);
            self.redo_stack.clear();
        }
    }

    /// Open a group; subsequent pushes collect into one undo step.
    pub fn begin_group(&mut self, label: impl Into<String>) {
        if self.open_group.is_some() {
            warn!("begin_group called while a group is already open");
            return;
        }
        self.open_group = Some((label.into(), Vec::new()));
    }

    /// Close the open group and commit it as a single step. A group
    /// with no operations is dropped; one with a single operation is
    /// committed unwrapped.
    pub fn end_group(&mut self) {
        let Some((label, mut operations)) = self.open_group.take() else {
            warn!("end_group called without an open group");
            return;
        };
        match operations.len() {
            0 => {}
            1 => {
                let op = operations.remove(0);
                self.undo_stack.push(op);
                self.redo_stack.clear();
            }
            _ => {
                self.undo_stack.push(Operation::Group {
                    description: label,
                    operations,
                });
                self.redo_stack.clear();
            }
        }
    }

    /// Abandon the open group, returning its operations so the caller
    /// can revert their already-applied changes.
    pub fn cancel_group(&mut self) -> Vec<Operation> {
        self.open_group
            .take()
            .map(|(_, operations)| operations)
            .unwrap_or_default()
    }

    /// Undo the most recent step. No-op while a gesture group is open.
    pub fn undo(
        &mut self,
        scene: &mut Scene,
        selection: &mut SelectionState,
        tracker: &mut ChangeTracker,
    ) -> bool {
        if self.open_group.is_some() {
            warn!("undo requested mid-gesture; ignoring");
            return false;
        }
        let Some(operation) = self.undo_stack.pop() else {
            return false;
        };
        operation.undo(scene, selection, tracker);
        self.redo_stack.push(operation);
        true
    }

    /// Redo the most recently undone step.
    pub fn redo(
        &mut self,
        scene: &mut Scene,
        selection: &mut SelectionState,
        tracker: &mut ChangeTracker,
    ) -> bool {
        if self.open_group.is_some() {
            warn!("redo requested mid-gesture; ignoring");
            return false;
        }
        let Some(operation) = self.redo_stack.pop() else {
            return false;
        };
        operation.execute(scene, selection, tracker);
        self.undo_stack.push(operation);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last().map(|op| op.description())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(|op| op.description())
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Clear all history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.open_group = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::TileChange;
    use tilecraft_core::LayerId;

    fn tile_op(x: u32, old: u32, new: u32) -> Operation {
        Operation::TileEdit {
            description: "edit".to_string(),
            changes: vec![TileChange { layer: LayerId::Ground, x, y: 0, old, new }],
            selection: None,
        }
    }

    fn fixture() -> (Scene, SelectionState, ChangeTracker) {
        (
            Scene::new("history".to_string(), 10, 10, 32),
            SelectionState::default(),
            ChangeTracker::default(),
        )
    }

    #[test]
    fn test_push_undo_redo() {
        let (mut scene, mut selection, mut tracker) = fixture();
        let mut history = History::new();

        scene.set_tile(LayerId::Ground, 0, 0, 7);
        history.push(tile_op(0, 0, 7));
        assert!(history.can_undo());
        assert_eq!(history.undo_description(), Some("edit"));

        assert!(history.undo(&mut scene, &mut selection, &mut tracker));
        assert_eq!(scene.tile(LayerId::Ground, 0, 0), 0);
        assert!(history.can_redo());

        assert!(history.redo(&mut scene, &mut selection, &mut tracker));
        assert_eq!(scene.tile(LayerId::Ground, 0, 0), 7);
    }

    #[test]
    fn test_new_push_clears_redo() {
        let (mut scene, mut selection, mut tracker) = fixture();
        let mut history = History::new();

        history.push(tile_op(0, 0, 1));
        history.undo(&mut scene, &mut selection, &mut tracker);
        assert!(history.can_redo());

        history.push(tile_op(1, 0, 2));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_group_commits_as_one_step() {
        let (mut scene, mut selection, mut tracker) = fixture();
        let mut history = History::new();

        scene.set_tile(LayerId::Ground, 0, 0, 1);
        scene.set_tile(LayerId::Ground, 1, 0, 1);
        history.begin_group("Erase Tiles");
        history.push(tile_op(0, 0, 1));
        history.push(tile_op(1, 0, 1));
        history.end_group();

        assert_eq!(history.undo_len(), 1);
        assert_eq!(history.undo_description(), Some("Erase Tiles"));

        history.undo(&mut scene, &mut selection, &mut tracker);
        assert_eq!(scene.tile(LayerId::Ground, 0, 0), 0);
        assert_eq!(scene.tile(LayerId::Ground, 1, 0), 0);
    }

    #[test]
    fn test_empty_group_is_dropped() {
        let mut history = History::new();
        history.begin_group("Erase Tiles");
        history.end_group();
        assert!(!history.can_undo());
    }

    #[test]
    fn test_single_op_group_is_unwrapped() {
        let mut history = History::new();
        history.begin_group("Erase Tiles");
        history.push(tile_op(0, 0, 1));
        history.end_group();
        assert_eq!(history.undo_description(), Some("edit"));
    }

    #[test]
    fn test_empty_operations_are_dropped() {
        let mut history = History::new();
        history.push(Operation::TileEdit {
            description: "noop".to_string(),
            changes: vec![],
            selection: None,
        });
        assert!(!history.can_undo());
    }

    #[test]
    fn test_undo_blocked_mid_gesture() {
        let (mut scene, mut selection, mut tracker) = fixture();
        let mut history = History::new();
        history.push(tile_op(0, 0, 1));

        history.begin_group("Erase Tiles");
        assert!(!history.undo(&mut scene, &mut selection, &mut tracker));
        history.end_group();
        assert!(history.undo(&mut scene, &mut selection, &mut tracker));
    }

    #[test]
    fn test_cancel_group_returns_ops() {
        let mut history = History::new();
        history.begin_group("Erase Tiles");
        history.push(tile_op(0, 0, 1));
        let ops = history.cancel_group();
        assert_eq!(ops.len(), 1);
        assert!(!history.can_undo());
    }
}
