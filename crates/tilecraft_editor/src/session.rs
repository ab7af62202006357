//! Editor session: routes pointer gestures to the active tool
//!
//! The session bundles the scene, editor state, history, clipboard, and
//! selection into one context and is the single dispatch point over the
//! closed tool set. A gesture driver feeds it raw screen coordinates
//! plus a viewport; a terminal `pointer_up` or `cancel` is expected for
//! every `pointer_down`, even on pointer-capture loss.

use glam::Vec2;
use tilecraft_core::Scene;

use crate::commands::{History, TileClipboard};
use crate::entities::EntityManager;
use crate::state::{ChangeTracker, EditorState, EditorTool};
use crate::tools::select::{SelectMode, SelectionState};
use crate::tools::{entity, erase, paint, select};
use crate::viewport::{screen_to_tile_with_offset, screen_to_world_with_offset, Viewport};

/// The editing engine. Owns the scene and all tool state; everything
/// outside (rendering, panels, the gesture driver) observes it through
/// the `ChangeTracker` revision.
pub struct Editor {
    pub scene: Scene,
    pub state: EditorState,
    pub history: History,
    pub clipboard: TileClipboard,
    pub selection: SelectionState,
    pub tracker: ChangeTracker,
    pub entities: EntityManager,
    paint: paint::PaintGesture,
    erase: erase::EraseGesture,
}

impl Editor {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            state: EditorState::default(),
            history: History::new(),
            clipboard: TileClipboard::new(),
            selection: SelectionState::default(),
            tracker: ChangeTracker::default(),
            entities: EntityManager::new(),
            paint: paint::PaintGesture::default(),
            erase: erase::EraseGesture::default(),
        }
    }

    /// Switch tools, discarding any in-flight gesture and all transient
    /// selection state.
    pub fn set_tool(&mut self, tool: EditorTool) {
        if self.state.current_tool == tool {
            return;
        }
        self.cancel();
        self.selection.clear();
        self.state.current_tool = tool;
    }

    fn world_at(&self, viewport: &Viewport, screen: Vec2) -> Vec2 {
        screen_to_world_with_offset(viewport, screen, self.state.touch_offset_y)
    }

    fn tile_at(&self, viewport: &Viewport, screen: Vec2) -> (i32, i32) {
        screen_to_tile_with_offset(
            viewport,
            screen,
            self.scene.tile_size,
            self.state.touch_offset_y,
        )
    }

    pub fn pointer_down(&mut self, viewport: &Viewport, screen: Vec2) {
        let tile = self.tile_at(viewport, screen);
        let world = self.world_at(viewport, screen);
        match self.state.current_tool {
            EditorTool::Paint => paint::pointer_down(
                &mut self.scene,
                &self.state,
                &mut self.paint,
                &mut self.tracker,
                tile,
            ),
            EditorTool::Erase => erase::pointer_down(
                &mut self.scene,
                &self.state,
                &mut self.erase,
                &mut self.history,
                &mut self.tracker,
                tile,
            ),
            EditorTool::Select => self.select_pointer_down(tile, world),
        }
    }

    pub fn pointer_move(&mut self, viewport: &Viewport, screen: Vec2) {
        let tile = self.tile_at(viewport, screen);
        let world = self.world_at(viewport, screen);
        match self.state.current_tool {
            EditorTool::Paint => {
                paint::pointer_move(&mut self.scene, &mut self.paint, &mut self.tracker, tile)
            }
            EditorTool::Erase => erase::pointer_move(
                &mut self.scene,
                &mut self.erase,
                &mut self.history,
                &mut self.tracker,
                tile,
            ),
            EditorTool::Select => {
                select::pointer_move(&mut self.selection, tile);
                entity::pointer_move(
                    &mut self.scene,
                    &self.state,
                    &mut self.selection,
                    &self.entities,
                    &mut self.tracker,
                    world,
                );
            }
        }
    }

    pub fn pointer_up(&mut self, _viewport: &Viewport, _screen: Vec2) {
        match self.state.current_tool {
            EditorTool::Paint => paint::pointer_up(&mut self.paint, &mut self.history),
            EditorTool::Erase => erase::pointer_up(&mut self.erase, &mut self.history),
            EditorTool::Select => {
                entity::pointer_up(&self.scene, &mut self.selection, &mut self.history);
                select::pointer_up(
                    &mut self.scene,
                    &self.state,
                    &mut self.selection,
                    &mut self.history,
                    &mut self.tracker,
                );
            }
        }
    }

    /// Long-press notification from the gesture driver, fired while the
    /// pointer is down.
    pub fn long_press(&mut self, viewport: &Viewport, screen: Vec2) {
        if self.state.current_tool != EditorTool::Select {
            return;
        }
        let world = self.world_at(viewport, screen);
        if select::long_press(&mut self.selection) {
            return;
        }
        entity::long_press(&self.scene, &mut self.selection, world);
    }

    /// Explicit terminal call for a dropped gesture: resets transient
    /// state without committing anything.
    pub fn cancel(&mut self) {
        paint::cancel(&mut self.scene, &mut self.paint, &mut self.tracker);
        erase::cancel(
            &mut self.scene,
            &mut self.erase,
            &mut self.history,
            &mut self.selection,
            &mut self.tracker,
        );
        entity::cancel(
            &mut self.scene,
            &mut self.selection,
            &self.entities,
            &mut self.tracker,
        );
        select::cancel(&mut self.selection);
    }

    fn select_pointer_down(&mut self, tile: (i32, i32), world: Vec2) {
        if select::handle_armed(
            &mut self.scene,
            &self.state,
            &mut self.selection,
            &mut self.history,
            &self.clipboard,
            &mut self.tracker,
            tile,
        ) {
            return;
        }
        // A press on an already-selected entity drags the whole entity
        // selection without touching the tile machine.
        if entity::try_drag_selected(&self.scene, &mut self.selection, world) {
            return;
        }
        // A press inside the current rectangle starts the
        // tap-to-deselect / long-press-to-move gesture.
        if matches!(&self.selection.tile, SelectMode::Selected { selection }
            if selection.bounds.contains(tile.0, tile.1))
        {
            select::begin_selecting(&mut self.selection, tile);
            return;
        }
        if entity::try_select_and_drag(&self.scene, &mut self.selection, world) {
            self.selection.tile = SelectMode::Idle;
            return;
        }
        self.selection.entities.clear();
        select::begin_selecting(&mut self.selection, tile);
    }

    /// Place a new entity of the palette-selected type at the tapped
    /// position, snapped and bounds-checked, and select it. Requires an
    /// entity type to be selected.
    pub fn place_entity(&mut self, viewport: &Viewport, screen: Vec2) {
        let Some(type_name) = self.state.selected_entity_type.clone() else {
            return;
        };
        let world = self.world_at(viewport, screen);

        let mut position = world;
        if self.state.entity_snap_to_grid {
            let snap_unit = self.scene.tile_size as f32 / 2.0;
            position.x = (position.x / snap_unit).round() * snap_unit;
            position.y = (position.y / snap_unit).round() * snap_unit;
        }
        if position.x < 0.0
            || position.y < 0.0
            || position.x >= self.scene.pixel_width()
            || position.y >= self.scene.pixel_height()
        {
            return;
        }

        let id = self
            .entities
            .add_entity(&mut self.scene, &type_name, position.x, position.y);
        let placed = self.scene.get_entity(id).cloned();
        let selection_before = std::mem::take(&mut self.selection.entities);
        self.selection.entities = vec![id];
        if let Some(instance) = placed {
            self.history.push(crate::commands::Operation::EntityAdd {
                description: "Place Entity".to_string(),
                instances: vec![instance],
                selection_before,
                selection_after: vec![id],
            });
        }
        self.tracker.mark();
    }

    // Toolbar actions. All route through the select tool's sub-machines
    // and are no-ops outside the states that support them.

    pub fn undo(&mut self) -> bool {
        self.history
            .undo(&mut self.scene, &mut self.selection, &mut self.tracker)
    }

    pub fn redo(&mut self) -> bool {
        self.history
            .redo(&mut self.scene, &mut self.selection, &mut self.tracker)
    }

    pub fn copy_selection(&mut self) {
        select::copy_selection(&self.selection, &mut self.clipboard);
    }

    pub fn arm_move(&mut self) {
        select::arm_move(&mut self.selection);
    }

    pub fn arm_paste(&mut self) {
        select::arm_paste(&mut self.selection, &self.clipboard);
    }

    pub fn arm_fill(&mut self) {
        select::arm_fill(&mut self.selection);
    }

    pub fn delete_selection(&mut self) {
        select::delete_selection(
            &mut self.scene,
            &self.state,
            &mut self.selection,
            &mut self.history,
            &mut self.tracker,
        );
    }

    pub fn delete_selected_entities(&mut self) {
        entity::delete_selected(
            &mut self.scene,
            &mut self.selection,
            &self.entities,
            &mut self.history,
            &mut self.tracker,
        );
    }

    pub fn duplicate_selected_entities(&mut self) {
        entity::duplicate_selected(
            &mut self.scene,
            &mut self.selection,
            &self.entities,
            &mut self.history,
            &mut self.tracker,
        );
    }
}
