//! Select tool - entity sub-controller
//!
//! Hit-testing, drag-to-move, long-press multi-select, duplicate, and
//! delete for point entities, layered over the same gesture stream as
//! the tile sub-machine.

use glam::Vec2;
use tilecraft_core::Scene;
use uuid::Uuid;

use crate::commands::{History, MovedEntity, Operation};
use crate::entities::EntityManager;
use crate::state::{ChangeTracker, EditorState};
use crate::tools::select::SelectionState;

/// Extra slack around the half-tile hit radius, in world pixels.
const HIT_TOLERANCE: f32 = 4.0;

/// Transient state of one entity drag.
#[derive(Debug, Clone)]
pub struct EntityDrag {
    start_world: Vec2,
    /// Drag-start position of every selected entity.
    origins: Vec<(Uuid, [f32; 2])>,
    /// Selection as it was before the press replaced it; a long-press
    /// re-adds on top of this instead of the replacement.
    prior_selection: Vec<Uuid>,
}

/// Find the nearest entity whose center lies within half the tile size
/// plus a small tolerance; ties break by Euclidean distance.
pub fn hit_test(scene: &Scene, world: Vec2) -> Option<Uuid> {
    let radius = scene.tile_size as f32 / 2.0 + HIT_TOLERANCE;
    let mut best: Option<(Uuid, f32)> = None;
    for entity in &scene.entities {
        let center = Vec2::new(entity.position[0], entity.position[1]);
        let distance = center.distance(world);
        if distance > radius {
            continue;
        }
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((entity.id, distance));
        }
    }
    best.map(|(id, _)| id)
}

/// Pointer-down on an already-selected entity begins a drag without
/// changing the selection (a multi-entity selection drags as one).
/// Returns true when the press was consumed.
pub fn try_drag_selected(scene: &Scene, selection: &mut SelectionState, world: Vec2) -> bool {
    let Some(id) = hit_test(scene, world) else {
        return false;
    };
    if !selection.entities.contains(&id) {
        return false;
    }
    let current = selection.entities.clone();
    start_drag(scene, selection, world, current);
    true
}

/// Pointer-down on an unselected entity replaces the selection with it
/// and begins a drag. Returns true when the press was consumed.
pub fn try_select_and_drag(scene: &Scene, selection: &mut SelectionState, world: Vec2) -> bool {
    let Some(id) = hit_test(scene, world) else {
        return false;
    };
    let prior = std::mem::take(&mut selection.entities);
    selection.entities = vec![id];
    start_drag(scene, selection, world, prior);
    true
}

fn start_drag(scene: &Scene, selection: &mut SelectionState, world: Vec2, prior: Vec<Uuid>) {
    let origins = selection
        .entities
        .iter()
        .filter_map(|&id| scene.get_entity(id).map(|e| (id, e.position)))
        .collect();
    selection.entity_drag = Some(EntityDrag {
        start_world: world,
        origins,
        prior_selection: prior,
    });
}

/// Apply the drag delta to every selected entity, snapped and clamped.
/// Intermediate frames go straight through the entity manager; nothing
/// is undo-tracked until release.
pub fn pointer_move(
    scene: &mut Scene,
    state: &EditorState,
    selection: &mut SelectionState,
    manager: &EntityManager,
    tracker: &mut ChangeTracker,
    world: Vec2,
) {
    let Some(drag) = &selection.entity_drag else {
        return;
    };
    let delta = world - drag.start_world;
    let snap_unit = scene.tile_size as f32 / 2.0;
    let max_x = scene.pixel_width();
    let max_y = scene.pixel_height();

    let mut updates = Vec::with_capacity(drag.origins.len());
    for &(id, origin) in &drag.origins {
        let mut x = origin[0] + delta.x;
        let mut y = origin[1] + delta.y;
        if state.entity_snap_to_grid {
            x = (x / snap_unit).round() * snap_unit;
            y = (y / snap_unit).round() * snap_unit;
        }
        updates.push((id, [x.clamp(0.0, max_x), y.clamp(0.0, max_y)]));
    }
    manager.move_entities(scene, &updates);
    tracker.mark();
}

/// Finish the drag: one operation for the gesture's net displacement,
/// pushed only if any position actually changed.
pub fn pointer_up(scene: &Scene, selection: &mut SelectionState, history: &mut History) {
    let Some(drag) = selection.entity_drag.take() else {
        return;
    };
    let moves: Vec<MovedEntity> = drag
        .origins
        .iter()
        .filter_map(|&(id, from)| {
            let to = scene.get_entity(id)?.position;
            (to != from).then_some(MovedEntity { id, from, to })
        })
        .collect();
    history.push(Operation::EntityMove {
        description: "Move Entities".to_string(),
        moves,
    });
}

/// Long-press adds the hit entity to the selection instead of replacing
/// it. An active drag is re-anchored so the grown selection moves from
/// the current pointer position. Returns true when an entity was hit.
pub fn long_press(scene: &Scene, selection: &mut SelectionState, world: Vec2) -> bool {
    let Some(id) = hit_test(scene, world) else {
        return false;
    };
    if let Some(drag) = &mut selection.entity_drag {
        let mut entities = drag.prior_selection.clone();
        if !entities.contains(&id) {
            entities.push(id);
        }
        selection.entities = entities;
        let origins = selection
            .entities
            .iter()
            .filter_map(|&eid| scene.get_entity(eid).map(|e| (eid, e.position)))
            .collect();
        drag.start_world = world;
        drag.origins = origins;
        drag.prior_selection = selection.entities.clone();
    } else if !selection.entities.contains(&id) {
        selection.entities.push(id);
    }
    true
}

/// Abort an in-flight drag, restoring every entity to its drag-start
/// position.
pub fn cancel(
    scene: &mut Scene,
    selection: &mut SelectionState,
    manager: &EntityManager,
    tracker: &mut ChangeTracker,
) {
    if let Some(drag) = selection.entity_drag.take() {
        manager.move_entities(scene, &drag.origins);
        tracker.mark();
    }
}

/// Delete the full current entity selection as one undo step.
pub fn delete_selected(
    scene: &mut Scene,
    selection: &mut SelectionState,
    manager: &EntityManager,
    history: &mut History,
    tracker: &mut ChangeTracker,
) {
    if selection.entities.is_empty() {
        return;
    }
    let ids = selection.entities.clone();
    let removed = manager.remove_entities(scene, &ids);
    if removed.is_empty() {
        return;
    }
    selection.entities.clear();
    history.push(Operation::EntityRemove {
        description: "Delete Entities".to_string(),
        instances: removed,
        selection_before: ids,
        selection_after: Vec::new(),
    });
    tracker.mark();
}

/// Duplicate the full current entity selection, offsetting the copies
/// by one tile size and selecting them.
pub fn duplicate_selected(
    scene: &mut Scene,
    selection: &mut SelectionState,
    manager: &EntityManager,
    history: &mut History,
    tracker: &mut ChangeTracker,
) {
    if selection.entities.is_empty() {
        return;
    }
    let ids = selection.entities.clone();
    let offset = scene.tile_size as f32;
    let copies = manager.duplicate_entities(scene, &ids, [offset, offset]);
    if copies.is_empty() {
        return;
    }
    let new_ids: Vec<Uuid> = copies.iter().map(|c| c.id).collect();
    selection.entities = new_ids.clone();
    history.push(Operation::EntityAdd {
        description: "Duplicate Entities".to_string(),
        instances: copies,
        selection_before: ids,
        selection_after: new_ids,
    });
    tracker.mark();
}
