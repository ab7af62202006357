//! Entity manager: the single owner of entity identity and storage access

use tilecraft_core::{EntityInstance, Scene};
use uuid::Uuid;

/// Service for all entity mutations. Tools never touch the scene's
/// entity list directly; every add/move/remove/duplicate goes through
/// here so identity stays stable across move and duplicate.
#[derive(Debug, Default)]
pub struct EntityManager;

impl EntityManager {
    pub fn new() -> Self {
        Self
    }

    pub fn get_entity<'a>(&self, scene: &'a Scene, id: Uuid) -> Option<&'a EntityInstance> {
        scene.get_entity(id)
    }

    pub fn get_entities<'a>(&self, scene: &'a Scene, ids: &[Uuid]) -> Vec<&'a EntityInstance> {
        ids.iter().filter_map(|&id| scene.get_entity(id)).collect()
    }

    /// Create and place a new entity, returning its id.
    pub fn add_entity(&self, scene: &mut Scene, type_name: &str, x: f32, y: f32) -> Uuid {
        let entity = EntityInstance::new(type_name.to_string(), [x, y]);
        let id = entity.id;
        scene.add_entity(entity);
        id
    }

    /// Re-place a fully-formed instance, preserving its id. Used by
    /// undo/redo to restore removed entities. An instance whose id is
    /// already present is ignored.
    pub fn add_entity_instance(&self, scene: &mut Scene, instance: EntityInstance) {
        if scene.get_entity(instance.id).is_none() {
            scene.add_entity(instance);
        }
    }

    /// Apply a batch of position updates. Unknown ids are skipped.
    pub fn move_entities(&self, scene: &mut Scene, updates: &[(Uuid, [f32; 2])]) {
        for &(id, position) in updates {
            if let Some(entity) = scene.get_entity_mut(id) {
                entity.position = position;
            }
        }
    }

    /// Remove a batch of entities, returning the removed instances (for
    /// undo restoration). Unknown ids are skipped.
    pub fn remove_entities(&self, scene: &mut Scene, ids: &[Uuid]) -> Vec<EntityInstance> {
        ids.iter().filter_map(|&id| scene.remove_entity(id)).collect()
    }

    /// Duplicate a batch of entities, offsetting each copy, and return
    /// the placed copies. Copies get fresh ids; properties are cloned.
    pub fn duplicate_entities(
        &self,
        scene: &mut Scene,
        ids: &[Uuid],
        offset: [f32; 2],
    ) -> Vec<EntityInstance> {
        let mut copies = Vec::new();
        for &id in ids {
            let Some(source) = scene.get_entity(id) else {
                continue;
            };
            let mut copy = EntityInstance::new(
                source.type_name.clone(),
                [source.position[0] + offset[0], source.position[1] + offset[1]],
            );
            copy.properties = source.properties.clone();
            copies.push(copy.clone());
            scene.add_entity(copy);
        }
        copies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_move() {
        let manager = EntityManager::new();
        let mut scene = Scene::new("test".to_string(), 10, 10, 32);

        let id = manager.add_entity(&mut scene, "NPC", 10.0, 20.0);
        manager.move_entities(&mut scene, &[(id, [50.0, 60.0])]);
        assert_eq!(manager.get_entity(&scene, id).unwrap().position, [50.0, 60.0]);
    }

    #[test]
    fn test_get_entities_skips_unknown_ids() {
        let manager = EntityManager::new();
        let mut scene = Scene::new("test".to_string(), 10, 10, 32);

        let a = manager.add_entity(&mut scene, "NPC", 0.0, 0.0);
        let b = manager.add_entity(&mut scene, "Chest", 32.0, 0.0);
        let missing = uuid::Uuid::new_v4();

        let found = manager.get_entities(&scene, &[a, missing, b]);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].id, a);
        assert_eq!(found[1].id, b);
    }

    #[test]
    fn test_remove_returns_instances() {
        let manager = EntityManager::new();
        let mut scene = Scene::new("test".to_string(), 10, 10, 32);

        let a = manager.add_entity(&mut scene, "NPC", 0.0, 0.0);
        let b = manager.add_entity(&mut scene, "Chest", 32.0, 0.0);
        let removed = manager.remove_entities(&mut scene, &[a, b]);

        assert_eq!(removed.len(), 2);
        assert!(scene.entities.is_empty());

        // Restoring keeps the original ids.
        for instance in removed {
            manager.add_entity_instance(&mut scene, instance);
        }
        assert!(manager.get_entity(&scene, a).is_some());
        assert!(manager.get_entity(&scene, b).is_some());
    }

    #[test]
    fn test_duplicate_offsets_copies() {
        let manager = EntityManager::new();
        let mut scene = Scene::new("test".to_string(), 10, 10, 32);

        let id = manager.add_entity(&mut scene, "NPC", 0.0, 0.0);
        let copies = manager.duplicate_entities(&mut scene, &[id], [32.0, 32.0]);

        assert_eq!(copies.len(), 1);
        assert_ne!(copies[0].id, id);
        assert_eq!(copies[0].position, [32.0, 32.0]);
        assert_eq!(scene.entities.len(), 2);
    }
}
