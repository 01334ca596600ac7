#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u64);

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn distance_sq_to(self, other: Vec2) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    pub fn distance_to(self, other: Vec2) -> f32 {
        self.distance_sq_to(other).sqrt()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Transform {
    pub position: Vec2,
}

#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub transform: Transform,
    pub debug_name: &'static str,
}

#[derive(Debug, Default)]
pub struct EntityIdAllocator {
    next: u64,
}

impl EntityIdAllocator {
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

/// The scene-graph container. Spawns and despawns are deferred until
/// `apply_pending` so entity references stay valid for the whole tick.
#[derive(Debug, Default)]
pub struct Stage {
    allocator: EntityIdAllocator,
    entities: Vec<Entity>,
    pending_spawns: Vec<Entity>,
    pending_despawns: Vec<EntityId>,
}

impl Stage {
    pub fn spawn(&mut self, transform: Transform, debug_name: &'static str) -> EntityId {
        let id = self.allocator.allocate();
        self.pending_spawns.push(Entity {
            id,
            transform,
            debug_name,
        });
        id
    }

    pub fn despawn(&mut self, id: EntityId) -> bool {
        let exists_now = self.entities.iter().any(|entity| entity.id == id);
        let pending_spawn = self.pending_spawns.iter().any(|entity| entity.id == id);
        if !exists_now && !pending_spawn {
            return false;
        }
        self.pending_despawns.push(id);
        true
    }

    pub fn apply_pending(&mut self) {
        if !self.pending_despawns.is_empty() {
            self.pending_despawns.sort_by_key(|id| id.0);
            self.pending_despawns.dedup();
            let pending = &self.pending_despawns;
            self.entities.retain(|entity| {
                pending
                    .binary_search_by_key(&entity.id.0, |id| id.0)
                    .is_err()
            });
            self.pending_spawns.retain(|entity| {
                pending
                    .binary_search_by_key(&entity.id.0, |id| id.0)
                    .is_err()
            });
            self.pending_despawns.clear();
        }

        if !self.pending_spawns.is_empty() {
            self.entities.append(&mut self.pending_spawns);
        }
    }

    pub fn clear(&mut self) {
        self.entities.clear();
        self.pending_spawns.clear();
        self.pending_despawns.clear();
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn find_entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    pub fn find_entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|entity| entity.id == id)
    }

    /// Distance pick standing in for a physics raycast: the nearest entity
    /// within `max_distance` of `point`, ties broken by lowest id.
    pub fn pick_entity_near(&self, point: Vec2, max_distance: f32) -> Option<EntityId> {
        let max_sq = max_distance * max_distance;
        let mut best: Option<(f32, EntityId)> = None;
        for entity in &self.entities {
            let distance_sq = entity.transform.position.distance_sq_to(point);
            if distance_sq > max_sq {
                continue;
            }
            let closer = match best {
                None => true,
                Some((best_sq, best_id)) => {
                    distance_sq < best_sq || (distance_sq == best_sq && entity.id.0 < best_id.0)
                }
            };
            if closer {
                best = Some((distance_sq, entity.id));
            }
        }
        best.map(|(_, id)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f32, y: f32) -> Transform {
        Transform {
            position: Vec2 { x, y },
        }
    }

    #[test]
    fn spawned_entity_is_visible_after_apply_pending() {
        let mut stage = Stage::default();
        let id = stage.spawn(at(1.0, 2.0), "probe");
        assert!(stage.find_entity(id).is_none());

        stage.apply_pending();
        let entity = stage.find_entity(id).expect("entity");
        assert_eq!(entity.transform.position, Vec2 { x: 1.0, y: 2.0 });
    }

    #[test]
    fn despawn_removes_entity_and_is_idempotent() {
        let mut stage = Stage::default();
        let id = stage.spawn(at(0.0, 0.0), "probe");
        stage.apply_pending();

        assert!(stage.despawn(id));
        stage.apply_pending();
        assert!(stage.find_entity(id).is_none());
        assert!(!stage.despawn(id));
    }

    #[test]
    fn despawn_cancels_a_pending_spawn() {
        let mut stage = Stage::default();
        let id = stage.spawn(at(0.0, 0.0), "probe");
        assert!(stage.despawn(id));
        stage.apply_pending();
        assert_eq!(stage.entity_count(), 0);
    }

    #[test]
    fn pick_prefers_the_nearest_entity_within_range() {
        let mut stage = Stage::default();
        let near = stage.spawn(at(1.0, 0.0), "near");
        let _far = stage.spawn(at(3.0, 0.0), "far");
        stage.apply_pending();

        let picked = stage.pick_entity_near(Vec2 { x: 0.0, y: 0.0 }, 5.0);
        assert_eq!(picked, Some(near));
        assert_eq!(stage.pick_entity_near(Vec2 { x: 0.0, y: 0.0 }, 0.5), None);
    }
}
