/// Wandering enemy: periodically routes to a random point around its
/// wander center, and after being attacked waits out a death timer (the
/// window the death animation would fill), drops loot, and despawns.
#[derive(Debug)]
pub(crate) struct WanderEnemy {
    entity: EntityId,
    agent: NavAgent,
    wander_center: Vec2,
    wander_radius: f32,
    wander_cooldown_seconds: f32,
    wander_timer_seconds: f32,
    death_wait_seconds: f32,
    death_timer_seconds: Option<f32>,
    loot: Option<LootTable>,
}

impl WanderEnemy {
    pub(crate) fn new(entity: EntityId, spawn_position: Vec2, loot: Option<LootTable>) -> Self {
        Self {
            entity,
            agent: NavAgent::new(spawn_position, ENEMY_MOVE_SPEED),
            wander_center: spawn_position,
            wander_radius: ENEMY_WANDER_RADIUS,
            wander_cooldown_seconds: ENEMY_WANDER_COOLDOWN_SECONDS,
            wander_timer_seconds: 0.0,
            death_wait_seconds: ENEMY_DEATH_WAIT_SECONDS,
            death_timer_seconds: None,
            loot,
        }
    }

    pub(crate) fn load_loot_table(path: &Path) -> Option<LootTable> {
        match load_loot_table(path) {
            Ok(table) => Some(table),
            Err(error) => {
                error!(%error, "loot table failed to load");
                None
            }
        }
    }

    pub(crate) fn loot(&self) -> Option<&LootTable> {
        self.loot.as_ref()
    }

    pub(crate) fn begin_death(&mut self) {
        if self.death_timer_seconds.is_none() {
            self.death_timer_seconds = Some(self.death_wait_seconds);
        }
    }

    pub(crate) fn is_dying(&self) -> bool {
        self.death_timer_seconds.is_some()
    }

    /// One tick. Returns false once the enemy has despawned and should be
    /// dropped by its owner.
    pub(crate) fn advance(
        &mut self,
        dt_seconds: f32,
        stage: &mut Stage,
        interactables: &mut HashMap<EntityId, Interactable>,
        rng: &mut ChaCha8Rng,
    ) -> bool {
        if let Some(remaining) = self.death_timer_seconds.as_mut() {
            *remaining -= dt_seconds;
            if *remaining <= 0.0 {
                self.drop_random_loot(stage, interactables, rng);
                interactables.remove(&self.entity);
                stage.despawn(self.entity);
                return false;
            }
            return true;
        }

        self.wander_timer_seconds -= dt_seconds;
        if self.wander_timer_seconds <= 0.0 {
            self.wander(rng);
            self.wander_timer_seconds = self.wander_cooldown_seconds;
        }

        self.agent.advance(dt_seconds);
        if let Some(entity) = stage.find_entity_mut(self.entity) {
            entity.transform.position = self.agent.position();
        }
        true
    }

    /// Route to a random point inside the wander disc. The polar sample
    /// keeps the destination within the radius, which is what the navmesh
    /// sample call guaranteed in-engine.
    fn wander(&mut self, rng: &mut ChaCha8Rng) {
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let distance = self.wander_radius * rng.gen::<f32>().sqrt();
        self.agent.set_destination(Vec2 {
            x: self.wander_center.x + angle.cos() * distance,
            y: self.wander_center.y + angle.sin() * distance,
        });
    }

    fn drop_random_loot(
        &self,
        stage: &mut Stage,
        interactables: &mut HashMap<EntityId, Interactable>,
        rng: &mut ChaCha8Rng,
    ) {
        let Some(table) = self.loot.as_ref() else {
            return;
        };
        let Some(drop) = table.pick_weighted_random(rng) else {
            return;
        };
        // An unresolved drop has no model to spawn.
        if drop.model.is_none() {
            return;
        }
        let Some(position) = stage
            .find_entity(self.entity)
            .map(|entity| entity.transform.position)
        else {
            return;
        };

        let collectable = stage.spawn(Transform { position }, "collectable");
        interactables.insert(
            collectable,
            Interactable::new(
                DEFAULT_INTERACT_RANGE,
                InteractEffect::Collect {
                    item: Rc::new(drop.clone()),
                },
            ),
        );
        debug!(
            item = drop.model_path.as_str(),
            "enemy dropped a collectable"
        );
    }
}
