/// Everything event subscribers may touch. Kept apart from the bus so a
/// dispatch can hand callbacks mutable access without aliasing the
/// listener chains.
pub(crate) struct GameplayState {
    pub(crate) stage: Stage,
    pub(crate) interactables: HashMap<EntityId, Interactable>,
    pub(crate) enemies: HashMap<EntityId, WanderEnemy>,
    pub(crate) inventory: Inventory,
    pub(crate) menus: MenuStack,
    pub(crate) time_scale: TimeScale,
}

impl GameplayState {
    fn new() -> Self {
        Self {
            stage: Stage::default(),
            interactables: HashMap::new(),
            enemies: HashMap::new(),
            inventory: Inventory::new(INVENTORY_SLOT_COUNT),
            menus: MenuStack::default(),
            time_scale: TimeScale::default(),
        }
    }
}

#[derive(Debug)]
struct PlayerRig {
    controller: PlayerController,
    motor: Motor,
    agent: NavAgent,
}

pub(crate) struct GameplayScene {
    pub(crate) state: GameplayState,
    bus: EventBus<GameplayState>,
    writer: EventWriter,
    player: Option<PlayerRig>,
    rng: ChaCha8Rng,
}

impl GameplayScene {
    pub(crate) fn new(rng_seed: u64) -> Self {
        let mut state = GameplayState::new();
        let mut bus = EventBus::default();
        subscribe_ui_handlers(&mut bus);

        // The one initial panel of the session.
        let GameplayState {
            menus, time_scale, ..
        } = &mut state;
        menus.push(MenuKind::Main, time_scale);

        Self {
            state,
            bus,
            writer: EventWriter::default(),
            player: None,
            rng: ChaCha8Rng::seed_from_u64(rng_seed),
        }
    }

    /// Leave the main menu and hand control to the player.
    pub(crate) fn start_play(&mut self) {
        let GameplayState {
            menus, time_scale, ..
        } = &mut self.state;
        if menus.top_kind() == Some(MenuKind::Main) {
            menus.pop(time_scale);
        }
    }

    pub(crate) fn spawn_player(&mut self, position: Vec2) -> EntityId {
        if let Some(player) = self.player.as_ref() {
            warn!("player already spawned");
            return player.controller.player_id();
        }
        let id = self.state.stage.spawn(Transform { position }, "player");
        self.state.stage.apply_pending();
        self.player = Some(PlayerRig {
            controller: PlayerController::new(id),
            motor: Motor::new(id),
            agent: NavAgent::new(position, PLAYER_MOVE_SPEED),
        });
        id
    }

    pub(crate) fn spawn_collectable(&mut self, position: Vec2, item: Rc<Item>) -> EntityId {
        let id = self.state.stage.spawn(Transform { position }, "collectable");
        self.state.stage.apply_pending();
        self.state.interactables.insert(
            id,
            Interactable::new(DEFAULT_INTERACT_RANGE, InteractEffect::Collect { item }),
        );
        id
    }

    pub(crate) fn spawn_enemy(&mut self, position: Vec2, loot: Option<LootTable>) -> EntityId {
        let id = self.state.stage.spawn(Transform { position }, "wander_enemy");
        self.state.stage.apply_pending();
        self.state.interactables.insert(
            id,
            Interactable::new(DEFAULT_INTERACT_RANGE, InteractEffect::EnemyAttack),
        );
        self.state
            .enemies
            .insert(id, WanderEnemy::new(id, position, loot));
        id
    }

    pub(crate) fn player_id(&self) -> Option<EntityId> {
        self.player
            .as_ref()
            .map(|player| player.controller.player_id())
    }

    pub(crate) fn current_target(&self) -> Option<EntityId> {
        self.player
            .as_ref()
            .and_then(|player| player.controller.current_target())
    }

    pub(crate) fn player_position(&self) -> Option<Vec2> {
        self.player.as_ref().map(|player| player.agent.position())
    }

    pub(crate) fn motor_state(&self) -> Option<MotorState> {
        self.player.as_ref().map(|player| player.motor.state())
    }

    pub(crate) fn advance(&mut self, dt_seconds: f32, input: &InputSnapshot) {
        // The time scale freezes movement and timers, not input handling.
        let scaled_dt = dt_seconds * self.state.time_scale.value();

        if let Some(player) = self.player.as_mut() {
            let GameplayState {
                stage,
                interactables,
                ..
            } = &mut self.state;
            player.controller.tick(
                input,
                stage,
                interactables,
                &mut player.motor,
                &mut player.agent,
                &mut self.writer,
            );
            player
                .motor
                .advance(stage, &mut player.agent, &mut self.writer);
            player.agent.advance(scaled_dt);
            if let Some(entity) = stage.find_entity_mut(player.controller.player_id()) {
                entity.transform.position = player.agent.position();
            }
        }

        {
            let GameplayState {
                stage,
                interactables,
                enemies,
                ..
            } = &mut self.state;
            let mut enemy_ids: Vec<EntityId> = enemies.keys().copied().collect();
            enemy_ids.sort_by_key(|id| id.0);
            for enemy_id in enemy_ids {
                let Some(enemy) = enemies.get_mut(&enemy_id) else {
                    continue;
                };
                if !enemy.advance(scaled_dt, stage, interactables, &mut self.rng) {
                    enemies.remove(&enemy_id);
                }
            }
        }

        while let Some((kind, payload)) = self.writer.pop() {
            self.bus.publish(&mut self.state, kind, payload);
        }

        self.state.stage.apply_pending();
    }
}

fn subscribe_ui_handlers(bus: &mut EventBus<GameplayState>) {
    bus.subscribe(EventKind::ItemCollected, |state, _writer, payload| {
        add_collected_item(state, payload);
    });
    bus.subscribe(EventKind::InventorySlotCleared, |state, _writer, payload| {
        remove_cleared_item(state, payload);
    });
    bus.subscribe(EventKind::InventoryToggled, |state, _writer, _payload| {
        state.inventory.toggle_open();
    });
    bus.subscribe(EventKind::PauseToggled, |state, _writer, _payload| {
        let GameplayState {
            menus, time_scale, ..
        } = state;
        menus.toggle_pause(time_scale);
    });
    bus.subscribe(EventKind::CharacterAttacked, |state, _writer, payload| {
        begin_enemy_death(state, payload);
    });
}

fn add_collected_item(state: &mut GameplayState, payload: &EventPayload) {
    let Some(target) = payload.target else {
        error!("unable to add item, collected object reference was empty");
        return;
    };
    let Some(interactable) = state.interactables.get(&target) else {
        return;
    };
    let InteractEffect::Collect { item } = &interactable.effect else {
        return;
    };

    let item = Rc::clone(item);
    if state.inventory.add_item(item) {
        state.interactables.remove(&target);
        state.stage.despawn(target);
    }
}

fn remove_cleared_item(state: &mut GameplayState, payload: &EventPayload) {
    let Some(target) = payload.target else {
        error!("unable to remove item, cleared object reference was empty");
        return;
    };
    let Some(interactable) = state.interactables.get(&target) else {
        return;
    };
    let InteractEffect::Collect { item } = &interactable.effect else {
        return;
    };

    let item = Rc::clone(item);
    state.inventory.remove_item(&item);
}

fn begin_enemy_death(state: &mut GameplayState, payload: &EventPayload) {
    let Some(target) = payload.target else {
        return;
    };
    if let Some(enemy) = state.enemies.get_mut(&target) {
        enemy.begin_death();
    }
}
