/// Targeting controller: turns resolved input into motor orders and
/// per-tick interaction attempts against the current target.
#[derive(Debug)]
pub(crate) struct PlayerController {
    player_id: EntityId,
    target: Option<EntityId>,
}

impl PlayerController {
    pub(crate) fn new(player_id: EntityId) -> Self {
        Self {
            player_id,
            target: None,
        }
    }

    pub(crate) fn player_id(&self) -> EntityId {
        self.player_id
    }

    pub(crate) fn current_target(&self) -> Option<EntityId> {
        self.target
    }

    pub(crate) fn tick(
        &mut self,
        input: &InputSnapshot,
        stage: &Stage,
        interactables: &mut HashMap<EntityId, Interactable>,
        motor: &mut Motor,
        agent: &mut NavAgent,
        writer: &mut EventWriter,
    ) {
        if input.pause_pressed() {
            writer.publish(EventKind::PauseToggled, EventPayload::default());
        }

        // A target that left the world (collected, despawned) drops out.
        if let Some(target) = self.target {
            if stage.find_entity(target).is_none() {
                self.target = None;
            }
        }

        if let Some(target) = self.target {
            if let Some(interactable) = interactables.get_mut(&target) {
                interactable.on_interact(self.player_id, target, stage, writer);
            }
        }

        if input.inventory_pressed() {
            writer.publish(EventKind::InventoryToggled, EventPayload::default());
        }

        if let Some(point) = input.ground_click() {
            self.clear_target(interactables, motor);
            motor.move_to_point(point, agent, writer);
        } else if let Some(point) = input.interact_click() {
            if let Some(hit) = stage.pick_entity_near(point, PICK_MAX_DISTANCE) {
                if interactables.contains_key(&hit) {
                    self.set_target(hit, stage, interactables, motor, agent, writer);
                }
            }
        }
    }

    fn set_target(
        &mut self,
        target: EntityId,
        stage: &Stage,
        interactables: &mut HashMap<EntityId, Interactable>,
        motor: &mut Motor,
        agent: &mut NavAgent,
        writer: &mut EventWriter,
    ) {
        if self.target != Some(target) {
            self.clear_target(interactables, motor);
            self.target = Some(target);
        }

        let range = interactables
            .get(&target)
            .map(Interactable::interact_range)
            .unwrap_or(DEFAULT_INTERACT_RANGE);
        motor.move_to_target(target, range, stage, agent, writer);
        if let Some(interactable) = interactables.get_mut(&target) {
            interactable.reset_interaction_state();
        }
    }

    fn clear_target(
        &mut self,
        interactables: &mut HashMap<EntityId, Interactable>,
        motor: &mut Motor,
    ) {
        if let Some(target) = self.target.take() {
            if let Some(interactable) = interactables.get_mut(&target) {
                interactable.reset_interaction_state();
            }
        }
        motor.cancel_action();
    }
}
