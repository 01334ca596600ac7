#[derive(Debug, Clone)]
pub(crate) enum InteractEffect {
    Collect { item: Rc<Item> },
    EnemyAttack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InteractGate {
    Fresh,
    Consumed,
}

/// One-shot interaction component. The gate stays consumed until the
/// targeting side explicitly re-arms it on retarget.
#[derive(Debug, Clone)]
pub(crate) struct Interactable {
    range: f32,
    gate: InteractGate,
    pub(crate) effect: InteractEffect,
}

impl Interactable {
    pub(crate) fn new(range: f32, effect: InteractEffect) -> Self {
        Self {
            range,
            gate: InteractGate::Fresh,
            effect,
        }
    }

    pub(crate) fn interact_range(&self) -> f32 {
        self.range
    }

    pub(crate) fn gate(&self) -> InteractGate {
        self.gate
    }

    pub(crate) fn reset_interaction_state(&mut self) {
        self.gate = InteractGate::Fresh;
    }

    /// Fires the effect at most once per reset cycle, and only when the
    /// requester exists and is within range. Returns whether it fired.
    pub(crate) fn on_interact(
        &mut self,
        requester: EntityId,
        self_id: EntityId,
        stage: &Stage,
        writer: &mut EventWriter,
    ) -> bool {
        if self.gate == InteractGate::Consumed {
            return false;
        }
        let Some(requester_entity) = stage.find_entity(requester) else {
            return false;
        };
        let Some(self_entity) = stage.find_entity(self_id) else {
            return false;
        };

        let distance = requester_entity
            .transform
            .position
            .distance_to(self_entity.transform.position);
        if distance > self.range {
            return false;
        }

        let position = self_entity.transform.position;
        match &self.effect {
            InteractEffect::Collect { .. } => {
                writer.publish(
                    EventKind::ItemCollected,
                    EventPayload {
                        trigger: Some(requester),
                        target: Some(self_id),
                        target_position: Some(position),
                    },
                );
            }
            InteractEffect::EnemyAttack => {
                writer.publish(
                    EventKind::CharacterAttacked,
                    EventPayload {
                        trigger: Some(requester),
                        target: Some(self_id),
                        target_position: Some(position),
                    },
                );
            }
        }
        self.gate = InteractGate::Consumed;
        true
    }
}
