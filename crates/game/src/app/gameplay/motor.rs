#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum MotorState {
    Idle,
    MovingToPoint { point: Vec2 },
    MovingToTarget { target: EntityId },
}

/// Drives one agent toward a point or a live target. At most one motion
/// is in flight; starting a new one cancels the previous synchronously.
/// The movement loop is advanced once per external tick.
#[derive(Debug)]
pub(crate) struct Motor {
    agent_id: EntityId,
    state: MotorState,
}

impl Motor {
    pub(crate) fn new(agent_id: EntityId) -> Self {
        Self {
            agent_id,
            state: MotorState::Idle,
        }
    }

    pub(crate) fn state(&self) -> MotorState {
        self.state
    }

    pub(crate) fn is_idle(&self) -> bool {
        self.state == MotorState::Idle
    }

    fn is_stopped(agent: &NavAgent) -> bool {
        !agent.has_path() || agent.remaining_distance() <= agent.stopping_distance()
    }

    pub(crate) fn move_to_point(&mut self, point: Vec2, agent: &mut NavAgent, writer: &mut EventWriter) {
        self.cancel_action();
        self.state = MotorState::MovingToPoint { point };
        agent.set_destination(point);
        self.emit_moved(point, writer);
    }

    pub(crate) fn move_to_target(
        &mut self,
        target: EntityId,
        interact_range: f32,
        stage: &Stage,
        agent: &mut NavAgent,
        writer: &mut EventWriter,
    ) {
        self.cancel_action();
        let Some(entity) = stage.find_entity(target) else {
            self.emit_stopped(writer);
            return;
        };

        agent.set_stopping_distance(interact_range);
        self.state = MotorState::MovingToTarget { target };
        agent.set_destination(entity.transform.position);
        self.emit_moved(entity.transform.position, writer);
    }

    /// Abort any in-flight motion. Idempotent when idle. The agent keeps
    /// a destination it was already issued; the next motion overwrites it.
    pub(crate) fn cancel_action(&mut self) {
        self.state = MotorState::Idle;
    }

    pub(crate) fn advance(&mut self, stage: &Stage, agent: &mut NavAgent, writer: &mut EventWriter) {
        match self.state {
            MotorState::Idle => {}
            // The point destination was issued once at the start of the
            // motion; only arrival is re-evaluated here.
            MotorState::MovingToPoint { .. } => {
                if Self::is_stopped(agent) {
                    self.state = MotorState::Idle;
                    self.emit_stopped(writer);
                }
            }
            MotorState::MovingToTarget { target } => {
                let Some(entity) = stage.find_entity(target) else {
                    self.state = MotorState::Idle;
                    self.emit_stopped(writer);
                    agent.reset_path();
                    agent.set_stopping_distance(0.0);
                    return;
                };

                if Self::is_stopped(agent) {
                    self.state = MotorState::Idle;
                    self.emit_stopped(writer);
                    agent.reset_path();
                    agent.set_stopping_distance(0.0);
                } else {
                    agent.set_destination(entity.transform.position);
                    self.emit_moved(entity.transform.position, writer);
                }
            }
        }
    }

    fn emit_moved(&self, position: Vec2, writer: &mut EventWriter) {
        writer.publish(
            EventKind::CharacterMoved,
            EventPayload {
                trigger: Some(self.agent_id),
                target: None,
                target_position: Some(position),
            },
        );
    }

    fn emit_stopped(&self, writer: &mut EventWriter) {
        writer.publish(
            EventKind::CharacterStopped,
            EventPayload {
                trigger: Some(self.agent_id),
                target: None,
                target_position: None,
            },
        );
    }
}
