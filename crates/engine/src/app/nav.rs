use super::stage::Vec2;

const ARRIVAL_EPSILON: f32 = 1.0e-4;

/// Navigation agent facade. Path following is the engine's business; the
/// caller only issues destinations and queries the state below. Movement
/// integrates straight toward the destination once per tick and the path
/// clears itself on arrival.
#[derive(Debug, Clone, PartialEq)]
pub struct NavAgent {
    position: Vec2,
    destination: Option<Vec2>,
    stopping_distance: f32,
    speed: f32,
}

impl NavAgent {
    pub fn new(position: Vec2, speed: f32) -> Self {
        Self {
            position,
            destination: None,
            stopping_distance: 0.0,
            speed,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn warp(&mut self, position: Vec2) {
        self.position = position;
        self.destination = None;
    }

    pub fn set_destination(&mut self, destination: Vec2) {
        self.destination = Some(destination);
    }

    pub fn reset_path(&mut self) {
        self.destination = None;
    }

    pub fn has_path(&self) -> bool {
        self.destination.is_some()
    }

    pub fn remaining_distance(&self) -> f32 {
        match self.destination {
            Some(destination) => self.position.distance_to(destination),
            None => 0.0,
        }
    }

    pub fn stopping_distance(&self) -> f32 {
        self.stopping_distance
    }

    pub fn set_stopping_distance(&mut self, stopping_distance: f32) {
        self.stopping_distance = stopping_distance.max(0.0);
    }

    pub fn advance(&mut self, dt_seconds: f32) {
        let Some(destination) = self.destination else {
            return;
        };

        let distance = self.position.distance_to(destination);
        if distance <= self.stopping_distance {
            return;
        }

        let max_step = self.speed * dt_seconds;
        if max_step >= distance {
            self.position = destination;
            self.destination = None;
            return;
        }
        if distance <= ARRIVAL_EPSILON {
            self.position = destination;
            self.destination = None;
            return;
        }

        let inv_distance = distance.recip();
        let dx = destination.x - self.position.x;
        let dy = destination.y - self.position.y;
        self.position = Vec2 {
            x: self.position.x + dx * inv_distance * max_step,
            y: self.position.y + dy * inv_distance * max_step,
        };
    }
}
