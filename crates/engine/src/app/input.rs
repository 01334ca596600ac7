use super::stage::Vec2;

/// One tick's worth of already-resolved player input. Ray casting against
/// the world happens upstream; clicks arrive here as world-space points.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    quit_requested: bool,
    pause_pressed: bool,
    inventory_pressed: bool,
    ground_click: Option<Vec2>,
    interact_click: Option<Vec2>,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_quit_requested(mut self, quit_requested: bool) -> Self {
        self.quit_requested = quit_requested;
        self
    }

    pub fn with_pause_pressed(mut self, pause_pressed: bool) -> Self {
        self.pause_pressed = pause_pressed;
        self
    }

    pub fn with_inventory_pressed(mut self, inventory_pressed: bool) -> Self {
        self.inventory_pressed = inventory_pressed;
        self
    }

    pub fn with_ground_click(mut self, ground_click: Option<Vec2>) -> Self {
        self.ground_click = ground_click;
        self
    }

    pub fn with_interact_click(mut self, interact_click: Option<Vec2>) -> Self {
        self.interact_click = interact_click;
        self
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn pause_pressed(&self) -> bool {
        self.pause_pressed
    }

    pub fn inventory_pressed(&self) -> bool {
        self.inventory_pressed
    }

    pub fn ground_click(&self) -> Option<Vec2> {
        self.ground_click
    }

    pub fn interact_click(&self) -> Option<Vec2> {
        self.interact_click
    }
}
