#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuKind {
    Main,
    Pause,
    Tutorial,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct MenuPanel {
    kind: MenuKind,
    active: bool,
    previous_time_scale: f32,
}

impl MenuPanel {
    fn new(kind: MenuKind) -> Self {
        Self {
            kind,
            active: false,
            previous_time_scale: 0.0,
        }
    }

    pub(crate) fn kind(&self) -> MenuKind {
        self.kind
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    fn on_enter(&mut self, time_scale: &mut TimeScale) {
        if self.kind == MenuKind::Pause {
            self.previous_time_scale = time_scale.value();
            time_scale.set(0.0);
        }
    }

    fn on_exit(&mut self, time_scale: &mut TimeScale) {
        if self.kind == MenuKind::Pause {
            time_scale.set(self.previous_time_scale);
        }
    }
}

/// Exclusive-panel menu stack: only the top panel is active, and the old
/// top's exit hook runs to completion before the new top's enter hook.
#[derive(Debug, Default)]
pub(crate) struct MenuStack {
    stack: Vec<MenuPanel>,
}

impl MenuStack {
    pub(crate) fn push(&mut self, kind: MenuKind, time_scale: &mut TimeScale) {
        if let Some(top) = self.stack.last_mut() {
            top.on_exit(time_scale);
            top.active = false;
        }

        self.stack.push(MenuPanel::new(kind));
        if let Some(top) = self.stack.last_mut() {
            top.active = true;
            top.on_enter(time_scale);
        }
    }

    pub(crate) fn pop(&mut self, time_scale: &mut TimeScale) {
        let Some(mut top) = self.stack.pop() else {
            warn!("pop called on an empty menu stack");
            return;
        };
        top.on_exit(time_scale);
        top.active = false;

        if let Some(new_top) = self.stack.last_mut() {
            new_top.on_enter(time_scale);
            new_top.active = true;
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.stack.len()
    }

    pub(crate) fn top(&self) -> Option<&MenuPanel> {
        self.stack.last()
    }

    pub(crate) fn panels(&self) -> &[MenuPanel] {
        &self.stack
    }

    pub(crate) fn top_kind(&self) -> Option<MenuKind> {
        self.stack.last().map(MenuPanel::kind)
    }

    /// Pause hotkey behavior: opens the pause panel over an empty stack,
    /// closes it when it is the visible top, and defers to any other menu.
    pub(crate) fn toggle_pause(&mut self, time_scale: &mut TimeScale) {
        if self.is_empty() {
            self.push(MenuKind::Pause, time_scale);
        } else if self.top_kind() == Some(MenuKind::Pause) {
            self.pop(time_scale);
        }
    }
}
