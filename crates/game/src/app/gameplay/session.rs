#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SessionCommand {
    None,
    Quit,
}

/// Loading-screen fill bar. The fill is clamped; the session drives it
/// while a scene load is in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct LoadScreen {
    fill: f32,
    active: bool,
}

impl LoadScreen {
    pub(crate) fn fill(&self) -> f32 {
        self.fill
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn activate(&mut self) {
        self.active = true;
    }

    pub(crate) fn deactivate(&mut self) {
        self.active = false;
    }

    pub(crate) fn set_fill_percent(&mut self, fill: f32) {
        self.fill = fill.clamp(0.0, 1.0);
    }
}

/// Session context: scene-load lifecycle plus quit. Constructed once by
/// the owning root; never a process-wide global.
#[derive(Debug)]
pub(crate) struct GameSession {
    initial_scene: SceneRef,
    load_screen: Option<LoadScreen>,
    pending_load: Option<SceneLoadOp>,
    quit_requested: bool,
}

impl GameSession {
    pub(crate) fn new(initial_scene: SceneRef, load_screen: Option<LoadScreen>) -> Self {
        Self {
            initial_scene,
            load_screen,
            pending_load: None,
            quit_requested: false,
        }
    }

    pub(crate) fn initial_scene(&self) -> &SceneRef {
        &self.initial_scene
    }

    pub(crate) fn load_screen(&self) -> Option<&LoadScreen> {
        self.load_screen.as_ref()
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.pending_load.is_some()
    }

    /// Begin loading the configured initial scene. With a load screen the
    /// load runs cooperatively through `advance`; without one it completes
    /// in place, skipping progress reporting.
    pub(crate) fn restart(&mut self, scenes: &mut SceneServer) -> bool {
        let op = match scenes.begin_load(self.initial_scene.name()) {
            Ok(op) => op,
            Err(error) => {
                error!(%error, "restart failed to begin scene load");
                return false;
            }
        };

        match self.load_screen.as_mut() {
            Some(screen) => {
                screen.set_fill_percent(0.0);
                screen.activate();
                self.pending_load = Some(op);
            }
            None => {
                let mut op = op;
                while !op.is_done() {
                    op.advance();
                }
                op.allow_activation();
                if let Err(error) = scenes.complete_load(op) {
                    error!(%error, "scene activation failed");
                    return false;
                }
            }
        }
        true
    }

    /// One cooperative step of an in-flight load: bump progress, report it
    /// to the load screen, and on completion drop the screen and allow the
    /// scene to activate.
    pub(crate) fn advance(&mut self, scenes: &mut SceneServer) {
        let Some(mut op) = self.pending_load.take() else {
            return;
        };

        let progress = op.advance();
        debug!(scene = op.scene_name(), progress, "scene load progress");
        if let Some(screen) = self.load_screen.as_mut() {
            screen.set_fill_percent(progress);
        }

        if op.is_done() {
            if let Some(screen) = self.load_screen.as_mut() {
                screen.deactivate();
            }
            op.allow_activation();
            if let Err(error) = scenes.complete_load(op) {
                error!(%error, "scene activation failed");
            }
        } else {
            self.pending_load = Some(op);
        }
    }

    /// Request shutdown. The owning loop decides what quitting means for
    /// its host (exit the process, or stop play under a dev harness).
    pub(crate) fn quit(&mut self) -> SessionCommand {
        self.quit_requested = true;
        info!("quit requested");
        SessionCommand::Quit
    }

    pub(crate) fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}

/// The single owning root. Installing a second session keeps the first
/// and reports the duplicate, preserving one-active-instance semantics
/// without global state.
#[derive(Debug, Default)]
pub(crate) struct GameRoot {
    session: Option<GameSession>,
}

impl GameRoot {
    pub(crate) fn install_session(&mut self, session: GameSession) -> bool {
        if self.session.is_some() {
            error!("a game session already exists; the new one was discarded");
            return false;
        }
        self.session = Some(session);
        true
    }

    pub(crate) fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub(crate) fn session_mut(&mut self) -> Option<&mut GameSession> {
        self.session.as_mut()
    }

    pub(crate) fn clear_session(&mut self) {
        self.session = None;
    }
}
