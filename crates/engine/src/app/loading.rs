use thiserror::Error;
use tracing::debug;

const DEFAULT_LOAD_TICKS: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneAssetId(pub u32);

#[derive(Debug, Clone)]
struct SceneAsset {
    display_name: String,
}

/// Paired scene-asset/name value. The asset half is authoring-time only;
/// the name string re-syncs whenever the asset is assigned and is the only
/// part usable at runtime.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneRef {
    asset: Option<SceneAssetId>,
    name: String,
}

impl SceneRef {
    pub fn from_name(name: impl Into<String>) -> Self {
        Self {
            asset: None,
            name: name.into(),
        }
    }

    pub fn set_asset(&mut self, server: &SceneServer, asset: SceneAssetId) {
        self.asset = Some(asset);
        if let Some(display_name) = server.display_name(asset) {
            self.name = display_name.to_string();
        }
    }

    pub fn asset(&self) -> Option<SceneAssetId> {
        self.asset
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneLoadError {
    #[error("no scene named '{name}' is registered")]
    UnknownScene { name: String },
    #[error("scene '{name}' cannot activate: load incomplete or activation not allowed")]
    ActivationBlocked { name: String },
}

/// Cooperative scene load. One `advance` per external tick raises the
/// fractional progress; the scene only becomes active once the load is
/// done and activation has been allowed.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLoadOp {
    scene_name: String,
    ticks_done: u32,
    ticks_total: u32,
    activation_allowed: bool,
}

impl SceneLoadOp {
    pub fn scene_name(&self) -> &str {
        &self.scene_name
    }

    pub fn advance(&mut self) -> f32 {
        if self.ticks_done < self.ticks_total {
            self.ticks_done += 1;
        }
        self.progress()
    }

    pub fn progress(&self) -> f32 {
        if self.ticks_total == 0 {
            return 1.0;
        }
        self.ticks_done as f32 / self.ticks_total as f32
    }

    pub fn is_done(&self) -> bool {
        self.ticks_done >= self.ticks_total
    }

    pub fn allow_activation(&mut self) {
        self.activation_allowed = true;
    }
}

#[derive(Debug, Default)]
pub struct SceneServer {
    scenes: Vec<SceneAsset>,
    active_scene: Option<String>,
    ticks_per_load: Option<u32>,
}

impl SceneServer {
    pub fn with_ticks_per_load(ticks_per_load: u32) -> Self {
        Self {
            ticks_per_load: Some(ticks_per_load),
            ..Self::default()
        }
    }

    pub fn register_scene(&mut self, display_name: impl Into<String>) -> SceneAssetId {
        let id = SceneAssetId(self.scenes.len() as u32);
        self.scenes.push(SceneAsset {
            display_name: display_name.into(),
        });
        id
    }

    pub fn display_name(&self, id: SceneAssetId) -> Option<&str> {
        self.scenes
            .get(id.0 as usize)
            .map(|scene| scene.display_name.as_str())
    }

    pub fn active_scene(&self) -> Option<&str> {
        self.active_scene.as_deref()
    }

    pub fn begin_load(&self, scene_name: &str) -> Result<SceneLoadOp, SceneLoadError> {
        let known = self
            .scenes
            .iter()
            .any(|scene| scene.display_name == scene_name);
        if !known {
            return Err(SceneLoadError::UnknownScene {
                name: scene_name.to_string(),
            });
        }
        debug!(scene = scene_name, "scene_load_started");
        Ok(SceneLoadOp {
            scene_name: scene_name.to_string(),
            ticks_done: 0,
            ticks_total: self.ticks_per_load.unwrap_or(DEFAULT_LOAD_TICKS),
            activation_allowed: false,
        })
    }

    pub fn complete_load(&mut self, op: SceneLoadOp) -> Result<(), SceneLoadError> {
        if !op.is_done() || !op.activation_allowed {
            return Err(SceneLoadError::ActivationBlocked {
                name: op.scene_name,
            });
        }
        debug!(scene = op.scene_name.as_str(), "scene_activated");
        self.active_scene = Some(op.scene_name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_progress_is_monotonic_and_completes() {
        let mut server = SceneServer::with_ticks_per_load(4);
        server.register_scene("Overworld");

        let mut op = server.begin_load("Overworld").expect("load op");
        let mut last = 0.0;
        while !op.is_done() {
            let progress = op.advance();
            assert!(progress > last);
            assert!(progress <= 1.0);
            last = progress;
        }
        assert_eq!(last, 1.0);

        op.allow_activation();
        server.complete_load(op).expect("activate");
        assert_eq!(server.active_scene(), Some("Overworld"));
    }

    #[test]
    fn unknown_scene_is_an_error_not_a_panic() {
        let server = SceneServer::default();
        let result = server.begin_load("Nowhere");
        assert!(matches!(
            result,
            Err(SceneLoadError::UnknownScene { name }) if name == "Nowhere"
        ));
    }

    #[test]
    fn activation_is_blocked_until_done_and_allowed() {
        let mut server = SceneServer::with_ticks_per_load(2);
        server.register_scene("Overworld");

        let op = server.begin_load("Overworld").expect("load op");
        assert!(server.complete_load(op).is_err());

        let mut op = server.begin_load("Overworld").expect("load op");
        op.advance();
        op.advance();
        assert!(op.is_done());
        assert!(server.complete_load(op.clone()).is_err());

        op.allow_activation();
        server.complete_load(op).expect("activate");
    }

    #[test]
    fn scene_ref_name_follows_the_assigned_asset() {
        let mut server = SceneServer::default();
        let overworld = server.register_scene("Overworld");
        let crypt = server.register_scene("Crypt");

        let mut scene_ref = SceneRef::from_name("placeholder");
        scene_ref.set_asset(&server, overworld);
        assert_eq!(scene_ref.name(), "Overworld");

        scene_ref.set_asset(&server, crypt);
        assert_eq!(scene_ref.name(), "Crypt");
        assert_eq!(scene_ref.asset(), Some(crypt));
    }
}
