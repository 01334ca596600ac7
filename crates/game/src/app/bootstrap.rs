use engine::{SceneRef, SceneServer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::gameplay::{GameRoot, GameSession, GameplayScene, LoadScreen};

const RNG_SEED_ENV_VAR: &str = "ARPG_SEED";
const DEFAULT_RNG_SEED: u64 = 0x5eed_0001;
const INITIAL_SCENE_NAME: &str = "Overworld";

pub(crate) struct AppWiring {
    pub(crate) root: GameRoot,
    pub(crate) scenes: SceneServer,
    pub(crate) scene: GameplayScene,
}

pub(crate) fn build_app() -> AppWiring {
    init_tracing();
    info!("=== ARPG Prototype Startup ===");

    let mut scenes = SceneServer::default();
    let initial_asset = scenes.register_scene(INITIAL_SCENE_NAME);
    let mut initial_scene = SceneRef::default();
    initial_scene.set_asset(&scenes, initial_asset);

    let mut root = GameRoot::default();
    root.install_session(GameSession::new(initial_scene, Some(LoadScreen::default())));

    let scene = GameplayScene::new(seed_from_env());

    AppWiring { root, scenes, scene }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

fn seed_from_env() -> u64 {
    std::env::var(RNG_SEED_ENV_VAR)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(DEFAULT_RNG_SEED)
}
