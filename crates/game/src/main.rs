use std::rc::Rc;

use engine::{resolve_app_paths, AssetDatabase, InputSnapshot, Vec2};
use tracing::{info, warn};

mod app;

use app::bootstrap;
use app::gameplay::{
    GameplayScene, InteractEffect, Item, LootTable, SessionCommand, TableFileSession,
};

const FIXED_DT_SECONDS: f32 = 1.0 / 60.0;
const MAX_SCRIPT_TICKS: usize = 3600;

fn main() {
    let mut wiring = bootstrap::build_app();

    let Some(session) = wiring.root.session_mut() else {
        return;
    };
    if !session.restart(&mut wiring.scenes) {
        return;
    }
    while session.is_loading() {
        session.advance(&mut wiring.scenes);
    }
    info!(
        scene = wiring.scenes.active_scene().unwrap_or("<none>"),
        "session ready"
    );

    let assets = build_asset_database();
    let loot = author_demo_loot_table(&assets);

    let scene = &mut wiring.scene;
    scene.start_play();
    scene.spawn_player(Vec2 { x: 0.0, y: 0.0 });

    let mut potion = Item::new("items/health_potion", "icons/health_potion", 0.65);
    if !potion.resolve(&assets) {
        warn!("demo potion did not resolve; continuing with an unresolved item");
    }
    let collectable_position = Vec2 { x: 2.5, y: 0.0 };
    scene.spawn_collectable(collectable_position, Rc::new(potion));

    let enemy_position = Vec2 { x: 6.0, y: 0.0 };
    let enemy = scene.spawn_enemy(enemy_position, loot);

    // Walk over and pick up the potion.
    scene.advance(
        FIXED_DT_SECONDS,
        &InputSnapshot::empty().with_interact_click(Some(collectable_position)),
    );
    run_until(scene, |scene| scene.state.inventory.item_count() == 1);
    info!(
        items = scene.state.inventory.item_count(),
        "potion collected"
    );

    // Hunt the wandering enemy; it drops loot on death.
    scene.advance(
        FIXED_DT_SECONDS,
        &InputSnapshot::empty().with_interact_click(Some(enemy_position)),
    );
    run_until(scene, |scene| !scene.state.enemies.contains_key(&enemy));

    if let Some(drop_position) = first_collectable_position(scene) {
        let before = scene.state.inventory.item_count();
        scene.advance(
            FIXED_DT_SECONDS,
            &InputSnapshot::empty().with_interact_click(Some(drop_position)),
        );
        run_until(scene, |scene| scene.state.inventory.item_count() > before);
        info!(
            items = scene.state.inventory.item_count(),
            "enemy drop collected"
        );
    } else {
        info!("enemy despawned without a resolvable drop");
    }

    // Pause and unpause through the menu stack.
    scene.advance(
        FIXED_DT_SECONDS,
        &InputSnapshot::empty().with_pause_pressed(true),
    );
    info!(
        paused = scene.state.time_scale.value() == 0.0,
        "pause menu opened"
    );
    scene.advance(
        FIXED_DT_SECONDS,
        &InputSnapshot::empty().with_pause_pressed(true),
    );

    let command = match wiring.root.session_mut() {
        Some(session) => session.quit(),
        None => SessionCommand::None,
    };
    if command == SessionCommand::Quit {
        info!("shutting down");
    }
}

fn run_until(scene: &mut GameplayScene, done: impl Fn(&GameplayScene) -> bool) {
    for _ in 0..MAX_SCRIPT_TICKS {
        if done(scene) {
            return;
        }
        scene.advance(FIXED_DT_SECONDS, &InputSnapshot::empty());
    }
    warn!("script step did not finish within its tick budget");
}

fn first_collectable_position(scene: &GameplayScene) -> Option<Vec2> {
    let mut ids: Vec<_> = scene
        .state
        .interactables
        .iter()
        .filter(|(_, interactable)| {
            matches!(interactable.effect, InteractEffect::Collect { .. })
        })
        .map(|(id, _)| *id)
        .collect();
    ids.sort_by_key(|id| id.0);
    ids.into_iter().find_map(|id| {
        scene
            .state
            .stage
            .find_entity(id)
            .map(|entity| entity.transform.position)
    })
}

/// Prefer the on-disk manifest; fall back to a built-in registry so the
/// demo also runs outside the repository root.
fn build_asset_database() -> AssetDatabase {
    if let Ok(paths) = resolve_app_paths() {
        let manifest_path = paths.assets_dir.join("manifest.json");
        match AssetDatabase::from_manifest_file(&manifest_path) {
            Ok(assets) => return assets,
            Err(error) => {
                warn!(%error, "asset manifest unavailable; using built-in assets");
            }
        }
    }

    let mut assets = AssetDatabase::default();
    assets.register_model("assets/resources/items/health_potion.prefab");
    assets.register_model("assets/resources/items/rusty_sword.prefab");
    assets.register_model("assets/resources/items/wolf_pelt.prefab");
    assets.register_sprite("assets/resources/icons/health_potion.png");
    assets.register_sprite("assets/resources/icons/rusty_sword.png");
    assets.register_sprite("assets/resources/icons/wolf_pelt.png");
    assets
}

/// Author a loot table, push it through the save/load file contract, and
/// hand back the resolved result the enemy will roll on.
fn author_demo_loot_table(assets: &AssetDatabase) -> Option<LootTable> {
    let mut table = LootTable::default();
    table
        .items
        .push(Item::new("items/rusty_sword", "icons/rusty_sword", 0.35));
    table
        .items
        .push(Item::new("items/wolf_pelt", "icons/wolf_pelt", 0.65));
    if !table.resolve_items(assets) {
        warn!("authored loot table has unresolved items");
    }

    let mut files = TableFileSession::default();
    let target = resolve_app_paths()
        .ok()
        .map(|paths| paths.loot_tables_dir.join("demo_table.json"));

    let mut loaded = match target {
        Some(path) => {
            if !files.save(Some(path.as_path()), &table, assets) {
                warn!("loot table save failed; using the in-memory table");
                return Some(table);
            }
            files.load(Some(path.as_path()))?
        }
        None => {
            warn!("no project root; skipping the loot table file round trip");
            table
        }
    };
    loaded.resolve_items(assets);
    Some(loaded)
}
