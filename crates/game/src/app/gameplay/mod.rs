use std::collections::{HashMap, VecDeque};
use std::fs;
use std::path::Path;
use std::rc::Rc;

use engine::{
    resource_key, AssetDatabase, EntityId, InputSnapshot, ModelId, NavAgent, SceneLoadOp, SceneRef,
    SceneServer, SpriteId, Stage, TimeScale, Transform, Vec2,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

const DEFAULT_INTERACT_RANGE: f32 = 2.0;
const PICK_MAX_DISTANCE: f32 = 1.5;
const PLAYER_MOVE_SPEED: f32 = 5.0;
const ENEMY_MOVE_SPEED: f32 = 3.5;
const ENEMY_WANDER_RADIUS: f32 = 10.0;
const ENEMY_WANDER_COOLDOWN_SECONDS: f32 = 4.0;
const ENEMY_DEATH_WAIT_SECONDS: f32 = 1.0;
const INVENTORY_SLOT_COUNT: usize = 12;
const DEFAULT_TABLE_NAME: &str = "New Loot Table";

include!("events.rs");
include!("loot.rs");
include!("interact.rs");
include!("motor.rs");
include!("controller.rs");
include!("menu.rs");
include!("inventory.rs");
include!("session.rs");
include!("enemy.rs");
include!("scene_impl.rs");

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
