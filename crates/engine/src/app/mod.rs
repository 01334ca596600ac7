mod input;
mod loading;
mod nav;
mod stage;
mod time;

pub use input::InputSnapshot;
pub use loading::{SceneAssetId, SceneLoadError, SceneLoadOp, SceneRef, SceneServer};
pub use nav::NavAgent;
pub use stage::{Entity, EntityId, Stage, Transform, Vec2};
pub use time::TimeScale;
