use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Asset paths below this root are addressable by the runtime loader.
/// Stored resource paths have the prefix and the file extension stripped;
/// the loader re-expands them against the registered full paths.
pub const RESOURCE_ROOT_PREFIX: &str = "assets/resources/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteId(pub u32);

/// Reduce a full asset path to the key used for runtime loading: the
/// resource root prefix is removed and the file extension dropped.
pub fn resource_key(asset_path: &str) -> String {
    let stripped = asset_path
        .strip_prefix(RESOURCE_ROOT_PREFIX)
        .unwrap_or(asset_path);
    match stripped.rfind('.') {
        Some(dot) if dot > stripped.rfind('/').map_or(0, |slash| slash + 1) => {
            stripped[..dot].to_string()
        }
        _ => stripped.to_string(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetManifest {
    #[serde(default)]
    pub models: Vec<String>,
    #[serde(default)]
    pub sprites: Vec<String>,
}

#[derive(Debug, Error)]
pub enum AssetManifestError {
    #[error("failed to read asset manifest '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse asset manifest '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Default)]
pub struct AssetDatabase {
    model_paths: Vec<String>,
    sprite_paths: Vec<String>,
    model_by_key: HashMap<String, u32>,
    sprite_by_key: HashMap<String, u32>,
}

impl AssetDatabase {
    pub fn from_manifest(manifest: &AssetManifest) -> Self {
        let mut database = Self::default();
        for path in &manifest.models {
            database.register_model(path);
        }
        for path in &manifest.sprites {
            database.register_sprite(path);
        }
        database
    }

    pub fn from_manifest_file(path: &Path) -> Result<Self, AssetManifestError> {
        let raw = fs::read_to_string(path).map_err(|source| AssetManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest: AssetManifest =
            serde_json::from_str(&raw).map_err(|source| AssetManifestError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::from_manifest(&manifest))
    }

    pub fn register_model(&mut self, asset_path: &str) -> ModelId {
        let key = resource_key(asset_path);
        if let Some(index) = self.model_by_key.get(&key) {
            return ModelId(*index);
        }
        let index = self.model_paths.len() as u32;
        self.model_paths.push(asset_path.to_string());
        self.model_by_key.insert(key, index);
        ModelId(index)
    }

    pub fn register_sprite(&mut self, asset_path: &str) -> SpriteId {
        let key = resource_key(asset_path);
        if let Some(index) = self.sprite_by_key.get(&key) {
            return SpriteId(*index);
        }
        let index = self.sprite_paths.len() as u32;
        self.sprite_paths.push(asset_path.to_string());
        self.sprite_by_key.insert(key, index);
        SpriteId(index)
    }

    /// Runtime lookup by stored resource path. A miss is the caller's
    /// failure to handle; nothing is created on demand.
    pub fn load_model(&self, resource_path: &str) -> Option<ModelId> {
        let id = self
            .model_by_key
            .get(&resource_key(resource_path))
            .map(|index| ModelId(*index));
        if id.is_none() {
            debug!(path = resource_path, "model lookup missed");
        }
        id
    }

    pub fn load_sprite(&self, resource_path: &str) -> Option<SpriteId> {
        let id = self
            .sprite_by_key
            .get(&resource_key(resource_path))
            .map(|index| SpriteId(*index));
        if id.is_none() {
            debug!(path = resource_path, "sprite lookup missed");
        }
        id
    }

    pub fn model_asset_path(&self, id: ModelId) -> Option<&str> {
        self.model_paths.get(id.0 as usize).map(String::as_str)
    }

    pub fn sprite_asset_path(&self, id: SpriteId) -> Option<&str> {
        self.sprite_paths.get(id.0 as usize).map(String::as_str)
    }

    pub fn model_count(&self) -> usize {
        self.model_paths.len()
    }

    pub fn sprite_count(&self) -> usize {
        self.sprite_paths.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_key_strips_root_prefix_and_extension() {
        assert_eq!(
            resource_key("assets/resources/items/health_potion.prefab"),
            "items/health_potion"
        );
        assert_eq!(resource_key("items/health_potion"), "items/health_potion");
        assert_eq!(
            resource_key("assets/resources/icons/potion.v2.png"),
            "icons/potion.v2"
        );
    }

    #[test]
    fn resource_key_leaves_dotted_directories_alone() {
        assert_eq!(resource_key("packs.v1/raw_item"), "packs.v1/raw_item");
    }

    #[test]
    fn registered_assets_resolve_by_resource_path() {
        let mut database = AssetDatabase::default();
        let model = database.register_model("assets/resources/items/health_potion.prefab");
        let sprite = database.register_sprite("assets/resources/icons/health_potion.png");

        assert_eq!(database.load_model("items/health_potion"), Some(model));
        assert_eq!(database.load_sprite("icons/health_potion"), Some(sprite));
        assert_eq!(database.load_model("items/unknown"), None);
        assert_eq!(
            database.model_asset_path(model),
            Some("assets/resources/items/health_potion.prefab")
        );
    }

    #[test]
    fn registering_the_same_path_twice_returns_the_same_handle() {
        let mut database = AssetDatabase::default();
        let first = database.register_model("assets/resources/items/sword.prefab");
        let second = database.register_model("assets/resources/items/sword.prefab");
        assert_eq!(first, second);
        assert_eq!(database.model_count(), 1);
    }

    #[test]
    fn manifest_round_trips_through_json() {
        let manifest = AssetManifest {
            models: vec!["assets/resources/items/sword.prefab".to_string()],
            sprites: vec!["assets/resources/icons/sword.png".to_string()],
        };
        let raw = serde_json::to_string(&manifest).expect("encode");
        let parsed: AssetManifest = serde_json::from_str(&raw).expect("decode");
        assert_eq!(parsed, manifest);

        let database = AssetDatabase::from_manifest(&parsed);
        assert!(database.load_model("items/sword").is_some());
        assert!(database.load_sprite("icons/sword").is_some());
    }

    #[test]
    fn manifest_file_errors_carry_the_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("missing.json");
        let error = AssetDatabase::from_manifest_file(&missing).expect_err("read error");
        assert!(matches!(error, AssetManifestError::Read { .. }));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "not json").expect("write");
        let error = AssetDatabase::from_manifest_file(&bad).expect_err("parse error");
        assert!(matches!(error, AssetManifestError::Parse { .. }));
    }
}
