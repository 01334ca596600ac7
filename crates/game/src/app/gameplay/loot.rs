#[derive(Debug, Clone, Default)]
pub(crate) struct Item {
    pub(crate) model_path: String,
    pub(crate) icon_path: String,
    pub(crate) drop_rate: f32,
    pub(crate) model: Option<ModelId>,
    pub(crate) icon: Option<SpriteId>,
}

impl Item {
    pub(crate) fn new(
        model_path: impl Into<String>,
        icon_path: impl Into<String>,
        drop_rate: f32,
    ) -> Self {
        Self {
            model_path: model_path.into(),
            icon_path: icon_path.into(),
            drop_rate,
            model: None,
            icon: None,
        }
    }

    /// Resolve the persisted resource paths into live asset handles.
    /// Resolution is deferred until this is called.
    pub(crate) fn resolve(&mut self, assets: &AssetDatabase) -> bool {
        if self.model_path.is_empty() {
            error!("asset path for item model is empty");
            return false;
        }
        let Some(model) = assets.load_model(&self.model_path) else {
            error!(path = self.model_path.as_str(), "item model failed to load");
            return false;
        };

        if self.icon_path.is_empty() {
            error!("asset path for item icon is empty");
            return false;
        }
        let Some(icon) = assets.load_sprite(&self.icon_path) else {
            error!(path = self.icon_path.as_str(), "item icon failed to load");
            return false;
        };

        self.model = Some(model);
        self.icon = Some(icon);
        true
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct LootTable {
    pub(crate) items: Vec<Item>,
}

impl LootTable {
    /// Weighted random pick. Weights are normalized by their sum at
    /// selection time; they do not have to add up to one. A table whose
    /// weights sum to zero falls through the walk and yields the last
    /// item, which is the intended fallback.
    pub(crate) fn pick_weighted_random(&self, rng: &mut impl Rng) -> Option<&Item> {
        if self.items.is_empty() {
            return None;
        }

        let total_weight: f32 = self.items.iter().map(|item| item.drop_rate).sum();
        if total_weight > 0.0 {
            let mut remainder = rng.gen_range(0.0..total_weight);
            for item in &self.items {
                remainder -= item.drop_rate;
                if remainder <= 0.0 {
                    return Some(item);
                }
            }
        }

        self.items.last()
    }

    /// Resolve every item's assets. A failed item is skipped, not fatal;
    /// returns whether every item resolved.
    pub(crate) fn resolve_items(&mut self, assets: &AssetDatabase) -> bool {
        let mut all_resolved = true;
        for item in &mut self.items {
            if !item.resolve(assets) {
                all_resolved = false;
            }
        }
        all_resolved
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct SavedLootEntry {
    #[serde(rename = "gameObjectPath")]
    pub(crate) game_object_path: String,
    #[serde(rename = "spritePath")]
    pub(crate) sprite_path: String,
    #[serde(rename = "dropRate")]
    pub(crate) drop_rate: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct SavedLootTable {
    pub(crate) items: Vec<SavedLootEntry>,
}

impl SavedLootTable {
    /// Snapshot for serialization. Stored paths are re-derived from the
    /// live asset references when present, falling back to whatever path
    /// the item already carried.
    pub(crate) fn from_table(table: &LootTable, assets: &AssetDatabase) -> Self {
        let items = table
            .items
            .iter()
            .map(|item| SavedLootEntry {
                game_object_path: item
                    .model
                    .and_then(|model| assets.model_asset_path(model))
                    .map(resource_key)
                    .unwrap_or_else(|| item.model_path.clone()),
                sprite_path: item
                    .icon
                    .and_then(|icon| assets.sprite_asset_path(icon))
                    .map(resource_key)
                    .unwrap_or_else(|| item.icon_path.clone()),
                drop_rate: item.drop_rate,
            })
            .collect();
        Self { items }
    }

    pub(crate) fn into_table(self) -> LootTable {
        LootTable {
            items: self
                .items
                .into_iter()
                .map(|entry| Item::new(entry.game_object_path, entry.sprite_path, entry.drop_rate))
                .collect(),
        }
    }
}

pub(crate) fn save_loot_table(
    path: &Path,
    table: &LootTable,
    assets: &AssetDatabase,
) -> Result<(), String> {
    let saved = SavedLootTable::from_table(table, assets);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|error| format!("create loot table dir '{}': {error}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(&saved)
        .map_err(|error| format!("encode loot table json: {error}"))?;
    fs::write(path, json)
        .map_err(|error| format!("write loot table '{}': {error}", path.display()))?;
    Ok(())
}

pub(crate) fn load_loot_table(path: &Path) -> Result<LootTable, String> {
    let raw = fs::read_to_string(path)
        .map_err(|error| format!("read loot table '{}': {error}", path.display()))?;
    let saved = parse_loot_table_json(&raw)?;
    Ok(saved.into_table())
}

pub(crate) fn parse_loot_table_json(raw: &str) -> Result<SavedLootTable, String> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    match serde_path_to_error::deserialize::<_, SavedLootTable>(&mut deserializer) {
        Ok(saved) => Ok(saved),
        Err(error) => {
            let path = error.path().to_string();
            let source = error.into_inner();
            if path.is_empty() || path == "." {
                Err(format!("parse loot table json: {source}"))
            } else {
                Err(format!("parse loot table json at {path}: {source}"))
            }
        }
    }
}

/// File-handling half of the table authoring tool. The window chrome is
/// editor territory; this carries the load/save contract, including the
/// sentinel path that cancelled dialogs reset to.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TableFileSession {
    current_table_path: String,
}

impl Default for TableFileSession {
    fn default() -> Self {
        Self {
            current_table_path: DEFAULT_TABLE_NAME.to_string(),
        }
    }
}

impl TableFileSession {
    pub(crate) fn current_table_path(&self) -> &str {
        &self.current_table_path
    }

    /// Save to `target`. `None` means the dialog was cancelled: the
    /// operation aborts silently and the tracked path resets.
    pub(crate) fn save(
        &mut self,
        target: Option<&Path>,
        table: &LootTable,
        assets: &AssetDatabase,
    ) -> bool {
        let Some(path) = target else {
            self.current_table_path = DEFAULT_TABLE_NAME.to_string();
            return false;
        };
        if path.as_os_str().is_empty() {
            warn!("loot table save path is empty");
            self.current_table_path = DEFAULT_TABLE_NAME.to_string();
            return false;
        }

        match save_loot_table(path, table, assets) {
            Ok(()) => {
                self.current_table_path = path.display().to_string();
                info!(path = self.current_table_path.as_str(), "loot table saved");
                true
            }
            Err(error) => {
                error!(%error, "loot table failed to serialize");
                false
            }
        }
    }

    /// Load from `source`. `None` means the dialog was cancelled: silent
    /// abort, path reset. Failures log and yield nothing; the caller
    /// keeps its current table.
    pub(crate) fn load(&mut self, source: Option<&Path>) -> Option<LootTable> {
        let Some(path) = source else {
            self.current_table_path = DEFAULT_TABLE_NAME.to_string();
            return None;
        };

        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(error) => {
                error!(path = %path.display(), %error, "opening loot table failed");
                return None;
            }
        };
        if raw.trim().is_empty() {
            warn!(path = %path.display(), "opened loot table was empty");
            return None;
        }
        match parse_loot_table_json(&raw) {
            Ok(saved) => {
                self.current_table_path = path.display().to_string();
                Some(saved.into_table())
            }
            Err(error) => {
                error!(path = %path.display(), %error, "loot table was corrupt");
                None
            }
        }
    }
}
