//! Content factory for building catalogs from a data directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ironwood_core::{ArchetypeTable, CombatConfig, GridMap, QuestTable};

use crate::loaders::{
    ArchetypeLoader, ConfigLoader, LoadResult, MapLoader, QuestLoader, SpawnLoader, SpawnTable,
};

/// Everything the runtime needs to simulate a region.
#[derive(Debug, Clone)]
pub struct ContentBundle {
    pub config: CombatConfig,
    pub archetypes: ArchetypeTable,
    pub quests: QuestTable,
    pub spawns: SpawnTable,
    pub maps: BTreeMap<String, GridMap>,
}

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── combat.toml
/// ├── archetypes.ron
/// ├── spawns.ron
/// ├── quests.ron
/// └── maps/
///     ├── quarry_floor1.ron
///     └── quarry_boss_room.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat tunables from `combat.toml`, or defaults if the file is absent.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("combat.toml");
        if !path.exists() {
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the archetype catalog from `archetypes.ron`.
    pub fn load_archetypes(&self) -> LoadResult<ArchetypeTable> {
        ArchetypeLoader::load(&self.data_dir.join("archetypes.ron"))
    }

    /// Load per-map spawn lists from `spawns.ron`.
    pub fn load_spawns(&self) -> LoadResult<SpawnTable> {
        SpawnLoader::load(&self.data_dir.join("spawns.ron"))
    }

    /// Load quest definitions from `quests.ron`.
    pub fn load_quests(&self) -> LoadResult<QuestTable> {
        QuestLoader::load(&self.data_dir.join("quests.ron"))
    }

    /// Load a map from `maps/{map_id}.ron`.
    pub fn load_map(&self, map_id: &str) -> LoadResult<GridMap> {
        let path = self.maps_dir().join(format!("{}.ron", map_id));
        MapLoader::load(&path)
    }

    /// Load every `*.ron` file under `maps/`, keyed by map id.
    pub fn load_maps(&self) -> LoadResult<BTreeMap<String, GridMap>> {
        let dir = self.maps_dir();
        let entries = std::fs::read_dir(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to read map directory {}: {}", dir.display(), e))?;

        let mut maps = BTreeMap::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("ron") {
                continue;
            }
            let map = MapLoader::load(&path)?;
            maps.insert(map.id().to_string(), map);
        }
        Ok(maps)
    }

    /// Load the full data set and check that spawn lists only name known
    /// archetypes and maps.
    pub fn load_bundle(&self) -> LoadResult<ContentBundle> {
        let bundle = ContentBundle {
            config: self.load_config()?,
            archetypes: self.load_archetypes()?,
            quests: self.load_quests()?,
            spawns: self.load_spawns()?,
            maps: self.load_maps()?,
        };

        for map_id in bundle.spawns.map_ids() {
            if !bundle.maps.contains_key(map_id) {
                anyhow::bail!("spawns.ron references unknown map '{}'", map_id);
            }
        }
        Ok(bundle)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn maps_dir(&self) -> PathBuf {
        self.data_dir.join("maps")
    }
}
