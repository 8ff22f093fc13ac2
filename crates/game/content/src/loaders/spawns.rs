//! Per-map spawn list loader.

use std::collections::BTreeMap;
use std::path::Path;

use ironwood_core::SpawnRecord;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Spawn records keyed by map id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpawnTable {
    maps: BTreeMap<String, Vec<SpawnRecord>>,
}

impl SpawnTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, map_id: impl Into<String>, records: Vec<SpawnRecord>) {
        self.maps.insert(map_id.into(), records);
    }

    /// Records for `map_id`; maps without an entry spawn nothing.
    pub fn for_map(&self, map_id: &str) -> &[SpawnRecord] {
        self.maps.get(map_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn map_ids(&self) -> impl Iterator<Item = &str> {
        self.maps.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}

/// Loader for spawn lists from RON files.
pub struct SpawnLoader;

impl SpawnLoader {
    /// Load a `{ map_id: [SpawnRecord] }` map.
    ///
    /// Spawn ids must be unique within a map; they key actor persistence.
    pub fn load(path: &Path) -> LoadResult<SpawnTable> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load spawns from {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<SpawnTable> {
        let table: SpawnTable = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse spawn table RON: {}", e))?;

        for (map_id, records) in &table.maps {
            let mut seen = std::collections::BTreeSet::new();
            for record in records {
                if !seen.insert(record.id.as_str()) {
                    anyhow::bail!("duplicate spawn id '{}' on map '{}'", record.id, map_id);
                }
            }
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironwood_core::Position;

    #[test]
    fn parses_gated_and_plain_records() {
        let table = SpawnLoader::parse(
            r#"{
                "quarry_floor1": [
                    (id: "q1_wolf_01", archetype: "wolf", position: (x: 10, y: 7)),
                ],
                "ironwood_town": [
                    (
                        id: "iw_final_boss_vale",
                        archetype: "deacon_vale",
                        position: (x: 15, y: 9),
                        gate: (
                            requires_flags: ["checkpoint3_precipiceBossDefeated"],
                            requires_not_flags: ["finalBossDefeated"],
                        ),
                    ),
                ],
            }"#,
        )
        .unwrap();

        let floor = table.for_map("quarry_floor1");
        assert_eq!(floor.len(), 1);
        assert_eq!(floor[0].position, Position::new(10, 7));
        assert!(!floor[0].gate.is_conditional());

        let town = table.for_map("ironwood_town");
        assert!(town[0].gate.is_conditional());
        assert!(table.for_map("nowhere").is_empty());
    }

    #[test]
    fn rejects_duplicate_spawn_ids() {
        let result = SpawnLoader::parse(
            r#"{
                "m": [
                    (id: "a", archetype: "wolf", position: (x: 1, y: 1)),
                    (id: "a", archetype: "wolf", position: (x: 2, y: 1)),
                ],
            }"#,
        );
        assert!(result.is_err());
    }
}
