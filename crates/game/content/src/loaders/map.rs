//! Map layout loader.
//!
//! A map file lists tile rows as digit strings (one character per tile, the
//! digit being the terrain code) plus the exit tiles.

use std::path::Path;

use ironwood_core::{GridMap, MapOracle, Position};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Map data structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MapDataRon {
    rows: Vec<String>,
    #[serde(default)]
    exits: Vec<Position>,
}

/// Loader for map layouts from RON files.
pub struct MapLoader;

impl MapLoader {
    /// Load a map. The map id is the file stem.
    pub fn load(path: &Path) -> LoadResult<GridMap> {
        let id = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| anyhow::anyhow!("Invalid map file name: {}", path.display()))?;
        let content = read_file(path)?;
        Self::parse(id, &content)
            .map_err(|e| anyhow::anyhow!("Failed to load map {}: {}", path.display(), e))
    }

    pub fn parse(id: &str, content: &str) -> LoadResult<GridMap> {
        let data: MapDataRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;

        if data.rows.is_empty() {
            anyhow::bail!("map '{}' has no rows", id);
        }

        let mut rows = Vec::with_capacity(data.rows.len());
        for (y, row) in data.rows.iter().enumerate() {
            let codes = row
                .chars()
                .enumerate()
                .map(|(x, ch)| {
                    ch.to_digit(10).map(|code| code as u16).ok_or_else(|| {
                        anyhow::anyhow!("map '{}' has invalid tile '{}' at ({}, {})", id, ch, x, y)
                    })
                })
                .collect::<LoadResult<Vec<u16>>>()?;
            rows.push(codes);
        }

        let map = GridMap::from_rows(id, &rows, data.exits)
            .ok_or_else(|| anyhow::anyhow!("map '{}' has rows of differing width", id))?;

        if let Some(exit) = map.exits().iter().find(|exit| !map.dimensions().contains(**exit)) {
            anyhow::bail!("map '{}' has exit ({}, {}) outside the grid", id, exit.x, exit.y);
        }
        Ok(map)
    }
}
