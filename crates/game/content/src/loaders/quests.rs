//! Quest catalog loader.

use std::path::Path;

use ironwood_core::{QuestDefinition, QuestTable};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Quest catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestCatalog {
    pub quests: Vec<QuestDefinition>,
}

/// Loader for quest definitions from RON files.
pub struct QuestLoader;

impl QuestLoader {
    /// Load quests, keeping authoring order for objective lookups.
    pub fn load(path: &Path) -> LoadResult<QuestTable> {
        let content = read_file(path)?;
        let catalog: QuestCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse quest catalog RON: {}", e))?;

        Ok(QuestTable::new(catalog.quests))
    }
}
