//! Content loaders for reading game data from files.
//!
//! Each loader turns one RON/TOML file into the core catalog type it feeds.

pub mod archetypes;
pub mod config;
pub mod factory;
pub mod map;
pub mod quests;
pub mod spawns;

pub use archetypes::{ArchetypeLoader, DeathHook};
pub use config::ConfigLoader;
pub use factory::{ContentBundle, ContentFactory};
pub use map::MapLoader;
pub use quests::QuestLoader;
pub use spawns::{SpawnLoader, SpawnTable};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
