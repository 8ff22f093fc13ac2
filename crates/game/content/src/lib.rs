//! Data-driven content for the Ironwood combat simulation.
//!
//! This crate reads the externally authored data sets the core treats as
//! read-only catalogs:
//! - Enemy archetypes (RON)
//! - Per-map spawn lists (RON)
//! - Quest definitions (RON)
//! - Map layouts (RON, one file per map)
//! - Combat tunables (TOML)
//!
//! Content is consumed through the core's oracle traits and never appears in
//! session state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ArchetypeLoader, ConfigLoader, ContentBundle, ContentFactory, DeathHook, MapLoader,
    QuestLoader, SpawnLoader, SpawnTable,
};
