//! Traits describing read-only world data.
//!
//! Oracles expose archetype stat tables, the effective tile map of the active
//! map, and quest definitions. The [`CombatEnv`] aggregate bundles them so the
//! engine can access everything it needs without hard coupling to concrete
//! implementations. Randomness is not an oracle here because it is stateful;
//! it travels in the [`CombatContext`](crate::engine::CombatContext) instead.
mod archetypes;
mod error;
mod map;
mod quests;
mod rng;

pub use archetypes::{
    ActorKind, AiDescriptor, AiMode, Archetype, ArchetypeOracle, ArchetypeTable, DropEntry,
    ProjectileSpec,
};
pub use error::OracleError;
pub use map::{GridMap, MapDimensions, MapOracle, TerrainKind};
pub use quests::{QuestDefinition, QuestOracle, QuestRewards, QuestTable};
pub use rng::{CombatRng, PcgRng, ScriptedRng};

/// Aggregates read-only oracles required by the combat engine.
#[derive(Clone, Copy)]
pub struct CombatEnv<'a> {
    archetypes: &'a dyn ArchetypeOracle,
    map: &'a dyn MapOracle,
    quests: &'a dyn QuestOracle,
}

impl<'a> CombatEnv<'a> {
    pub fn new(
        archetypes: &'a dyn ArchetypeOracle,
        map: &'a dyn MapOracle,
        quests: &'a dyn QuestOracle,
    ) -> Self {
        Self {
            archetypes,
            map,
            quests,
        }
    }

    pub fn archetypes(&self) -> &'a dyn ArchetypeOracle {
        self.archetypes
    }

    pub fn map(&self) -> &'a dyn MapOracle {
        self.map
    }

    pub fn quests(&self) -> &'a dyn QuestOracle {
        self.quests
    }

    /// Looks up an archetype, returning an error for callers that cannot skip it.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ArchetypeNotFound` if the catalog has no such id.
    pub fn require_archetype(&self, id: &str) -> Result<&'a Archetype, OracleError> {
        self.archetypes
            .archetype(id)
            .ok_or_else(|| OracleError::ArchetypeNotFound(id.to_string()))
    }
}

impl core::fmt::Debug for CombatEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CombatEnv")
            .field("map", &self.map.dimensions())
            .finish_non_exhaustive()
    }
}
