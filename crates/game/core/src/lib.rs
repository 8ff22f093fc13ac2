//! Deterministic combat rules for the Ironwood overworld.
//!
//! `ironwood-core` defines the canonical combat simulation (spawning, actor AI,
//! projectiles, damage, death rewards) and exposes pure APIs that the runtime
//! drives once per frame. All per-frame mutation flows through
//! [`engine::CombatEngine`], and supporting crates depend on the types
//! re-exported here.
pub mod ai;
pub mod combat;
pub mod config;
pub mod death;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod projectile;
pub mod spawn;
pub mod state;

pub use ai::EffectiveTimings;
pub use combat::{AttackError, WeaponProfile};
pub use config::{BladeBonus, CombatConfig, PhaseScaling, WeaponTable};
pub use death::DeathCommand;
pub use engine::{CombatContext, CombatEngine, FrameInput, TickReport};
pub use env::{
    ActorKind, AiDescriptor, AiMode, Archetype, ArchetypeOracle, ArchetypeTable, CombatEnv,
    CombatRng, DropEntry, GridMap, MapDimensions, MapOracle, OracleError, PcgRng, ProjectileSpec,
    QuestDefinition, QuestOracle, QuestRewards, QuestTable, ScriptedRng, TerrainKind,
};
pub use error::{CombatError, ErrorSeverity};
pub use event::{CombatEvent, SpawnSkip};
pub use spawn::{SpawnGate, SpawnRecord};
pub use state::{
    ActorArena, ActorId, ActorInstance, AiState, Aim, Direction, GroundItem, Inventory, MapSession,
    Phase, PlayerCombat, Position, Projectile, ProjectileOwner, QuestProgress, Stance,
    WorldProgress, Wound,
};
