//! Mutable combat state.
//!
//! Actors, projectiles and ground items live in a per-map [`MapSession`]; the
//! player, inventory and world progress are shared across maps. The runtime
//! owns all of it and lends it to the engine for one tick at a time.
mod actor;
mod arena;
mod common;
mod inventory;
mod player;
mod progress;
mod projectile;
mod session;

pub use actor::{ActorInstance, AiState, Aim, Phase, Stance, Wound};
pub use arena::ActorArena;
pub use common::{ActorId, Direction, Position};
pub use inventory::Inventory;
pub use player::PlayerCombat;
pub use progress::{QuestProgress, WorldProgress};
pub use projectile::{Projectile, ProjectileOwner};
pub use session::{GroundItem, MapSession};
