//! Runtime orchestration for the Ironwood combat simulation.
//!
//! This crate owns everything the pure core borrows for a frame: the per-map
//! session registry, the player's combat state, inventory and world progress,
//! and the seeded random source. Consumers embed [`Simulation`] to enter maps,
//! drive `update(dt)` once per frame and export sessions for saving.
//!
//! Modules are organized by responsibility:
//! - [`simulation`] hosts the frame driver and its builder
//! - [`sessions`] keeps per-map actor lists alive across map changes
//! - [`rng`] adapts `rand` to the core's random source
//! - [`logging`] turns tick reports into `tracing` events
pub mod error;
pub mod logging;
pub mod rng;
pub mod sessions;
pub mod simulation;

pub use error::{Result, RuntimeError};
pub use rng::StdCombatRng;
pub use sessions::{SessionRegistry, SessionSnapshot};
pub use simulation::{Simulation, SimulationBuilder};
