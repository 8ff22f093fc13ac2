//! Actor AI: phase-scaled timers, greedy steering and the state machine.
mod machine;
mod steering;
mod timing;

pub use machine::tick_actors;
pub use steering::{chase_direction, try_step};
pub use timing::EffectiveTimings;
