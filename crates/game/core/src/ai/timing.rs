use crate::config::PhaseScaling;
use crate::env::Archetype;
use crate::state::Phase;

/// Timers an actor uses this tick, after boss phase scaling.
///
/// Derived from current hp on every tick and never stored, so healing back
/// above the threshold removes the scaling again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectiveTimings {
    pub phase: Phase,
    pub move_interval_ms: u32,
    pub telegraph_ms: u32,
    pub cooldown_ms: u32,
}

impl EffectiveTimings {
    pub fn derive(archetype: &Archetype, hp: u32, scaling: &PhaseScaling) -> Self {
        if archetype.in_second_phase(hp) {
            Self {
                phase: Phase::Two,
                move_interval_ms: scaling
                    .scale(archetype.move_interval_ms, scaling.min_move_interval_ms),
                telegraph_ms: scaling.scale(archetype.telegraph_ms, scaling.min_telegraph_ms),
                cooldown_ms: scaling.scale(archetype.attack_cooldown_ms, scaling.min_cooldown_ms),
            }
        } else {
            Self {
                phase: Phase::One,
                move_interval_ms: archetype.move_interval_ms,
                telegraph_ms: archetype.telegraph_ms,
                cooldown_ms: archetype.attack_cooldown_ms,
            }
        }
    }
}
