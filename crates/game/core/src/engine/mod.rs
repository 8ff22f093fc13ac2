//! Frame driver for the combat simulation.
//!
//! The [`CombatEngine`] is the only entry point the runtime needs: it owns a
//! [`CombatContext`] for one frame and runs the fixed phase order of a tick.
//! Every mutation performed along the way is mirrored in the returned
//! [`TickReport`].
mod context;

pub use context::{CombatContext, TickReport};

use crate::combat::{self, AttackError};
use crate::env::OracleError;
use crate::spawn::{self, SpawnRecord};
use crate::state::{ActorId, Wound};
use crate::{ai, projectile};

/// Player signals sampled for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameInput {
    pub melee: bool,
    pub ranged: bool,
    /// Dialogue or a map trigger holds the world still.
    pub frozen: bool,
}

impl FrameInput {
    pub const IDLE: Self = Self {
        melee: false,
        ranged: false,
        frozen: false,
    };

    pub fn melee() -> Self {
        Self {
            melee: true,
            ..Self::IDLE
        }
    }

    pub fn ranged() -> Self {
        Self {
            ranged: true,
            ..Self::IDLE
        }
    }

    pub fn frozen() -> Self {
        Self {
            frozen: true,
            ..Self::IDLE
        }
    }
}

/// Combat engine driving one map session for one frame.
///
/// Phase order within [`CombatEngine::update`]:
/// freeze check → player timers → player actions → projectiles → actor AI.
/// A knockout at any point ends the remaining phases.
pub struct CombatEngine<'a> {
    ctx: CombatContext<'a>,
}

impl<'a> CombatEngine<'a> {
    pub fn new(ctx: CombatContext<'a>) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &CombatContext<'a> {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut CombatContext<'a> {
        &mut self.ctx
    }

    /// Runs the spawn pass for the session. Returns the number of actors placed.
    pub fn populate(&mut self, records: &[SpawnRecord]) -> usize {
        spawn::populate(&mut self.ctx, records)
    }

    pub fn player_melee(&mut self) -> Option<ActorId> {
        combat::player_melee(&mut self.ctx)
    }

    pub fn player_ranged(&mut self) -> Result<(), AttackError> {
        combat::player_ranged(&mut self.ctx)
    }

    /// Applies external damage to an actor, e.g. from a scripted hazard.
    pub fn apply_hit(
        &mut self,
        id: ActorId,
        damage: u32,
        hitstun_ms: u32,
    ) -> Result<Wound, OracleError> {
        combat::strike_actor(&mut self.ctx, id, damage, hitstun_ms)
    }

    pub fn damage_player(&mut self, amount: u32) -> bool {
        combat::damage_player(&mut self.ctx, amount)
    }

    /// Advances the simulation by `dt_ms` and returns what happened.
    pub fn update(&mut self, dt_ms: u32, input: FrameInput) -> TickReport {
        let ctx = &mut self.ctx;
        if input.frozen || ctx.player.knocked_out {
            return ctx.take_report();
        }

        ctx.player.tick_timers(dt_ms);

        if input.melee {
            combat::player_melee(ctx);
        }
        if input.ranged {
            // Rejections are recorded on the report.
            let _ = combat::player_ranged(ctx);
        }

        projectile::advance(ctx, dt_ms);
        if !ctx.player.knocked_out {
            ai::tick_actors(ctx, dt_ms);
        }

        ctx.take_report()
    }

    /// Collects anything produced by direct calls since the last report.
    pub fn take_report(&mut self) -> TickReport {
        self.ctx.take_report()
    }

    pub fn into_context(self) -> CombatContext<'a> {
        self.ctx
    }
}
