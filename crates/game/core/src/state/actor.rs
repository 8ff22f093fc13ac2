//! Mutable per-map actor instances.

use strum::{AsRefStr, Display, EnumString};

use super::common::{Direction, Position};
use crate::env::Archetype;

/// Non-transient stance an actor returns to once hit-stun wears off.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Stance {
    #[default]
    Patrol,
    Chase,
    Cooldown,
}

/// Discrete AI state of an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AiState {
    #[default]
    Patrol,
    Chase,
    Telegraph,
    Attack,
    Cooldown,
    Hitstun {
        resume: Stance,
    },
    Dead,
}

impl AiState {
    pub const fn is_dead(self) -> bool {
        matches!(self, AiState::Dead)
    }

    /// Stance to restore after an interruption. An interrupted windup or
    /// swing is cancelled, so it resumes as a chase.
    pub const fn resume_stance(self) -> Stance {
        match self {
            AiState::Patrol | AiState::Dead => Stance::Patrol,
            AiState::Chase | AiState::Telegraph | AiState::Attack => Stance::Chase,
            AiState::Cooldown => Stance::Cooldown,
            AiState::Hitstun { resume } => resume,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            AiState::Patrol => "patrol",
            AiState::Chase => "chase",
            AiState::Telegraph => "telegraph",
            AiState::Attack => "attack",
            AiState::Cooldown => "cooldown",
            AiState::Hitstun { .. } => "hitstun",
            AiState::Dead => "dead",
        }
    }
}

impl From<Stance> for AiState {
    fn from(stance: Stance) -> Self {
        match stance {
            Stance::Patrol => AiState::Patrol,
            Stance::Chase => AiState::Chase,
            Stance::Cooldown => AiState::Cooldown,
        }
    }
}

/// Boss difficulty tier derived from current hp every tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    #[default]
    One,
    Two,
}

impl Phase {
    pub const fn number(self) -> u8 {
        match self {
            Phase::One => 1,
            Phase::Two => 2,
        }
    }
}

/// Target committed when a telegraph starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Aim {
    /// Melee: the exact tile the player stood on.
    Tile(Position),
    /// Ranged: the cardinal direction to fire along.
    Toward(Direction),
}

/// Result of applying damage to an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wound {
    /// Actor was already dead; nothing changed.
    Ignored,
    Survived { hp: u32 },
    /// This hit took the actor from positive hp to zero.
    Killed,
}

/// A hostile entity placed on a specific map.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorInstance {
    /// Stable id from the spawn record, unique per map.
    pub spawn_id: String,
    pub archetype: String,
    pub position: Position,
    pub hp: u32,
    pub state: AiState,
    pub cooldown_ms: u32,
    pub telegraph_ms: u32,
    pub move_ms: u32,
    pub hitstun_ms: u32,
    pub hit_flash: u8,
    pub phase: Phase,
    pub target: Option<Aim>,
}

impl ActorInstance {
    /// Fresh actor at full health, patrolling.
    pub fn spawn(spawn_id: impl Into<String>, archetype: &Archetype, position: Position) -> Self {
        Self {
            spawn_id: spawn_id.into(),
            archetype: archetype.id.clone(),
            position,
            hp: archetype.hp_max,
            state: AiState::Patrol,
            cooldown_ms: 0,
            telegraph_ms: 0,
            move_ms: 0,
            hitstun_ms: 0,
            hit_flash: 0,
            phase: Phase::One,
            target: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.state.is_dead()
    }

    /// Reduces hp, floored at zero. Dead actors ignore further damage.
    pub fn wound(&mut self, damage: u32) -> Wound {
        if self.state.is_dead() || self.hp == 0 {
            return Wound::Ignored;
        }
        self.hp = self.hp.saturating_sub(damage);
        if self.hp == 0 {
            Wound::Killed
        } else {
            Wound::Survived { hp: self.hp }
        }
    }

    /// Suspends AI for `duration_ms`. The stance held before the first
    /// interruption is kept when hits land back to back.
    pub fn stagger(&mut self, duration_ms: u32, flash_frames: u8) {
        self.hit_flash = flash_frames;
        if self.state.is_dead() {
            return;
        }
        self.state = AiState::Hitstun {
            resume: self.state.resume_stance(),
        };
        self.hitstun_ms = duration_ms;
        self.target = None;
    }

    /// Moves the actor into the terminal state. Returns false if it was
    /// already dead, so callers can run death side effects exactly once.
    pub fn mark_dead(&mut self) -> bool {
        if self.state.is_dead() {
            return false;
        }
        self.state = AiState::Dead;
        self.hp = 0;
        self.hitstun_ms = 0;
        self.target = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_actor(hp: u32) -> ActorInstance {
        let archetype = Archetype::builder("wolf").hp(hp).build();
        ActorInstance::spawn("w1", &archetype, Position::new(1, 1))
    }

    #[test]
    fn wound_floors_at_zero_and_reports_kill_once() {
        let mut actor = create_test_actor(3);
        assert_eq!(actor.wound(1), Wound::Survived { hp: 2 });
        assert_eq!(actor.wound(5), Wound::Killed);
        assert_eq!(actor.hp, 0);
        assert!(actor.mark_dead());
        assert!(!actor.mark_dead());
        assert_eq!(actor.wound(1), Wound::Ignored);
    }

    #[test]
    fn stagger_remembers_stance_across_repeated_hits() {
        let mut actor = create_test_actor(5);
        actor.state = AiState::Telegraph;
        actor.stagger(140, 6);
        assert_eq!(
            actor.state,
            AiState::Hitstun {
                resume: Stance::Chase
            }
        );
        actor.stagger(160, 6);
        assert_eq!(
            actor.state,
            AiState::Hitstun {
                resume: Stance::Chase
            }
        );
        assert_eq!(actor.hitstun_ms, 160);
    }

    #[test]
    fn stagger_does_not_revive_the_dead() {
        let mut actor = create_test_actor(1);
        actor.wound(1);
        actor.mark_dead();
        actor.stagger(140, 6);
        assert_eq!(actor.state, AiState::Dead);
        assert_eq!(actor.hit_flash, 6);
    }
}
