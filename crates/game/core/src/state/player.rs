use super::common::{Direction, Position};

/// Player-side combat state.
///
/// Weapons are not modelled here: the inventory contents decide damage.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerCombat {
    pub position: Position,
    pub facing: Direction,
    pub hp: u32,
    pub max_hp: u32,
    pub i_frames_ms: u32,
    pub attack_anim_ms: u32,
    pub hit_flash: u8,
    /// Set when hp reaches zero; combat stops processing until revived.
    pub knocked_out: bool,
}

impl PlayerCombat {
    pub const DEFAULT_MAX_HP: u32 = 12;
    /// Hp restored by [`revive`](Self::revive), capped at max hp.
    pub const REVIVE_HP: u32 = 8;

    pub fn new(position: Position, max_hp: u32) -> Self {
        Self {
            position,
            facing: Direction::Down,
            hp: max_hp,
            max_hp,
            i_frames_ms: 0,
            attack_anim_ms: 0,
            hit_flash: 0,
            knocked_out: false,
        }
    }

    pub fn is_invulnerable(&self) -> bool {
        self.i_frames_ms > 0
    }

    /// Counts down invulnerability, swing animation and flash.
    pub fn tick_timers(&mut self, dt_ms: u32) {
        self.i_frames_ms = self.i_frames_ms.saturating_sub(dt_ms);
        self.attack_anim_ms = self.attack_anim_ms.saturating_sub(dt_ms);
        self.hit_flash = self.hit_flash.saturating_sub(1);
    }

    /// Raises max hp and heals by the same amount, capped at the new maximum.
    pub fn raise_max_hp(&mut self, bonus: u32) {
        self.max_hp += bonus;
        self.hp = (self.hp + bonus).min(self.max_hp);
    }

    /// Clears a knockout and restores a little health.
    pub fn revive(&mut self) {
        self.knocked_out = false;
        self.hp = self.hp.max(Self::REVIVE_HP.min(self.max_hp));
        self.i_frames_ms = 0;
    }

    /// Tile directly in front of the player.
    pub fn facing_tile(&self) -> Position {
        self.position.step(self.facing)
    }
}

impl Default for PlayerCombat {
    fn default() -> Self {
        Self::new(Position::ORIGIN, Self::DEFAULT_MAX_HP)
    }
}
