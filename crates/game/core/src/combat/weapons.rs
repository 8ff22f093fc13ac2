use crate::config::WeaponTable;
use crate::env::ProjectileSpec;
use crate::error::{CombatError, ErrorSeverity};
use crate::state::Inventory;

/// Ranged weapon stats keyed by the item id that unlocks them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponProfile {
    pub item: String,
    /// Tiles per second.
    pub speed: f32,
    /// Tiles.
    pub range: f32,
    pub damage: u32,
    pub hitstun_ms: u32,
}

impl WeaponProfile {
    pub fn new(
        item: impl Into<String>,
        speed: f32,
        range: f32,
        damage: u32,
        hitstun_ms: u32,
    ) -> Self {
        Self {
            item: item.into(),
            speed,
            range,
            damage,
            hitstun_ms,
        }
    }

    pub fn projectile(&self) -> ProjectileSpec {
        ProjectileSpec::new(self.speed, self.range, self.damage, self.hitstun_ms)
    }
}

/// Reasons a player attack could not be performed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackError {
    #[error("no ranged weapon held")]
    NoRangedWeapon,

    #[error("out of {ammo}")]
    OutOfAmmo { ammo: String },
}

impl AttackError {
    /// Status line shown to the player.
    pub const fn status(&self) -> &'static str {
        match self {
            AttackError::NoRangedWeapon => "No ranged weapon.",
            AttackError::OutOfAmmo { .. } => "Out of bullets.",
        }
    }
}

impl CombatError for AttackError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            AttackError::NoRangedWeapon => "ATTACK_NO_RANGED_WEAPON",
            AttackError::OutOfAmmo { .. } => "ATTACK_OUT_OF_AMMO",
        }
    }
}

/// Melee damage: base plus the bonus of every blade held.
pub fn melee_damage(table: &WeaponTable, inventory: &Inventory) -> u32 {
    table
        .blades
        .iter()
        .filter(|blade| inventory.contains(&blade.item))
        .fold(table.base_melee_damage, |damage, blade| damage + blade.bonus)
}

/// Highest-priority firearm held. Stats override, they never stack.
pub fn select_firearm<'t>(table: &'t WeaponTable, inventory: &Inventory) -> Option<&'t WeaponProfile> {
    table
        .firearms
        .iter()
        .find(|weapon| inventory.contains(&weapon.item))
}
