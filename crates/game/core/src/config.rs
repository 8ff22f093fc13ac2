/// Combat tunables shared by every map.
///
/// Every field has a default matching the shipped balance; TOML files only
/// need to list the values they override.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Invulnerability window granted to the player after taking a hit.
    pub player_i_frames_ms: u32,
    /// Length of the player's swing animation.
    pub player_attack_anim_ms: u32,
    /// Hit-stun imposed on an actor struck by the player's melee attack.
    pub melee_hitstun_ms: u32,
    /// Frames a struck actor (or the player) flashes for.
    pub hit_flash_frames: u8,
    /// Chebyshev radius searched around a blocked spawn tile.
    pub spawn_search_radius: i32,
    /// Projectile used by ranged archetypes that do not author one.
    pub default_enemy_projectile: crate::env::ProjectileSpec,
    pub phase: PhaseScaling,
    pub weapons: WeaponTable,
    /// Archetype whose guaranteed drops land on the ground instead of the inventory.
    pub ground_drop_boss: String,
    /// Items the ground-drop boss always leaves behind, in placement order.
    pub ground_drop_items: Vec<String>,
    /// Item that raises max hp instead of entering the inventory.
    pub heart_item: String,
    pub heart_bonus_hp: u32,
}

impl CombatConfig {
    pub const DEFAULT_PLAYER_I_FRAMES_MS: u32 = 550;
    pub const DEFAULT_PLAYER_ATTACK_ANIM_MS: u32 = 180;
    pub const DEFAULT_MELEE_HITSTUN_MS: u32 = 140;
    pub const DEFAULT_HIT_FLASH_FRAMES: u8 = 6;
    pub const DEFAULT_SPAWN_SEARCH_RADIUS: i32 = 4;
    pub const DEFAULT_HEART_BONUS_HP: u32 = 4;

    pub fn new() -> Self {
        Self {
            player_i_frames_ms: Self::DEFAULT_PLAYER_I_FRAMES_MS,
            player_attack_anim_ms: Self::DEFAULT_PLAYER_ATTACK_ANIM_MS,
            melee_hitstun_ms: Self::DEFAULT_MELEE_HITSTUN_MS,
            hit_flash_frames: Self::DEFAULT_HIT_FLASH_FRAMES,
            spawn_search_radius: Self::DEFAULT_SPAWN_SEARCH_RADIUS,
            default_enemy_projectile: crate::env::ProjectileSpec::ENEMY_DEFAULT,
            phase: PhaseScaling::default(),
            weapons: WeaponTable::default(),
            ground_drop_boss: "quarry_overseer".to_string(),
            ground_drop_items: vec!["heart_container".to_string(), "pistol".to_string()],
            heart_item: "heart_container".to_string(),
            heart_bonus_hp: Self::DEFAULT_HEART_BONUS_HP,
        }
    }

    /// Returns true if `item` is one of the ground-drop boss's guaranteed pickups.
    pub fn is_ground_drop_item(&self, item: &str) -> bool {
        self.ground_drop_items.iter().any(|id| id == item)
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Second-phase timer scaling for bosses below their `phase2_at_hp` threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PhaseScaling {
    /// Multiplier applied to every scaled timer, in percent (85 = 15% faster).
    pub percent: u32,
    pub min_move_interval_ms: u32,
    pub min_telegraph_ms: u32,
    pub min_cooldown_ms: u32,
}

impl PhaseScaling {
    /// Scales `base_ms` and clamps to `floor_ms`.
    pub fn scale(&self, base_ms: u32, floor_ms: u32) -> u32 {
        let scaled = (base_ms as u64 * self.percent as u64 / 100) as u32;
        scaled.max(floor_ms)
    }
}

impl Default for PhaseScaling {
    fn default() -> Self {
        Self {
            percent: 85,
            min_move_interval_ms: 140,
            min_telegraph_ms: 180,
            min_cooldown_ms: 650,
        }
    }
}

/// Item ids and stats behind the player's implicit weapon ladder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WeaponTable {
    pub base_melee_damage: u32,
    /// Blades stack: every held blade adds its bonus.
    pub blades: Vec<BladeBonus>,
    /// Ranged weapons in descending priority: the first one held is used.
    pub firearms: Vec<crate::combat::WeaponProfile>,
    pub ammo_item: String,
}

impl Default for WeaponTable {
    fn default() -> Self {
        use crate::combat::WeaponProfile;

        Self {
            base_melee_damage: 1,
            blades: vec![
                BladeBonus::new("knife", 1),
                BladeBonus::new("saber", 2),
            ],
            firearms: vec![
                WeaponProfile::new("rifle", 10.0, 9.0, 3, 160),
                WeaponProfile::new("pistol", 9.0, 7.0, 2, 160),
            ],
            ammo_item: "bullet".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BladeBonus {
    pub item: String,
    pub bonus: u32,
}

impl BladeBonus {
    pub fn new(item: impl Into<String>, bonus: u32) -> Self {
        Self {
            item: item.into(),
            bonus,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_scaling_floors_and_clamps() {
        let phase = PhaseScaling::default();
        assert_eq!(phase.scale(340, phase.min_move_interval_ms), 289);
        assert_eq!(phase.scale(360, phase.min_telegraph_ms), 306);
        assert_eq!(phase.scale(150, phase.min_move_interval_ms), 140);
        assert_eq!(phase.scale(700, phase.min_cooldown_ms), 650);
    }

    #[test]
    fn default_ground_drops_match_overseer_rewards() {
        let config = CombatConfig::default();
        assert!(config.is_ground_drop_item("pistol"));
        assert!(config.is_ground_drop_item("heart_container"));
        assert!(!config.is_ground_drop_item("coin_bundle"));
    }
}
