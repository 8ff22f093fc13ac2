//! Combat resolver: player actions and hit registration.
//!
//! Every damage path, whether a swing, a projectile or an enemy attack,
//! funnels through [`damage_player`] or [`strike_actor`], and a killing blow
//! hands off to the death pipeline.
mod damage;
mod player;
mod weapons;

pub use damage::{damage_player, strike_actor};
pub use player::{player_melee, player_ranged};
pub use weapons::{AttackError, WeaponProfile, melee_damage, select_firearm};
