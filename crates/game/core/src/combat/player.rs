//! Player attack actions.

use super::damage::strike_actor;
use super::weapons::{AttackError, melee_damage, select_firearm};
use crate::engine::CombatContext;
use crate::projectile;
use crate::state::{ActorId, ProjectileOwner, Wound};

/// Swings at the tile in front of the player.
///
/// The swing animation always starts. The first live actor on the target tile
/// takes ladder damage and is staggered. Returns the actor struck, if any.
pub fn player_melee(ctx: &mut CombatContext<'_>) -> Option<ActorId> {
    ctx.player.attack_anim_ms = ctx.config.player_attack_anim_ms;

    let target = ctx.player.facing_tile();
    let id = ctx.session.actors.live_at(target)?;
    let damage = melee_damage(&ctx.config.weapons, ctx.inventory);
    let hitstun = ctx.config.melee_hitstun_ms;

    match strike_actor(ctx, id, damage, hitstun) {
        Ok(Wound::Killed) => {
            let status = ctx
                .session
                .actors
                .get(id)
                .and_then(|actor| ctx.env.archetypes().archetype(&actor.archetype))
                .map_or_else(
                    || "Enemy down!".to_string(),
                    |archetype| format!("Defeated {}!", archetype.name),
                );
            ctx.report.set_status(status);
        }
        Ok(_) => ctx.report.set_status("Hit!"),
        Err(_) => return None,
    }
    Some(id)
}

/// Fires the best held firearm along the player's facing.
///
/// Consumes exactly one unit of ammunition whether or not the shot connects.
///
/// # Errors
///
/// Returns `AttackError::NoRangedWeapon` if no firearm is held and
/// `AttackError::OutOfAmmo` if the ammunition item is missing. Neither error
/// consumes anything.
pub fn player_ranged(ctx: &mut CombatContext<'_>) -> Result<(), AttackError> {
    let config = ctx.config;
    let weapons = &config.weapons;
    let result = match select_firearm(weapons, ctx.inventory) {
        None => Err(AttackError::NoRangedWeapon),
        Some(weapon) => {
            if ctx.inventory.remove_one(&weapons.ammo_item) {
                Ok(weapon.projectile())
            } else {
                Err(AttackError::OutOfAmmo {
                    ammo: weapons.ammo_item.clone(),
                })
            }
        }
    };

    match result {
        Ok(spec) => {
            let origin = ctx.player.position;
            let facing = ctx.player.facing;
            projectile::fire(ctx, origin, facing, &spec, ProjectileOwner::Player);
            ctx.report.set_status("Bang!");
            Ok(())
        }
        Err(error) => {
            ctx.report.set_status(error.status());
            if matches!(error, AttackError::OutOfAmmo { .. }) {
                ctx.report.set_toast("No ammo");
            }
            ctx.report.rejected = Some(error.clone());
            Err(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tests::Fixture;
    use crate::env::Archetype;
    use crate::state::{AiState, Direction, Position, Stance};

    fn fixture_with_target(hp: u32) -> (Fixture, ActorId) {
        let mut fixture = Fixture::new();
        fixture
            .archetypes
            .insert(Archetype::builder("coyote").name("Coyote").hp(hp).build());
        fixture.player.position = Position::new(4, 4);
        fixture.player.facing = Direction::Right;
        let id = fixture.spawn("coyote", Position::new(5, 4));
        (fixture, id)
    }

    #[test]
    fn melee_applies_ladder_damage_and_hitstun() {
        let (mut fixture, id) = fixture_with_target(10);
        fixture.inventory.add("knife", 1);
        fixture.inventory.add("saber", 1);
        let mut ctx = fixture.context();

        assert_eq!(player_melee(&mut ctx), Some(id));
        let actor = ctx.session.actors.get(id).unwrap();
        assert_eq!(actor.hp, 6);
        assert_eq!(
            actor.state,
            AiState::Hitstun {
                resume: Stance::Patrol
            }
        );
        assert_eq!(actor.hitstun_ms, 140);
        assert_eq!(ctx.player.attack_anim_ms, 180);
        assert_eq!(ctx.take_report().status.as_deref(), Some("Hit!"));
    }

    #[test]
    fn melee_kill_announces_display_name() {
        let (mut fixture, _) = fixture_with_target(1);
        let mut ctx = fixture.context();
        player_melee(&mut ctx);
        assert_eq!(
            ctx.take_report().status.as_deref(),
            Some("Defeated Coyote!")
        );
    }

    #[test]
    fn melee_whiffs_on_empty_tile() {
        let (mut fixture, _) = fixture_with_target(3);
        fixture.player.facing = Direction::Left;
        let mut ctx = fixture.context();
        assert_eq!(player_melee(&mut ctx), None);
        assert_eq!(ctx.player.attack_anim_ms, 180);
        assert!(ctx.take_report().status.is_none());
    }

    #[test]
    fn ranged_requires_weapon_then_ammo() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.context();
        assert_eq!(player_ranged(&mut ctx), Err(AttackError::NoRangedWeapon));
        assert_eq!(
            ctx.take_report().status.as_deref(),
            Some("No ranged weapon.")
        );

        ctx.inventory.add("pistol", 1);
        assert!(matches!(
            player_ranged(&mut ctx),
            Err(AttackError::OutOfAmmo { .. })
        ));
        assert!(ctx.session.projectiles.is_empty());
        assert_eq!(ctx.take_report().status.as_deref(), Some("Out of bullets."));
    }

    #[test]
    fn each_shot_consumes_one_bullet() {
        let mut fixture = Fixture::new();
        fixture.inventory.add("rifle", 1);
        fixture.inventory.add("bullet", 2);
        fixture.player.facing = Direction::Up;
        let mut ctx = fixture.context();

        player_ranged(&mut ctx).unwrap();
        assert_eq!(ctx.inventory.count("bullet"), 1);
        let shot = &ctx.session.projectiles[0];
        assert_eq!(shot.owner, ProjectileOwner::Player);
        assert_eq!(shot.direction, Direction::Up);
        assert_eq!(shot.damage, 3);
        assert_eq!(shot.remaining, 9.0);

        player_ranged(&mut ctx).unwrap();
        assert!(player_ranged(&mut ctx).is_err());
        assert_eq!(ctx.session.projectiles.len(), 2);
        assert!(!ctx.inventory.contains("bullet"));
    }
}
