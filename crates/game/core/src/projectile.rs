//! Continuous-motion projectiles with tile-based hit testing.

use crate::combat::{damage_player, strike_actor};
use crate::engine::CombatContext;
use crate::env::ProjectileSpec;
use crate::event::CombatEvent;
use crate::state::{Direction, Position, Projectile, ProjectileOwner};

/// Launches a projectile from the centre of `origin`.
pub fn fire(
    ctx: &mut CombatContext<'_>,
    origin: Position,
    direction: Direction,
    spec: &ProjectileSpec,
    owner: ProjectileOwner,
) {
    ctx.session
        .projectiles
        .push(Projectile::fire(origin, direction, spec, owner));
    ctx.report.push(CombatEvent::ProjectileFired {
        owner,
        origin,
        direction,
    });
}

/// Advances every live projectile by `speed * dt` and resolves hits.
///
/// A projectile whose next tile is not walkable dies where it is. Range is
/// spent before hit testing, so a shot that runs out on an actor's tile does
/// not connect. Dead projectiles are purged once the pass completes.
pub fn advance(ctx: &mut CombatContext<'_>, dt_ms: u32) {
    let map = ctx.env.map();
    let mut flying = std::mem::take(&mut ctx.session.projectiles);

    for projectile in flying.iter_mut().filter(|p| p.alive) {
        if ctx.player.knocked_out {
            break;
        }

        let distance = projectile.speed * dt_ms as f32 / 1000.0;
        let (x, y) = projectile.ahead(distance);
        let tile = Position::new(x.floor() as i32, y.floor() as i32);
        if !map.is_walkable(tile) {
            projectile.alive = false;
            continue;
        }

        projectile.x = x;
        projectile.y = y;
        projectile.remaining -= distance;
        if projectile.remaining <= 0.0 {
            projectile.alive = false;
            continue;
        }

        match projectile.owner {
            ProjectileOwner::Enemy => {
                if tile == ctx.player.position {
                    damage_player(ctx, projectile.damage);
                    projectile.alive = false;
                }
            }
            ProjectileOwner::Player => {
                if let Some(id) = ctx.session.actors.live_at(tile) {
                    match strike_actor(ctx, id, projectile.damage, projectile.hitstun_ms) {
                        Ok(_) => projectile.alive = false,
                        // Nothing was struck, so the shot flies on.
                        Err(_) => {}
                    }
                }
            }
        }
    }

    flying.retain(|p| p.alive);
    flying.append(&mut ctx.session.projectiles);
    ctx.session.projectiles = flying;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tests::Fixture;
    use crate::env::{Archetype, TerrainKind};
    use crate::state::AiState;

    #[test]
    fn range_runs_out_after_seven_sixths_of_a_second() {
        let mut fixture = Fixture::new();
        fixture.player.position = Position::new(0, 0);
        let mut ctx = fixture.context();
        let spec = ProjectileSpec::new(6.0, 7.0, 3, 120);
        fire(&mut ctx, Position::new(1, 5), Direction::Right, &spec, ProjectileOwner::Enemy);

        // 125 ms steps move exactly 0.75 tiles.
        for _ in 0..9 {
            advance(&mut ctx, 125);
        }
        assert_eq!(ctx.session.projectiles.len(), 1, "alive at 1.125 s");

        advance(&mut ctx, 125);
        assert!(ctx.session.projectiles.is_empty(), "gone at 1.25 s");
    }

    #[test]
    fn walls_stop_projectiles_without_effect() {
        let mut fixture = Fixture::new();
        fixture.map.set_terrain(Position::new(3, 5), TerrainKind::Wall);
        fixture.player.position = Position::new(4, 5);
        let mut ctx = fixture.context();
        fire(&mut ctx, Position::new(2, 5), Direction::Right, &ProjectileSpec::ENEMY_DEFAULT, ProjectileOwner::Enemy);

        for _ in 0..10 {
            advance(&mut ctx, 100);
        }
        assert!(ctx.session.projectiles.is_empty());
        assert_eq!(ctx.player.hp, ctx.player.max_hp);
    }

    #[test]
    fn enemy_shot_hits_player_and_ignores_actors() {
        let mut fixture = Fixture::new();
        fixture.archetypes.insert(Archetype::builder("bandit").hp(4).build());
        let bystander = fixture.spawn("bandit", Position::new(3, 5));
        fixture.player.position = Position::new(4, 5);
        let mut ctx = fixture.context();
        fire(&mut ctx, Position::new(2, 5), Direction::Right, &ProjectileSpec::ENEMY_DEFAULT, ProjectileOwner::Enemy);

        for _ in 0..5 {
            advance(&mut ctx, 100);
        }
        assert_eq!(ctx.player.hp, ctx.player.max_hp - 3);
        assert_eq!(ctx.session.actors.get(bystander).unwrap().hp, 4);
        assert!(ctx.session.projectiles.is_empty());
    }

    #[test]
    fn player_shot_staggers_first_actor_on_tile() {
        let mut fixture = Fixture::new();
        fixture.archetypes.insert(Archetype::builder("bandit").hp(4).build());
        let first = fixture.spawn("bandit", Position::new(4, 5));
        let second = fixture.spawn("bandit", Position::new(4, 5));
        let mut ctx = fixture.context();
        let pistol = ProjectileSpec::new(9.0, 7.0, 2, 160);
        fire(&mut ctx, Position::new(2, 5), Direction::Right, &pistol, ProjectileOwner::Player);

        for _ in 0..4 {
            advance(&mut ctx, 100);
        }
        let struck = ctx.session.actors.get(first).unwrap();
        assert_eq!(struck.hp, 2);
        assert_eq!(struck.hitstun_ms, 160);
        assert!(matches!(struck.state, AiState::Hitstun { .. }));
        assert_eq!(ctx.session.actors.get(second).unwrap().hp, 4);
        assert!(ctx.session.projectiles.is_empty());
    }

    #[test]
    fn lethal_shot_resolves_the_death() {
        let mut fixture = Fixture::new();
        fixture.archetypes.insert(Archetype::builder("bandit").hp(2).build());
        let id = fixture.spawn("bandit", Position::new(4, 5));
        let mut ctx = fixture.context();
        let pistol = ProjectileSpec::new(9.0, 7.0, 2, 160);
        fire(&mut ctx, Position::new(2, 5), Direction::Right, &pistol, ProjectileOwner::Player);

        for _ in 0..4 {
            advance(&mut ctx, 100);
        }
        let bandit = ctx.session.actors.get(id).unwrap();
        assert_eq!(bandit.hp, 0);
        assert_eq!(bandit.state, AiState::Dead);
        assert!(ctx.session.projectiles.is_empty());
        assert!(
            ctx.take_report()
                .events
                .iter()
                .any(|event| matches!(event, CombatEvent::ActorKilled { actor, .. } if *actor == id))
        );
    }
}
