//! Per-actor state machine.
//!
//! One function handles every archetype; melee versus ranged and boss phase
//! scaling are branches over the archetype's tags. Each actor is decided while
//! borrowed, and any attack it releases is resolved afterwards so the damage
//! and projectile paths can take the whole context.

use super::steering::{chase_direction, try_step};
use super::timing::EffectiveTimings;
use crate::combat::damage_player;
use crate::config::CombatConfig;
use crate::engine::CombatContext;
use crate::env::{AiMode, Archetype, CombatRng, MapOracle, ProjectileSpec};
use crate::event::CombatEvent;
use crate::projectile;
use crate::state::{
    ActorId, ActorInstance, AiState, Aim, Direction, Position, ProjectileOwner,
};

/// Attack released by an actor this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Release {
    /// Melee: hurts the player only if they still stand on `tile`.
    Strike { tile: Position, damage: u32 },
    Fire {
        origin: Position,
        direction: Direction,
        spec: ProjectileSpec,
    },
}

/// Ticks every live actor in arena order.
///
/// Stops early once the player is knocked out.
pub fn tick_actors(ctx: &mut CombatContext<'_>, dt_ms: u32) {
    for id in ctx.session.actors.ids() {
        if ctx.player.knocked_out {
            break;
        }
        if let Some(release) = tick_actor(ctx, id, dt_ms) {
            resolve_release(ctx, release);
        }
    }
}

fn tick_actor(ctx: &mut CombatContext<'_>, id: ActorId, dt_ms: u32) -> Option<Release> {
    let env = ctx.env;
    let config = ctx.config;
    let player = ctx.player.position;

    let actor = ctx.session.actors.get_mut(id)?;
    if !actor.is_alive() {
        return None;
    }
    let archetype = env.archetypes().archetype(&actor.archetype)?;

    let timings = EffectiveTimings::derive(archetype, actor.hp, &config.phase);
    actor.phase = timings.phase;
    actor.cooldown_ms = actor.cooldown_ms.saturating_sub(dt_ms);
    actor.telegraph_ms = actor.telegraph_ms.saturating_sub(dt_ms);
    actor.move_ms = actor.move_ms.saturating_sub(dt_ms);
    actor.hit_flash = actor.hit_flash.saturating_sub(1);

    let before = actor.state;
    let release = evaluate(
        actor,
        &Frame {
            archetype,
            timings,
            config,
            map: env.map(),
            player,
            dt_ms,
        },
        &mut *ctx.rng,
    );

    let after = actor.state;
    let target = actor.target;
    if after != before {
        ctx.report.push(CombatEvent::StateChanged {
            actor: id,
            from: before,
            to: after,
        });
        if let (AiState::Telegraph, Some(aim)) = (after, target) {
            ctx.report
                .push(CombatEvent::TelegraphStarted { actor: id, aim });
        }
    }
    release
}

/// Read-only inputs for one actor's decision.
struct Frame<'f> {
    archetype: &'f Archetype,
    timings: EffectiveTimings,
    config: &'f CombatConfig,
    map: &'f dyn MapOracle,
    player: Position,
    dt_ms: u32,
}

fn evaluate(actor: &mut ActorInstance, frame: &Frame<'_>, rng: &mut dyn CombatRng) -> Option<Release> {
    if let AiState::Hitstun { resume } = actor.state {
        actor.hitstun_ms = actor.hitstun_ms.saturating_sub(frame.dt_ms);
        if actor.hitstun_ms == 0 {
            actor.state = resume.into();
        }
        return None;
    }

    let archetype = frame.archetype;
    let distance = actor.position.manhattan(frame.player);
    let can_see = distance <= archetype.aggro_range_tiles;

    match actor.state {
        AiState::Patrol | AiState::Chase if can_see => actor.state = AiState::Chase,
        AiState::Chase => actor.state = AiState::Patrol,
        _ => {}
    }

    match actor.state {
        AiState::Patrol => {
            if actor.move_ms == 0 {
                let roll = rng.below(Direction::CARDINALS.len() as u32) as usize;
                try_step(
                    frame.map,
                    &mut actor.position,
                    Direction::CARDINALS[roll],
                    frame.player,
                );
                actor.move_ms = frame.timings.move_interval_ms;
            }
            None
        }
        AiState::Chase => {
            chase(actor, frame, distance);
            None
        }
        AiState::Telegraph => {
            if actor.telegraph_ms == 0 {
                actor.state = AiState::Attack;
            }
            None
        }
        AiState::Attack => {
            let release = release_attack(actor, frame);
            actor.cooldown_ms = frame.timings.cooldown_ms;
            actor.state = AiState::Cooldown;
            actor.target = None;
            release
        }
        AiState::Cooldown => {
            if actor.cooldown_ms == 0 {
                actor.state = if can_see {
                    AiState::Chase
                } else {
                    AiState::Patrol
                };
            }
            None
        }
        AiState::Hitstun { .. } | AiState::Dead => None,
    }
}

fn chase(actor: &mut ActorInstance, frame: &Frame<'_>, distance: u32) {
    let archetype = frame.archetype;
    let ranged = archetype.ai.mode == AiMode::Ranged;
    let keep_distance = archetype.ai.keep_distance_tiles;

    if actor.cooldown_ms == 0 {
        let aim = match archetype.ai.mode {
            AiMode::Ranged
                if distance <= archetype.attack_range_tiles && distance >= keep_distance =>
            {
                Some(Aim::Toward(Direction::dominant_axis(
                    frame.player.x - actor.position.x,
                    frame.player.y - actor.position.y,
                )))
            }
            AiMode::Melee if distance == 1 => Some(Aim::Tile(frame.player)),
            _ => None,
        };
        if let Some(aim) = aim {
            actor.state = AiState::Telegraph;
            actor.telegraph_ms = frame.timings.telegraph_ms;
            actor.target = Some(aim);
            return;
        }
    }

    if actor.move_ms == 0 {
        let retreat = ranged && distance < keep_distance;
        let direction = chase_direction(actor.position, frame.player, retreat);
        try_step(frame.map, &mut actor.position, direction, frame.player);
        actor.move_ms = frame.timings.move_interval_ms;
    }
}

fn release_attack(actor: &ActorInstance, frame: &Frame<'_>) -> Option<Release> {
    let archetype = frame.archetype;
    match archetype.ai.mode {
        AiMode::Ranged => {
            let direction = match actor.target {
                Some(Aim::Toward(direction)) => direction,
                _ => Direction::Down,
            };
            Some(Release::Fire {
                origin: actor.position,
                direction,
                spec: archetype
                    .projectile
                    .unwrap_or(frame.config.default_enemy_projectile),
            })
        }
        AiMode::Melee => match actor.target {
            Some(Aim::Tile(tile)) => Some(Release::Strike {
                tile,
                damage: archetype.contact_damage,
            }),
            _ => None,
        },
    }
}

fn resolve_release(ctx: &mut CombatContext<'_>, release: Release) {
    match release {
        Release::Strike { tile, damage } => {
            if ctx.player.position == tile {
                damage_player(ctx, damage);
            }
        }
        Release::Fire {
            origin,
            direction,
            spec,
        } => projectile::fire(ctx, origin, direction, &spec, ProjectileOwner::Enemy),
    }
}
