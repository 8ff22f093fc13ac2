//! Death and reward pipeline.
//!
//! Runs exactly once per actor, on the hit that takes it to zero hp: the actor
//! is marked dead for good, its drop table is rolled, and its on-death hook
//! commands are dispatched.
mod commands;
mod drops;

pub use commands::{DeathCommand, dispatch};
pub use drops::{grant_item, place_ground_drops, roll_drops};

use crate::engine::CombatContext;
use crate::event::CombatEvent;
use crate::state::ActorId;

/// Resolves an actor's death. Returns false if the actor was missing or
/// already dead, in which case nothing happens.
pub fn resolve_death(ctx: &mut CombatContext<'_>, id: ActorId) -> bool {
    let env = ctx.env;
    let config = ctx.config;

    let Some(actor) = ctx.session.actors.get_mut(id) else {
        return false;
    };
    if !actor.mark_dead() {
        return false;
    }
    let position = actor.position;
    let archetype_id = actor.archetype.clone();

    ctx.report.push(CombatEvent::ActorKilled {
        actor: id,
        archetype: archetype_id.clone(),
    });

    let Some(archetype) = env.archetypes().archetype(&archetype_id) else {
        return true;
    };

    if archetype.id == config.ground_drop_boss {
        place_ground_drops(ctx, position, &config.ground_drop_items);
        roll_drops(
            ctx,
            archetype
                .drops
                .iter()
                .filter(|entry| !config.is_ground_drop_item(&entry.item)),
        );
        ctx.report.set_toast("Drops fell to the ground.");
    } else {
        roll_drops(ctx, &archetype.drops);
    }

    dispatch(ctx, &archetype.on_death);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tests::Fixture;
    use crate::env::{ActorKind, Archetype, DropEntry, PcgRng, ScriptedRng};
    use crate::state::{AiState, Position};

    fn overseer() -> Archetype {
        Archetype::builder("quarry_overseer")
            .name("Quarry Overseer")
            .kind(ActorKind::Boss)
            .hp(8)
            .phase2_at(4)
            .drop(DropEntry::guaranteed("pay_script"))
            .drop(DropEntry::new("coin_bundle", 0.7, 1, 1))
            .drop(DropEntry::guaranteed("heart_container"))
            .drop(DropEntry::guaranteed("pistol"))
            .on_death(DeathCommand::SetFlag("quarryCleared".into()))
            .build()
    }

    fn kill_overseer(rng: ScriptedRng) -> Fixture {
        let mut fixture = Fixture::new();
        fixture.archetypes.insert(overseer());
        fixture.rng = rng;
        let id = fixture.spawn("quarry_overseer", Position::new(8, 6));
        {
            let mut ctx = fixture.context();
            assert!(resolve_death(&mut ctx, id));
            assert!(!resolve_death(&mut ctx, id));
        }
        fixture
    }

    #[test]
    fn boss_places_key_items_and_grants_the_rest() {
        let fixture = kill_overseer(ScriptedRng::constant(0.0));

        assert_eq!(fixture.inventory.count("pay_script"), 1);
        assert_eq!(fixture.inventory.count("coin_bundle"), 1);
        assert!(!fixture.inventory.contains("pistol"));
        assert_eq!(fixture.player.max_hp, 12);

        let ground: Vec<_> = fixture
            .session
            .ground_items
            .iter()
            .map(|item| item.item.as_str())
            .collect();
        assert_eq!(ground, ["heart_container", "pistol"]);
        assert_ne!(
            fixture.session.ground_items[0].position,
            fixture.session.ground_items[1].position
        );
        assert!(fixture.progress.has_flag("quarryCleared"));
    }

    #[test]
    fn coin_bundle_follows_its_roll() {
        // Fixed quantities draw nothing: pay_script roll, then coin_bundle roll.
        let fixture = kill_overseer(ScriptedRng::new(vec![0.0, 0.75]));
        assert_eq!(fixture.inventory.count("pay_script"), 1);
        assert!(!fixture.inventory.contains("coin_bundle"));
    }

    #[test]
    fn coin_bundle_rate_is_near_seventy_percent() {
        let mut hits = 0;
        let trials: u64 = 2000;
        for seed in 0..trials {
            let mut fixture = Fixture::new();
            fixture.archetypes.insert(overseer());
            let id = fixture.spawn("quarry_overseer", Position::new(8, 6));
            let mut rng = PcgRng::new(seed.wrapping_mul(0x9e37_79b9_7f4a_7c15));
            let mut ctx = fixture.context_with_rng(&mut rng);
            resolve_death(&mut ctx, id);
            drop(ctx);

            assert!(fixture.inventory.contains("pay_script"));
            assert_eq!(fixture.session.ground_items.len(), 2);
            if fixture.inventory.contains("coin_bundle") {
                hits += 1;
            }
        }
        let rate = hits as f32 / trials as f32;
        assert!((0.65..0.75).contains(&rate), "rate {rate}");
    }

    #[test]
    fn regular_actor_grants_heart_directly() {
        let mut fixture = Fixture::new();
        fixture.archetypes.insert(
            Archetype::builder("warden")
                .drop(DropEntry::guaranteed("heart_container"))
                .build(),
        );
        let id = fixture.spawn("warden", Position::new(3, 3));
        let mut ctx = fixture.context();

        resolve_death(&mut ctx, id);
        assert_eq!(ctx.player.max_hp, 16);
        assert!(ctx.session.ground_items.is_empty());
        assert_eq!(ctx.session.actors.get(id).unwrap().state, AiState::Dead);
    }
}
