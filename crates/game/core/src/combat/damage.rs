use crate::death;
use crate::engine::CombatContext;
use crate::env::OracleError;
use crate::event::CombatEvent;
use crate::state::{ActorId, Wound};

/// Applies an incoming hit to the player.
///
/// Ignored while invulnerable. Otherwise hp drops (floored at zero), the
/// player flashes and a fresh invulnerability window starts. Returns true if
/// the hit landed.
pub fn damage_player(ctx: &mut CombatContext<'_>, amount: u32) -> bool {
    let player = &mut *ctx.player;
    if player.knocked_out || player.is_invulnerable() {
        return false;
    }

    player.hp = player.hp.saturating_sub(amount);
    player.hit_flash = ctx.config.hit_flash_frames;
    player.i_frames_ms = ctx.config.player_i_frames_ms;
    let hp = player.hp;

    ctx.report.push(CombatEvent::PlayerHit {
        damage: amount,
        hp,
    });

    if hp == 0 {
        ctx.player.knocked_out = true;
        ctx.report.push(CombatEvent::PlayerKnockedOut);
    }
    true
}

/// Damages an actor, staggers it and runs the death pipeline on a kill.
///
/// Dead actors absorb nothing and return [`Wound::Ignored`].
///
/// # Errors
///
/// Returns `OracleError::ActorNotFound` if `id` is not in the arena.
pub fn strike_actor(
    ctx: &mut CombatContext<'_>,
    id: ActorId,
    damage: u32,
    hitstun_ms: u32,
) -> Result<Wound, OracleError> {
    let flash = ctx.config.hit_flash_frames;
    let actor = ctx
        .session
        .actors
        .get_mut(id)
        .ok_or(OracleError::ActorNotFound(id))?;

    let wound = actor.wound(damage);
    if wound == Wound::Ignored {
        return Ok(wound);
    }
    actor.stagger(hitstun_ms, flash);
    let hp = actor.hp;

    ctx.report.push(CombatEvent::ActorHit {
        actor: id,
        damage,
        hp,
    });

    if wound == Wound::Killed {
        death::resolve_death(ctx, id);
    }
    Ok(wound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tests::Fixture;
    use crate::env::Archetype;
    use crate::state::{AiState, Position};

    #[test]
    fn invulnerability_swallows_follow_up_hits() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.context();

        assert!(damage_player(&mut ctx, 3));
        assert_eq!(ctx.player.hp, 9);
        assert_eq!(ctx.player.i_frames_ms, 550);
        assert_eq!(ctx.player.hit_flash, 6);

        assert!(!damage_player(&mut ctx, 3));
        assert_eq!(ctx.player.hp, 9);
    }

    #[test]
    fn exact_zero_knocks_out() {
        let mut fixture = Fixture::new();
        fixture.player.hp = 2;
        let mut ctx = fixture.context();

        assert!(damage_player(&mut ctx, 5));
        assert_eq!(ctx.player.hp, 0);
        assert!(ctx.player.knocked_out);
        assert!(ctx.take_report().knocked_out());
    }

    #[test]
    fn three_hits_kill_a_three_hp_actor_once() {
        let mut fixture = Fixture::new();
        fixture.archetypes.insert(
            Archetype::builder("target")
                .hp(3)
                .on_death(death::DeathCommand::SetFlag("target_down".into()))
                .build(),
        );
        let id = fixture.spawn("target", Position::new(5, 5));
        let mut ctx = fixture.context();

        strike_actor(&mut ctx, id, 1, 140).unwrap();
        let after_second = strike_actor(&mut ctx, id, 1, 140).unwrap();
        assert_eq!(after_second, Wound::Survived { hp: 1 });
        assert_ne!(ctx.session.actors.get(id).unwrap().state, AiState::Dead);

        assert_eq!(strike_actor(&mut ctx, id, 1, 140).unwrap(), Wound::Killed);
        let actor = ctx.session.actors.get(id).unwrap();
        assert_eq!(actor.hp, 0);
        assert_eq!(actor.state, AiState::Dead);
        assert!(ctx.progress.has_flag("target_down"));

        assert_eq!(strike_actor(&mut ctx, id, 1, 140).unwrap(), Wound::Ignored);
        let report = ctx.take_report();
        let raised = report
            .events
            .iter()
            .filter(|event| matches!(event, CombatEvent::FlagRaised { .. }))
            .count();
        assert_eq!(raised, 1);
        assert_eq!(report.killed(), vec![id]);
    }

    #[test]
    fn unknown_actor_is_an_error() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.context();
        assert_eq!(
            strike_actor(&mut ctx, ActorId(99), 1, 140),
            Err(OracleError::ActorNotFound(ActorId(99)))
        );
    }
}
