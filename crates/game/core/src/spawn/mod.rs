//! Spawn manager: populates and incrementally extends a map's actor list.
//!
//! The first visit to a map runs every spawn record. Later visits only look at
//! flag-gated records whose spawn id is not yet in the arena, so a boss can
//! appear once its prerequisite flag is raised without anything already on the
//! map being reset, duplicated or resurrected.
mod placement;

pub use placement::find_open_tile;

use crate::engine::CombatContext;
use crate::event::{CombatEvent, SpawnSkip};
use crate::state::{ActorInstance, Position, WorldProgress};

/// Flag conditions attached to a spawn record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpawnGate {
    pub requires_flags: Vec<String>,
    pub requires_not_flags: Vec<String>,
}

impl SpawnGate {
    /// A record is conditional when it names any flag at all.
    pub fn is_conditional(&self) -> bool {
        !self.requires_flags.is_empty() || !self.requires_not_flags.is_empty()
    }

    pub fn is_open(&self, progress: &WorldProgress) -> bool {
        progress.satisfies(&self.requires_flags, &self.requires_not_flags)
    }
}

/// Where and under what conditions an actor should exist on a map.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnRecord {
    /// Stable id, unique per map.
    pub id: String,
    pub archetype: String,
    pub position: Position,
    #[cfg_attr(feature = "serde", serde(default))]
    pub gate: SpawnGate,
}

impl SpawnRecord {
    pub fn new(id: impl Into<String>, archetype: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            archetype: archetype.into(),
            position,
            gate: SpawnGate::default(),
        }
    }

    pub fn requires(mut self, flag: impl Into<String>) -> Self {
        self.gate.requires_flags.push(flag.into());
        self
    }

    pub fn requires_not(mut self, flag: impl Into<String>) -> Self {
        self.gate.requires_not_flags.push(flag.into());
        self
    }
}

/// Runs the spawn pass for the context's session and returns how many actors
/// were created.
///
/// Skips are silent apart from a [`CombatEvent::SpawnSkipped`] record: an
/// unknown archetype or a crowded neighbourhood simply produces no actor.
pub fn populate(ctx: &mut CombatContext<'_>, records: &[SpawnRecord]) -> usize {
    let incremental = ctx.session.populated;
    let mut spawned = 0;

    for record in records {
        if incremental && !record.gate.is_conditional() {
            continue;
        }
        if ctx.session.actors.contains_spawn(&record.id) {
            continue;
        }
        if !record.gate.is_open(ctx.progress) {
            continue;
        }
        if place(ctx, record) {
            spawned += 1;
        }
    }

    ctx.session.populated = true;
    spawned
}

fn place(ctx: &mut CombatContext<'_>, record: &SpawnRecord) -> bool {
    let env = ctx.env;
    let Some(archetype) = env.archetypes().archetype(&record.archetype) else {
        ctx.report.push(CombatEvent::SpawnSkipped {
            spawn_id: record.id.clone(),
            reason: SpawnSkip::UnknownArchetype,
        });
        return false;
    };

    let Some(position) = find_open_tile(
        env.map(),
        &ctx.session.actors,
        ctx.player.position,
        record.position,
        ctx.config.spawn_search_radius,
    ) else {
        ctx.report.push(CombatEvent::SpawnSkipped {
            spawn_id: record.id.clone(),
            reason: SpawnSkip::NoOpenTile,
        });
        return false;
    };

    let actor = ctx
        .session
        .actors
        .insert(ActorInstance::spawn(record.id.clone(), archetype, position));
    ctx.report.push(CombatEvent::ActorSpawned {
        actor,
        spawn_id: record.id.clone(),
        archetype: archetype.id.clone(),
        position,
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tests::Fixture;
    use crate::env::Archetype;
    use crate::state::AiState;
    use std::collections::HashSet;

    fn boss_fixture() -> Fixture {
        let mut fixture = Fixture::new();
        fixture.archetypes.insert(Archetype::builder("wolf").hp(3).build());
        fixture
            .archetypes
            .insert(Archetype::builder("deacon").hp(14).build());
        fixture
    }

    fn records() -> Vec<SpawnRecord> {
        vec![
            SpawnRecord::new("w1", "wolf", Position::new(6, 6)),
            SpawnRecord::new("w2", "wolf", Position::new(6, 6)),
            SpawnRecord::new("ghost", "missing", Position::new(2, 2)),
            SpawnRecord::new("boss", "deacon", Position::new(9, 9))
                .requires("prereq")
                .requires_not("boss_down"),
        ]
    }

    #[test]
    fn first_pass_places_without_collisions() {
        let mut fixture = boss_fixture();
        fixture.player.position = Position::new(6, 5);
        let mut ctx = fixture.context();

        let mut all = records();
        all.push(SpawnRecord::new("w3", "wolf", Position::new(6, 5)));
        assert_eq!(populate(&mut ctx, &all), 3);

        let mut tiles = HashSet::new();
        for (_, actor) in ctx.session.actors.live() {
            assert_ne!(actor.position, ctx.player.position);
            assert!(tiles.insert(actor.position), "two actors share a tile");
            assert_eq!(actor.state, AiState::Patrol);
            assert_eq!(actor.hp, 3);
        }
        let skipped = ctx
            .take_report()
            .events
            .into_iter()
            .filter(|event| matches!(event, CombatEvent::SpawnSkipped { .. }))
            .count();
        assert_eq!(skipped, 1);
    }

    #[test]
    fn gated_spawn_appears_later_without_touching_existing_actors() {
        let mut fixture = boss_fixture();
        let mut ctx = fixture.context();
        populate(&mut ctx, &records());
        assert!(!ctx.session.actors.contains_spawn("boss"));

        let w1 = ctx.session.actors.find_by_spawn_id("w1").unwrap();
        ctx.session.actors.get_mut(w1).unwrap().mark_dead();
        let before = ctx.session.actors.len();

        ctx.progress.set_flag("prereq");
        assert_eq!(populate(&mut ctx, &records()), 1);
        assert_eq!(ctx.session.actors.len(), before + 1);
        assert!(!ctx.session.actors.get(w1).unwrap().is_alive());

        // Re-entering never duplicates.
        assert_eq!(populate(&mut ctx, &records()), 0);
    }

    #[test]
    fn defeated_flag_keeps_boss_away() {
        let mut fixture = boss_fixture();
        fixture.progress.set_flag("prereq");
        fixture.progress.set_flag("boss_down");
        let mut ctx = fixture.context();
        populate(&mut ctx, &records());
        assert!(!ctx.session.actors.contains_spawn("boss"));
    }
}
