//! Structured record of what happened during a tick.
//!
//! The engine never logs. It appends events to the tick report instead, and the
//! runtime decides how to trace them. Tests assert on events rather than on
//! intermediate state.
use crate::state::{ActorId, AiState, Aim, Direction, Position, ProjectileOwner};

/// Why a spawn record did not produce an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnSkip {
    UnknownArchetype,
    NoOpenTile,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CombatEvent {
    ActorSpawned {
        actor: ActorId,
        spawn_id: String,
        archetype: String,
        position: Position,
    },
    SpawnSkipped {
        spawn_id: String,
        reason: SpawnSkip,
    },
    StateChanged {
        actor: ActorId,
        from: AiState,
        to: AiState,
    },
    TelegraphStarted {
        actor: ActorId,
        aim: Aim,
    },
    ProjectileFired {
        owner: ProjectileOwner,
        origin: Position,
        direction: Direction,
    },
    ActorHit {
        actor: ActorId,
        damage: u32,
        hp: u32,
    },
    ActorKilled {
        actor: ActorId,
        archetype: String,
    },
    PlayerHit {
        damage: u32,
        hp: u32,
    },
    PlayerKnockedOut,
    ItemGranted {
        item: String,
        quantity: u32,
    },
    GroundDrop {
        item: String,
        position: Position,
    },
    MaxHpRaised {
        max_hp: u32,
    },
    FlagRaised {
        flag: String,
    },
    ObjectiveCompleted {
        quest: String,
        objective: String,
    },
    QuestCompleted {
        quest: String,
    },
}

impl CombatEvent {
    /// Short machine-friendly name used as a tracing field.
    pub const fn kind(&self) -> &'static str {
        match self {
            CombatEvent::ActorSpawned { .. } => "actor_spawned",
            CombatEvent::SpawnSkipped { .. } => "spawn_skipped",
            CombatEvent::StateChanged { .. } => "state_changed",
            CombatEvent::TelegraphStarted { .. } => "telegraph_started",
            CombatEvent::ProjectileFired { .. } => "projectile_fired",
            CombatEvent::ActorHit { .. } => "actor_hit",
            CombatEvent::ActorKilled { .. } => "actor_killed",
            CombatEvent::PlayerHit { .. } => "player_hit",
            CombatEvent::PlayerKnockedOut => "player_knocked_out",
            CombatEvent::ItemGranted { .. } => "item_granted",
            CombatEvent::GroundDrop { .. } => "ground_drop",
            CombatEvent::MaxHpRaised { .. } => "max_hp_raised",
            CombatEvent::FlagRaised { .. } => "flag_raised",
            CombatEvent::ObjectiveCompleted { .. } => "objective_completed",
            CombatEvent::QuestCompleted { .. } => "quest_completed",
        }
    }
}
