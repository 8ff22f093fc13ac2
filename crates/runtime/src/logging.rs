//! Structured logging of tick reports.
//!
//! AI chatter goes to `debug`, world-changing outcomes to `info`, and spawn
//! records that could not be placed to `warn`.
use ironwood_core::{CombatEvent, TickReport};

/// Emits one `tracing` event per combat event in `report`.
pub fn log_report(map_id: &str, report: &TickReport) {
    for event in &report.events {
        log_event(map_id, event);
    }
    if let Some(status) = &report.status {
        tracing::debug!(map = map_id, status = status.as_str(), "status");
    }
    if let Some(toast) = &report.toast {
        tracing::info!(map = map_id, toast = toast.as_str(), "toast");
    }
}

pub fn log_event(map_id: &str, event: &CombatEvent) {
    let kind = event.kind();
    match event {
        CombatEvent::StateChanged { actor, from, to } => {
            tracing::debug!(map = map_id, kind, %actor, from = from.label(), to = to.label());
        }
        CombatEvent::TelegraphStarted { actor, aim } => {
            tracing::debug!(map = map_id, kind, %actor, ?aim);
        }
        CombatEvent::ProjectileFired {
            owner,
            origin,
            direction,
        } => {
            tracing::debug!(map = map_id, kind, ?owner, ?origin, %direction);
        }
        CombatEvent::ActorHit { actor, damage, hp } => {
            tracing::debug!(map = map_id, kind, %actor, damage, hp);
        }
        CombatEvent::PlayerHit { damage, hp } => {
            tracing::debug!(map = map_id, kind, damage, hp);
        }
        CombatEvent::ActorSpawned {
            actor,
            spawn_id,
            archetype,
            position,
        } => {
            tracing::info!(
                map = map_id,
                kind,
                %actor,
                spawn_id = spawn_id.as_str(),
                archetype = archetype.as_str(),
                x = position.x,
                y = position.y,
            );
        }
        CombatEvent::SpawnSkipped { spawn_id, reason } => {
            tracing::warn!(map = map_id, kind, spawn_id = spawn_id.as_str(), ?reason);
        }
        CombatEvent::ActorKilled { actor, archetype } => {
            tracing::info!(map = map_id, kind, %actor, archetype = archetype.as_str());
        }
        CombatEvent::PlayerKnockedOut => {
            tracing::info!(map = map_id, kind);
        }
        CombatEvent::ItemGranted { item, quantity } => {
            tracing::info!(map = map_id, kind, item = item.as_str(), quantity);
        }
        CombatEvent::GroundDrop { item, position } => {
            tracing::info!(
                map = map_id,
                kind,
                item = item.as_str(),
                x = position.x,
                y = position.y
            );
        }
        CombatEvent::MaxHpRaised { max_hp } => {
            tracing::info!(map = map_id, kind, max_hp);
        }
        CombatEvent::FlagRaised { flag } => {
            tracing::info!(map = map_id, kind, flag = flag.as_str());
        }
        CombatEvent::ObjectiveCompleted { quest, objective } => {
            tracing::info!(
                map = map_id,
                kind,
                quest = quest.as_str(),
                objective = objective.as_str()
            );
        }
        CombatEvent::QuestCompleted { quest } => {
            tracing::info!(map = map_id, kind, quest = quest.as_str());
        }
    }
}
