//! Per-map session registry.
//!
//! A session is created the first time its map is entered and lives for the
//! rest of the run, so leaving a map freezes its actors instead of discarding
//! them. Projectiles are transient and never persisted.
use std::collections::{BTreeMap, HashMap};

use ironwood_core::{Inventory, MapSession, PlayerCombat, WorldProgress};
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Clone, Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<String, MapSession>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, map_id: &str) -> Option<&MapSession> {
        self.sessions.get(map_id)
    }

    pub fn get_mut(&mut self, map_id: &str) -> Option<&mut MapSession> {
        self.sessions.get_mut(map_id)
    }

    /// Returns the session for `map_id`, creating an empty one on first visit.
    pub fn get_or_create(&mut self, map_id: &str) -> &mut MapSession {
        self.sessions
            .entry(map_id.to_string())
            .or_insert_with(|| MapSession::new(map_id))
    }

    pub fn contains(&self, map_id: &str) -> bool {
        self.sessions.contains_key(map_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn map_ids(&self) -> impl Iterator<Item = &str> {
        self.sessions.keys().map(String::as_str)
    }

    /// Copies every session into a map ordered by id.
    pub fn snapshot(&self) -> BTreeMap<String, MapSession> {
        self.sessions
            .iter()
            .map(|(id, session)| (id.clone(), session.clone()))
            .collect()
    }

    /// Replaces the registry contents.
    pub fn restore(&mut self, sessions: BTreeMap<String, MapSession>) {
        self.sessions = sessions.into_iter().collect();
    }
}

/// Serializable view of everything combat leaves behind: actor lists, ground
/// items, player combat state, inventory and world progress.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub active_map: Option<String>,
    pub sessions: BTreeMap<String, MapSession>,
    pub player: PlayerCombat,
    pub inventory: Inventory,
    pub progress: WorldProgress,
}

impl SessionSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironwood_core::{
        ActorInstance, Archetype, Direction, Position, Projectile, ProjectileOwner, ProjectileSpec,
    };

    #[test]
    fn first_visit_creates_later_visits_reuse() {
        let mut registry = SessionRegistry::new();
        registry.get_or_create("quarry_floor1").populated = true;
        assert!(registry.get_or_create("quarry_floor1").populated);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn json_round_trip_drops_projectiles() {
        let archetype = Archetype::builder("wolf").hp(3).build();
        let mut registry = SessionRegistry::new();
        let session = registry.get_or_create("quarry_floor1");
        let id = session
            .actors
            .insert(ActorInstance::spawn("q1_wolf_01", &archetype, Position::new(3, 4)));
        session.actors.get_mut(id).unwrap().hp = 1;
        session.projectiles.push(Projectile::fire(
            Position::new(1, 1),
            Direction::Right,
            &ProjectileSpec::ENEMY_DEFAULT,
            ProjectileOwner::Enemy,
        ));

        let snapshot = SessionSnapshot {
            active_map: Some("quarry_floor1".into()),
            sessions: registry.snapshot(),
            ..SessionSnapshot::default()
        };
        let restored = SessionSnapshot::from_json(&snapshot.to_json().unwrap()).unwrap();

        let session = &restored.sessions["quarry_floor1"];
        assert_eq!(session.actors.get(id).unwrap().hp, 1);
        assert_eq!(session.actors.get(id).unwrap().spawn_id, "q1_wolf_01");
        assert!(session.projectiles.is_empty());
        assert_eq!(restored.active_map.as_deref(), Some("quarry_floor1"));
    }
}
