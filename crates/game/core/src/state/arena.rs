use super::actor::ActorInstance;
use super::common::{ActorId, Position};

/// Index-stable actor storage for one map.
///
/// Actors are appended and never removed; death is a state, not a removal, so
/// every [`ActorId`] handed out stays valid for the lifetime of the arena.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ActorArena {
    actors: Vec<ActorInstance>,
}

impl ActorArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, actor: ActorInstance) -> ActorId {
        let id = ActorId(self.actors.len() as u32);
        self.actors.push(actor);
        id
    }

    pub fn get(&self, id: ActorId) -> Option<&ActorInstance> {
        self.actors.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut ActorInstance> {
        self.actors.get_mut(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// All ids in insertion order. Collected so callers may mutate while iterating.
    pub fn ids(&self) -> Vec<ActorId> {
        (0..self.actors.len() as u32).map(ActorId).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ActorId, &ActorInstance)> {
        self.actors
            .iter()
            .enumerate()
            .map(|(index, actor)| (ActorId(index as u32), actor))
    }

    pub fn live(&self) -> impl Iterator<Item = (ActorId, &ActorInstance)> {
        self.iter().filter(|(_, actor)| actor.is_alive())
    }

    pub fn live_count(&self) -> usize {
        self.live().count()
    }

    pub fn find_by_spawn_id(&self, spawn_id: &str) -> Option<ActorId> {
        self.iter()
            .find(|(_, actor)| actor.spawn_id == spawn_id)
            .map(|(id, _)| id)
    }

    pub fn contains_spawn(&self, spawn_id: &str) -> bool {
        self.find_by_spawn_id(spawn_id).is_some()
    }

    /// First live actor standing on `position`, in arena order.
    pub fn live_at(&self, position: Position) -> Option<ActorId> {
        self.live()
            .find(|(_, actor)| actor.position == position)
            .map(|(id, _)| id)
    }

    /// Returns true if a live actor other than `except` stands on `position`.
    pub fn is_occupied(&self, position: Position, except: Option<ActorId>) -> bool {
        self.live()
            .any(|(id, actor)| Some(id) != except && actor.position == position)
    }
}
