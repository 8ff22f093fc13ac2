use super::arena::ActorArena;
use super::common::Position;
use super::projectile::Projectile;

/// Pickup lying on a map tile, waiting for the player to walk over it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroundItem {
    pub item: String,
    pub quantity: u32,
    pub position: Position,
}

impl GroundItem {
    pub fn new(item: impl Into<String>, quantity: u32, position: Position) -> Self {
        Self {
            item: item.into(),
            quantity,
            position,
        }
    }
}

/// Everything combat tracks for one map: actors, in-flight projectiles and
/// ground pickups. Sessions for inactive maps are simply not ticked.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapSession {
    pub map_id: String,
    pub actors: ActorArena,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub projectiles: Vec<Projectile>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ground_items: Vec<GroundItem>,
    /// Set once the first full spawn pass has run.
    #[cfg_attr(feature = "serde", serde(default))]
    pub populated: bool,
}

impl MapSession {
    pub fn new(map_id: impl Into<String>) -> Self {
        Self {
            map_id: map_id.into(),
            ..Self::default()
        }
    }

    pub fn has_ground_item_at(&self, position: Position) -> bool {
        self.ground_items.iter().any(|item| item.position == position)
    }

    /// Removes and returns every ground item on `position`.
    pub fn take_ground_items_at(&mut self, position: Position) -> Vec<GroundItem> {
        let (taken, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.ground_items)
            .into_iter()
            .partition(|item| item.position == position);
        self.ground_items = kept;
        taken
    }

    pub fn live_projectiles(&self) -> usize {
        self.projectiles.iter().filter(|p| p.alive).count()
    }
}
