//! Frame driver owning all long-lived combat state.
//!
//! The core is pure and borrows everything it touches for a single frame. The
//! [`Simulation`] is the owner: it keeps the loaded content, the session of
//! every visited map, the player's state and the seeded random source, and
//! lends them to a [`CombatEngine`] once per call.

use std::collections::BTreeMap;

use ironwood_content::{ContentBundle, SpawnTable};
use ironwood_core::{
    ArchetypeTable, CombatConfig, CombatContext, CombatEngine, CombatEnv, FrameInput, GridMap,
    Inventory, MapSession, PlayerCombat, Position, QuestTable, TickReport, WorldProgress, death,
};

use crate::error::{Result, RuntimeError};
use crate::logging::log_report;
use crate::rng::StdCombatRng;
use crate::sessions::{SessionRegistry, SessionSnapshot};

/// Owns content, sessions and player state, and drives the core each frame.
pub struct Simulation {
    config: CombatConfig,
    archetypes: ArchetypeTable,
    quests: QuestTable,
    spawns: SpawnTable,
    maps: BTreeMap<String, GridMap>,

    sessions: SessionRegistry,
    active_map: Option<String>,
    player: PlayerCombat,
    inventory: Inventory,
    progress: WorldProgress,
    rng: StdCombatRng,
}

impl Simulation {
    /// Create a new simulation builder
    pub fn builder() -> SimulationBuilder {
        SimulationBuilder::new()
    }

    /// Makes `map_id` the active map and places the player on `spawn`.
    ///
    /// The first visit populates the map from its spawn list. Later visits
    /// only add flag-gated spawns that have become eligible. Returns the
    /// report of the spawn pass.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::UnknownMap`] if no map with that id was loaded.
    pub fn enter_map(&mut self, map_id: &str, spawn: Position) -> Result<TickReport> {
        if !self.maps.contains_key(map_id) {
            return Err(RuntimeError::UnknownMap(map_id.to_string()));
        }

        let first_visit = !self.sessions.contains(map_id);
        self.sessions.get_or_create(map_id);
        self.active_map = Some(map_id.to_string());
        self.player.position = spawn;

        let spawns = self.spawns.for_map(map_id).to_vec();
        let mut engine = CombatEngine::new(self.context()?);
        let placed = engine.populate(&spawns);
        let report = engine.take_report();

        tracing::info!(map = map_id, first_visit, placed, "entered map");
        log_report(map_id, &report);
        Ok(report)
    }

    /// Runs one frame on the active map.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::NoActiveMap`] before the first `enter_map`.
    pub fn update(&mut self, dt_ms: u32, input: FrameInput) -> Result<TickReport> {
        let map_id = self.active_map.clone().ok_or(RuntimeError::NoActiveMap)?;
        let report = CombatEngine::new(self.context()?).update(dt_ms, input);
        log_report(&map_id, &report);
        Ok(report)
    }

    /// Collects ground items on the player's tile.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::NoActiveMap`] before the first `enter_map`.
    pub fn pickup(&mut self) -> Result<TickReport> {
        let map_id = self.active_map.clone().ok_or(RuntimeError::NoActiveMap)?;
        let mut ctx = self.context()?;
        let position = ctx.player.position;
        for item in ctx.session.take_ground_items_at(position) {
            death::grant_item(&mut ctx, &item.item, item.quantity);
        }
        let report = ctx.take_report();
        log_report(&map_id, &report);
        Ok(report)
    }

    /// Clears a knockout. The player keeps their current map and position.
    pub fn revive(&mut self) {
        self.player.revive();
        tracing::info!(hp = self.player.hp, "player revived");
    }

    pub fn active_map(&self) -> Option<&str> {
        self.active_map.as_deref()
    }

    pub fn map(&self, map_id: &str) -> Option<&GridMap> {
        self.maps.get(map_id)
    }

    pub fn session(&self, map_id: &str) -> Option<&MapSession> {
        self.sessions.get(map_id)
    }

    pub fn active_session(&self) -> Option<&MapSession> {
        self.active_map
            .as_deref()
            .and_then(|map_id| self.sessions.get(map_id))
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub fn player(&self) -> &PlayerCombat {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerCombat {
        &mut self.player
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    /// World flags and quest progress. Dialogue and triggers write here.
    pub fn progress(&self) -> &WorldProgress {
        &self.progress
    }

    pub fn progress_mut(&mut self) -> &mut WorldProgress {
        &mut self.progress
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn archetypes(&self) -> &ArchetypeTable {
        &self.archetypes
    }

    /// Captures sessions and player state for the save system.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            active_map: self.active_map.clone(),
            sessions: self.sessions.snapshot(),
            player: self.player.clone(),
            inventory: self.inventory.clone(),
            progress: self.progress.clone(),
        }
    }

    pub fn export_json(&self) -> Result<String> {
        self.snapshot().to_json()
    }

    /// Replaces all mutable state with a previously exported snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::UnknownMap`] if the snapshot's active map or any
    /// of its sessions is not part of the loaded content.
    pub fn restore(&mut self, snapshot: SessionSnapshot) -> Result<()> {
        let unknown = snapshot
            .active_map
            .iter()
            .chain(snapshot.sessions.keys())
            .find(|map_id| !self.maps.contains_key(map_id.as_str()));
        if let Some(map_id) = unknown {
            return Err(RuntimeError::UnknownMap(map_id.clone()));
        }

        tracing::info!(
            sessions = snapshot.sessions.len(),
            active_map = snapshot.active_map.as_deref().unwrap_or("-"),
            "restoring sessions"
        );
        self.sessions.restore(snapshot.sessions);
        self.active_map = snapshot.active_map;
        self.player = snapshot.player;
        self.inventory = snapshot.inventory;
        self.progress = snapshot.progress;
        Ok(())
    }

    pub fn import_json(&mut self, json: &str) -> Result<()> {
        self.restore(SessionSnapshot::from_json(json)?)
    }

    fn context(&mut self) -> Result<CombatContext<'_>> {
        let map_id = self.active_map.as_deref().ok_or(RuntimeError::NoActiveMap)?;
        let map = self
            .maps
            .get(map_id)
            .ok_or_else(|| RuntimeError::UnknownMap(map_id.to_string()))?;
        let session = self
            .sessions
            .get_mut(map_id)
            .ok_or_else(|| RuntimeError::UnknownMap(map_id.to_string()))?;

        Ok(CombatContext::new(
            CombatEnv::new(&self.archetypes, map, &self.quests),
            &self.config,
            session,
            &mut self.player,
            &mut self.inventory,
            &mut self.progress,
            &mut self.rng,
        ))
    }
}

/// Builder for [`Simulation`].
pub struct SimulationBuilder {
    content: Option<ContentBundle>,
    player: PlayerCombat,
    inventory: Inventory,
    seed: Option<u64>,
}

impl SimulationBuilder {
    fn new() -> Self {
        Self {
            content: None,
            player: PlayerCombat::default(),
            inventory: Inventory::new(),
            seed: None,
        }
    }

    pub fn content(mut self, content: ContentBundle) -> Self {
        self.content = Some(content);
        self
    }

    pub fn player(mut self, player: PlayerCombat) -> Self {
        self.player = player;
        self
    }

    pub fn inventory(mut self, inventory: Inventory) -> Self {
        self.inventory = inventory;
        self
    }

    /// Fixes the random seed. Without one the generator is seeded from entropy.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<Simulation> {
        let content = self.content.ok_or(RuntimeError::MissingContent)?;
        let rng = match self.seed {
            Some(seed) => StdCombatRng::seeded(seed),
            None => StdCombatRng::from_entropy(),
        };

        tracing::debug!(
            archetypes = content.archetypes.len(),
            maps = content.maps.len(),
            seed = ?self.seed,
            "simulation built"
        );

        Ok(Simulation {
            config: content.config,
            archetypes: content.archetypes,
            quests: content.quests,
            spawns: content.spawns,
            maps: content.maps,
            sessions: SessionRegistry::new(),
            active_map: None,
            player: self.player,
            inventory: self.inventory,
            progress: WorldProgress::new(),
            rng,
        })
    }
}
