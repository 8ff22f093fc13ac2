use crate::combat::AttackError;
use crate::config::CombatConfig;
use crate::env::{CombatEnv, CombatRng};
use crate::event::CombatEvent;
use crate::state::{ActorId, GroundItem, Inventory, MapSession, PlayerCombat, WorldProgress};

/// Everything a tick may read or mutate, scoped to the active map.
///
/// The runtime assembles one context per frame from the session registry and
/// its long-lived player state, then drops it when the tick ends.
pub struct CombatContext<'a> {
    pub env: CombatEnv<'a>,
    pub config: &'a CombatConfig,
    pub session: &'a mut MapSession,
    pub player: &'a mut PlayerCombat,
    pub inventory: &'a mut Inventory,
    pub progress: &'a mut WorldProgress,
    pub rng: &'a mut dyn CombatRng,
    pub(crate) report: TickReport,
}

impl<'a> CombatContext<'a> {
    pub fn new(
        env: CombatEnv<'a>,
        config: &'a CombatConfig,
        session: &'a mut MapSession,
        player: &'a mut PlayerCombat,
        inventory: &'a mut Inventory,
        progress: &'a mut WorldProgress,
        rng: &'a mut dyn CombatRng,
    ) -> Self {
        Self {
            env,
            config,
            session,
            player,
            inventory,
            progress,
            rng,
            report: TickReport::default(),
        }
    }

    /// Events and status accumulated since the last call.
    pub fn take_report(&mut self) -> TickReport {
        std::mem::take(&mut self.report)
    }

    pub fn report(&self) -> &TickReport {
        &self.report
    }
}

/// Output of one frame for presentation and logging.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub events: Vec<CombatEvent>,
    /// Short status line, e.g. `Defeated Coyote!`. Last write wins.
    pub status: Option<String>,
    /// Transient toast, e.g. `Drops fell to the ground.`.
    pub toast: Option<String>,
    /// Player attack rejected this frame.
    pub rejected: Option<AttackError>,
}

impl TickReport {
    pub(crate) fn push(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    pub(crate) fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    pub(crate) fn set_toast(&mut self, toast: impl Into<String>) {
        self.toast = Some(toast.into());
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.status.is_none() && self.toast.is_none()
    }

    /// Actors killed during the frame, in kill order.
    pub fn killed(&self) -> Vec<ActorId> {
        self.events
            .iter()
            .filter_map(|event| match event {
                CombatEvent::ActorKilled { actor, .. } => Some(*actor),
                _ => None,
            })
            .collect()
    }

    /// Ground pickups created during the frame.
    pub fn ground_drops(&self) -> Vec<GroundItem> {
        self.events
            .iter()
            .filter_map(|event| match event {
                CombatEvent::GroundDrop { item, position } => {
                    Some(GroundItem::new(item.clone(), 1, *position))
                }
                _ => None,
            })
            .collect()
    }

    pub fn knocked_out(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event, CombatEvent::PlayerKnockedOut))
    }
}
