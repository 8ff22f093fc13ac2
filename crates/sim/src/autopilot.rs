//! Scripted player input for headless runs.
//!
//! The autopilot walks toward the nearest live actor, swings when adjacent and
//! shoots when lined up with a loaded firearm.
use ironwood_core::combat::select_firearm;
use ironwood_core::{Direction, FrameInput, MapOracle, Position};
use ironwood_runtime::Simulation;

#[derive(Debug, Default)]
pub struct Autopilot {
    step_timer_ms: u32,
    fire_timer_ms: u32,
}

impl Autopilot {
    /// Time between player steps.
    pub const STEP_INTERVAL_MS: u32 = 200;
    /// Minimum time between shots.
    pub const FIRE_INTERVAL_MS: u32 = 450;

    pub fn new() -> Self {
        Self::default()
    }

    /// Picks this frame's input, turning and moving the player as a side effect.
    pub fn next_input(&mut self, sim: &mut Simulation, dt_ms: u32) -> FrameInput {
        self.step_timer_ms = self.step_timer_ms.saturating_add(dt_ms);
        self.fire_timer_ms = self.fire_timer_ms.saturating_add(dt_ms);

        if sim.player().knocked_out {
            return FrameInput::IDLE;
        }
        let origin = sim.player().position;
        let Some(target) = nearest_live_actor(sim, origin) else {
            return FrameInput::IDLE;
        };

        let (dx, dy) = (target.x - origin.x, target.y - origin.y);
        let facing = Direction::dominant_axis(dx, dy);
        sim.player_mut().facing = facing;

        if origin.manhattan(target) == 1 {
            return FrameInput::melee();
        }
        if (dx == 0 || dy == 0) && can_shoot(sim) && self.fire_timer_ms >= Self::FIRE_INTERVAL_MS {
            self.fire_timer_ms = 0;
            return FrameInput::ranged();
        }

        if self.step_timer_ms >= Self::STEP_INTERVAL_MS {
            self.step_timer_ms = 0;
            step_toward(sim, origin, dx, dy, facing);
        }
        FrameInput::IDLE
    }
}

fn nearest_live_actor(sim: &Simulation, origin: Position) -> Option<Position> {
    sim.active_session()?
        .actors
        .live()
        .map(|(_, actor)| actor.position)
        .min_by_key(|position| origin.manhattan(*position))
}

fn can_shoot(sim: &Simulation) -> bool {
    let weapons = &sim.config().weapons;
    select_firearm(weapons, sim.inventory()).is_some() && sim.inventory().contains(&weapons.ammo_item)
}

/// Tries the facing axis first, then the other one.
fn step_toward(sim: &mut Simulation, origin: Position, dx: i32, dy: i32, facing: Direction) {
    let secondary = if facing.delta().0 != 0 {
        (dy != 0).then(|| Direction::dominant_axis(0, dy))
    } else {
        (dx != 0).then(|| Direction::dominant_axis(dx, 0))
    };

    let next = std::iter::once(facing)
        .chain(secondary)
        .map(|direction| origin.step(direction))
        .find(|tile| is_free(sim, *tile));
    if let Some(tile) = next {
        sim.player_mut().position = tile;
    }
}

fn is_free(sim: &Simulation, tile: Position) -> bool {
    let walkable = sim
        .active_map()
        .and_then(|map_id| sim.map(map_id))
        .is_some_and(|map| map.is_walkable(tile));
    let occupied = sim
        .active_session()
        .is_some_and(|session| session.actors.live_at(tile).is_some());
    walkable && !occupied
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironwood_content::ContentFactory;
    use std::path::PathBuf;

    fn boss_room() -> Simulation {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../game/content/data");
        let content = ContentFactory::new(dir).load_bundle().unwrap();
        let mut sim = Simulation::builder().content(content).seed(1).build().unwrap();
        sim.enter_map("quarry_boss_room", Position::new(8, 10)).unwrap();
        sim
    }

    #[test]
    fn swings_when_adjacent() {
        let mut sim = boss_room();
        sim.player_mut().position = Position::new(8, 7);

        let input = Autopilot::new().next_input(&mut sim, 16);
        assert_eq!(input, FrameInput::melee());
        assert_eq!(sim.player().facing, Direction::Up);
    }

    #[test]
    fn walks_toward_the_nearest_actor() {
        let mut sim = boss_room();
        sim.player_mut().position = Position::new(8, 9);
        let mut pilot = Autopilot::new();

        let input = pilot.next_input(&mut sim, Autopilot::STEP_INTERVAL_MS);
        assert_eq!(input, FrameInput::IDLE);
        assert_eq!(sim.player().position, Position::new(8, 8));
    }
}
