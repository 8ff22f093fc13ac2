use crate::env::MapOracle;
use crate::state::{Direction, Position};

/// Axis-greedy step toward the player, or away from it when retreating.
pub fn chase_direction(from: Position, player: Position, retreat: bool) -> Direction {
    let toward = Direction::dominant_axis(player.x - from.x, player.y - from.y);
    if retreat { toward.opposite() } else { toward }
}

/// Moves `position` one tile along `direction` if the destination is walkable
/// and not the player's tile. Returns true if the step happened.
pub fn try_step(
    map: &dyn MapOracle,
    position: &mut Position,
    direction: Direction,
    player: Position,
) -> bool {
    let next = position.step(direction);
    if next == player || !map.is_walkable(next) {
        return false;
    }
    *position = next;
    true
}
