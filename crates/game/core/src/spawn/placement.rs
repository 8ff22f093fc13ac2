use crate::env::MapOracle;
use crate::state::{ActorArena, Position};

/// Finds the tile an actor should be placed on.
///
/// The desired tile wins when it is spawnable and free of the player and live
/// actors. Otherwise Chebyshev rings of growing radius are scanned row by row
/// (`dy` outer, `dx` inner, both from `-r`) and the first open tile is taken.
/// Returns `None` when nothing within `radius` is open.
pub fn find_open_tile(
    map: &dyn MapOracle,
    actors: &ActorArena,
    player: Position,
    desired: Position,
    radius: i32,
) -> Option<Position> {
    let is_open = |tile: Position| {
        tile != player && map.is_spawnable(tile) && !actors.is_occupied(tile, None)
    };

    (0..=radius.max(0)).find_map(|r| {
        (-r..=r)
            .flat_map(|dy| (-r..=r).map(move |dx| (dx, dy)))
            .filter(|(dx, dy)| dx.abs().max(dy.abs()) == r)
            .map(|(dx, dy)| desired.offset(dx, dy))
            .find(|tile| is_open(*tile))
    })
}
