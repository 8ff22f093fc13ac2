use std::fmt;

use strum::{AsRefStr, Display, EnumString};

/// Stable index of an actor inside an [`ActorArena`](super::ActorArena).
///
/// Ids are never reused: dead actors keep their slot so drop placement,
/// hit-testing and save data can address them by a plain integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(pub u32);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.offset(dx, dy)
    }

    /// Manhattan distance in tiles.
    pub const fn manhattan(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Cardinal facing used by the player, actor steps and projectile flight.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Direction {
    /// Patrol roll order: a uniform index into this table picks the step.
    pub const CARDINALS: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
    ];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Unit step along the axis with the larger absolute offset; ties go to x,
    /// and a non-positive x offset points left.
    ///
    /// A zero offset has no direction and yields [`Direction::Left`].
    pub const fn dominant_axis(dx: i32, dy: i32) -> Self {
        if dx.abs() >= dy.abs() {
            if dx > 0 { Direction::Right } else { Direction::Left }
        } else if dy > 0 {
            Direction::Down
        } else {
            Direction::Up
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dominant_axis_prefers_x_on_ties() {
        assert_eq!(Direction::dominant_axis(2, 2), Direction::Right);
        assert_eq!(Direction::dominant_axis(-2, 2), Direction::Left);
        assert_eq!(Direction::dominant_axis(1, -3), Direction::Up);
    }

    #[test]
    fn dominant_axis_of_zero_offset_is_left() {
        assert_eq!(Direction::dominant_axis(0, 0), Direction::Left);
        assert_eq!(Direction::dominant_axis(0, 0).delta(), (-1, 0));
    }

    #[test]
    fn manhattan_distance() {
        let a = Position::new(3, 4);
        assert_eq!(a.manhattan(Position::new(1, 7)), 5);
        assert_eq!(a.step(Direction::Up), Position::new(3, 3));
    }
}
