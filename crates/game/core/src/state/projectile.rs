use super::common::{Direction, Position};
use crate::env::ProjectileSpec;

/// Side that fired a projectile; determines what it can hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProjectileOwner {
    Player,
    Enemy,
}

/// In-flight projectile with continuous tile coordinates.
///
/// Projectiles are runtime-only and never persisted with a session.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub direction: Direction,
    /// Tiles per second.
    pub speed: f32,
    /// Tiles left before the projectile expires.
    pub remaining: f32,
    pub damage: u32,
    pub hitstun_ms: u32,
    pub owner: ProjectileOwner,
    pub alive: bool,
}

impl Projectile {
    /// Spawns at the centre of `origin`.
    pub fn fire(
        origin: Position,
        direction: Direction,
        spec: &ProjectileSpec,
        owner: ProjectileOwner,
    ) -> Self {
        Self {
            x: origin.x as f32 + 0.5,
            y: origin.y as f32 + 0.5,
            direction,
            speed: spec.speed,
            remaining: spec.max_range,
            damage: spec.damage,
            hitstun_ms: spec.hitstun_ms,
            owner,
            alive: true,
        }
    }

    /// Tile under the projectile's current coordinates.
    pub fn tile(&self) -> Position {
        Position::new(self.x.floor() as i32, self.y.floor() as i32)
    }

    /// Coordinates after travelling `distance` tiles.
    pub fn ahead(&self, distance: f32) -> (f32, f32) {
        let (dx, dy) = self.direction.delta();
        (self.x + dx as f32 * distance, self.y + dy as f32 * distance)
    }
}
