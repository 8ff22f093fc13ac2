use crate::state::Position;

/// Effective map oracle exposing the tile grid and exit pads of the active map.
///
/// The grid handed to the engine is already the post-reactivity view: flag
/// driven patches have been applied by the caller.
pub trait MapOracle: Send + Sync {
    fn dimensions(&self) -> MapDimensions;
    fn terrain(&self, position: Position) -> Option<TerrainKind>;

    /// Returns true if `position` is listed as an exit pad.
    fn is_exit(&self, position: Position) -> bool;

    fn contains(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }

    /// Whether an actor or projectile may occupy `position`.
    fn is_walkable(&self, position: Position) -> bool {
        self.terrain(position).is_some_and(TerrainKind::is_walkable)
    }

    /// Whether an actor may be placed on `position` at spawn time. Exit pads
    /// are excluded so a spawn can never block a map transition.
    fn is_spawnable(&self, position: Position) -> bool {
        match self.terrain(position) {
            Some(TerrainKind::ExitPad) | None => false,
            Some(terrain) => terrain.is_walkable() && !self.is_exit(position),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Terrain classes decoded from the numeric tile codes used by map files.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    Ground,
    Wall,
    /// Threshold tile painted under exits.
    ExitPad,
    Decor,
    /// Buildings and other solid props; codes 4 and above.
    Solid(u16),
}

impl TerrainKind {
    pub const fn from_code(code: u16) -> Self {
        match code {
            0 => TerrainKind::Ground,
            1 => TerrainKind::Wall,
            2 => TerrainKind::ExitPad,
            3 => TerrainKind::Decor,
            other => TerrainKind::Solid(other),
        }
    }

    pub const fn code(self) -> u16 {
        match self {
            TerrainKind::Ground => 0,
            TerrainKind::Wall => 1,
            TerrainKind::ExitPad => 2,
            TerrainKind::Decor => 3,
            TerrainKind::Solid(code) => code,
        }
    }

    pub const fn is_walkable(self) -> bool {
        !matches!(self, TerrainKind::Wall | TerrainKind::Solid(_))
    }
}

/// Row-major tile grid with an exit list.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridMap {
    id: String,
    dimensions: MapDimensions,
    tiles: Vec<u16>,
    exits: Vec<Position>,
}

impl GridMap {
    /// Builds a map from row-major tile codes. Returns `None` when the row count
    /// or any row width disagrees with the dimensions.
    pub fn from_rows(id: impl Into<String>, rows: &[Vec<u16>], exits: Vec<Position>) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }

        Some(Self {
            id: id.into(),
            dimensions: MapDimensions::new(width as u32, height as u32),
            tiles: rows.iter().flatten().copied().collect(),
            exits,
        })
    }

    /// An all-ground map of the given size with no exits.
    pub fn open(id: impl Into<String>, width: u32, height: u32) -> Self {
        let dimensions = MapDimensions::new(width, height);
        Self {
            id: id.into(),
            dimensions,
            tiles: vec![TerrainKind::Ground.code(); dimensions.area()],
            exits: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn exits(&self) -> &[Position] {
        &self.exits
    }

    /// Overwrites one tile; out-of-bounds writes are ignored.
    pub fn set_terrain(&mut self, position: Position, terrain: TerrainKind) {
        if let Some(index) = self.index(position) {
            self.tiles[index] = terrain.code();
        }
    }

    pub fn add_exit(&mut self, position: Position) {
        self.exits.push(position);
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.dimensions.contains(position).then(|| {
            position.y as usize * self.dimensions.width as usize + position.x as usize
        })
    }
}

impl MapOracle for GridMap {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn terrain(&self, position: Position) -> Option<TerrainKind> {
        self.index(position)
            .and_then(|index| self.tiles.get(index))
            .map(|code| TerrainKind::from_code(*code))
    }

    fn is_exit(&self, position: Position) -> bool {
        self.exits.contains(&position)
    }
}
