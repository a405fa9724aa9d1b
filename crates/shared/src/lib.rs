use serde::{Deserialize, Serialize};

/// Identifier of a persisted world
pub type WorldId = String;

/// A discrete position on the ground grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    pub x: i32,
    pub z: i32,
}

impl GridCell {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The cell one step away in the given direction, or None past the edge of the grid
    pub fn neighbor(self, side: Side) -> Option<Self> {
        let (dx, dz) = side.offset();
        Some(Self::new(self.x.checked_add(dx)?, self.z.checked_add(dz)?))
    }
}

impl From<(i32, i32)> for GridCell {
    fn from((x, z): (i32, i32)) -> Self {
        Self::new(x, z)
    }
}

/// Cardinal direction on the ground grid.
///
/// North is toward negative z, east toward positive x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    North,
    East,
    South,
    West,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::North, Side::South, Side::West, Side::East];

    /// Grid offset `(dx, dz)` toward this side
    pub fn offset(self) -> (i32, i32) {
        match self {
            Side::North => (0, -1),
            Side::East => (1, 0),
            Side::South => (0, 1),
            Side::West => (-1, 0),
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::North => Side::South,
            Side::East => Side::West,
            Side::South => Side::North,
            Side::West => Side::East,
        }
    }

    /// True for sides whose beam runs along the z axis
    pub fn is_north_south(self) -> bool {
        matches!(self, Side::North | Side::South)
    }
}

/// Persisted form of an occupied cell.
///
/// The side flags are filled in by mesh generation and record whether a
/// connecting beam exists toward that neighbor. They are recomputed on every
/// generation; readers must not rely on stored values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallCell {
    pub x: i32,
    pub z: i32,
    #[serde(default)]
    pub north: bool,
    #[serde(default)]
    pub east: bool,
    #[serde(default)]
    pub south: bool,
    #[serde(default)]
    pub west: bool,
}

impl WallCell {
    /// Cell with every side flag cleared
    pub fn bare(x: i32, z: i32) -> Self {
        Self {
            x,
            z,
            north: false,
            east: false,
            south: false,
            west: false,
        }
    }

    pub fn cell(&self) -> GridCell {
        GridCell::new(self.x, self.z)
    }

    pub fn at(&self, x: i32, z: i32) -> bool {
        self.x == x && self.z == z
    }

    pub fn side(&self, side: Side) -> bool {
        match side {
            Side::North => self.north,
            Side::East => self.east,
            Side::South => self.south,
            Side::West => self.west,
        }
    }

    pub fn set_side(&mut self, side: Side, value: bool) {
        match side {
            Side::North => self.north = value,
            Side::East => self.east = value,
            Side::South => self.south = value,
            Side::West => self.west = value,
        }
    }

    /// Number of sides flagged as connected
    pub fn connection_count(&self) -> usize {
        Side::ALL.iter().filter(|s| self.side(**s)).count()
    }
}

impl From<GridCell> for WallCell {
    fn from(cell: GridCell) -> Self {
        Self::bare(cell.x, cell.z)
    }
}

/// What a click in the viewport does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EditMode {
    #[default]
    #[serde(rename = "WALL_ADD")]
    WallAdd,
    #[serde(rename = "WALL_DELETE")]
    WallDelete,
    /// Reserved for furniture deletion; has no effect on walls
    #[serde(rename = "DELETE")]
    Delete,
}

impl EditMode {
    pub fn all() -> &'static [EditMode] {
        &[EditMode::WallAdd, EditMode::WallDelete, EditMode::Delete]
    }
}

/// Index entry for a persisted world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldInfo {
    pub name: String,
    /// Creation time, milliseconds since the Unix epoch
    pub created: u64,
}

/// Stored wall layout of a world
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldData {
    #[serde(default)]
    pub walls: Vec<WallCell>,
}

/// Self-contained world file used for sharing between installations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldExport {
    pub name: String,
    #[serde(default)]
    pub walls: Vec<WallCell>,
}
