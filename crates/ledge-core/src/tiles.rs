use serde::{Deserialize, Serialize};

use crate::grid::{Grid, GridError, PLATFORM};

/// What a level symbol stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Empty,
    /// Static ground; merged into hitboxes rather than spawned per cell.
    Platform,
    Coin,
    /// Spikes. Touching one loses the level.
    Hazard,
    /// Patrolling enemy that reverses on side collisions.
    Enemy,
    /// Level exit.
    Portal,
}

impl TileKind {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            ' ' => Some(Self::Empty),
            PLATFORM => Some(Self::Platform),
            '$' => Some(Self::Coin),
            '^' => Some(Self::Hazard),
            '>' => Some(Self::Enemy),
            '@' => Some(Self::Portal),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::Empty => ' ',
            Self::Platform => PLATFORM,
            Self::Coin => '$',
            Self::Hazard => '^',
            Self::Enemy => '>',
            Self::Portal => '@',
        }
    }

    /// Whether the physics layer treats this tile as an immovable body.
    pub fn is_static(self) -> bool {
        matches!(self, Self::Platform | Self::Hazard)
    }
}

/// A non-platform tile to be instantiated at a grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSpawn {
    pub kind: TileKind,
    pub x: u32,
    pub y: u32,
}

/// A parsed level: the raw grid plus every per-cell entity to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    pub grid: Grid,
    pub spawns: Vec<TileSpawn>,
}

impl Level {
    /// Validate `rows` and collect spawns in row-major order.
    ///
    /// Platform and empty cells produce no spawn. Unrecognised symbols are
    /// skipped.
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        let grid = Grid::from_rows(rows)?;
        let mut spawns = Vec::new();

        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let Some(symbol) = grid.get(x, y) else {
                    continue;
                };
                match TileKind::from_symbol(symbol) {
                    Some(TileKind::Empty | TileKind::Platform) => {},
                    Some(kind) => spawns.push(TileSpawn { kind, x, y }),
                    None => tracing::trace!(x, y, %symbol, "ignoring unknown level symbol"),
                }
            }
        }

        Ok(Self { grid, spawns })
    }

    pub fn spawns_of(&self, kind: TileKind) -> impl Iterator<Item = &TileSpawn> {
        self.spawns.iter().filter(move |s| s.kind == kind)
    }

    /// The first portal in scan order, if the level has an exit.
    pub fn portal(&self) -> Option<&TileSpawn> {
        self.spawns_of(TileKind::Portal).next()
    }
}
