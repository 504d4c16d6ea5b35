//! Eight-way movement directions
//!
//! Every direction carries a world-space step (Y up) and the sprite sheet row
//! that animates it. East and west steps are twice as long as north and
//! south ones, and the diagonals are flattened; movement feels right with
//! these numbers, so keep them exact.

use glam::DVec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    S,
    SW,
    W,
    NW,
    N,
    NE,
    E,
    SE,
}

struct DirectionInfo {
    step: DVec2,
    row: usize,
}

/// Indexed by `Direction as usize`, in clockwise order starting at south
const TABLE: [DirectionInfo; 8] = [
    DirectionInfo { step: DVec2::new(0.0, -1.0), row: 0 },
    DirectionInfo { step: DVec2::new(-1.3, -0.6), row: 1 },
    DirectionInfo { step: DVec2::new(-2.0, 0.0), row: 2 },
    DirectionInfo { step: DVec2::new(-1.3, 0.6), row: 3 },
    DirectionInfo { step: DVec2::new(0.0, 1.0), row: 4 },
    DirectionInfo { step: DVec2::new(1.3, 0.6), row: 3 },
    DirectionInfo { step: DVec2::new(2.0, 0.0), row: 2 },
    DirectionInfo { step: DVec2::new(1.3, -0.6), row: 1 },
];

impl Direction {
    /// All directions, clockwise from south
    pub const ALL: [Direction; 8] = [
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
    ];

    /// Movement per unit of speed per second
    #[inline]
    pub fn step(self) -> DVec2 {
        TABLE[self as usize].step
    }

    /// Sprite sheet row for this direction. Mirrored pairs share a row.
    #[inline]
    pub fn row(self) -> usize {
        TABLE[self as usize].row
    }

    /// Next direction clockwise: S → SW → W → NW → N → NE → E → SE → S
    #[inline]
    pub fn rotate_clockwise(self) -> Direction {
        Self::ALL[(self as usize + 1) % Self::ALL.len()]
    }

    /// Sprite facing for this direction.
    ///
    /// Sprites are drawn facing west, so eastward directions flip them.
    /// Straight north or south keeps whatever facing the entity had.
    pub fn facing(self) -> Option<f64> {
        match self {
            Direction::SW | Direction::W | Direction::NW => Some(1.0),
            Direction::NE | Direction::E | Direction::SE => Some(-1.0),
            Direction::S | Direction::N => None,
        }
    }

    /// Combine a horizontal and a vertical intent into one direction.
    ///
    /// `horizontal` is -1 (west), 0 or 1 (east); `vertical` is -1 (south), 0
    /// or 1 (north). Returns `None` when both are zero.
    pub fn from_axes(horizontal: i8, vertical: i8) -> Option<Direction> {
        let dir = match (horizontal.signum(), vertical.signum()) {
            (-1, -1) => Direction::SW,
            (-1, 1) => Direction::NW,
            (-1, _) => Direction::W,
            (1, -1) => Direction::SE,
            (1, 1) => Direction::NE,
            (1, _) => Direction::E,
            (_, -1) => Direction::S,
            (_, 1) => Direction::N,
            _ => return None,
        };
        Some(dir)
    }
}
