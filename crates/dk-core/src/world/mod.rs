//! World geometry: coordinates, directions, positions

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

mod level;

pub use level::{Cell, Level};

/// Identifier of one map level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelId(pub u32);

/// Eight-way direction, in the engine's fixed enumeration order.
///
/// Neighbor scans (portal fallback, creature landing) walk this order,
/// so it is part of observable behavior and must not be reordered.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Dir8 {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Dir8 {
    pub const ALL: [Dir8; 8] = [
        Dir8::North,
        Dir8::NorthEast,
        Dir8::East,
        Dir8::SouthEast,
        Dir8::South,
        Dir8::SouthWest,
        Dir8::West,
        Dir8::NorthWest,
    ];

    /// Get the delta (dx, dy) for this direction
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Dir8::North => (0, -1),
            Dir8::NorthEast => (1, -1),
            Dir8::East => (1, 0),
            Dir8::SouthEast => (1, 1),
            Dir8::South => (0, 1),
            Dir8::SouthWest => (-1, 1),
            Dir8::West => (-1, 0),
            Dir8::NorthWest => (-1, -1),
        }
    }
}

/// A cell coordinate on some level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn shift(self, dir: Dir8) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// The eight neighboring coordinates, in [`Dir8::ALL`] order.
    pub fn neighbors8(self) -> impl Iterator<Item = Coord> {
        Dir8::ALL.into_iter().map(move |d| self.shift(d))
    }

    /// Chebyshev distance (diagonal moves count as 1)
    pub fn dist8(self, other: Coord) -> u32 {
        (self.x - other.x).abs().max((self.y - other.y).abs()) as u32
    }
}

/// A fully qualified world position: level plus cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub level: LevelId,
    pub coord: Coord,
}

impl Pos {
    pub const fn new(level: LevelId, coord: Coord) -> Self {
        Self { level, coord }
    }

    /// Chebyshev distance, or None when the positions are on different levels
    pub fn dist8(self, other: Pos) -> Option<u32> {
        if self.level == other.level {
            Some(self.coord.dist8(other.coord))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors8_fixed_order() {
        let around: Vec<Coord> = Coord::new(5, 5).neighbors8().collect();
        assert_eq!(around.len(), 8);
        assert_eq!(around[0], Coord::new(5, 4)); // north first
        assert_eq!(around[1], Coord::new(6, 4));
        assert_eq!(around[7], Coord::new(4, 4)); // northwest last
    }

    #[test]
    fn test_dist8_chebyshev() {
        assert_eq!(Coord::new(0, 0).dist8(Coord::new(3, 1)), 3);
        assert_eq!(Coord::new(2, 2).dist8(Coord::new(2, 2)), 0);
    }

    #[test]
    fn test_pos_dist8_cross_level() {
        let a = Pos::new(LevelId(0), Coord::new(1, 1));
        let b = Pos::new(LevelId(1), Coord::new(1, 2));
        assert_eq!(a.dist8(b), None);
        let c = Pos::new(LevelId(0), Coord::new(4, 1));
        assert_eq!(a.dist8(c), Some(3));
    }
}
