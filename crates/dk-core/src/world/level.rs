//! Level structure: one grid of cells with furniture, creatures and items

use serde::{Deserialize, Serialize};

use super::{Coord, LevelId, Pos};
use crate::MAX_LANDING_RADIUS;
use crate::creature::CreatureId;
use crate::furniture::Furniture;
use crate::item::Item;

/// One addressable map cell
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cell {
    /// Creatures can stand here; false for walls and solid rock
    pub walkable: bool,
    /// At most one furniture per cell on this functional layer
    pub furniture: Option<Furniture>,
    /// Occupying creature, if any
    pub creature: Option<CreatureId>,
    /// Items lying on the floor
    pub items: Vec<Item>,
    /// Level-transition target for stairs placed here
    pub landing_link: Option<Pos>,
}

impl Cell {
    pub fn floor() -> Self {
        Self {
            walkable: true,
            ..Self::default()
        }
    }

    pub fn wall() -> Self {
        Self::default()
    }
}

/// One map level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub id: LevelId,
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Level {
    /// Create a level of the given size, all floor
    pub fn new(id: LevelId, width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "level must have positive size");
        Self {
            id,
            width,
            height,
            cells: vec![Cell::floor(); (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub const fn in_bounds(&self, c: Coord) -> bool {
        c.x >= 0 && c.y >= 0 && c.x < self.width && c.y < self.height
    }

    /// Cell access; panics when out of bounds
    pub fn cell(&self, c: Coord) -> &Cell {
        assert!(self.in_bounds(c), "coord out of bounds: {c:?}");
        &self.cells[(c.y * self.width + c.x) as usize]
    }

    pub fn cell_mut(&mut self, c: Coord) -> &mut Cell {
        assert!(self.in_bounds(c), "coord out of bounds: {c:?}");
        &mut self.cells[(c.y * self.width + c.x) as usize]
    }

    /// A creature may be placed here: in bounds, walkable, unoccupied
    pub fn is_free(&self, c: Coord) -> bool {
        self.in_bounds(c) && {
            let cell = self.cell(c);
            cell.walkable && cell.creature.is_none()
        }
    }

    pub fn furniture_at(&self, c: Coord) -> Option<&Furniture> {
        if self.in_bounds(c) {
            self.cell(c).furniture.as_ref()
        } else {
            None
        }
    }

    /// All coords that currently hold furniture, row-major
    pub fn furniture_coords(&self) -> impl Iterator<Item = (Coord, &Furniture)> {
        self.cells.iter().enumerate().filter_map(|(i, cell)| {
            let c = Coord::new(i as i32 % self.width, i as i32 / self.width);
            cell.furniture.as_ref().map(|f| (c, f))
        })
    }

    /// Bresenham line of sight; unwalkable cells block
    pub fn has_line_of_sight(&self, from: Coord, to: Coord) -> bool {
        if !self.in_bounds(from) || !self.in_bounds(to) {
            return false;
        }
        let (mut x, mut y) = (from.x, from.y);
        let dx = (to.x - from.x).abs();
        let dy = (to.y - from.y).abs();
        let sx = if from.x < to.x { 1 } else { -1 };
        let sy = if from.y < to.y { 1 } else { -1 };
        let mut err = dx - dy;
        loop {
            if x == to.x && y == to.y {
                return true;
            }
            // endpoints never block, intermediate walls do
            if (x != from.x || y != from.y) && !self.cell(Coord::new(x, y)).walkable {
                return false;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// The free cell nearest to `around`, scanning outward ring by ring.
    /// Within a ring the scan is row-major, which fixes tie-breaking.
    pub fn closest_landing(&self, around: Coord) -> Option<Coord> {
        for r in 1..=MAX_LANDING_RADIUS {
            for dy in -r..=r {
                for dx in -r..=r {
                    if dx.abs().max(dy.abs()) != r {
                        continue;
                    }
                    let c = Coord::new(around.x + dx, around.y + dy);
                    if self.is_free(c) {
                        return Some(c);
                    }
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_level() -> Level {
        Level::new(LevelId(0), 10, 10)
    }

    #[test]
    fn test_is_free_rules() {
        let mut level = open_level();
        assert!(level.is_free(Coord::new(3, 3)));
        assert!(!level.is_free(Coord::new(-1, 3)));
        *level.cell_mut(Coord::new(3, 3)) = Cell::wall();
        assert!(!level.is_free(Coord::new(3, 3)));
        level.cell_mut(Coord::new(4, 4)).creature = Some(CreatureId(1));
        assert!(!level.is_free(Coord::new(4, 4)));
    }

    #[test]
    fn test_line_of_sight_blocked_by_wall() {
        let mut level = open_level();
        assert!(level.has_line_of_sight(Coord::new(1, 5), Coord::new(8, 5)));
        for y in 0..10 {
            *level.cell_mut(Coord::new(4, y)) = Cell::wall();
        }
        assert!(!level.has_line_of_sight(Coord::new(1, 5), Coord::new(8, 5)));
    }

    #[test]
    fn test_closest_landing_prefers_inner_ring() {
        let mut level = open_level();
        let around = Coord::new(5, 5);
        let first = level.closest_landing(around).unwrap();
        assert_eq!(first.dist8(around), 1);
        // fill ring 1, next landing comes from ring 2
        for n in around.neighbors8() {
            level.cell_mut(n).creature = Some(CreatureId(9));
        }
        let next = level.closest_landing(around).unwrap();
        assert_eq!(next.dist8(around), 2);
    }

    #[test]
    fn test_closest_landing_none_when_walled_in() {
        let mut level = Level::new(LevelId(0), 3, 3);
        for y in 0..3 {
            for x in 0..3 {
                if (x, y) != (1, 1) {
                    *level.cell_mut(Coord::new(x, y)) = Cell::wall();
                }
            }
        }
        assert_eq!(level.closest_landing(Coord::new(1, 1)), None);
    }
}
