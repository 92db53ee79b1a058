//! Sparse grid of typed cells on an unbounded integer plane.
//!
//! Cells are created lazily the first time placement or routing touches a
//! coordinate. Anything never touched is implicitly [`CellType::Empty`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Room id carried by cells that belong to no room.
pub const NO_ROOM: u32 = 0;

/// The four orthogonal steps, in the order neighbours are expanded.
pub const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Integer grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// The four orthogonal neighbours of this coordinate.
    pub fn neighbors(self) -> [Coord; 4] {
        DIRECTIONS.map(|(dx, dy)| self.offset(dx, dy))
    }

    pub fn manhattan(self, other: Coord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    pub fn is_adjacent(self, other: Coord) -> bool {
        self.manhattan(other) == 1
    }
}

/// What occupies a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CellType {
    #[default]
    Empty,
    Room,
    Corridor,
}

/// One realized grid location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub coord: Coord,
    pub cell_type: CellType,
    /// Owning room, or [`NO_ROOM`].
    pub room_id: u32,
}

impl Cell {
    pub fn new(coord: Coord) -> Self {
        Self {
            coord,
            cell_type: CellType::Empty,
            room_id: NO_ROOM,
        }
    }

    pub fn is_room(&self) -> bool {
        self.cell_type == CellType::Room
    }
}

/// Inclusive min/max of every realized coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub min: Coord,
    pub max: Coord,
}

impl Extent {
    fn include(&mut self, c: Coord) {
        self.min.x = self.min.x.min(c.x);
        self.min.y = self.min.y.min(c.y);
        self.max.x = self.max.x.max(c.x);
        self.max.y = self.max.y.max(c.y);
    }

    pub fn contains(&self, c: Coord) -> bool {
        c.x >= self.min.x && c.x <= self.max.x && c.y >= self.min.y && c.y <= self.max.y
    }
}

/// Coordinate-keyed cell store.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    cells: HashMap<Coord, Cell>,
    extent: Option<Extent>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, c: Coord) -> Option<&Cell> {
        self.cells.get(&c)
    }

    /// Type at `c`; unrealized coordinates are empty.
    pub fn cell_type(&self, c: Coord) -> CellType {
        self.cells.get(&c).map_or(CellType::Empty, |cell| cell.cell_type)
    }

    pub fn is_room(&self, c: Coord) -> bool {
        self.cell_type(c) == CellType::Room
    }

    /// True if any orthogonal neighbour of `c` is a room cell.
    pub fn touches_room(&self, c: Coord) -> bool {
        c.neighbors().iter().any(|&n| self.is_room(n))
    }

    pub fn get_or_create(&mut self, c: Coord) -> &mut Cell {
        match self.extent.as_mut() {
            Some(extent) => extent.include(c),
            None => self.extent = Some(Extent { min: c, max: c }),
        }
        self.cells.entry(c).or_insert_with(|| Cell::new(c))
    }

    /// Mark `c` as belonging to `room_id`, overwriting whatever was there.
    pub fn set_room(&mut self, c: Coord, room_id: u32) {
        let cell = self.get_or_create(c);
        cell.cell_type = CellType::Room;
        cell.room_id = room_id;
    }

    /// Mark `c` as corridor unless it is a room cell. Returns true if the
    /// cell was not already corridor.
    pub fn carve_corridor(&mut self, c: Coord) -> bool {
        let cell = self.get_or_create(c);
        match cell.cell_type {
            CellType::Room | CellType::Corridor => false,
            CellType::Empty => {
                cell.cell_type = CellType::Corridor;
                true
            }
        }
    }

    /// Overwrite a cell wholesale. Used when rebuilding a grid from stored data.
    pub fn insert(&mut self, cell: Cell) {
        *self.get_or_create(cell.coord) = cell;
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Bounds of every realized coordinate, empty cells included.
    pub fn extent(&self) -> Option<Extent> {
        self.extent
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.extent = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untouched_is_empty() {
        let grid = Grid::new();
        assert_eq!(grid.cell_type(Coord::new(100, -7)), CellType::Empty);
        assert!(grid.get(Coord::new(0, 0)).is_none());
        assert!(grid.extent().is_none());
    }

    #[test]
    fn test_carve_never_overwrites_room() {
        let mut grid = Grid::new();
        grid.set_room(Coord::new(1, 1), 4);
        assert!(!grid.carve_corridor(Coord::new(1, 1)));
        let cell = grid.get(Coord::new(1, 1)).unwrap();
        assert_eq!(cell.cell_type, CellType::Room);
        assert_eq!(cell.room_id, 4);
    }

    #[test]
    fn test_carve_is_idempotent() {
        let mut grid = Grid::new();
        assert!(grid.carve_corridor(Coord::new(0, 0)));
        assert!(!grid.carve_corridor(Coord::new(0, 0)));
        assert_eq!(grid.cell_type(Coord::new(0, 0)), CellType::Corridor);
        assert_eq!(grid.get(Coord::new(0, 0)).unwrap().room_id, NO_ROOM);
    }

    #[test]
    fn test_extent_tracks_realized_cells() {
        let mut grid = Grid::new();
        grid.set_room(Coord::new(2, 3), 1);
        grid.get_or_create(Coord::new(-4, 9));
        let extent = grid.extent().unwrap();
        assert_eq!(extent.min, Coord::new(-4, 3));
        assert_eq!(extent.max, Coord::new(2, 9));
        assert!(extent.contains(Coord::new(0, 5)));
        assert!(!extent.contains(Coord::new(3, 5)));
    }

    #[test]
    fn test_touches_room() {
        let mut grid = Grid::new();
        grid.set_room(Coord::new(0, 0), 1);
        assert!(grid.touches_room(Coord::new(1, 0)));
        assert!(grid.touches_room(Coord::new(0, -1)));
        assert!(!grid.touches_room(Coord::new(1, 1)));
    }

    #[test]
    fn test_coord_helpers() {
        let c = Coord::new(3, 4);
        assert_eq!(c.manhattan(Coord::new(0, 0)), 7);
        assert!(c.is_adjacent(Coord::new(3, 5)));
        assert!(!c.is_adjacent(Coord::new(4, 5)));
        assert_eq!(c.neighbors()[0], Coord::new(4, 4));
    }
}
