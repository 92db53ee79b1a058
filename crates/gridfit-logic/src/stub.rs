//! Short corridor stubs projected off a room wall.
//!
//! A stub walks a few cells straight out of the room; weighted search then
//! starts from its end instead of the wall.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::FitConfig;
use crate::grid::{Coord, Grid, DIRECTIONS};

/// A projected stub. `cells` are not yet written to the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stub {
    pub cells: Vec<Coord>,
    /// Last cell reached, or the boundary cell if the stub is empty.
    pub end: Coord,
}

pub struct StubProjector {
    min_len: u32,
    max_len: u32,
}

impl StubProjector {
    pub fn new(min_len: u32, max_len: u32) -> Self {
        let min_len = min_len.max(1);
        Self {
            min_len,
            max_len: max_len.max(min_len),
        }
    }

    pub fn from_config(config: &FitConfig) -> Self {
        let (lo, hi) = config.stub_range();
        Self::new(lo, hi)
    }

    /// Walk `1..=max_len` cells from `boundary` in one random outward
    /// direction, stopping early at the first room cell.
    pub fn project<R: Rng + ?Sized>(&self, grid: &Grid, boundary: Coord, rng: &mut R) -> Stub {
        let len = rng.gen_range(self.min_len..=self.max_len);
        let outward: Vec<(i32, i32)> = DIRECTIONS
            .iter()
            .copied()
            .filter(|&(dx, dy)| !grid.is_room(boundary.offset(dx, dy)))
            .collect();

        let Some(&(dx, dy)) = outward.choose(rng) else {
            return Stub {
                cells: Vec::new(),
                end: boundary,
            };
        };

        let mut cells = Vec::with_capacity(len as usize);
        let mut current = boundary;
        for _ in 0..len {
            let next = current.offset(dx, dy);
            if grid.is_room(next) {
                break;
            }
            cells.push(next);
            current = next;
        }
        Stub {
            cells,
            end: current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::place_rect;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_stub_leaves_room_in_straight_line() {
        let mut grid = Grid::new();
        place_rect(&mut grid, 1, 0, 0, 3, 3);
        let projector = StubProjector::new(1, 3);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let corner = Coord::new(0, 0);
            let stub = projector.project(&grid, corner, &mut rng);
            assert!(!stub.cells.is_empty() && stub.cells.len() <= 3);
            assert_eq!(stub.end, *stub.cells.last().unwrap());
            let mut prev = corner;
            for &c in &stub.cells {
                assert!(prev.is_adjacent(c));
                assert!(!grid.is_room(c));
                prev = c;
            }
            // corner (0,0) can only leave west or north
            assert!(stub.end.x < 0 || stub.end.y < 0);
        }
    }

    #[test]
    fn test_stub_stops_at_other_room() {
        let mut grid = Grid::new();
        place_rect(&mut grid, 1, 0, 0, 1, 1);
        // block every direction except east, with a room two cells away
        place_rect(&mut grid, 2, -1, 0, 1, 1);
        place_rect(&mut grid, 2, 0, -1, 1, 1);
        place_rect(&mut grid, 2, 0, 1, 1, 1);
        place_rect(&mut grid, 3, 2, 0, 1, 1);
        let projector = StubProjector::new(3, 3);
        let mut rng = StdRng::seed_from_u64(11);
        let stub = projector.project(&grid, Coord::new(0, 0), &mut rng);
        assert_eq!(stub.cells, vec![Coord::new(1, 0)]);
        assert_eq!(stub.end, Coord::new(1, 0));
    }

    #[test]
    fn test_enclosed_boundary_yields_empty_stub() {
        let mut grid = Grid::new();
        place_rect(&mut grid, 3, -1, -1, 3, 3);
        place_rect(&mut grid, 2, 0, 0, 1, 1);
        let stub = StubProjector::new(1, 3).project(&grid, Coord::new(0, 0), &mut StdRng::seed_from_u64(0));
        assert!(stub.cells.is_empty());
        assert_eq!(stub.end, Coord::new(0, 0));
    }

    #[test]
    fn test_projection_does_not_touch_grid() {
        let mut grid = Grid::new();
        place_rect(&mut grid, 1, 0, 0, 2, 2);
        let before = grid.len();
        StubProjector::new(1, 3).project(&grid, Coord::new(0, 0), &mut StdRng::seed_from_u64(5));
        assert_eq!(grid.len(), before);
    }
}
