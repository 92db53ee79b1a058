//! Breadth-first corridor search where every step costs the same.

use std::collections::{HashMap, HashSet, VecDeque};

use super::{reconstruct_path, PathSearch};
use crate::grid::{CellType, Coord, Extent, Grid};

/// Level-order search over the unbounded plane.
///
/// Expansion is confined to the realized extent of the grid (plus start and
/// goal) grown by one cell. Outside that box every cell is empty, so a
/// shortest path never needs to leave it, and an unreachable goal exhausts a
/// finite region instead of the whole plane.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformCostSearch;

impl UniformCostSearch {
    pub fn new() -> Self {
        Self
    }

    fn search_area(grid: &Grid, start: Coord, goal: Coord) -> Extent {
        let mut min = Coord::new(start.x.min(goal.x), start.y.min(goal.y));
        let mut max = Coord::new(start.x.max(goal.x), start.y.max(goal.y));
        if let Some(extent) = grid.extent() {
            min = Coord::new(min.x.min(extent.min.x), min.y.min(extent.min.y));
            max = Coord::new(max.x.max(extent.max.x), max.y.max(extent.max.y));
        }
        Extent {
            min: min.offset(-1, -1),
            max: max.offset(1, 1),
        }
    }

    fn passable(grid: &Grid, c: Coord, goal: Coord) -> bool {
        match grid.get(c) {
            None => true,
            Some(cell) => match cell.cell_type {
                CellType::Empty | CellType::Corridor => true,
                CellType::Room => c == goal,
            },
        }
    }
}

impl PathSearch for UniformCostSearch {
    fn find_path(&self, grid: &Grid, start: Coord, goal: Coord) -> Vec<Coord> {
        if start == goal {
            return vec![start];
        }

        let area = Self::search_area(grid, start, goal);
        let mut queue = VecDeque::new();
        let mut visited = HashSet::new();
        let mut came_from = HashMap::new();
        queue.push_back(start);
        visited.insert(start);

        while let Some(current) = queue.pop_front() {
            if current == goal {
                return reconstruct_path(&came_from, start, goal);
            }
            for next in current.neighbors() {
                if !area.contains(next) || !Self::passable(grid, next, goal) {
                    continue;
                }
                if visited.insert(next) {
                    came_from.insert(next, current);
                    queue.push_back(next);
                }
            }
        }

        Vec::new()
    }

    fn name(&self) -> &'static str {
        "uniform-cost"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::place_rect;

    fn assert_connected(path: &[Coord]) {
        for pair in path.windows(2) {
            assert!(pair[0].is_adjacent(pair[1]), "{:?} -> {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_same_cell() {
        let grid = Grid::new();
        let c = Coord::new(4, -2);
        assert_eq!(UniformCostSearch.find_path(&grid, c, c), vec![c]);
    }

    #[test]
    fn test_open_plane_is_manhattan() {
        let grid = Grid::new();
        let path = UniformCostSearch.find_path(&grid, Coord::new(0, 0), Coord::new(3, -2));
        assert_eq!(path.len(), 6);
        assert_eq!(path[0], Coord::new(0, 0));
        assert_eq!(path[5], Coord::new(3, -2));
        assert_connected(&path);
    }

    #[test]
    fn test_detours_around_room() {
        // wall of room cells at x=2, y=-1..=1
        let mut grid = Grid::new();
        place_rect(&mut grid, 9, 2, -1, 1, 3);
        let path = UniformCostSearch.find_path(&grid, Coord::new(0, 0), Coord::new(4, 0));
        // must go around via y=-2 or y=2: 4 across + 2 up + 2 down
        assert_eq!(path.len(), 9);
        assert_connected(&path);
        assert!(path.iter().all(|&c| !grid.is_room(c)));
    }

    #[test]
    fn test_enters_room_only_at_goal() {
        let mut grid = Grid::new();
        place_rect(&mut grid, 1, 0, 0, 2, 2);
        place_rect(&mut grid, 2, 4, 0, 2, 2);
        let start = Coord::new(0, 0);
        let goal = Coord::new(4, 0);
        let path = UniformCostSearch.find_path(&grid, start, goal);
        // leave (0,0) upward, cross y=-1, drop into (4,0)
        assert_eq!(path.len(), 7);
        assert_connected(&path);
        for c in &path[1..path.len() - 1] {
            assert!(!grid.is_room(*c));
        }
    }

    #[test]
    fn test_uses_corridor_cells() {
        let mut grid = Grid::new();
        for x in 0..5 {
            grid.carve_corridor(Coord::new(x, 0));
        }
        let path = UniformCostSearch.find_path(&grid, Coord::new(0, 0), Coord::new(4, 0));
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn test_enclosed_goal_is_unreachable() {
        let mut grid = Grid::new();
        place_rect(&mut grid, 3, 9, 9, 3, 3);
        place_rect(&mut grid, 2, 10, 10, 1, 1);
        let path = UniformCostSearch.find_path(&grid, Coord::new(0, 0), Coord::new(10, 10));
        assert!(path.is_empty());
    }
}
