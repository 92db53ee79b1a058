//! A* corridor search that keeps corridors off room walls.
//!
//! The search graph is the box around start and goal grown by a fixed margin,
//! so per-corridor cost does not depend on how large the map has become.
//! Entering a cell that touches a room costs `room_adjacent_cost` instead of
//! `base_cost`.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use super::{reconstruct_path, PathSearch};
use crate::config::FitConfig;
use crate::grid::{Coord, Extent, Grid};

#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    f: f64,
    h: u32,
    g: f64,
    coord: Coord,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap: lowest f, then closest to goal, then coordinate.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.coord.cmp(&self.coord))
    }
}

#[derive(Debug, Clone)]
pub struct WeightedSearch {
    pub margin: i32,
    pub base_cost: f64,
    pub room_adjacent_cost: f64,
}

impl Default for WeightedSearch {
    fn default() -> Self {
        Self::from_config(&FitConfig::weighted())
    }
}

impl WeightedSearch {
    pub fn from_config(config: &FitConfig) -> Self {
        Self {
            margin: config.search_margin.max(0),
            base_cost: config.base_cost,
            room_adjacent_cost: config.room_adjacent_cost,
        }
    }

    /// Cost of stepping onto `c`.
    pub fn step_cost(&self, grid: &Grid, c: Coord) -> f64 {
        if grid.touches_room(c) {
            self.room_adjacent_cost
        } else {
            self.base_cost
        }
    }

    /// Total cost of a path: every cell after the first is entered once.
    pub fn path_cost(&self, grid: &Grid, path: &[Coord]) -> f64 {
        path.iter().skip(1).map(|&c| self.step_cost(grid, c)).sum()
    }

    fn region(&self, start: Coord, goal: Coord) -> Extent {
        Extent {
            min: Coord::new(start.x.min(goal.x), start.y.min(goal.y))
                .offset(-self.margin, -self.margin),
            max: Coord::new(start.x.max(goal.x), start.y.max(goal.y))
                .offset(self.margin, self.margin),
        }
    }

    fn is_vertex(grid: &Grid, c: Coord, start: Coord, goal: Coord) -> bool {
        c == start || c == goal || !grid.is_room(c)
    }

    fn heuristic(&self, c: Coord, goal: Coord) -> f64 {
        // Scaled by the cheapest step so it stays admissible for any costs.
        let cheapest = self.base_cost.min(self.room_adjacent_cost).max(0.0);
        c.manhattan(goal) as f64 * cheapest
    }
}

impl PathSearch for WeightedSearch {
    fn find_path(&self, grid: &Grid, start: Coord, goal: Coord) -> Vec<Coord> {
        if start == goal {
            return vec![start];
        }

        let region = self.region(start, goal);
        let mut open = BinaryHeap::new();
        let mut g_best: HashMap<Coord, f64> = HashMap::new();
        let mut came_from = HashMap::new();
        let mut closed = HashSet::new();

        g_best.insert(start, 0.0);
        open.push(OpenEntry {
            f: self.heuristic(start, goal),
            h: start.manhattan(goal),
            g: 0.0,
            coord: start,
        });

        while let Some(entry) = open.pop() {
            let current = entry.coord;
            if current == goal {
                return reconstruct_path(&came_from, start, goal);
            }
            if !closed.insert(current) {
                continue;
            }

            for next in current.neighbors() {
                if !region.contains(next)
                    || closed.contains(&next)
                    || !Self::is_vertex(grid, next, start, goal)
                {
                    continue;
                }
                let g = entry.g + self.step_cost(grid, next);
                if g_best.get(&next).map_or(true, |&best| g < best) {
                    g_best.insert(next, g);
                    came_from.insert(next, current);
                    open.push(OpenEntry {
                        f: g + self.heuristic(next, goal),
                        h: next.manhattan(goal),
                        g,
                        coord: next,
                    });
                }
            }
        }

        Vec::new()
    }

    fn uses_stubs(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "weighted"
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
        let c = Coord::new(1, 1);
        assert_eq!(WeightedSearch::default().find_path(&grid, c, c), vec![c]);
    }

    #[test]
    fn test_open_plane_cost_is_manhattan() {
        let grid = Grid::new();
        let search = WeightedSearch::default();
        let (s, g) = (Coord::new(-3, 2), Coord::new(5, -1));
        let path = search.find_path(&grid, s, g);
        assert_eq!(path.first(), Some(&s));
        assert_eq!(path.last(), Some(&g));
        assert_connected(&path);
        assert_eq!(path.len() as u32, s.manhattan(g) + 1);
        assert_eq!(search.path_cost(&grid, &path), 11.0);
    }

    #[test]
    fn test_avoids_hugging_room_wall() {
        // Long room along y=1..=2; walking along y=0 would touch it every step.
        let mut grid = Grid::new();
        place_rect(&mut grid, 1, 0, 1, 12, 2);
        let search = WeightedSearch::default();
        let (s, g) = (Coord::new(-1, 0), Coord::new(12, 0));
        let path = search.find_path(&grid, s, g);
        assert_connected(&path);
        // hugging costs 1 + 12*5 + 1 = 62; stepping up to y=-1 costs 15 + two 5s at most
        assert!(search.path_cost(&grid, &path) <= 25.0);
        assert!(path.iter().any(|c| c.y == -1));
    }

    #[test]
    fn test_never_crosses_room_cells() {
        let mut grid = Grid::new();
        place_rect(&mut grid, 1, 0, 0, 3, 3);
        place_rect(&mut grid, 2, 10, 0, 3, 3);
        place_rect(&mut grid, 3, 5, -4, 2, 12);
        let (s, g) = (Coord::new(2, 1), Coord::new(10, 1));
        let path = WeightedSearch::default().find_path(&grid, s, g);
        assert!(!path.is_empty());
        assert_connected(&path);
        for &c in &path {
            assert!(!grid.is_room(c) || c == s || c == g);
        }
    }

    #[test]
    fn test_optimal_cost_matches_brute_force_bound() {
        // A corridor across the gap is cheaper than going around.
        let mut grid = Grid::new();
        place_rect(&mut grid, 1, 0, 0, 2, 2);
        place_rect(&mut grid, 2, 6, 0, 2, 2);
        let search = WeightedSearch::default();
        let (s, g) = (Coord::new(1, 0), Coord::new(6, 0));
        let path = search.find_path(&grid, s, g);
        // (2,0) 5, (3,0) 1, (4,0) 1, (5,0) 5, (6,0) 5 -> 17
        assert_eq!(search.path_cost(&grid, &path), 17.0);
    }

    #[test]
    fn test_disconnected_inside_margin_is_empty() {
        let mut grid = Grid::new();
        place_rect(&mut grid, 3, 9, 9, 3, 3);
        place_rect(&mut grid, 2, 10, 10, 1, 1);
        let path = WeightedSearch::default().find_path(&grid, Coord::new(0, 0), Coord::new(10, 10));
        assert!(path.is_empty());
    }

    #[test]
    fn test_margin_limits_detour() {
        // A wall taller than the margin blocks the only way round.
        let mut grid = Grid::new();
        place_rect(&mut grid, 1, 2, -30, 1, 61);
        let search = WeightedSearch {
            margin: 5,
            ..WeightedSearch::default()
        };
        assert!(search
            .find_path(&grid, Coord::new(0, 0), Coord::new(4, 0))
            .is_empty());
        let wide = WeightedSearch {
            margin: 40,
            ..WeightedSearch::default()
        };
        assert!(!wide.find_path(&grid, Coord::new(0, 0), Coord::new(4, 0)).is_empty());
    }
}
