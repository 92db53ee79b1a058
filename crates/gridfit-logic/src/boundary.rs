//! Room boundary detection with a per-pass cache.
//!
//! A boundary cell is a room cell with at least one orthogonal neighbour that
//! is unrealized or belongs to something other than the same room. Corridors
//! attach to rooms at these cells.

use std::collections::HashMap;

use crate::grid::{Coord, Grid};

fn is_boundary(grid: &Grid, c: Coord, room_id: u32) -> bool {
    c.neighbors()
        .iter()
        .any(|&n| grid.get(n).map_or(true, |cell| cell.room_id != room_id))
}

/// Scan the grid for the boundary of `room_id`, sorted top-to-bottom then
/// left-to-right.
pub fn find_boundary(grid: &Grid, room_id: u32) -> Vec<Coord> {
    let mut boundary: Vec<Coord> = grid
        .cells()
        .filter(|cell| cell.is_room() && cell.room_id == room_id)
        .map(|cell| cell.coord)
        .filter(|&c| is_boundary(grid, c, room_id))
        .collect();
    boundary.sort_by_key(|c| (c.y, c.x));
    boundary
}

/// Caches boundaries per room id. Room cells do not change once placement is
/// done, so entries stay valid for the rest of the pass.
#[derive(Debug, Default)]
pub struct BoundaryFinder {
    cache: HashMap<u32, Vec<Coord>>,
}

impl BoundaryFinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Boundary cells of `room_id`; empty if the room has no cells.
    pub fn boundary(&mut self, grid: &Grid, room_id: u32) -> &[Coord] {
        self.cache
            .entry(room_id)
            .or_insert_with(|| find_boundary(grid, room_id))
    }

    /// First boundary cell, the corridor attachment point.
    pub fn anchor(&mut self, grid: &Grid, room_id: u32) -> Option<Coord> {
        self.boundary(grid, room_id).first().copied()
    }

    pub fn cached_rooms(&self) -> usize {
        self.cache.len()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}
