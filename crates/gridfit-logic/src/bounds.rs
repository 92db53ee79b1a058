//! Bounding rectangle of everything that was drawn.

use serde::{Deserialize, Serialize};

use crate::grid::{CellType, Coord, Grid};

/// Axis-aligned box; `(0, 0, 0, 0)` when nothing is occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rectangle {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn contains(&self, c: Coord) -> bool {
        c.x >= self.x && c.x < self.x + self.width && c.y >= self.y && c.y < self.y + self.height
    }

    pub fn area(&self) -> i64 {
        i64::from(self.width.max(0)) * i64::from(self.height.max(0))
    }
}

/// Single pass over realized cells, ignoring empty ones.
pub fn compute_bounds(grid: &Grid) -> Rectangle {
    let mut min_x = i32::MAX;
    let mut max_x = i32::MIN;
    let mut min_y = i32::MAX;
    let mut max_y = i32::MIN;

    for cell in grid.cells().filter(|c| c.cell_type != CellType::Empty) {
        min_x = min_x.min(cell.coord.x);
        max_x = max_x.max(cell.coord.x);
        min_y = min_y.min(cell.coord.y);
        max_y = max_y.max(cell.coord.y);
    }

    if min_x > max_x || min_y > max_y {
        return Rectangle::default();
    }
    Rectangle::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1)
}
