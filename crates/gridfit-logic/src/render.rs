//! Plain-text rendering of a fitted grid.

use crate::bounds::Rectangle;
use crate::grid::{CellType, Coord, Grid};

pub const ROOM_GLYPH: char = '#';
pub const CORRIDOR_GLYPH: char = '.';
pub const EMPTY_GLYPH: char = ' ';

fn glyph(cell_type: CellType) -> char {
    match cell_type {
        CellType::Room => ROOM_GLYPH,
        CellType::Corridor => CORRIDOR_GLYPH,
        CellType::Empty => EMPTY_GLYPH,
    }
}

/// One line per row of `rect`, top row first. Trailing blanks are trimmed.
pub fn render_ascii(grid: &Grid, rect: Rectangle) -> String {
    if rect.is_empty() {
        return String::new();
    }
    let mut out = String::with_capacity(((rect.width + 1) * rect.height) as usize);
    for y in rect.y..rect.y + rect.height {
        let row: String = (rect.x..rect.x + rect.width)
            .map(|x| glyph(grid.cell_type(Coord::new(x, y))))
            .collect();
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out
}
