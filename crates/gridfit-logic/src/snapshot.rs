//! JSON snapshot of a fitted grid, for export and later reconstruction.
//!
//! Layout: `{ "rect": {...}, "cells": [{ "x", "y", "roomId", "cellType" }],
//! "rooms": [{ "id", "shape", "dimensions" }] }`. Coverage is sparse: any
//! coordinate inside `rect` that has no entry in `cells` is empty.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::bounds::Rectangle;
use crate::dungeon::{Dungeon, Room, RoomShape};
use crate::fitter::GridFitter;
use crate::grid::{Cell, CellType, Coord, Grid};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellDto {
    pub x: i32,
    pub y: i32,
    pub room_id: u32,
    pub cell_type: CellType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomDto {
    pub id: u32,
    pub shape: RoomShape,
    pub dimensions: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    /// Absent if the fitter had not run.
    #[serde(default)]
    pub rect: Option<Rectangle>,
    #[serde(default)]
    pub cells: Vec<CellDto>,
    #[serde(default)]
    pub rooms: Vec<RoomDto>,
}

impl GridSnapshot {
    /// Capture the fitter's current cells and bounds plus the dungeon's rooms.
    /// Cells are ordered by row then column so output is stable.
    pub fn capture<R: Rng>(fitter: &GridFitter<R>, dungeon: &Dungeon) -> Self {
        let mut cells: Vec<CellDto> = fitter
            .all_cells()
            .map(|c| CellDto {
                x: c.coord.x,
                y: c.coord.y,
                room_id: c.room_id,
                cell_type: c.cell_type,
            })
            .collect();
        cells.sort_by_key(|c| (c.y, c.x));

        let rooms = dungeon
            .rooms()
            .iter()
            .map(|r| RoomDto {
                id: r.id(),
                shape: r.shape(),
                dimensions: r.dimensions().to_string(),
            })
            .collect();

        Self {
            rect: fitter.bounds(),
            cells,
            rooms,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Rebuild a grid from the stored cells. Nothing is re-fitted.
    pub fn to_grid(&self) -> Grid {
        let mut grid = Grid::new();
        for dto in &self.cells {
            grid.insert(Cell {
                coord: Coord::new(dto.x, dto.y),
                cell_type: dto.cell_type,
                room_id: dto.room_id,
            });
        }
        grid
    }

    /// Type at `coord`; coordinates without an entry are empty.
    pub fn cell_type_at(&self, coord: Coord) -> CellType {
        self.cells
            .iter()
            .find(|c| c.x == coord.x && c.y == coord.y)
            .map_or(CellType::Empty, |c| c.cell_type)
    }

    /// Rooms with their original ids.
    pub fn to_rooms(&self) -> Vec<Room> {
        self.rooms
            .iter()
            .map(|r| Room::with_id(r.id, r.shape, r.dimensions.clone()))
            .collect()
    }
}
