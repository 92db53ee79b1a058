//! Grid fitting engine for procedural dungeon maps.
//!
//! Turns an abstract graph of rooms and passages into cells on an unbounded
//! integer plane: rooms are laid out in rows, corridors are carved between
//! room boundaries by graph search, and the occupied area is measured.
//! Nothing here performs I/O beyond optional JSON (de)serialization.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`boundary`] | Room boundary cells, cached per fitting pass |
//! | [`bounds`] | Bounding rectangle of all non-empty cells |
//! | [`config`] | Fit tunables and the breadth-first / weighted presets |
//! | [`dungeon`] | Rooms, corridors, and the ordered dungeon graph |
//! | [`fitter`] | `GridFitter` facade: place, route, measure |
//! | [`generator`] | Random dungeon graphs from d20 passage tables |
//! | [`grid`] | Sparse coordinate-to-cell store |
//! | [`placement`] | Row-flow room placement with optional jitter |
//! | [`render`] | ASCII rendering of a fitted grid |
//! | [`report`] | Per-room placements and per-corridor routing outcomes |
//! | [`router`] | Corridor routing between room boundaries |
//! | [`search`] | Uniform-cost (BFS) and weighted (A*) path search |
//! | [`snapshot`] | JSON export and grid reconstruction |
//! | [`stub`] | Short corridor stubs projected out of rooms |
//! | [`validate`] | Layout invariant checks |

pub mod boundary;
pub mod bounds;
pub mod config;
pub mod dungeon;
pub mod fitter;
pub mod generator;
pub mod grid;
pub mod placement;
pub mod render;
pub mod report;
pub mod router;
pub mod search;
pub mod snapshot;
pub mod stub;
pub mod validate;

pub use bounds::Rectangle;
pub use config::{CollisionPolicy, FitConfig, SearchStrategy};
pub use dungeon::{Corridor, Dungeon, Room, RoomShape};
pub use fitter::GridFitter;
pub use grid::{Cell, CellType, Coord, Grid};
