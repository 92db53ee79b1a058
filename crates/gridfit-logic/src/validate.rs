//! Invariant checks for a fitted layout.
//!
//! Pure functions over the grid, its rectangle, and the fit report. Each
//! returns the problems it found; an empty list means the check passed.

use crate::bounds::Rectangle;
use crate::grid::{CellType, Grid, NO_ROOM};
use crate::report::{FitReport, RouteOutcome};

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub category: &'static str,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Error,
    Warning,
}

// ── A. Cell typing ──────────────────────────────────────────────────────

/// Corridor cells never carry a room id; room cells always do.
pub fn check_cell_room_ids(grid: &Grid) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for cell in grid.cells() {
        let bad = match cell.cell_type {
            CellType::Corridor | CellType::Empty => cell.room_id != NO_ROOM,
            CellType::Room => cell.room_id == NO_ROOM,
        };
        if bad {
            errors.push(ValidationError {
                category: "cell_typing",
                severity: Severity::Error,
                message: format!(
                    "Cell ({},{}) is {:?} with room id {}",
                    cell.coord.x, cell.coord.y, cell.cell_type, cell.room_id
                ),
            });
        }
    }
    errors
}

/// Every non-empty cell lies inside the bounding rectangle.
pub fn check_cells_within_bounds(grid: &Grid, rect: Rectangle) -> Vec<ValidationError> {
    grid.cells()
        .filter(|c| c.cell_type != CellType::Empty && !rect.contains(c.coord))
        .map(|c| ValidationError {
            category: "bounds",
            severity: Severity::Error,
            message: format!(
                "Cell ({},{}) lies outside ({},{}) {}x{}",
                c.coord.x, c.coord.y, rect.x, rect.y, rect.width, rect.height
            ),
        })
        .collect()
}

// ── B. Room footprints ──────────────────────────────────────────────────

/// Rooms that overlap nothing keep every footprint cell. Overlaps are
/// reported as warnings, since the default placer allows them.
pub fn check_room_footprints(grid: &Grid, report: &FitReport) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let placed: Vec<_> = report.placements.iter().filter(|p| p.placed).collect();

    for (i, p) in placed.iter().enumerate() {
        let overlapping: Vec<u32> = placed
            .iter()
            .enumerate()
            .filter(|&(j, q)| j != i && p.overlaps(q))
            .map(|(_, q)| q.room_id)
            .collect();
        if !overlapping.is_empty() {
            errors.push(ValidationError {
                category: "room_overlap",
                severity: Severity::Warning,
                message: format!("Room #{} overlaps rooms {:?}", p.room_id, overlapping),
            });
            continue;
        }
        let lost = p
            .coords()
            .filter(|&c| {
                grid.get(c)
                    .map_or(true, |cell| !cell.is_room() || cell.room_id != p.room_id)
            })
            .count();
        if lost > 0 {
            errors.push(ValidationError {
                category: "room_footprint",
                severity: Severity::Error,
                message: format!("Room #{} lost {} of its cells", p.room_id, lost),
            });
        }
    }
    errors
}

// ── C. Corridors ────────────────────────────────────────────────────────

/// Routed corridors are 4-connected and only touch rooms at their two ends.
pub fn check_routes(grid: &Grid, report: &FitReport) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for route in &report.routes {
        let RouteOutcome::Routed { from, to, path, .. } = route else {
            continue;
        };
        if let Some(pair) = path.windows(2).find(|w| w[0] != w[1] && !w[0].is_adjacent(w[1])) {
            errors.push(ValidationError {
                category: "corridor_continuity",
                severity: Severity::Error,
                message: format!(
                    "Corridor {}->{} jumps from ({},{}) to ({},{})",
                    from, to, pair[0].x, pair[0].y, pair[1].x, pair[1].y
                ),
            });
        }
        let interior = path.len().saturating_sub(2);
        let through_room = path
            .iter()
            .skip(1)
            .take(interior)
            .filter(|&&c| grid.is_room(c))
            .count();
        if through_room > 0 {
            errors.push(ValidationError {
                category: "corridor_room_crossing",
                severity: Severity::Error,
                message: format!(
                    "Corridor {}->{} passes through {} room cells",
                    from, to, through_room
                ),
            });
        }
    }
    errors
}

/// Run every check.
pub fn validate_layout(grid: &Grid, rect: Rectangle, report: &FitReport) -> Vec<ValidationError> {
    let mut errors = check_cell_room_ids(grid);
    errors.extend(check_cells_within_bounds(grid, rect));
    errors.extend(check_room_footprints(grid, report));
    errors.extend(check_routes(grid, report));
    errors
}

/// Only the errors, dropping warnings.
pub fn errors_only(all: Vec<ValidationError>) -> Vec<ValidationError> {
    all.into_iter()
        .filter(|e| e.severity == Severity::Error)
        .collect()
}
