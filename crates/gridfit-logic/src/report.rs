//! Per-pass record of what happened to every room and corridor.
//!
//! Fitting never fails as a whole; a corridor that cannot be drawn is skipped.
//! The report is how callers tell "all corridors routed" apart from "three
//! were silently dropped".

use crate::grid::Coord;
use crate::placement::Placement;

#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    Routed {
        from: u32,
        to: u32,
        /// Stub cells plus search path, in walking order.
        path: Vec<Coord>,
        /// Cells that were newly turned into corridor.
        cells_carved: usize,
    },
    /// One or both endpoints absent.
    SkippedMissingEndpoint,
    /// The room has no boundary cells (no cells at all, or unknown id).
    SkippedNoBoundary { room_id: u32 },
    Unreachable { from: u32, to: u32 },
}

impl RouteOutcome {
    pub fn is_routed(&self) -> bool {
        matches!(self, RouteOutcome::Routed { .. })
    }
}

#[derive(Debug, Clone, Default)]
pub struct FitReport {
    pub placements: Vec<Placement>,
    /// One entry per corridor, in dungeon order.
    pub routes: Vec<RouteOutcome>,
}

impl FitReport {
    pub fn routed(&self) -> usize {
        self.routes.iter().filter(|r| r.is_routed()).count()
    }

    pub fn skipped(&self) -> usize {
        self.routes
            .iter()
            .filter(|r| {
                matches!(
                    r,
                    RouteOutcome::SkippedMissingEndpoint | RouteOutcome::SkippedNoBoundary { .. }
                )
            })
            .count()
    }

    pub fn unreachable(&self) -> usize {
        self.routes
            .iter()
            .filter(|r| matches!(r, RouteOutcome::Unreachable { .. }))
            .count()
    }

    pub fn rejected_rooms(&self) -> impl Iterator<Item = &Placement> {
        self.placements.iter().filter(|p| !p.placed)
    }

    pub fn placement(&self, room_id: u32) -> Option<&Placement> {
        self.placements.iter().find(|p| p.room_id == room_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let report = FitReport {
            placements: Vec::new(),
            routes: vec![
                RouteOutcome::Routed {
                    from: 1,
                    to: 2,
                    path: vec![Coord::new(0, 0)],
                    cells_carved: 0,
                },
                RouteOutcome::SkippedMissingEndpoint,
                RouteOutcome::SkippedNoBoundary { room_id: 4 },
                RouteOutcome::Unreachable { from: 1, to: 3 },
            ],
        };
        assert_eq!(report.routed(), 1);
        assert_eq!(report.skipped(), 2);
        assert_eq!(report.unreachable(), 1);
    }
}
