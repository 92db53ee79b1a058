//! Corridor routing between room boundaries.
//!
//! For each corridor: look up both rooms' boundaries, take the first cell of
//! each, optionally project stubs, search, and carve. Room cells on the path
//! are left alone, which is how a corridor "enters" a room through its wall.

use rand::Rng;

use crate::boundary::BoundaryFinder;
use crate::config::FitConfig;
use crate::dungeon::Corridor;
use crate::grid::{Coord, Grid};
use crate::report::RouteOutcome;
use crate::search::PathSearch;
use crate::stub::{Stub, StubProjector};

pub struct CorridorRouter<'a> {
    search: &'a dyn PathSearch,
    stubs: Option<StubProjector>,
}

impl<'a> CorridorRouter<'a> {
    /// Stubs are projected only if the strategy asks for them.
    pub fn new(search: &'a dyn PathSearch, config: &FitConfig) -> Self {
        Self {
            search,
            stubs: search
                .uses_stubs()
                .then(|| StubProjector::from_config(config)),
        }
    }

    fn stub<R: Rng + ?Sized>(&self, grid: &Grid, boundary: Coord, rng: &mut R) -> Stub {
        match &self.stubs {
            Some(projector) => projector.project(grid, boundary, rng),
            None => Stub {
                cells: Vec::new(),
                end: boundary,
            },
        }
    }

    /// Route one corridor, writing corridor cells into `grid` on success.
    pub fn route<R: Rng + ?Sized>(
        &self,
        grid: &mut Grid,
        boundaries: &mut BoundaryFinder,
        corridor: &Corridor,
        rng: &mut R,
    ) -> RouteOutcome {
        let Some((from, to)) = corridor.endpoints() else {
            return RouteOutcome::SkippedMissingEndpoint;
        };

        let from_anchor = boundaries.anchor(grid, from);
        let to_anchor = boundaries.anchor(grid, to);
        let (start, goal) = match (from_anchor, to_anchor) {
            (Some(s), Some(g)) => (s, g),
            (None, _) | (_, None) => {
                let room_id = if from_anchor.is_none() { from } else { to };
                log::debug!(
                    "No boundary squares found for corridor: {}->{} (room {})",
                    from,
                    to,
                    room_id
                );
                return RouteOutcome::SkippedNoBoundary { room_id };
            }
        };

        let from_stub = self.stub(grid, start, rng);
        let to_stub = self.stub(grid, goal, rng);

        let found = self.search.find_path(grid, from_stub.end, to_stub.end);
        if found.is_empty() {
            log::debug!("No path found for corridor: {}->{}", from, to);
            return RouteOutcome::Unreachable { from, to };
        }

        let path = stitch(start, &from_stub, &found, goal, &to_stub);
        let cells_carved = path.iter().filter(|&&c| grid.carve_corridor(c)).count();
        log::debug!(
            "Corridor connected rooms {} -> {} with path length: {}",
            from,
            to,
            path.len()
        );
        RouteOutcome::Routed {
            from,
            to,
            path,
            cells_carved,
        }
    }
}

/// Join `start`, its stub, the search path, and the goal stub walked
/// backwards into one continuous walk ending at `goal`.
fn stitch(start: Coord, from_stub: &Stub, found: &[Coord], goal: Coord, to_stub: &Stub) -> Vec<Coord> {
    let mut walk = Vec::with_capacity(found.len() + from_stub.cells.len() + to_stub.cells.len() + 2);
    walk.push(start);
    walk.extend_from_slice(&from_stub.cells);
    walk.extend(found.iter().skip(1).copied());
    walk.extend(
        to_stub
            .cells
            .iter()
            .rev()
            .skip(1)
            .copied()
            .chain((!to_stub.cells.is_empty()).then_some(goal)),
    );
    walk
}
