//! The fitting facade: place rooms, route every corridor, measure the result.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::boundary::BoundaryFinder;
use crate::bounds::{compute_bounds, Rectangle};
use crate::config::FitConfig;
use crate::dungeon::Dungeon;
use crate::grid::{Cell, Coord, Grid};
use crate::placement::RoomPlacer;
use crate::report::FitReport;
use crate::router::CorridorRouter;
use crate::search::{self, PathSearch};

/// Owns one grid and everything derived from it.
///
/// Each [`fit`](Self::fit) starts from an empty grid and boundary cache, so a
/// fitter can be reused across dungeons. The RNG is not reset between passes.
pub struct GridFitter<R = StdRng> {
    config: FitConfig,
    search: Box<dyn PathSearch>,
    rng: R,
    grid: Grid,
    boundaries: BoundaryFinder,
    bounds: Option<Rectangle>,
    report: FitReport,
}

impl GridFitter<StdRng> {
    /// Seeds from `config.seed`, or from entropy when unset.
    pub fn new(config: FitConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> GridFitter<R> {
    pub fn with_rng(config: FitConfig, rng: R) -> Self {
        let search = search::from_config(&config);
        Self::with_search(config, rng, search)
    }

    /// Use a caller-supplied search strategy instead of `config.strategy`.
    pub fn with_search(config: FitConfig, rng: R, search: Box<dyn PathSearch>) -> Self {
        Self {
            config,
            search,
            rng,
            grid: Grid::new(),
            boundaries: BoundaryFinder::new(),
            bounds: None,
            report: FitReport::default(),
        }
    }

    /// Place rooms, connect corridors, and compute the bounding rectangle.
    /// Never fails; corridors that cannot be drawn show up in [`report`](Self::report).
    pub fn fit(&mut self, dungeon: &Dungeon) -> Rectangle {
        let started = Instant::now();
        log::info!(
            "Starting dungeon fit ({})... Number of rooms: {}, corridors: {}",
            self.search.name(),
            dungeon.rooms().len(),
            dungeon.corridors().len()
        );

        self.grid.clear();
        self.boundaries.clear();
        self.report = FitReport::default();

        self.report.placements =
            RoomPlacer::new(&self.config).place_all(&mut self.grid, dungeon.rooms(), &mut self.rng);

        let corridors = dungeon.corridors();
        log::info!("Connecting {} corridors...", corridors.len());
        let router = CorridorRouter::new(self.search.as_ref(), &self.config);
        for (i, corridor) in corridors.iter().enumerate() {
            let outcome = router.route(&mut self.grid, &mut self.boundaries, corridor, &mut self.rng);
            self.report.routes.push(outcome);
            if (i + 1) % 5 == 0 {
                log::info!("  ...connected {} corridors so far", i + 1);
            }
        }

        let rect = compute_bounds(&self.grid);
        self.bounds = Some(rect);
        log::info!(
            "Dungeon fit complete. Used area: ({},{}) {}x{}. Routed {}/{} corridors. Elapsed ms: {}",
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            self.report.routed(),
            corridors.len(),
            started.elapsed().as_millis()
        );
        rect
    }

    pub fn all_cells(&self) -> impl Iterator<Item = &Cell> {
        self.grid.cells()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Rectangle from the last fit; `None` before the first one.
    pub fn bounds(&self) -> Option<Rectangle> {
        self.bounds
    }

    pub fn report(&self) -> &FitReport {
        &self.report
    }

    /// Boundary cells of a room in the current grid, cached for the pass.
    pub fn boundary(&mut self, room_id: u32) -> &[Coord] {
        self.boundaries.boundary(&self.grid, room_id)
    }

    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    pub fn strategy_name(&self) -> &'static str {
        self.search.name()
    }
}
