//! Corridor path search over a cell-typed grid.
//!
//! Every strategy answers the same question: the shortest 4-connected path
//! from `start` to `goal` that never enters a room cell other than the two
//! endpoints. Strategies differ in what "shortest" means and how far they are
//! allowed to look.

mod uniform;
mod weighted;

pub use uniform::UniformCostSearch;
pub use weighted::WeightedSearch;

use std::collections::HashMap;

use crate::config::{FitConfig, SearchStrategy};
use crate::grid::{Coord, Grid};

pub trait PathSearch {
    /// Path from `start` to `goal` inclusive, or empty if unreachable.
    fn find_path(&self, grid: &Grid, start: Coord, goal: Coord) -> Vec<Coord>;

    /// Whether the router should project stubs off the room wall before
    /// searching.
    fn uses_stubs(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str;
}

/// Build the strategy named in `config`.
pub fn from_config(config: &FitConfig) -> Box<dyn PathSearch> {
    match config.strategy {
        SearchStrategy::UniformCost => Box::new(UniformCostSearch::new()),
        SearchStrategy::Weighted => Box::new(WeightedSearch::from_config(config)),
    }
}

/// Walk a parent map back from `goal` and reverse.
fn reconstruct_path(came_from: &HashMap<Coord, Coord>, start: Coord, goal: Coord) -> Vec<Coord> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match came_from.get(&current) {
            Some(&prev) => {
                path.push(prev);
                current = prev;
            }
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}
