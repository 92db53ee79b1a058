//! Fitting configuration: layout spacing, randomness, and search tuning.
//!
//! Two presets match the two corridor strategies: [`FitConfig::breadth_first`]
//! packs rooms tightly with no jitter and routes with plain BFS, while
//! [`FitConfig::weighted`] spreads rooms out, jitters them, clamps oversized
//! rooms, and routes with stubs plus a wall-avoiding weighted search.

use serde::{Deserialize, Serialize};

/// Which path search the fitter uses to carve corridors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    #[default]
    UniformCost,
    Weighted,
}

/// What the placer does when a room's footprint lands on existing room cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Later rooms silently overwrite earlier ones.
    #[default]
    Overwrite,
    /// Rooms that would overlap an existing room are not written.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    pub strategy: SearchStrategy,
    pub collision: CollisionPolicy,
    /// A new row starts once the cursor would pass this x.
    pub max_row_width: i32,
    /// Horizontal space between neighbouring rooms in a row.
    pub column_gap: i32,
    /// Vertical space between rows.
    pub row_gap: i32,
    /// Clamp for each room side; `None` keeps parsed sizes.
    pub max_dimension: Option<i32>,
    /// Size used when a dimension string cannot be parsed.
    pub default_room_size: i32,
    /// Placement origin is offset by up to ±`jitter` on each axis.
    pub jitter: i32,
    pub stub_min: u32,
    pub stub_max: u32,
    /// Cells added around the start/goal box for weighted search.
    pub search_margin: i32,
    pub base_cost: f64,
    /// Cost of entering a cell that touches a room.
    pub room_adjacent_cost: f64,
    /// Seed for the fitter's RNG; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self::breadth_first()
    }
}

impl FitConfig {
    pub fn breadth_first() -> Self {
        Self {
            strategy: SearchStrategy::UniformCost,
            collision: CollisionPolicy::Overwrite,
            max_row_width: 80,
            column_gap: 2,
            row_gap: 3,
            max_dimension: None,
            default_room_size: 5,
            jitter: 0,
            stub_min: 1,
            stub_max: 3,
            search_margin: 20,
            base_cost: 1.0,
            room_adjacent_cost: 5.0,
            seed: None,
        }
    }

    pub fn weighted() -> Self {
        Self {
            strategy: SearchStrategy::Weighted,
            max_row_width: 100,
            column_gap: 5,
            row_gap: 5,
            max_dimension: Some(30),
            jitter: 5,
            ..Self::breadth_first()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_collision(mut self, collision: CollisionPolicy) -> Self {
        self.collision = collision;
        self
    }

    /// Stub length range, normalized so that `min <= max` and `min >= 1`.
    pub fn stub_range(&self) -> (u32, u32) {
        let lo = self.stub_min.max(1);
        (lo, self.stub_max.max(lo))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_breadth_first() {
        assert_eq!(FitConfig::default(), FitConfig::breadth_first());
        assert_eq!(FitConfig::default().strategy, SearchStrategy::UniformCost);
        assert_eq!(FitConfig::default().jitter, 0);
    }

    #[test]
    fn test_weighted_preset() {
        let c = FitConfig::weighted();
        assert_eq!(c.strategy, SearchStrategy::Weighted);
        assert_eq!(c.max_dimension, Some(30));
        assert_eq!(c.jitter, 5);
        assert_eq!(c.collision, CollisionPolicy::Overwrite);
    }

    #[test]
    fn test_stub_range_normalized() {
        let mut c = FitConfig::weighted();
        c.stub_min = 0;
        c.stub_max = 0;
        assert_eq!(c.stub_range(), (1, 1));
        c.stub_min = 4;
        c.stub_max = 2;
        assert_eq!(c.stub_range(), (4, 4));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let c: FitConfig =
            serde_json::from_str(r#"{"strategy":"weighted","seed":7}"#).unwrap();
        assert_eq!(c.strategy, SearchStrategy::Weighted);
        assert_eq!(c.seed, Some(7));
        assert_eq!(c.max_row_width, 80);
    }
}
