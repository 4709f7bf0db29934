//! Search configuration.
//!
//! Every bound the search engine honours lives here so a caller can tighten
//! them for tests or loosen them for a larger graph.  All caps count
//! iterations, never wall-clock time, so a capped search is deterministic.

use crate::{CoreError, CoreResult};

/// Bounds and tolerances for path search and turn accounting.
///
/// Typically left at [`Default`]; applications may load it from JSON/TOML
/// with the `serde` feature and must call [`validate`](Self::validate) on
/// anything user-supplied.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Breadth-first search stops after visiting this many junctions.
    /// Effectively unbounded by default.
    pub bfs_max_visited: usize,

    /// A* gives up after expanding this many junctions.
    pub astar_max_expansions: usize,

    /// Backtracking abandons an attempt after visiting this many junctions.
    pub backtrack_max_visited: usize,

    /// First distance budget, as a multiple of the beeline distance.
    pub budget_initial_factor: f64,

    /// Added to the budget factor after every failed attempt.
    pub budget_step: f64,

    /// Largest budget factor tried before giving up.
    pub budget_max_factor: f64,

    /// Largest tolerated gap (miles) between the per-turn total and the
    /// summed route distance.
    pub turn_check_epsilon_mi: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            bfs_max_visited:       usize::MAX,
            astar_max_expansions:  15_000,
            backtrack_max_visited: 1_000,
            budget_initial_factor: 1.25,
            budget_step:           0.25,
            budget_max_factor:     6.0,
            turn_check_epsilon_mi: 1e-4,
        }
    }
}

impl SearchConfig {
    /// Reject bounds that would make a search meaningless or endless.
    pub fn validate(&self) -> CoreResult<()> {
        if self.bfs_max_visited == 0
            || self.astar_max_expansions == 0
            || self.backtrack_max_visited == 0
        {
            return Err(CoreError::Config("search caps must be at least 1".into()));
        }
        if !(self.budget_initial_factor > 0.0) {
            return Err(CoreError::Config(format!(
                "budget_initial_factor must be positive, got {}",
                self.budget_initial_factor
            )));
        }
        if !(self.budget_step > 0.0) {
            return Err(CoreError::Config(format!(
                "budget_step must be positive, got {}",
                self.budget_step
            )));
        }
        if self.budget_max_factor < self.budget_initial_factor {
            return Err(CoreError::Config(format!(
                "budget_max_factor {} is below budget_initial_factor {}",
                self.budget_max_factor, self.budget_initial_factor
            )));
        }
        if !(self.turn_check_epsilon_mi >= 0.0) {
            return Err(CoreError::Config("turn_check_epsilon_mi must be non-negative".into()));
        }
        Ok(())
    }

    /// The budget factors tried in order: initial, initial + step, … up to
    /// and including the ceiling.
    pub fn budget_factors(&self) -> impl Iterator<Item = f64> + '_ {
        let steps = ((self.budget_max_factor - self.budget_initial_factor) / self.budget_step
            + 1e-9)
            .floor()
            .max(0.0) as usize;
        (0..=steps).map(move |i| self.budget_initial_factor + i as f64 * self.budget_step)
    }
}
