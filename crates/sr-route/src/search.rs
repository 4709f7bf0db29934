//! Search trait, query and outcome types.
//!
//! # Pluggability
//!
//! Every algorithm implements [`PathSearch`], so callers can pick one per
//! request through [`Strategy`] or hand in their own.  The three built-ins
//! trade differently:
//!
//! | Strategy        | Optimises                | Cost                          |
//! |-----------------|--------------------------|-------------------------------|
//! | `BreadthFirst`  | hop count                | cheap                         |
//! | `AStar`         | street distance          | cheap, batch-safe             |
//! | `Backtracking`  | a describable route      | exhaustive, one query at once |
//! | `Bidirectional` | backtracking both ways   | twice the above               |
//!
//! # Failure
//!
//! "No path" is a normal outcome: an empty [`SearchOutcome::path`].  Callers
//! fall back to the beeline distance.

use std::time::Duration;

use sr_core::{Cnn, Coord, SearchConfig};
use sr_network::JunctionGraph;

use crate::astar::AStar;
use crate::backtrack::{Backtracking, Bidirectional};
use crate::bfs::BreadthFirst;

// ── Query ─────────────────────────────────────────────────────────────────────

/// One search request between two resolved junctions.
///
/// `origin` and `destination` are the true address positions.  Only the
/// backtracking search reads them (for its beeline budget and stub
/// distances); when absent it uses the junction positions instead.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Query {
    pub from: Cnn,
    pub to: Cnn,
    pub origin: Option<Coord>,
    pub destination: Option<Coord>,
}

impl Query {
    pub fn between(from: Cnn, to: Cnn) -> Self {
        Self { from, to, origin: None, destination: None }
    }

    pub fn with_addresses(mut self, origin: Coord, destination: Coord) -> Self {
        self.origin = Some(origin);
        self.destination = Some(destination);
        self
    }

    /// The same request with start and end swapped.
    pub fn reversed(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
            origin: self.destination,
            destination: self.origin,
        }
    }
}

// ── Outcome ───────────────────────────────────────────────────────────────────

/// Counters a search reports instead of printing progress.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Junctions visited (BFS, backtracking) or expanded (A*).
    pub visited: usize,
    /// Budget attempts made (backtracking); 1 for single-pass searches.
    pub attempts: usize,
    pub elapsed: Duration,
}

/// Result of one search.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchOutcome {
    /// Junctions from `query.from` to `query.to` inclusive, no repeats.
    /// Empty when no path was found.
    pub path: Vec<Cnn>,
    pub stats: SearchStats,
}

impl SearchOutcome {
    pub fn not_found(stats: SearchStats) -> Self {
        Self { path: Vec::new(), stats }
    }

    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of segments traversed.
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

// ── PathSearch trait ──────────────────────────────────────────────────────────

/// Pluggable path-search algorithm.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one instance can serve
/// destination rankings on a Rayon pool.
pub trait PathSearch: Send + Sync {
    /// Find a junction sequence from `query.from` to `query.to`.
    ///
    /// Never panics for unknown junctions or unreachable goals; returns an
    /// empty path instead.
    fn search(&self, graph: &JunctionGraph, query: &Query) -> SearchOutcome;
}

// ── Strategy ──────────────────────────────────────────────────────────────────

/// Built-in algorithm selector.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    BreadthFirst,
    #[default]
    AStar,
    Backtracking,
    Bidirectional,
}

impl Strategy {
    /// Run this strategy with the bounds from `config`.
    pub fn search(self, graph: &JunctionGraph, query: &Query, config: &SearchConfig) -> SearchOutcome {
        match self {
            Strategy::BreadthFirst => BreadthFirst::from_config(config).search(graph, query),
            Strategy::AStar => AStar::from_config(config).search(graph, query),
            Strategy::Backtracking => Backtracking::from_config(config).search(graph, query),
            Strategy::Bidirectional => Bidirectional::from_config(config).search(graph, query),
        }
    }
}
