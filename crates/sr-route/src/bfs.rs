//! Breadth-first search: fewest segments, distances ignored.

use std::collections::VecDeque;
use std::time::Instant;

use log::{trace, warn};
use rustc_hash::{FxHashMap, FxHashSet};

use sr_core::SearchConfig;
use sr_network::JunctionGraph;

use crate::reconstruct::reconstruct;
use crate::search::{PathSearch, Query, SearchOutcome, SearchStats};

/// Level-order traversal of the adjacency lists.
///
/// `max_visited` caps the number of junctions dequeued, not the path
/// length, so a misconfigured or enormous graph cannot run away.  The start
/// junction is always the first element of a found path.
#[derive(Copy, Clone, Debug)]
pub struct BreadthFirst {
    pub max_visited: usize,
}

impl BreadthFirst {
    pub fn from_config(config: &SearchConfig) -> Self {
        Self { max_visited: config.bfs_max_visited }
    }
}

impl Default for BreadthFirst {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}

impl PathSearch for BreadthFirst {
    fn search(&self, graph: &JunctionGraph, query: &Query) -> SearchOutcome {
        let started = Instant::now();
        let mut stats = SearchStats { attempts: 1, ..SearchStats::default() };

        if !graph.contains(query.from) || !graph.contains(query.to) {
            warn!("bfs: endpoint {} or {} not in graph", query.from, query.to);
            return SearchOutcome::not_found(stats);
        }

        let mut queue = VecDeque::from([query.from]);
        let mut seen: FxHashSet<_> = FxHashSet::default();
        let mut came_from = FxHashMap::default();
        seen.insert(query.from);

        while let Some(here) = queue.pop_front() {
            if here == query.to {
                stats.elapsed = started.elapsed();
                trace!("bfs: {} → {} after {} visits", query.from, query.to, stats.visited);
                let path = reconstruct(&came_from, here, graph.len());
                return SearchOutcome { path, stats };
            }
            if stats.visited >= self.max_visited {
                warn!("bfs: gave up after {} visits", stats.visited);
                break;
            }
            stats.visited += 1;

            for next in graph.neighbors(here) {
                if seen.insert(next) {
                    came_from.insert(next, here);
                    queue.push_back(next);
                }
            }
        }

        if stats.visited < self.max_visited {
            warn!("bfs: no path from {} to {}", query.from, query.to);
        }
        stats.elapsed = started.elapsed();
        SearchOutcome::not_found(stats)
    }
}
