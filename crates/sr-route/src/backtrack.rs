//! Budgeted depth-first backtracking, and its bidirectional wrapper.
//!
//! This search exists for turn-by-turn directions.  It explores greedily
//! (neighbours nearest the goal first, staying on a limited-access road
//! while on one) but does not stop at the first arrival: every branch within
//! the distance budget is tried and the shortest arrival kept.
//!
//! # Budget
//!
//! A branch is cut once its accumulated distance (start stub included)
//! exceeds `beeline × factor`.  The first attempt uses the initial factor;
//! each attempt that finds nothing restarts from scratch with the factor
//! raised by one step, up to the ceiling.  Independently, one attempt stops
//! exploring after `max_visited` junction visits; an arrival found before
//! that point is still returned.
//!
//! Exhaustive exploration is expensive.  Use it for one interactive query,
//! and A* for anything batched.

use std::cmp::Ordering;
use std::time::Instant;

use log::{debug, trace, warn};
use rustc_hash::FxHashSet;

use sr_core::{Cnn, Coord, SearchConfig};
use sr_network::JunctionGraph;

use crate::search::{PathSearch, Query, SearchOutcome, SearchStats};

/// Suffix marking a limited-access road, e.g. `US101 NORTHBOUND`.
const LIMITED_ACCESS_SUFFIX: &str = "BOUND";

fn is_limited_access(street: &str) -> bool {
    street.ends_with(LIMITED_ACCESS_SUFFIX)
}

// ── Backtracking ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Backtracking {
    config: SearchConfig,
}

/// A finished backtracking run: the outcome plus the total distance of its
/// path, address stubs included.
struct Scored {
    outcome: SearchOutcome,
    total_mi: Option<f64>,
}

impl Backtracking {
    pub fn from_config(config: &SearchConfig) -> Self {
        Self { config: config.clone() }
    }

    fn run(&self, graph: &JunctionGraph, query: &Query) -> Scored {
        let started = Instant::now();
        let mut stats = SearchStats::default();

        let (Some(from_coord), Some(to_coord)) = (graph.coords(query.from), graph.coords(query.to)) else {
            warn!("backtrack: endpoint {} or {} not in graph", query.from, query.to);
            return Scored { outcome: SearchOutcome::not_found(stats), total_mi: None };
        };
        let origin = query.origin.unwrap_or(from_coord);
        let destination = query.destination.unwrap_or(to_coord);
        let stub_start = origin.distance_mi(from_coord);
        let stub_end = to_coord.distance_mi(destination);

        if query.from == query.to {
            stats.attempts = 1;
            stats.visited = 1;
            stats.elapsed = started.elapsed();
            let outcome = SearchOutcome { path: vec![query.from], stats };
            return Scored { outcome, total_mi: Some(stub_start + stub_end) };
        }

        let mut beeline = origin.distance_mi(destination);
        if beeline == 0.0 {
            beeline = from_coord.distance_mi(to_coord);
        }

        for factor in self.config.budget_factors() {
            stats.attempts += 1;
            let mut attempt = Attempt {
                graph,
                goal: query.to,
                goal_coord: to_coord,
                limit: beeline * factor,
                stub_end,
                max_visited: self.config.backtrack_max_visited,
                visited: 0,
                capped: false,
                path: vec![query.from],
                on_path: FxHashSet::from_iter([query.from]),
                best: None,
            };
            attempt.explore(query.from, stub_start);
            stats.visited += attempt.visited;

            if attempt.capped {
                debug!("backtrack: attempt at ×{factor} hit {} visits", attempt.visited);
            }
            if let Some((path, total)) = attempt.best {
                stats.elapsed = started.elapsed();
                trace!(
                    "backtrack: {} → {} in {} attempts, {:.4} mi",
                    query.from, query.to, stats.attempts, total
                );
                return Scored { outcome: SearchOutcome { path, stats }, total_mi: Some(total) };
            }
            debug!("backtrack: nothing within ×{factor} of {beeline:.4} mi; widening");
        }

        warn!("backtrack: no path from {} to {} within budget", query.from, query.to);
        stats.elapsed = started.elapsed();
        Scored { outcome: SearchOutcome::not_found(stats), total_mi: None }
    }
}

impl Default for Backtracking {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}

impl PathSearch for Backtracking {
    fn search(&self, graph: &JunctionGraph, query: &Query) -> SearchOutcome {
        self.run(graph, query).outcome
    }
}

// ── Attempt ───────────────────────────────────────────────────────────────────

/// One budgeted exploration.
struct Attempt<'g> {
    graph: &'g JunctionGraph,
    goal: Cnn,
    goal_coord: Coord,
    limit: f64,
    stub_end: f64,
    max_visited: usize,
    visited: usize,
    capped: bool,
    /// Current candidate path; `on_path` mirrors it for O(1) cycle checks.
    path: Vec<Cnn>,
    on_path: FxHashSet<Cnn>,
    best: Option<(Vec<Cnn>, f64)>,
}

struct Candidate {
    next: Cnn,
    step: f64,
    to_goal: f64,
    stays_on_highway: bool,
}

impl<'g> Attempt<'g> {
    fn explore(&mut self, here: Cnn, acc: f64) {
        if self.visited >= self.max_visited {
            self.capped = true;
            return;
        }
        self.visited += 1;

        if here == self.goal {
            let total = acc + self.stub_end;
            if total <= self.limit && self.best.as_ref().is_none_or(|(_, best)| total < *best) {
                self.best = Some((self.path.clone(), total));
            }
            return;
        }

        for candidate in self.candidates(here) {
            if self.capped {
                return;
            }
            let acc_next = acc + candidate.step;
            if acc_next > self.limit {
                continue;
            }
            if self.best.as_ref().is_some_and(|(_, best)| acc_next >= *best) {
                continue;
            }

            self.path.push(candidate.next);
            self.on_path.insert(candidate.next);
            self.explore(candidate.next, acc_next);
            self.on_path.remove(&candidate.next);
            self.path.pop();
        }
    }

    /// Unvisited neighbours of `here`, highway continuations first, then by
    /// beeline distance to the goal.
    fn candidates(&self, here: Cnn) -> Vec<Candidate> {
        let Some(here_coord) = self.graph.coords(here) else { return Vec::new() };
        let highway = self.current_highway(here);

        let mut out: Vec<Candidate> = self
            .graph
            .neighbors(here)
            .filter(|next| !self.on_path.contains(next))
            .filter_map(|next| {
                let coord = self.graph.coords(next)?;
                Some(Candidate {
                    next,
                    step: here_coord.distance_mi(coord),
                    to_goal: coord.distance_mi(self.goal_coord),
                    stays_on_highway: highway.is_some_and(|h| {
                        self.graph.get(next).is_some_and(|j| j.has_street(h))
                    }),
                })
            })
            .collect();

        out.sort_by(|a, b| match (a.stays_on_highway, b.stays_on_highway) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => a.to_goal.total_cmp(&b.to_goal),
        });
        out
    }

    /// The limited-access street the path arrived at `here` on, if any.
    fn current_highway(&self, here: Cnn) -> Option<&'g str> {
        let graph: &'g JunctionGraph = self.graph;
        let prev = *self.path.iter().rev().nth(1)?;
        graph
            .common_streets(prev, here)
            .into_iter()
            .find(|s| is_limited_access(s))
    }
}

// ── Bidirectional ─────────────────────────────────────────────────────────────

/// Backtracking from both ends; the shorter result wins.
///
/// One-way segments can hide a route from one end that is visible from the
/// other.  The reverse result is flipped back to start-first before it is
/// compared and returned.  On a tie the forward result is kept.
#[derive(Clone, Debug, Default)]
pub struct Bidirectional {
    inner: Backtracking,
}

impl Bidirectional {
    pub fn from_config(config: &SearchConfig) -> Self {
        Self { inner: Backtracking::from_config(config) }
    }
}

impl PathSearch for Bidirectional {
    fn search(&self, graph: &JunctionGraph, query: &Query) -> SearchOutcome {
        let forward = self.inner.run(graph, query);
        let mut reverse = self.inner.run(graph, &query.reversed());
        reverse.outcome.path.reverse();

        let stats = SearchStats {
            visited: forward.outcome.stats.visited + reverse.outcome.stats.visited,
            attempts: forward.outcome.stats.attempts + reverse.outcome.stats.attempts,
            elapsed: forward.outcome.stats.elapsed + reverse.outcome.stats.elapsed,
        };

        let winner = match (forward.total_mi, reverse.total_mi) {
            (Some(f), Some(r)) if r < f => reverse,
            (None, Some(_)) => reverse,
            _ => forward,
        };
        trace!(
            "bidirectional: {} → {} picked {:?} mi",
            query.from, query.to, winner.total_mi
        );
        SearchOutcome { path: winner.outcome.path, stats }
    }
}
