//! A* search over street distance.
//!
//! The heuristic is the beeline distance to the goal junction.  Edge costs
//! are beeline distances between adjacent junctions, so the heuristic never
//! overestimates a real street path.
//!
//! The working set lives in an [`AStarSearch`] session that can be driven
//! one expansion at a time with [`AStarSearch::step`] (for a view that wants
//! to draw the frontier) or to completion with [`AStarSearch::run`].

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Instant;

use log::{trace, warn};
use rustc_hash::{FxHashMap, FxHashSet};

use sr_core::{Cnn, Coord, SearchConfig};
use sr_network::JunctionGraph;

use crate::reconstruct::reconstruct;
use crate::search::{PathSearch, Query, SearchOutcome, SearchStats};

// ── Open-set entry ────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug)]
struct OpenEntry {
    f: f64,
    seq: u64,
    node: Cnn,
}

// Min-heap by f-score, then insertion order (reversed from BinaryHeap's max).
impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f.total_cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

// ── Session ───────────────────────────────────────────────────────────────────

/// What one call to [`AStarSearch::step`] did.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Step {
    /// `node` was closed; `frontier` entries remain open.
    Expanded { node: Cnn, frontier: usize },
    /// The goal was popped.
    Found,
    /// Open set empty or expansion cap reached.
    Exhausted,
}

/// One in-flight A* query and its working set.
pub struct AStarSearch<'g> {
    graph: &'g JunctionGraph,
    goal: Cnn,
    goal_coord: Option<Coord>,
    open: BinaryHeap<OpenEntry>,
    closed: FxHashSet<Cnn>,
    g_score: FxHashMap<Cnn, f64>,
    f_score: FxHashMap<Cnn, f64>,
    came_from: FxHashMap<Cnn, Cnn>,
    seq: u64,
    expanded: usize,
    max_expansions: usize,
    done: Option<Step>,
}

impl<'g> AStarSearch<'g> {
    pub fn new(graph: &'g JunctionGraph, from: Cnn, to: Cnn, max_expansions: usize) -> Self {
        let goal_coord = graph.coords(to);
        let mut search = Self {
            graph,
            goal: to,
            goal_coord,
            open: BinaryHeap::new(),
            closed: FxHashSet::default(),
            g_score: FxHashMap::default(),
            f_score: FxHashMap::default(),
            came_from: FxHashMap::default(),
            seq: 0,
            expanded: 0,
            max_expansions,
            done: None,
        };

        match (graph.coords(from), goal_coord) {
            (Some(start), Some(goal)) => {
                let h = start.distance_mi(goal);
                search.g_score.insert(from, 0.0);
                search.f_score.insert(from, h);
                search.push(from, h);
            }
            _ => {
                warn!("a*: endpoint {from} or {to} not in graph");
                search.done = Some(Step::Exhausted);
            }
        }
        search
    }

    fn push(&mut self, node: Cnn, f: f64) {
        self.open.push(OpenEntry { f, seq: self.seq, node });
        self.seq += 1;
    }

    /// Pop and expand one open junction.
    pub fn step(&mut self) -> Step {
        if let Some(done) = self.done {
            return done;
        }

        // Skip entries superseded by a later, better insert.
        let here = loop {
            match self.open.pop() {
                None => return self.finish(Step::Exhausted),
                Some(entry) if self.closed.contains(&entry.node) => continue,
                Some(entry) => break entry.node,
            }
        };

        if here == self.goal {
            return self.finish(Step::Found);
        }
        if self.expanded >= self.max_expansions {
            warn!("a*: gave up after {} expansions", self.expanded);
            return self.finish(Step::Exhausted);
        }

        self.closed.insert(here);
        self.expanded += 1;
        let g_here = self.g_score.get(&here).copied().unwrap_or(f64::INFINITY);

        let graph = self.graph;
        for next in graph.neighbors(here) {
            if self.closed.contains(&next) {
                continue;
            }
            let Some(step) = graph.distance(here, next) else { continue };
            let tentative = g_here + step;
            if self.g_score.get(&next).is_none_or(|&g| tentative < g) {
                let h = sr_core::distance(graph.coords(next), self.goal_coord).unwrap_or(0.0);
                self.came_from.insert(next, here);
                self.g_score.insert(next, tentative);
                self.f_score.insert(next, tentative + h);
                self.push(next, tentative + h);
            }
        }

        Step::Expanded { node: here, frontier: self.open.len() }
    }

    fn finish(&mut self, step: Step) -> Step {
        self.done = Some(step);
        step
    }

    /// Step until the goal is found or the search is exhausted.
    pub fn run(&mut self) -> Step {
        loop {
            match self.step() {
                Step::Expanded { .. } => continue,
                done => return done,
            }
        }
    }

    /// Junctions expanded so far.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Open entries, stale duplicates included.
    pub fn frontier_len(&self) -> usize {
        self.open.len()
    }

    pub fn is_closed(&self, cnn: Cnn) -> bool {
        self.closed.contains(&cnn)
    }

    /// Best known cost from the start to `cnn`.
    pub fn g_score(&self, cnn: Cnn) -> Option<f64> {
        self.g_score.get(&cnn).copied()
    }

    /// `g + h` recorded for `cnn` when it was last opened.
    pub fn f_score(&self, cnn: Cnn) -> Option<f64> {
        self.f_score.get(&cnn).copied()
    }

    /// The found path, or empty if the goal has not been reached.
    pub fn path(&self) -> Vec<Cnn> {
        if self.done == Some(Step::Found) {
            reconstruct(&self.came_from, self.goal, self.graph.len())
        } else {
            Vec::new()
        }
    }
}

// ── AStar ─────────────────────────────────────────────────────────────────────

/// Run-to-completion A*.
#[derive(Copy, Clone, Debug)]
pub struct AStar {
    pub max_expansions: usize,
}

impl AStar {
    pub fn from_config(config: &SearchConfig) -> Self {
        Self { max_expansions: config.astar_max_expansions }
    }
}

impl Default for AStar {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}

impl PathSearch for AStar {
    fn search(&self, graph: &JunctionGraph, query: &Query) -> SearchOutcome {
        let started = Instant::now();
        let mut session = AStarSearch::new(graph, query.from, query.to, self.max_expansions);
        let result = session.run();

        let stats = SearchStats {
            visited: session.expanded(),
            attempts: 1,
            elapsed: started.elapsed(),
        };
        if result != Step::Found {
            warn!("a*: no path from {} to {}", query.from, query.to);
            return SearchOutcome::not_found(stats);
        }
        trace!("a*: {} → {} after {} expansions", query.from, query.to, stats.visited);
        SearchOutcome { path: session.path(), stats }
    }
}
