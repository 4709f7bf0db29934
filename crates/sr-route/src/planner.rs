//! Address-level entry points.
//!
//! [`RoutePlanner`] bundles the read-only tables with a [`SearchConfig`] and
//! turns address strings into searches, distances, descriptions and
//! rankings.  It owns nothing mutable, so one planner can serve any number
//! of queries (and, with the `parallel` feature, rank on many threads).
//!
//! # Example
//!
//! ```rust,ignore
//! let index = StreetIndex::build(&graph);
//! let planner = RoutePlanner::new(&book, &graph, &index);
//! let path = planner.find_path("423 BURROWS ST", "350 GIRARD ST", Strategy::AStar);
//! let text = planner.describe_route(&path, "423 BURROWS ST", "350 GIRARD ST");
//! ```

use log::warn;

use sr_core::{Cnn, CoreResult, SearchConfig};
use sr_network::{AddressBook, Endpoint, JunctionGraph, StreetIndex, resolve_address};

use crate::distance::{route_distance, route_distance_between};
use crate::narrative::{RouteDescription, describe_route};
use crate::search::{Query, SearchOutcome, SearchStats, Strategy};

// ── Ranking types ─────────────────────────────────────────────────────────────

/// A named place to rank, e.g. a school.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Destination {
    pub name: String,
    pub address: String,
}

impl Destination {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self { name: name.into(), address: address.into() }
    }
}

/// A destination with its distance from the ranking's start address.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedDestination {
    pub name: String,
    pub address: String,
    /// Route miles when `routed`, beeline miles otherwise; `None` when the
    /// address cannot be resolved at all.
    pub miles: Option<f64>,
    pub beeline_mi: Option<f64>,
    /// `true` when `miles` follows streets.
    pub routed: bool,
    pub path: Vec<Cnn>,
}

// ── RoutePlanner ──────────────────────────────────────────────────────────────

pub struct RoutePlanner<'a> {
    book: &'a AddressBook,
    graph: &'a JunctionGraph,
    index: &'a StreetIndex,
    config: SearchConfig,
}

impl<'a> RoutePlanner<'a> {
    /// A planner with the default [`SearchConfig`].
    pub fn new(book: &'a AddressBook, graph: &'a JunctionGraph, index: &'a StreetIndex) -> Self {
        Self { book, graph, index, config: SearchConfig::default() }
    }

    /// Replace the search bounds after validating them.
    pub fn with_config(mut self, config: SearchConfig) -> CoreResult<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn graph(&self) -> &'a JunctionGraph {
        self.graph
    }

    /// Parse, locate and snap one address onto the network.
    pub fn resolve(&self, address: &str) -> Option<Endpoint> {
        resolve_address(self.book, self.graph, self.index, address)
    }

    /// A search query between two addresses, or `None` if either does not
    /// resolve.
    pub fn query(&self, start: &str, end: &str) -> Option<Query> {
        let from = self.resolve(start)?;
        let to = self.resolve(end)?;
        Some(Query::between(from.junction, to.junction).with_addresses(from.coord, to.coord))
    }

    /// Search between two addresses, reporting statistics.
    pub fn search(&self, start: &str, end: &str, strategy: Strategy) -> SearchOutcome {
        match self.query(start, end) {
            Some(query) => strategy.search(self.graph, &query, &self.config),
            None => SearchOutcome::not_found(SearchStats::default()),
        }
    }

    /// Junctions from the start address's entry point to the end
    /// address's; empty when unavailable.
    pub fn find_path(&self, start: &str, end: &str, strategy: Strategy) -> Vec<Cnn> {
        self.search(start, end, strategy).path
    }

    pub fn route_distance(&self, path: &[Cnn], start: Option<&str>, end: Option<&str>) -> f64 {
        route_distance(self.book, self.graph, path, start, end)
    }

    pub fn describe_route(&self, path: &[Cnn], start: &str, end: &str) -> RouteDescription {
        describe_route(self.book, self.graph, path, start, end, &self.config)
    }

    /// Bidirectional backtracking search, described.
    pub fn directions(&self, start: &str, end: &str) -> RouteDescription {
        let path = self.find_path(start, end, Strategy::Bidirectional);
        self.describe_route(&path, start, end)
    }

    /// Rank `destinations` by distance from `start`, nearest first.
    ///
    /// Each destination gets an A* search; unreachable ones fall back to
    /// the beeline and unresolvable ones sort last.  Ties keep input order.
    pub fn rank_destinations(&self, start: &str, destinations: &[Destination]) -> Vec<RankedDestination> {
        let Some(from) = self.resolve(start) else {
            warn!("cannot rank from unresolvable address {start:?}");
            return destinations.iter().map(|d| self.unranked(d, None)).collect();
        };

        #[cfg(not(feature = "parallel"))]
        let mut ranked: Vec<RankedDestination> = destinations
            .iter()
            .map(|d| self.rank_one(&from, d))
            .collect();

        #[cfg(feature = "parallel")]
        let mut ranked: Vec<RankedDestination> = {
            use rayon::prelude::*;

            destinations
                .par_iter()
                .map(|d| self.rank_one(&from, d))
                .collect()
        };

        ranked.sort_by(|a, b| match (a.miles, b.miles) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        ranked
    }

    fn rank_one(&self, from: &Endpoint, destination: &Destination) -> RankedDestination {
        let Some(to) = self.resolve(&destination.address) else {
            let beeline = self.book.address_coords(&destination.address).map(|c| from.coord.distance_mi(c));
            return self.unranked(destination, beeline);
        };
        let beeline = from.coord.distance_mi(to.coord);

        let query = Query::between(from.junction, to.junction).with_addresses(from.coord, to.coord);
        let outcome = Strategy::AStar.search(self.graph, &query, &self.config);
        if !outcome.is_found() {
            return self.unranked(destination, Some(beeline));
        }

        RankedDestination {
            name: destination.name.clone(),
            address: destination.address.clone(),
            miles: Some(route_distance_between(self.graph, &outcome.path, Some(from.coord), Some(to.coord))),
            beeline_mi: Some(beeline),
            routed: true,
            path: outcome.path,
        }
    }

    fn unranked(&self, destination: &Destination, beeline: Option<f64>) -> RankedDestination {
        RankedDestination {
            name: destination.name.clone(),
            address: destination.address.clone(),
            miles: beeline,
            beeline_mi: beeline,
            routed: false,
            path: Vec::new(),
        }
    }
}
