//! Junction graph and builder.
//!
//! # Data layout
//!
//! Junctions live in a `Vec` in insertion order, with an `FxHashMap` from
//! [`Cnn`] to slot.  Iteration order is therefore the order the table was
//! loaded in, which keeps full-graph scans (and their tie-breaking)
//! reproducible.
//!
//! # One-way streets
//!
//! Adjacency lists are directed.  A segment is two-way only when each
//! junction lists the other; if `A` lists `B` but `B` does not list `A`,
//! the segment `A → B` is one-way.
//!
//! # Dangling references
//!
//! An adjacency entry may name a CNN that is not in the graph.  Traversal
//! via [`JunctionGraph::neighbors`] skips such entries rather than failing.

use log::debug;
use rustc_hash::FxHashMap;

use sr_core::{Cnn, Coord, PackedCoord};

use crate::{NetworkError, NetworkResult};

// ── Junction ──────────────────────────────────────────────────────────────────

/// One street intersection.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Junction {
    pub cnn: Cnn,
    /// Position as stored in the source table.
    pub packed: PackedCoord,
    /// Normalized names of every street meeting here.
    pub streets: Vec<String>,
    /// Junctions reachable directly from this one.
    pub adjacent: Vec<Cnn>,
}

impl Junction {
    pub fn new(cnn: Cnn, packed: PackedCoord) -> Self {
        Self { cnn, packed, streets: Vec::new(), adjacent: Vec::new() }
    }

    pub fn with_streets<S: Into<String>>(mut self, streets: impl IntoIterator<Item = S>) -> Self {
        self.streets = streets.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_adjacent(mut self, adjacent: impl IntoIterator<Item = Cnn>) -> Self {
        self.adjacent = adjacent.into_iter().collect();
        self
    }

    #[inline]
    pub fn coord(&self) -> Coord {
        self.packed.expand()
    }

    #[inline]
    pub fn has_street(&self, street: &str) -> bool {
        self.streets.iter().any(|s| s == street)
    }
}

// ── JunctionGraph ─────────────────────────────────────────────────────────────

/// Read-only intersection graph.  Build with [`JunctionGraphBuilder`].
#[derive(Debug)]
pub struct JunctionGraph {
    junctions: Vec<Junction>,
    slots: FxHashMap<Cnn, u32>,
}

impl JunctionGraph {
    /// A graph with no junctions.  Every search against it finds nothing.
    pub fn empty() -> Self {
        JunctionGraphBuilder::new().build()
    }

    pub fn len(&self) -> usize {
        self.junctions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.junctions.is_empty()
    }

    #[inline]
    pub fn contains(&self, cnn: Cnn) -> bool {
        self.slots.contains_key(&cnn)
    }

    #[inline]
    pub fn get(&self, cnn: Cnn) -> Option<&Junction> {
        self.slots.get(&cnn).map(|&slot| &self.junctions[slot as usize])
    }

    /// All junctions in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Junction> + '_ {
        self.junctions.iter()
    }

    /// Expanded coordinate of `cnn`, or `None` if the key is unknown.
    pub fn coords(&self, cnn: Cnn) -> Option<Coord> {
        let coord = self.get(cnn).map(Junction::coord);
        if coord.is_none() {
            debug!("junction {cnn} not found");
        }
        coord
    }

    /// Street names at `cnn`; empty for unknown keys.
    pub fn streets(&self, cnn: Cnn) -> &[String] {
        self.get(cnn).map(|j| j.streets.as_slice()).unwrap_or(&[])
    }

    /// Streets shared by `a` and `b`, in `a`'s order.
    pub fn common_streets(&self, a: Cnn, b: Cnn) -> Vec<&str> {
        let Some(jb) = self.get(b) else { return Vec::new() };
        self.streets(a)
            .iter()
            .filter(|s| jb.has_street(s))
            .map(String::as_str)
            .collect()
    }

    /// Outgoing neighbours of `cnn` that exist in the graph.
    ///
    /// Dangling adjacency entries are skipped.
    pub fn neighbors(&self, cnn: Cnn) -> impl Iterator<Item = Cnn> + '_ {
        self.get(cnn)
            .map(|j| j.adjacent.as_slice())
            .unwrap_or(&[])
            .iter()
            .copied()
            .filter(move |&next| {
                let known = self.contains(next);
                if !known {
                    debug!("junction {cnn} lists unknown neighbour {next}; skipping");
                }
                known
            })
    }

    /// `true` if `to` appears in `from`'s adjacency list.
    pub fn has_edge(&self, from: Cnn, to: Cnn) -> bool {
        self.get(from).is_some_and(|j| j.adjacent.contains(&to))
    }

    /// Planar miles between two junctions, `None` if either is unknown.
    #[inline]
    pub fn distance(&self, a: Cnn, b: Cnn) -> Option<f64> {
        sr_core::distance(self.coords(a), self.coords(b))
    }
}

// ── JunctionGraphBuilder ──────────────────────────────────────────────────────

/// Construct a [`JunctionGraph`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use sr_core::{Cnn, PackedCoord};
/// use sr_network::{Junction, JunctionGraphBuilder};
///
/// let mut b = JunctionGraphBuilder::new();
/// b.add_junction(Junction::new(Cnn(1), PackedCoord::new(0.7278, 0.4073)).with_streets(["BURROWS ST"]))?;
/// b.add_junction(Junction::new(Cnn(2), PackedCoord::new(0.7278, 0.4060)).with_streets(["BURROWS ST"]))?;
/// b.add_segment(Cnn(1), Cnn(2))?;
/// let graph = b.build();
/// assert_eq!(graph.len(), 2);
/// assert!(graph.has_edge(Cnn(2), Cnn(1)));
/// # Ok::<(), sr_network::NetworkError>(())
/// ```
#[derive(Debug)]
pub struct JunctionGraphBuilder {
    junctions: Vec<Junction>,
    slots: FxHashMap<Cnn, u32>,
}

impl JunctionGraphBuilder {
    pub fn new() -> Self {
        Self { junctions: Vec::new(), slots: FxHashMap::default() }
    }

    /// Pre-allocate for the expected junction count.
    pub fn with_capacity(junctions: usize) -> Self {
        Self {
            junctions: Vec::with_capacity(junctions),
            slots: FxHashMap::with_capacity_and_hasher(junctions, Default::default()),
        }
    }

    /// Add a junction.  Its adjacency list is kept as given, dangling
    /// entries included.
    pub fn add_junction(&mut self, junction: Junction) -> NetworkResult<()> {
        if self.slots.contains_key(&junction.cnn) {
            return Err(NetworkError::DuplicateJunction(junction.cnn));
        }
        self.slots.insert(junction.cnn, self.junctions.len() as u32);
        self.junctions.push(junction);
        Ok(())
    }

    /// Add a one-way segment `from → to`.  Both junctions must exist.
    pub fn add_one_way(&mut self, from: Cnn, to: Cnn) -> NetworkResult<()> {
        if !self.slots.contains_key(&to) {
            return Err(NetworkError::JunctionNotFound(to));
        }
        let slot = *self.slots.get(&from).ok_or(NetworkError::JunctionNotFound(from))?;
        let adjacent = &mut self.junctions[slot as usize].adjacent;
        if !adjacent.contains(&to) {
            adjacent.push(to);
        }
        Ok(())
    }

    /// Add a two-way segment between `a` and `b`.
    pub fn add_segment(&mut self, a: Cnn, b: Cnn) -> NetworkResult<()> {
        self.add_one_way(a, b)?;
        self.add_one_way(b, a)
    }

    pub fn len(&self) -> usize {
        self.junctions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.junctions.is_empty()
    }

    pub fn build(self) -> JunctionGraph {
        JunctionGraph { junctions: self.junctions, slots: self.slots }
    }
}

impl Default for JunctionGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
