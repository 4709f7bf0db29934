//! Street-name → junction index.
//!
//! Derived from a [`JunctionGraph`] once and reused across queries, so
//! finding a street's intersections scans one short list instead of the
//! whole graph.  The graph never changes at runtime, so the index is never
//! invalidated.

use rustc_hash::FxHashMap;

use sr_core::Cnn;

use crate::JunctionGraph;

#[derive(Default)]
pub struct StreetIndex {
    by_street: FxHashMap<String, Vec<Cnn>>,
}

impl StreetIndex {
    /// Index every street of every junction.
    ///
    /// Within one street, keys keep graph iteration order; callers that need
    /// them by distance sort per query.
    pub fn build(graph: &JunctionGraph) -> Self {
        let mut by_street: FxHashMap<String, Vec<Cnn>> = FxHashMap::default();
        for junction in graph.iter() {
            for street in &junction.streets {
                by_street.entry(street.clone()).or_default().push(junction.cnn);
            }
        }
        Self { by_street }
    }

    /// Junctions on `street`; empty if the street is unknown.
    pub fn junctions(&self, street: &str) -> &[Cnn] {
        self.by_street.get(street).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, street: &str) -> bool {
        self.by_street.contains_key(street)
    }

    /// Number of distinct streets.
    pub fn len(&self) -> usize {
        self.by_street.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_street.is_empty()
    }
}
