//! Nearest-junction resolution.
//!
//! An address enters the street network at the closest junction on its own
//! street.  When the street is unknown to the index (naming mismatch, or no
//! street given) the whole graph is scanned instead: slower, but it always
//! yields an answer for a non-empty graph.
//!
//! Ties keep the first junction encountered, so results are stable for a
//! fixed load order.

use log::{debug, warn};

use sr_core::{Cnn, Coord};

use crate::{Address, AddressBook, JunctionGraph, StreetIndex};

/// An address resolved onto the network.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Endpoint {
    pub address: Address,
    pub coord: Coord,
    pub junction: Cnn,
}

/// The junction closest to `target`, preferring junctions on `street`.
///
/// Returns `None` only when the graph is empty.
pub fn nearest_junction(
    graph: &JunctionGraph,
    index: &StreetIndex,
    target: Coord,
    street: Option<&str>,
) -> Option<Cnn> {
    if let Some(street) = street {
        let on_street = index.junctions(street);
        if let Some(best) = closest(graph, on_street.iter().copied(), target) {
            return Some(best);
        }
        debug!("street {street:?} not indexed; scanning all {} junctions", graph.len());
    }
    closest(graph, graph.iter().map(|j| j.cnn), target)
}

fn closest(graph: &JunctionGraph, candidates: impl Iterator<Item = Cnn>, target: Coord) -> Option<Cnn> {
    let mut best: Option<(Cnn, f64)> = None;
    for cnn in candidates {
        let Some(coord) = graph.coords(cnn) else { continue };
        let d = coord.distance_mi(target);
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((cnn, d));
        }
    }
    best.map(|(cnn, _)| cnn)
}

/// Parse, locate and snap a normalized address.
///
/// `None` when the address does not parse, is missing from the table, or
/// the graph is empty.
pub fn resolve_address(
    book: &AddressBook,
    graph: &JunctionGraph,
    index: &StreetIndex,
    address: &str,
) -> Option<Endpoint> {
    let Some(parsed) = Address::parse(address) else {
        warn!("cannot parse address {address:?}");
        return None;
    };
    let Some(coord) = book.coords(&parsed) else {
        warn!("address {parsed} not in address table");
        return None;
    };
    let junction = nearest_junction(graph, index, coord, Some(&parsed.street))?;
    Some(Endpoint { address: parsed, coord, junction })
}
