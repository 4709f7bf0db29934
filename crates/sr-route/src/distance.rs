//! Route distance accumulation.
//!
//! A route's length is the walk from the start address to the first
//! junction, along every segment of the path, and from the last junction to
//! the end address.  Everything here is a pure function of its inputs;
//! rankings call it repeatedly while comparing candidates.

use log::warn;

use sr_core::{Cnn, Coord};
use sr_network::{AddressBook, JunctionGraph};

/// Sum of junction-to-junction distances along `path`, in miles.
///
/// A segment touching an unknown junction contributes nothing.
pub fn path_length_mi(graph: &JunctionGraph, path: &[Cnn]) -> f64 {
    path.windows(2)
        .map(|w| {
            graph.distance(w[0], w[1]).unwrap_or_else(|| {
                warn!("segment {} → {} has no position; counted as 0", w[0], w[1]);
                0.0
            })
        })
        .sum()
}

/// Route length in miles between two already-resolved positions.
///
/// An empty `path` falls back to the beeline between `origin` and
/// `destination` (0 if either is unknown).  Otherwise each stub is added
/// when its position is known.
pub fn route_distance_between(
    graph: &JunctionGraph,
    path: &[Cnn],
    origin: Option<Coord>,
    destination: Option<Coord>,
) -> f64 {
    let (Some(&first), Some(&last)) = (path.first(), path.last()) else {
        return sr_core::distance(origin, destination).unwrap_or(0.0);
    };

    let start_stub = sr_core::distance(origin, graph.coords(first)).unwrap_or(0.0);
    let end_stub = sr_core::distance(graph.coords(last), destination).unwrap_or(0.0);
    start_stub + path_length_mi(graph, path) + end_stub
}

/// Route length in miles for normalized address strings.
///
/// `start`/`end` are optional: without them the matching stub is left out.
/// A given address that cannot be resolved also contributes no stub.
pub fn route_distance(
    book: &AddressBook,
    graph: &JunctionGraph,
    path: &[Cnn],
    start: Option<&str>,
    end: Option<&str>,
) -> f64 {
    let resolve = |address: Option<&str>| {
        let address = address?;
        let coord = book.address_coords(address);
        if coord.is_none() {
            warn!("address {address:?} not resolvable; its stub is omitted");
        }
        coord
    };
    route_distance_between(graph, path, resolve(start), resolve(end))
}
