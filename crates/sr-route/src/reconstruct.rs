//! Predecessor-map path reconstruction.

use log::error;
use rustc_hash::{FxHashMap, FxHashSet};

use sr_core::Cnn;

/// Walk predecessor links back from `goal` and return the path start-first.
///
/// The walk ends at the first node without a predecessor (the search
/// start).  A predecessor map that loops back on itself is a search bug:
/// the walk stops at the repeated node and logs it.  `max_len` (normally the
/// graph's junction count) bounds the result as a final safety net.
pub fn reconstruct(came_from: &FxHashMap<Cnn, Cnn>, goal: Cnn, max_len: usize) -> Vec<Cnn> {
    let mut path = vec![goal];
    let mut seen: FxHashSet<Cnn> = FxHashSet::default();
    seen.insert(goal);

    let mut cur = goal;
    while let Some(&prev) = came_from.get(&cur) {
        if !seen.insert(prev) {
            error!("predecessor cycle at junction {prev} while reconstructing path to {goal}; truncating");
            break;
        }
        if path.len() >= max_len {
            error!("reconstructed path to {goal} exceeds {max_len} junctions; truncating");
            break;
        }
        path.push(prev);
        cur = prev;
    }

    path.reverse();
    path
}
