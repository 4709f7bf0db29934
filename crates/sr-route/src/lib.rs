//! `sr-route` — path search and route narratives over a junction graph.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`search`]      | `PathSearch` trait, `Query`, `SearchOutcome`, `Strategy`  |
//! | [`bfs`]         | `BreadthFirst`                                            |
//! | [`astar`]       | `AStar`, step-wise `AStarSearch` session                  |
//! | [`backtrack`]   | `Backtracking` (escalating budget), `Bidirectional`       |
//! | [`reconstruct`] | predecessor-map walk with cycle detection                 |
//! | [`distance`]    | `route_distance`, `path_length_mi`                        |
//! | [`narrative`]   | `describe_route`, `Turn`, `RouteDescription`              |
//! | [`planner`]     | `RoutePlanner`, destination ranking                       |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.     |
//! | `parallel` | Ranks destinations on a Rayon pool.                    |

pub mod astar;
pub mod backtrack;
pub mod bfs;
pub mod distance;
pub mod narrative;
pub mod planner;
pub mod reconstruct;
pub mod search;


pub use astar::{AStar, AStarSearch, Step};
pub use backtrack::{Backtracking, Bidirectional};
pub use bfs::BreadthFirst;
pub use distance::{path_length_mi, route_distance, route_distance_between};
pub use narrative::{RouteDescription, Turn, describe_route, format_distance, title_case};
pub use planner::{Destination, RankedDestination, RoutePlanner};
pub use reconstruct::reconstruct;
pub use search::{PathSearch, Query, SearchOutcome, SearchStats, Strategy};

use sr_core::{Cnn, SearchConfig};
use sr_network::{AddressBook, JunctionGraph, StreetIndex};

/// Resolve both addresses and search between them with A* and default
/// bounds.  Empty when either address is unresolvable or no path exists.
pub fn find_path(
    book: &AddressBook,
    graph: &JunctionGraph,
    index: &StreetIndex,
    start: &str,
    end: &str,
) -> Vec<Cnn> {
    let planner = RoutePlanner::new(book, graph, index);
    match planner.query(start, end) {
        Some(query) => Strategy::default().search(graph, &query, &SearchConfig::default()).path,
        None => Vec::new(),
    }
}
