//! `sr-network` — the street network the route engine searches.
//!
//! # Crate layout
//!
//! | Module           | Contents                                               |
//! |------------------|--------------------------------------------------------|
//! | [`graph`]        | `Junction`, `JunctionGraph`, `JunctionGraphBuilder`    |
//! | [`address`]      | `Address`, `AddressBook`                               |
//! | [`street_index`] | `StreetIndex` (street name → junctions)                |
//! | [`nearest`]      | `nearest_junction`, `resolve_address`, `Endpoint`      |
//! | [`loader`]       | CSV loaders for both tables                            |
//! | [`error`]        | `NetworkError`, `NetworkResult<T>`                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                |
//! |---------|-------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.    |

pub mod address;
pub mod error;
pub mod graph;
pub mod loader;
pub mod nearest;
pub mod street_index;

#[cfg(test)]
mod tests;

pub use address::{Address, AddressBook};
pub use error::{NetworkError, NetworkResult};
pub use graph::{Junction, JunctionGraph, JunctionGraphBuilder};
pub use loader::{load_addresses_csv, load_addresses_reader, load_junctions_csv, load_junctions_reader};
pub use nearest::{Endpoint, nearest_junction, resolve_address};
pub use street_index::StreetIndex;
