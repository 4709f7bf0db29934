//! `sr-core` — foundational types for the school-route engine.
//!
//! This crate is a dependency of every other `sr-*` crate.  It has no `sr-*`
//! dependencies and only `thiserror` (plus optional `serde`) from outside.
//!
//! # What lives here
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`ids`]    | `Cnn` (centerline network number, the junction key)       |
//! | [`geo`]    | `Coord`, `PackedCoord`, planar distance, bearing, compass |
//! | [`config`] | `SearchConfig`: every search bound in one place           |
//! | [`error`]  | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SearchConfig;
pub use error::{CoreError, CoreResult};
pub use geo::{CityOrigin, Compass, Coord, PackedCoord, bearing, direction, distance, expand};
pub use ids::Cnn;
