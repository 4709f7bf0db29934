//! City coordinates and planar geo primitives.
//!
//! The source tables store only the fractional part of each degree value;
//! the integer part is fixed for the whole city.  [`PackedCoord`] is that
//! stored form and [`Coord`] is the expanded one.  All distance and bearing
//! math works on `Coord` only.
//!
//! # Planar approximation
//!
//! At city scale the earth is treated as flat.  A latitude difference is
//! converted to miles with a constant factor, a longitude difference with the
//! same factor shrunk by the cosine of the mean latitude:
//!
//! ```text
//! north_mi = Δlat · 69
//! east_mi  = Δlon · 69 · cos(mean_lat)
//! ```
//!
//! Distance is the Euclidean norm of the two deltas, bearing their arctangent.

use std::fmt;

use crate::{CoreError, CoreResult};

/// Miles per degree of latitude.
pub const MILES_PER_DEGREE: f64 = 69.0;

/// Feet per mile, used when rendering short distances.
pub const FEET_PER_MILE: f64 = 5_280.0;

// ── Coord ─────────────────────────────────────────────────────────────────────

/// An expanded decimal-degree coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

impl Coord {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `(east_mi, north_mi)` offset from `self` to `other` on the local plane.
    #[inline]
    pub fn delta_mi(self, other: Coord) -> (f64, f64) {
        let mean_lat = ((self.lat + other.lat) * 0.5).to_radians();
        let east = (other.lon - self.lon) * MILES_PER_DEGREE * mean_lat.cos();
        let north = (other.lat - self.lat) * MILES_PER_DEGREE;
        (east, north)
    }

    /// Planar distance in miles.
    #[inline]
    pub fn distance_mi(self, other: Coord) -> f64 {
        let (east, north) = self.delta_mi(other);
        east.hypot(north)
    }

    /// Compass bearing from `self` to `other` in `[0, 360)`: 0 is north,
    /// 90 is east.
    pub fn bearing_deg(self, other: Coord) -> f64 {
        let (east, north) = self.delta_mi(other);
        let deg = east.atan2(north).to_degrees();
        if deg < 0.0 { deg + 360.0 } else { deg }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

// ── CityOrigin ────────────────────────────────────────────────────────────────

/// The integer-degree part shared by every coordinate in one city.
///
/// The sign of each component decides whether the fraction is added or
/// subtracted, so a western longitude of `-122` expands `.4073` to
/// `-122.4073`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CityOrigin {
    pub lat_deg: i16,
    pub lon_deg: i16,
}

impl CityOrigin {
    pub const SAN_FRANCISCO: CityOrigin = CityOrigin { lat_deg: 37, lon_deg: -122 };
}

impl Default for CityOrigin {
    fn default() -> Self {
        Self::SAN_FRANCISCO
    }
}

#[inline]
fn unpack(whole: i16, frac: f64) -> f64 {
    if whole < 0 { whole as f64 - frac } else { whole as f64 + frac }
}

// ── PackedCoord ───────────────────────────────────────────────────────────────

/// A coordinate as stored in the source tables: fractional degrees only,
/// each component in `[0, 1)`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackedCoord {
    pub lat_frac: f64,
    pub lon_frac: f64,
}

impl PackedCoord {
    #[inline]
    pub fn new(lat_frac: f64, lon_frac: f64) -> Self {
        Self { lat_frac, lon_frac }
    }

    /// Parse the digit strings found in the tables (`"7278"` means `.7278`).
    ///
    /// This is the only place coordinate text becomes a number.
    pub fn from_digits(lat: &str, lon: &str) -> CoreResult<Self> {
        Ok(Self::new(parse_fraction(lat)?, parse_fraction(lon)?))
    }

    /// Expand against the default city origin.
    #[inline]
    pub fn expand(self) -> Coord {
        self.expand_in(CityOrigin::default())
    }

    pub fn expand_in(self, origin: CityOrigin) -> Coord {
        Coord::new(
            unpack(origin.lat_deg, self.lat_frac),
            unpack(origin.lon_deg, self.lon_frac),
        )
    }
}

fn parse_fraction(digits: &str) -> CoreResult<f64> {
    let digits = digits.trim().trim_start_matches('.');
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::Parse(format!(
            "invalid packed coordinate {digits:?}: expected fractional digits"
        )));
    }
    format!("0.{digits}")
        .parse::<f64>()
        .map_err(|e| CoreError::Parse(e.to_string()))
}

// ── Free functions ────────────────────────────────────────────────────────────

/// Expand an optional packed coordinate; absent stays absent.
#[inline]
pub fn expand(packed: Option<PackedCoord>) -> Option<Coord> {
    packed.map(PackedCoord::expand)
}

/// Planar distance in miles, or `None` when either side is unresolved.
///
/// `None` means "not reachable" and must never be read as zero.
#[inline]
pub fn distance(a: Option<Coord>, b: Option<Coord>) -> Option<f64> {
    Some(a?.distance_mi(b?))
}

/// Compass bearing in degrees from `a` to `b`.
#[inline]
pub fn bearing(a: Coord, b: Coord) -> f64 {
    a.bearing_deg(b)
}

/// Bucket a bearing into one of eight compass sectors.
#[inline]
pub fn direction(bearing: f64) -> Compass {
    Compass::from_bearing(bearing)
}

// ── Compass ───────────────────────────────────────────────────────────────────

/// Eight-way compass direction.  Each sector spans 45° centred on its
/// heading, so boundaries fall on odd multiples of 22.5°.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Compass {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Compass {
    const SECTORS: [Compass; 8] = [
        Compass::N,
        Compass::NE,
        Compass::E,
        Compass::SE,
        Compass::S,
        Compass::SW,
        Compass::W,
        Compass::NW,
    ];

    pub fn from_bearing(bearing: f64) -> Compass {
        let normalized = bearing.rem_euclid(360.0);
        let sector = ((normalized + 22.5) / 45.0).floor() as usize % 8;
        Self::SECTORS[sector]
    }

    /// Heading at the centre of the sector.
    pub fn heading(self) -> f64 {
        self as u8 as f64 * 45.0
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Compass::N => "N",
            Compass::NE => "NE",
            Compass::E => "E",
            Compass::SE => "SE",
            Compass::S => "S",
            Compass::SW => "SW",
            Compass::W => "W",
            Compass::NW => "NW",
        }
    }
}

impl fmt::Display for Compass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
