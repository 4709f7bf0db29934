//! Junction identifier.
//!
//! Junctions are keyed by their CNN (centerline network number) from the
//! city's street-centerline dataset.  Keys are sparse, so unlike a dense
//! node index a `Cnn` is never used to index a `Vec` directly.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Centerline network number: the key of one street intersection.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Cnn(pub u32);

impl fmt::Display for Cnn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Cnn {
    #[inline(always)]
    fn from(n: u32) -> Cnn {
        Cnn(n)
    }
}

impl FromStr for Cnn {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Cnn, CoreError> {
        s.trim()
            .parse::<u32>()
            .map(Cnn)
            .map_err(|_| CoreError::Parse(format!("invalid CNN {s:?}")))
    }
}
