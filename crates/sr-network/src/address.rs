//! Street addresses and the address table.
//!
//! The table is a nested mapping `street → number → packed coordinate`.
//! Addresses arrive already normalized (upper case, standard suffixes); this
//! module only splits them and looks them up exactly.

use std::fmt;

use rustc_hash::FxHashMap;

use sr_core::{Coord, PackedCoord};

// ── Address ───────────────────────────────────────────────────────────────────

/// A normalized street address such as `423 BURROWS ST`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address {
    pub number: u32,
    pub street: String,
}

impl Address {
    pub fn new(number: u32, street: impl Into<String>) -> Self {
        Self { number, street: street.into() }
    }

    /// Split at the first whitespace run into number and street.
    ///
    /// Returns `None` when the number is not an integer or the street is
    /// missing.
    pub fn parse(s: &str) -> Option<Address> {
        let (number, street) = s.trim().split_once(char::is_whitespace)?;
        let number = number.parse::<u32>().ok()?;
        let street = street.trim();
        if street.is_empty() {
            return None;
        }
        Some(Address::new(number, street))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.number, self.street)
    }
}

// ── AddressBook ───────────────────────────────────────────────────────────────

/// Read-only address table.
#[derive(Debug, Default)]
pub struct AddressBook {
    streets: FxHashMap<String, FxHashMap<u32, PackedCoord>>,
    len: usize,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace one address.
    pub fn insert(&mut self, street: impl Into<String>, number: u32, packed: PackedCoord) {
        if self.streets.entry(street.into()).or_default().insert(number, packed).is_none() {
            self.len += 1;
        }
    }

    /// Number of distinct addresses.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn street_count(&self) -> usize {
        self.streets.len()
    }

    pub fn has_street(&self, street: &str) -> bool {
        self.streets.contains_key(street)
    }

    pub fn lookup(&self, street: &str, number: u32) -> Option<PackedCoord> {
        self.streets.get(street)?.get(&number).copied()
    }

    /// Expanded coordinate of a parsed address.
    pub fn coords(&self, address: &Address) -> Option<Coord> {
        sr_core::expand(self.lookup(&address.street, address.number))
    }

    /// Expanded coordinate of a normalized address string, `None` if it does
    /// not parse or is not in the table.
    pub fn address_coords(&self, address: &str) -> Option<Coord> {
        self.coords(&Address::parse(address)?)
    }
}
