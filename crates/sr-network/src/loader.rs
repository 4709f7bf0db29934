//! CSV loaders for the junction and address tables.
//!
//! Loading is the single boundary where table text turns into numbers;
//! nothing downstream parses strings.
//!
//! # Junction table
//!
//! ```csv
//! cnn,lat,lon,streets,adjacent
//! 20889,7281,4080,BURROWS ST;MADISON ST,20653;20890
//! 20653,7281,4062,BURROWS ST;GIRARD ST,20889;20652
//! ```
//!
//! `lat`/`lon` hold fractional digits only (`7281` is `.7281`).  `streets`
//! and `adjacent` are `;`-separated; `adjacent` may be empty for a junction
//! with no outgoing segments.
//!
//! # Address table
//!
//! ```csv
//! street,number,lat,lon
//! BURROWS ST,423,7278,4073
//! ```

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use sr_core::{Cnn, PackedCoord};

use crate::{AddressBook, Junction, JunctionGraph, JunctionGraphBuilder, NetworkError, NetworkResult};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct JunctionRecord {
    cnn:      u32,
    lat:      String,
    lon:      String,
    streets:  String,
    #[serde(default)]
    adjacent: String,
}

#[derive(Deserialize)]
struct AddressRecord {
    street: String,
    number: u32,
    lat:    String,
    lon:    String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the junction graph from a CSV file.
pub fn load_junctions_csv(path: &Path) -> NetworkResult<JunctionGraph> {
    let file = std::fs::File::open(path)?;
    load_junctions_reader(file)
}

/// Like [`load_junctions_csv`] but accepts any `Read` source.
pub fn load_junctions_reader<R: Read>(reader: R) -> NetworkResult<JunctionGraph> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut builder = JunctionGraphBuilder::new();

    for result in csv_reader.deserialize::<JunctionRecord>() {
        let row = result.map_err(|e| NetworkError::Parse(e.to_string()))?;
        let packed = PackedCoord::from_digits(&row.lat, &row.lon)?;
        let adjacent = split_list(&row.adjacent)
            .map(|s| s.parse::<Cnn>())
            .collect::<Result<Vec<_>, _>>()?;
        let junction = Junction::new(Cnn(row.cnn), packed)
            .with_streets(split_list(&row.streets))
            .with_adjacent(adjacent);
        builder.add_junction(junction)?;
    }

    Ok(builder.build())
}

/// Load the address table from a CSV file.
pub fn load_addresses_csv(path: &Path) -> NetworkResult<AddressBook> {
    let file = std::fs::File::open(path)?;
    load_addresses_reader(file)
}

/// Like [`load_addresses_csv`] but accepts any `Read` source.
pub fn load_addresses_reader<R: Read>(reader: R) -> NetworkResult<AddressBook> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut book = AddressBook::new();

    for result in csv_reader.deserialize::<AddressRecord>() {
        let row = result.map_err(|e| NetworkError::Parse(e.to_string()))?;
        let street = row.street.trim();
        if street.is_empty() {
            return Err(NetworkError::Parse(format!("address {} has no street", row.number)));
        }
        book.insert(street, row.number, PackedCoord::from_digits(&row.lat, &row.lon)?);
    }

    Ok(book)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn split_list(s: &str) -> impl Iterator<Item = &str> {
    s.split(';').map(str::trim).filter(|item| !item.is_empty())
}
