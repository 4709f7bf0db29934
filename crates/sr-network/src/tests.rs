//! Unit tests for sr-network.
//!
//! Most tests share a five-junction stretch of Burrows St and Girard St;
//! the rest build the few junctions they need inline.

#[cfg(test)]
mod helpers {
    use sr_core::{Cnn, PackedCoord};
    use crate::{AddressBook, Junction, JunctionGraph, JunctionGraphBuilder};

    pub fn junction(cnn: u32, lat: &str, lon: &str, streets: &[&str]) -> Junction {
        let packed = PackedCoord::from_digits(lat, lon).unwrap();
        Junction::new(Cnn(cnn), packed).with_streets(streets.iter().copied())
    }

    /// 20890 - 20889 - 20653 along Burrows St, then 20653 - 20652 down
    /// Girard St and 20652 - 20638 along Bacon St.  All two-way.
    pub fn burrows_girard() -> JunctionGraph {
        let mut b = JunctionGraphBuilder::with_capacity(5);
        b.add_junction(junction(20890, "72788", "4090", &["BURROWS ST", "MADISON ST"])).unwrap();
        b.add_junction(junction(20889, "7279", "407607", &["BURROWS ST", "HAMILTON ST"])).unwrap();
        b.add_junction(junction(20653, "728234", "4055", &["BURROWS ST", "GIRARD ST"])).unwrap();
        b.add_junction(junction(20652, "7276", "4055", &["GIRARD ST", "BACON ST"])).unwrap();
        b.add_junction(junction(20638, "7274", "4040", &["BACON ST", "BRUSSELS ST"])).unwrap();
        for (a, c) in [(20890, 20889), (20889, 20653), (20653, 20652), (20652, 20638)] {
            b.add_segment(Cnn(a), Cnn(c)).unwrap();
        }
        b.build()
    }

    pub fn book() -> AddressBook {
        let mut book = AddressBook::new();
        book.insert("BURROWS ST", 423, PackedCoord::from_digits("7278", "4073").unwrap());
        book.insert("GIRARD ST", 350, PackedCoord::from_digits("7278", "4055").unwrap());
        book
    }
}

// ── Builder & graph structure ─────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use sr_core::Cnn;
    use crate::{JunctionGraphBuilder, NetworkError};
    use super::helpers::{burrows_girard, junction};

    #[test]
    fn empty_build() {
        let graph = JunctionGraphBuilder::new().build();
        assert!(graph.is_empty());
        assert_eq!(graph.len(), 0);
        assert_eq!(graph.neighbors(Cnn(1)).count(), 0);
    }

    #[test]
    fn duplicate_junction_rejected() {
        let mut b = JunctionGraphBuilder::new();
        b.add_junction(junction(1, "7", "4", &["A ST"])).unwrap();
        let err = b.add_junction(junction(1, "8", "4", &["B ST"])).unwrap_err();
        assert!(matches!(err, NetworkError::DuplicateJunction(Cnn(1))));
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn segment_to_unknown_junction_rejected() {
        let mut b = JunctionGraphBuilder::new();
        b.add_junction(junction(1, "7", "4", &["A ST"])).unwrap();
        let err = b.add_segment(Cnn(1), Cnn(2)).unwrap_err();
        assert!(matches!(err, NetworkError::JunctionNotFound(Cnn(2))));
    }

    #[test]
    fn one_way_is_directed() {
        let mut b = JunctionGraphBuilder::new();
        b.add_junction(junction(1, "7", "4", &["A ST"])).unwrap();
        b.add_junction(junction(2, "7", "5", &["A ST"])).unwrap();
        b.add_one_way(Cnn(1), Cnn(2)).unwrap();
        b.add_one_way(Cnn(1), Cnn(2)).unwrap(); // repeat is a no-op
        let graph = b.build();

        assert!(graph.has_edge(Cnn(1), Cnn(2)));
        assert!(!graph.has_edge(Cnn(2), Cnn(1)));
        assert_eq!(graph.neighbors(Cnn(1)).collect::<Vec<_>>(), vec![Cnn(2)]);
        assert_eq!(graph.neighbors(Cnn(2)).count(), 0);
    }

    #[test]
    fn dangling_neighbour_skipped() {
        let mut b = JunctionGraphBuilder::new();
        b.add_junction(junction(1, "7", "4", &["A ST"]).with_adjacent([Cnn(2), Cnn(99)])).unwrap();
        b.add_junction(junction(2, "7", "5", &["A ST"])).unwrap();
        let graph = b.build();

        assert!(graph.has_edge(Cnn(1), Cnn(99)));
        assert_eq!(graph.neighbors(Cnn(1)).collect::<Vec<_>>(), vec![Cnn(2)]);
    }

    #[test]
    fn iteration_keeps_load_order() {
        let graph = burrows_girard();
        let order: Vec<u32> = graph.iter().map(|j| j.cnn.0).collect();
        assert_eq!(order, vec![20890, 20889, 20653, 20652, 20638]);
    }
}

#[cfg(test)]
mod graph {
    use sr_core::Cnn;
    use super::helpers::burrows_girard;

    #[test]
    fn coords_expand_packed_position() {
        let graph = burrows_girard();
        let c = graph.coords(Cnn(20652)).unwrap();
        assert!((c.lat - 37.7276).abs() < 1e-12);
        assert!((c.lon + 122.4055).abs() < 1e-12);
        assert!(graph.coords(Cnn(1)).is_none());
    }

    #[test]
    fn streets_of_unknown_junction_empty() {
        let graph = burrows_girard();
        assert_eq!(graph.streets(Cnn(20653)), ["BURROWS ST", "GIRARD ST"]);
        assert!(graph.streets(Cnn(1)).is_empty());
    }

    #[test]
    fn common_streets_in_first_junction_order() {
        let graph = burrows_girard();
        assert_eq!(graph.common_streets(Cnn(20653), Cnn(20652)), vec!["GIRARD ST"]);
        assert_eq!(graph.common_streets(Cnn(20889), Cnn(20653)), vec!["BURROWS ST"]);
        assert!(graph.common_streets(Cnn(20890), Cnn(20638)).is_empty());
        assert!(graph.common_streets(Cnn(20890), Cnn(1)).is_empty());
    }

    #[test]
    fn distance_matches_coords() {
        let graph = burrows_girard();
        let a = graph.coords(Cnn(20889)).unwrap();
        let b = graph.coords(Cnn(20653)).unwrap();
        assert_eq!(graph.distance(Cnn(20889), Cnn(20653)), Some(a.distance_mi(b)));
        assert_eq!(graph.distance(Cnn(20889), Cnn(1)), None);
    }
}

// ── Street index ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod street_index {
    use sr_core::Cnn;
    use crate::StreetIndex;
    use super::helpers::burrows_girard;

    #[test]
    fn lists_junctions_per_street_in_load_order() {
        let index = StreetIndex::build(&burrows_girard());
        assert_eq!(index.junctions("BURROWS ST"), [Cnn(20890), Cnn(20889), Cnn(20653)]);
        assert_eq!(index.junctions("GIRARD ST"), [Cnn(20653), Cnn(20652)]);
        assert!(index.junctions("MARKET ST").is_empty());
        assert!(index.contains("BACON ST"));
        assert!(!index.contains("MARKET ST"));
        // BURROWS, MADISON, HAMILTON, GIRARD, BACON, BRUSSELS
        assert_eq!(index.len(), 6);
    }
}

// ── Addresses ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod address {
    use crate::Address;
    use super::helpers::book;

    #[test]
    fn parse_splits_number_and_street() {
        let a = Address::parse("423 BURROWS ST").unwrap();
        assert_eq!(a, Address::new(423, "BURROWS ST"));
        assert_eq!(a.to_string(), "423 BURROWS ST");

        let padded = Address::parse("  12   SAN JOSE AVE ").unwrap();
        assert_eq!(padded, Address::new(12, "SAN JOSE AVE"));
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(Address::parse("BURROWS ST").is_none());
        assert!(Address::parse("423").is_none());
        assert!(Address::parse("423   ").is_none());
        assert!(Address::parse("-5 BURROWS ST").is_none());
        assert!(Address::parse("").is_none());
    }

    #[test]
    fn book_lookup() {
        let book = book();
        assert_eq!(book.len(), 2);
        assert_eq!(book.street_count(), 2);
        assert!(book.has_street("GIRARD ST"));

        let c = book.address_coords("350 GIRARD ST").unwrap();
        assert!((c.lat - 37.7278).abs() < 1e-12);
        assert!(book.address_coords("351 GIRARD ST").is_none());
        assert!(book.address_coords("350 MARKET ST").is_none());
        assert!(book.address_coords("GIRARD ST").is_none());
    }

    #[test]
    fn insert_replaces_without_growing() {
        let mut book = book();
        book.insert("GIRARD ST", 350, sr_core::PackedCoord::new(0.7, 0.4));
        assert_eq!(book.len(), 2);
        assert_eq!(book.lookup("GIRARD ST", 350), Some(sr_core::PackedCoord::new(0.7, 0.4)));
    }
}

// ── Nearest junction & address resolution ─────────────────────────────────────

#[cfg(test)]
mod nearest {
    use sr_core::{Cnn, Coord, PackedCoord};
    use crate::{JunctionGraph, JunctionGraphBuilder, StreetIndex, nearest_junction, resolve_address};
    use super::helpers::{book, burrows_girard, junction};

    #[test]
    fn prefers_junction_on_own_street() {
        let mut b = JunctionGraphBuilder::new();
        b.add_junction(junction(1, "70", "40", &["A ST"])).unwrap();
        b.add_junction(junction(2, "7001", "4001", &["B ST"])).unwrap();
        let graph = b.build();
        let index = StreetIndex::build(&graph);
        let target = PackedCoord::from_digits("7001", "4001").unwrap().expand();

        assert_eq!(nearest_junction(&graph, &index, target, Some("A ST")), Some(Cnn(1)));
        assert_eq!(nearest_junction(&graph, &index, target, Some("B ST")), Some(Cnn(2)));
    }

    #[test]
    fn unknown_street_falls_back_to_full_scan() {
        let mut b = JunctionGraphBuilder::new();
        b.add_junction(junction(1, "70", "40", &["A ST"])).unwrap();
        b.add_junction(junction(2, "7001", "4001", &["B ST"])).unwrap();
        let graph = b.build();
        let index = StreetIndex::build(&graph);
        let target = PackedCoord::from_digits("7001", "4002").unwrap().expand();

        assert_eq!(nearest_junction(&graph, &index, target, Some("MARKET ST")), Some(Cnn(2)));
        assert_eq!(nearest_junction(&graph, &index, target, None), Some(Cnn(2)));
    }

    #[test]
    fn ties_keep_first_loaded() {
        let mut b = JunctionGraphBuilder::new();
        b.add_junction(junction(7, "7", "4", &["A ST"])).unwrap();
        b.add_junction(junction(3, "7", "4", &["A ST"])).unwrap();
        let graph = b.build();
        let index = StreetIndex::build(&graph);
        let target = Coord::new(37.75, -122.45);

        assert_eq!(nearest_junction(&graph, &index, target, Some("A ST")), Some(Cnn(7)));
        assert_eq!(nearest_junction(&graph, &index, target, None), Some(Cnn(7)));
    }

    #[test]
    fn empty_graph_has_no_nearest() {
        let graph = JunctionGraph::empty();
        let index = StreetIndex::build(&graph);
        assert_eq!(nearest_junction(&graph, &index, Coord::new(37.7, -122.4), None), None);
    }

    #[test]
    fn resolves_fixture_addresses() {
        let graph = burrows_girard();
        let index = StreetIndex::build(&graph);
        let book = book();

        let start = resolve_address(&book, &graph, &index, "423 BURROWS ST").unwrap();
        assert_eq!(start.junction, Cnn(20889));
        assert_eq!(start.address.number, 423);

        let end = resolve_address(&book, &graph, &index, "350 GIRARD ST").unwrap();
        assert_eq!(end.junction, Cnn(20652));
    }

    #[test]
    fn unresolvable_addresses() {
        let graph = burrows_girard();
        let index = StreetIndex::build(&graph);
        let book = book();
        assert!(resolve_address(&book, &graph, &index, "999 BURROWS ST").is_none());
        assert!(resolve_address(&book, &graph, &index, "BURROWS ST").is_none());
    }
}

// ── CSV loaders ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use sr_core::{Cnn, PackedCoord};
    use crate::{NetworkError, load_addresses_reader, load_junctions_reader};

    const JUNCTIONS: &str = "\
cnn,lat,lon,streets,adjacent
1,7278,4073,BURROWS ST;MADISON ST,2
2,7278,4060,BURROWS ST,1; 99
3,7270,4060,GIRARD ST,
";

    #[test]
    fn junctions_load() {
        let graph = load_junctions_reader(Cursor::new(JUNCTIONS)).unwrap();
        assert_eq!(graph.len(), 3);

        let j1 = graph.get(Cnn(1)).unwrap();
        assert_eq!(j1.streets, vec!["BURROWS ST", "MADISON ST"]);
        assert_eq!(j1.packed, PackedCoord::new(0.7278, 0.4073));

        assert!(graph.has_edge(Cnn(2), Cnn(99)));
        assert_eq!(graph.neighbors(Cnn(2)).collect::<Vec<_>>(), vec![Cnn(1)]);
        assert_eq!(graph.neighbors(Cnn(3)).count(), 0);
    }

    #[test]
    fn duplicate_cnn_fails() {
        let csv = "cnn,lat,lon,streets,adjacent\n1,7,4,A ST,\n1,8,4,B ST,\n";
        let err = load_junctions_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, NetworkError::DuplicateJunction(Cnn(1))));
    }

    #[test]
    fn bad_coordinate_fails() {
        let csv = "cnn,lat,lon,streets,adjacent\n1,72x8,4,A ST,\n";
        let err = load_junctions_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, NetworkError::Core(_)));
    }

    #[test]
    fn bad_adjacent_fails() {
        let csv = "cnn,lat,lon,streets,adjacent\n1,7,4,A ST,two\n";
        assert!(load_junctions_reader(Cursor::new(csv)).is_err());
    }

    #[test]
    fn addresses_load() {
        let csv = "street,number,lat,lon\nBURROWS ST,423,7278,4073\nGIRARD ST,350,7278,4055\n";
        let book = load_addresses_reader(Cursor::new(csv)).unwrap();
        assert_eq!(book.len(), 2);
        assert_eq!(book.lookup("BURROWS ST", 423), Some(PackedCoord::new(0.7278, 0.4073)));
    }

    #[test]
    fn address_without_street_fails() {
        let csv = "street,number,lat,lon\n ,423,7278,4073\n";
        let err = load_addresses_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, NetworkError::Parse(_)));
    }

    #[test]
    fn address_with_bad_number_fails() {
        let csv = "street,number,lat,lon\nBURROWS ST,four,7278,4073\n";
        let err = load_addresses_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, NetworkError::Parse(_)));
    }
}
