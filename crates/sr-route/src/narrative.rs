//! Turn-by-turn route descriptions.
//!
//! A route is cut into legs: start address → first junction, each segment
//! of the path, last junction → end address.  Each leg is tagged with the
//! street it runs along and consecutive legs on the same street merge into
//! one [`Turn`].  A turn's bearing comes from its first junction-to-junction
//! leg; a bearing taken from an address stub is only used when nothing
//! better exists on that street.
//!
//! # Lead-in junction
//!
//! When the route leaves the start street at the very first junction there
//! is no segment along the start street to take a bearing from.  The
//! junction's neighbour on the start street nearest the start address is
//! then used as a lead-in: the opening turn is keyed at it and points from
//! it to the first junction.  The lead-in only shapes the narrative.  Its
//! stub is never counted, it is not part of the searched path, and it plays
//! no part in cycle checks or search caps.
//!
//! # Self-check
//!
//! The per-turn distances must add up to [`route_distance_between`] for the
//! same path.  A gap larger than the configured epsilon marks the
//! description inconsistent; both totals are kept.

use log::{debug, warn};

use sr_core::geo::FEET_PER_MILE;
use sr_core::{Cnn, Compass, Coord, SearchConfig, bearing, direction};
use sr_network::{Address, AddressBook, JunctionGraph};

use crate::distance::route_distance_between;

// ── Output types ──────────────────────────────────────────────────────────────

/// One instruction: travel along `street` from junction `at`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Turn {
    pub at: Cnn,
    pub street: String,
    /// Compass bearing of travel after the turn.
    pub bearing: f64,
    pub direction: Compass,
    /// Miles from this turn to the next one, or to the destination.
    pub distance_mi: f64,
}

impl Turn {
    /// `Go E on Burrows St 715 ft.`
    pub fn describe(&self) -> String {
        format!(
            "Go {} on {} {}",
            self.direction,
            title_case(&self.street),
            format_distance(self.distance_mi)
        )
    }
}

/// A rendered route.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteDescription {
    /// The described junctions: the lead-in (if any) followed by the path.
    pub path: Vec<Cnn>,
    pub lead_in: Option<Cnn>,
    pub turns: Vec<Turn>,
    /// One line per turn, then `Arrive at …`.
    pub lines: Vec<String>,
    /// Sum of per-turn distances.
    pub turn_total_mi: f64,
    /// Independently summed route distance.
    pub route_total_mi: f64,
    /// `false` when the two totals disagree beyond the configured epsilon.
    pub consistent: bool,
}

// ── Formatting ────────────────────────────────────────────────────────────────

/// Whole feet under 1000 ft, otherwise miles to one decimal.
pub fn format_distance(miles: f64) -> String {
    let feet = (miles * FEET_PER_MILE).round();
    if feet < 1_000.0 {
        format!("{} ft.", feet as i64)
    } else {
        format!("{miles:.1} mi.")
    }
}

/// `350 GIRARD ST` → `350 Girard St`.
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

// ── Legs ──────────────────────────────────────────────────────────────────────

struct Leg {
    at: Cnn,
    street: String,
    bearing: Option<f64>,
    /// Bearing taken from an address stub rather than a street segment.
    weak: bool,
    distance_mi: f64,
}

/// The street a segment `a → b` runs along: `current` if both junctions
/// are on it, otherwise the first street they share.
fn segment_street<'g>(graph: &'g JunctionGraph, a: Cnn, b: Cnn, current: Option<&str>) -> Option<&'g str> {
    let common = graph.common_streets(a, b);
    common
        .iter()
        .find(|&&s| Some(s) == current)
        .or(common.first())
        .copied()
}

fn segment_bearing(graph: &JunctionGraph, a: Cnn, b: Cnn) -> Option<f64> {
    Some(bearing(graph.coords(a)?, graph.coords(b)?))
}

/// The neighbour of `path[0]` on `street` nearest `origin`, if the route
/// leaves `street` at `path[0]`.
fn find_lead_in(graph: &JunctionGraph, path: &[Cnn], street: &str, origin: Coord) -> Option<Cnn> {
    let (&first, &second) = (path.first()?, path.get(1)?);
    if segment_street(graph, first, second, Some(street)) == Some(street) {
        return None;
    }
    let lead_in = graph
        .neighbors(first)
        .filter(|n| !path.contains(n))
        .filter(|&n| graph.get(n).is_some_and(|j| j.has_street(street)))
        .filter_map(|n| Some((n, graph.coords(n)?.distance_mi(origin))))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(n, _)| n);
    if lead_in.is_none() {
        debug!("no lead-in on {street:?} next to {first}; opening bearing from address");
    }
    lead_in
}

fn build_legs(
    graph: &JunctionGraph,
    path: &[Cnn],
    start: Option<(&Address, Coord)>,
    end: Option<(&Address, Coord)>,
    lead_in: Option<Cnn>,
) -> Vec<Leg> {
    let mut legs = Vec::with_capacity(path.len() + 1);
    let (Some(&first), Some(&last)) = (path.first(), path.last()) else { return legs };

    if let Some((address, origin)) = start {
        let first_coord = graph.coords(first);
        let (at, heading, weak) = match lead_in {
            Some(p) => (p, segment_bearing(graph, p, first), false),
            None => (first, first_coord.map(|c| bearing(origin, c)), true),
        };
        legs.push(Leg {
            at,
            street: address.street.clone(),
            bearing: heading,
            weak,
            distance_mi: sr_core::distance(Some(origin), first_coord).unwrap_or(0.0),
        });
    }

    let mut current: Option<String> = start.map(|(a, _)| a.street.clone());
    for w in path.windows(2) {
        let street = match segment_street(graph, w[0], w[1], current.as_deref()) {
            Some(s) => s.to_owned(),
            None => {
                debug!("junctions {} and {} share no street", w[0], w[1]);
                current.clone().unwrap_or_default()
            }
        };
        legs.push(Leg {
            at: w[0],
            street: street.clone(),
            bearing: segment_bearing(graph, w[0], w[1]),
            weak: false,
            distance_mi: graph.distance(w[0], w[1]).unwrap_or(0.0),
        });
        current = Some(street);
    }

    if let Some((address, destination)) = end {
        let last_coord = graph.coords(last);
        legs.push(Leg {
            at: last,
            street: address.street.clone(),
            bearing: last_coord.map(|c| bearing(c, destination)),
            weak: true,
            distance_mi: sr_core::distance(last_coord, Some(destination)).unwrap_or(0.0),
        });
    }
    legs
}

fn merge_legs(legs: Vec<Leg>) -> Vec<Turn> {
    let mut merged: Vec<Leg> = Vec::new();
    for leg in legs {
        match merged.last_mut() {
            Some(turn) if turn.street == leg.street => {
                turn.distance_mi += leg.distance_mi;
                if turn.bearing.is_none() || (turn.weak && !leg.weak && leg.bearing.is_some()) {
                    turn.bearing = leg.bearing;
                    turn.weak = leg.weak;
                }
            }
            _ => merged.push(leg),
        }
    }

    merged
        .into_iter()
        .map(|leg| {
            let bearing = leg.bearing.unwrap_or(0.0);
            Turn {
                at: leg.at,
                street: leg.street,
                bearing,
                direction: direction(bearing),
                distance_mi: leg.distance_mi,
            }
        })
        .collect()
}

// ── describe_route ────────────────────────────────────────────────────────────

/// Describe `path` as driven from `start` to `end` (normalized addresses).
///
/// An empty path yields a single beeline instruction ("as the crow flies")
/// when both addresses resolve, and only the arrival line otherwise.
pub fn describe_route(
    book: &AddressBook,
    graph: &JunctionGraph,
    path: &[Cnn],
    start: &str,
    end: &str,
    config: &SearchConfig,
) -> RouteDescription {
    let start_addr = Address::parse(start);
    let end_addr = Address::parse(end);
    let origin = start_addr.as_ref().and_then(|a| book.coords(a));
    let destination = end_addr.as_ref().and_then(|a| book.coords(a));
    let arrive = format!("Arrive at {}", title_case(end));

    if path.is_empty() {
        let mut lines = Vec::new();
        let mut total = 0.0;
        if let (Some(o), Some(d)) = (origin, destination) {
            total = o.distance_mi(d);
            lines.push(format!(
                "Head {} {} as the crow flies.",
                direction(bearing(o, d)),
                format_distance(total)
            ));
        }
        lines.push(arrive);
        return RouteDescription {
            lines,
            turn_total_mi: total,
            route_total_mi: total,
            consistent: true,
            ..RouteDescription::default()
        };
    }

    let from = start_addr.as_ref().zip(origin);
    let to = end_addr.as_ref().zip(destination);
    let lead_in = from.and_then(|(a, o)| find_lead_in(graph, path, &a.street, o));

    let turns = merge_legs(build_legs(graph, path, from, to, lead_in));
    let turn_total_mi: f64 = turns.iter().map(|t| t.distance_mi).sum();
    let route_total_mi = route_distance_between(graph, path, origin, destination);
    let consistent = (turn_total_mi - route_total_mi).abs() <= config.turn_check_epsilon_mi;
    if !consistent {
        warn!(
            "turn distances sum to {turn_total_mi:.5} mi but route measures {route_total_mi:.5} mi"
        );
    }

    let mut lines: Vec<String> = turns.iter().map(Turn::describe).collect();
    lines.push(arrive);

    RouteDescription {
        path: lead_in.into_iter().chain(path.iter().copied()).collect(),
        lead_in,
        turns,
        lines,
        turn_total_mi,
        route_total_mi,
        consistent,
    }
}
