//! directions — turn-by-turn directions between two street addresses.
//!
//! Loads the junction and address tables, searches with the chosen
//! strategy, and prints the route narrative.  `--rank` adds a list of
//! destinations ordered by distance from `--from`.
//!
//! ```text
//! cargo run -p directions -- --from "423 BURROWS ST" --to "350 GIRARD ST"
//! cargo run -p directions -- --from "423 BURROWS ST" --to "350 GIRARD ST" \
//!     --strategy both --rank "100 BACON ST" "500 BURROWS ST" --json
//! ```
//!
//! Addresses must already be normalized (`423 BURROWS ST`, not
//! `423 Burrows Street`); only case and surrounding whitespace are fixed
//! here.  Set `RUST_LOG=debug` to see fallback scans and budget escalation.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use log::info;
use serde::Serialize;

use sr_core::{Cnn, SearchConfig};
use sr_network::{StreetIndex, load_addresses_csv, load_junctions_csv};
use sr_route::{Destination, RankedDestination, RouteDescription, RoutePlanner, SearchStats, Strategy};

const DEFAULT_JUNCTIONS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/junctions.csv");
const DEFAULT_ADDRESSES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/addresses.csv");

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
    /// Fewest segments.
    Bfs,
    /// Shortest street distance.
    Astar,
    /// Budgeted backtracking from the start.
    Backtrack,
    /// Backtracking from both ends, shorter result wins.
    Both,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Bfs => Strategy::BreadthFirst,
            StrategyArg::Astar => Strategy::AStar,
            StrategyArg::Backtrack => Strategy::Backtracking,
            StrategyArg::Both => Strategy::Bidirectional,
        }
    }
}

#[derive(Parser)]
#[command(about = "Turn-by-turn directions over a street-intersection graph")]
struct Args {
    /// Junction table (cnn,lat,lon,streets,adjacent)
    #[arg(long, default_value = DEFAULT_JUNCTIONS)]
    junctions: PathBuf,

    /// Address table (street,number,lat,lon)
    #[arg(long, default_value = DEFAULT_ADDRESSES)]
    addresses: PathBuf,

    /// Start address, e.g. "423 BURROWS ST"
    #[arg(long)]
    from: String,

    /// End address
    #[arg(long)]
    to: String,

    #[arg(long, value_enum, default_value_t = StrategyArg::Astar)]
    strategy: StrategyArg,

    /// Addresses to rank by distance from --from
    #[arg(long, num_args = 1..)]
    rank: Vec<String>,

    /// Print one JSON document instead of text
    #[arg(long)]
    json: bool,
}

// ── Output ────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct Report {
    from: String,
    to: String,
    strategy: Strategy,
    path: Vec<Cnn>,
    stats: SearchStats,
    route: RouteDescription,
    ranking: Vec<RankedDestination>,
}

fn normalize(address: &str) -> String {
    address.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase()
}

fn print_text(report: &Report) {
    println!("{} → {}  ({:?})", report.from, report.to, report.strategy);
    if report.path.is_empty() {
        println!("No street route found; showing the straight line.");
    }
    for line in &report.route.lines {
        println!("  {line}");
    }
    println!(
        "  {:.2} mi over {} junctions  ({} visited, {} attempts, {:.1?})",
        report.route.route_total_mi,
        report.path.len(),
        report.stats.visited,
        report.stats.attempts,
        report.stats.elapsed,
    );
    if !report.route.consistent {
        println!(
            "  warning: turns add up to {:.4} mi, route measures {:.4} mi",
            report.route.turn_total_mi, report.route.route_total_mi
        );
    }

    if !report.ranking.is_empty() {
        println!();
        println!("Nearest first:");
        for (i, r) in report.ranking.iter().enumerate() {
            match r.miles {
                Some(mi) if r.routed => println!("  {:>2}. {:<24} {mi:>6.2} mi", i + 1, r.name),
                Some(mi) => println!("  {:>2}. {:<24} {mi:>6.2} mi (straight line)", i + 1, r.name),
                None => println!("  {:>2}. {:<24}      ? (unknown address)", i + 1, r.name),
            }
        }
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();
    let args = Args::parse();

    let t0 = Instant::now();
    let graph = load_junctions_csv(&args.junctions)
        .with_context(|| format!("loading junctions from {}", args.junctions.display()))?;
    let book = load_addresses_csv(&args.addresses)
        .with_context(|| format!("loading addresses from {}", args.addresses.display()))?;
    let index = StreetIndex::build(&graph);
    info!(
        "loaded {} junctions, {} addresses on {} streets in {:.1?}",
        graph.len(),
        book.len(),
        book.street_count(),
        t0.elapsed()
    );

    let planner = RoutePlanner::new(&book, &graph, &index).with_config(SearchConfig::default())?;
    let from = normalize(&args.from);
    let to = normalize(&args.to);
    if planner.resolve(&from).is_none() {
        bail!("start address {from:?} is not in {}", args.addresses.display());
    }
    if planner.resolve(&to).is_none() {
        bail!("end address {to:?} is not in {}", args.addresses.display());
    }

    let strategy = Strategy::from(args.strategy);
    let outcome = planner.search(&from, &to, strategy);
    let route = planner.describe_route(&outcome.path, &from, &to);

    let destinations: Vec<Destination> = args
        .rank
        .iter()
        .map(|a| {
            let address = normalize(a);
            Destination::new(address.clone(), address)
        })
        .collect();
    let ranking = if destinations.is_empty() {
        Vec::new()
    } else {
        planner.rank_destinations(&from, &destinations)
    };

    let report = Report {
        from,
        to,
        strategy,
        path: outcome.path,
        stats: outcome.stats,
        route,
        ranking,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&report);
    }
    Ok(())
}
