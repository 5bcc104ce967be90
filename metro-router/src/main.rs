use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{NaiveTime, Utc};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use metro_router::domain::parse_hhmm;
use metro_router::network::load_from_path;
use metro_router::planner::{Optimize, Planner, SearchConfig};

/// Find a route through a metro network.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file of station records
    network: PathBuf,

    /// Station to start from
    start: String,

    /// Station to finish at
    end: String,

    /// What to optimize for: "time" or "least_crowded"
    #[arg(long, default_value = "time")]
    optimize: String,

    /// Departure time today (HH:MM, network local time); defaults to now
    #[arg(long, value_parser = parse_hhmm)]
    at: Option<NaiveTime>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = SearchConfig::default();

    // Departure is today in the network's local time
    let departure = args.at.map(|time| {
        Utc::now()
            .with_timezone(&config.utc_offset())
            .date_naive()
            .and_time(time)
    });

    let network = match load_from_path(&args.network) {
        Ok(network) => network,
        Err(e) => {
            error!(path = %args.network.display(), "{e}");
            return ExitCode::FAILURE;
        }
    };

    let mode = Optimize::from(args.optimize);
    let planner = Planner::new(&network, &config);
    let result = match departure {
        Some(departure) => planner.find_path(&args.start, &args.end, mode, departure),
        None => planner.find_path_now(&args.start, &args.end, mode),
    };

    match result {
        Ok(Some(route)) => {
            info!(stations = route.len(), "Route found");
            println!("{route}");
            ExitCode::SUCCESS
        }
        Ok(None) => {
            println!("No route found from {} to {}", args.start, args.end);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
