//! CareRoute CLI
//!
//! Runs hospital route selections against the configured providers and
//! exposes the polyline codec and opening-hours formatting.

#![allow(clippy::print_stdout)]

mod route;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use domain::geometry::{PolylineError, decode_strict, encode};
use domain::{Coordinate, TravelMode, format_opening_hours};
use infrastructure::{AppConfig, init_logging};

use crate::route::Destination;

/// CareRoute CLI
#[derive(Parser)]
#[command(name = "careroute-cli")]
#[command(author, version, about = "CareRoute hospital route engine CLI", long_about = None)]
struct Cli {
    /// Verbosity level (overrides the configured log filter)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./careroute.toml if present)
    #[arg(short, long, env = "CAREROUTE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Route mode argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    /// Driving directions
    Car,
    /// Public transit directions
    Transit,
}

impl From<ModeArg> for TravelMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Car => Self::Car,
            ModeArg::Transit => Self::Transit,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compute driving and transit routes to a destination
    ///
    /// Example: careroute-cli route 37.5665,126.978 37.5,127.03 --label 강남병원
    /// Example: careroute-cli route 37.5665,126.978 --hospitals results.json --pick 강남병원
    Route {
        /// Start position as "lat,lng"
        #[arg(allow_hyphen_values = true)]
        origin: Coordinate,

        /// Destination as "lat,lng"
        #[arg(allow_hyphen_values = true, required_unless_present = "hospitals")]
        destination: Option<Coordinate>,

        /// Destination name shown in messages
        #[arg(short, long, conflicts_with = "hospitals")]
        label: Option<String>,

        /// Hospital search results (JSON array) to pick the destination from
        #[arg(long, conflicts_with = "destination")]
        hospitals: Option<PathBuf>,

        /// Hospital name to route to (default: first in the list)
        #[arg(long, requires = "hospitals")]
        pick: Option<String>,

        /// Mode to show once both results are in
        #[arg(short, long, value_enum, default_value = "car")]
        mode: ModeArg,
    },

    /// Decode an encoded polyline
    Decode {
        /// Encoded polyline
        #[arg(allow_hyphen_values = true)]
        polyline: String,
    },

    /// Encode coordinates as a polyline
    Encode {
        /// Points as "lat,lng"
        #[arg(required = true, allow_hyphen_values = true)]
        points: Vec<Coordinate>,
    },

    /// Format opening hours as shown on hospital cards
    ///
    /// Example: careroute-cli hours "Monday: 09:00–18:00 / Saturday: 09:00–13:00"
    Hours {
        /// Opening hours text
        opening_hours: Option<String>,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Decoded points, one per line, plus a note when the input was damaged
fn decode_lines(polyline: &str) -> Vec<String> {
    let (points, error) = match decode_strict(polyline) {
        Ok(points) => (points, None),
        Err(e) => {
            let note = format!("⚠️  {e}, showing {} decoded point(s)", e.decoded().len());
            (PolylineError::into_decoded(e), Some(note))
        },
    };
    points
        .iter()
        .enumerate()
        .map(|(i, point)| format!("{i:>3}  {point}"))
        .chain(error)
        .collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_from(cli.config.as_deref())?;
    let logging = match log_filter_from_verbosity(cli.verbose) {
        Some(filter) => config.logging.clone().with_filter(filter),
        None => config.logging.clone(),
    };
    init_logging(&logging)?;

    match cli.command {
        Commands::Route {
            origin,
            destination,
            label,
            hospitals,
            pick,
            mode,
        } => {
            config.validate().map_err(anyhow::Error::msg)?;

            let destination = match (destination, hospitals) {
                (Some(position), _) => Destination::Point { position, label },
                (None, Some(path)) => Destination::Hospital {
                    hospitals: route::read_hospitals(&path)?,
                    pick,
                },
                (None, None) => anyhow::bail!("A destination or --hospitals is required"),
            };

            let report = route::run(&config, origin, destination, mode.into()).await?;
            println!("{report}");
        },

        Commands::Decode { polyline } => {
            for line in decode_lines(&polyline) {
                println!("{line}");
            }
        },

        Commands::Encode { points } => {
            println!("{}", encode(&points));
        },

        Commands::Hours { opening_hours } => {
            for line in format_opening_hours(opening_hours.as_deref()) {
                println!("{line}");
            }
        },
    }

    Ok(())
}
