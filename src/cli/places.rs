//! Places command handler
//!
//! One-shot retrieval: same pipeline as `GET /places`, printed to stdout.

use crate::cli::init_logging;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter};
use crate::places::PlacesRequest;
use crate::server::state::AppState;
use clap::Args;

/// Places command arguments
#[derive(Args)]
pub struct PlacesArgs {
    /// Latitude
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude
    #[arg(long, allow_hyphen_values = true)]
    pub lng: f64,

    /// Search radius in meters
    #[arg(long, short = 'r')]
    pub radius: Option<f64>,

    /// Comma-separated categories (toilet,parking,wifi)
    #[arg(long, short = 't')]
    pub types: Option<String>,

    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: String,
}

/// Run the places command
pub async fn run(args: PlacesArgs) -> Result<()> {
    init_logging("warn");

    let config = Config::load()?;
    let formatter = get_formatter(&args.format).ok_or_else(|| unknown_format(&args.format))?;

    let request = PlacesRequest::from_parts(
        args.lat,
        args.lng,
        args.radius.unwrap_or(config.defaults.radius_m),
        args.types.as_deref().unwrap_or(&config.defaults.categories),
    );

    let state = AppState::new(config)?;
    let response = state.aggregator.retrieve(&request).await?;

    eprintln!("{} places", response.total);
    print!("{}", formatter.format(&response.places)?);
    if args.format.eq_ignore_ascii_case("json") {
        println!();
    }

    Ok(())
}

pub(crate) fn unknown_format(name: &str) -> Error {
    let names: Vec<String> = available_formats().into_iter().map(|f| f.name).collect();
    Error::Config(format!(
        "Unknown format: {} (available: {})",
        name,
        names.join(", ")
    ))
}
