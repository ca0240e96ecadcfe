//! Search command handler
//!
//! A fresh process has an empty cache, so this searches the fallback set.

use crate::cli::init_logging;
use crate::cli::places::unknown_format;
use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::Result;
use crate::format::get_formatter;
use crate::server::state::AppState;
use clap::Args;

/// Search command arguments
#[derive(Args)]
pub struct SearchArgs {
    /// Text to look for in names and addresses
    pub term: String,

    /// Reference latitude
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Reference longitude
    #[arg(long, allow_hyphen_values = true)]
    pub lng: f64,

    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: String,
}

/// Run the search command
pub async fn run(args: SearchArgs) -> Result<()> {
    init_logging("warn");

    let config = Config::load()?;
    let formatter = get_formatter(&args.format).ok_or_else(|| unknown_format(&args.format))?;

    let center = Coordinates::new(args.lat, args.lng);
    center.validate()?;

    let state = AppState::new(config)?;
    let results = state.search.search(&args.term, center);

    print!("{}", formatter.format(&results)?);
    if args.format.eq_ignore_ascii_case("json") {
        println!();
    }

    Ok(())
}
