//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::{Error, Result};
use clap::Args;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "cache.ttl_secs")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    if args.path {
        println!("{}", Config::config_path()?.display());
        return Ok(());
    }

    if args.reset {
        Config::default().save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;

    match (args.key.as_deref(), args.value.as_deref()) {
        (None, None) => print!("{}", render(&config)),
        (Some(key), None) => match config.get(key) {
            Some(value) => println!("{}", value),
            None => return Err(unknown_key(key)),
        },
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save()?;
            println!("{} = {}", key, value);
        }
        (None, Some(_)) => {
            return Err(Error::Config("Must specify a key to set a value".into()));
        }
    }

    Ok(())
}

fn unknown_key(key: &str) -> Error {
    Error::Config(format!(
        "Unknown config key: {} (available: {})",
        key,
        Config::available_keys().join(", ")
    ))
}

/// Render every key grouped by section
fn render(config: &Config) -> String {
    let mut out = String::new();
    let mut section = "";
    for key in Config::available_keys() {
        let (head, name) = key.split_once('.').unwrap_or(("", key));
        if head != section {
            if !section.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("[{}]\n", head));
            section = head;
        }
        let value = config.get(key).unwrap_or_default();
        out.push_str(&format!("{} = {}\n", name, value));
    }
    out
}
