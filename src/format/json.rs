//! JSON output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::poi::Poi;

/// JSON formatter - outputs places as a pretty-printed array
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "JSON array of places"
    }

    fn format(&self, places: &[Poi]) -> Result<String> {
        Ok(serde_json::to_string_pretty(places)?)
    }
}
