//! Human-readable text output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::poi::Poi;

/// Text formatter - one block per place
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable list"
    }

    fn format(&self, places: &[Poi]) -> Result<String> {
        if places.is_empty() {
            return Ok("No places found\n".to_string());
        }

        let mut output = String::new();
        for poi in places {
            let distance = poi
                .distance
                .map(|d| format!(" ({:.0} m)", d))
                .unwrap_or_default();
            output.push_str(&format!("[{}] {}{}\n", poi.category, poi.name, distance));

            if let Some(address) = &poi.address {
                output.push_str(&format!("    {}\n", address));
            }
            if let Some(hours) = &poi.opening_hours {
                output.push_str(&format!("    Hours: {}\n", hours));
            }
            if !poi.amenities.is_empty() {
                output.push_str(&format!("    {}\n", poi.amenities.join(", ")));
            }
        }

        Ok(output)
    }
}
