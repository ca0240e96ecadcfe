//! Geographic coordinates
//!
//! This module handles:
//! - The `Coordinates` value shared by every stage of the pipeline
//! - Range validation for caller-supplied centers
//! - Great-circle distance (see [`distance`])

pub mod distance;

pub use distance::haversine_distance;

use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude)
///
/// Serialized as `{"latitude": .., "longitude": ..}` to match the POI wire shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(rename = "latitude")]
    pub lat: f64,
    #[serde(rename = "longitude")]
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> crate::error::Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }

    /// Distance in meters to another coordinate
    pub fn distance_to(&self, other: Coordinates) -> f64 {
        haversine_distance(*self, other)
    }
}
