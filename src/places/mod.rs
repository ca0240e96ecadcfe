//! POI retrieval and search
//!
//! - [`aggregator`]: cache → live source → fallback pipeline behind "retrieve"
//! - [`search`]: free-text lookup over cached results and the fallback set

pub mod aggregator;
pub mod search;

pub use aggregator::PlaceAggregator;
pub use search::SearchIndex;

use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::poi::{CategorySet, Poi};
use serde::{Deserialize, Serialize};

/// Default search radius in meters
pub const DEFAULT_RADIUS_M: f64 = 1000.0;

/// Default category list
pub const DEFAULT_CATEGORIES: &str = "toilet,parking,wifi";

/// A "what is near here" request
#[derive(Debug, Clone, PartialEq)]
pub struct PlacesRequest {
    pub center: Coordinates,
    pub radius_m: f64,
    pub categories: CategorySet,
}

impl PlacesRequest {
    pub fn new(center: Coordinates, radius_m: f64, categories: CategorySet) -> Self {
        Self {
            center,
            radius_m,
            categories,
        }
    }

    /// Build from raw inputs, `types` being a comma-separated category list
    pub fn from_parts(lat: f64, lng: f64, radius_m: f64, types: &str) -> Self {
        Self::new(Coordinates::new(lat, lng), radius_m, CategorySet::parse(types))
    }

    /// Check center range and radius
    pub fn validate(&self) -> Result<()> {
        self.center.validate()?;
        if !self.radius_m.is_finite() || self.radius_m <= 0.0 {
            return Err(Error::InvalidRadius(format!(
                "Radius must be positive, got {}",
                self.radius_m
            )));
        }
        Ok(())
    }
}

/// Result of a retrieval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacesResponse {
    pub places: Vec<Poi>,
    pub total: usize,
    pub cached: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts() {
        let request = PlacesRequest::from_parts(48.8566, 2.3522, 500.0, "wifi, parking");
        assert_eq!(request.center, Coordinates::new(48.8566, 2.3522));
        assert_eq!(request.categories, CategorySet::parse("parking,wifi"));
    }

    #[test]
    fn test_validate() {
        assert!(PlacesRequest::from_parts(48.8566, 2.3522, 1000.0, DEFAULT_CATEGORIES)
            .validate()
            .is_ok());
        assert!(matches!(
            PlacesRequest::from_parts(95.0, 2.3522, 1000.0, DEFAULT_CATEGORIES).validate(),
            Err(Error::InvalidCoordinates(_))
        ));
        assert!(matches!(
            PlacesRequest::from_parts(48.8566, 2.3522, 0.0, DEFAULT_CATEGORIES).validate(),
            Err(Error::InvalidRadius(_))
        ));
        assert!(matches!(
            PlacesRequest::from_parts(48.8566, 2.3522, f64::INFINITY, DEFAULT_CATEGORIES).validate(),
            Err(Error::InvalidRadius(_))
        ));
    }
}
