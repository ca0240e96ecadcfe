//! Points of interest
//!
//! The canonical POI shape returned by every operation, plus the category
//! vocabulary requests are expressed in.

pub mod category;

use crate::coord::Coordinates;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Kind of amenity a POI provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Toilet,
    Parking,
    Wifi,
}

impl Category {
    /// Human-readable label, used when a POI has no name of its own
    pub fn label(&self) -> &'static str {
        match self {
            Self::Toilet => "Toilettes",
            Self::Parking => "Parking",
            Self::Wifi => "Wi-Fi",
        }
    }

    /// Wire name (same as the serde representation)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Toilet => "toilet",
            Self::Parking => "parking",
            Self::Wifi => "wifi",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "toilet" | "toilets" => Ok(Self::Toilet),
            "parking" => Ok(Self::Parking),
            "wifi" | "wi-fi" => Ok(Self::Wifi),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

/// List all known categories
pub fn available_categories() -> Vec<Category> {
    vec![Category::Toilet, Category::Parking, Category::Wifi]
}

/// A deduplicated, ordered set of requested categories
///
/// Order of the input never matters: `"wifi,toilet"` and `"toilet,wifi,wifi"`
/// produce equal sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySet(BTreeSet<Category>);

impl CategorySet {
    /// Parse a comma-separated list such as `"toilet,parking,wifi"`
    ///
    /// Blank and unknown names are skipped.
    pub fn parse(list: &str) -> Self {
        let mut set = BTreeSet::new();
        for name in list.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            match name.parse::<Category>() {
                Ok(category) => {
                    set.insert(category);
                }
                Err(_) => tracing::debug!("Ignoring unknown category '{}'", name),
            }
        }
        Self(set)
    }

    /// Set containing every known category
    pub fn all() -> Self {
        available_categories().into_iter().collect()
    }

    pub fn contains(&self, category: Category) -> bool {
        self.0.contains(&category)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Categories in their canonical order
    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Category> for CategorySet {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for CategorySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|c| c.as_str()).collect();
        f.write_str(&names.join(","))
    }
}

/// A named, categorized, geolocated amenity
///
/// `distance` only means something relative to the center of the request that
/// produced this value; every request builds its own copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub category: Category,
    pub location: Coordinates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

impl Poi {
    /// Copy of this POI with its distance measured from `center`
    pub fn measured_from(&self, center: Coordinates) -> Self {
        Self {
            distance: Some(center.distance_to(self.location)),
            ..self.clone()
        }
    }
}

/// Sort POIs nearest first
///
/// POIs without a distance sort as if they were at distance 0. The sort is
/// stable, so equal distances keep their input order.
pub fn sort_by_distance(places: &mut [Poi]) {
    places.sort_by(|a, b| {
        a.distance
            .unwrap_or(0.0)
            .total_cmp(&b.distance.unwrap_or(0.0))
    });
}
