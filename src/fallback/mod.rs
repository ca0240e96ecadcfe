//! Static fallback dataset
//!
//! Loaded once at startup from a JSON document shaped like
//! `{"places": [ ..POI.. ]}`. If the file is missing or unreadable the
//! built-in three-entry set is used instead; callers never see an error,
//! only a warning in the log.

use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::poi::{Category, CategorySet, Poi};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// On-disk document shape
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FallbackDocument {
    places: Vec<Poi>,
}

/// Read-only POI set used when the live source yields nothing
#[derive(Debug, Clone)]
pub struct FallbackStore {
    places: Vec<Poi>,
}

impl FallbackStore {
    /// Wrap an explicit list of POIs
    pub fn new(places: Vec<Poi>) -> Self {
        let places = places
            .into_iter()
            .map(|p| Poi { distance: None, ..p })
            .collect();
        Self { places }
    }

    /// The built-in set: one toilet, one parking, one Wi-Fi spot in central Paris
    pub fn builtin() -> Self {
        Self::new(builtin_places())
    }

    /// Load from `path`, substituting the built-in set on any failure
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::read(path) {
            Ok(store) => {
                info!("Loaded {} fallback places from {}", store.len(), path.display());
                store
            }
            Err(e) => {
                warn!(
                    "Using built-in fallback places ({}): {}",
                    path.display(),
                    e
                );
                Self::builtin()
            }
        }
    }

    /// Strict read, no substitution
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let document: FallbackDocument = serde_json::from_str(&content)?;
        if document.places.is_empty() {
            return Err(Error::Config(format!(
                "Fallback file {} contains no places",
                path.display()
            )));
        }
        Ok(Self::new(document.places))
    }

    /// Places of the requested categories within `radius_m` of `center`
    ///
    /// Each returned POI is a fresh copy carrying its distance from `center`.
    pub fn query(&self, center: Coordinates, radius_m: f64, categories: &CategorySet) -> Vec<Poi> {
        self.places
            .iter()
            .filter(|p| categories.contains(p.category))
            .map(|p| p.measured_from(center))
            .filter(|p| p.distance.is_some_and(|d| d <= radius_m))
            .collect()
    }

    /// Every place, without distances
    pub fn places(&self) -> &[Poi] {
        &self.places
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

impl Default for FallbackStore {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_places() -> Vec<Poi> {
    vec![
        Poi {
            id: "1".to_string(),
            name: "Toilettes publiques - Châtelet".to_string(),
            category: Category::Toilet,
            location: Coordinates::new(48.8566, 2.3522),
            distance: None,
            address: Some("Place du Châtelet, 75001 Paris".to_string()),
            opening_hours: Some("24h/24".to_string()),
            description: Some("Toilettes publiques gratuites".to_string()),
            amenities: vec!["gratuit".to_string(), "accessible".to_string()],
        },
        Poi {
            id: "2".to_string(),
            name: "Parking Châtelet".to_string(),
            category: Category::Parking,
            location: Coordinates::new(48.8576, 2.3532),
            distance: None,
            address: Some("Rue de Rivoli, 75001 Paris".to_string()),
            opening_hours: Some("24h/24".to_string()),
            description: Some("Parking souterrain".to_string()),
            amenities: vec!["payant".to_string(), "surveillé".to_string()],
        },
        Poi {
            id: "3".to_string(),
            name: "Wi-Fi gratuit - Hôtel de Ville".to_string(),
            category: Category::Wifi,
            location: Coordinates::new(48.8563, 2.3522),
            distance: None,
            address: Some("Place de l'Hôtel de Ville, 75004 Paris".to_string()),
            opening_hours: Some("24h/24".to_string()),
            description: Some("Réseau Wi-Fi public gratuit".to_string()),
            amenities: vec!["gratuit".to_string(), "haut débit".to_string()],
        },
    ]
}
