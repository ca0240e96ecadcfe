//! Raw Overpass elements → canonical POIs
//!
//! Pure and order-preserving: the same elements and center always give the
//! same POIs in the same order. Elements that are not nodes, have no
//! coordinates, or match no category rule are dropped.

use crate::constants::api::OVERPASS_ID_PREFIX;
use crate::coord::Coordinates;
use crate::overpass::{RawElement, RawResult};
use crate::poi::category::classify;
use crate::poi::{Category, Poi};
use std::collections::BTreeMap;

/// Address parts joined in this order
const ADDRESS_PARTS: [&str; 4] = ["addr:housenumber", "addr:street", "addr:postcode", "addr:city"];

/// Normalize every usable element, measuring distance from `center`
pub fn normalize(raw: &RawResult, center: Coordinates) -> Vec<Poi> {
    raw.elements
        .iter()
        .filter_map(|element| normalize_element(element, center))
        .collect()
}

fn normalize_element(element: &RawElement, center: Coordinates) -> Option<Poi> {
    if element.element_type != "node" {
        return None;
    }
    let location = match (element.lat, element.lon) {
        (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => Coordinates::new(lat, lon),
        _ => return None,
    };

    let tags = &element.tags;
    let category = classify(tags)?;

    Some(Poi {
        id: format!("{}{}", OVERPASS_ID_PREFIX, element.id),
        name: display_name(tags, category),
        category,
        location,
        distance: Some(center.distance_to(location)),
        address: address(tags),
        opening_hours: non_blank(tags, "opening_hours"),
        description: non_blank(tags, "description"),
        amenities: amenities(tags),
    })
}

fn non_blank(tags: &BTreeMap<String, String>, key: &str) -> Option<String> {
    tags.get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// `name` tag, else "<label> - <street>", else the label alone
fn display_name(tags: &BTreeMap<String, String>, category: Category) -> String {
    if let Some(name) = non_blank(tags, "name") {
        return name;
    }
    match non_blank(tags, "addr:street") {
        Some(street) => format!("{} - {}", category.label(), street),
        None => category.label().to_string(),
    }
}

/// Present address parts joined by spaces, else `addr:full`
fn address(tags: &BTreeMap<String, String>) -> Option<String> {
    let joined = ADDRESS_PARTS
        .iter()
        .filter_map(|key| non_blank(tags, key))
        .collect::<Vec<_>>()
        .join(" ");

    if joined.is_empty() {
        non_blank(tags, "addr:full")
    } else {
        Some(joined)
    }
}

fn amenities(tags: &BTreeMap<String, String>) -> Vec<String> {
    let mut amenities = Vec::new();
    match tags.get("fee").map(String::as_str) {
        Some("no") => amenities.push("gratuit".to_string()),
        Some("yes") => amenities.push("payant".to_string()),
        _ => {}
    }
    if tags.get("wheelchair").map(String::as_str) == Some("yes") {
        amenities.push("accessible".to_string());
    }
    amenities
}
