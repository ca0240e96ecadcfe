//! Overpass (OpenStreetMap) as the live POI source
//!
//! - [`query`] turns a center, radius and category set into Overpass QL
//! - [`http`] sends it to an interpreter endpoint
//! - [`normalize`] maps the raw elements onto [`Poi`](crate::poi::Poi)
//!
//! ## Flex Point
//! Another geodata provider only needs to implement [`PoiSource`] and return
//! the same raw element shape.

pub mod http;
pub mod normalize;
pub mod query;

#[cfg(test)]
pub(crate) mod stub;

pub use http::OverpassSource;
pub use query::{BoundingBox, OverpassQuery, QueryBuilder};

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Raw interpreter response
///
/// Elements that do not fit [`RawElement`] are skipped, not fatal.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawResult {
    #[serde(default, deserialize_with = "lenient_elements")]
    pub elements: Vec<RawElement>,
}

impl RawResult {
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// One element as returned by Overpass
///
/// Ways and relations carry no `lat`/`lon`, hence the options.
/// Null tags read as none; numeric and boolean tag values become strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawElement {
    #[serde(rename = "type", default)]
    pub element_type: String,
    #[serde(default)]
    pub id: i64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: BTreeMap<String, String>,
}

fn lenient_elements<'de, D>(deserializer: D) -> Result<Vec<RawElement>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(values
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect())
}

fn lenient_tags<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(s) => Some((key, s)),
            Value::Number(n) => Some((key, n.to_string())),
            Value::Bool(b) => Some((key, b.to_string())),
            _ => None,
        })
        .collect())
}

/// Why a fetch produced no data
///
/// Callers treat every variant the same way; the distinction is only logged.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed payload: {0}")]
    Decode(String),
}

/// Trait for live POI sources
///
/// Implementations must never panic or block past their own timeout; every
/// failure comes back as a [`SourceError`].
pub trait PoiSource: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Run a built query once, without retries
    fn fetch(
        &self,
        query: &OverpassQuery,
    ) -> impl std::future::Future<Output = Result<RawResult, SourceError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_result_tolerates_missing_fields() {
        let json = r#"{
            "version": 0.6,
            "elements": [
                {"type": "node", "id": 1, "lat": 48.85, "lon": 2.35},
                {"type": "way", "id": 2, "nodes": [1, 2, 3], "tags": {"amenity": "parking"}}
            ]
        }"#;
        let raw: RawResult = serde_json::from_str(json).unwrap();
        assert_eq!(raw.elements.len(), 2);
        assert!(raw.elements[0].tags.is_empty());
        assert!(raw.elements[1].lat.is_none());
    }

    #[test]
    fn test_null_tags_do_not_sink_siblings() {
        let json = r#"{"elements": [
            {"type": "node", "id": 1, "lat": 48.85, "lon": 2.35, "tags": {"amenity": "toilets"}},
            {"type": "node", "id": 2, "lat": 48.86, "lon": 2.36, "tags": null}
        ]}"#;
        let raw: RawResult = serde_json::from_str(json).unwrap();
        assert_eq!(raw.elements.len(), 2);
        assert_eq!(raw.elements[0].tags["amenity"], "toilets");
        assert!(raw.elements[1].tags.is_empty());
    }

    #[test]
    fn test_scalar_tag_values_become_strings() {
        let json = r#"{"elements": [{"type": "node", "id": 3, "lat": 48.85, "lon": 2.35,
            "tags": {"amenity": "parking", "capacity": 120, "covered": true,
                     "note": null, "extra": {"nested": "x"}}}]}"#;
        let raw: RawResult = serde_json::from_str(json).unwrap();
        let tags = &raw.elements[0].tags;
        assert_eq!(tags["capacity"], "120");
        assert_eq!(tags["covered"], "true");
        assert!(!tags.contains_key("note"));
        assert!(!tags.contains_key("extra"));
    }

    #[test]
    fn test_malformed_element_is_skipped() {
        let json = r#"{"elements": [
            {"type": "node", "id": "not-a-number", "lat": 48.85, "lon": 2.35},
            {"type": "node", "id": 4, "lat": "north", "lon": 2.35},
            {"type": "node", "id": 5, "lat": 48.85, "lon": 2.35, "tags": {"amenity": "toilets"}}
        ]}"#;
        let raw: RawResult = serde_json::from_str(json).unwrap();
        let ids: Vec<i64> = raw.elements.iter().map(|e| e.id).collect();
        assert_eq!(ids, [5]);
    }

    #[test]
    fn test_null_elements_is_empty() {
        let raw: RawResult = serde_json::from_str(r#"{"elements": null}"#).unwrap();
        assert!(raw.is_empty());
    }

    #[test]
    fn test_raw_result_without_elements_is_empty() {
        let raw: RawResult = serde_json::from_str("{}").unwrap();
        assert!(raw.is_empty());
    }
}
