//! Overpass QL construction
//!
//! The radius is converted to degrees with a flat 111 km per degree on both
//! axes. This is the documented approximation: the box gets too narrow in
//! longitude as latitude grows.

use crate::constants::geo::METERS_PER_DEGREE;
use crate::coord::Coordinates;
use crate::poi::category::rules_for;
use crate::poi::CategorySet;

/// Default `[timeout:N]` directive in seconds
pub const DEFAULT_QUERY_TIMEOUT_SECS: u32 = 25;

/// South/west/north/east box in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    /// Square box of `radius_m` meters (approximate) around `center`
    ///
    /// Clamped to the valid coordinate range.
    pub fn around(center: Coordinates, radius_m: f64) -> Self {
        let delta = radius_m / METERS_PER_DEGREE;
        Self {
            south: (center.lat - delta).max(-90.0),
            west: (center.lng - delta).max(-180.0),
            north: (center.lat + delta).min(90.0),
            east: (center.lng + delta).min(180.0),
        }
    }

    /// Overpass filter form `(s,w,n,e)`
    fn to_filter(self) -> String {
        format!(
            "({:.6},{:.6},{:.6},{:.6})",
            self.south, self.west, self.north, self.east
        )
    }
}

/// A ready-to-send Overpass query
#[derive(Debug, Clone, PartialEq)]
pub struct OverpassQuery {
    pub bbox: BoundingBox,
    /// One `node[..](bbox);` line per selector
    pub selectors: Vec<String>,
    /// Complete Overpass QL text
    pub text: String,
}

/// Builds bounded-box queries for a set of categories
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    query_timeout_secs: u32,
}

impl QueryBuilder {
    pub fn new(query_timeout_secs: u32) -> Self {
        Self {
            query_timeout_secs: query_timeout_secs.max(1),
        }
    }

    /// Build the query, or `None` when no requested category maps to a selector
    ///
    /// `None` means the source must not be called at all.
    pub fn build(
        &self,
        center: Coordinates,
        radius_m: f64,
        categories: &CategorySet,
    ) -> Option<OverpassQuery> {
        let bbox = BoundingBox::around(center, radius_m);
        let filter = bbox.to_filter();

        let selectors: Vec<String> = categories
            .iter()
            .flat_map(rules_for)
            .map(|rule| {
                format!(
                    "node[\"{}\"=\"{}\"]{};",
                    escape_quoted(rule.key),
                    escape_quoted(rule.value),
                    filter
                )
            })
            .collect();

        if selectors.is_empty() {
            return None;
        }

        let body = selectors
            .iter()
            .map(|s| format!("  {}", s))
            .collect::<Vec<_>>()
            .join("\n");
        let text = format!(
            "[out:json][timeout:{}];\n(\n{}\n);\nout body;",
            self.query_timeout_secs, body
        );

        Some(OverpassQuery {
            bbox,
            selectors,
            text,
        })
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_QUERY_TIMEOUT_SECS)
    }
}

fn escape_quoted(raw: &str) -> String {
    raw.replace('\\', r"\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poi::Category;
    use approx::assert_relative_eq;

    fn paris() -> Coordinates {
        Coordinates::new(48.8566, 2.3522)
    }

    #[test]
    fn test_bbox_uses_flat_degree_conversion() {
        let bbox = BoundingBox::around(paris(), 1110.0);
        assert_relative_eq!(bbox.south, 48.8466, epsilon = 1e-9);
        assert_relative_eq!(bbox.north, 48.8666, epsilon = 1e-9);
        assert_relative_eq!(bbox.west, 2.3422, epsilon = 1e-9);
        assert_relative_eq!(bbox.east, 2.3622, epsilon = 1e-9);
    }

    #[test]
    fn test_bbox_clamped_near_pole() {
        let bbox = BoundingBox::around(Coordinates::new(89.99, 179.99), 5000.0);
        assert_eq!(bbox.north, 90.0);
        assert_eq!(bbox.east, 180.0);
    }

    #[test]
    fn test_one_selector_per_category() {
        let query = QueryBuilder::default()
            .build(paris(), 1000.0, &CategorySet::all())
            .unwrap();

        assert_eq!(query.selectors.len(), 3);
        assert!(query.text.starts_with("[out:json][timeout:25];"));
        assert!(query.text.contains("node[\"amenity\"=\"toilets\"](48.847591,2.343191,48.865609,2.361209);"));
        assert!(query.text.contains("node[\"amenity\"=\"parking\"]"));
        assert!(query.text.contains("node[\"internet_access\"=\"wifi\"]"));
        assert!(query.text.ends_with("out body;"));
    }

    #[test]
    fn test_only_requested_categories() {
        let categories: CategorySet = [Category::Parking].into_iter().collect();
        let query = QueryBuilder::default().build(paris(), 500.0, &categories).unwrap();

        assert_eq!(query.selectors.len(), 1);
        assert!(!query.text.contains("toilets"));
        assert!(!query.text.contains("internet_access"));
    }

    #[test]
    fn test_empty_category_set_builds_nothing() {
        assert!(QueryBuilder::default()
            .build(paris(), 1000.0, &CategorySet::parse("museum"))
            .is_none());
    }

    #[test]
    fn test_custom_timeout_directive() {
        let query = QueryBuilder::new(7)
            .build(paris(), 1000.0, &CategorySet::all())
            .unwrap();
        assert!(query.text.starts_with("[out:json][timeout:7];"));
    }
}
