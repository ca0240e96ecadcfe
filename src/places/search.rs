//! Free-text search over known places
//!
//! Matches the term against name and address, ignoring case and common Latin
//! accents ("chatelet" finds "Châtelet"). Ligatures are spelled out, so
//! "coeur" finds "Cœur". Live cache entries are scanned
//! first, then the fallback set; an id seen once is not returned again.
//! A blank term matches nothing.

use crate::cache::ResultCache;
use crate::coord::Coordinates;
use crate::fallback::FallbackStore;
use crate::poi::{sort_by_distance, Poi};
use std::collections::HashSet;
use std::sync::Arc;

/// Read-only view over the cache and the fallback set
#[derive(Debug, Clone)]
pub struct SearchIndex {
    cache: Arc<ResultCache>,
    fallback: Arc<FallbackStore>,
}

impl SearchIndex {
    pub fn new(cache: Arc<ResultCache>, fallback: Arc<FallbackStore>) -> Self {
        Self { cache, fallback }
    }

    /// Places whose name or address contains `term`, nearest to `center` first
    pub fn search(&self, term: &str, center: Coordinates) -> Vec<Poi> {
        let needle = fold(term.trim());
        if needle.is_empty() {
            return Vec::new();
        }

        let mut seen = HashSet::new();
        let mut results = Vec::new();

        let cached = self.cache.live_entries();
        let candidates = cached
            .iter()
            .flat_map(|entry| entry.places.iter())
            .chain(self.fallback.places());

        for poi in candidates {
            if matches(poi, &needle) && seen.insert(poi.id.clone()) {
                results.push(poi.measured_from(center));
            }
        }

        sort_by_distance(&mut results);
        results
    }
}

fn matches(poi: &Poi, needle: &str) -> bool {
    fold(&poi.name).contains(needle)
        || poi
            .address
            .as_deref()
            .is_some_and(|address| fold(address).contains(needle))
}

/// Lowercase, strip diacritics from Latin letters and spell out ligatures
fn fold(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    for c in text.chars().flat_map(char::to_lowercase) {
        match c {
            'œ' => folded.push_str("oe"),
            'æ' => folded.push_str("ae"),
            'ß' => folded.push_str("ss"),
            other => folded.push(strip_accent(other)),
        }
    }
    folded
}

fn strip_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ą' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'ď' | 'đ' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ę' | 'ě' => 'e',
        'ì' | 'í' | 'î' | 'ï' | 'ī' => 'i',
        'ł' => 'l',
        'ñ' | 'ń' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => 'o',
        'ř' => 'r',
        'ś' | 'š' => 's',
        'ť' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poi::Category;
    use std::time::Duration;

    fn paris() -> Coordinates {
        Coordinates::new(48.8566, 2.3522)
    }

    fn index() -> (SearchIndex, Arc<ResultCache>) {
        let cache = Arc::new(ResultCache::new());
        let index = SearchIndex::new(Arc::clone(&cache), Arc::new(FallbackStore::builtin()));
        (index, cache)
    }

    fn live_poi(id: &str, name: &str, lat: f64) -> Poi {
        Poi {
            id: id.to_string(),
            name: name.to_string(),
            category: Category::Toilet,
            location: Coordinates::new(lat, 2.3522),
            distance: Some(12345.0),
            address: None,
            opening_hours: None,
            description: None,
            amenities: Vec::new(),
        }
    }

    #[test]
    fn test_fold() {
        assert_eq!(fold("Châtelet"), "chatelet");
        assert_eq!(fold("HÔTEL de Ville"), "hotel de ville");
        assert_eq!(fold("Réseau"), "reseau");
    }

    #[test]
    fn test_empty_term_matches_nothing() {
        let (index, _) = index();
        assert!(index.search("", paris()).is_empty());
        assert!(index.search("   ", paris()).is_empty());
    }

    #[test]
    fn test_chatelet_matches_toilet_and_parking() {
        let (index, _) = index();
        let reference = Coordinates::new(48.8580, 2.3540);

        let results = index.search("chatelet", reference);
        let ids: Vec<&str> = results.iter().map(|p| p.id.as_str()).collect();

        // parking is closer to the reference point than the toilet
        assert_eq!(ids, ["2", "1"]);
        assert!(results[0].distance.unwrap() < results[1].distance.unwrap());
    }

    #[test]
    fn test_matches_address() {
        let (index, _) = index();
        let results = index.search("RIVOLI", paris());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].category, Category::Parking);
    }

    #[test]
    fn test_no_match() {
        let (index, _) = index();
        assert!(index.search("montparnasse", paris()).is_empty());
    }

    #[test]
    fn test_cached_places_are_searched_and_remeasured() {
        let (index, cache) = index();
        cache.insert("k", vec![live_poi("overpass_1", "Sanisette Châtelet", 48.8576)]);

        let results = index.search("chatelet", paris());
        let ids: Vec<&str> = results.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["1", "overpass_1", "2"]);

        let live = results.iter().find(|p| p.id == "overpass_1").unwrap();
        assert!((live.distance.unwrap() - 111.2).abs() < 1.0);
    }

    #[test]
    fn test_dedup_by_id() {
        let (index, cache) = index();
        let fallback_copy = FallbackStore::builtin().query(paris(), 5000.0, &crate::poi::CategorySet::all());
        cache.insert("a", fallback_copy.clone());
        cache.insert("b", fallback_copy);

        let results = index.search("paris", paris());
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn test_expired_entries_ignored() {
        let (index, cache) = index();
        cache.put(
            "old",
            vec![live_poi("overpass_9", "Toilettes Beaubourg", 48.86)],
            Duration::from_millis(10),
        );
        std::thread::sleep(Duration::from_millis(30));

        assert!(index.search("beaubourg", paris()).is_empty());
    }

    #[test]
    fn test_no_category_filter() {
        let (index, _) = index();
        let results = index.search("75", paris());
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn test_fold_expands_ligatures() {
        assert_eq!(fold("Sacré-Cœur"), "sacre-coeur");
        assert_eq!(fold("Æther"), "aether");
        assert_eq!(fold("Straße"), "strasse");
        assert_eq!(fold("Øresund Łódź"), "oresund lodz");
    }

    #[test]
    fn test_ligature_names_found_without_ligature() {
        let (index, cache) = index();
        cache.insert("k", vec![live_poi("overpass_9", "Toilettes - Sacré-Cœur", 48.8867)]);

        let results = index.search("coeur", paris());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "overpass_9");
        assert_eq!(index.search("Cœur", paris()).len(), 1);
    }
}
