//! Category ↔ Overpass tag vocabulary
//!
//! A single ordered table drives both directions: the query builder turns each
//! requested category's rule into a tag selector, and the normalizer walks the
//! table top to bottom and takes the first rule whose tag matches.
//! Adding a category means adding a row here.

use crate::poi::Category;
use std::collections::BTreeMap;

/// One `key=value` tag test tied to a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagRule {
    pub category: Category,
    pub key: &'static str,
    pub value: &'static str,
}

impl TagRule {
    /// Whether a tag dictionary satisfies this rule
    pub fn matches(&self, tags: &BTreeMap<String, String>) -> bool {
        tags.get(self.key).is_some_and(|v| v == self.value)
    }
}

/// Priority-ordered rules, first match wins
pub const CATEGORY_RULES: &[TagRule] = &[
    TagRule { category: Category::Toilet, key: "amenity", value: "toilets" },
    TagRule { category: Category::Parking, key: "amenity", value: "parking" },
    TagRule { category: Category::Wifi, key: "internet_access", value: "wifi" },
];

/// Infer a category from a tag dictionary
pub fn classify(tags: &BTreeMap<String, String>) -> Option<Category> {
    CATEGORY_RULES
        .iter()
        .find(|rule| rule.matches(tags))
        .map(|rule| rule.category)
}

/// Rules that select a given category in a query
pub fn rules_for(category: Category) -> impl Iterator<Item = &'static TagRule> {
    CATEGORY_RULES.iter().filter(move |rule| rule.category == category)
}
