//! Attribute filtering over a record store
//!
//! Every analysis path starts from a filtered view (possibly identity), so
//! the predicates live in one place instead of being re-implemented per
//! request handler.

use std::collections::BTreeSet;

use crate::models::Record;
use crate::store::RecordStore;

/// Attribute predicate set, builder-style
///
/// Unset fields are no constraint; set fields combine with AND semantics.
/// Cuisine and feature terms match case-insensitively against each parsed
/// token, not the raw joined string, so `{"North Indian", "Chinese"}`
/// matches a query for "indian".
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    cuisine: Option<String>,
    feature: Option<String>,
    name: Option<String>,
    max_price: Option<f64>,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrain by cuisine token substring. The sentinel "All" (any case)
    /// and blank terms mean no constraint.
    pub fn cuisine(mut self, term: impl Into<String>) -> Self {
        self.cuisine = normalize_term(term.into());
        self
    }

    /// Constrain by feature token substring; same sentinel rule as cuisine
    pub fn feature(mut self, term: impl Into<String>) -> Self {
        self.feature = normalize_term(term.into());
        self
    }

    /// Constrain by display-name substring, case-insensitive
    pub fn name(mut self, term: impl Into<String>) -> Self {
        self.name = normalize_term(term.into());
        self
    }

    /// Exclude records priced above `ceiling`. Records with an absent price
    /// are excluded outright, never passed through ambiguously.
    pub fn max_price(mut self, ceiling: f64) -> Self {
        self.max_price = Some(ceiling);
        self
    }

    /// True when no predicate is set
    pub fn is_identity(&self) -> bool {
        self.cuisine.is_none()
            && self.feature.is_none()
            && self.name.is_none()
            && self.max_price.is_none()
    }

    /// Filtered view over a store, preserving store order
    pub fn apply<'a>(&self, store: &'a RecordStore) -> Vec<&'a Record> {
        store.all().iter().filter(|record| self.matches(record)).collect()
    }

    /// Evaluate all set predicates against one record
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(term) = &self.cuisine {
            if !any_token_contains(&record.cuisines, term) {
                return false;
            }
        }
        if let Some(term) = &self.feature {
            if !any_token_contains(&record.features, term) {
                return false;
            }
        }
        if let Some(term) = &self.name {
            if !record.name.to_lowercase().contains(term.as_str()) {
                return false;
            }
        }
        if let Some(ceiling) = self.max_price {
            match record.price_for_two {
                Some(price) if price <= ceiling => {}
                _ => return false,
            }
        }
        true
    }
}

fn normalize_term(term: String) -> Option<String> {
    let trimmed = term.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

fn any_token_contains(tokens: &BTreeSet<String>, term: &str) -> bool {
    tokens.iter().any(|token| token.to_lowercase().contains(term))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawRecord;

    fn sample_store() -> RecordStore {
        let rows = vec![
            RawRecord {
                name: Some("Saravana Bhavan".to_string()),
                latitude: Some(13.08),
                longitude: Some(80.27),
                cuisine: Some("North Indian, Chinese".to_string()),
                features: Some("Outdoor Seating, Wifi".to_string()),
                price_for_two: Some(250.0),
                ..RawRecord::default()
            },
            RawRecord {
                name: Some("Dragon Palace".to_string()),
                latitude: Some(13.09),
                longitude: Some(80.28),
                cuisine: Some("Chinese".to_string()),
                features: Some("Home Delivery".to_string()),
                price_for_two: Some(900.0),
                ..RawRecord::default()
            },
            RawRecord {
                name: Some("Corner Cafe".to_string()),
                latitude: Some(13.10),
                longitude: Some(80.29),
                cuisine: Some("Cafe".to_string()),
                features: None,
                price_for_two: None,
                ..RawRecord::default()
            },
        ];
        RecordStore::load(rows).unwrap()
    }

    #[test]
    fn identity_filter_returns_every_record_in_order() {
        let store = sample_store();
        let filter = RecordFilter::new();
        assert!(filter.is_identity());

        let view = filter.apply(&store);
        assert_eq!(view.len(), store.len());
        let names: Vec<&str> = view.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Saravana Bhavan", "Dragon Palace", "Corner Cafe"]);
    }

    #[test]
    fn all_sentinel_means_no_constraint() {
        let store = sample_store();
        let filter = RecordFilter::new().cuisine("All").feature("ALL").name("  ");
        assert!(filter.is_identity());
        assert_eq!(filter.apply(&store).len(), 3);
    }

    #[test]
    fn cuisine_match_is_substring_over_tokens() {
        let store = sample_store();

        // "indian" matches the "North Indian" token, not the joined string
        let view = RecordFilter::new().cuisine("indian").apply(&store);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].name, "Saravana Bhavan");

        let view = RecordFilter::new().cuisine("chinese").apply(&store);
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn predicates_combine_with_and_semantics() {
        let store = sample_store();
        let view = RecordFilter::new()
            .cuisine("chinese")
            .feature("wifi")
            .apply(&store);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].name, "Saravana Bhavan");
    }

    #[test]
    fn max_price_excludes_unpriced_records() {
        let store = sample_store();

        let view = RecordFilter::new().max_price(1000.0).apply(&store);
        let names: Vec<&str> = view.iter().map(|r| r.name.as_str()).collect();
        // Corner Cafe has no price and is excluded even under a high ceiling
        assert_eq!(names, ["Saravana Bhavan", "Dragon Palace"]);

        let view = RecordFilter::new().max_price(300.0).apply(&store);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].name, "Saravana Bhavan");
    }

    #[test]
    fn name_search_is_case_insensitive() {
        let store = sample_store();
        let view = RecordFilter::new().name("cafe").apply(&store);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].name, "Corner Cafe");
    }
}
