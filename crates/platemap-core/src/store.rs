//! Immutable record store and dataset load validation

use std::collections::BTreeSet;

use tracing::warn;

use crate::error::LoadError;
use crate::models::{Coordinate, RawRecord, Record, RecordId};

/// How many offending rows the load report retains verbatim
const MAX_REPORTED_SKIPS: usize = 10;

/// Per-load validation diagnostics
///
/// Bad rows are excluded and counted here rather than failing the load or
/// being dropped silently.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Rows offered to the loader
    pub total_rows: usize,

    /// Rows rejected by validation
    pub skipped: usize,

    /// First few rejections, as "row N: reason"
    pub first_skipped: Vec<String>,
}

/// Immutable, loaded-once collection of validated records
///
/// Loading is the only mutation point. After construction the store is
/// read-only, so any number of request handlers may query it concurrently
/// without locking.
#[derive(Debug)]
pub struct RecordStore {
    records: Vec<Record>,
    report: LoadReport,
}

impl RecordStore {
    /// Validate and load raw rows
    ///
    /// Rows with a missing name or an invalid coordinate are skipped and
    /// recorded in the [`LoadReport`]; a dataset yielding zero valid records
    /// is a [`LoadError`].
    pub fn load(rows: Vec<RawRecord>) -> Result<Self, LoadError> {
        if rows.is_empty() {
            return Err(LoadError::EmptyDataset);
        }

        let total = rows.len();
        let mut records = Vec::with_capacity(total);
        let mut report = LoadReport {
            total_rows: total,
            ..LoadReport::default()
        };

        for (ordinal, raw) in rows.into_iter().enumerate() {
            match validate_row(ordinal as u64, raw) {
                Ok(record) => records.push(record),
                Err(reason) => {
                    warn!(row = ordinal, reason, "skipping invalid row");
                    report.skipped += 1;
                    if report.first_skipped.len() < MAX_REPORTED_SKIPS {
                        report.first_skipped.push(format!("row {ordinal}: {reason}"));
                    }
                }
            }
        }

        if records.is_empty() {
            return Err(LoadError::NoValidRows { total });
        }

        Ok(Self { records, report })
    }

    /// All records in input order
    pub fn all(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Validation diagnostics from the load that built this store
    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }

    /// Sorted distinct cuisine tokens, for populating filter choices
    pub fn cuisine_values(&self) -> Vec<String> {
        distinct_tokens(self.records.iter().map(|r| &r.cuisines))
    }

    /// Sorted distinct feature tokens
    pub fn feature_values(&self) -> Vec<String> {
        distinct_tokens(self.records.iter().map(|r| &r.features))
    }
}

fn distinct_tokens<'a>(sets: impl Iterator<Item = &'a BTreeSet<String>>) -> Vec<String> {
    let mut all = BTreeSet::new();
    for set in sets {
        all.extend(set.iter().cloned());
    }
    all.into_iter().collect()
}

/// Split a comma-joined token string into a set, trimming whitespace and
/// dropping empty tokens
pub fn parse_tokens(joined: &str) -> BTreeSet<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

fn validate_row(ordinal: u64, raw: RawRecord) -> Result<Record, &'static str> {
    let name = match raw.name {
        Some(name) if !name.trim().is_empty() => name,
        _ => return Err("missing name"),
    };

    let coordinate = match (raw.latitude, raw.longitude) {
        (Some(lat), Some(lon)) => {
            Coordinate::validated(lat, lon).ok_or("coordinate out of bounds")?
        }
        _ => return Err("missing coordinate"),
    };

    Ok(Record {
        id: RecordId(raw.id.unwrap_or(ordinal)),
        name,
        coordinate,
        cuisines: raw.cuisine.as_deref().map(parse_tokens).unwrap_or_default(),
        features: raw.features.as_deref().map(parse_tokens).unwrap_or_default(),
        price_for_two: non_negative(raw.price_for_two),
        dining_rating: non_negative(raw.dining_rating),
        delivery_rating: non_negative(raw.delivery_rating),
        rating_count: raw.rating_count,
    })
}

/// Negative or non-finite numerics carry no information; treat them as absent
fn non_negative(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_row(name: &str, lat: f64, lon: f64) -> RawRecord {
        RawRecord {
            name: Some(name.to_string()),
            latitude: Some(lat),
            longitude: Some(lon),
            ..RawRecord::default()
        }
    }

    #[test]
    fn load_preserves_input_order() {
        let store = RecordStore::load(vec![
            valid_row("b", 13.08, 80.27),
            valid_row("a", 13.09, 80.28),
        ])
        .unwrap();

        let names: Vec<&str> = store.all().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(store.all()[0].id, RecordId(0));
        assert_eq!(store.all()[1].id, RecordId(1));
    }

    #[test]
    fn invalid_rows_are_counted_not_fatal() {
        let rows = vec![
            valid_row("ok", 13.08, 80.27),
            valid_row("bad coord", 91.0, 80.27),
            RawRecord {
                latitude: Some(13.08),
                longitude: Some(80.27),
                ..RawRecord::default()
            },
        ];

        let store = RecordStore::load(rows).unwrap();
        assert_eq!(store.len(), 1);

        let report = store.load_report();
        assert_eq!(report.total_rows, 3);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.first_skipped.len(), 2);
        assert!(report.first_skipped[0].contains("row 1"));
    }

    #[test]
    fn empty_dataset_is_a_load_error() {
        assert!(matches!(
            RecordStore::load(Vec::new()),
            Err(LoadError::EmptyDataset)
        ));
    }

    #[test]
    fn all_invalid_rows_is_a_load_error() {
        let rows = vec![valid_row("bad", f64::NAN, 80.27)];
        assert!(matches!(
            RecordStore::load(rows),
            Err(LoadError::NoValidRows { total: 1 })
        ));
    }

    #[test]
    fn negative_numerics_become_absent() {
        let mut row = valid_row("r", 13.08, 80.27);
        row.price_for_two = Some(-50.0);
        row.dining_rating = Some(4.2);

        let store = RecordStore::load(vec![row]).unwrap();
        let record = &store.all()[0];
        assert_eq!(record.price_for_two, None);
        assert_eq!(record.dining_rating, Some(4.2));
    }

    #[test]
    fn token_parsing_trims_and_drops_empties() {
        let tokens = parse_tokens("North Indian, Chinese,, Cafe ");
        let expected: Vec<&str> = tokens.iter().map(String::as_str).collect();
        assert_eq!(expected, ["Cafe", "Chinese", "North Indian"]);
    }

    #[test]
    fn distinct_values_are_sorted_across_records() {
        let mut a = valid_row("a", 13.08, 80.27);
        a.cuisine = Some("Chinese, Cafe".to_string());
        let mut b = valid_row("b", 13.09, 80.28);
        b.cuisine = Some("Cafe, Biryani".to_string());

        let store = RecordStore::load(vec![a, b]).unwrap();
        assert_eq!(store.cuisine_values(), ["Biryani", "Cafe", "Chinese"]);
    }
}
