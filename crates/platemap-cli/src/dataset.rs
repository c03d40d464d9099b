//! CSV ingestion into core record rows
//!
//! Column headers follow the published dataset. Numeric cells are parsed
//! leniently: junk like "Not Available" becomes an absent value rather than
//! failing the whole file; the core's validation decides which absences
//! reject a row.

use anyhow::{Context, Result};
use platemap_core::models::RawRecord;
use platemap_core::RecordStore;
use serde::{Deserialize, Deserializer};
use std::path::Path;
use tracing::info;

/// One CSV row using the dataset's column headers
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Restaurant_Name")]
    name: Option<String>,

    #[serde(rename = "Cuisine")]
    cuisine: Option<String>,

    #[serde(rename = "Features", default)]
    features: Option<String>,

    #[serde(rename = "Price for 2", deserialize_with = "lenient_f64", default)]
    price_for_two: Option<f64>,

    #[serde(rename = "Latitude", deserialize_with = "lenient_f64", default)]
    latitude: Option<f64>,

    #[serde(rename = "Longitude", deserialize_with = "lenient_f64", default)]
    longitude: Option<f64>,

    #[serde(rename = "Dining Rating", deserialize_with = "lenient_f64", default)]
    dining_rating: Option<f64>,

    #[serde(rename = "Delivery Rating", deserialize_with = "lenient_f64", default)]
    delivery_rating: Option<f64>,

    #[serde(rename = "Dining Rating Count", deserialize_with = "lenient_u64", default)]
    rating_count: Option<u64>,
}

impl From<CsvRow> for RawRecord {
    fn from(row: CsvRow) -> Self {
        RawRecord {
            id: None,
            name: row.name,
            latitude: row.latitude,
            longitude: row.longitude,
            cuisine: row.cuisine,
            features: row.features,
            price_for_two: row.price_for_two,
            dining_rating: row.dining_rating,
            delivery_rating: row.delivery_rating,
            rating_count: row.rating_count,
        }
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|cell| cell.trim().parse().ok()))
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    // Review counts sometimes arrive as "1,200" or "1200.0"
    Ok(raw.and_then(|cell| {
        let cleaned: String = cell.trim().chars().filter(|c| *c != ',').collect();
        cleaned
            .parse::<u64>()
            .ok()
            .or_else(|| cleaned.parse::<f64>().ok().map(|v| v as u64))
    }))
}

/// Read the CSV at `path` and build the record store
pub fn load_store(path: &Path) -> Result<RecordStore> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed to open dataset {}", path.display()))?;

    let mut rows = Vec::new();
    for row in reader.deserialize::<CsvRow>() {
        let row = row.with_context(|| format!("malformed CSV row in {}", path.display()))?;
        rows.push(RawRecord::from(row));
    }

    let store = RecordStore::load(rows)
        .with_context(|| format!("failed to load dataset {}", path.display()))?;

    info!(
        records = store.len(),
        skipped = store.load_report().skipped,
        "dataset loaded"
    );
    Ok(store)
}
