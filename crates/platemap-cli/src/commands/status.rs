use anyhow::Result;
use platemap_core::RecordStore;
use serde::Serialize;

use crate::output::OutputWriter;

#[derive(Serialize)]
struct StatusPayload {
    records: usize,
    rows_total: usize,
    rows_skipped: usize,
    first_skipped: Vec<String>,
    distinct_cuisines: usize,
    distinct_features: usize,
}

pub fn execute(store: &RecordStore, output: &OutputWriter) -> Result<()> {
    let report = store.load_report();
    let payload = StatusPayload {
        records: store.len(),
        rows_total: report.total_rows,
        rows_skipped: report.skipped,
        first_skipped: report.first_skipped.clone(),
        distinct_cuisines: store.cuisine_values().len(),
        distinct_features: store.feature_values().len(),
    };

    if output.is_json() {
        output.json(&payload);
        return Ok(());
    }

    output.section("Dataset Status");
    output.kv("Records", payload.records);
    output.kv("Rows in source", payload.rows_total);
    output.kv("Rows skipped", payload.rows_skipped);
    output.kv("Distinct cuisines", payload.distinct_cuisines);
    output.kv("Distinct features", payload.distinct_features);

    if !payload.first_skipped.is_empty() {
        output.section("First Skipped Rows");
        for line in &payload.first_skipped {
            output.kv("skipped", line);
        }
    }

    Ok(())
}
