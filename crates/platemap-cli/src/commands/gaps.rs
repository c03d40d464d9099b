use anyhow::{Context, Result};
use platemap_core::models::Record;
use platemap_core::{gaps, grid, stats, RecordStore};
use serde::Serialize;
use tabled::Tabled;

use super::build_filter;
use crate::cli::GapsArgs;
use crate::defaults::Defaults;
use crate::output::OutputWriter;

#[derive(Tabled, Serialize)]
struct GapRow {
    #[tabled(rename = "Location")]
    location: String,

    #[tabled(rename = "Records")]
    count: usize,

    #[tabled(rename = "Mean Rating")]
    mean_rating: String,

    #[tabled(rename = "Suggested Cuisines")]
    missing: String,
}

pub fn execute(
    args: GapsArgs,
    store: &RecordStore,
    defaults: &Defaults,
    output: &OutputWriter,
) -> Result<()> {
    let cell_size = args.cell_size.unwrap_or(defaults.cell_size_deg);
    let min_count = args.min_count.unwrap_or(defaults.gap_min_count);
    let max_rating = args.max_rating.unwrap_or(defaults.gap_max_rating);
    let top_n = args.top_n.unwrap_or(defaults.top_cuisines);

    // The cuisine ranking always comes from the full store; only the cells
    // are aggregated from the filtered view
    let full_view: Vec<&Record> = store.all().iter().collect();
    let ranking = stats::top_cuisines(&full_view, top_n);

    let view = build_filter(&args.filter).apply(store);
    let cells = grid::aggregate(&view, cell_size).context("grid aggregation failed")?;
    let reports = gaps::detect_gaps(&cells, cell_size, &ranking, min_count, max_rating);

    output.section("Market Gaps");
    output.kv("Cell size", format!("{cell_size}°"));
    output.kv(
        "Underserved when",
        format!("count >= {min_count} and mean rating < {max_rating}"),
    );
    output.kv("Citywide top cuisines", ranking.join(", "));
    output.kv("Underserved cells", reports.len());

    let rows: Vec<GapRow> = reports
        .iter()
        .map(|report| GapRow {
            location: format!("({:.4}, {:.4})", report.centroid.lat, report.centroid.lon),
            count: report.count,
            mean_rating: format!("{:.2}", report.mean_rating),
            missing: if report.missing_cuisines.is_empty() {
                "all top cuisines present".to_string()
            } else {
                report.missing_cuisines.join(", ")
            },
        })
        .collect();
    output.table(&rows);

    Ok(())
}
