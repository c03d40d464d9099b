use anyhow::Result;
use platemap_core::{stats, RecordStore};
use serde::Serialize;
use tabled::Tabled;

use super::build_filter;
use crate::cli::StatsArgs;
use crate::defaults::Defaults;
use crate::output::OutputWriter;

#[derive(Tabled, Serialize)]
struct PriceBandRow {
    #[tabled(rename = "Price Range")]
    range: String,

    #[tabled(rename = "Records")]
    count: usize,
}

#[derive(Tabled, Serialize)]
struct DemandRow {
    #[tabled(rename = "Name")]
    name: String,

    #[tabled(rename = "Reviews")]
    reviews: u64,
}

pub fn execute(
    args: StatsArgs,
    store: &RecordStore,
    defaults: &Defaults,
    output: &OutputWriter,
) -> Result<()> {
    let view = build_filter(&args.filter).apply(store);

    let (bands, unpriced) = stats::price_distribution(&view, &defaults.price_bins);

    output.section("Price Distribution");
    output.kv("Records without a price", unpriced);
    let band_rows: Vec<PriceBandRow> = bands
        .iter()
        .map(|band| PriceBandRow {
            range: format!("{:.0}-{:.0}", band.lo, band.hi),
            count: band.count,
        })
        .collect();
    output.table(&band_rows);

    output.section(format!("Top {} by Review Count", args.top));
    let demand_rows: Vec<DemandRow> = stats::top_by_rating_count(&view, args.top)
        .into_iter()
        .map(|record| DemandRow {
            name: record.name.clone(),
            reviews: record.rating_count.unwrap_or(0),
        })
        .collect();
    output.table(&demand_rows);

    Ok(())
}
