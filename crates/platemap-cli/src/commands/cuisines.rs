use anyhow::Result;
use platemap_core::models::Record;
use platemap_core::{stats, RecordStore};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::CuisinesArgs;
use crate::defaults::Defaults;
use crate::output::OutputWriter;

#[derive(Tabled, Serialize)]
struct CuisineRow {
    #[tabled(rename = "Rank")]
    rank: usize,

    #[tabled(rename = "Cuisine")]
    cuisine: String,

    #[tabled(rename = "Records")]
    count: usize,
}

pub fn execute(
    args: CuisinesArgs,
    store: &RecordStore,
    defaults: &Defaults,
    output: &OutputWriter,
) -> Result<()> {
    let top_n = args.top_n.unwrap_or(defaults.top_cuisines);

    let view: Vec<&Record> = store.all().iter().collect();
    let ranked = stats::cuisine_frequency(&view);

    output.section("Cuisine Popularity");
    output.kv("Distinct cuisines", ranked.len());

    let rows: Vec<CuisineRow> = ranked
        .into_iter()
        .take(top_n)
        .enumerate()
        .map(|(i, (cuisine, count))| CuisineRow {
            rank: i + 1,
            cuisine,
            count,
        })
        .collect();
    output.table(&rows);

    Ok(())
}
