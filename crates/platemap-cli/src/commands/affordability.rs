use anyhow::Result;
use platemap_core::classify::price_tier;
use platemap_core::RecordStore;
use serde::Serialize;
use tabled::Tabled;

use super::{build_filter, fmt_price, join_tokens};
use crate::cli::AffordabilityArgs;
use crate::output::OutputWriter;

#[derive(Tabled, Serialize)]
struct AffordabilityRow {
    #[tabled(rename = "Name")]
    name: String,

    #[tabled(rename = "Cuisines")]
    cuisines: String,

    #[tabled(rename = "Price for 2")]
    price: String,

    #[tabled(rename = "Tier")]
    tier: String,
}

pub fn execute(args: AffordabilityArgs, store: &RecordStore, output: &OutputWriter) -> Result<()> {
    let mut filter = build_filter(&args.filter);
    if let Some(search) = &args.search {
        filter = filter.name(search.clone());
    }

    let view = filter.apply(store);

    output.section("Affordability");
    if let Some(search) = &args.search {
        output.kv("Search", search);
    }
    output.kv("Matches", view.len());

    let rows: Vec<AffordabilityRow> = view
        .iter()
        .map(|record| AffordabilityRow {
            name: record.name.clone(),
            cuisines: join_tokens(&record.cuisines),
            price: fmt_price(record.price_for_two),
            tier: price_tier(record.price_for_two).to_string(),
        })
        .collect();
    output.table(&rows);

    Ok(())
}
