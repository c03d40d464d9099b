use anyhow::Result;
use platemap_core::RecordStore;
use serde::Serialize;
use tabled::Tabled;

use super::{build_filter, fmt_price, join_tokens};
use crate::cli::FilterArgs;
use crate::output::OutputWriter;

#[derive(Tabled, Serialize)]
struct FilterRow {
    #[tabled(rename = "Name")]
    name: String,

    #[tabled(rename = "Cuisines")]
    cuisines: String,

    #[tabled(rename = "Features")]
    features: String,

    #[tabled(rename = "Price for 2")]
    price: String,
}

pub fn execute(args: FilterArgs, store: &RecordStore, output: &OutputWriter) -> Result<()> {
    let mut filter = build_filter(&args.filter);
    if let Some(name) = &args.name {
        filter = filter.name(name.clone());
    }

    let view = filter.apply(store);

    output.section("Filtered Records");
    output.kv("Matches", format!("{} of {}", view.len(), store.len()));

    let rows: Vec<FilterRow> = view
        .iter()
        .map(|record| FilterRow {
            name: record.name.clone(),
            cuisines: join_tokens(&record.cuisines),
            features: join_tokens(&record.features),
            price: fmt_price(record.price_for_two),
        })
        .collect();
    output.table(&rows);

    Ok(())
}
