use anyhow::{Context, Result};
use platemap_core::distance::DistanceIndex;
use platemap_core::models::Coordinate;
use platemap_core::RecordStore;
use serde::Serialize;
use tabled::Tabled;

use super::{build_filter, fmt_price, join_tokens};
use crate::cli::NearbyArgs;
use crate::defaults::Defaults;
use crate::output::OutputWriter;

#[derive(Tabled, Serialize)]
struct NearbyRow {
    #[tabled(rename = "Name")]
    name: String,

    #[tabled(rename = "Distance (m)")]
    distance_m: String,

    #[tabled(rename = "Cuisines")]
    cuisines: String,

    #[tabled(rename = "Price for 2")]
    price: String,
}

pub fn execute(
    args: NearbyArgs,
    store: &RecordStore,
    defaults: &Defaults,
    output: &OutputWriter,
) -> Result<()> {
    let radius_m = args.radius.unwrap_or(defaults.radius_m);
    let origin = Coordinate {
        lat: args.lat,
        lon: args.lon,
    };

    let view = build_filter(&args.filter).apply(store);
    let index = DistanceIndex::build(view.iter().copied());
    let hits = index
        .within_radius(origin, radius_m)
        .context("proximity query failed")?;

    output.section("Nearby Records");
    output.kv("Origin", format!("({}, {})", origin.lat, origin.lon));
    output.kv("Radius", format!("{radius_m} m"));
    output.kv("Matches", hits.len());

    let rows: Vec<NearbyRow> = hits
        .iter()
        .map(|(record, distance)| NearbyRow {
            name: record.name.clone(),
            distance_m: format!("{distance:.1}"),
            cuisines: join_tokens(&record.cuisines),
            price: fmt_price(record.price_for_two),
        })
        .collect();
    output.table(&rows);

    Ok(())
}
