use anyhow::{Context, Result};
use platemap_core::models::RatingKind;
use platemap_core::{grid, RecordStore};
use serde::Serialize;
use tabled::Tabled;

use super::{build_filter, fmt_rating};
use crate::cli::DensityArgs;
use crate::defaults::Defaults;
use crate::output::OutputWriter;

#[derive(Tabled, Serialize)]
struct DensityRow {
    #[tabled(rename = "Cell Center")]
    center: String,

    #[tabled(rename = "Records")]
    count: usize,

    #[tabled(rename = "Mean Rating")]
    mean_rating: String,
}

pub fn execute(
    args: DensityArgs,
    store: &RecordStore,
    defaults: &Defaults,
    output: &OutputWriter,
) -> Result<()> {
    let cell_size = args.cell_size.unwrap_or(defaults.cell_size_deg);
    let kind = if args.delivery {
        RatingKind::Delivery
    } else {
        RatingKind::Dining
    };

    let mut view = build_filter(&args.filter).apply(store);
    if args.delivery {
        // The delivery grid only ever considers delivery-rated records
        view.retain(|record| record.delivery_rating.is_some());
    }
    let cells = grid::aggregate_by(&view, cell_size, kind).context("grid aggregation failed")?;

    output.section(if args.delivery {
        "Delivery Density Grid"
    } else {
        "Density Grid"
    });
    output.kv("Cell size", format!("{cell_size}°"));
    output.kv("Populated cells", cells.len());
    output.kv("Records", view.len());

    let rows: Vec<DensityRow> = cells
        .values()
        .map(|cell| {
            let center = cell.key.centroid(cell_size);
            DensityRow {
                center: format!("({:.4}, {:.4})", center.lat, center.lon),
                count: cell.count(),
                mean_rating: fmt_rating(cell.mean_rating()),
            }
        })
        .collect();
    output.table(&rows);

    Ok(())
}
