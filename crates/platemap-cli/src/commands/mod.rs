//! Command implementations

mod affordability;
mod cuisines;
mod density;
mod filter;
mod gaps;
mod nearby;
mod sentiment;
mod stats;
mod status;

use std::collections::BTreeSet;

use anyhow::Result;
use platemap_core::filter::RecordFilter;

use crate::cli::{Cli, Commands, FilterOpts};
use crate::dataset;
use crate::defaults::Defaults;
use crate::output::OutputWriter;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let defaults = Defaults::load()?;
    let store = dataset::load_store(&cli.data)?;

    let report = store.load_report();
    if report.skipped > 0 {
        output.warning(format!(
            "{} of {} rows failed validation; run `platemap status` for details",
            report.skipped, report.total_rows
        ));
    }

    match cli.command {
        Commands::Nearby(args) => nearby::execute(args, &store, &defaults, &output),
        Commands::Density(args) => density::execute(args, &store, &defaults, &output),
        Commands::Gaps(args) => gaps::execute(args, &store, &defaults, &output),
        Commands::Filter(args) => filter::execute(args, &store, &output),
        Commands::Sentiment(args) => sentiment::execute(args, &store, &output),
        Commands::Affordability(args) => affordability::execute(args, &store, &output),
        Commands::Cuisines(args) => cuisines::execute(args, &store, &defaults, &output),
        Commands::Stats(args) => stats::execute(args, &store, &defaults, &output),
        Commands::Status => status::execute(&store, &output),
    }
}

/// Translate shared CLI predicates into a core filter
pub(crate) fn build_filter(opts: &FilterOpts) -> RecordFilter {
    let mut filter = RecordFilter::new();
    if let Some(cuisine) = &opts.cuisine {
        filter = filter.cuisine(cuisine.clone());
    }
    if let Some(feature) = &opts.feature {
        filter = filter.feature(feature.clone());
    }
    if let Some(max_price) = opts.max_price {
        filter = filter.max_price(max_price);
    }
    filter
}

pub(crate) fn join_tokens(tokens: &BTreeSet<String>) -> String {
    tokens.iter().cloned().collect::<Vec<_>>().join(", ")
}

pub(crate) fn fmt_price(price: Option<f64>) -> String {
    price.map_or_else(|| "-".to_string(), |p| format!("{p:.0}"))
}

pub(crate) fn fmt_rating(rating: Option<f64>) -> String {
    rating.map_or_else(|| "-".to_string(), |r| format!("{r:.1}"))
}
