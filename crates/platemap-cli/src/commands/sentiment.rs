use anyhow::Result;
use platemap_core::classify::{sentiment, Sentiment};
use platemap_core::models::RatingKind;
use platemap_core::{stats, RecordStore};
use serde::Serialize;
use tabled::Tabled;

use super::{build_filter, fmt_rating};
use crate::cli::SentimentArgs;
use crate::output::OutputWriter;

#[derive(Tabled, Serialize)]
struct BandRow {
    #[tabled(rename = "Sentiment")]
    band: String,

    #[tabled(rename = "Records")]
    count: usize,
}

#[derive(Tabled, Serialize)]
struct RatedRow {
    #[tabled(rename = "Name")]
    name: String,

    #[tabled(rename = "Rating")]
    rating: String,
}

pub fn execute(args: SentimentArgs, store: &RecordStore, output: &OutputWriter) -> Result<()> {
    let kind = if args.delivery {
        RatingKind::Delivery
    } else {
        RatingKind::Dining
    };

    let mut view = build_filter(&args.filter).apply(store);
    if args.delivery {
        // The delivery view only ever considers delivery-rated records
        view.retain(|record| record.delivery_rating.is_some());
    }

    let mut positive = 0usize;
    let mut neutral = 0usize;
    let mut negative = 0usize;
    let mut unknown = 0usize;
    for record in &view {
        match sentiment(record.rating(kind)) {
            Sentiment::Positive => positive += 1,
            Sentiment::Neutral => neutral += 1,
            Sentiment::Negative => negative += 1,
            Sentiment::Unknown => unknown += 1,
        }
    }

    let label = if args.delivery { "Delivery" } else { "Dining" };
    output.section(format!("{label} Sentiment Bands"));
    let bands = vec![
        BandRow { band: Sentiment::Positive.to_string(), count: positive },
        BandRow { band: Sentiment::Neutral.to_string(), count: neutral },
        BandRow { band: Sentiment::Negative.to_string(), count: negative },
        BandRow { band: "No rating data".to_string(), count: unknown },
    ];
    output.table(&bands);

    let as_rows = |records: Vec<&platemap_core::models::Record>| -> Vec<RatedRow> {
        records
            .into_iter()
            .map(|record| RatedRow {
                name: record.name.clone(),
                rating: fmt_rating(record.rating(kind)),
            })
            .collect()
    };

    output.section(format!("Top {} by {label} Rating", args.top));
    output.table(&as_rows(stats::top_by_rating(&view, kind, args.top, false)));

    output.section(format!("Bottom {} by {label} Rating", args.top));
    output.table(&as_rows(stats::top_by_rating(&view, kind, args.top, true)));

    Ok(())
}
