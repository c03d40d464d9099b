//! Global, non-spatial aggregates: cuisine ranking, price distribution,
//! best/worst lists

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{RatingKind, Record};

/// Cuisine frequency across a record view
///
/// Sorted by descending count, ties by name ascending, so the ranking is
/// stable under input permutation.
pub fn cuisine_frequency(records: &[&Record]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        for cuisine in &record.cuisines {
            *counts.entry(cuisine).or_default() += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

/// Names of the `n` most frequent cuisines, in rank order
///
/// Feed this from the full store when driving gap detection; the
/// global-vs-local asymmetry there is deliberate.
pub fn top_cuisines(records: &[&Record], n: usize) -> Vec<String> {
    cuisine_frequency(records)
        .into_iter()
        .take(n)
        .map(|(name, _)| name)
        .collect()
}

/// One half-open price band `(lo, hi]`
#[derive(Debug, Clone, Serialize)]
pub struct PriceBand {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

/// Price distribution over consecutive bands built from sorted bin edges
///
/// Returns the bands plus the number of records excluded for having no
/// price. Prices outside the outermost edges fall into no band.
pub fn price_distribution(records: &[&Record], edges: &[f64]) -> (Vec<PriceBand>, usize) {
    let mut bands: Vec<PriceBand> = edges
        .windows(2)
        .map(|pair| PriceBand {
            lo: pair[0],
            hi: pair[1],
            count: 0,
        })
        .collect();

    let mut unpriced = 0;
    for record in records {
        match record.price_for_two {
            None => unpriced += 1,
            Some(price) => {
                if let Some(band) = bands.iter_mut().find(|b| price > b.lo && price <= b.hi) {
                    band.count += 1;
                }
            }
        }
    }

    (bands, unpriced)
}

/// The `n` best (or worst, with `ascending`) records by the selected rating
///
/// Unrated records are excluded; ties break by record id for determinism.
pub fn top_by_rating<'a>(
    records: &[&'a Record],
    kind: RatingKind,
    n: usize,
    ascending: bool,
) -> Vec<&'a Record> {
    let mut rated: Vec<&Record> = records
        .iter()
        .copied()
        .filter(|record| record.rating(kind).is_some())
        .collect();

    rated.sort_by(|a, b| {
        let by_rating = a
            .rating(kind)
            .partial_cmp(&b.rating(kind))
            .unwrap_or(Ordering::Equal);
        let by_rating = if ascending { by_rating } else { by_rating.reverse() };
        by_rating.then_with(|| a.id.cmp(&b.id))
    });
    rated.truncate(n);
    rated
}

/// The `n` records with the most reviews, a proxy for demand
pub fn top_by_rating_count<'a>(records: &[&'a Record], n: usize) -> Vec<&'a Record> {
    let mut reviewed: Vec<&Record> = records
        .iter()
        .copied()
        .filter(|record| record.rating_count.is_some())
        .collect();

    reviewed.sort_by(|a, b| {
        b.rating_count
            .cmp(&a.rating_count)
            .then_with(|| a.id.cmp(&b.id))
    });
    reviewed.truncate(n);
    reviewed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawRecord;
    use crate::store::RecordStore;

    fn row(name: &str, cuisine: &str) -> RawRecord {
        RawRecord {
            name: Some(name.to_string()),
            latitude: Some(13.08),
            longitude: Some(80.27),
            cuisine: Some(cuisine.to_string()),
            ..RawRecord::default()
        }
    }

    #[test]
    fn ranking_counts_tokens_and_breaks_ties_by_name() {
        let store = RecordStore::load(vec![
            row("a", "Chinese, Cafe"),
            row("b", "Chinese"),
            row("c", "Bakery"),
        ])
        .unwrap();
        let view: Vec<&Record> = store.all().iter().collect();

        let ranked = cuisine_frequency(&view);
        assert_eq!(
            ranked,
            [
                ("Chinese".to_string(), 2),
                ("Bakery".to_string(), 1),
                ("Cafe".to_string(), 1),
            ]
        );
        assert_eq!(top_cuisines(&view, 2), ["Chinese", "Bakery"]);
    }

    #[test]
    fn ranking_is_stable_under_input_permutation() {
        let forward = RecordStore::load(vec![row("a", "Cafe"), row("b", "Bakery")]).unwrap();
        let reversed = RecordStore::load(vec![row("b", "Bakery"), row("a", "Cafe")]).unwrap();

        let fwd: Vec<&Record> = forward.all().iter().collect();
        let rev: Vec<&Record> = reversed.all().iter().collect();
        assert_eq!(cuisine_frequency(&fwd), cuisine_frequency(&rev));
    }

    #[test]
    fn price_bands_are_half_open_and_skip_unpriced() {
        let mut a = row("a", "");
        a.price_for_two = Some(500.0);
        let mut b = row("b", "");
        b.price_for_two = Some(501.0);
        let c = row("c", "");

        let store = RecordStore::load(vec![a, b, c]).unwrap();
        let view: Vec<&Record> = store.all().iter().collect();

        let (bands, unpriced) = price_distribution(&view, &[0.0, 500.0, 1000.0]);
        assert_eq!(unpriced, 1);
        assert_eq!(bands[0].count, 1); // 500 lands in (0, 500]
        assert_eq!(bands[1].count, 1); // 501 lands in (500, 1000]
    }

    #[test]
    fn rating_lists_exclude_unrated_and_respect_direction() {
        let mut a = row("a", "");
        a.dining_rating = Some(4.5);
        let mut b = row("b", "");
        b.dining_rating = Some(2.0);
        let c = row("c", "");

        let store = RecordStore::load(vec![a, b, c]).unwrap();
        let view: Vec<&Record> = store.all().iter().collect();

        let best = top_by_rating(&view, RatingKind::Dining, 5, false);
        let worst = top_by_rating(&view, RatingKind::Dining, 5, true);
        assert_eq!(best.len(), 2);
        assert_eq!(best[0].name, "a");
        assert_eq!(worst[0].name, "b");
    }

    #[test]
    fn delivery_lists_rank_by_delivery_and_drop_dine_in_only_records() {
        let mut a = row("a", "");
        a.dining_rating = Some(4.8);
        a.delivery_rating = Some(3.0);
        let mut b = row("b", "");
        b.dining_rating = Some(2.0);
        b.delivery_rating = Some(4.6);
        let mut c = row("c", "");
        c.dining_rating = Some(4.9);

        let store = RecordStore::load(vec![a, b, c]).unwrap();
        let view: Vec<&Record> = store.all().iter().collect();

        let best = top_by_rating(&view, RatingKind::Delivery, 5, false);
        assert_eq!(best.len(), 2);
        assert_eq!(best[0].name, "b");
        assert_eq!(best[1].name, "a");
    }
}
