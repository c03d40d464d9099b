//! Underserved-cell detection
//!
//! A cell is underserved when it holds enough records but their mean rating
//! falls below the threshold. Suggested cuisines compare the cell's coverage
//! against a citywide ranking: the ranking is global, the coverage is local,
//! so the suggestion answers "what's popular citywide but missing here".

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::models::{CellKey, GapReport, GridCell};

/// Flag underserved cells and compute their missing-cuisine suggestions
///
/// `top_cuisines` must come from a ranking over the entire store, not the
/// filtered view the cells were aggregated from (see
/// [`crate::stats::top_cuisines`]). Thresholds are caller-supplied
/// configuration; nothing is defaulted here. `cell_size_deg` must match the
/// aggregation that produced `cells` so report centroids line up.
///
/// Reports are ordered by descending count, then ascending mean rating:
/// busiest, worst-served areas first.
pub fn detect_gaps(
    cells: &BTreeMap<CellKey, GridCell<'_>>,
    cell_size_deg: f64,
    top_cuisines: &[String],
    min_count: u32,
    max_mean_rating: f64,
) -> Vec<GapReport> {
    let mut reports: Vec<GapReport> = cells
        .values()
        .filter_map(|cell| {
            if cell.count() < min_count as usize {
                return None;
            }
            // Cells with no rated members are not classifiable as underserved
            let mean_rating = cell.mean_rating()?;
            if mean_rating >= max_mean_rating {
                return None;
            }

            let missing_cuisines = top_cuisines
                .iter()
                .filter(|cuisine| !cell.present_cuisines().contains(cuisine.as_str()))
                .cloned()
                .collect();

            Some(GapReport {
                cell: cell.key,
                centroid: cell.key.centroid(cell_size_deg),
                count: cell.count(),
                mean_rating,
                missing_cuisines,
            })
        })
        .collect();

    reports.sort_by(|a, b| {
        b.count.cmp(&a.count).then_with(|| {
            a.mean_rating
                .partial_cmp(&b.mean_rating)
                .unwrap_or(Ordering::Equal)
        })
    });

    reports
}
