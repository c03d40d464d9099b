use serde::Serialize;

use super::cell::CellKey;
use super::record::Coordinate;

/// Underserved-cell report
///
/// Owned (no borrows into the grid) so the caller can render it after the
/// cells from the aggregation pass are dropped.
#[derive(Debug, Clone, Serialize)]
pub struct GapReport {
    pub cell: CellKey,

    /// Cell center, for placing a marker
    pub centroid: Coordinate,

    /// Number of records in the cell
    pub count: usize,

    /// Mean dining rating over the cell's rated members
    pub mean_rating: f64,

    /// Citywide top cuisines absent from this cell, in rank order
    pub missing_cuisines: Vec<String>,
}
