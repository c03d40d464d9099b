//! Grid aggregation into fixed-size lat/lon cells

use std::collections::BTreeMap;

use crate::error::QueryError;
use crate::models::{CellKey, GridCell, RatingKind, Record};

/// Smallest accepted cell size in degrees
///
/// Below this the `i32` bucket range cannot span the full longitude extent,
/// so distant coordinates would silently collapse into the saturated edge
/// bucket. About a centimeter at the equator.
pub const MIN_CELL_SIZE_DEG: f64 = 1e-7;

/// Bucket a record view into fixed-size cells and compute per-cell
/// aggregates (count, rating sum, cuisine union) over the dine-in rating
///
/// Records with an absent rating contribute to the count and the cuisine
/// union but not to the mean. The `BTreeMap` output iterates in numerically
/// sorted key order regardless of input order, so repeated calls on the same
/// data produce identical sequences.
pub fn aggregate<'a>(
    records: &[&'a Record],
    cell_size_deg: f64,
) -> Result<BTreeMap<CellKey, GridCell<'a>>, QueryError> {
    aggregate_by(records, cell_size_deg, RatingKind::Dining)
}

/// [`aggregate`] with an explicit choice of rating column for the cell means
pub fn aggregate_by<'a>(
    records: &[&'a Record],
    cell_size_deg: f64,
    rating_kind: RatingKind,
) -> Result<BTreeMap<CellKey, GridCell<'a>>, QueryError> {
    if !cell_size_deg.is_finite() || cell_size_deg < MIN_CELL_SIZE_DEG {
        return Err(QueryError::InvalidCellSize { cell_size_deg });
    }

    let mut cells: BTreeMap<CellKey, GridCell> = BTreeMap::new();
    for record in records {
        let key = CellKey::for_coordinate(record.coordinate, cell_size_deg);
        cells
            .entry(key)
            .or_insert_with(|| GridCell::new(key))
            .push(record, rating_kind);
    }

    Ok(cells)
}
