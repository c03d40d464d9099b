//! Error types for the platemap core

use thiserror::Error;

/// Fatal dataset load failure. Individual bad rows are skipped and counted
/// in the [`crate::store::LoadReport`]; these variants mean the dataset as a
/// whole is unusable.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("dataset contains no rows")]
    EmptyDataset,

    #[error("no usable rows: all {total} rows failed validation")]
    NoValidRows { total: usize },
}

/// Invalid per-request query parameter. Fails that single request; the
/// store and other in-flight requests are unaffected.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("origin out of bounds: latitude {lat}, longitude {lon}")]
    OriginOutOfBounds { lat: f64, lon: f64 },

    #[error("radius must be finite, got {radius_m}")]
    InvalidRadius { radius_m: f64 },

    #[error("cell size must be positive and finite, got {cell_size_deg}")]
    InvalidCellSize { cell_size_deg: f64 },
}
