//! Platemap Core - Geospatial aggregation over city-scale business records
//!
//! This crate contains the analysis core: radius queries, grid density
//! aggregation, market-gap detection, ordinal classification, and attribute
//! filtering. It performs no I/O; a presentation layer supplies rows and
//! request parameters and renders the plain data structures returned here.

pub mod classify;
pub mod distance;
pub mod error;
pub mod filter;
pub mod gaps;
pub mod grid;
pub mod models;
pub mod stats;
pub mod store;

pub use error::{LoadError, QueryError};
pub use store::{LoadReport, RecordStore};
