pub mod cell;
pub mod gap;
pub mod record;

pub use cell::{CellKey, GridCell};
pub use gap::GapReport;
pub use record::{Coordinate, RatingKind, RawRecord, Record, RecordId};
