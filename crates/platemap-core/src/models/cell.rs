use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::record::{Coordinate, RatingKind, Record};

/// Key of a fixed-size latitude/longitude bucket
///
/// Ordering is lat-major so a sorted map of cells iterates south-to-north,
/// west-to-east, independent of record input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellKey {
    pub lat_bucket: i32,
    pub lon_bucket: i32,
}

impl CellKey {
    /// Bucket containing a coordinate at the given cell size
    ///
    /// Floor division, not truncation, so cells tile without gaps across
    /// the equator and prime meridian.
    pub fn for_coordinate(coord: Coordinate, cell_size_deg: f64) -> Self {
        Self {
            lat_bucket: (coord.lat / cell_size_deg).floor() as i32,
            lon_bucket: (coord.lon / cell_size_deg).floor() as i32,
        }
    }

    /// Center coordinate of the cell
    pub fn centroid(&self, cell_size_deg: f64) -> Coordinate {
        Coordinate {
            lat: (f64::from(self.lat_bucket) + 0.5) * cell_size_deg,
            lon: (f64::from(self.lon_bucket) + 0.5) * cell_size_deg,
        }
    }
}

/// One populated grid cell
///
/// Borrows its members from the record view that produced it; cells exist
/// only for the duration of one aggregation or gap-detection call.
#[derive(Debug, Clone)]
pub struct GridCell<'a> {
    pub key: CellKey,
    /// Member records in view order
    pub members: Vec<&'a Record>,
    rating_sum: f64,
    rated_count: usize,
    present_cuisines: BTreeSet<&'a str>,
}

impl<'a> GridCell<'a> {
    pub(crate) fn new(key: CellKey) -> Self {
        Self {
            key,
            members: Vec::new(),
            rating_sum: 0.0,
            rated_count: 0,
            present_cuisines: BTreeSet::new(),
        }
    }

    pub(crate) fn push(&mut self, record: &'a Record, rating_kind: RatingKind) {
        if let Some(rating) = record.rating(rating_kind) {
            self.rating_sum += rating;
            self.rated_count += 1;
        }
        self.present_cuisines.extend(record.cuisines.iter().map(String::as_str));
        self.members.push(record);
    }

    pub fn count(&self) -> usize {
        self.members.len()
    }

    /// Mean rating over rated members, for whichever rating column the
    /// aggregation selected
    ///
    /// `None` when no member carries a rating; callers must check presence
    /// before thresholding.
    pub fn mean_rating(&self) -> Option<f64> {
        (self.rated_count > 0).then(|| self.rating_sum / self.rated_count as f64)
    }

    /// Union of member cuisine sets
    pub fn present_cuisines(&self) -> &BTreeSet<&'a str> {
        &self.present_cuisines
    }
}
