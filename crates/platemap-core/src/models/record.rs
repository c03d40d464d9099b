use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Stable identifier for a business record (row ordinal or external key)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub u64);

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// WGS 84 coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, [-90, 90]
    pub lat: f64,

    /// Longitude in degrees, [-180, 180]
    pub lon: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting non-finite or out-of-bounds values
    pub fn validated(lat: f64, lon: f64) -> Option<Self> {
        let coord = Self { lat, lon };
        coord.is_in_bounds().then_some(coord)
    }

    /// Check that both components are finite and within coordinate bounds
    pub fn is_in_bounds(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Which of the two rating columns an analysis reads
///
/// Dine-in is the default everywhere; delivery views additionally drop
/// records without a delivery rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingKind {
    Dining,
    Delivery,
}

/// One validated business record
///
/// Optional numerics stay absent when the source lacks them; absence is
/// never coerced to zero or a default tier downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier
    pub id: RecordId,

    /// Display name
    pub name: String,

    /// Validated location
    pub coordinate: Coordinate,

    /// Parsed cuisine tokens (the source joins them with commas)
    pub cuisines: BTreeSet<String>,

    /// Parsed feature tokens
    pub features: BTreeSet<String>,

    /// Price for a two-person meal, absent when unknown
    pub price_for_two: Option<f64>,

    /// Dine-in rating
    pub dining_rating: Option<f64>,

    /// Delivery rating
    pub delivery_rating: Option<f64>,

    /// Number of dine-in reviews
    pub rating_count: Option<u64>,
}

impl Record {
    /// The selected rating column
    pub fn rating(&self, kind: RatingKind) -> Option<f64> {
        match kind {
            RatingKind::Dining => self.dining_rating,
            RatingKind::Delivery => self.delivery_rating,
        }
    }
}

/// Untyped input row as supplied by the ingestion layer
///
/// Every field is optional; [`crate::store::RecordStore::load`] decides which
/// absences reject the row and which become absent values on the record.
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    /// External key; row ordinal is used when absent
    pub id: Option<u64>,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Comma-joined cuisine list
    pub cuisine: Option<String>,
    /// Comma-joined feature list
    pub features: Option<String>,
    pub price_for_two: Option<f64>,
    pub dining_rating: Option<f64>,
    pub delivery_rating: Option<f64>,
    pub rating_count: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_bounds() {
        assert!(Coordinate::validated(13.08, 80.27).is_some());
        assert!(Coordinate::validated(-90.0, 180.0).is_some());
        assert!(Coordinate::validated(90.01, 0.0).is_none());
        assert!(Coordinate::validated(0.0, -180.01).is_none());
        assert!(Coordinate::validated(f64::NAN, 0.0).is_none());
        assert!(Coordinate::validated(0.0, f64::INFINITY).is_none());
    }
}
