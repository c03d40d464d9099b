//! Great-circle distance and radius queries
//!
//! An R-tree over record points narrows each query to a degree bounding box;
//! the haversine check against the exact radius is authoritative. The index
//! is built per store (or per filtered view) and holds read-only
//! back-references, so it is as ephemeral as the view it wraps.

use std::cmp::Ordering;

use geo::{Distance, Haversine, Point};
use rstar::{RTree, RTreeObject, AABB};

use crate::error::QueryError;
use crate::models::{Coordinate, Record};
use crate::store::RecordStore;

/// Earth mean radius in meters, the sphere `geo`'s haversine uses
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Great-circle distance between two coordinates in meters
///
/// The single distance definition for the crate; radius queries and any
/// future spatial prefilter must agree with it.
pub fn great_circle_distance(a: Coordinate, b: Coordinate) -> f64 {
    Haversine.distance(Point::new(a.lon, a.lat), Point::new(b.lon, b.lat))
}

/// Point entry in the spatial index
#[derive(Debug, Clone, PartialEq)]
struct IndexedPoint {
    /// Position in the indexed view
    slot: usize,

    /// (lon, lat), matching the axis order of the envelope
    position: [f64; 2],
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

/// Radius-query index over a record view
pub struct DistanceIndex<'a> {
    records: Vec<&'a Record>,
    tree: RTree<IndexedPoint>,
}

impl<'a> DistanceIndex<'a> {
    /// Build an index over an arbitrary record view
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let records: Vec<&Record> = records.into_iter().collect();
        let points = records
            .iter()
            .enumerate()
            .map(|(slot, record)| IndexedPoint {
                slot,
                position: [record.coordinate.lon, record.coordinate.lat],
            })
            .collect();

        Self {
            records,
            tree: RTree::bulk_load(points),
        }
    }

    /// Build an index over every record in a store
    pub fn for_store(store: &'a RecordStore) -> Self {
        Self::build(store.all())
    }

    /// Records within `radius_m` meters of `origin`, sorted ascending by
    /// distance, ties broken by record id
    ///
    /// A negative radius yields an empty result, and a zero radius matches
    /// only records exactly at the origin. A non-finite radius or an
    /// out-of-bounds origin is a [`QueryError`]. Callers own any default
    /// radius; none is assumed here.
    pub fn within_radius(
        &self,
        origin: Coordinate,
        radius_m: f64,
    ) -> Result<Vec<(&'a Record, f64)>, QueryError> {
        if !radius_m.is_finite() {
            return Err(QueryError::InvalidRadius { radius_m });
        }
        if !origin.is_in_bounds() {
            return Err(QueryError::OriginOutOfBounds {
                lat: origin.lat,
                lon: origin.lon,
            });
        }
        if radius_m < 0.0 {
            return Ok(Vec::new());
        }

        // Degree padding that certainly covers radius_m. Longitude widens
        // with latitude; no antimeridian wrap handling, the datasets here
        // are city-scale.
        let lat_pad = (radius_m / EARTH_RADIUS_M).to_degrees();
        let cos_lat = origin.lat.to_radians().cos().abs().max(1e-6);
        let lon_pad = (lat_pad / cos_lat).min(360.0);

        let bbox = AABB::from_corners(
            [origin.lon - lon_pad, origin.lat - lat_pad],
            [origin.lon + lon_pad, origin.lat + lat_pad],
        );
        let mut hits: Vec<(&Record, f64)> = self
            .tree
            .locate_in_envelope(&bbox)
            .filter_map(|entry| {
                let record = self.records[entry.slot];
                let distance = great_circle_distance(origin, record.coordinate);
                (distance <= radius_m).then_some((record, distance))
            })
            .collect();

        hits.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.id.cmp(&b.0.id))
        });

        Ok(hits)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RawRecord, RecordId};
    use proptest::prelude::*;

    fn store_of(coords: &[(f64, f64)]) -> RecordStore {
        let rows = coords
            .iter()
            .enumerate()
            .map(|(i, (lat, lon))| RawRecord {
                name: Some(format!("r{i}")),
                latitude: Some(*lat),
                longitude: Some(*lon),
                ..RawRecord::default()
            })
            .collect();
        RecordStore::load(rows).unwrap()
    }

    #[test]
    fn results_sorted_by_distance_then_id() {
        // Two records at the same spot (an exact distance tie) and a nearer third
        let store = store_of(&[(13.00, 80.01), (13.00, 80.01), (13.00, 80.001)]);
        let index = DistanceIndex::for_store(&store);

        let hits = index
            .within_radius(Coordinate { lat: 13.00, lon: 80.00 }, 5_000.0)
            .unwrap();

        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].0.id, RecordId(2));
        // Tied pair ordered by id
        assert_eq!(hits[1].0.id, RecordId(0));
        assert_eq!(hits[2].0.id, RecordId(1));
        assert_eq!(hits[1].1, hits[2].1);
    }

    #[test]
    fn zero_radius_returns_only_coincident_records() {
        let store = store_of(&[(13.08, 80.27), (13.09, 80.28)]);
        let index = DistanceIndex::for_store(&store);

        // Exactly the coincident record at radius zero
        let origin = Coordinate { lat: 13.08, lon: 80.27 };
        let hits = index.within_radius(origin, 0.0).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0.id, RecordId(0));
        assert_eq!(hits[0].1, 0.0);

        // Empty at radius zero anywhere else, and for any negative radius
        let elsewhere = Coordinate { lat: 13.085, lon: 80.275 };
        assert!(index.within_radius(elsewhere, 0.0).unwrap().is_empty());
        assert!(index.within_radius(origin, -10.0).unwrap().is_empty());
    }

    #[test]
    fn haversine_matches_known_distance() {
        // ~1.47 km between the two scenario coordinates
        let store = store_of(&[(13.09, 80.28)]);
        let index = DistanceIndex::for_store(&store);

        let hits = index
            .within_radius(Coordinate { lat: 13.08, lon: 80.27 }, 2_000.0)
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].1 > 1_400.0 && hits[0].1 < 1_600.0, "got {}", hits[0].1);
    }

    #[test]
    fn out_of_bounds_origin_is_a_query_error() {
        let store = store_of(&[(13.08, 80.27)]);
        let index = DistanceIndex::for_store(&store);

        let result = index.within_radius(Coordinate { lat: 91.0, lon: 0.0 }, 100.0);
        assert!(matches!(result, Err(QueryError::OriginOutOfBounds { .. })));

        let result = index.within_radius(Coordinate { lat: 0.0, lon: 0.0 }, f64::NAN);
        assert!(matches!(result, Err(QueryError::InvalidRadius { .. })));
    }

    #[test]
    fn prefilter_never_drops_records_at_the_radius_edge() {
        // Record sits almost exactly radius_m away; the bbox prefilter must
        // keep it so the haversine check decides
        let store = store_of(&[(13.00, 80.00), (13.009, 80.00)]);
        let index = DistanceIndex::for_store(&store);

        let hits = index
            .within_radius(Coordinate { lat: 13.00, lon: 80.00 }, 1_001.0)
            .unwrap();
        assert_eq!(hits.len(), 2);
    }

    proptest! {
        #[test]
        fn within_radius_is_a_sorted_subset(
            origin_lat in 12.9f64..13.2,
            origin_lon in 80.1f64..80.4,
            radius_m in 0.0f64..20_000.0,
        ) {
            let store = store_of(&[
                (13.0827, 80.2707),
                (13.05, 80.25),
                (13.10, 80.30),
                (13.0827, 80.2707),
                (12.95, 80.15),
            ]);
            let index = DistanceIndex::for_store(&store);
            let origin = Coordinate { lat: origin_lat, lon: origin_lon };

            let hits = index.within_radius(origin, radius_m).unwrap();

            for (_, distance) in &hits {
                prop_assert!(*distance <= radius_m);
            }
            for pair in hits.windows(2) {
                prop_assert!(pair[0].1 <= pair[1].1);
                if (pair[0].1 - pair[1].1).abs() < f64::EPSILON {
                    prop_assert!(pair[0].0.id < pair[1].0.id);
                }
            }

            // Determinism: same query, same sequence
            let again = index.within_radius(origin, radius_m).unwrap();
            let ids: Vec<_> = hits.iter().map(|(r, _)| r.id).collect();
            let ids_again: Vec<_> = again.iter().map(|(r, _)| r.id).collect();
            prop_assert_eq!(ids, ids_again);
        }
    }
}
