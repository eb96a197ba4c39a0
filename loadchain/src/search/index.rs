//! Origin-proximity index over the request's load set.
//!
//! Built once per request and never mutated. Loads are bucketed into a
//! coarse latitude/longitude grid so a radius query only inspects the cells
//! a bounding box around the query point can touch, then verifies each
//! candidate with the exact great-circle distance. For small load sets this
//! degrades to a scan of a handful of buckets, which is fine: correctness,
//! not asymptotics, is the contract here.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{GeoPoint, Load, distance_miles};

/// Grid cell edge length in degrees.
const CELL_DEGREES: f64 = 1.0;

/// Miles per degree of latitude (and of longitude at the equator).
const MILES_PER_DEGREE: f64 = 69.0;

/// A load whose pickup point fell inside a radius query, with the exact
/// distance from the query point.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Position of the load in the index.
    pub index: usize,
    pub distance_miles: f64,
}

/// Index of loads keyed by pickup-point grid cell.
#[derive(Debug)]
pub struct LoadIndex {
    loads: Vec<Arc<Load>>,
    cells: HashMap<(i32, i32), Vec<usize>>,
}

impl LoadIndex {
    /// Build the index from the request's load array.
    pub fn build(loads: Vec<Load>) -> Self {
        let loads: Vec<Arc<Load>> = loads.into_iter().map(Arc::new).collect();

        let mut cells: HashMap<(i32, i32), Vec<usize>> = HashMap::new();
        for (idx, load) in loads.iter().enumerate() {
            cells
                .entry(cell_of(&load.origin))
                .or_default()
                .push(idx);
        }

        Self { loads, cells }
    }

    pub fn len(&self) -> usize {
        self.loads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }

    pub fn load(&self, index: usize) -> &Arc<Load> {
        &self.loads[index]
    }

    /// Loads whose pickup point lies within `radius_miles` of `point`,
    /// sorted by ascending distance with load-id tie-breaks.
    ///
    /// The ordering is part of the search contract: candidates are explored
    /// nearest-first, which decides which chains are found when the global
    /// route cap stops the search early.
    pub fn loads_within(&self, point: &GeoPoint, radius_miles: f64) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        let lat_span = radius_miles / MILES_PER_DEGREE;
        // Longitude degrees shrink with latitude; the cosine floor keeps the
        // span finite near the poles. No antimeridian wrap: the board's
        // lanes are continental.
        let lon_scale = point.latitude.to_radians().cos().abs().max(0.05);
        let lon_span = radius_miles / (MILES_PER_DEGREE * lon_scale);

        let lat_cells = cell_range(point.latitude, lat_span);
        let lon_cells = cell_range(point.longitude, lon_span);

        for lat_cell in lat_cells.clone() {
            for lon_cell in lon_cells.clone() {
                let Some(bucket) = self.cells.get(&(lat_cell, lon_cell)) else {
                    continue;
                };
                for &idx in bucket {
                    let d = distance_miles(point, &self.loads[idx].origin);
                    if d <= radius_miles {
                        candidates.push(Candidate {
                            index: idx,
                            distance_miles: d,
                        });
                    }
                }
            }
        }

        candidates.sort_by(|a, b| {
            a.distance_miles
                .total_cmp(&b.distance_miles)
                .then_with(|| self.loads[a.index].id.cmp(&self.loads[b.index].id))
        });
        candidates
    }
}

fn cell_of(point: &GeoPoint) -> (i32, i32) {
    (
        (point.latitude / CELL_DEGREES).floor() as i32,
        (point.longitude / CELL_DEGREES).floor() as i32,
    )
}

fn cell_range(center: f64, span: f64) -> std::ops::RangeInclusive<i32> {
    let lo = ((center - span) / CELL_DEGREES).floor() as i32;
    let hi = ((center + span) / CELL_DEGREES).floor() as i32;
    lo..=hi
}
