//! Building a solver problem from an origin and a load set.
//!
//! Collects the unique locations (depot first), estimates a travel-time
//! matrix, and derives demands and per-node service windows from the loads.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::domain::{GeoPoint, Load, LoadId, distance_miles};

use super::types::SolveRequest;

/// Assumed average speed when no per-load duration is available.
const AVERAGE_SPEED_MPH: f64 = 50.0;

/// Default single-truck capacity in pounds.
const VEHICLE_CAPACITY_POUNDS: i64 = 45_000;

/// Planning horizon: how far out a route may run, in minutes.
const PLANNING_HORIZON_MINUTES: i64 = 1440 * 20;

/// Slack added in front of a node's earliest window.
const WINDOW_EARLY_SLACK_MINUTES: i64 = 60;

/// Slack added after a node's latest window.
const WINDOW_LATE_SLACK_MINUTES: i64 = 1440;

/// A solver problem plus the bookkeeping needed to read its answer back.
#[derive(Debug, Clone)]
pub struct VrptwProblem {
    pub request: SolveRequest,

    /// Node locations, depot at index 0.
    locations: Vec<GeoPoint>,

    /// Which load each `(pickup_node, delivery_node)` pair belongs to.
    pair_loads: HashMap<(usize, usize), LoadId>,

    /// Delivery node for each pickup node, in load insertion order; when
    /// loads share a pickup node the later load wins, so decoding is
    /// reproducible run to run.
    delivery_of: HashMap<usize, usize>,
}

impl VrptwProblem {
    pub fn locations(&self) -> &[GeoPoint] {
        &self.locations
    }

    /// The load hauled between a pickup node and a delivery node.
    pub fn load_for_pair(&self, pickup: usize, delivery: usize) -> Option<&LoadId> {
        self.pair_loads.get(&(pickup, delivery))
    }

    /// The delivery node paired with a pickup node.
    pub fn delivery_for_pickup(&self, pickup: usize) -> Option<usize> {
        self.delivery_of.get(&pickup).copied()
    }
}

/// Estimated drive time in minutes at highway speed.
fn estimated_minutes(miles: f64) -> i64 {
    ((miles / AVERAGE_SPEED_MPH) * 60.0) as i64
}

/// Minutes from the reference time to `t`, clamped at zero.
fn minutes_from(reference: DateTime<Utc>, t: DateTime<Utc>) -> i64 {
    (t - reference).num_minutes().max(0)
}

/// Build a single-vehicle problem with the depot at the search origin.
///
/// Node time windows are the union of every load window touching the node,
/// padded with an hour of early slack and a day of late slack; nodes with
/// no windowed load get the whole planning horizon. Travel times use each
/// load's own duration estimate for its pickup-to-delivery edge and a
/// highway-speed estimate everywhere else.
pub fn build_problem(
    origin: &GeoPoint,
    loads: &[Load],
    reference: DateTime<Utc>,
) -> VrptwProblem {
    let mut locations: Vec<GeoPoint> = vec![origin.clone()];
    let mut node_of: HashMap<(u64, u64), usize> = HashMap::new();
    node_of.insert(coordinate_key(origin), 0);

    let mut intern = |point: &GeoPoint, locations: &mut Vec<GeoPoint>| -> usize {
        let key = coordinate_key(point);
        if let Some(&idx) = node_of.get(&key) {
            return idx;
        }
        let idx = locations.len();
        locations.push(point.clone());
        node_of.insert(key, idx);
        idx
    };

    let mut pickups_deliveries = Vec::with_capacity(loads.len());
    let mut pair_loads = HashMap::new();
    let mut delivery_of = HashMap::new();
    let mut pair_minutes: HashMap<(usize, usize), i64> = HashMap::new();

    for load in loads {
        let pickup = intern(&load.origin, &mut locations);
        let delivery = intern(&load.destination, &mut locations);

        pickups_deliveries.push([pickup, delivery]);
        pair_loads.insert((pickup, delivery), load.id.clone());
        delivery_of.insert(pickup, delivery);

        if let Some(minutes) = load.estimated_duration_minutes.filter(|&m| m > 0) {
            pair_minutes.insert((pickup, delivery), minutes);
        }
    }

    let n = locations.len();

    let mut time_matrix = vec![vec![0i64; n]; n];
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            time_matrix[i][j] = pair_minutes.get(&(i, j)).copied().unwrap_or_else(|| {
                estimated_minutes(distance_miles(&locations[i], &locations[j]))
            });
        }
    }

    let mut demands = vec![0i64; n];
    for (load, pair) in loads.iter().zip(&pickups_deliveries) {
        let weight = load.weight_pounds.unwrap_or(0.0) as i64;
        demands[pair[0]] += weight;
        demands[pair[1]] -= weight;
    }

    let mut time_windows = Vec::with_capacity(n);
    for node in 0..n {
        if node == 0 {
            time_windows.push([0, PLANNING_HORIZON_MINUTES]);
            continue;
        }

        let mut earliest: Option<i64> = None;
        let mut latest: Option<i64> = None;
        for (load, pair) in loads.iter().zip(&pickups_deliveries) {
            let window = if pair[0] == node {
                load.pickup_window
            } else if pair[1] == node {
                load.delivery_window
            } else {
                None
            };
            if let Some(window) = window {
                let from = minutes_from(reference, window.earliest);
                let to = minutes_from(reference, window.latest);
                earliest = Some(earliest.map_or(from, |e| e.min(from)));
                latest = Some(latest.map_or(to, |l| l.max(to)));
            }
        }

        match (earliest, latest) {
            (Some(earliest), Some(latest)) => time_windows.push([
                (earliest - WINDOW_EARLY_SLACK_MINUTES).max(0),
                latest + WINDOW_LATE_SLACK_MINUTES,
            ]),
            _ => time_windows.push([0, PLANNING_HORIZON_MINUTES]),
        }
    }

    VrptwProblem {
        request: SolveRequest {
            time_matrix,
            pickups_deliveries,
            demands,
            time_windows,
            num_vehicles: 1,
            vehicle_capacity: VEHICLE_CAPACITY_POUNDS,
            max_route_time: PLANNING_HORIZON_MINUTES,
            depot_index: 0,
        },
        locations,
        pair_loads,
        delivery_of,
    }
}

/// Bit-exact coordinate key for location interning.
fn coordinate_key(point: &GeoPoint) -> (u64, u64) {
    (point.latitude.to_bits(), point.longitude.to_bits())
}
