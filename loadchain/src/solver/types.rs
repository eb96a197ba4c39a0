//! Wire types for the hosted VRPTW solver.
//!
//! The solver consumes a node-indexed problem description and returns
//! per-vehicle stop sequences. Field names match the solver's JSON API.

use serde::{Deserialize, Serialize};

/// A VRPTW problem description, ready to post to the solver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveRequest {
    /// Travel time in minutes between every pair of nodes.
    pub time_matrix: Vec<Vec<i64>>,

    /// `[pickup_node, delivery_node]` index pairs, one per load.
    pub pickups_deliveries: Vec<[usize; 2]>,

    /// Load change at each node: positive at pickups, negative at
    /// deliveries, zero at the depot.
    pub demands: Vec<i64>,

    /// `[earliest, latest]` service window per node, in minutes from the
    /// reference time.
    pub time_windows: Vec<[i64; 2]>,

    pub num_vehicles: usize,

    /// Maximum weight on a vehicle, in pounds.
    pub vehicle_capacity: i64,

    /// Maximum minutes for a single route.
    pub max_route_time: i64,

    pub depot_index: usize,
}

/// One stop on a solved route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolvedStop {
    pub node_index: usize,
    pub arrival_time_minutes: i64,
    pub load_on_vehicle: i64,
}

/// A solved route for one vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolvedRoute {
    pub vehicle_id: usize,
    pub total_route_time_minutes: i64,
    pub stops: Vec<SolvedStop>,
}

/// An alternative single-vehicle route the solver found with a different
/// strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteAlternative {
    pub option_id: usize,
    pub total_route_time_minutes: i64,
    pub stops: Vec<SolvedStop>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The solver's full reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveResponse {
    pub routes: Vec<SolvedRoute>,

    #[serde(default)]
    pub route_options: Vec<RouteAlternative>,

    pub solution_found: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default)]
    pub num_options_found: usize,
}
