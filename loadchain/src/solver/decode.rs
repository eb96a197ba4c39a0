//! Decoding solver stop sequences back into load rides.

use crate::domain::LoadId;

use super::problem::VrptwProblem;
use super::types::SolvedStop;

/// One load hauled on a solved route, with the solver's timing.
#[derive(Debug, Clone, PartialEq)]
pub struct RideSegment {
    pub load_id: LoadId,
    pub pickup_node: usize,
    pub delivery_node: usize,
    pub pickup_time_minutes: i64,
    pub delivery_time_minutes: i64,
}

/// Walk a solved stop sequence and pair each pickup with its delivery.
///
/// Stops that are not pickup nodes (the depot, or deliveries handled via
/// their pickup) are skipped. A pickup whose delivery never appears in the
/// sequence is dropped rather than reported half-ridden.
pub fn ride_segments(problem: &VrptwProblem, stops: &[SolvedStop]) -> Vec<RideSegment> {
    let mut segments = Vec::new();

    for stop in stops {
        let Some(delivery_node) = problem.delivery_for_pickup(stop.node_index) else {
            continue;
        };
        let Some(load_id) = problem.load_for_pair(stop.node_index, delivery_node) else {
            continue;
        };
        let Some(delivery_stop) = stops.iter().find(|s| s.node_index == delivery_node) else {
            continue;
        };

        segments.push(RideSegment {
            load_id: load_id.clone(),
            pickup_node: stop.node_index,
            delivery_node,
            pickup_time_minutes: stop.arrival_time_minutes,
            delivery_time_minutes: delivery_stop.arrival_time_minutes,
        });
    }

    segments
}
