//! Prompt construction for the trip-plan generation service.

use std::fmt::Write;

use crate::domain::{GeoPoint, RouteChain, TimeWindow};
use crate::search::SearchCriteria;

fn place_name(point: &GeoPoint) -> String {
    match (&point.city, &point.state) {
        (Some(city), Some(state)) => format!("{city}, {state}"),
        (Some(city), None) => city.clone(),
        _ => format!("({:.4}, {:.4})", point.latitude, point.longitude),
    }
}

fn window_text(window: Option<&TimeWindow>) -> String {
    match window {
        Some(w) => format!(
            "{} to {}",
            w.earliest.format("%Y-%m-%d %H:%M"),
            w.latest.format("%Y-%m-%d %H:%M")
        ),
        None => "N/A".to_string(),
    }
}

/// Render one ranked chain as a planning prompt.
///
/// The output asks for a day-by-day itinerary with fuel and rest stops;
/// [`super::TripPlan::from_text`] parses the expected reply shape back out.
pub fn build_prompt(chain: &RouteChain, chain_rank: usize, criteria: &SearchCriteria) -> String {
    let mut info = String::new();

    let _ = writeln!(info, "Route option: {chain_rank}");
    let _ = writeln!(
        info,
        "Total distance: {:.0} miles",
        chain.total_distance_miles()
    );
    let _ = writeln!(info, "Total revenue: ${:.2}", chain.total_revenue());
    let _ = writeln!(
        info,
        "Total deadhead: {:.0} miles",
        chain.total_deadhead_miles()
    );
    let _ = writeln!(info, "Number of segments: {}", chain.load_count());
    let _ = writeln!(info);
    let _ = writeln!(info, "Origin: {}", place_name(&criteria.origin));
    let _ = writeln!(info, "Destination: {}", place_name(&criteria.destination));
    let _ = writeln!(info);
    let _ = writeln!(info, "Route segments:");

    for (i, link) in chain.links().iter().enumerate() {
        let load = &link.load;
        let _ = writeln!(info);
        let _ = writeln!(info, "Segment {}:", i + 1);
        let _ = writeln!(info, "  - From: {}", place_name(&load.origin));
        let _ = writeln!(info, "  - To: {}", place_name(&load.destination));
        let _ = writeln!(info, "  - Distance: {:.0} miles", load.shipment_miles());
        let _ = writeln!(info, "  - Revenue: ${:.2}", load.revenue_amount());
        let _ = writeln!(
            info,
            "  - Deadhead before segment: {:.1} miles",
            link.deadhead_before_miles
        );
        let _ = writeln!(
            info,
            "  - Pickup window: {}",
            window_text(load.pickup_window.as_ref())
        );
        let _ = writeln!(
            info,
            "  - Delivery window: {}",
            window_text(load.delivery_window.as_ref())
        );
        let _ = writeln!(
            info,
            "  - Weight: {} lbs",
            load.weight_pounds
                .map(|w| format!("{w:.0}"))
                .unwrap_or_else(|| "N/A".to_string())
        );
    }

    format!(
        "You are a professional trucking route planner. Analyze the following \
route and provide a detailed trip plan.\n\n{info}\n\
Please provide a comprehensive trip plan that includes:\n\
1. A brief summary of the route (2-3 sentences)\n\
2. Detailed day-by-day itinerary with estimated travel times\n\
3. Recommended fuel stops along the route\n\
4. Recommended rest stops (considering DOT hours of service regulations)\n\
5. Potential issues or challenges (weather, traffic, road conditions)\n\
6. Tips for optimizing this route\n\
7. Estimated total driving time and rest time needed\n\n\
Format your response as a structured trip plan that a truck driver can \
follow. Be specific about locations, timing, and recommendations."
    )
}
