//! Route chains: ordered load sequences joined by deadhead legs.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use super::error::DomainError;
use super::load::Load;

/// One load in a chain, together with the empty miles driven to reach its
/// pickup point (from the true origin for the first link, from the previous
/// load's delivery point otherwise).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainLink {
    pub load: Arc<Load>,
    pub deadhead_before_miles: f64,
}

/// An ordered sequence of loads connecting an origin to a destination.
///
/// Construction enforces the chain invariants: at least one load, no load id
/// repeated, and every deadhead leg a non-negative finite distance. Totals
/// are derived once at construction so ranking never recomputes them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteChain {
    links: Vec<ChainLink>,

    /// Empty miles from the last delivery point to the true destination.
    final_deadhead_miles: f64,

    total_deadhead_miles: f64,
    total_distance_miles: f64,
    total_revenue: f64,
}

impl RouteChain {
    /// Build a chain from its links and the final deadhead leg.
    pub fn new(links: Vec<ChainLink>, final_deadhead_miles: f64) -> Result<Self, DomainError> {
        if links.is_empty() {
            return Err(DomainError::EmptyChain);
        }

        let mut seen = HashSet::new();
        for link in &links {
            if !seen.insert(link.load.id.clone()) {
                return Err(DomainError::DuplicateLoad(link.load.id.clone()));
            }
            if !link.deadhead_before_miles.is_finite() || link.deadhead_before_miles < 0.0 {
                return Err(DomainError::InvalidDeadhead(link.deadhead_before_miles));
            }
        }
        if !final_deadhead_miles.is_finite() || final_deadhead_miles < 0.0 {
            return Err(DomainError::InvalidDeadhead(final_deadhead_miles));
        }

        let total_deadhead_miles = links
            .iter()
            .map(|l| l.deadhead_before_miles)
            .sum::<f64>()
            + final_deadhead_miles;
        let total_distance_miles = links.iter().map(|l| l.load.shipment_miles()).sum();
        let total_revenue = links.iter().map(|l| l.load.revenue_amount()).sum();

        Ok(Self {
            links,
            final_deadhead_miles,
            total_deadhead_miles,
            total_distance_miles,
            total_revenue,
        })
    }

    pub fn links(&self) -> &[ChainLink] {
        &self.links
    }

    /// Number of loads in the chain, always at least one.
    pub fn load_count(&self) -> usize {
        self.links.len()
    }

    /// Empty miles from the true origin to the first pickup point.
    pub fn origin_deadhead_miles(&self) -> f64 {
        self.links[0].deadhead_before_miles
    }

    /// Empty miles from the last delivery point to the true destination.
    pub fn final_deadhead_miles(&self) -> f64 {
        self.final_deadhead_miles
    }

    /// All empty miles: origin leg, inter-load legs, and the final leg.
    pub fn total_deadhead_miles(&self) -> f64 {
        self.total_deadhead_miles
    }

    /// Sum of the shipment distances of the chained loads.
    pub fn total_distance_miles(&self) -> f64 {
        self.total_distance_miles
    }

    /// Sum of the posted revenue of the chained loads.
    pub fn total_revenue(&self) -> f64 {
        self.total_revenue
    }

    /// The chain's load ids, in haul order.
    pub fn load_ids(&self) -> impl Iterator<Item = &str> {
        self.links.iter().map(|l| l.load.id.as_str())
    }
}
