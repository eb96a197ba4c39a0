//! Deadhead relaxation: retry the search with widened bounds.
//!
//! When a search finds nothing at the requested deadhead bounds, the
//! controller widens the bounds by a fixed multiplicative step and re-runs
//! the full search, up to a bounded number of rounds and an absolute
//! ceiling. The response carries the bounds actually used so callers can
//! tell a relaxed answer from one at the requested bounds.

use tracing::debug;

use crate::domain::RouteChain;

use super::config::DeadheadBounds;
use super::search::{ChainSearcher, SearchError};

/// How bounds widen between retry rounds.
///
/// Every knob is an explicit field; nothing about the retry behavior is
/// buried in the algorithm.
#[derive(Debug, Clone, PartialEq)]
pub struct RelaxationPolicy {
    /// Multiplier applied to a bound each round. Must exceed 1. Default 1.5.
    pub step_factor: f64,

    /// Maximum number of widened retries after the initial pass. Default 3.
    pub max_rounds: usize,

    /// Bounds never grow past this many miles. Default 600.
    pub ceiling_miles: f64,

    /// When true (default) both bounds widen together each round; when
    /// false, rounds alternate between widening the origin bound and the
    /// destination bound.
    pub lockstep: bool,
}

impl Default for RelaxationPolicy {
    fn default() -> Self {
        Self {
            step_factor: 1.5,
            max_rounds: 3,
            ceiling_miles: 600.0,
            lockstep: true,
        }
    }
}

impl RelaxationPolicy {
    /// A policy that never widens, for callers that want exactly the
    /// requested bounds or nothing.
    pub fn disabled() -> Self {
        Self {
            max_rounds: 0,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if !self.step_factor.is_finite() || self.step_factor <= 1.0 {
            return Err(SearchError::InvalidRequest(format!(
                "relaxation step factor must exceed 1, got {}",
                self.step_factor
            )));
        }
        if !self.ceiling_miles.is_finite() || self.ceiling_miles < 0.0 {
            return Err(SearchError::InvalidRequest(format!(
                "relaxation ceiling must be a non-negative distance, got {}",
                self.ceiling_miles
            )));
        }
        Ok(())
    }

    /// The bounds for the next round, given the current ones. Returns the
    /// input unchanged only when no bound can grow any further.
    fn widen(&self, bounds: DeadheadBounds, round: usize) -> DeadheadBounds {
        let grow = |miles: f64| (miles * self.step_factor).min(self.ceiling_miles).max(miles);

        if self.lockstep {
            return DeadheadBounds {
                origin_miles: grow(bounds.origin_miles),
                destination_miles: grow(bounds.destination_miles),
            };
        }

        // Alternate which bound a round targets; when the targeted bound is
        // already at the ceiling, widen the other one instead so a maxed
        // bound never stalls the remaining rounds.
        let grown_origin = grow(bounds.origin_miles);
        let grown_destination = grow(bounds.destination_miles);
        let origin_turn = round % 2 == 0;

        if origin_turn && grown_origin > bounds.origin_miles {
            DeadheadBounds {
                origin_miles: grown_origin,
                ..bounds
            }
        } else if grown_destination > bounds.destination_miles {
            DeadheadBounds {
                destination_miles: grown_destination,
                ..bounds
            }
        } else if grown_origin > bounds.origin_miles {
            DeadheadBounds {
                origin_miles: grown_origin,
                ..bounds
            }
        } else {
            bounds
        }
    }
}

/// Outcome of a search run under the relaxation controller.
#[derive(Debug)]
pub struct RelaxedSearch {
    /// Complete chains found, in discovery order (unranked).
    pub chains: Vec<RouteChain>,

    /// The bounds the returned chains were found at.
    pub bounds_used: DeadheadBounds,

    /// True when `bounds_used` differs from the requested bounds.
    pub relaxed: bool,

    /// Widened retries taken (zero when the first pass succeeded).
    pub rounds: usize,

    pub positions_explored: usize,
    pub truncated: bool,
}

/// Retry loop around [`ChainSearcher`].
pub struct RelaxationController<'a> {
    searcher: ChainSearcher<'a>,
    policy: RelaxationPolicy,
}

impl<'a> RelaxationController<'a> {
    pub fn new(searcher: ChainSearcher<'a>, policy: RelaxationPolicy) -> Self {
        Self { searcher, policy }
    }

    /// Search at the requested bounds, widening per policy until a chain is
    /// found, the round budget runs out, or the ceiling blocks growth.
    /// Exhaustion yields an empty result, never an error.
    pub fn run(&self, requested: DeadheadBounds) -> Result<RelaxedSearch, SearchError> {
        self.policy.validate()?;

        let mut bounds = requested;
        let mut rounds = 0;
        let mut explored = 0;

        loop {
            let outcome = self.searcher.search(bounds)?;
            explored += outcome.positions_explored;

            if !outcome.chains.is_empty() || rounds >= self.policy.max_rounds {
                return Ok(RelaxedSearch {
                    chains: outcome.chains,
                    bounds_used: bounds,
                    relaxed: rounds > 0,
                    rounds,
                    positions_explored: explored,
                    truncated: outcome.truncated,
                });
            }

            let widened = self.policy.widen(bounds, rounds);
            if widened == bounds {
                // No bound can grow any further
                return Ok(RelaxedSearch {
                    chains: outcome.chains,
                    bounds_used: bounds,
                    relaxed: rounds > 0,
                    rounds,
                    positions_explored: explored,
                    truncated: outcome.truncated,
                });
            }

            rounds += 1;
            debug!(
                round = rounds,
                origin_miles = widened.origin_miles,
                destination_miles = widened.destination_miles,
                "no chains found, widening deadhead bounds"
            );
            bounds = widened;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GeoPoint, Load, LoadId};
    use crate::search::config::SearchCriteria;
    use crate::search::index::LoadIndex;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    fn load(id: &str, pickup: (f64, f64), delivery: (f64, f64)) -> Load {
        Load::new(
            LoadId::parse(id).unwrap(),
            point(pickup.0, pickup.1),
            point(delivery.0, delivery.1),
        )
    }

    const BOSTON: (f64, f64) = (42.3601, -71.0589);
    const DALLAS: (f64, f64) = (32.7767, -96.7970);

    fn boston_dallas() -> SearchCriteria {
        SearchCriteria::new(point(BOSTON.0, BOSTON.1), point(DALLAS.0, DALLAS.1))
    }

    #[test]
    fn no_relaxation_when_first_pass_finds_chains() {
        let index = LoadIndex::build(vec![load(
            "DIRECT",
            (42.43, -71.0589),
            (32.85, -96.7970),
        )]);
        let criteria = boston_dallas();
        let controller = RelaxationController::new(
            ChainSearcher::new(&index, &criteria),
            RelaxationPolicy::default(),
        );

        let result = controller.run(criteria.options.bounds()).unwrap();
        assert_eq!(result.chains.len(), 1);
        assert!(!result.relaxed);
        assert_eq!(result.rounds, 0);
        assert_eq!(result.bounds_used.origin_miles, 100.0);
    }

    #[test]
    fn widens_until_distant_pickup_is_reachable() {
        // Pickup ~500 miles from Boston: unreachable at 100, reachable
        // once doubling reaches 800.
        let index = LoadIndex::build(vec![load(
            "REMOTE",
            (49.61, -71.0589),
            (32.85, -96.7970),
        )]);
        let criteria = boston_dallas();
        let policy = RelaxationPolicy {
            step_factor: 2.0,
            max_rounds: 3,
            ceiling_miles: 1000.0,
            lockstep: true,
        };
        let controller =
            RelaxationController::new(ChainSearcher::new(&index, &criteria), policy);

        let result = controller.run(criteria.options.bounds()).unwrap();
        assert_eq!(result.chains.len(), 1);
        assert!(result.relaxed);
        assert_eq!(result.rounds, 3);
        assert_eq!(result.bounds_used.origin_miles, 800.0);
    }

    #[test]
    fn exhaustion_returns_empty_not_error() {
        // Nothing anywhere near the lane
        let index = LoadIndex::build(vec![load("ELSEWHERE", (10.0, 10.0), (11.0, 11.0))]);
        let criteria = boston_dallas();
        let controller = RelaxationController::new(
            ChainSearcher::new(&index, &criteria),
            RelaxationPolicy::default(),
        );

        let result = controller.run(criteria.options.bounds()).unwrap();
        assert!(result.chains.is_empty());
        assert!(result.relaxed);
        assert_eq!(result.rounds, 3);
        // 100 * 1.5^3
        assert!((result.bounds_used.origin_miles - 337.5).abs() < 1e-9);
    }

    #[test]
    fn ceiling_blocks_growth() {
        let index = LoadIndex::build(vec![load("ELSEWHERE", (10.0, 10.0), (11.0, 11.0))]);
        let criteria = boston_dallas();
        let policy = RelaxationPolicy {
            ceiling_miles: 100.0, // already at the requested bounds
            ..RelaxationPolicy::default()
        };
        let controller =
            RelaxationController::new(ChainSearcher::new(&index, &criteria), policy);

        let result = controller.run(criteria.options.bounds()).unwrap();
        assert!(result.chains.is_empty());
        assert!(!result.relaxed);
        assert_eq!(result.rounds, 0);
        assert_eq!(result.bounds_used.origin_miles, 100.0);
    }

    #[test]
    fn disabled_policy_never_retries() {
        let index = LoadIndex::build(vec![load(
            "REMOTE",
            (49.61, -71.0589),
            (32.85, -96.7970),
        )]);
        let criteria = boston_dallas();
        let controller = RelaxationController::new(
            ChainSearcher::new(&index, &criteria),
            RelaxationPolicy::disabled(),
        );

        let result = controller.run(criteria.options.bounds()).unwrap();
        assert!(result.chains.is_empty());
        assert!(!result.relaxed);
        assert_eq!(result.rounds, 0);
    }

    #[test]
    fn independent_mode_alternates_bounds() {
        let policy = RelaxationPolicy {
            step_factor: 2.0,
            max_rounds: 4,
            ceiling_miles: 10_000.0,
            lockstep: false,
        };
        let start = DeadheadBounds {
            origin_miles: 100.0,
            destination_miles: 100.0,
        };

        let after_first = policy.widen(start, 0);
        assert_eq!(after_first.origin_miles, 200.0);
        assert_eq!(after_first.destination_miles, 100.0);

        let after_second = policy.widen(after_first, 1);
        assert_eq!(after_second.origin_miles, 200.0);
        assert_eq!(after_second.destination_miles, 200.0);
    }

    #[test]
    fn independent_mode_keeps_widening_past_a_maxed_bound() {
        // Origin starts near the ceiling; once it tops out, later rounds
        // must keep widening the destination bound instead of stalling.
        let policy = RelaxationPolicy {
            step_factor: 2.0,
            max_rounds: 10,
            ceiling_miles: 600.0,
            lockstep: false,
        };
        let start = DeadheadBounds {
            origin_miles: 400.0,
            destination_miles: 100.0,
        };

        let b1 = policy.widen(start, 0);
        assert_eq!((b1.origin_miles, b1.destination_miles), (600.0, 100.0));

        let b2 = policy.widen(b1, 1);
        assert_eq!((b2.origin_miles, b2.destination_miles), (600.0, 200.0));

        // Origin's turn, but it is maxed: the destination grows anyway
        let b3 = policy.widen(b2, 2);
        assert_eq!((b3.origin_miles, b3.destination_miles), (600.0, 400.0));

        let b4 = policy.widen(b3, 3);
        assert_eq!((b4.origin_miles, b4.destination_miles), (600.0, 600.0));

        // Both maxed: only now does widening stop
        let b5 = policy.widen(b4, 4);
        assert_eq!(b5, b4);
    }

    #[test]
    fn independent_mode_finds_chain_behind_a_maxed_origin_bound() {
        // Pickup sits close to Boston but delivery is ~300 miles short of
        // Dallas: only the destination bound needs widening, and the rounds
        // it takes come after the origin bound has already hit the ceiling.
        let index = LoadIndex::build(vec![load(
            "SHORT",
            (42.43, -71.0589),
            (37.12, -96.7970),
        )]);
        let mut criteria = boston_dallas();
        criteria.options.max_origin_deadhead_miles = 400.0;
        criteria.options.max_destination_deadhead_miles = 100.0;

        let policy = RelaxationPolicy {
            step_factor: 2.0,
            max_rounds: 6,
            ceiling_miles: 600.0,
            lockstep: false,
        };
        let controller =
            RelaxationController::new(ChainSearcher::new(&index, &criteria), policy);

        let result = controller.run(criteria.options.bounds()).unwrap();
        assert_eq!(result.chains.len(), 1);
        assert!(result.relaxed);
        assert_eq!(result.bounds_used.origin_miles, 600.0);
        assert_eq!(result.bounds_used.destination_miles, 400.0);
    }

    #[test]
    fn rejects_non_widening_step_factor() {
        let policy = RelaxationPolicy {
            step_factor: 1.0,
            ..RelaxationPolicy::default()
        };
        assert!(policy.validate().is_err());
    }
}
