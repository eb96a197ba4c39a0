//! Depth-bounded chain enumeration.
//!
//! Finds every way to chain loads from an origin to a destination within
//! the deadhead bounds in force, by backtracking depth-first search over
//! candidate loads. The used-load set is scoped to the current path and
//! restored on backtrack, so one load may appear in many distinct chains
//! but never twice in the same chain.

use std::collections::HashSet;

use tracing::debug;

use crate::domain::{ChainLink, DomainError, RouteChain, distance_miles};

use super::config::{DeadheadBounds, SearchCriteria};
use super::index::LoadIndex;

/// Error from chain search.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SearchError {
    /// Invalid criteria, options, or page request
    #[error("invalid search request: {0}")]
    InvalidRequest(String),

    /// A load or chain failed domain validation
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Result of one search pass at fixed bounds.
#[derive(Debug)]
pub struct SearchOutcome {
    /// Complete chains found, in discovery order.
    pub chains: Vec<RouteChain>,

    /// Number of candidate positions expanded during the search.
    pub positions_explored: usize,

    /// Whether the global route cap stopped the search early.
    pub truncated: bool,
}

impl SearchOutcome {
    fn empty() -> Self {
        Self {
            chains: Vec::new(),
            positions_explored: 0,
            truncated: false,
        }
    }
}

/// Backtracking enumerator over one request's load index.
pub struct ChainSearcher<'a> {
    index: &'a LoadIndex,
    criteria: &'a SearchCriteria,
}

struct SearchState {
    /// `(index into the load index, deadhead leg before the load)` for each
    /// load on the current path.
    path: Vec<(usize, f64)>,

    /// Loads on the current path; restored on backtrack, never global.
    used: HashSet<usize>,

    chains: Vec<RouteChain>,
    positions_explored: usize,
    truncated: bool,
}

impl<'a> ChainSearcher<'a> {
    pub fn new(index: &'a LoadIndex, criteria: &'a SearchCriteria) -> Self {
        Self { index, criteria }
    }

    /// Enumerate complete chains at the given bounds.
    ///
    /// Candidate loads are explored in ascending deadhead order, so when
    /// the route cap cuts the search short the low-deadhead chains are the
    /// ones that made it in.
    pub fn search(&self, bounds: DeadheadBounds) -> Result<SearchOutcome, SearchError> {
        if self.index.is_empty() {
            return Ok(SearchOutcome::empty());
        }

        let mut state = SearchState {
            path: Vec::with_capacity(self.criteria.options.max_chain_length),
            used: HashSet::new(),
            chains: Vec::new(),
            positions_explored: 0,
            truncated: false,
        };

        let first_candidates = self
            .index
            .loads_within(&self.criteria.origin, bounds.origin_miles);

        for candidate in first_candidates {
            if state.truncated {
                break;
            }
            self.extend(candidate.index, candidate.distance_miles, bounds, &mut state)?;
        }

        debug!(
            chains = state.chains.len(),
            explored = state.positions_explored,
            truncated = state.truncated,
            "chain search pass complete"
        );

        Ok(SearchOutcome {
            chains: state.chains,
            positions_explored: state.positions_explored,
            truncated: state.truncated,
        })
    }

    /// Ride `load_idx`, record a chain if it completes one, then try to
    /// extend further. Restores path state before returning.
    fn extend(
        &self,
        load_idx: usize,
        deadhead_before: f64,
        bounds: DeadheadBounds,
        state: &mut SearchState,
    ) -> Result<(), SearchError> {
        state.path.push((load_idx, deadhead_before));
        state.used.insert(load_idx);
        state.positions_explored += 1;

        let delivery = &self.index.load(load_idx).destination;
        let final_deadhead = distance_miles(delivery, &self.criteria.destination);

        if final_deadhead <= bounds.destination_miles {
            state.chains.push(self.build_chain(&state.path, final_deadhead)?);
            if state.chains.len() >= self.criteria.options.max_routes {
                state.truncated = true;
            }
        }

        if !state.truncated && state.path.len() < self.criteria.options.max_chain_length {
            let current = self.index.load(load_idx).clone();
            for candidate in self.index.loads_within(delivery, bounds.inter_load_miles()) {
                if state.used.contains(&candidate.index) {
                    continue;
                }
                if !current.can_precede(self.index.load(candidate.index), candidate.distance_miles)
                {
                    continue;
                }
                self.extend(candidate.index, candidate.distance_miles, bounds, state)?;
                if state.truncated {
                    break;
                }
            }
        }

        state.used.remove(&load_idx);
        state.path.pop();
        Ok(())
    }

    fn build_chain(
        &self,
        path: &[(usize, f64)],
        final_deadhead: f64,
    ) -> Result<RouteChain, SearchError> {
        let links = path
            .iter()
            .map(|&(idx, deadhead)| ChainLink {
                load: self.index.load(idx).clone(),
                deadhead_before_miles: deadhead,
            })
            .collect();
        Ok(RouteChain::new(links, final_deadhead)?)
    }
}
