//! The route chain search engine.
//!
//! This module answers: "starting from this origin with these posted loads,
//! which chains of loads get me to this destination, and in what order
//! should I look at them?"
//!
//! One request flows through: validation, the per-request [`LoadIndex`],
//! the depth-bounded [`ChainSearcher`] (re-run by the
//! [`RelaxationController`] when the requested deadhead bounds find
//! nothing), then ranking and pagination. The engine holds no state across
//! requests.

mod config;
mod index;
mod rank;
mod relax;
mod search;

pub use config::{DeadheadBounds, SearchCriteria, SearchOptions};
pub use index::{Candidate, LoadIndex};
pub use rank::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageRequest, PageResult, paginate, rank_chains};
pub use relax::{RelaxationController, RelaxationPolicy, RelaxedSearch};
pub use search::{ChainSearcher, SearchError, SearchOutcome};

use serde::Serialize;

use crate::domain::{Load, RouteChain};

/// A full engine response: one page of ranked chains plus the deadhead
/// bounds that actually produced them.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainSearchResponse {
    pub results: PageResult<RouteChain>,

    /// Bounds in force for the returned chains, post-relaxation.
    pub bounds_used: DeadheadBounds,

    /// True when the requested bounds found nothing and the answer comes
    /// from widened bounds.
    pub relaxed: bool,

    /// Relaxation rounds taken to produce the answer.
    pub relaxation_rounds: usize,
}

/// Run one complete search: validate, index, search (with relaxation),
/// rank, and paginate.
///
/// An empty load set or an infeasible lane yields an empty page, not an
/// error; errors are reserved for invalid input.
pub fn search_route_chains(
    criteria: &SearchCriteria,
    loads: Vec<Load>,
    page: &PageRequest,
    policy: &RelaxationPolicy,
) -> Result<ChainSearchResponse, SearchError> {
    criteria.validate()?;
    page.validate()?;
    policy.validate()?;

    let mut seen_ids = std::collections::HashSet::new();
    for load in &loads {
        load.validate()?;
        if !seen_ids.insert(load.id.clone()) {
            return Err(SearchError::InvalidRequest(format!(
                "duplicate load id in request: {}",
                load.id
            )));
        }
    }

    let index = LoadIndex::build(loads);
    let searcher = ChainSearcher::new(&index, criteria);
    let controller = RelaxationController::new(searcher, policy.clone());

    let found = controller.run(criteria.options.bounds())?;
    let ranked = rank_chains(found.chains);

    Ok(ChainSearchResponse {
        results: paginate(ranked, page),
        bounds_used: found.bounds_used,
        relaxed: found.relaxed,
        relaxation_rounds: found.rounds,
    })
}
