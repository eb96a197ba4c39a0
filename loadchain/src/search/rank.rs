//! Chain ranking and result pagination.

use serde::{Deserialize, Serialize};

use crate::domain::RouteChain;

use super::search::SearchError;

/// Hard cap on page size; larger requests are clamped, not rejected.
pub const MAX_PAGE_SIZE: usize = 200;

/// Page size used when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Order chains best-first.
///
/// The comparator is deterministic: ascending total deadhead miles, then
/// descending total revenue, with ties broken by the chain's load-id
/// sequence. Identical requests therefore rank identically, byte for byte.
pub fn rank_chains(mut chains: Vec<RouteChain>) -> Vec<RouteChain> {
    chains.sort_by(|a, b| {
        a.total_deadhead_miles()
            .total_cmp(&b.total_deadhead_miles())
            .then_with(|| b.total_revenue().total_cmp(&a.total_revenue()))
            .then_with(|| a.load_ids().cmp(b.load_ids()))
    });
    chains
}

/// Which slice of the ranked list to return.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageRequest {
    /// 1-based page number. Default 1.
    pub page: usize,

    /// Items per page. Default 25, clamped to [`MAX_PAGE_SIZE`].
    pub page_size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.page == 0 {
            return Err(SearchError::InvalidRequest(
                "page numbers are 1-based".to_string(),
            ));
        }
        if self.page_size == 0 {
            return Err(SearchError::InvalidRequest(
                "pageSize must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// The page size after the ceiling clamp. The clamp is part of the
    /// contract; oversized requests are not an error.
    pub fn effective_page_size(&self) -> usize {
        self.page_size.min(MAX_PAGE_SIZE)
    }
}

/// One page of a ranked result list, with totals for the whole list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,
}

/// Slice one page out of the full ranked list.
///
/// `total_count` and `total_pages` describe the unsliced list. A page past
/// the end yields empty items, not an error.
pub fn paginate<T>(items: Vec<T>, request: &PageRequest) -> PageResult<T> {
    let page_size = request.effective_page_size();
    let total_count = items.len();
    let total_pages = total_count.div_ceil(page_size);

    let start = (request.page - 1).saturating_mul(page_size);
    let items: Vec<T> = items.into_iter().skip(start).take(page_size).collect();

    PageResult {
        items,
        page: request.page,
        page_size,
        total_count,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChainLink, GeoPoint, Load, LoadId, Revenue};
    use std::sync::Arc;

    fn chain(ids: &[&str], deadheads: &[f64], revenue: f64) -> RouteChain {
        let links: Vec<ChainLink> = ids
            .iter()
            .zip(deadheads)
            .map(|(id, &deadhead)| {
                let mut load = Load::new(
                    LoadId::parse(*id).unwrap(),
                    GeoPoint::new(42.0, -71.0).unwrap(),
                    GeoPoint::new(33.0, -96.0).unwrap(),
                );
                load.revenue = Some(Revenue {
                    amount: revenue / ids.len() as f64,
                    rate_per_mile: None,
                });
                ChainLink {
                    load: Arc::new(load),
                    deadhead_before_miles: deadhead,
                }
            })
            .collect();
        RouteChain::new(links, 0.0).unwrap()
    }

    #[test]
    fn ranks_by_deadhead_ascending() {
        let ranked = rank_chains(vec![
            chain(&["B"], &[50.0], 1000.0),
            chain(&["A"], &[10.0], 1000.0),
            chain(&["C"], &[30.0], 1000.0),
        ]);

        let order: Vec<Vec<&str>> = ranked.iter().map(|c| c.load_ids().collect()).collect();
        assert_eq!(order, vec![vec!["A"], vec!["C"], vec!["B"]]);
    }

    #[test]
    fn equal_deadhead_ranks_by_revenue_descending() {
        let ranked = rank_chains(vec![
            chain(&["LOW"], &[20.0], 500.0),
            chain(&["HIGH"], &[20.0], 2000.0),
        ]);

        let order: Vec<Vec<&str>> = ranked.iter().map(|c| c.load_ids().collect()).collect();
        assert_eq!(order, vec![vec!["HIGH"], vec!["LOW"]]);
    }

    #[test]
    fn full_tie_breaks_by_load_id_sequence() {
        let ranked = rank_chains(vec![
            chain(&["Z"], &[20.0], 1000.0),
            chain(&["A"], &[20.0], 1000.0),
            chain(&["A", "B"], &[10.0, 10.0], 1000.0),
        ]);

        let order: Vec<Vec<&str>> = ranked.iter().map(|c| c.load_ids().collect()).collect();
        assert_eq!(order, vec![vec!["A"], vec!["A", "B"], vec!["Z"]]);
    }

    #[test]
    fn page_request_defaults() {
        let request = PageRequest::default();
        assert_eq!(request.page, 1);
        assert_eq!(request.page_size, DEFAULT_PAGE_SIZE);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn rejects_zero_page_and_page_size() {
        assert!(PageRequest { page: 0, page_size: 10 }.validate().is_err());
        assert!(PageRequest { page: 1, page_size: 0 }.validate().is_err());
    }

    #[test]
    fn oversized_page_size_is_clamped() {
        let request = PageRequest {
            page: 1,
            page_size: 10_000,
        };
        assert!(request.validate().is_ok());
        assert_eq!(request.effective_page_size(), MAX_PAGE_SIZE);

        let result = paginate((0..500).collect::<Vec<_>>(), &request);
        assert_eq!(result.items.len(), MAX_PAGE_SIZE);
        assert_eq!(result.page_size, MAX_PAGE_SIZE);
        assert_eq!(result.total_pages, 3);
    }

    #[test]
    fn slices_interior_page() {
        let result = paginate((0..10).collect::<Vec<_>>(), &PageRequest { page: 2, page_size: 3 });
        assert_eq!(result.items, vec![3, 4, 5]);
        assert_eq!(result.total_count, 10);
        assert_eq!(result.total_pages, 4);
    }

    #[test]
    fn last_page_may_be_short() {
        let result = paginate((0..10).collect::<Vec<_>>(), &PageRequest { page: 4, page_size: 3 });
        assert_eq!(result.items, vec![9]);
    }

    #[test]
    fn page_past_end_is_empty_with_correct_totals() {
        let result = paginate((0..10).collect::<Vec<_>>(), &PageRequest { page: 9, page_size: 3 });
        assert!(result.items.is_empty());
        assert_eq!(result.total_count, 10);
        assert_eq!(result.total_pages, 4);
    }

    #[test]
    fn empty_list_has_zero_pages() {
        let result = paginate(Vec::<i32>::new(), &PageRequest::default());
        assert!(result.items.is_empty());
        assert_eq!(result.total_count, 0);
        assert_eq!(result.total_pages, 0);
    }
}
