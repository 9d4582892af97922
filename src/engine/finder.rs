//! Market directory search with distance from an origin.

use super::distance::distance_km;
use crate::domain::{CommodityId, Market};
use crate::store::{Catalog, PriceStore};
use serde::Serialize;
use std::collections::HashSet;

/// Search criteria for the market finder.
#[derive(Debug, Clone, Default)]
pub struct MarketFilter {
    /// Case-insensitive substring of the market name or LGA.
    pub search: Option<String>,
    /// Exact state; `None` means all states.
    pub state: Option<String>,
}

impl MarketFilter {
    fn accepts(&self, market: &Market) -> bool {
        let matches_search = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                market.name.to_lowercase().contains(&term)
                    || market.lga.to_lowercase().contains(&term)
            }
        };
        let matches_state = self.state.as_deref().map_or(true, |s| market.state == s);
        matches_search && matches_state
    }
}

/// A market annotated for the finder view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketSummary<'a> {
    pub market: &'a Market,
    /// Distinct commodities with at least one observation here.
    pub commodity_count: usize,
    /// Kilometres from the origin; `None` without an origin.
    pub distance_km: Option<f64>,
}

/// Markets matching `filter`, in catalog order.
pub fn find_markets<'a>(
    catalog: &'a Catalog,
    store: &PriceStore,
    filter: &MarketFilter,
    origin: Option<&Market>,
) -> Vec<MarketSummary<'a>> {
    catalog
        .markets()
        .iter()
        .filter(|m| filter.accepts(m))
        .map(|market| {
            let commodity_count = store
                .for_market(market.id)
                .map(|o| o.commodity_id)
                .collect::<HashSet<CommodityId>>()
                .len();
            MarketSummary {
                market,
                commodity_count,
                distance_km: origin.map(|o| distance_km(o.location(), market.location())),
            }
        })
        .collect()
}
