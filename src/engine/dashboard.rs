//! Dashboard cards: latest price and movement per commodity at a featured market.

use super::queries::{PriceChange, PriceQueryEngine};
use crate::domain::{Commodity, Market, PriceObservation};
use crate::store::Catalog;
use serde::Serialize;

#[derive(Debug, Clone, Default)]
pub struct DashboardFilter {
    /// Case-insensitive substring of the commodity name.
    pub search: Option<String>,
    /// Category, compared case-insensitively; `None` means all.
    pub category: Option<String>,
}

impl DashboardFilter {
    fn accepts(&self, commodity: &Commodity) -> bool {
        let matches_search = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => commodity
                .name
                .to_lowercase()
                .contains(&term.to_lowercase()),
        };
        let matches_category = self
            .category
            .as_deref()
            .map_or(true, |c| commodity.in_category(c));
        matches_search && matches_category
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceCard<'a> {
    pub commodity: &'a Commodity,
    pub market: &'a Market,
    pub latest: &'a PriceObservation,
    pub change: PriceChange,
}

/// One card per commodity priced at `market`, in catalog order.
///
/// Commodities with no observation at the market are left out.
pub fn price_cards<'a>(
    catalog: &'a Catalog,
    engine: &PriceQueryEngine<'a>,
    market: &'a Market,
    filter: &DashboardFilter,
) -> Vec<PriceCard<'a>> {
    catalog
        .commodities()
        .iter()
        .filter(|c| filter.accepts(c))
        .filter_map(|commodity| {
            let latest = engine.latest_price(commodity.id, market.id)?;
            Some(PriceCard {
                commodity,
                market,
                latest,
                change: engine.price_change(commodity.id, market.id),
            })
        })
        .collect()
}
