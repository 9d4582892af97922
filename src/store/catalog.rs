//! Static commodities and markets for a session.

use crate::domain::{Commodity, CommodityId, Market, MarketId};

/// Immutable reference data: what can be priced, and where.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    commodities: Vec<Commodity>,
    markets: Vec<Market>,
}

impl Catalog {
    pub fn new(commodities: Vec<Commodity>, markets: Vec<Market>) -> Self {
        Self {
            commodities,
            markets,
        }
    }

    pub fn commodities(&self) -> &[Commodity] {
        &self.commodities
    }

    pub fn markets(&self) -> &[Market] {
        &self.markets
    }

    pub fn commodity(&self, id: CommodityId) -> Option<&Commodity> {
        self.commodities.iter().find(|c| c.id == id)
    }

    pub fn market(&self, id: MarketId) -> Option<&Market> {
        self.markets.iter().find(|m| m.id == id)
    }

    /// The first market, used as the default origin for distance and transport cost.
    pub fn default_market(&self) -> Option<&Market> {
        self.markets.first()
    }

    /// Distinct commodity categories in catalog order.
    pub fn categories(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for commodity in &self.commodities {
            if !out.contains(&commodity.category.as_str()) {
                out.push(commodity.category.as_str());
            }
        }
        out
    }

    /// Distinct market states, sorted.
    pub fn states(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.markets.iter().map(|m| m.state.as_str()).collect();
        out.sort_unstable();
        out.dedup();
        out
    }
}
