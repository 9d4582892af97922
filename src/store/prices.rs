//! Append-only store of price observations.

use crate::domain::{CommodityId, MarketId, PriceObservation};

/// Price observations for the session, in insertion order.
///
/// Observations are never mutated or removed once appended.
#[derive(Debug, Clone, Default)]
pub struct PriceStore {
    observations: Vec<PriceObservation>,
}

impl PriceStore {
    pub fn new(observations: Vec<PriceObservation>) -> Self {
        Self { observations }
    }

    pub fn append(&mut self, observation: PriceObservation) -> &PriceObservation {
        self.observations.push(observation);
        let last = self.observations.len() - 1;
        &self.observations[last]
    }

    pub fn all(&self) -> &[PriceObservation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Observations for one (commodity, market) pair, in insertion order.
    pub fn matching(
        &self,
        commodity_id: CommodityId,
        market_id: MarketId,
    ) -> impl Iterator<Item = &PriceObservation> + '_ {
        self.observations
            .iter()
            .filter(move |o| o.matches(commodity_id, market_id))
    }

    /// Matching observations ordered by `reported_at` descending.
    ///
    /// Equal timestamps put the most recently stored observation first.
    pub fn newest_first(
        &self,
        commodity_id: CommodityId,
        market_id: MarketId,
    ) -> Vec<&PriceObservation> {
        let mut matches: Vec<&PriceObservation> = self.matching(commodity_id, market_id).collect();
        // Stable sort after reversing keeps later insertions ahead on ties.
        matches.reverse();
        matches.sort_by(|a, b| b.reported_at.cmp(&a.reported_at));
        matches
    }

    /// Observations recorded at one market, any commodity.
    pub fn for_market(&self, market_id: MarketId) -> impl Iterator<Item = &PriceObservation> + '_ {
        self.observations
            .iter()
            .filter(move |o| o.market_id == market_id)
    }
}
