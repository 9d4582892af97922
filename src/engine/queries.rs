//! Read-only price queries over the store.
//!
//! Every query is a pure function of current store contents; nothing is cached.

use crate::domain::{CommodityId, Decimal, Market, MarketId, PriceObservation};
use crate::store::{Catalog, PriceStore};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Number of trend points callers ask for when they don't say.
pub const DEFAULT_TREND_DAYS: usize = 7;

/// Direction of the most recent price move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Neutral,
}

/// Percentage move between the two most recent observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceChange {
    /// Rounded to one decimal place.
    pub percentage: Decimal,
    pub direction: Direction,
}

impl PriceChange {
    pub fn neutral() -> Self {
        Self {
            percentage: Decimal::zero(),
            direction: Direction::Neutral,
        }
    }
}

/// Average price on one UTC calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub avg_price: Decimal,
}

/// One requested market in a side-by-side comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonEntry<'a> {
    pub market_id: MarketId,
    /// `None` if the id is not in the catalog.
    pub market: Option<&'a Market>,
    /// Latest price, `None` if nothing was reported for the pair.
    pub price: Option<Decimal>,
}

/// Query facade over a catalog and price store.
#[derive(Debug, Clone, Copy)]
pub struct PriceQueryEngine<'a> {
    catalog: &'a Catalog,
    store: &'a PriceStore,
}

impl<'a> PriceQueryEngine<'a> {
    pub fn new(catalog: &'a Catalog, store: &'a PriceStore) -> Self {
        Self { catalog, store }
    }

    /// Most recent observation for the pair, if any.
    pub fn latest_price(
        &self,
        commodity_id: CommodityId,
        market_id: MarketId,
    ) -> Option<&'a PriceObservation> {
        self.store
            .newest_first(commodity_id, market_id)
            .into_iter()
            .next()
    }

    /// Percentage change between the two most recent observations.
    ///
    /// Neutral when fewer than two observations exist, the previous price is
    /// zero, or the change does not fit in a `Decimal`.
    pub fn price_change(&self, commodity_id: CommodityId, market_id: MarketId) -> PriceChange {
        let newest = self.store.newest_first(commodity_id, market_id);
        let (current, previous) = match newest.as_slice() {
            [current, previous, ..] => (current.price_per_unit, previous.price_per_unit),
            _ => return PriceChange::neutral(),
        };

        if previous.is_zero() {
            debug!(%commodity_id, %market_id, "Previous price is zero, reporting neutral change");
            return PriceChange::neutral();
        }
        let Some(change) = current
            .checked_sub(previous)
            .and_then(|delta| delta.checked_div(previous))
            .and_then(|ratio| ratio.checked_mul(Decimal::hundred()))
        else {
            warn!(%commodity_id, %market_id, %current, %previous, "Price change overflowed, reporting neutral change");
            return PriceChange::neutral();
        };
        let direction = if change.is_positive() {
            Direction::Up
        } else if change.is_negative() {
            Direction::Down
        } else {
            Direction::Neutral
        };

        PriceChange {
            percentage: change.round_dp(1),
            direction,
        }
    }

    /// Daily average prices, oldest first, limited to the last `days` dates that have data.
    ///
    /// A date whose prices overflow when summed is left out.
    pub fn price_trend(
        &self,
        commodity_id: CommodityId,
        market_id: MarketId,
        days: usize,
    ) -> Vec<TrendPoint> {
        let mut by_date: BTreeMap<NaiveDate, Vec<Decimal>> = BTreeMap::new();
        for obs in self.store.matching(commodity_id, market_id) {
            by_date
                .entry(obs.reported_at.date_naive())
                .or_default()
                .push(obs.price_per_unit);
        }

        let skip = by_date.len().saturating_sub(days);
        by_date
            .into_iter()
            .skip(skip)
            .filter_map(|(date, prices)| match Decimal::mean(&prices) {
                Some(avg_price) => Some(TrendPoint { date, avg_price }),
                None => {
                    warn!(%commodity_id, %market_id, %date, "Daily average overflowed, dropping trend point");
                    None
                }
            })
            .collect()
    }

    /// Latest price per requested market; order and duplicates are preserved.
    pub fn market_comparison(
        &self,
        commodity_id: CommodityId,
        market_ids: &[MarketId],
    ) -> Vec<ComparisonEntry<'a>> {
        market_ids
            .iter()
            .map(|&market_id| ComparisonEntry {
                market_id,
                market: self.catalog.market(market_id),
                price: self
                    .latest_price(commodity_id, market_id)
                    .map(|o| o.price_per_unit),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GeoPoint, ObservationId, QualityGrade, UserId};
    use chrono::{TimeZone, Utc};

    fn obs(price: &str, day: u32, hour: u32) -> PriceObservation {
        PriceObservation {
            id: ObservationId::generate(),
            commodity_id: CommodityId::new(1),
            market_id: MarketId::new(1),
            price_per_unit: Decimal::from_str_canonical(price).unwrap(),
            quality_grade: QualityGrade::Standard,
            reported_by: UserId::new(1),
            reported_at: Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap(),
            verified: true,
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(
            vec![],
            vec![Market::new(MarketId::new(1), "Mile 12", "Lagos", "Kosofe", GeoPoint::new(6.6, 3.4))],
        )
    }

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    #[test]
    fn test_latest_price_empty_store() {
        let catalog = catalog();
        let store = PriceStore::default();
        let engine = PriceQueryEngine::new(&catalog, &store);
        assert!(engine.latest_price(CommodityId::new(1), MarketId::new(1)).is_none());
    }

    #[test]
    fn test_price_change_rounds_to_one_decimal() {
        let catalog = catalog();
        let store = PriceStore::new(vec![obs("110", 1, 8), obs("121", 2, 8)]);
        let change = PriceQueryEngine::new(&catalog, &store)
            .price_change(CommodityId::new(1), MarketId::new(1));
        assert_eq!(change.percentage, d("10"));
        assert_eq!(change.direction, Direction::Up);

        let store = PriceStore::new(vec![obs("300", 1, 8), obs("200", 2, 8)]);
        let change = PriceQueryEngine::new(&catalog, &store)
            .price_change(CommodityId::new(1), MarketId::new(1));
        assert_eq!(change.percentage, d("-33.3"));
        assert_eq!(change.direction, Direction::Down);
    }

    #[test]
    fn test_price_change_tiny_move_keeps_direction() {
        let catalog = catalog();
        // +0.001% rounds to 0.0 but the raw change is still up.
        let store = PriceStore::new(vec![obs("100000", 1, 8), obs("100001", 2, 8)]);
        let change = PriceQueryEngine::new(&catalog, &store)
            .price_change(CommodityId::new(1), MarketId::new(1));
        assert!(change.percentage.is_zero());
        assert_eq!(change.direction, Direction::Up);
    }

    #[test]
    fn test_price_change_zero_previous_is_neutral() {
        let catalog = catalog();
        let store = PriceStore::new(vec![obs("0", 1, 8), obs("100", 2, 8)]);
        let change = PriceQueryEngine::new(&catalog, &store)
            .price_change(CommodityId::new(1), MarketId::new(1));
        assert_eq!(change, PriceChange::neutral());
    }

    #[test]
    fn test_price_change_overflow_is_neutral() {
        let catalog = catalog();
        let store = PriceStore::new(vec![
            obs("1", 1, 8),
            obs("1000000000000000000000000000", 2, 8),
        ]);
        let change = PriceQueryEngine::new(&catalog, &store)
            .price_change(CommodityId::new(1), MarketId::new(1));
        assert_eq!(change, PriceChange::neutral());
    }

    #[test]
    fn test_trend_skips_overflowing_day() {
        let catalog = catalog();
        let store = PriceStore::new(vec![
            obs("100", 1, 8),
            obs("50000000000000000000000000000", 2, 8),
            obs("50000000000000000000000000000", 2, 9),
        ]);
        let trend = PriceQueryEngine::new(&catalog, &store)
            .price_trend(CommodityId::new(1), MarketId::new(1), 7);
        assert_eq!(trend.len(), 1);
        assert_eq!(trend[0].avg_price, d("100"));
    }

    #[test]
    fn test_price_change_unchanged_is_neutral() {
        let catalog = catalog();
        let store = PriceStore::new(vec![obs("100", 1, 8), obs("100", 2, 8)]);
        let change = PriceQueryEngine::new(&catalog, &store)
            .price_change(CommodityId::new(1), MarketId::new(1));
        assert_eq!(change.direction, Direction::Neutral);
        assert!(change.percentage.is_zero());
    }

    #[test]
    fn test_trend_keeps_most_recent_dates() {
        let catalog = catalog();
        let store = PriceStore::new(vec![
            obs("100", 1, 8),
            obs("200", 3, 8),
            obs("300", 5, 8),
            obs("500", 5, 20),
        ]);
        let trend = PriceQueryEngine::new(&catalog, &store)
            .price_trend(CommodityId::new(1), MarketId::new(1), 2);
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].date, NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
        assert_eq!(trend[0].avg_price, d("200"));
        assert_eq!(trend[1].date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(trend[1].avg_price, d("400"));
    }

    #[test]
    fn test_trend_zero_days_is_empty() {
        let catalog = catalog();
        let store = PriceStore::new(vec![obs("100", 1, 8)]);
        let trend = PriceQueryEngine::new(&catalog, &store)
            .price_trend(CommodityId::new(1), MarketId::new(1), 0);
        assert!(trend.is_empty());
    }

    #[test]
    fn test_direction_serialization() {
        assert_eq!(serde_json::to_string(&Direction::Neutral).unwrap(), "\"neutral\"");
    }
}
