//! Market comparison with landed cost from an origin market.

use super::queries::PriceQueryEngine;
use super::transport::TransportCostEstimator;
use crate::domain::{CommodityId, Decimal, Market, MarketId};
use crate::store::Catalog;
use serde::Serialize;
use tracing::warn;

/// A compared market with the cost of bringing the goods to the origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LandedCost<'a> {
    pub market_id: MarketId,
    pub market: Option<&'a Market>,
    pub price: Option<Decimal>,
    pub transport_cost: Decimal,
    /// `price + transport_cost`; `None` without a price or when the sum overflows.
    pub total_cost: Option<Decimal>,
}

/// Result of comparing a commodity across markets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketComparison<'a> {
    pub commodity_id: CommodityId,
    pub entries: Vec<LandedCost<'a>>,
}

impl<'a> MarketComparison<'a> {
    /// Entry with the lowest total cost; the first one wins ties.
    pub fn best_deal(&self) -> Option<&LandedCost<'a>> {
        let mut best: Option<(Decimal, &LandedCost<'a>)> = None;
        for entry in &self.entries {
            let Some(total) = entry.total_cost else {
                continue;
            };
            match best {
                Some((best_total, _)) if best_total <= total => {}
                _ => best = Some((total, entry)),
            }
        }
        best.map(|(_, entry)| entry)
    }
}

/// Compare the latest prices of a commodity across markets, adding transport to `origin`.
pub fn compare_markets<'a>(
    engine: &PriceQueryEngine<'a>,
    estimator: &TransportCostEstimator,
    commodity_id: CommodityId,
    market_ids: &[MarketId],
    origin: Option<&Market>,
) -> MarketComparison<'a> {
    let entries = engine
        .market_comparison(commodity_id, market_ids)
        .into_iter()
        .map(|entry| {
            let transport_cost = estimator.cost(origin, entry.market);
            LandedCost {
                market_id: entry.market_id,
                market: entry.market,
                price: entry.price,
                transport_cost,
                total_cost: entry.price.and_then(|price| {
                    let total = price.checked_add(transport_cost);
                    if total.is_none() {
                        warn!(market_id = %entry.market_id, %price, %transport_cost, "Total cost overflowed");
                    }
                    total
                }),
            }
        })
        .collect();

    MarketComparison {
        commodity_id,
        entries,
    }
}

/// A market's place in the cheapest-first ranking for one commodity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMarket<'a> {
    pub market: &'a Market,
    pub price: Decimal,
    /// Zero for the cheapest market.
    pub premium_over_cheapest: Decimal,
}

/// Every catalog market with a latest price for the commodity, cheapest first.
///
/// Equal prices keep catalog order. Markets with no price are left out, so an
/// empty result means there is nothing to compare.
pub fn rank_markets<'a>(
    catalog: &'a Catalog,
    engine: &PriceQueryEngine<'a>,
    commodity_id: CommodityId,
) -> Vec<RankedMarket<'a>> {
    let mut priced: Vec<(&'a Market, Decimal)> = catalog
        .markets()
        .iter()
        .filter_map(|market| {
            engine
                .latest_price(commodity_id, market.id)
                .map(|obs| (market, obs.price_per_unit))
        })
        .collect();
    priced.sort_by_key(|(_, price)| *price);

    let Some(&(_, cheapest)) = priced.first() else {
        return Vec::new();
    };
    priced
        .into_iter()
        .map(|(market, price)| RankedMarket {
            market,
            price,
            premium_over_cheapest: price.saturating_sub(cheapest),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GeoPoint, ObservationId, PriceObservation, QualityGrade, UserId};
    use crate::store::PriceStore;
    use chrono::{TimeZone, Utc};

    fn entry(id: i64, total: Option<i64>) -> LandedCost<'static> {
        LandedCost {
            market_id: MarketId::new(id),
            market: None,
            price: total.map(Decimal::from),
            transport_cost: Decimal::zero(),
            total_cost: total.map(Decimal::from),
        }
    }

    #[test]
    fn test_best_deal_picks_lowest_total() {
        let cmp = MarketComparison {
            commodity_id: CommodityId::new(1),
            entries: vec![entry(1, Some(900)), entry(2, None), entry(3, Some(850)), entry(4, Some(850))],
        };
        assert_eq!(cmp.best_deal().unwrap().market_id, MarketId::new(3));
    }

    #[test]
    fn test_best_deal_none_without_prices() {
        let cmp = MarketComparison {
            commodity_id: CommodityId::new(1),
            entries: vec![entry(1, None), entry(2, None)],
        };
        assert!(cmp.best_deal().is_none());
    }

    fn market(id: i64, name: &str) -> Market {
        Market::new(MarketId::new(id), name, "Lagos", "Ikeja", GeoPoint::new(6.5, 3.3))
    }

    fn price(market: i64, amount: i64, day: u32) -> PriceObservation {
        PriceObservation {
            id: ObservationId::generate(),
            commodity_id: CommodityId::new(1),
            market_id: MarketId::new(market),
            price_per_unit: Decimal::from(amount),
            quality_grade: QualityGrade::Standard,
            reported_by: UserId::new(1),
            reported_at: Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap(),
            verified: true,
        }
    }

    #[test]
    fn test_rank_markets_cheapest_first() {
        let catalog = Catalog::new(
            vec![],
            vec![market(1, "Mile 12"), market(2, "Dawanau"), market(3, "Bodija"), market(4, "Wuse")],
        );
        let store = PriceStore::new(vec![
            price(1, 90_000, 1),
            price(1, 85_000, 2),
            price(2, 78_000, 2),
            price(4, 85_000, 2),
        ]);
        let engine = PriceQueryEngine::new(&catalog, &store);
        let ranked = rank_markets(&catalog, &engine, CommodityId::new(1));

        let ids: Vec<MarketId> = ranked.iter().map(|r| r.market.id).collect();
        // Bodija has no price; Mile 12 and Wuse tie and keep catalog order.
        assert_eq!(ids, vec![MarketId::new(2), MarketId::new(1), MarketId::new(4)]);
        assert_eq!(ranked[0].premium_over_cheapest, Decimal::zero());
        assert_eq!(ranked[1].price, Decimal::from(85_000));
        assert_eq!(ranked[1].premium_over_cheapest, Decimal::from(7_000));
        assert_eq!(ranked[2].premium_over_cheapest, Decimal::from(7_000));
    }

    #[test]
    fn test_rank_markets_empty_without_prices() {
        let catalog = Catalog::new(vec![], vec![market(1, "Mile 12")]);
        let store = PriceStore::default();
        let engine = PriceQueryEngine::new(&catalog, &store);
        assert!(rank_markets(&catalog, &engine, CommodityId::new(1)).is_empty());
    }

    #[test]
    fn test_total_cost_overflow_is_none() {
        let a = market(1, "Mile 12");
        let b = Market::new(MarketId::new(2), "Dawanau", "Kano", "Dawakin Tofa", GeoPoint::new(12.09, 8.44));
        let catalog = Catalog::new(vec![], vec![a.clone(), b]);
        let huge = Decimal::from_str_canonical("79228162514264337593543950000").unwrap();
        let mut obs = price(2, 1, 2);
        obs.price_per_unit = huge;
        let store = PriceStore::new(vec![obs]);
        let engine = PriceQueryEngine::new(&catalog, &store);
        let cmp = compare_markets(
            &engine,
            &TransportCostEstimator::default(),
            CommodityId::new(1),
            &[MarketId::new(2)],
            Some(&a),
        );
        assert_eq!(cmp.entries[0].price, Some(huge));
        assert!(cmp.entries[0].total_cost.is_none());
        assert!(cmp.best_deal().is_none());
    }
}
