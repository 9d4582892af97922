//! Transport cost estimate between markets.

use super::distance::distance_km;
use crate::domain::{Decimal, Market};
use tracing::warn;

/// Reference haulage rate in currency units per kilometre.
pub const DEFAULT_RATE_PER_KM: i64 = 150;

/// Flat per-kilometre cost model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportCostEstimator {
    rate_per_km: Decimal,
}

impl TransportCostEstimator {
    pub fn new(rate_per_km: Decimal) -> Self {
        Self { rate_per_km }
    }

    pub fn rate_per_km(&self) -> Decimal {
        self.rate_per_km
    }

    /// Estimated cost of moving goods from one market to another, to 2 decimal places.
    ///
    /// Zero when either market is absent or the cost does not fit in a `Decimal`.
    pub fn cost(&self, from: Option<&Market>, to: Option<&Market>) -> Decimal {
        let (Some(from), Some(to)) = (from, to) else {
            return Decimal::zero();
        };
        let km = distance_km(from.location(), to.location());
        let Some(km) = Decimal::from_f64(km) else {
            warn!(from = %from.id, to = %to.id, "Non-finite distance between markets");
            return Decimal::zero();
        };
        match km.checked_mul(self.rate_per_km) {
            Some(cost) => cost.round_dp(2),
            None => {
                warn!(from = %from.id, to = %to.id, rate_per_km = %self.rate_per_km, "Transport cost overflowed");
                Decimal::zero()
            }
        }
    }
}

impl Default for TransportCostEstimator {
    fn default() -> Self {
        Self::new(Decimal::from(DEFAULT_RATE_PER_KM))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GeoPoint, MarketId};

    fn market(id: i64, lat: f64, lng: f64) -> Market {
        Market::new(MarketId::new(id), format!("M{}", id), "Lagos", "Ikeja", GeoPoint::new(lat, lng))
    }

    #[test]
    fn test_absent_market_costs_nothing() {
        let estimator = TransportCostEstimator::default();
        let m = market(1, 6.5, 3.3);
        assert_eq!(estimator.cost(None, Some(&m)), Decimal::zero());
        assert_eq!(estimator.cost(Some(&m), None), Decimal::zero());
        assert_eq!(estimator.cost(None, None), Decimal::zero());
    }

    #[test]
    fn test_same_market_costs_nothing() {
        let m = market(1, 6.5, 3.3);
        assert_eq!(TransportCostEstimator::default().cost(Some(&m), Some(&m)), Decimal::zero());
    }

    #[test]
    fn test_cost_scales_with_rate() {
        let a = market(1, 0.0, 0.0);
        let b = market(2, 1.0, 0.0);
        let base = TransportCostEstimator::new(Decimal::from(150)).cost(Some(&a), Some(&b));
        let double = TransportCostEstimator::new(Decimal::from(300)).cost(Some(&a), Some(&b));
        // One degree of latitude is ~111.19 km.
        assert!(base > Decimal::from(16_670) && base < Decimal::from(16_690), "got {}", base);
        let cent = Decimal::from_str_canonical("0.01").unwrap();
        let diff = base * Decimal::from(2) - double;
        assert!(diff <= cent && diff >= Decimal::zero() - cent, "diff {}", diff);
    }

    #[test]
    fn test_overflowing_rate_costs_nothing() {
        let a = market(1, 6.6, 3.4);
        let b = market(2, 12.0, 8.5);
        let rate = Decimal::from_str_canonical("70000000000000000000000000000").unwrap();
        assert_eq!(TransportCostEstimator::new(rate).cost(Some(&a), Some(&b)), Decimal::zero());
    }
}
