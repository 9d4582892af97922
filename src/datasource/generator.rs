//! Reproducible synthetic price history.
//!
//! All randomness comes from a `ChaCha8Rng`, so identical seeds produce
//! identical histories (ids included).

use crate::domain::{Commodity, Decimal, Market, ObservationId, PriceObservation, QualityGrade, UserId};
use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

/// Prices vary uniformly within this fraction around the base price (±5%).
const VARIANCE_SPAN: f64 = 0.1;
/// Share of generated observations marked verified.
const VERIFIED_SHARE: f64 = 0.8;

pub struct HistoryGenerator {
    rng: ChaCha8Rng,
    days: u32,
}

impl HistoryGenerator {
    pub fn from_seed_u64(seed: u64, days: u32) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            days,
        }
    }

    /// One observation per day from `days` days ago through `now`, for one pair.
    pub fn history_for(
        &mut self,
        commodity: &Commodity,
        market: &Market,
        reporters: &[UserId],
        now: DateTime<Utc>,
    ) -> Vec<PriceObservation> {
        let mut history = Vec::with_capacity(self.days as usize + 1);
        for days_ago in (0..=self.days).rev() {
            let Some(&reported_by) = reporters.choose(&mut self.rng) else {
                return history;
            };
            let factor = 1.0 + (self.rng.gen::<f64>() - 0.5) * VARIANCE_SPAN;
            let factor = Decimal::from_f64(factor).unwrap_or_else(|| Decimal::from(1));
            let quality_grade = *QualityGrade::ALL
                .choose(&mut self.rng)
                .unwrap_or(&QualityGrade::Standard);

            history.push(PriceObservation {
                id: ObservationId::from_random_bytes(self.rng.gen()),
                commodity_id: commodity.id,
                market_id: market.id,
                price_per_unit: (commodity.base_price * factor).round_dp(0),
                quality_grade,
                reported_by,
                reported_at: now - Duration::days(i64::from(days_ago)),
                verified: self.rng.gen::<f64>() < VERIFIED_SHARE,
            });
        }
        history
    }

    /// Histories for every commodity × market pair, commodity-major.
    pub fn generate(
        &mut self,
        commodities: &[Commodity],
        markets: &[Market],
        reporters: &[UserId],
        now: DateTime<Utc>,
    ) -> Vec<PriceObservation> {
        if reporters.is_empty() {
            warn!("No users to attribute generated prices to; skipping history");
            return Vec::new();
        }
        let mut prices = Vec::new();
        for commodity in commodities {
            for market in markets {
                prices.extend(self.history_for(commodity, market, reporters, now));
            }
        }
        debug!(count = prices.len(), days = self.days, "Generated price history");
        prices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CommodityId, GeoPoint, MarketId};
    use chrono::TimeZone;

    fn commodity() -> Commodity {
        Commodity::new(CommodityId::new(1), "Rice (Local)", "50kg bag", "grains")
            .with_base_price(Decimal::from(85_000))
    }

    fn market(id: i64) -> Market {
        Market::new(MarketId::new(id), "Mile 12", "Lagos", "Kosofe", GeoPoint::new(6.6, 3.4))
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_one_point_per_day_inclusive() {
        let mut gen = HistoryGenerator::from_seed_u64(7, 30);
        let history = gen.history_for(&commodity(), &market(1), &[UserId::new(1)], now());
        assert_eq!(history.len(), 31);
        assert_eq!(history[0].reported_at, now() - Duration::days(30));
        assert_eq!(history[30].reported_at, now());
    }

    #[test]
    fn test_prices_stay_within_five_percent() {
        let mut gen = HistoryGenerator::from_seed_u64(7, 60);
        let low = Decimal::from(80_750);
        let high = Decimal::from(89_250);
        for obs in gen.history_for(&commodity(), &market(1), &[UserId::new(1)], now()) {
            assert!(obs.price_per_unit >= low && obs.price_per_unit <= high);
            assert_eq!(obs.price_per_unit, obs.price_per_unit.round_dp(0));
        }
    }

    #[test]
    fn test_same_seed_same_history() {
        let commodities = vec![commodity()];
        let markets = vec![market(1), market(2)];
        let users = [UserId::new(1), UserId::new(2)];
        let a = HistoryGenerator::from_seed_u64(99, 30).generate(&commodities, &markets, &users, now());
        let b = HistoryGenerator::from_seed_u64(99, 30).generate(&commodities, &markets, &users, now());
        let c = HistoryGenerator::from_seed_u64(100, 30).generate(&commodities, &markets, &users, now());
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 62);
    }

    #[test]
    fn test_no_reporters_no_history() {
        let mut gen = HistoryGenerator::from_seed_u64(1, 30);
        assert!(gen.generate(&[commodity()], &[market(1)], &[], now()).is_empty());
    }
}
