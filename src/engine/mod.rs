//! Pure computation over the in-memory catalog and price store.

pub mod comparison;
pub mod dashboard;
pub mod distance;
pub mod finder;
pub mod queries;
pub mod transport;

pub use comparison::{compare_markets, rank_markets, LandedCost, MarketComparison, RankedMarket};
pub use dashboard::{price_cards, DashboardFilter, PriceCard};
pub use distance::{distance_km, haversine_km, EARTH_RADIUS_KM};
pub use finder::{find_markets, MarketFilter, MarketSummary};
pub use queries::{
    ComparisonEntry, Direction, PriceChange, PriceQueryEngine, TrendPoint, DEFAULT_TREND_DAYS,
};
pub use transport::{TransportCostEstimator, DEFAULT_RATE_PER_KM};
