//! Application state: the single owner of catalog, prices, users and session.
//!
//! UI event handlers hold an `AppState` and call its methods; there are no
//! globals. Queries borrow the state, mutations take `&mut self`.

use crate::config::Config;
use crate::datasource::{HistoryGenerator, SeedData, SeedSource};
use crate::domain::{
    CommodityId, Decimal, Market, MarketId, NewUser, PriceObservation, PriceReport, User, UserId,
};
use crate::engine::{
    compare_markets, find_markets, price_cards, rank_markets, ComparisonEntry, DashboardFilter,
    MarketComparison, MarketFilter, MarketSummary, PriceCard, PriceChange, PriceQueryEngine,
    RankedMarket, TransportCostEstimator, TrendPoint,
};
use crate::error::AppError;
use crate::session::{Session, SessionError};
use crate::store::{Catalog, PriceStore, UserDirectory};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

/// Message shown after a successful price submission.
pub const SUBMIT_SUCCESS_MESSAGE: &str = "Price submitted successfully!";

#[derive(Debug, Clone)]
pub struct AppState {
    config: Config,
    catalog: Catalog,
    prices: PriceStore,
    users: UserDirectory,
    session: Session,
    transport: TransportCostEstimator,
}

impl AppState {
    /// Build state from validated seed data.
    pub fn from_seed(seed: SeedData, config: Config) -> Result<Self, AppError> {
        seed.validate()?;

        let catalog = Catalog::new(seed.commodities, seed.markets);
        for (key, id) in [
            ("ORIGIN_MARKET_ID", config.origin_market_id),
            ("FEATURED_MARKET_ID", config.featured_market_id),
        ] {
            if let Some(id) = id {
                if catalog.market(id).is_none() {
                    return Err(AppError::NotFound(format!("{} {} is not a known market", key, id)));
                }
            }
        }

        Ok(Self {
            transport: TransportCostEstimator::new(config.transport_rate_per_km),
            catalog,
            prices: PriceStore::new(seed.prices),
            users: UserDirectory::new(seed.users),
            session: Session::new(),
            config,
        })
    }

    /// Load seed data and, when it carries no prices, generate a synthetic
    /// history ending at `now` from the configured RNG seed.
    pub fn bootstrap(
        source: &dyn SeedSource,
        config: Config,
        now: DateTime<Utc>,
    ) -> Result<Self, AppError> {
        let mut seed = source.load()?;
        if seed.prices.is_empty() {
            let reporters: Vec<UserId> = seed.users.iter().map(|u| u.id).collect();
            seed.prices = HistoryGenerator::from_seed_u64(config.rng_seed, config.history_days)
                .generate(&seed.commodities, &seed.markets, &reporters, now);
        }
        let state = Self::from_seed(seed, config)?;
        info!(
            commodities = state.catalog.commodities().len(),
            markets = state.catalog.markets().len(),
            users = state.users.len(),
            prices = state.prices.len(),
            "Application state seeded"
        );
        Ok(state)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn prices(&self) -> &PriceStore {
        &self.prices
    }

    pub fn users(&self) -> &UserDirectory {
        &self.users
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.current_user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn queries(&self) -> PriceQueryEngine<'_> {
        PriceQueryEngine::new(&self.catalog, &self.prices)
    }

    /// The market treated as the user's location.
    pub fn origin_market(&self) -> Option<&Market> {
        match self.config.origin_market_id {
            Some(id) => self.catalog.market(id),
            None => self.catalog.default_market(),
        }
    }

    /// The market the dashboard reports on.
    pub fn featured_market(&self) -> Option<&Market> {
        match self.config.featured_market_id {
            Some(id) => self.catalog.market(id),
            None => self.catalog.default_market(),
        }
    }

    // Queries

    pub fn latest_price(
        &self,
        commodity_id: CommodityId,
        market_id: MarketId,
    ) -> Option<&PriceObservation> {
        self.queries().latest_price(commodity_id, market_id)
    }

    pub fn price_change(&self, commodity_id: CommodityId, market_id: MarketId) -> PriceChange {
        self.queries().price_change(commodity_id, market_id)
    }

    pub fn price_trend(
        &self,
        commodity_id: CommodityId,
        market_id: MarketId,
        days: usize,
    ) -> Vec<TrendPoint> {
        self.queries().price_trend(commodity_id, market_id, days)
    }

    /// Trend over the configured default number of days.
    pub fn default_price_trend(
        &self,
        commodity_id: CommodityId,
        market_id: MarketId,
    ) -> Vec<TrendPoint> {
        self.price_trend(commodity_id, market_id, self.config.trend_days)
    }

    pub fn market_comparison(
        &self,
        commodity_id: CommodityId,
        market_ids: &[MarketId],
    ) -> Vec<ComparisonEntry<'_>> {
        self.queries().market_comparison(commodity_id, market_ids)
    }

    pub fn transport_cost(&self, from: Option<&Market>, to: Option<&Market>) -> Decimal {
        self.transport.cost(from, to)
    }

    /// Side-by-side comparison with transport to the origin market.
    pub fn compare_markets(
        &self,
        commodity_id: CommodityId,
        market_ids: &[MarketId],
    ) -> MarketComparison<'_> {
        compare_markets(
            &self.queries(),
            &self.transport,
            commodity_id,
            market_ids,
            self.origin_market(),
        )
    }

    /// All markets with a price for the commodity, cheapest first.
    pub fn rank_markets(&self, commodity_id: CommodityId) -> Vec<RankedMarket<'_>> {
        rank_markets(&self.catalog, &self.queries(), commodity_id)
    }

    pub fn find_markets(&self, filter: &MarketFilter) -> Vec<MarketSummary<'_>> {
        find_markets(&self.catalog, &self.prices, filter, self.origin_market())
    }

    pub fn dashboard(&self, filter: &DashboardFilter) -> Vec<PriceCard<'_>> {
        match self.featured_market() {
            Some(market) => price_cards(&self.catalog, &self.queries(), market, filter),
            None => Vec::new(),
        }
    }

    // Session actions

    pub fn login(&mut self, phone: &str, password: &str) -> Result<&User, SessionError> {
        self.session.login(&self.users, phone, password)
    }

    pub fn register(&mut self, new_user: NewUser) -> Result<&User, SessionError> {
        self.session.register(&mut self.users, new_user)
    }

    pub fn logout(&mut self) {
        self.session.logout();
    }

    /// Record a price from the signed-in reporter, timestamped now.
    pub fn submit_price(&mut self, report: PriceReport) -> Result<&PriceObservation, SessionError> {
        self.submit_price_at(report, Utc::now())
    }

    /// Record a price from the signed-in reporter at an explicit instant.
    ///
    /// Authentication and role are checked before the store is touched. Ids
    /// must reference the catalog; other fields are taken as given.
    pub fn submit_price_at(
        &mut self,
        report: PriceReport,
        reported_at: DateTime<Utc>,
    ) -> Result<&PriceObservation, SessionError> {
        let reporter = match self.session.authorize_report() {
            Ok(user) => user.id,
            Err(err) => {
                warn!(error = %err, "Price submission rejected");
                return Err(err);
            }
        };
        if self.catalog.commodity(report.commodity_id).is_none() {
            return Err(SessionError::UnknownCommodity(report.commodity_id));
        }
        if self.catalog.market(report.market_id).is_none() {
            return Err(SessionError::UnknownMarket(report.market_id));
        }

        let observation = report.into_observation(reporter, reported_at);
        info!(
            id = %observation.id,
            commodity_id = %observation.commodity_id,
            market_id = %observation.market_id,
            price = %observation.price_per_unit,
            reported_by = %reporter,
            "Price submitted"
        );
        Ok(self.prices.append(observation))
    }
}
