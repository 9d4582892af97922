//! In-memory seed source for tests.

use super::{DataSourceError, SeedData, SeedSource};
use crate::domain::{Commodity, Market, PriceObservation, User};

/// Seed source that returns whatever it was built with.
#[derive(Debug, Clone, Default)]
pub struct MockSeedSource {
    data: SeedData,
}

impl MockSeedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_commodity(mut self, commodity: Commodity) -> Self {
        self.data.commodities.push(commodity);
        self
    }

    pub fn with_market(mut self, market: Market) -> Self {
        self.data.markets.push(market);
        self
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.data.users.push(user);
        self
    }

    pub fn with_price(mut self, price: PriceObservation) -> Self {
        self.data.prices.push(price);
        self
    }

    pub fn with_prices(mut self, prices: Vec<PriceObservation>) -> Self {
        self.data.prices.extend(prices);
        self
    }
}

impl SeedSource for MockSeedSource {
    fn load(&self) -> Result<SeedData, DataSourceError> {
        Ok(self.data.clone())
    }
}
