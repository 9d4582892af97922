//! Seed data sources: the static collections a session starts from.

use crate::domain::{Commodity, Market, PriceObservation, User};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub mod fixture;
pub mod generator;
pub mod mock;

pub use fixture::{BundledSource, FixtureSource};
pub use generator::HistoryGenerator;
pub use mock::MockSeedSource;

/// Everything a session is seeded with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedData {
    pub commodities: Vec<Commodity>,
    pub markets: Vec<Market>,
    pub users: Vec<User>,
    #[serde(default)]
    pub prices: Vec<PriceObservation>,
}

impl SeedData {
    /// Check id uniqueness, phone uniqueness, and that every price is positive
    /// and references a known commodity and market.
    pub fn validate(&self) -> Result<(), DataSourceError> {
        let mut commodity_ids = HashSet::new();
        for c in &self.commodities {
            if !commodity_ids.insert(c.id) {
                return Err(DataSourceError::Invalid(format!("duplicate commodity id {}", c.id)));
            }
        }

        let mut market_ids = HashSet::new();
        for m in &self.markets {
            if !market_ids.insert(m.id) {
                return Err(DataSourceError::Invalid(format!("duplicate market id {}", m.id)));
            }
            if !m.lat.is_finite() || !m.lng.is_finite() {
                return Err(DataSourceError::Invalid(format!(
                    "market {} has non-finite coordinates",
                    m.id
                )));
            }
        }

        let mut user_ids = HashSet::new();
        let mut phones = HashSet::new();
        for u in &self.users {
            if !user_ids.insert(u.id) {
                return Err(DataSourceError::Invalid(format!("duplicate user id {}", u.id)));
            }
            if !phones.insert(u.phone.as_str()) {
                return Err(DataSourceError::Invalid(format!("duplicate phone {}", u.phone)));
            }
        }

        for p in &self.prices {
            if !p.price_per_unit.is_positive() {
                return Err(DataSourceError::Invalid(format!(
                    "price {} must be positive, got {}",
                    p.id, p.price_per_unit
                )));
            }
            if !commodity_ids.contains(&p.commodity_id) {
                return Err(DataSourceError::Invalid(format!(
                    "price {} references unknown commodity {}",
                    p.id, p.commodity_id
                )));
            }
            if !market_ids.contains(&p.market_id) {
                return Err(DataSourceError::Invalid(format!(
                    "price {} references unknown market {}",
                    p.id, p.market_id
                )));
            }
        }

        Ok(())
    }
}

/// Source of seed data.
pub trait SeedSource: fmt::Debug {
    /// Load the seed collections. Prices may be empty, in which case callers
    /// generate a synthetic history.
    fn load(&self) -> Result<SeedData, DataSourceError>;
}

/// Error type for seed loading.
#[derive(Debug, Clone)]
pub enum DataSourceError {
    /// File could not be read
    Io(String),
    /// Malformed JSON fixture
    Parse(String),
    /// Malformed CSV price history
    Csv(String),
    /// Well-formed but inconsistent data (duplicate ids, dangling references)
    Invalid(String),
}

impl fmt::Display for DataSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSourceError::Io(msg) => write!(f, "I/O error: {}", msg),
            DataSourceError::Parse(msg) => write!(f, "Parse error: {}", msg),
            DataSourceError::Csv(msg) => write!(f, "CSV error: {}", msg),
            DataSourceError::Invalid(msg) => write!(f, "Invalid seed data: {}", msg),
        }
    }
}

impl std::error::Error for DataSourceError {}
