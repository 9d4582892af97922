//! Commodity catalog entry.

use crate::domain::{CommodityId, Decimal};
use serde::{Deserialize, Serialize};

/// Reference price used when a fixture does not name one.
pub const DEFAULT_BASE_PRICE: i64 = 70_000;

/// An agricultural good tracked for price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commodity {
    pub id: CommodityId,
    pub name: String,
    /// Trading unit the price refers to (e.g. "50kg bag").
    pub unit: String,
    /// Lowercase category label (e.g. "grains").
    pub category: String,
    /// Price the synthetic history generator varies around.
    #[serde(default = "default_base_price")]
    pub base_price: Decimal,
}

fn default_base_price() -> Decimal {
    Decimal::from(DEFAULT_BASE_PRICE)
}

impl Commodity {
    pub fn new(
        id: CommodityId,
        name: impl Into<String>,
        unit: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            unit: unit.into(),
            category: category.into(),
            base_price: default_base_price(),
        }
    }

    pub fn with_base_price(mut self, base_price: Decimal) -> Self {
        self.base_price = base_price;
        self
    }

    /// Case-insensitive category comparison.
    pub fn in_category(&self, category: &str) -> bool {
        self.category.eq_ignore_ascii_case(category)
    }
}
