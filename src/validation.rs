//! Form checks that run before the session entry points.
//!
//! The session layer trusts its inputs; these helpers produce the per-field
//! messages a form shows.

use crate::domain::{CommodityId, Decimal, MarketId, NewUser, PriceReport, QualityGrade, Role};
use serde::Serialize;

/// Lowest price a reporter may submit.
pub const MIN_REPORTED_PRICE: i64 = 1_000;
pub const MIN_NAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_COMPARED_MARKETS: usize = 2;
pub const MAX_COMPARED_MARKETS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Raw registration form input.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub full_name: String,
    pub phone: String,
    pub password: String,
    pub role: Option<Role>,
}

impl RegistrationForm {
    pub fn validate(self) -> Result<NewUser, Vec<FieldError>> {
        let mut errors = Vec::new();
        let name = self.full_name.trim();
        if name.chars().count() < MIN_NAME_LEN {
            errors.push(FieldError::new("full_name", "Name must be at least 3 characters"));
        }
        if !is_nigerian_mobile(&self.phone) {
            errors.push(FieldError::new("phone", "Enter a valid Nigerian phone number"));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(FieldError::new("password", "Password must be at least 6 characters"));
        }
        if self.role.is_none() {
            errors.push(FieldError::new("role", "Please select your role"));
        }

        match (errors.is_empty(), self.role) {
            (true, Some(role)) => Ok(NewUser {
                name: name.to_string(),
                phone: self.phone,
                password: self.password,
                role,
            }),
            _ => Err(errors),
        }
    }
}

/// `0[789][01]` followed by eight digits, e.g. 08031234567.
pub fn is_nigerian_mobile(phone: &str) -> bool {
    let bytes = phone.as_bytes();
    bytes.len() == 11
        && bytes.iter().all(u8::is_ascii_digit)
        && bytes[0] == b'0'
        && matches!(bytes[1], b'7' | b'8' | b'9')
        && matches!(bytes[2], b'0' | b'1')
}

/// Raw price submission form input.
#[derive(Debug, Clone, Default)]
pub struct PriceForm {
    pub commodity_id: Option<CommodityId>,
    pub market_id: Option<MarketId>,
    pub price_per_unit: Option<Decimal>,
    pub quality_grade: Option<QualityGrade>,
}

impl PriceForm {
    pub fn validate(self) -> Result<PriceReport, Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.commodity_id.is_none() {
            errors.push(FieldError::new("commodity_id", "Please select a commodity"));
        }
        if self.market_id.is_none() {
            errors.push(FieldError::new("market_id", "Please select a market"));
        }
        let price_ok = self
            .price_per_unit
            .map_or(false, |p| p >= Decimal::from(MIN_REPORTED_PRICE));
        if !price_ok {
            errors.push(FieldError::new(
                "price_per_unit",
                "Enter a valid price (minimum ₦1,000)",
            ));
        }
        if self.quality_grade.is_none() {
            errors.push(FieldError::new("quality_grade", "Please select a quality grade"));
        }

        match (self.commodity_id, self.market_id, self.price_per_unit, self.quality_grade) {
            (Some(commodity_id), Some(market_id), Some(price_per_unit), Some(quality_grade))
                if errors.is_empty() =>
            {
                Ok(PriceReport {
                    commodity_id,
                    market_id,
                    price_per_unit,
                    quality_grade,
                })
            }
            _ => Err(errors),
        }
    }
}

/// A comparison needs between two and four distinct markets.
pub fn validate_comparison_selection(market_ids: &[MarketId]) -> Result<(), FieldError> {
    let mut distinct = market_ids.to_vec();
    distinct.sort_unstable();
    distinct.dedup();
    if distinct.len() < MIN_COMPARED_MARKETS {
        return Err(FieldError::new("markets", "Select at least 2 markets to compare"));
    }
    if distinct.len() > MAX_COMPARED_MARKETS {
        return Err(FieldError::new("markets", "You can compare at most 4 markets"));
    }
    Ok(())
}
