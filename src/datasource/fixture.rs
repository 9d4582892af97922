//! File-backed seed sources: a JSON catalog plus an optional CSV price history.

use super::{DataSourceError, SeedData, SeedSource};
use crate::domain::{
    CommodityId, Decimal, MarketId, ObservationId, PriceObservation, QualityGrade, UserId,
};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tracing::info;
use uuid::Uuid;

const BUNDLED_SEED: &str = include_str!("../../fixtures/seed.json");

/// Seed data read from disk.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    seed_path: PathBuf,
    prices_path: Option<PathBuf>,
}

impl FixtureSource {
    pub fn new(seed_path: impl Into<PathBuf>) -> Self {
        Self {
            seed_path: seed_path.into(),
            prices_path: None,
        }
    }

    /// Also read observations from a CSV file, appended after any in the JSON.
    pub fn with_prices(mut self, prices_path: impl Into<PathBuf>) -> Self {
        self.prices_path = Some(prices_path.into());
        self
    }
}

impl SeedSource for FixtureSource {
    fn load(&self) -> Result<SeedData, DataSourceError> {
        let json = std::fs::read_to_string(&self.seed_path).map_err(|e| {
            DataSourceError::Io(format!("{}: {}", self.seed_path.display(), e))
        })?;
        let mut seed = parse_seed_json(&json)?;

        if let Some(path) = &self.prices_path {
            let bytes = std::fs::read(path)
                .map_err(|e| DataSourceError::Io(format!("{}: {}", path.display(), e)))?;
            let prices = parse_prices_csv(&bytes)?;
            info!(path = %path.display(), count = prices.len(), "Loaded price history");
            seed.prices.extend(prices);
        }

        Ok(seed)
    }
}

/// The catalog and demo users compiled into the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledSource;

impl SeedSource for BundledSource {
    fn load(&self) -> Result<SeedData, DataSourceError> {
        parse_seed_json(BUNDLED_SEED)
    }
}

pub fn parse_seed_json(json: &str) -> Result<SeedData, DataSourceError> {
    serde_json::from_str(json).map_err(|e| DataSourceError::Parse(e.to_string()))
}

/// Parse observations from CSV with a header row.
///
/// Columns: `id` (optional UUID), `commodity_id`, `market_id`, `price_per_unit`,
/// `quality_grade`, `reported_by`, `reported_at` (RFC 3339), `verified`.
pub fn parse_prices_csv(csv_bytes: &[u8]) -> Result<Vec<PriceObservation>, DataSourceError> {
    #[derive(Debug, serde::Deserialize)]
    struct Row {
        id: Option<String>,
        commodity_id: i64,
        market_id: i64,
        price_per_unit: String,
        quality_grade: String,
        reported_by: i64,
        reported_at: String,
        verified: bool,
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(csv_bytes);

    let mut prices = Vec::new();
    for record in reader.deserialize::<Row>() {
        let row = record.map_err(|e| DataSourceError::Csv(e.to_string()))?;

        let id = match row.id.as_deref().filter(|s| !s.is_empty()) {
            Some(raw) => Uuid::parse_str(raw)
                .map(ObservationId)
                .map_err(|e| DataSourceError::Csv(format!("invalid id {}: {}", raw, e)))?,
            None => ObservationId::generate(),
        };
        let price_per_unit = Decimal::from_str_canonical(&row.price_per_unit)
            .map_err(|e| DataSourceError::Csv(format!("invalid price_per_unit: {}", e)))?;
        let quality_grade = row
            .quality_grade
            .parse::<QualityGrade>()
            .map_err(DataSourceError::Csv)?;
        let reported_at = DateTime::parse_from_rfc3339(&row.reported_at)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| DataSourceError::Csv(format!("invalid reported_at: {}", e)))?;

        prices.push(PriceObservation {
            id,
            commodity_id: CommodityId::new(row.commodity_id),
            market_id: MarketId::new(row.market_id),
            price_per_unit,
            quality_grade,
            reported_by: UserId::new(row.reported_by),
            reported_at,
            verified: row.verified,
        });
    }

    Ok(prices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_seed_is_consistent() {
        let seed = BundledSource.load().unwrap();
        assert!(!seed.commodities.is_empty());
        assert!(!seed.markets.is_empty());
        assert!(seed
            .users
            .iter()
            .any(|u| u.role == crate::domain::Role::Reporter));
        seed.validate().unwrap();
    }

    #[test]
    fn test_parse_prices_csv() {
        let csv = "\
id,commodity_id,market_id,price_per_unit,quality_grade,reported_by,reported_at,verified
6f1c1a3e-8b0e-4a5e-9a57-0b6a0d1e2f3c,1,2,85000,premium,3,2024-03-01T09:30:00Z,true
,2,2,51000.50,Standard,3,2024-03-01T10:00:00+01:00,false
";
        let prices = parse_prices_csv(csv.as_bytes()).unwrap();
        assert_eq!(prices.len(), 2);
        assert_eq!(
            prices[0].id.to_string(),
            "6f1c1a3e-8b0e-4a5e-9a57-0b6a0d1e2f3c"
        );
        assert_eq!(prices[0].quality_grade, QualityGrade::Premium);
        assert!(prices[0].verified);
        assert_eq!(
            prices[1].price_per_unit,
            Decimal::from_str_canonical("51000.5").unwrap()
        );
        assert_eq!(prices[1].reported_at.to_rfc3339(), "2024-03-01T09:00:00+00:00");
        assert!(!prices[1].verified);
    }

    #[test]
    fn test_parse_prices_csv_rejects_bad_grade() {
        let csv = "\
id,commodity_id,market_id,price_per_unit,quality_grade,reported_by,reported_at,verified
,1,2,85000,excellent,3,2024-03-01T09:30:00Z,true
";
        match parse_prices_csv(csv.as_bytes()) {
            Err(DataSourceError::Csv(msg)) => assert!(msg.contains("excellent")),
            other => panic!("Expected Csv error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_positive_csv_price_fails_validation() {
        let csv = "\
id,commodity_id,market_id,price_per_unit,quality_grade,reported_by,reported_at,verified
,1,2,0,low,3,2024-03-01T09:30:00Z,true
";
        let mut seed = BundledSource.load().unwrap();
        seed.prices = parse_prices_csv(csv.as_bytes()).unwrap();
        match seed.validate() {
            Err(DataSourceError::Invalid(msg)) => assert!(msg.contains("must be positive")),
            other => panic!("Expected Invalid error, got {:?}", other),
        }
    }
}
