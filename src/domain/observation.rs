//! Price observation reported for a commodity at a market.

use crate::domain::{CommodityId, Decimal, MarketId, ObservationId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Quality grade of the goods a price refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityGrade {
    Premium,
    Standard,
    Low,
}

impl QualityGrade {
    pub const ALL: [QualityGrade; 3] = [
        QualityGrade::Premium,
        QualityGrade::Standard,
        QualityGrade::Low,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityGrade::Premium => "premium",
            QualityGrade::Standard => "standard",
            QualityGrade::Low => "low",
        }
    }
}

impl fmt::Display for QualityGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QualityGrade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "premium" => Ok(QualityGrade::Premium),
            "standard" => Ok(QualityGrade::Standard),
            "low" => Ok(QualityGrade::Low),
            other => Err(format!("unknown quality grade: {}", other)),
        }
    }
}

/// A single reported price. Never mutated once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceObservation {
    pub id: ObservationId,
    pub commodity_id: CommodityId,
    pub market_id: MarketId,
    pub price_per_unit: Decimal,
    pub quality_grade: QualityGrade,
    pub reported_by: UserId,
    pub reported_at: DateTime<Utc>,
    pub verified: bool,
}

impl PriceObservation {
    pub fn matches(&self, commodity_id: CommodityId, market_id: MarketId) -> bool {
        self.commodity_id == commodity_id && self.market_id == market_id
    }
}

/// The fields a reporter supplies when submitting a price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceReport {
    pub commodity_id: CommodityId,
    pub market_id: MarketId,
    pub price_per_unit: Decimal,
    pub quality_grade: QualityGrade,
}

impl PriceReport {
    /// Stamp the report into an unverified observation.
    pub fn into_observation(
        self,
        reported_by: UserId,
        reported_at: DateTime<Utc>,
    ) -> PriceObservation {
        PriceObservation {
            id: ObservationId::generate(),
            commodity_id: self.commodity_id,
            market_id: self.market_id,
            price_per_unit: self.price_per_unit,
            quality_grade: self.quality_grade,
            reported_by,
            reported_at,
            verified: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_grade_serialization() {
        let json = serde_json::to_string(&QualityGrade::Premium).unwrap();
        assert_eq!(json, "\"premium\"");
        let grade: QualityGrade = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(grade, QualityGrade::Low);
    }

    #[test]
    fn test_quality_grade_from_str() {
        assert_eq!("Standard".parse::<QualityGrade>(), Ok(QualityGrade::Standard));
        assert!("excellent".parse::<QualityGrade>().is_err());
    }

    #[test]
    fn test_report_becomes_unverified_observation() {
        let report = PriceReport {
            commodity_id: CommodityId::new(1),
            market_id: MarketId::new(2),
            price_per_unit: Decimal::from(85_000),
            quality_grade: QualityGrade::Standard,
        };
        let at = Utc::now();
        let obs = report.into_observation(UserId::new(4), at);
        assert!(!obs.verified);
        assert_eq!(obs.reported_by, UserId::new(4));
        assert_eq!(obs.reported_at, at);
        assert!(obs.matches(CommodityId::new(1), MarketId::new(2)));
    }
}
