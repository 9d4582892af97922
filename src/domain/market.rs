//! Market catalog entry.

use crate::domain::{GeoPoint, MarketId};
use serde::{Deserialize, Serialize};

/// A physical trading location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    pub id: MarketId,
    pub name: String,
    pub state: String,
    /// Local government area.
    pub lga: String,
    pub lat: f64,
    pub lng: f64,
}

impl Market {
    pub fn new(
        id: MarketId,
        name: impl Into<String>,
        state: impl Into<String>,
        lga: impl Into<String>,
        location: GeoPoint,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            state: state.into(),
            lga: lga.into(),
            lat: location.lat,
            lng: location.lng,
        }
    }

    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}
