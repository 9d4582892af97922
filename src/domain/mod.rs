//! Domain types for the commodity price catalog.
//!
//! This module provides:
//! - Lossless numeric handling via the Decimal wrapper
//! - Identifiers and the geographic point
//! - Catalog entities (Commodity, Market), price observations and users

pub mod commodity;
pub mod decimal;
pub mod market;
pub mod observation;
pub mod primitives;
pub mod user;

pub use commodity::Commodity;
pub use decimal::Decimal;
pub use market::Market;
pub use observation::{PriceObservation, PriceReport, QualityGrade};
pub use primitives::{CommodityId, GeoPoint, MarketId, ObservationId, UserId};
pub use user::{NewUser, Role, User};
