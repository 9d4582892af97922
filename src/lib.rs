pub mod app;
pub mod config;
pub mod datasource;
pub mod domain;
pub mod engine;
pub mod error;
pub mod session;
pub mod store;
pub mod validation;

pub use app::{AppState, SUBMIT_SUCCESS_MESSAGE};
pub use config::Config;
pub use datasource::{
    BundledSource, DataSourceError, FixtureSource, HistoryGenerator, MockSeedSource, SeedData,
    SeedSource,
};
pub use domain::{
    Commodity, CommodityId, Decimal, GeoPoint, Market, MarketId, NewUser, ObservationId,
    PriceObservation, PriceReport, QualityGrade, Role, User, UserId,
};
pub use engine::{Direction, PriceChange, TrendPoint};
pub use error::AppError;
pub use session::{ActionOutcome, Session, SessionError};
