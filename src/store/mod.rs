//! In-memory state containers: catalog, price store, user directory.

pub mod catalog;
pub mod prices;
pub mod users;

pub use catalog::Catalog;
pub use prices::PriceStore;
pub use users::UserDirectory;
