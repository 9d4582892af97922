use crate::config::ConfigError;
use crate::datasource::DataSourceError;
use crate::session::SessionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Seed data error: {0}")]
    Seed(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<DataSourceError> for AppError {
    fn from(err: DataSourceError) -> Self {
        AppError::Seed(err.to_string())
    }
}
