use crate::domain::{Decimal, MarketId};
use crate::engine::{DEFAULT_RATE_PER_KM, DEFAULT_TREND_DAYS};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_HISTORY_DAYS: u32 = 30;
pub const DEFAULT_RNG_SEED: u64 = 42;

#[derive(Debug, Clone)]
pub struct Config {
    pub transport_rate_per_km: Decimal,
    pub history_days: u32,
    pub rng_seed: u64,
    pub seed_file: Option<PathBuf>,
    pub prices_file: Option<PathBuf>,
    /// Market treated as the user's location; first catalog market when unset.
    pub origin_market_id: Option<MarketId>,
    /// Market shown on the dashboard; first catalog market when unset.
    pub featured_market_id: Option<MarketId>,
    pub trend_days: usize,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Default for Config {
    fn default() -> Self {
        Config {
            transport_rate_per_km: Decimal::from(DEFAULT_RATE_PER_KM),
            history_days: DEFAULT_HISTORY_DAYS,
            rng_seed: DEFAULT_RNG_SEED,
            seed_file: None,
            prices_file: None,
            origin_market_id: None,
            featured_market_id: None,
            trend_days: DEFAULT_TREND_DAYS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let transport_rate_per_km = match env_map.get("TRANSPORT_RATE_PER_KM") {
            Some(raw) => {
                let rate = Decimal::from_str_canonical(raw).map_err(|_| {
                    ConfigError::InvalidValue(
                        "TRANSPORT_RATE_PER_KM".to_string(),
                        "must be a decimal number".to_string(),
                    )
                })?;
                if rate.is_negative() {
                    return Err(ConfigError::InvalidValue(
                        "TRANSPORT_RATE_PER_KM".to_string(),
                        "must not be negative".to_string(),
                    ));
                }
                rate
            }
            None => Decimal::from(DEFAULT_RATE_PER_KM),
        };

        let history_days = parse_or(&env_map, "HISTORY_DAYS", DEFAULT_HISTORY_DAYS, "a valid u32")?;
        let rng_seed = parse_or(&env_map, "RNG_SEED", DEFAULT_RNG_SEED, "a valid u64")?;
        let trend_days = parse_or(&env_map, "TREND_DAYS", DEFAULT_TREND_DAYS, "a valid usize")?;

        let seed_file = env_map.get("SEED_FILE").map(PathBuf::from);
        let prices_file = env_map.get("PRICES_FILE").map(PathBuf::from);
        if prices_file.is_some() && seed_file.is_none() {
            return Err(ConfigError::MissingEnv("SEED_FILE".to_string()));
        }

        let origin_market_id = parse_market_id(&env_map, "ORIGIN_MARKET_ID")?;
        let featured_market_id = parse_market_id(&env_map, "FEATURED_MARKET_ID")?;

        Ok(Config {
            transport_rate_per_km,
            history_days,
            rng_seed,
            seed_file,
            prices_file,
            origin_market_id,
            featured_market_id,
            trend_days,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    env_map: &HashMap<String, String>,
    key: &str,
    default: T,
    expected: &str,
) -> Result<T, ConfigError> {
    match env_map.get(key) {
        Some(raw) => raw.trim().parse::<T>().map_err(|_| {
            ConfigError::InvalidValue(key.to_string(), format!("must be {}", expected))
        }),
        None => Ok(default),
    }
}

fn parse_market_id(
    env_map: &HashMap<String, String>,
    key: &str,
) -> Result<Option<MarketId>, ConfigError> {
    env_map
        .get(key)
        .map(|raw| {
            raw.trim().parse::<i64>().map(MarketId::new).map_err(|_| {
                ConfigError::InvalidValue(key.to_string(), "must be a market id".to_string())
            })
        })
        .transpose()
}
