mod app_config;
mod config;
pub mod query;
pub mod record;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, normalize_base_url};
pub use query::{CardIdentity, CardQuery, CardQueryBuilder, QueryRow, RowError};
pub use record::{GradeTier, PriceRecord, PriceValue, PRICE_COLUMNS};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
