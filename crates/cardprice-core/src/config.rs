use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://www.pricecharting.com";
pub const DEFAULT_USER_AGENT: &str = "cardprice/0.1 (price-lookup)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Trims whitespace and trailing slashes from a site origin and checks its scheme.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for `CARDPRICE_BASE_URL` unless the
/// value starts with `http://` or `https://`.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let base_url = raw.trim().trim_end_matches('/').to_string();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "CARDPRICE_BASE_URL".to_string(),
            reason: format!("\"{base_url}\" must start with http:// or https://"),
        });
    }
    Ok(base_url)
}

/// Build configuration from an arbitrary env-var lookup so tests can feed a
/// plain `HashMap` instead of mutating the process environment.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let log_level = or_default("CARDPRICE_LOG_LEVEL", "info");

    let base_url = normalize_base_url(&or_default("CARDPRICE_BASE_URL", DEFAULT_BASE_URL))?;

    let request_timeout_secs = parse_u64("CARDPRICE_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "CARDPRICE_REQUEST_TIMEOUT_SECS",
            "timeout must be at least 1 second".to_string(),
        ));
    }

    let user_agent = or_default("CARDPRICE_USER_AGENT", DEFAULT_USER_AGENT);
    let max_concurrent_queries = parse_usize("CARDPRICE_MAX_CONCURRENT_QUERIES", "1")?;
    let max_retries = parse_u32("CARDPRICE_MAX_RETRIES", "2")?;
    let retry_backoff_base_ms = parse_u64("CARDPRICE_RETRY_BACKOFF_BASE_MS", "500")?;

    Ok(AppConfig {
        log_level,
        base_url,
        request_timeout_secs,
        user_agent,
        max_concurrent_queries,
        max_retries,
        retry_backoff_base_ms,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
