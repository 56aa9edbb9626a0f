use crate::app_config::AppConfig;
use crate::marketplace::MarketplaceConfig;
use crate::ConfigError;

pub const DEFAULT_PROVIDER_BASE_URL: &str = "https://api.rainforestapi.com/";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let taxonomy_base_url = require("CATSYNC_TAXONOMY_BASE_URL")?;
    let taxonomy_client_id = require("CATSYNC_TAXONOMY_CLIENT_ID")?;
    let taxonomy_client_secret = require("CATSYNC_TAXONOMY_CLIENT_SECRET")?;
    let provider_api_key = require("CATSYNC_PROVIDER_API_KEY")?;
    let provider_base_url = or_default("CATSYNC_PROVIDER_BASE_URL", DEFAULT_PROVIDER_BASE_URL);

    let marketplace = MarketplaceConfig {
        domain: require("CATSYNC_MARKETPLACE_DOMAIN")?,
        language: require("CATSYNC_MARKETPLACE_LANGUAGE")?,
        currency: require("CATSYNC_MARKETPLACE_CURRENCY")?,
        customer_zipcode: require("CATSYNC_MARKETPLACE_ZIPCODE")?,
    };

    let notification_webhook = lookup("CATSYNC_NOTIFICATION_WEBHOOK")
        .ok()
        .filter(|v| !v.trim().is_empty());
    let log_level = or_default("CATSYNC_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("CATSYNC_REQUEST_TIMEOUT_SECS", "180")?;
    let category_page_size = parse_u32("CATSYNC_CATEGORY_PAGE_SIZE", "500")?;
    if category_page_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "CATSYNC_CATEGORY_PAGE_SIZE".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let append_chunk_size = parse_usize("CATSYNC_APPEND_CHUNK_SIZE", "1000")?;
    if append_chunk_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "CATSYNC_APPEND_CHUNK_SIZE".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        taxonomy_base_url,
        taxonomy_client_id,
        taxonomy_client_secret,
        provider_base_url,
        provider_api_key,
        marketplace,
        notification_webhook,
        log_level,
        request_timeout_secs,
        category_page_size,
        append_chunk_size,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
