//! Application configuration

use std::env;
use url::Url;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub bind_address: String,

    // Commerce backend
    pub medusa_backend_url: String,
    pub region_cache_ttl_secs: u64,

    // Storefront upstream (pass-through target)
    pub storefront_url: String,
    pub upstream_timeout_secs: u64,

    // Locale routing
    pub default_region: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // Server
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),

            // Commerce backend
            medusa_backend_url: {
                let raw = env::var("MEDUSA_BACKEND_URL")
                    .map_err(|_| ConfigError::Missing("MEDUSA_BACKEND_URL"))?;
                validate_base_url("MEDUSA_BACKEND_URL", &raw)?
            },
            region_cache_ttl_secs: env::var("REGION_CACHE_TTL_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()
                .unwrap_or(3600),

            // Storefront upstream
            storefront_url: {
                let raw = env::var("STOREFRONT_URL")
                    .map_err(|_| ConfigError::Missing("STOREFRONT_URL"))?;
                validate_base_url("STOREFRONT_URL", &raw)?
            },
            upstream_timeout_secs: env::var("UPSTREAM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),

            // Locale routing
            default_region: {
                let region = env::var("DEFAULT_REGION")
                    .unwrap_or_else(|_| "us".to_string())
                    .to_lowercase();
                if region.len() != 2 || !region.chars().all(|c| c.is_ascii_lowercase()) {
                    return Err(ConfigError::InvalidRegion(
                        "DEFAULT_REGION must be a two-letter ISO-3166-1 alpha-2 code",
                    ));
                }
                region
            },
        })
    }
}

/// Validate a base URL and strip any trailing slash so paths can be appended.
fn validate_base_url(name: &'static str, raw: &str) -> Result<String, ConfigError> {
    Url::parse(raw).map_err(|_| ConfigError::InvalidUrl(name))?;
    Ok(raw.trim_end_matches('/').to_string())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("Environment variable {0} is not a valid URL")]
    InvalidUrl(&'static str),
    #[error("Invalid default region: {0}")]
    InvalidRegion(&'static str),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure config tests run serially (they modify shared env vars)
    static CONFIG_TEST_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to set required env vars for testing
    fn setup_minimal_config() {
        env::set_var("MEDUSA_BACKEND_URL", "http://localhost:9000");
        env::set_var("STOREFRONT_URL", "http://localhost:8000");
    }

    /// Helper to clear env vars after tests
    fn cleanup_config() {
        env::remove_var("MEDUSA_BACKEND_URL");
        env::remove_var("STOREFRONT_URL");
        env::remove_var("DEFAULT_REGION");
        env::remove_var("REGION_CACHE_TTL_SECS");
    }

    #[test]
    fn test_config_validation() {
        let _lock = CONFIG_TEST_MUTEX.lock().unwrap();

        // === Test 1: Missing backend URL ===
        cleanup_config();
        env::set_var("STOREFRONT_URL", "http://localhost:8000");
        let result = Config::from_env();
        assert!(
            matches!(result, Err(ConfigError::Missing("MEDUSA_BACKEND_URL"))),
            "Missing backend URL should fail, got: {:?}",
            result
        );

        // === Test 2: Invalid backend URL ===
        setup_minimal_config();
        env::set_var("MEDUSA_BACKEND_URL", "not a url");
        let result = Config::from_env();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidUrl("MEDUSA_BACKEND_URL"))
        ));

        // === Test 3: Invalid default region ===
        setup_minimal_config();
        env::set_var("DEFAULT_REGION", "usa");
        let result = Config::from_env();
        assert!(matches!(result, Err(ConfigError::InvalidRegion(_))));

        // === Test 4: Defaults applied ===
        setup_minimal_config();
        env::remove_var("DEFAULT_REGION");
        let config = Config::from_env().unwrap();
        assert_eq!(config.default_region, "us");
        assert_eq!(config.region_cache_ttl_secs, 3600);
        assert_eq!(config.bind_address, "0.0.0.0:3000");

        // === Test 5: Region is lowercased, trailing slash stripped ===
        env::set_var("DEFAULT_REGION", "FR");
        env::set_var("MEDUSA_BACKEND_URL", "http://localhost:9000/");
        let config = Config::from_env().unwrap();
        assert_eq!(config.default_region, "fr");
        assert_eq!(config.medusa_backend_url, "http://localhost:9000");

        cleanup_config();
    }
}
