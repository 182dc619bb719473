//! Shared application state

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::regions::{RegionCache, RegionClient};

/// Application state shared across handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub regions: Arc<RegionCache>,
    pub region_client: Arc<RegionClient>,
    /// Shared HTTP client (region fetches and storefront forwarding use one
    /// connection pool).
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()?;

        let region_client = Arc::new(RegionClient::new(
            http.clone(),
            config.medusa_backend_url.clone(),
        ));
        let regions = Arc::new(RegionCache::with_ttl(Duration::from_secs(
            config.region_cache_ttl_secs,
        )));

        Ok(Self {
            config: Arc::new(config),
            regions,
            region_client,
            http,
        })
    }
}
