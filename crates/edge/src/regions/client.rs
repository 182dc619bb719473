//! HTTP client for the commerce backend's region listing

use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use storefront_shared::{Region, RegionError, RegionMap, StoreRegionsResponse};

/// Advisory caching hints attached to the outbound fetch. A CDN sitting in
/// front of the backend may honor them; the in-process cache is authoritative
/// for this process either way.
const CACHE_MAX_AGE_HEADER: &str = "max-age=3600";
const CACHE_TAGS_HEADER: &str = "regions";

/// Client for fetching regions from the commerce backend.
///
/// The HTTP client is injected so tests and the rest of the service can share
/// one connection pool.
#[derive(Clone)]
pub struct RegionClient {
    http: reqwest::Client,
    base_url: String,
}

impl RegionClient {
    /// Create a new region client against the given backend base URL.
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Fetch all regions and index them by lowercase country code.
    ///
    /// The map is built fully before being handed to the caller, so a failure
    /// at any point yields an error and no partial map.
    pub async fn fetch_region_map(&self) -> Result<RegionMap, RegionError> {
        let url = format!("{}/store/regions", self.base_url);

        let response = self
            .http
            .get(&url)
            .header("cache-control", CACHE_MAX_AGE_HEADER)
            .header("x-cache-tags", CACHE_TAGS_HEADER)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(url = %url, error = %e, "Region request failed");
                RegionError::Fetch(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(url = %url, status = %status, "Region backend returned an error");
            return Err(RegionError::Fetch(format!(
                "backend returned status {status}"
            )));
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));
        if !is_json {
            tracing::error!(url = %url, "Region backend returned a non-JSON payload");
            return Err(RegionError::Fetch("expected application/json".to_string()));
        }

        let payload: StoreRegionsResponse = response
            .json()
            .await
            .map_err(|e| RegionError::Fetch(e.to_string()))?;

        let regions = payload.regions.ok_or(RegionError::MissingRegions)?;
        Ok(build_region_map(regions))
    }
}

/// Index regions by lowercase ISO-3166-1 alpha-2 code.
///
/// If two regions claim the same country the last one wins, matching the
/// backend's own iteration order.
fn build_region_map(regions: Vec<Region>) -> RegionMap {
    let mut map = RegionMap::new();
    for region in regions {
        let region = Arc::new(region);
        for country in &region.countries {
            map.insert(country.iso_2.to_lowercase(), Arc::clone(&region));
        }
    }
    map
}
