//! Error types for the storefront platform

use thiserror::Error;

/// Errors raised while resolving the region map from the commerce backend.
#[derive(Debug, Error)]
pub enum RegionError {
    /// The upstream call could not be completed or returned an unusable
    /// payload (network failure, non-success status, non-JSON body).
    #[error("Region fetch failed: {0}")]
    Fetch(String),

    /// The payload was well-formed JSON but carried no `regions` array.
    #[error("Response is missing the regions field")]
    MissingRegions,
}
