//! Region map resolution for locale routing
//!
//! This module maintains the process-wide view of the commerce backend's
//! regions, indexed by lowercase country code:
//! - `client`: fetches and validates `GET {backend}/store/regions`
//! - `cache`: serves the indexed map, refreshing at most once per TTL window

mod cache;
mod client;

pub use cache::{CacheStats, RegionCache};
pub use client::RegionClient;
