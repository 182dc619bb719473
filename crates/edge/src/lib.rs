//! Storefront Edge Library
//!
//! This crate contains the edge middleware service that sits in front of the
//! storefront: locale-prefix resolution and redirects, cart/onboarding cookie
//! propagation, and a cached view of the commerce backend's regions.

pub mod config;
pub mod error;
pub mod middleware;
pub mod regions;
pub mod resolver;
pub mod routes;
pub mod state;
pub mod upstream;

pub use config::Config;
pub use error::{EdgeError, EdgeResult};
pub use regions::{RegionCache, RegionClient};
pub use resolver::{Decision, RequestContext};
pub use state::AppState;
