//! Storefront Shared Types and Utilities
//!
//! This crate contains types and errors shared across the storefront platform.

pub mod error;
pub mod types;

pub use error::*;
pub use types::*;
