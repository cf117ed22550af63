//! Core module - configuration and storefront state
//!
//! - [`Config`] - environment-driven configuration
//! - [`StorefrontState`] - catalog, store and services wired together

pub mod config;
pub mod state;

pub use config::Config;
pub use state::StorefrontState;
