//! Shared types for the watch storefront
//!
//! Data model (option catalog, configuration, pricing breakdown, cart, order,
//! user), the unified error type, and small utilities used by the storefront
//! crate and by anything that renders its output.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
