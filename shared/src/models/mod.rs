//! Data models
//!
//! Serializable types shared between the storefront logic and whatever
//! renders it. No behavior beyond small lookups lives here.

pub mod cart;
pub mod configuration;
pub mod customization;
pub mod order;
pub mod pricing;
pub mod product;
pub mod user;

// Re-exports
pub use cart::*;
pub use configuration::*;
pub use customization::*;
pub use order::*;
pub use pricing::*;
pub use product::*;
pub use user::*;
