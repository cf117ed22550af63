//! Watch Storefront - customizable watch shop core
//!
//! # Overview
//!
//! - **Pricing** (`pricing`): base price + option modifiers, completeness
//!   validation, basic-customization detection
//! - **Customization** (`customization`): step-by-step wizard session
//! - **Catalog** (`catalog`): read-only product catalog loaded from JSON
//! - **Cart / Orders / Accounts**: checkout flow and account center
//! - **Storage** (`storage`): explicit store object, redb or in-memory
//!
//! # Layout
//!
//! ```text
//! storefront/src/
//! ├── core/           # config, state
//! ├── pricing/        # calculator, validator, basic, money
//! ├── customization/  # wizard session
//! ├── catalog/        # product catalog service
//! ├── cart/           # cart + persistence
//! ├── orders/         # placement, lifecycle, payment instructions
//! ├── accounts/       # users, addresses, settings
//! ├── storage/        # Store trait, redb + memory backends
//! └── utils/          # logger
//! ```

pub mod accounts;
pub mod cart;
pub mod catalog;
pub mod core;
pub mod customization;
pub mod orders;
pub mod pricing;
pub mod storage;
pub mod utils;

#[cfg(test)]
mod testing;

pub use core::{Config, StorefrontState};
pub use customization::{CustomizationSession, WizardStep};
pub use pricing::{PriceCalculator, PricingMode, calculate_price, is_basic_customization, validate};
pub use storage::{MemoryStore, RedbStore, Store};
pub use utils::logger::{init_logger, init_logger_with_file};

// Re-export unified error types from shared
pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};
