//! Customization pricing
//!
//! - [`calculator`]: base price + selected modifiers with a line breakdown
//! - [`validator`]: completeness and availability checks
//! - [`basic`]: "all defaults" detection
//! - [`money`]: rounding policy and amount helpers

pub mod basic;
pub mod calculator;
pub mod money;
pub mod validator;

pub use basic::is_basic_customization;
pub use calculator::{PriceCalculator, PricingError, PricingMode, calculate_price};
pub use money::{line_total, round_money};
pub use validator::validate;
