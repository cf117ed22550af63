//! Cart line shapes
//!
//! A line owns a by-value snapshot of the configuration and its pricing, so
//! later edits in the customizer never reach back into the cart.

use super::configuration::Configuration;
use super::pricing::PricingBreakdown;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A finalized customization, ready to be put into a cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfiguredItem {
    pub product_id: String,
    pub product_name: String,
    pub configuration: Configuration,
    pub pricing: PricingBreakdown,
    /// All selections are the free defaults
    pub is_basic: bool,
}

/// Cart line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Content hash of product id + configuration
    pub line_id: String,
    pub product_id: String,
    pub product_name: String,
    pub configuration: Configuration,
    pub pricing: PricingBreakdown,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub added_at: i64,
}
