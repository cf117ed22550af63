//! Product Model

use super::customization::OptionCatalog;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Customizable watch product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchProduct {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Price of the all-defaults configuration
    pub base_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Customizable attributes
    #[serde(default)]
    pub options: OptionCatalog,
}
