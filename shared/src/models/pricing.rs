//! Pricing breakdown and validation report shapes

use super::customization::{AttributeKey, ChoiceId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Line type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceLineKind {
    Base,
    /// Positive modifier
    Option,
    /// Negative modifier
    Discount,
}

/// One row of the price summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceLineItem {
    /// "base" for the base line, otherwise the attribute display name
    pub category: String,
    /// Product name for the base line, otherwise the choice display name
    pub name: String,
    pub amount: Decimal,
    pub kind: PriceLineKind,
}

/// A configuration entry the catalog could not resolve
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PricingDiagnostic {
    UnknownAttribute { attribute: AttributeKey, choice: ChoiceId },
    UnknownChoice { attribute: AttributeKey, choice: ChoiceId },
}

/// Result of a price calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingBreakdown {
    pub base_price: Decimal,
    /// Sum of every resolved modifier (including negative ones)
    pub total_modifier: Decimal,
    pub final_price: Decimal,
    /// Base line first, then one line per non-zero modifier
    pub lines: Vec<PriceLineItem>,
    /// Skipped entries (lenient mode only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<PricingDiagnostic>,
}

impl PricingBreakdown {
    /// Lines after the base line
    pub fn option_lines(&self) -> &[PriceLineItem] {
        self.lines.get(1..).unwrap_or(&[])
    }
}

/// Validation error class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationCode {
    RequiredMissing,
    ChoiceUnknown,
    ChoiceUnavailable,
    AttributeUnknown,
}

impl ValidationCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationCode::RequiredMissing => "REQUIRED_MISSING",
            ValidationCode::ChoiceUnknown => "CHOICE_UNKNOWN",
            ValidationCode::ChoiceUnavailable => "CHOICE_UNAVAILABLE",
            ValidationCode::AttributeUnknown => "ATTRIBUTE_UNKNOWN",
        }
    }
}

/// Per-attribute validation error (rendered inline under the attribute)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub attribute_id: AttributeKey,
    pub message: String,
    pub code: ValidationCode,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    pub fn errors_for(&self, key: AttributeKey) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter().filter(move |e| e.attribute_id == key)
    }
}
