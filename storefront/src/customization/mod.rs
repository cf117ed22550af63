//! Customization wizard
//!
//! A [`CustomizationSession`] owns one configuration for one product and
//! walks the customer through the steps below. Finalizing produces a
//! by-value `ConfiguredItem` for the cart.

mod session;

pub use session::CustomizationSession;

use serde::{Deserialize, Serialize};
use shared::models::AttributeCategory;
use std::fmt;

/// Wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Case,
    Dial,
    Hands,
    Strap,
    Movement,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 6] = [
        WizardStep::Case,
        WizardStep::Dial,
        WizardStep::Hands,
        WizardStep::Strap,
        WizardStep::Movement,
        WizardStep::Review,
    ];

    /// Step an attribute category is edited on (`other` goes to review)
    pub fn for_category(category: AttributeCategory) -> Self {
        match category {
            AttributeCategory::Case => WizardStep::Case,
            AttributeCategory::Dial => WizardStep::Dial,
            AttributeCategory::Hands => WizardStep::Hands,
            AttributeCategory::Strap => WizardStep::Strap,
            AttributeCategory::Movement => WizardStep::Movement,
            AttributeCategory::Other => WizardStep::Review,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Case => "Case",
            WizardStep::Dial => "Dial",
            WizardStep::Hands => "Hands",
            WizardStep::Strap => "Strap",
            WizardStep::Movement => "Movement",
            WizardStep::Review => "Review",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
