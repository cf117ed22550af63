//! Customization option catalog
//!
//! A product offers a fixed set of customizable attributes (case material,
//! dial style, ...). Each attribute carries an ordered list of choices with a
//! price modifier relative to the product's base price.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Customizable attribute key
///
/// The set is closed: every configuration in the system is keyed by one of
/// these, so all entry points agree on the shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKey {
    CaseMaterial,
    DialStyle,
    Hands,
    SecondHand,
    Strap,
    Movement,
}

impl AttributeKey {
    pub const ALL: [AttributeKey; 6] = [
        AttributeKey::CaseMaterial,
        AttributeKey::DialStyle,
        AttributeKey::Hands,
        AttributeKey::SecondHand,
        AttributeKey::Strap,
        AttributeKey::Movement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKey::CaseMaterial => "case_material",
            AttributeKey::DialStyle => "dial_style",
            AttributeKey::Hands => "hands",
            AttributeKey::SecondHand => "second_hand",
            AttributeKey::Strap => "strap",
            AttributeKey::Movement => "movement",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Choice identifier, unique within its parent attribute
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChoiceId(pub String);

impl ChoiceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChoiceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Grouping tag for attributes (drives wizard steps, no pricing effect)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AttributeCategory {
    Case,
    Dial,
    Hands,
    Strap,
    Movement,
    #[default]
    Other,
}

fn default_true() -> bool {
    true
}

/// One selectable value of an attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomizationChoice {
    pub id: ChoiceId,
    pub display_name: String,
    /// Amount added to the base price (negative = discount)
    #[serde(default)]
    pub price_modifier: Decimal,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default = "default_true")]
    pub is_available: bool,
    /// Informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<u32>,
}

/// Customizable attribute with its choices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomizationAttribute {
    pub id: AttributeKey,
    pub display_name: String,
    #[serde(default)]
    pub required: bool,
    pub values: Vec<CustomizationChoice>,
    #[serde(default)]
    pub category: AttributeCategory,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl CustomizationAttribute {
    /// Find a choice by id
    pub fn choice(&self, id: &ChoiceId) -> Option<&CustomizationChoice> {
        self.values.iter().find(|c| &c.id == id)
    }

    /// The first choice flagged as default
    pub fn default_choice(&self) -> Option<&CustomizationChoice> {
        self.values.iter().find(|c| c.is_default)
    }
}

/// Convention violations found by [`OptionCatalog::integrity_issues`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogIssue {
    /// Attribute has no default choice
    MissingDefault { attribute: AttributeKey },
    /// Attribute has more than one default choice
    MultipleDefaults { attribute: AttributeKey, count: usize },
    /// Default choice carries a non-zero modifier
    PricedDefault { attribute: AttributeKey, choice: ChoiceId },
    /// Default choice is flagged unavailable
    UnavailableDefault { attribute: AttributeKey, choice: ChoiceId },
    /// Attribute key appears more than once
    DuplicateAttribute { attribute: AttributeKey },
    /// Choice id appears more than once within an attribute
    DuplicateChoice { attribute: AttributeKey, choice: ChoiceId },
}

/// Immutable option catalog of one product
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionCatalog {
    attributes: Vec<CustomizationAttribute>,
}

impl OptionCatalog {
    pub fn new(attributes: Vec<CustomizationAttribute>) -> Self {
        Self { attributes }
    }

    pub fn attribute(&self, key: AttributeKey) -> Option<&CustomizationAttribute> {
        self.attributes.iter().find(|a| a.id == key)
    }

    pub fn attributes(&self) -> &[CustomizationAttribute] {
        &self.attributes
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Attributes in display order (`sort_order`, then key)
    pub fn sorted(&self) -> Vec<&CustomizationAttribute> {
        let mut sorted: Vec<&CustomizationAttribute> = self.attributes.iter().collect();
        sorted.sort_by_key(|a| (a.sort_order, a.id));
        sorted
    }

    /// Check the seed-data conventions: one default per attribute, priced at
    /// zero and available; no duplicate keys or choice ids.
    ///
    /// Nothing rejects a catalog with issues; callers decide whether to log.
    pub fn integrity_issues(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();
        let mut seen = Vec::with_capacity(self.attributes.len());

        for attr in &self.attributes {
            if seen.contains(&attr.id) {
                issues.push(CatalogIssue::DuplicateAttribute { attribute: attr.id });
            }
            seen.push(attr.id);

            let mut choice_ids: Vec<&ChoiceId> = Vec::with_capacity(attr.values.len());
            for choice in &attr.values {
                if choice_ids.contains(&&choice.id) {
                    issues.push(CatalogIssue::DuplicateChoice {
                        attribute: attr.id,
                        choice: choice.id.clone(),
                    });
                }
                choice_ids.push(&choice.id);
            }

            let defaults: Vec<&CustomizationChoice> =
                attr.values.iter().filter(|c| c.is_default).collect();
            match defaults.as_slice() {
                [] => issues.push(CatalogIssue::MissingDefault { attribute: attr.id }),
                [single] => {
                    if !single.price_modifier.is_zero() {
                        issues.push(CatalogIssue::PricedDefault {
                            attribute: attr.id,
                            choice: single.id.clone(),
                        });
                    }
                    if !single.is_available {
                        issues.push(CatalogIssue::UnavailableDefault {
                            attribute: attr.id,
                            choice: single.id.clone(),
                        });
                    }
                }
                many => issues.push(CatalogIssue::MultipleDefaults {
                    attribute: attr.id,
                    count: many.len(),
                }),
            }
        }

        issues
    }
}
