//! Customization Price Calculator
//!
//! final price = base price + sum of the selected choices' modifiers.
//!
//! Every resolved modifier is summed, whatever its sign. Amounts are rounded
//! per line before summing. The display breakdown only lists non-zero
//! modifiers: positive ones as `option` lines, negative ones as `discount`
//! lines, so the lines always add up to the total.

use super::money::round_money;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::{
    AttributeKey, ChoiceId, Configuration, OptionCatalog, PriceLineItem, PriceLineKind,
    PricingBreakdown, PricingDiagnostic,
};
use thiserror::Error;

/// Category label of the base line
pub const BASE_CATEGORY: &str = "base";

/// How unknown configuration entries are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingMode {
    /// Skip, log a warning and report the entry in `diagnostics`
    #[default]
    Lenient,
    /// Fail the calculation
    Strict,
}

impl PricingMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "lenient" => Some(Self::Lenient),
            "strict" => Some(Self::Strict),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    #[error("base price must be non-negative, got {0}")]
    NegativeBasePrice(Decimal),

    #[error("attribute {attribute} is not in the catalog (choice {choice})")]
    UnknownAttribute {
        attribute: AttributeKey,
        choice: ChoiceId,
    },

    #[error("choice {choice} is not offered for attribute {attribute}")]
    UnknownChoice {
        attribute: AttributeKey,
        choice: ChoiceId,
    },
}

impl From<PricingDiagnostic> for PricingError {
    fn from(diag: PricingDiagnostic) -> Self {
        match diag {
            PricingDiagnostic::UnknownAttribute { attribute, choice } => {
                Self::UnknownAttribute { attribute, choice }
            }
            PricingDiagnostic::UnknownChoice { attribute, choice } => {
                Self::UnknownChoice { attribute, choice }
            }
        }
    }
}

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        let message = err.to_string();
        match err {
            PricingError::NegativeBasePrice(price) => {
                AppError::with_message(ErrorCode::ProductInvalidPrice, message)
                    .with_detail("price", price.to_string())
            }
            PricingError::UnknownAttribute { attribute, choice }
            | PricingError::UnknownChoice { attribute, choice } => {
                AppError::with_message(ErrorCode::ConfigurationStale, message)
                    .with_detail("attribute", attribute.as_str())
                    .with_detail("choice", choice.0)
            }
        }
    }
}

/// Price calculator
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceCalculator {
    mode: PricingMode,
}

impl PriceCalculator {
    pub fn new(mode: PricingMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> PricingMode {
        self.mode
    }

    /// Calculate the final price and breakdown for a configuration
    ///
    /// Attributes are visited in catalog display order. Pure function of its
    /// inputs.
    pub fn calculate(
        &self,
        product_name: &str,
        base_price: Decimal,
        catalog: &OptionCatalog,
        configuration: &Configuration,
    ) -> Result<PricingBreakdown, PricingError> {
        if base_price < Decimal::ZERO {
            return Err(PricingError::NegativeBasePrice(base_price));
        }

        let base_price = round_money(base_price);
        let mut lines = vec![PriceLineItem {
            category: BASE_CATEGORY.to_string(),
            name: product_name.to_string(),
            amount: base_price,
            kind: PriceLineKind::Base,
        }];
        let mut total_modifier = Decimal::ZERO;
        let mut diagnostics = Vec::new();
        let mut visited: Vec<AttributeKey> = Vec::with_capacity(configuration.len());

        for attr in catalog.sorted() {
            // A duplicated attribute key must not be charged twice
            if visited.contains(&attr.id) {
                continue;
            }
            visited.push(attr.id);

            let Some(choice_id) = configuration.get(attr.id) else {
                continue;
            };

            match attr.choice(choice_id) {
                Some(choice) => {
                    let amount = round_money(choice.price_modifier);
                    total_modifier += amount;
                    if let Some(kind) = line_kind(amount) {
                        lines.push(PriceLineItem {
                            category: attr.display_name.clone(),
                            name: choice.display_name.clone(),
                            amount,
                            kind,
                        });
                    }
                }
                None => self.unresolved(
                    PricingDiagnostic::UnknownChoice {
                        attribute: attr.id,
                        choice: choice_id.clone(),
                    },
                    &mut diagnostics,
                )?,
            }
        }

        for (key, choice_id) in configuration.iter() {
            if catalog.attribute(key).is_none() {
                self.unresolved(
                    PricingDiagnostic::UnknownAttribute {
                        attribute: key,
                        choice: choice_id.clone(),
                    },
                    &mut diagnostics,
                )?;
            }
        }

        let final_price = base_price + total_modifier;
        if final_price < Decimal::ZERO {
            tracing::warn!(
                product = %product_name,
                %base_price,
                %total_modifier,
                "Discounts exceed the base price"
            );
        }

        Ok(PricingBreakdown {
            base_price,
            total_modifier,
            final_price,
            lines,
            diagnostics,
        })
    }

    fn unresolved(
        &self,
        diagnostic: PricingDiagnostic,
        diagnostics: &mut Vec<PricingDiagnostic>,
    ) -> Result<(), PricingError> {
        match self.mode {
            PricingMode::Strict => Err(diagnostic.into()),
            PricingMode::Lenient => {
                tracing::warn!(
                    diagnostic = ?diagnostic,
                    "Skipping configuration entry unknown to the catalog"
                );
                diagnostics.push(diagnostic);
                Ok(())
            }
        }
    }
}

/// Calculate with the default (lenient) calculator
pub fn calculate_price(
    product_name: &str,
    base_price: Decimal,
    catalog: &OptionCatalog,
    configuration: &Configuration,
) -> Result<PricingBreakdown, PricingError> {
    PriceCalculator::default().calculate(product_name, base_price, catalog, configuration)
}

fn line_kind(modifier: Decimal) -> Option<PriceLineKind> {
    if modifier > Decimal::ZERO {
        Some(PriceLineKind::Option)
    } else if modifier < Decimal::ZERO {
        Some(PriceLineKind::Discount)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{attribute, choice, watch_catalog};
    use shared::models::AttributeCategory;

    const NAME: &str = "Heritage Classic";

    fn base() -> Decimal {
        Decimal::from(2800)
    }

    fn config(entries: &[(AttributeKey, &str)]) -> Configuration {
        entries
            .iter()
            .map(|(k, c)| (*k, ChoiceId::new(*c)))
            .collect()
    }

    #[test]
    fn test_empty_configuration_is_base_price() {
        let breakdown = calculate_price(NAME, base(), &watch_catalog(), &Configuration::new()).unwrap();

        assert_eq!(breakdown.final_price, base());
        assert_eq!(breakdown.total_modifier, Decimal::ZERO);
        assert_eq!(breakdown.lines.len(), 1);
        assert_eq!(breakdown.lines[0].category, BASE_CATEGORY);
        assert_eq!(breakdown.lines[0].name, NAME);
        assert_eq!(breakdown.lines[0].kind, PriceLineKind::Base);
        assert!(breakdown.diagnostics.is_empty());
    }

    #[test]
    fn test_all_defaults_is_base_price() {
        let catalog = watch_catalog();
        let defaults = Configuration::defaults_for(&catalog);
        assert_eq!(defaults.len(), 6);

        let breakdown = calculate_price(NAME, base(), &catalog, &defaults).unwrap();
        assert_eq!(breakdown.final_price, base());
        assert_eq!(breakdown.lines.len(), 1);
    }

    #[test]
    fn test_titanium_and_black_glossy() {
        let cfg = config(&[
            (AttributeKey::CaseMaterial, "titanium"),
            (AttributeKey::DialStyle, "black_glossy"),
        ]);
        let breakdown = calculate_price(NAME, base(), &watch_catalog(), &cfg).unwrap();

        assert_eq!(breakdown.final_price, Decimal::from(4500));
        assert_eq!(breakdown.total_modifier, Decimal::from(1700));

        let options = breakdown.option_lines();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].category, "Case Material");
        assert_eq!(options[0].name, "Grade 5 Titanium");
        assert_eq!(options[0].amount, Decimal::from(1500));
        assert_eq!(options[0].kind, PriceLineKind::Option);
        assert_eq!(options[1].amount, Decimal::from(200));
    }

    #[test]
    fn test_lines_follow_catalog_order_not_configuration_order() {
        // Movement sorts last in the catalog but first alphabetically among these keys
        let cfg = config(&[
            (AttributeKey::Movement, "automatic"),
            (AttributeKey::CaseMaterial, "titanium"),
        ]);
        let breakdown = calculate_price(NAME, base(), &watch_catalog(), &cfg).unwrap();
        let names: Vec<&str> = breakdown.option_lines().iter().map(|l| l.category.as_str()).collect();
        assert_eq!(names, vec!["Case Material", "Movement"]);
    }

    #[test]
    fn test_zero_modifier_choice_has_no_line() {
        let cfg = config(&[(AttributeKey::Strap, "nato_grey")]);
        let breakdown = calculate_price(NAME, base(), &watch_catalog(), &cfg).unwrap();
        assert_eq!(breakdown.lines.len(), 1);
        assert_eq!(breakdown.final_price, base());
    }

    #[test]
    fn test_negative_modifier_is_summed_and_shown_as_discount() {
        let catalog = OptionCatalog::new(vec![
            attribute(
                AttributeKey::CaseMaterial,
                "Case",
                AttributeCategory::Case,
                true,
                1,
                vec![
                    choice("steel", "Steel", 0, true),
                    choice("titanium", "Titanium", 1500, false),
                ],
            ),
            attribute(
                AttributeKey::Strap,
                "Strap",
                AttributeCategory::Strap,
                false,
                2,
                vec![
                    choice("leather", "Leather", 0, true),
                    choice("no_strap", "Head only", -300, false),
                ],
            ),
        ]);
        let cfg = config(&[
            (AttributeKey::CaseMaterial, "titanium"),
            (AttributeKey::Strap, "no_strap"),
        ]);

        let breakdown = calculate_price(NAME, base(), &catalog, &cfg).unwrap();
        assert_eq!(breakdown.total_modifier, Decimal::from(1200));
        assert_eq!(breakdown.final_price, Decimal::from(4000));

        let discount = &breakdown.option_lines()[1];
        assert_eq!(discount.kind, PriceLineKind::Discount);
        assert_eq!(discount.amount, Decimal::from(-300));

        let line_sum: Decimal = breakdown.lines.iter().map(|l| l.amount).sum();
        assert_eq!(line_sum, breakdown.final_price);
    }

    #[test]
    fn test_discount_larger_than_base_is_not_clamped() {
        let catalog = OptionCatalog::new(vec![attribute(
            AttributeKey::Strap,
            "Strap",
            AttributeCategory::Strap,
            false,
            1,
            vec![
                choice("leather", "Leather", 0, true),
                choice("voucher", "Voucher", -5000, false),
            ],
        )]);
        let cfg = config(&[(AttributeKey::Strap, "voucher")]);
        let breakdown = calculate_price(NAME, base(), &catalog, &cfg).unwrap();
        assert_eq!(breakdown.total_modifier, Decimal::from(-5000));
        assert_eq!(breakdown.final_price, Decimal::from(-2200));
        assert_eq!(breakdown.final_price, breakdown.base_price + breakdown.total_modifier);
        let lines: Decimal = breakdown.lines.iter().map(|l| l.amount).sum();
        assert_eq!(lines, breakdown.final_price);
    }

    #[test]
    fn test_calculation_is_idempotent() {
        let catalog = watch_catalog();
        let cfg = config(&[
            (AttributeKey::CaseMaterial, "titanium"),
            (AttributeKey::Hands, "dauphine"),
            (AttributeKey::Strap, "missing_strap"),
        ]);
        let catalog_before = catalog.clone();
        let cfg_before = cfg.clone();

        let first = calculate_price(NAME, base(), &catalog, &cfg).unwrap();
        let second = calculate_price(NAME, base(), &catalog, &cfg).unwrap();

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        assert_eq!(catalog, catalog_before);
        assert_eq!(cfg, cfg_before);
    }

    #[test]
    fn test_overwrite_prices_only_latest_choice() {
        let mut cfg = Configuration::new();
        cfg.select(AttributeKey::DialStyle, "black_glossy");
        cfg.select(AttributeKey::DialStyle, "blue_sunburst");

        let breakdown = calculate_price(NAME, base(), &watch_catalog(), &cfg).unwrap();
        assert_eq!(breakdown.final_price, Decimal::from(3150));
        assert_eq!(breakdown.option_lines().len(), 1);
        assert_eq!(breakdown.option_lines()[0].name, "Blue Sunburst");
    }

    #[test]
    fn test_unknown_choice_skipped_in_lenient_mode() {
        let cfg = config(&[
            (AttributeKey::CaseMaterial, "platinum"),
            (AttributeKey::DialStyle, "black_glossy"),
        ]);
        let breakdown = calculate_price(NAME, base(), &watch_catalog(), &cfg).unwrap();

        assert_eq!(breakdown.final_price, Decimal::from(3000));
        assert_eq!(breakdown.option_lines().len(), 1);
        assert_eq!(
            breakdown.diagnostics,
            vec![PricingDiagnostic::UnknownChoice {
                attribute: AttributeKey::CaseMaterial,
                choice: ChoiceId::new("platinum"),
            }]
        );
    }

    #[test]
    fn test_unknown_attribute_skipped_in_lenient_mode() {
        let catalog = OptionCatalog::new(vec![attribute(
            AttributeKey::CaseMaterial,
            "Case",
            AttributeCategory::Case,
            true,
            1,
            vec![choice("steel", "Steel", 0, true)],
        )]);
        let cfg = config(&[
            (AttributeKey::CaseMaterial, "steel"),
            (AttributeKey::SecondHand, "red_tip"),
        ]);

        let breakdown = calculate_price(NAME, base(), &catalog, &cfg).unwrap();
        assert_eq!(breakdown.final_price, base());
        assert_eq!(
            breakdown.diagnostics,
            vec![PricingDiagnostic::UnknownAttribute {
                attribute: AttributeKey::SecondHand,
                choice: ChoiceId::new("red_tip"),
            }]
        );
    }

    #[test]
    fn test_unknown_reference_fails_in_strict_mode() {
        let strict = PriceCalculator::new(PricingMode::Strict);
        let cfg = config(&[(AttributeKey::DialStyle, "meteorite")]);

        let err = strict
            .calculate(NAME, base(), &watch_catalog(), &cfg)
            .unwrap_err();
        assert_eq!(
            err,
            PricingError::UnknownChoice {
                attribute: AttributeKey::DialStyle,
                choice: ChoiceId::new("meteorite"),
            }
        );

        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::ConfigurationStale);
        assert_eq!(app.detail("choice"), Some(&serde_json::Value::from("meteorite")));
    }

    #[test]
    fn test_unknown_attribute_fails_in_strict_mode() {
        let catalog = OptionCatalog::new(vec![attribute(
            AttributeKey::CaseMaterial,
            "Case",
            AttributeCategory::Case,
            true,
            1,
            vec![choice("steel", "Steel", 0, true)],
        )]);
        let cfg = config(&[
            (AttributeKey::CaseMaterial, "steel"),
            (AttributeKey::SecondHand, "red_tip"),
        ]);

        let err = PriceCalculator::new(PricingMode::Strict)
            .calculate(NAME, base(), &catalog, &cfg)
            .unwrap_err();
        assert_eq!(
            err,
            PricingError::UnknownAttribute {
                attribute: AttributeKey::SecondHand,
                choice: ChoiceId::new("red_tip"),
            }
        );
    }

    #[test]
    fn test_strict_mode_accepts_known_configuration() {
        let strict = PriceCalculator::new(PricingMode::Strict);
        let cfg = config(&[(AttributeKey::Movement, "automatic")]);
        let breakdown = strict.calculate(NAME, base(), &watch_catalog(), &cfg).unwrap();
        assert_eq!(breakdown.final_price, Decimal::from(4600));
    }

    #[test]
    fn test_duplicate_attribute_charged_once() {
        let dup = attribute(
            AttributeKey::CaseMaterial,
            "Case",
            AttributeCategory::Case,
            true,
            1,
            vec![
                choice("steel", "Steel", 0, true),
                choice("titanium", "Titanium", 1500, false),
            ],
        );
        let catalog = OptionCatalog::new(vec![dup.clone(), dup]);
        let cfg = config(&[(AttributeKey::CaseMaterial, "titanium")]);

        let breakdown = calculate_price(NAME, base(), &catalog, &cfg).unwrap();
        assert_eq!(breakdown.final_price, Decimal::from(4300));
    }

    #[test]
    fn test_negative_base_price_rejected() {
        let err = calculate_price(NAME, Decimal::from(-1), &watch_catalog(), &Configuration::new())
            .unwrap_err();
        assert_eq!(err, PricingError::NegativeBasePrice(Decimal::from(-1)));
        assert_eq!(AppError::from(err).code, ErrorCode::ProductInvalidPrice);
    }

    #[test]
    fn test_high_base_price_is_quoted() {
        let breakdown = calculate_price(
            "Grand Complication",
            Decimal::from(1_200_000),
            &watch_catalog(),
            &Configuration::new(),
        )
        .unwrap();
        assert_eq!(breakdown.final_price, Decimal::from(1_200_000));
        assert!(calculate_price(NAME, Decimal::ZERO, &watch_catalog(), &Configuration::new()).is_ok());
    }

    #[test]
    fn test_fractional_amounts_are_rounded() {
        let catalog = OptionCatalog::new(vec![attribute(
            AttributeKey::DialStyle,
            "Dial",
            AttributeCategory::Dial,
            true,
            1,
            vec![
                choice("white", "White", 0, true),
                priced("enamel", Decimal::new(99995, 3)),
            ],
        )]);
        let cfg = config(&[(AttributeKey::DialStyle, "enamel")]);

        let breakdown = calculate_price(NAME, Decimal::new(100005, 3), &catalog, &cfg).unwrap();
        // 100.005 -> 100.01, 99.995 -> 100.00
        assert_eq!(breakdown.base_price, Decimal::new(10001, 2));
        assert_eq!(breakdown.option_lines()[0].amount, Decimal::new(10000, 2));
        assert_eq!(breakdown.total_modifier, Decimal::new(10000, 2));
        assert_eq!(breakdown.final_price, Decimal::new(20001, 2));
        let lines: Decimal = breakdown.lines.iter().map(|l| l.amount).sum();
        assert_eq!(lines, breakdown.final_price);
    }

    #[test]
    fn test_pricing_mode_parse() {
        assert_eq!(PricingMode::parse("Strict"), Some(PricingMode::Strict));
        assert_eq!(PricingMode::parse(" lenient "), Some(PricingMode::Lenient));
        assert_eq!(PricingMode::parse("loose"), None);
    }

    fn priced(id: &str, modifier: Decimal) -> shared::models::CustomizationChoice {
        let mut c = choice(id, id, 0, false);
        c.price_modifier = modifier;
        c
    }
}
