use super::WizardStep;
use crate::pricing::{PriceCalculator, PricingMode, is_basic_customization, validate};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    AttributeKey, ChoiceId, Configuration, ConfiguredItem, CustomizationAttribute,
    PricingBreakdown, ValidationReport, WatchProduct,
};
use std::sync::Arc;

/// Wizard state for one product
#[derive(Debug, Clone)]
pub struct CustomizationSession {
    product: Arc<WatchProduct>,
    configuration: Configuration,
    steps: Vec<WizardStep>,
    step_index: usize,
    calculator: PriceCalculator,
}

impl CustomizationSession {
    /// Start at the first step with nothing selected
    pub fn new(product: Arc<WatchProduct>) -> Self {
        let steps = steps_for(&product);
        Self {
            product,
            configuration: Configuration::new(),
            steps,
            step_index: 0,
            calculator: PriceCalculator::default(),
        }
    }

    /// Start with every attribute's default pre-selected
    pub fn with_defaults(product: Arc<WatchProduct>) -> Self {
        let mut session = Self::new(product);
        session.reset_to_defaults();
        session
    }

    pub fn with_pricing_mode(mut self, mode: PricingMode) -> Self {
        self.calculator = PriceCalculator::new(mode);
        self
    }

    pub fn product(&self) -> &WatchProduct {
        &self.product
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    // ========== Selection ==========

    /// Select a choice, returning the one it replaced
    pub fn select(
        &mut self,
        key: AttributeKey,
        choice: impl Into<ChoiceId>,
    ) -> AppResult<Option<ChoiceId>> {
        let choice = choice.into();
        let attr = self
            .product
            .options
            .attribute(key)
            .filter(|a| a.is_active)
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::AttributeNotOffered,
                    format!("{} is not offered for {}", key, self.product.name),
                )
                .with_detail("attribute", key.as_str())
            })?;

        let option = attr.choice(&choice).ok_or_else(|| {
            AppError::with_message(
                ErrorCode::ChoiceNotFound,
                format!("{} has no option '{}'", attr.display_name, choice),
            )
            .with_detail("attribute", key.as_str())
            .with_detail("choice", choice.as_str())
        })?;

        if !option.is_available {
            return Err(AppError::with_message(
                ErrorCode::ChoiceUnavailable,
                format!("{} is currently unavailable", option.display_name),
            )
            .with_detail("attribute", key.as_str())
            .with_detail("choice", choice.as_str()));
        }

        tracing::debug!(product_id = %self.product.id, attribute = %key, choice = %choice, "Option selected");
        Ok(self.configuration.select(key, choice))
    }

    pub fn clear(&mut self, key: AttributeKey) -> Option<ChoiceId> {
        self.configuration.clear(key)
    }

    pub fn reset_to_defaults(&mut self) {
        self.configuration = Configuration::defaults_for(&self.product.options);
    }

    // ========== Navigation ==========

    pub fn steps(&self) -> &[WizardStep] {
        &self.steps
    }

    pub fn current_step(&self) -> WizardStep {
        self.steps
            .get(self.step_index)
            .copied()
            .unwrap_or(WizardStep::Review)
    }

    /// Advance; stays on the last step
    pub fn next_step(&mut self) -> WizardStep {
        if self.step_index + 1 < self.steps.len() {
            self.step_index += 1;
        }
        self.current_step()
    }

    /// Go back; stays on the first step
    pub fn previous_step(&mut self) -> WizardStep {
        self.step_index = self.step_index.saturating_sub(1);
        self.current_step()
    }

    pub fn is_last_step(&self) -> bool {
        self.step_index + 1 >= self.steps.len()
    }

    /// Active attributes edited on a step, in display order
    pub fn attributes_for_step(&self, step: WizardStep) -> Vec<&CustomizationAttribute> {
        self.product
            .options
            .sorted()
            .into_iter()
            .filter(|a| a.is_active && WizardStep::for_category(a.category) == step)
            .collect()
    }

    // ========== Pricing ==========

    pub fn quote(&self) -> AppResult<PricingBreakdown> {
        Ok(self.calculator.calculate(
            &self.product.name,
            self.product.base_price,
            &self.product.options,
            &self.configuration,
        )?)
    }

    pub fn validate(&self) -> ValidationReport {
        validate(&self.product.options, &self.configuration)
    }

    pub fn is_basic(&self) -> bool {
        is_basic_customization(&self.configuration, &self.product.options)
    }

    /// Snapshot the configuration for the cart
    pub fn finalize(&self) -> AppResult<ConfiguredItem> {
        if !self.product.is_active {
            return Err(AppError::with_message(
                ErrorCode::ProductInactive,
                format!("Product {} is not on sale", self.product.id),
            )
            .with_detail("product_id", self.product.id.as_str()));
        }

        let report = self.validate();
        if !report.is_valid {
            let attributes: Vec<String> = report
                .errors
                .iter()
                .map(|e| e.attribute_id.as_str().to_string())
                .collect();
            let codes: Vec<String> = report
                .errors
                .iter()
                .map(|e| e.code.as_str().to_string())
                .collect();
            let message = report
                .errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(AppError::with_message(ErrorCode::ConfigurationIncomplete, message)
                .with_detail("attributes", attributes)
                .with_detail("codes", codes));
        }

        let pricing = self.quote()?;
        tracing::info!(
            product_id = %self.product.id,
            final_price = %pricing.final_price,
            "Customization finalized"
        );

        Ok(ConfiguredItem {
            product_id: self.product.id.clone(),
            product_name: self.product.name.clone(),
            configuration: self.configuration.clone(),
            pricing,
            is_basic: self.is_basic(),
        })
    }
}

/// Steps with at least one active attribute, plus review
fn steps_for(product: &WatchProduct) -> Vec<WizardStep> {
    WizardStep::ALL
        .into_iter()
        .filter(|step| {
            *step == WizardStep::Review
                || product
                    .options
                    .attributes()
                    .iter()
                    .any(|a| a.is_active && WizardStep::for_category(a.category) == *step)
        })
        .collect()
}
