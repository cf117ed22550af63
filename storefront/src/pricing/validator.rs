//! Configuration completeness validation
//!
//! Problems are returned as data in a [`ValidationReport`], one error per
//! offending attribute, so a UI can render them inline.

use shared::models::{
    AttributeKey, Configuration, OptionCatalog, ValidationCode, ValidationError, ValidationReport,
};

/// Check a configuration against a catalog
///
/// - required active attributes with no selection: `REQUIRED_MISSING`
/// - selection not among the attribute's values: `CHOICE_UNKNOWN`
/// - selection marked unavailable: `CHOICE_UNAVAILABLE`
/// - selection for an attribute the catalog does not have: `ATTRIBUTE_UNKNOWN`
pub fn validate(catalog: &OptionCatalog, configuration: &Configuration) -> ValidationReport {
    let mut errors = Vec::new();
    let mut visited: Vec<AttributeKey> = Vec::new();

    for attr in catalog.sorted() {
        // Only the first occurrence of a duplicated key is checked
        if visited.contains(&attr.id) {
            continue;
        }
        visited.push(attr.id);

        match configuration.get(attr.id) {
            None => {
                if attr.required && attr.is_active {
                    errors.push(ValidationError {
                        attribute_id: attr.id,
                        message: format!("{} is required", attr.display_name),
                        code: ValidationCode::RequiredMissing,
                    });
                }
            }
            Some(choice_id) => match attr.choice(choice_id) {
                None => errors.push(ValidationError {
                    attribute_id: attr.id,
                    message: format!(
                        "{} has no option '{}'",
                        attr.display_name, choice_id
                    ),
                    code: ValidationCode::ChoiceUnknown,
                }),
                Some(choice) if !choice.is_available => errors.push(ValidationError {
                    attribute_id: attr.id,
                    message: format!("{} is currently unavailable", choice.display_name),
                    code: ValidationCode::ChoiceUnavailable,
                }),
                Some(_) => {}
            },
        }
    }

    for (key, choice_id) in configuration.iter() {
        if catalog.attribute(key).is_none() {
            errors.push(ValidationError {
                attribute_id: key,
                message: format!("{} is not offered for this product (got '{}')", key, choice_id),
                code: ValidationCode::AttributeUnknown,
            });
        }
    }

    ValidationReport::from_errors(errors)
}
