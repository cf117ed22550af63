use shared::models::{Configuration, OptionCatalog};

/// True when no required attribute deviates from its default choice.
///
/// An unselected attribute counts as default. Inactive attributes and
/// optional ones are ignored.
pub fn is_basic_customization(configuration: &Configuration, catalog: &OptionCatalog) -> bool {
    catalog
        .attributes()
        .iter()
        .filter(|attr| attr.required && attr.is_active)
        .all(|attr| match configuration.get(attr.id) {
            None => true,
            Some(selected) => attr
                .default_choice()
                .is_some_and(|default| &default.id == selected),
        })
}
