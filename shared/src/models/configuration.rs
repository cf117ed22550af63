//! Customization configuration (attribute -> chosen value)

use super::customization::{AttributeKey, ChoiceId, OptionCatalog};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The user's current selections
///
/// At most one choice per attribute; selecting again replaces the previous
/// choice. Ordered by key so serialization and hashing are stable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration {
    selections: BTreeMap<AttributeKey, ChoiceId>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration selecting every attribute's default choice
    pub fn defaults_for(catalog: &OptionCatalog) -> Self {
        let selections = catalog
            .attributes()
            .iter()
            .filter(|a| a.is_active)
            .filter_map(|a| a.default_choice().map(|c| (a.id, c.id.clone())))
            .collect();
        Self { selections }
    }

    /// Select a choice, returning the one it replaced
    pub fn select(&mut self, key: AttributeKey, choice: impl Into<ChoiceId>) -> Option<ChoiceId> {
        self.selections.insert(key, choice.into())
    }

    pub fn clear(&mut self, key: AttributeKey) -> Option<ChoiceId> {
        self.selections.remove(&key)
    }

    pub fn get(&self, key: AttributeKey) -> Option<&ChoiceId> {
        self.selections.get(&key)
    }

    pub fn contains(&self, key: AttributeKey) -> bool {
        self.selections.contains_key(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AttributeKey, &ChoiceId)> {
        self.selections.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}

impl FromIterator<(AttributeKey, ChoiceId)> for Configuration {
    fn from_iter<I: IntoIterator<Item = (AttributeKey, ChoiceId)>>(iter: I) -> Self {
        let mut config = Configuration::new();
        for (key, choice) in iter {
            config.select(key, choice);
        }
        config
    }
}
