//! User account, address book and settings

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Address payload as entered by the customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AddressInput {
    #[validate(length(min = 1, max = 64))]
    pub recipient: String,
    #[validate(length(min = 5, max = 20))]
    pub phone: String,
    #[validate(length(min = 1, max = 64))]
    pub province: String,
    #[validate(length(min = 1, max = 64))]
    pub city: String,
    #[serde(default)]
    #[validate(length(max = 64))]
    pub district: String,
    #[validate(length(min = 1, max = 256))]
    pub street: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 4, max = 10))]
    pub postal_code: Option<String>,
}

/// Stored address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: String,
    pub recipient: String,
    pub phone: String,
    pub province: String,
    pub city: String,
    #[serde(default)]
    pub district: String,
    pub street: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

impl Address {
    pub fn from_input(id: impl Into<String>, input: AddressInput) -> Self {
        Self {
            id: id.into(),
            recipient: input.recipient,
            phone: input.phone,
            province: input.province,
            city: input.city,
            district: input.district,
            street: input.street,
            postal_code: input.postal_code,
        }
    }

    /// Re-validate a stored address (e.g. before it is snapshotted into an order)
    pub fn to_input(&self) -> AddressInput {
        AddressInput {
            recipient: self.recipient.clone(),
            phone: self.phone.clone(),
            province: self.province.clone(),
            city: self.city.clone(),
            district: self.district.clone(),
            street: self.street.clone(),
            postal_code: self.postal_code.clone(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_language() -> String {
    "zh-CN".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    #[serde(default)]
    pub newsletter: bool,
    #[serde(default = "default_true")]
    pub order_notifications: bool,
    #[serde(default = "default_language")]
    pub preferred_language: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            newsletter: false,
            order_notifications: true,
            preferred_language: default_language(),
        }
    }
}

/// Registration payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RegisterUser {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 32))]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 5, max = 20))]
    pub phone: Option<String>,
}

/// User account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub addresses: Vec<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_address_id: Option<String>,
    #[serde(default)]
    pub settings: UserSettings,
    pub created_at: i64,
}

impl User {
    pub fn address(&self, id: &str) -> Option<&Address> {
        self.addresses.iter().find(|a| a.id == id)
    }

    pub fn default_address(&self) -> Option<&Address> {
        self.default_address_id
            .as_deref()
            .and_then(|id| self.address(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> AddressInput {
        AddressInput {
            recipient: "Li Wei".to_string(),
            phone: "13800138000".to_string(),
            province: "Zhejiang".to_string(),
            city: "Hangzhou".to_string(),
            district: "Xihu".to_string(),
            street: "1 Wensan Road".to_string(),
            postal_code: Some("310000".to_string()),
        }
    }

    #[test]
    fn test_address_input_valid() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn test_address_input_rejects_short_phone_and_empty_street() {
        let mut bad = input();
        bad.phone = "123".to_string();
        bad.street = String::new();

        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("phone"));
        assert!(fields.contains_key("street"));
    }

    #[test]
    fn test_register_rejects_bad_email() {
        let reg = RegisterUser {
            email: "not-an-email".to_string(),
            display_name: "Wei".to_string(),
            phone: None,
        };
        assert!(reg.validate().is_err());
    }

    #[test]
    fn test_address_input_roundtrip() {
        let mut i = input();
        i.district = String::new();
        let address = Address::from_input("a1", i.clone());
        assert_eq!(address.id, "a1");
        assert_eq!(address.to_input(), i);
    }

    #[test]
    fn test_settings_defaults() {
        let settings: UserSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, UserSettings::default());
        assert!(settings.order_notifications);
    }
}
