//! Account center: profile, address book, settings

use crate::storage::Store;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Address, AddressInput, RegisterUser, User, UserSettings};
use shared::util::{new_uuid, now_millis};
use std::sync::Arc;
use validator::{Validate, ValidationErrors};

/// Names of the fields that failed validation, sorted
fn invalid_fields(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<String> = errors.field_errors().keys().map(|k| k.to_string()).collect();
    fields.sort();
    fields
}

pub struct AccountService<S: Store> {
    store: Arc<S>,
}

impl<S: Store> AccountService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Create an account. Emails are unique, compared case-insensitively.
    pub fn register(&self, input: RegisterUser) -> AppResult<User> {
        if let Err(e) = input.validate() {
            return Err(AppError::validation(e.to_string()).with_detail("fields", invalid_fields(&e)));
        }

        let email = input.email.trim().to_lowercase();
        let taken = self
            .store
            .load_all::<User>()?
            .iter()
            .any(|u| u.email == email);
        if taken {
            return Err(AppError::with_message(
                ErrorCode::EmailAlreadyRegistered,
                "Email is already registered",
            )
            .with_detail("email", email));
        }

        let user = User {
            id: new_uuid(),
            email,
            display_name: input.display_name.trim().to_string(),
            phone: input.phone,
            addresses: Vec::new(),
            default_address_id: None,
            settings: UserSettings::default(),
            created_at: now_millis(),
        };
        self.store.save(&user)?;
        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    pub fn get(&self, user_id: &str) -> AppResult<User> {
        self.store.find_by_id::<User>(user_id)?.ok_or_else(|| {
            AppError::with_message(ErrorCode::UserNotFound, "User not found")
                .with_detail("user_id", user_id)
        })
    }

    /// Add an address; the first one becomes the default
    pub fn add_address(&self, user_id: &str, input: AddressInput) -> AppResult<Address> {
        if let Err(e) = input.validate() {
            return Err(AppError::with_message(ErrorCode::AddressInvalid, e.to_string())
                .with_detail("fields", invalid_fields(&e)));
        }

        let mut user = self.get(user_id)?;
        let address = Address::from_input(new_uuid(), input);
        if user.default_address_id.is_none() {
            user.default_address_id = Some(address.id.clone());
        }
        user.addresses.push(address.clone());
        self.store.save(&user)?;

        tracing::debug!(user_id = %user_id, address_id = %address.id, "Address added");
        Ok(address)
    }

    /// Remove an address; a removed default passes to the first remaining one
    pub fn remove_address(&self, user_id: &str, address_id: &str) -> AppResult<User> {
        let mut user = self.get(user_id)?;
        let index = user
            .addresses
            .iter()
            .position(|a| a.id == address_id)
            .ok_or_else(|| address_not_found(address_id))?;
        user.addresses.remove(index);

        if user.default_address_id.as_deref() == Some(address_id) {
            user.default_address_id = user.addresses.first().map(|a| a.id.clone());
        }
        self.store.save(&user)?;
        Ok(user)
    }

    pub fn set_default_address(&self, user_id: &str, address_id: &str) -> AppResult<User> {
        let mut user = self.get(user_id)?;
        if user.address(address_id).is_none() {
            return Err(address_not_found(address_id));
        }
        user.default_address_id = Some(address_id.to_string());
        self.store.save(&user)?;
        Ok(user)
    }

    pub fn update_settings(&self, user_id: &str, settings: UserSettings) -> AppResult<User> {
        let mut user = self.get(user_id)?;
        user.settings = settings;
        self.store.save(&user)?;
        Ok(user)
    }
}

fn address_not_found(address_id: &str) -> AppError {
    AppError::with_message(ErrorCode::AddressNotFound, "Address not found")
        .with_detail("address_id", address_id)
}
