//! Unified error codes for the storefront
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Customization errors
//! - 2xxx: Cart errors
//! - 3xxx: Order errors
//! - 5xxx: Account errors
//! - 6xxx: Product/catalog errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Codes serialize as plain `u16` values so any consumer can switch on them
/// without sharing the Rust enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Customization ====================
    /// Attribute is not offered by the product
    AttributeNotOffered = 1001,
    /// Choice id does not exist for the attribute
    ChoiceNotFound = 1002,
    /// Choice exists but cannot be selected
    ChoiceUnavailable = 1003,
    /// Configuration is missing required selections
    ConfigurationIncomplete = 1004,
    /// Configuration references entries the catalog does not know
    ConfigurationStale = 1005,

    // ==================== 2xxx: Cart ====================
    /// Cart line not found
    CartItemNotFound = 2001,
    /// Quantity outside the allowed range
    QuantityOutOfRange = 2002,
    /// Cart has no lines
    CartEmpty = 2003,

    // ==================== 3xxx: Order ====================
    OrderNotFound = 3001,
    /// Status change not allowed from the current status
    OrderInvalidTransition = 3002,
    OrderAlreadyCancelled = 3003,

    // ==================== 5xxx: Account ====================
    UserNotFound = 5001,
    EmailAlreadyRegistered = 5002,
    AddressNotFound = 5003,
    AddressInvalid = 5004,

    // ==================== 6xxx: Product ====================
    ProductNotFound = 6001,
    ProductInvalidPrice = 6002,
    ProductInactive = 6003,

    // ==================== 9xxx: System ====================
    InternalError = 9001,
    DatabaseError = 9002,
    ConfigError = 9005,
    StorageCorrupted = 9403,
}

impl ErrorCode {
    /// Get the numeric code
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default human-readable message
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",

            // Customization
            ErrorCode::AttributeNotOffered => "Attribute is not offered for this product",
            ErrorCode::ChoiceNotFound => "Choice not found",
            ErrorCode::ChoiceUnavailable => "Choice is currently unavailable",
            ErrorCode::ConfigurationIncomplete => "Configuration is missing required selections",
            ErrorCode::ConfigurationStale => "Configuration no longer matches the catalog",

            // Cart
            ErrorCode::CartItemNotFound => "Cart item not found",
            ErrorCode::QuantityOutOfRange => "Quantity is out of range",
            ErrorCode::CartEmpty => "Cart is empty",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderInvalidTransition => "Order status change is not allowed",
            ErrorCode::OrderAlreadyCancelled => "Order has already been cancelled",

            // Account
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::EmailAlreadyRegistered => "Email is already registered",
            ErrorCode::AddressNotFound => "Address not found",
            ErrorCode::AddressInvalid => "Address is invalid",

            // Product
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductInvalidPrice => "Product has invalid price",
            ErrorCode::ProductInactive => "Product is no longer offered",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::StorageCorrupted => "Stored data is corrupted",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),

            // Customization
            1001 => Ok(ErrorCode::AttributeNotOffered),
            1002 => Ok(ErrorCode::ChoiceNotFound),
            1003 => Ok(ErrorCode::ChoiceUnavailable),
            1004 => Ok(ErrorCode::ConfigurationIncomplete),
            1005 => Ok(ErrorCode::ConfigurationStale),

            // Cart
            2001 => Ok(ErrorCode::CartItemNotFound),
            2002 => Ok(ErrorCode::QuantityOutOfRange),
            2003 => Ok(ErrorCode::CartEmpty),

            // Order
            3001 => Ok(ErrorCode::OrderNotFound),
            3002 => Ok(ErrorCode::OrderInvalidTransition),
            3003 => Ok(ErrorCode::OrderAlreadyCancelled),

            // Account
            5001 => Ok(ErrorCode::UserNotFound),
            5002 => Ok(ErrorCode::EmailAlreadyRegistered),
            5003 => Ok(ErrorCode::AddressNotFound),
            5004 => Ok(ErrorCode::AddressInvalid),

            // Product
            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::ProductInvalidPrice),
            6003 => Ok(ErrorCode::ProductInactive),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),
            9403 => Ok(ErrorCode::StorageCorrupted),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}
