//! Shopping cart
//!
//! Lines are keyed by a SHA-256 content hash of the product id and the
//! configuration, so adding the same watch twice bumps the quantity while
//! two different configurations stay separate lines.

use crate::pricing::{line_total, round_money};
use crate::storage::{Record, Store};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{CartLineItem, Configuration, ConfiguredItem};
use shared::util::now_millis;
use std::sync::Arc;

/// Per-line quantity bound (inclusive)
pub const MAX_LINE_QUANTITY: u32 = 99;

/// Content hash of product id + configuration
pub fn line_id_for(product_id: &str, configuration: &Configuration) -> String {
    let mut hasher = Sha256::new();
    hasher.update(product_id.as_bytes());
    for (key, choice) in configuration.iter() {
        hasher.update(b"\x1f");
        hasher.update(key.as_str().as_bytes());
        hasher.update(b"=");
        hasher.update(choice.as_str().as_bytes());
    }
    format!("{:x}", hasher.finalize())
}

fn quantity_error(quantity: u32) -> AppError {
    AppError::with_message(
        ErrorCode::QuantityOutOfRange,
        format!("Quantity must be between 1 and {}, got {}", MAX_LINE_QUANTITY, quantity),
    )
    .with_detail("quantity", quantity)
    .with_detail("max", MAX_LINE_QUANTITY)
}

fn line_not_found(line_id: &str) -> AppError {
    AppError::with_message(ErrorCode::CartItemNotFound, "Cart item not found")
        .with_detail("line_id", line_id)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub owner_id: String,
    pub lines: Vec<CartLineItem>,
    pub updated_at: i64,
}

impl Record for Cart {
    const TABLE: &'static str = "carts";

    fn record_id(&self) -> &str {
        &self.owner_id
    }
}

impl Cart {
    pub fn new(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            lines: Vec::new(),
            updated_at: now_millis(),
        }
    }

    /// Add a finalized item, merging with an identical line. Returns the line id.
    pub fn add(&mut self, item: ConfiguredItem, quantity: u32) -> AppResult<String> {
        if quantity == 0 || quantity > MAX_LINE_QUANTITY {
            return Err(quantity_error(quantity));
        }

        let line_id = line_id_for(&item.product_id, &item.configuration);

        if let Some(line) = self.lines.iter_mut().find(|l| l.line_id == line_id) {
            let merged = line.quantity + quantity;
            if merged > MAX_LINE_QUANTITY {
                return Err(quantity_error(merged));
            }
            line.quantity = merged;
        } else {
            self.lines.push(CartLineItem {
                line_id: line_id.clone(),
                product_id: item.product_id,
                product_name: item.product_name,
                unit_price: item.pricing.final_price,
                configuration: item.configuration,
                pricing: item.pricing,
                quantity,
                added_at: now_millis(),
            });
        }

        self.touch();
        tracing::debug!(owner_id = %self.owner_id, line_id = %line_id, quantity, "Cart line added");
        Ok(line_id)
    }

    /// Set a line's quantity; 0 removes the line
    pub fn update_quantity(&mut self, line_id: &str, quantity: u32) -> AppResult<()> {
        if quantity == 0 {
            self.remove(line_id)?;
            return Ok(());
        }
        if quantity > MAX_LINE_QUANTITY {
            return Err(quantity_error(quantity));
        }

        let line = self
            .lines
            .iter_mut()
            .find(|l| l.line_id == line_id)
            .ok_or_else(|| line_not_found(line_id))?;
        line.quantity = quantity;
        self.touch();
        Ok(())
    }

    pub fn remove(&mut self, line_id: &str) -> AppResult<CartLineItem> {
        let index = self
            .lines
            .iter()
            .position(|l| l.line_id == line_id)
            .ok_or_else(|| line_not_found(line_id))?;
        let line = self.lines.remove(index);
        self.touch();
        Ok(line)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.touch();
    }

    pub fn line(&self, line_id: &str) -> Option<&CartLineItem> {
        self.lines.iter().find(|l| l.line_id == line_id)
    }

    /// Sum of unit price * quantity
    pub fn subtotal(&self) -> Decimal {
        round_money(
            self.lines
                .iter()
                .map(|l| line_total(l.unit_price, l.quantity))
                .sum(),
        )
    }

    /// Number of watches (sum of quantities)
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn touch(&mut self) {
        self.updated_at = now_millis();
    }
}

/// Cart persistence, one cart per owner
pub struct CartService<S: Store> {
    store: Arc<S>,
}

impl<S: Store> CartService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The owner's saved cart, or a fresh empty one
    pub fn load(&self, owner_id: &str) -> AppResult<Cart> {
        Ok(self
            .store
            .find_by_id::<Cart>(owner_id)?
            .unwrap_or_else(|| Cart::new(owner_id)))
    }

    pub fn save(&self, cart: &Cart) -> AppResult<()> {
        self.store.save(cart)?;
        Ok(())
    }

    pub fn discard(&self, owner_id: &str) -> AppResult<bool> {
        Ok(self.store.remove::<Cart>(owner_id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customization::CustomizationSession;
    use crate::storage::MemoryStore;
    use crate::testing::classic_watch;
    use shared::models::AttributeKey;

    fn session() -> CustomizationSession {
        CustomizationSession::with_defaults(Arc::new(classic_watch()))
    }

    fn titanium_item() -> ConfiguredItem {
        let mut s = session();
        s.select(AttributeKey::CaseMaterial, "titanium").unwrap();
        s.finalize().unwrap()
    }

    #[test]
    fn test_identical_items_merge() {
        let mut cart = Cart::new("u1");
        let first = cart.add(titanium_item(), 1).unwrap();
        let second = cart.add(titanium_item(), 2).unwrap();

        assert_eq!(first, second);
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.subtotal(), Decimal::from(4300 * 3));
    }

    #[test]
    fn test_distinct_configurations_stay_separate() {
        let mut cart = Cart::new("u1");
        cart.add(titanium_item(), 1).unwrap();
        cart.add(session().finalize().unwrap(), 1).unwrap();

        assert_eq!(cart.lines.len(), 2);
        assert_eq!(cart.subtotal(), Decimal::from(4300 + 2800));
    }

    #[test]
    fn test_session_edits_do_not_reach_cart() {
        let mut cart = Cart::new("u1");
        let mut s = session();
        s.select(AttributeKey::DialStyle, "black_glossy").unwrap();
        let line_id = cart.add(s.finalize().unwrap(), 1).unwrap();

        s.select(AttributeKey::DialStyle, "blue_sunburst").unwrap();
        s.select(AttributeKey::Movement, "automatic").unwrap();

        let line = cart.line(&line_id).unwrap();
        assert_eq!(line.unit_price, Decimal::from(3000));
        assert_eq!(
            line.configuration.get(AttributeKey::DialStyle).map(|c| c.as_str()),
            Some("black_glossy")
        );
    }

    #[test]
    fn test_line_id_is_deterministic() {
        let item = titanium_item();
        assert_eq!(
            line_id_for(&item.product_id, &item.configuration),
            line_id_for("heritage-classic", &item.configuration)
        );
        assert_ne!(
            line_id_for("heritage-classic", &item.configuration),
            line_id_for("field-explorer", &item.configuration)
        );
        assert_eq!(line_id_for("p", &Configuration::new()).len(), 64);
    }

    #[test]
    fn test_quantity_bounds() {
        let mut cart = Cart::new("u1");
        assert_eq!(
            cart.add(titanium_item(), 0).unwrap_err().code,
            ErrorCode::QuantityOutOfRange
        );
        assert_eq!(
            cart.add(titanium_item(), 100).unwrap_err().code,
            ErrorCode::QuantityOutOfRange
        );

        let id = cart.add(titanium_item(), 98).unwrap();
        let err = cart.add(titanium_item(), 2).unwrap_err();
        assert_eq!(err.code, ErrorCode::QuantityOutOfRange);
        assert_eq!(cart.line(&id).unwrap().quantity, 98);
    }

    #[test]
    fn test_update_quantity_and_remove() {
        let mut cart = Cart::new("u1");
        let id = cart.add(titanium_item(), 1).unwrap();

        cart.update_quantity(&id, 5).unwrap();
        assert_eq!(cart.item_count(), 5);
        assert_eq!(
            cart.update_quantity(&id, 100).unwrap_err().code,
            ErrorCode::QuantityOutOfRange
        );

        cart.update_quantity(&id, 0).unwrap();
        assert!(cart.is_empty());
        assert_eq!(
            cart.update_quantity(&id, 1).unwrap_err().code,
            ErrorCode::CartItemNotFound
        );
        assert_eq!(cart.remove(&id).unwrap_err().code, ErrorCode::CartItemNotFound);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new("u1");
        cart.add(titanium_item(), 2).unwrap();
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Decimal::ZERO);
    }

    #[test]
    fn test_cart_service_roundtrip() {
        let service = CartService::new(Arc::new(MemoryStore::new()));
        let mut cart = service.load("u1").unwrap();
        assert!(cart.is_empty());

        cart.add(titanium_item(), 2).unwrap();
        service.save(&cart).unwrap();

        let loaded = service.load("u1").unwrap();
        assert_eq!(loaded.item_count(), 2);
        assert_eq!(loaded.subtotal(), Decimal::from(8600));

        assert!(service.discard("u1").unwrap());
        assert!(service.load("u1").unwrap().is_empty());
    }
}
