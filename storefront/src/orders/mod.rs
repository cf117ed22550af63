//! Order placement and lifecycle
//!
//! Orders are built from a cart snapshot and persisted as `OrderRecord`
//! (storage enums) through the store. The customer-facing `Order` is
//! converted back through the status/payment mapping tables on read.

mod payment;

pub use payment::{PayeeInfo, PaymentInstruction, payment_instructions};

use crate::cart::Cart;
use crate::pricing::{line_total, round_money};
use crate::storage::Store;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Address, Order, OrderLineItem, OrderRecord, OrderStatus, PaymentMethod};
use shared::util::{now_millis, snowflake_id};
use std::sync::Arc;
use validator::Validate;

/// Order id prefix
pub const ORDER_ID_PREFIX: &str = "WO";

pub struct OrderService<S: Store> {
    store: Arc<S>,
}

impl<S: Store> OrderService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Turn a cart into a pending order
    pub fn place_order(
        &self,
        user_id: &str,
        cart: &Cart,
        address: &Address,
        payment_method: PaymentMethod,
        note: Option<String>,
    ) -> AppResult<Order> {
        if cart.is_empty() {
            return Err(AppError::with_message(ErrorCode::CartEmpty, "Cart is empty"));
        }

        if let Err(e) = address.to_input().validate() {
            return Err(
                AppError::with_message(ErrorCode::AddressInvalid, e.to_string())
                    .with_detail("address_id", address.id.as_str()),
            );
        }

        let items: Vec<OrderLineItem> = cart
            .lines
            .iter()
            .map(|line| OrderLineItem {
                line_id: line.line_id.clone(),
                product_id: line.product_id.clone(),
                product_name: line.product_name.clone(),
                configuration: line.configuration.clone(),
                pricing: line.pricing.clone(),
                unit_price: line.unit_price,
                quantity: line.quantity,
                line_total: line_total(line.unit_price, line.quantity),
            })
            .collect();

        let subtotal = round_money(items.iter().map(|i| i.line_total).sum());
        let now = now_millis();
        let order = Order {
            id: format!("{}{}", ORDER_ID_PREFIX, snowflake_id()),
            user_id: user_id.to_string(),
            items,
            shipping_address: address.clone(),
            payment_method,
            status: OrderStatus::PendingPayment,
            subtotal,
            total: subtotal,
            note: note.filter(|n| !n.trim().is_empty()),
            created_at: now,
            updated_at: now,
        };

        self.store.save(&OrderRecord::from(order.clone()))?;
        tracing::info!(
            order_id = %order.id,
            user_id = %user_id,
            total = %order.total,
            payment_method = ?payment_method,
            "Order placed"
        );
        Ok(order)
    }

    pub fn find_by_id(&self, order_id: &str) -> AppResult<Order> {
        self.store
            .find_by_id::<OrderRecord>(order_id)?
            .map(Order::from)
            .ok_or_else(|| {
                AppError::with_message(ErrorCode::OrderNotFound, format!("Order {} not found", order_id))
                    .with_detail("order_id", order_id)
            })
    }

    /// Move an order to `next` if the lifecycle allows it
    pub fn transition(&self, order_id: &str, next: OrderStatus) -> AppResult<Order> {
        let mut order = self.find_by_id(order_id)?;

        if order.status == OrderStatus::Cancelled && next == OrderStatus::Cancelled {
            return Err(AppError::with_message(
                ErrorCode::OrderAlreadyCancelled,
                format!("Order {} is already cancelled", order_id),
            ));
        }
        if !order.status.can_transition_to(next) {
            return Err(AppError::with_message(
                ErrorCode::OrderInvalidTransition,
                format!("Cannot move order from {:?} to {:?}", order.status, next),
            )
            .with_detail("from", format!("{:?}", order.status))
            .with_detail("to", format!("{:?}", next)));
        }

        let previous = order.status;
        order.status = next;
        order.updated_at = now_millis();
        self.store.save(&OrderRecord::from(order.clone()))?;

        tracing::info!(order_id = %order_id, from = ?previous, to = ?next, "Order status changed");
        Ok(order)
    }

    pub fn cancel(&self, order_id: &str) -> AppResult<Order> {
        self.transition(order_id, OrderStatus::Cancelled)
    }

    /// A user's orders, newest first
    pub fn list_for_user(&self, user_id: &str) -> AppResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .store
            .load_all::<OrderRecord>()?
            .into_iter()
            .filter(|r| r.user_id == user_id)
            .map(Order::from)
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(orders)
    }

    pub fn count(&self) -> AppResult<usize> {
        Ok(self.store.load_all::<OrderRecord>()?.len())
    }
}
