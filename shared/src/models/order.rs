//! Order Model
//!
//! Two shapes exist for status and payment method: the customer-facing enums
//! used by the storefront ([`OrderStatus`], [`PaymentMethod`]) and the
//! persisted codes ([`StoredOrderStatus`], [`StoredPaymentMethod`]). Each pair
//! is declared once in a bidirectional table below; both `From` directions are
//! generated from that single table.

use super::configuration::Configuration;
use super::pricing::PricingBreakdown;
use super::user::Address;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Generate `From` in both directions from one variant table
macro_rules! bidirectional_map {
    ($left:ident <=> $right:ident { $($l:ident <=> $r:ident),+ $(,)? }) => {
        impl From<$left> for $right {
            fn from(value: $left) -> Self {
                match value {
                    $($left::$l => $right::$r,)+
                }
            }
        }

        impl From<$right> for $left {
            fn from(value: $right) -> Self {
                match value {
                    $($right::$r => $left::$l,)+
                }
            }
        }
    };
}

/// Order status as shown to the customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    PendingPayment,
    Paid,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::PendingPayment,
        OrderStatus::Paid,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Lifecycle: pending -> paid -> processing -> shipped -> delivered,
    /// with cancellation allowed until the order is processed.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (PendingPayment, Paid)
                | (Paid, Processing)
                | (Processing, Shipped)
                | (Shipped, Delivered)
                | (PendingPayment, Cancelled)
                | (Paid, Cancelled)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

/// Persisted order status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoredOrderStatus {
    Pending,
    Paid,
    InProduction,
    Shipped,
    Completed,
    Cancelled,
}

bidirectional_map!(OrderStatus <=> StoredOrderStatus {
    PendingPayment <=> Pending,
    Paid <=> Paid,
    Processing <=> InProduction,
    Shipped <=> Shipped,
    Delivered <=> Completed,
    Cancelled <=> Cancelled,
});

/// Payment method as offered at checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Alipay,
    WechatPay,
    BankTransfer,
    CreditCard,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Alipay,
        PaymentMethod::WechatPay,
        PaymentMethod::BankTransfer,
        PaymentMethod::CreditCard,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Alipay => "Alipay",
            PaymentMethod::WechatPay => "WeChat Pay",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::CreditCard => "Credit Card",
        }
    }
}

/// Persisted payment method code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoredPaymentMethod {
    Alipay,
    Wechat,
    Bank,
    Card,
}

bidirectional_map!(PaymentMethod <=> StoredPaymentMethod {
    Alipay <=> Alipay,
    WechatPay <=> Wechat,
    BankTransfer <=> Bank,
    CreditCard <=> Card,
});

/// Order line item (snapshot of a cart line)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub line_id: String,
    pub product_id: String,
    pub product_name: String,
    pub configuration: Configuration,
    pub pricing: PricingBreakdown,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub line_total: Decimal,
}

/// Order as used by the storefront
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub items: Vec<OrderLineItem>,
    pub shipping_address: Address,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub subtotal: Decimal,
    pub total: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order as persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: String,
    pub user_id: String,
    pub items: Vec<OrderLineItem>,
    pub shipping_address: Address,
    pub payment_method: StoredPaymentMethod,
    pub status: StoredOrderStatus,
    pub subtotal: Decimal,
    pub total: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Order> for OrderRecord {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            items: order.items,
            shipping_address: order.shipping_address,
            payment_method: order.payment_method.into(),
            status: order.status.into(),
            subtotal: order.subtotal,
            total: order.total,
            note: order.note,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

impl From<OrderRecord> for Order {
    fn from(record: OrderRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            items: record.items,
            shipping_address: record.shipping_address,
            payment_method: record.payment_method.into(),
            status: record.status.into(),
            subtotal: record.subtotal,
            total: record.total,
            note: record.note,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
