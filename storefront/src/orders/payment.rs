//! Checkout payment instructions
//!
//! No payment is processed here. The storefront shows the customer how to
//! pay a pending order with the method chosen at checkout.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use shared::models::{Order, OrderStatus, PaymentMethod};

/// Merchant receiving accounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayeeInfo {
    pub account_name: String,
    pub alipay_account: String,
    pub wechat_merchant_id: String,
    pub bank_name: String,
    pub bank_account: String,
}

impl Default for PayeeInfo {
    fn default() -> Self {
        Self {
            account_name: "Horology Atelier Co., Ltd.".to_string(),
            alipay_account: "pay@horology-atelier.cn".to_string(),
            wechat_merchant_id: "1600000001".to_string(),
            bank_name: "China Merchants Bank".to_string(),
            bank_account: "6225 8801 0000 0000".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentInstruction {
    pub method: PaymentMethod,
    pub title: String,
    pub amount: Decimal,
    /// Order id to quote with the payment
    pub reference: String,
    pub payee: String,
    pub steps: Vec<String>,
    /// Payment window end (millis)
    pub expires_at: i64,
}

/// Instructions for paying a pending order
pub fn payment_instructions(
    order: &Order,
    payee: &PayeeInfo,
    window_minutes: i64,
) -> AppResult<PaymentInstruction> {
    if order.status != OrderStatus::PendingPayment {
        return Err(AppError::invalid(format!(
            "Order {} is not awaiting payment",
            order.id
        ))
        .with_detail("status", format!("{:?}", order.status)));
    }

    let amount = format!("¥{}", order.total);
    let (payee_account, steps) = match order.payment_method {
        PaymentMethod::Alipay => (
            payee.alipay_account.clone(),
            vec![
                "Open the Alipay app and scan the payment code".to_string(),
                format!("Confirm the amount {}", amount),
                format!("Enter order number {} as the payment note", order.id),
            ],
        ),
        PaymentMethod::WechatPay => (
            payee.wechat_merchant_id.clone(),
            vec![
                "Open WeChat and scan the payment code".to_string(),
                format!("Confirm the amount {}", amount),
                "Keep the payment receipt until the order ships".to_string(),
            ],
        ),
        PaymentMethod::BankTransfer => (
            format!("{} {}", payee.bank_name, payee.bank_account),
            vec![
                format!(
                    "Transfer {} to {} at {}, account {}",
                    amount, payee.account_name, payee.bank_name, payee.bank_account
                ),
                format!("Write order number {} in the transfer remark", order.id),
                "Transfers are confirmed within one business day".to_string(),
            ],
        ),
        PaymentMethod::CreditCard => (
            payee.account_name.clone(),
            vec![
                "Enter the card number, expiry date and security code".to_string(),
                format!("Authorize the charge of {}", amount),
                "Complete the bank verification if prompted".to_string(),
            ],
        ),
    };

    Ok(PaymentInstruction {
        method: order.payment_method,
        title: format!("Pay with {}", order.payment_method.display_name()),
        amount: order.total,
        reference: order.id.clone(),
        payee: payee_account,
        steps,
        expires_at: order.created_at + window_minutes * 60_000,
    })
}
