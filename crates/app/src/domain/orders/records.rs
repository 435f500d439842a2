//! Order Records

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use thiserror::Error;

use crate::{
    domain::{
        accounts::records::UserUuid,
        catalog::records::{DiscountUuid, ProductUuid},
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Record
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub subtotal: u64,
    pub discount_total: u64,
    pub total_price: u64,
    pub promo_uuids: Vec<DiscountUuid>,
    pub created_at: Timestamp,
}

/// Order Line UUID
pub type OrderLineUuid = TypedUuid<OrderLineRecord>;

/// Order Line Record
#[derive(Debug, Clone)]
pub struct OrderLineRecord {
    pub uuid: OrderLineUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub unit_price: u64,
}

/// Payment UUID
pub type PaymentUuid = TypedUuid<PaymentRecord>;

/// Payment Record
#[derive(Debug, Clone)]
pub struct PaymentRecord {
    pub uuid: PaymentUuid,
    pub order_uuid: OrderUuid,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An order with its lines and payment, as shown in the purchase history.
#[derive(Debug, Clone)]
pub struct OrderSummary {
    pub order: OrderRecord,
    pub lines: Vec<OrderLineRecord>,
    pub payment: Option<PaymentRecord>,
}

#[derive(Debug, Error)]
#[error("unknown payment method `{0}`")]
pub struct InvalidPaymentMethod(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    BankTransfer,
    EWallet,
    CashOnDelivery,
}

impl PaymentMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BankTransfer => "bank_transfer",
            Self::EWallet => "e_wallet",
            Self::CashOnDelivery => "cash_on_delivery",
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = InvalidPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "bank_transfer" => Ok(Self::BankTransfer),
            "e_wallet" | "ewallet" => Ok(Self::EWallet),
            "cash_on_delivery" | "cod" => Ok(Self::CashOnDelivery),
            _ => Err(InvalidPaymentMethod(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown payment status `{0}`")]
pub struct InvalidPaymentStatus(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentStatus {
    Pending,
    Success,
    Paid,
    Failed,
    Cancelled,
}

impl PaymentStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Paid => "paid",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether the payment counts as a completed purchase.
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Success | Self::Paid)
    }

    /// Whether a seller may move a payment from this status.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::Success)
    }

    /// Whether a seller may move a payment to this status.
    #[must_use]
    pub const fn is_seller_settable(self) -> bool {
        matches!(self, Self::Paid | Self::Failed | Self::Cancelled)
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = InvalidPaymentStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "success" => Ok(Self::Success),
            "paid" => Ok(Self::Paid),
            "failed" => Ok(Self::Failed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(InvalidPaymentStatus(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_method_accepts_hyphenated_and_stored_forms() {
        assert_eq!(
            "bank-transfer".parse::<PaymentMethod>().ok(),
            Some(PaymentMethod::BankTransfer)
        );
        assert_eq!(
            "E-Wallet".parse::<PaymentMethod>().ok(),
            Some(PaymentMethod::EWallet)
        );
        assert_eq!(
            "cash_on_delivery".parse::<PaymentMethod>().ok(),
            Some(PaymentMethod::CashOnDelivery)
        );
        assert_eq!(
            "cod".parse::<PaymentMethod>().ok(),
            Some(PaymentMethod::CashOnDelivery)
        );
    }

    #[test]
    fn payment_method_rejects_anything_else() {
        let result = "credit-card".parse::<PaymentMethod>();

        assert!(
            matches!(result, Err(InvalidPaymentMethod(ref value)) if value == "credit-card"),
            "expected InvalidPaymentMethod, got {result:?}"
        );
    }

    #[test]
    fn only_success_and_paid_complete_a_purchase() {
        assert!(PaymentStatus::Success.is_completed());
        assert!(PaymentStatus::Paid.is_completed());
        assert!(!PaymentStatus::Pending.is_completed());
        assert!(!PaymentStatus::Failed.is_completed());
        assert!(!PaymentStatus::Cancelled.is_completed());
    }

    #[test]
    fn payment_status_round_trips_through_storage_form() {
        for status in [
            PaymentStatus::Pending,
            PaymentStatus::Success,
            PaymentStatus::Paid,
            PaymentStatus::Failed,
            PaymentStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<PaymentStatus>().ok(), Some(status));
        }
    }
}
