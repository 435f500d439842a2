//! Checkout Records

use crate::domain::orders::records::{OrderLineRecord, OrderRecord, PaymentRecord};

/// Everything written by a successful checkout.
#[derive(Debug, Clone)]
pub struct OrderReceipt {
    pub order: OrderRecord,
    pub lines: Vec<OrderLineRecord>,
    pub payment: PaymentRecord,
}
