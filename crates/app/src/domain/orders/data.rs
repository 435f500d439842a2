//! Order Data

use crate::domain::{
    accounts::records::UserUuid,
    catalog::records::{DiscountUuid, ProductUuid},
};

/// New Order Data
///
/// `total_price` must equal `subtotal - discount_total`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub user_uuid: UserUuid,
    pub subtotal: u64,
    pub discount_total: u64,
    pub total_price: u64,
    pub promo_uuids: Vec<DiscountUuid>,
}

/// New Order Line Data
///
/// `unit_price` is the undiscounted product price at purchase time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderLine {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub unit_price: u64,
}
