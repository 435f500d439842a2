//! Cart Records

use jiff::Timestamp;

use crate::{
    domain::{accounts::records::UserUuid, catalog::records::ProductUuid},
    uuids::TypedUuid,
};

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// CartItem Record
#[derive(Debug, Clone)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub user_uuid: UserUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub added_at: Timestamp,
}

/// Cart item joined with the current price of its product.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub item: CartItemRecord,
    pub product_name: String,
    pub unit_price: u64,
    pub subtotal: u64,
}
