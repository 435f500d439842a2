//! Checkout Data

use crate::domain::{
    accounts::records::{SellerUuid, UserUuid},
    carts::records::CartItemUuid,
    catalog::records::ProductUuid,
};

/// A product about to be purchased, read inside the checkout transaction.
///
/// `cart_item_uuid` is `None` for a direct purchase that bypasses the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLine {
    pub cart_item_uuid: Option<CartItemUuid>,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub unit_price: u64,
    pub stock: u32,
    pub quantity: u32,
    pub seller_uuid: SellerUuid,
    pub seller_user_uuid: UserUuid,
    pub store_name: String,
}
