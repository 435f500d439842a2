//! Cart Data

use crate::domain::catalog::records::ProductUuid;

/// New Cart Item Data
///
/// Adding a product already in the cart increments the existing line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
}
