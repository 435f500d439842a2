//! Catalog Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{domain::accounts::records::SellerUuid, uuids::TypedUuid};

/// Category UUID
pub type CategoryUuid = TypedUuid<CategoryRecord>;

/// Category Record
#[derive(Debug, Clone)]
pub struct CategoryRecord {
    pub uuid: CategoryUuid,
    pub name: String,
}

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub stock: u32,
    pub category_uuid: CategoryUuid,
    pub seller_uuid: SellerUuid,
    pub posted_at: Timestamp,
}

/// Product joined with its category and storefront names, as shown in listings.
#[derive(Debug, Clone)]
pub struct ProductListing {
    pub product: ProductRecord,
    pub category_name: String,
    pub store_name: String,
}

/// Discount UUID
pub type DiscountUuid = TypedUuid<DiscountRecord>;

/// Discount Record
///
/// Active while `starts_at <= now <= ends_at`.
#[derive(Debug, Clone)]
pub struct DiscountRecord {
    pub uuid: DiscountUuid,
    pub product_uuid: ProductUuid,
    pub percentage: Decimal,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
}
