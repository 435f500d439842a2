//! Wishlist Records

use jiff::Timestamp;

use crate::{
    domain::{
        accounts::records::UserUuid,
        catalog::records::{ProductListing, ProductUuid},
    },
    uuids::TypedUuid,
};

/// Wishlist Item UUID
pub type WishlistItemUuid = TypedUuid<WishlistItemRecord>;

/// Wishlist Item Record
#[derive(Debug, Clone)]
pub struct WishlistItemRecord {
    pub uuid: WishlistItemUuid,
    pub user_uuid: UserUuid,
    pub product_uuid: ProductUuid,
    pub added_at: Timestamp,
}

/// Wishlist item joined with the current listing of its product.
#[derive(Debug, Clone)]
pub struct WishlistEntry {
    pub item: WishlistItemRecord,
    pub listing: ProductListing,
}
