//! Account Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// User Record
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub created_at: Timestamp,
}

/// Seller UUID
pub type SellerUuid = TypedUuid<SellerRecord>;

/// Seller Record
///
/// A storefront owned by a user account. Notifications addressed to the seller go
/// to `user_uuid`.
#[derive(Debug, Clone)]
pub struct SellerRecord {
    pub uuid: SellerUuid,
    pub user_uuid: UserUuid,
    pub store_name: String,
    pub created_at: Timestamp,
}
