//! Wishlist service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        accounts::records::UserUuid,
        catalog::{records::ProductUuid, repositories::PgProductsRepository},
        wishlist::{
            errors::WishlistServiceError,
            records::{WishlistEntry, WishlistItemRecord, WishlistItemUuid},
            repository::PgWishlistItemsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgWishlistService {
    db: Db,
    items: PgWishlistItemsRepository,
    products: PgProductsRepository,
}

impl PgWishlistService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            items: PgWishlistItemsRepository::new(),
            products: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl WishlistService for PgWishlistService {
    #[tracing::instrument(
        name = "wishlist.service.add_item",
        skip(self),
        fields(user_uuid = %user, product_uuid = %product),
        err
    )]
    async fn add_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<WishlistItemRecord, WishlistServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.products
            .get_product(&mut tx, product)
            .await?
            .ok_or(WishlistServiceError::ProductNotFound)?;

        let record = self
            .items
            .insert_wishlist_item(&mut tx, user, product)
            .await?
            .ok_or(WishlistServiceError::AlreadyInWishlist)?;

        tx.commit().await?;

        info!(wishlist_item_uuid = %record.uuid, "added wishlist item");

        Ok(record)
    }

    #[tracing::instrument(name = "wishlist.service.list_items", skip(self), fields(user_uuid = %user), err)]
    async fn list_items(&self, user: UserUuid) -> Result<Vec<WishlistEntry>, WishlistServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let entries = self.items.list_wishlist_entries(&mut tx, user).await?;

        tx.commit().await?;

        Ok(entries)
    }

    #[tracing::instrument(
        name = "wishlist.service.remove_item",
        skip(self),
        fields(user_uuid = %user, wishlist_item_uuid = %item),
        err
    )]
    async fn remove_item(
        &self,
        user: UserUuid,
        item: WishlistItemUuid,
    ) -> Result<(), WishlistServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        if self.items.delete_wishlist_item(&mut tx, user, item).await? == 0 {
            return Err(WishlistServiceError::NotFound);
        }

        tx.commit().await?;

        info!(wishlist_item_uuid = %item, "removed wishlist item");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait WishlistService: Send + Sync {
    /// Save a product to the user's wishlist. Each product appears at most once.
    async fn add_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<WishlistItemRecord, WishlistServiceError>;

    /// The user's wishlist, newest first, with the current product listing.
    async fn list_items(&self, user: UserUuid) -> Result<Vec<WishlistEntry>, WishlistServiceError>;

    async fn remove_item(
        &self,
        user: UserUuid,
        item: WishlistItemUuid,
    ) -> Result<(), WishlistServiceError>;
}
