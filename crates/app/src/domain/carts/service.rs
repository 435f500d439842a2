//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        accounts::records::UserUuid,
        carts::{
            data::NewCartItem,
            errors::CartsServiceError,
            records::{CartItemRecord, CartItemUuid, CartLine},
            repository::PgCartItemsRepository,
        },
        catalog::repositories::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    items: PgCartItemsRepository,
    products: PgProductsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            items: PgCartItemsRepository::new(),
            products: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    #[tracing::instrument(
        name = "carts.service.add_item",
        skip(self, item),
        fields(
            user_uuid = %user,
            product_uuid = %item.product_uuid,
            quantity = item.quantity
        ),
        err
    )]
    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError> {
        if item.quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin_transaction().await?;

        let product = self
            .products
            .get_product(&mut tx, item.product_uuid)
            .await?
            .ok_or(CartsServiceError::ProductNotFound)?;

        let record = self.items.upsert_cart_item(&mut tx, user, &item).await?;

        // The line may already have held some of the stock.
        if record.quantity > product.stock {
            return Err(CartsServiceError::InsufficientStock {
                product: product.uuid,
                available: product.stock,
            });
        }

        tx.commit().await?;

        info!(cart_item_uuid = %record.uuid, quantity = record.quantity, "added cart item");

        Ok(record)
    }

    #[tracing::instrument(name = "carts.service.list_items", skip(self), fields(user_uuid = %user), err)]
    async fn list_items(&self, user: UserUuid) -> Result<Vec<CartLine>, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let lines = self.items.list_cart_lines(&mut tx, user).await?;

        tx.commit().await?;

        Ok(lines)
    }

    #[tracing::instrument(
        name = "carts.service.change_quantity",
        skip(self),
        fields(user_uuid = %user, cart_item_uuid = %item),
        err
    )]
    async fn change_quantity(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        quantity: u32,
    ) -> Result<CartItemRecord, CartsServiceError> {
        if quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin_transaction().await?;

        let current = self
            .items
            .get_cart_item_for_update(&mut tx, user, item)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        if quantity > current.stock {
            return Err(CartsServiceError::InsufficientStock {
                product: current.item.product_uuid,
                available: current.stock,
            });
        }

        let record = self
            .items
            .update_quantity(&mut tx, user, item, quantity)
            .await?;

        tx.commit().await?;

        info!(cart_item_uuid = %record.uuid, quantity, "changed cart item quantity");

        Ok(record)
    }

    #[tracing::instrument(
        name = "carts.service.remove_item",
        skip(self),
        fields(user_uuid = %user, cart_item_uuid = %item),
        err
    )]
    async fn remove_item(&self, user: UserUuid, item: CartItemUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.items.delete_cart_item(&mut tx, user, item).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(cart_item_uuid = %item, "removed cart item");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Add a product to the user's cart, incrementing the line if it is already there.
    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// The user's cart lines, newest first, priced at the current product price.
    async fn list_items(&self, user: UserUuid) -> Result<Vec<CartLine>, CartsServiceError>;

    /// Overwrite the quantity of one of the user's cart lines.
    async fn change_quantity(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        quantity: u32,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Remove one of the user's cart lines.
    async fn remove_item(&self, user: UserUuid, item: CartItemUuid) -> Result<(), CartsServiceError>;
}
