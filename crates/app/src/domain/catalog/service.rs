//! Catalog service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        accounts::{
            records::{SellerRecord, SellerUuid, UserRecord, UserUuid},
            repository::PgAccountsRepository,
        },
        catalog::{
            errors::CatalogServiceError,
            records::{ProductListing, ProductUuid},
            repositories::PgProductsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    products: PgProductsRepository,
    accounts: PgAccountsRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            products: PgProductsRepository::new(),
            accounts: PgAccountsRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    #[tracing::instrument(name = "catalog.service.list_products", skip(self), err)]
    async fn list_products(&self) -> Result<Vec<ProductListing>, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let products = self.products.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    #[tracing::instrument(
        name = "catalog.service.get_product",
        skip(self),
        fields(product_uuid = %product),
        err
    )]
    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductListing, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self
            .products
            .get_product_listing(&mut tx, product)
            .await?
            .ok_or(CatalogServiceError::ProductNotFound)?;

        tx.commit().await?;

        Ok(product)
    }

    #[tracing::instrument(
        name = "catalog.service.list_seller_products",
        skip(self),
        fields(seller_uuid = %seller),
        err
    )]
    async fn list_seller_products(
        &self,
        seller: SellerUuid,
    ) -> Result<Vec<ProductListing>, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let products = self.products.list_seller_products(&mut tx, seller).await?;

        tx.commit().await?;

        Ok(products)
    }

    #[tracing::instrument(name = "catalog.service.get_seller", skip(self), fields(seller_uuid = %seller), err)]
    async fn get_seller(&self, seller: SellerUuid) -> Result<SellerRecord, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let seller = self
            .accounts
            .get_seller(&mut tx, seller)
            .await?
            .ok_or(CatalogServiceError::SellerNotFound)?;

        tx.commit().await?;

        Ok(seller)
    }

    #[tracing::instrument(name = "catalog.service.get_user", skip(self), fields(user_uuid = %user), err)]
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let user = self
            .accounts
            .get_user(&mut tx, user)
            .await?
            .ok_or(CatalogServiceError::UserNotFound)?;

        tx.commit().await?;

        Ok(user)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Retrieves all products, newest first.
    async fn list_products(&self) -> Result<Vec<ProductListing>, CatalogServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid)
    -> Result<ProductListing, CatalogServiceError>;

    /// Retrieves the products offered by one storefront.
    async fn list_seller_products(
        &self,
        seller: SellerUuid,
    ) -> Result<Vec<ProductListing>, CatalogServiceError>;

    /// Retrieve a storefront.
    async fn get_seller(&self, seller: SellerUuid) -> Result<SellerRecord, CatalogServiceError>;

    /// Retrieve a buyer account.
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, CatalogServiceError>;
}
