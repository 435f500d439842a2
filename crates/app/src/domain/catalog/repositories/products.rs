//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::{try_get_amount, try_get_quantity, try_i32_from_u32},
    domain::{
        accounts::records::SellerUuid,
        catalog::records::{CategoryUuid, ProductListing, ProductRecord, ProductUuid},
    },
};

const LIST_PRODUCTS_SQL: &str = include_str!("../sql/list_products.sql");
const LIST_SELLER_PRODUCTS_SQL: &str = include_str!("../sql/list_seller_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("../sql/get_product.sql");
const GET_PRODUCT_LISTING_SQL: &str = include_str!("../sql/get_product_listing.sql");
const DECREMENT_STOCK_SQL: &str = include_str!("../sql/decrement_stock.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<ProductListing>, sqlx::Error> {
        query_as::<Postgres, ProductListing>(LIST_PRODUCTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_seller_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        seller: SellerUuid,
    ) -> Result<Vec<ProductListing>, sqlx::Error> {
        query_as::<Postgres, ProductListing>(LIST_SELLER_PRODUCTS_SQL)
            .bind(seller.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Option<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn get_product_listing(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Option<ProductListing>, sqlx::Error> {
        query_as::<Postgres, ProductListing>(GET_PRODUCT_LISTING_SQL)
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Take `quantity` units out of stock, but only if that many remain.
    ///
    /// The stock check is evaluated against the row as locked by this statement, so
    /// concurrent decrements of the same product serialise on the row lock. Returns
    /// `false` when the remaining stock was insufficient and nothing changed.
    pub(crate) async fn decrement_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = query(DECREMENT_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(try_i32_from_u32(quantity, "stock")?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected == 1)
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: try_get_amount(row, "price")?,
            stock: try_get_quantity(row, "stock")?,
            category_uuid: CategoryUuid::from_uuid(row.try_get("category_uuid")?),
            seller_uuid: SellerUuid::from_uuid(row.try_get("seller_uuid")?),
            posted_at: row.try_get::<SqlxTimestamp, _>("posted_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductListing {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product: ProductRecord::from_row(row)?,
            category_name: row.try_get("category_name")?,
            store_name: row.try_get("store_name")?,
        })
    }
}
