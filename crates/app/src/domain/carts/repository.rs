//! Cart Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::{try_get_amount, try_get_quantity, try_i32_from_u32},
    domain::{
        accounts::records::UserUuid,
        carts::{
            data::NewCartItem,
            records::{CartItemRecord, CartItemUuid, CartLine},
        },
        catalog::records::ProductUuid,
    },
};

const UPSERT_CART_ITEM_SQL: &str = include_str!("sql/upsert_cart_item.sql");
const LIST_CART_LINES_SQL: &str = include_str!("sql/list_cart_lines.sql");
const GET_CART_ITEM_FOR_UPDATE_SQL: &str = include_str!("sql/get_cart_item_for_update.sql");
const UPDATE_CART_ITEM_QUANTITY_SQL: &str = include_str!("sql/update_cart_item_quantity.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("sql/delete_cart_item.sql");

const COLUMN_QUANTITY: &str = "quantity";

/// Cart item together with the live stock of its product.
#[derive(Debug, Clone)]
pub(crate) struct StockedCartItem {
    pub(crate) item: CartItemRecord,
    pub(crate) stock: u32,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert a cart line, or add to the quantity of an existing line for the product.
    pub(crate) async fn upsert_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        item: &NewCartItem,
    ) -> Result<CartItemRecord, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(UPSERT_CART_ITEM_SQL)
            .bind(CartItemUuid::new().into_uuid())
            .bind(user.into_uuid())
            .bind(item.product_uuid.into_uuid())
            .bind(try_i32_from_u32(item.quantity, COLUMN_QUANTITY)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_cart_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<CartLine>, sqlx::Error> {
        query_as::<Postgres, CartLine>(LIST_CART_LINES_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_cart_item_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<Option<StockedCartItem>, sqlx::Error> {
        let row = query(GET_CART_ITEM_FOR_UPDATE_SQL)
            .bind(item.into_uuid())
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        row.map(|row| {
            Ok(StockedCartItem {
                item: CartItemRecord::from_row(&row)?,
                stock: try_get_quantity(&row, "stock")?,
            })
        })
        .transpose()
    }

    pub(crate) async fn update_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        item: CartItemUuid,
        quantity: u32,
    ) -> Result<CartItemRecord, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(UPDATE_CART_ITEM_QUANTITY_SQL)
            .bind(item.into_uuid())
            .bind(user.into_uuid())
            .bind(try_i32_from_u32(quantity, COLUMN_QUANTITY)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartItemUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            quantity: try_get_quantity(row, COLUMN_QUANTITY)?,
            added_at: row.try_get::<SqlxTimestamp, _>("added_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CartLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let item = CartItemRecord::from_row(row)?;
        let unit_price = try_get_amount(row, "unit_price")?;

        let subtotal = unit_price
            .checked_mul(u64::from(item.quantity))
            .ok_or_else(|| sqlx::Error::ColumnDecode {
                index: "unit_price".to_string(),
                source: "cart line subtotal overflows".into(),
            })?;

        Ok(Self {
            item,
            product_name: row.try_get("product_name")?,
            unit_price,
            subtotal,
        })
    }
}
