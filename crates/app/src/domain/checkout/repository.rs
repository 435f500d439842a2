//! Checkout Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::{try_get_amount, try_get_quantity, try_i32_from_u32},
    domain::{
        accounts::records::{SellerUuid, UserUuid},
        carts::records::CartItemUuid,
        catalog::records::ProductUuid,
        checkout::data::CheckoutLine,
    },
};

const LOCK_CART_LINES_SQL: &str = include_str!("sql/lock_cart_lines.sql");
const GET_DIRECT_LINE_SQL: &str = include_str!("sql/get_direct_line.sql");
const DELETE_CART_ITEMS_SQL: &str = include_str!("sql/delete_cart_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCheckoutRepository;

impl PgCheckoutRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Lock the user's cart rows for the rest of the transaction and read them with
    /// current product price and stock.
    pub(crate) async fn lock_cart_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<CheckoutLine>, sqlx::Error> {
        query_as::<Postgres, CheckoutLine>(LOCK_CART_LINES_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_direct_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<Option<CheckoutLine>, sqlx::Error> {
        query_as::<Postgres, CheckoutLine>(GET_DIRECT_LINE_SQL)
            .bind(product.into_uuid())
            .bind(try_i32_from_u32(quantity, "quantity")?)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn delete_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        items: &[CartItemUuid],
    ) -> Result<u64, sqlx::Error> {
        let uuids: Vec<Uuid> = items.iter().map(|item| item.into_uuid()).collect();

        let rows_affected = query(DELETE_CART_ITEMS_SQL)
            .bind(user.into_uuid())
            .bind(uuids)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CheckoutLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            cart_item_uuid: row
                .try_get::<Option<Uuid>, _>("cart_item_uuid")?
                .map(CartItemUuid::from_uuid),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            unit_price: try_get_amount(row, "unit_price")?,
            stock: try_get_quantity(row, "stock")?,
            quantity: try_get_quantity(row, "quantity")?,
            seller_uuid: SellerUuid::from_uuid(row.try_get("seller_uuid")?),
            seller_user_uuid: UserUuid::from_uuid(row.try_get("seller_user_uuid")?),
            store_name: row.try_get("store_name")?,
        })
    }
}
