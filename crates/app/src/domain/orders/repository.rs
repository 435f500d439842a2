//! Orders Repository

use std::str::FromStr;

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::{try_get_amount, try_get_quantity, try_i32_from_u32, try_i64_from_u64},
    domain::{
        accounts::records::{SellerUuid, UserUuid},
        catalog::records::{DiscountUuid, ProductUuid},
        orders::{
            data::{NewOrder, NewOrderLine},
            records::{
                OrderLineRecord, OrderLineUuid, OrderRecord, OrderUuid, PaymentMethod,
                PaymentRecord, PaymentStatus, PaymentUuid,
            },
        },
    },
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_LINE_SQL: &str = include_str!("sql/create_order_line.sql");
const CREATE_PAYMENT_SQL: &str = include_str!("sql/create_payment.sql");
const HAS_COMPLETED_PURCHASE_SQL: &str = include_str!("sql/has_completed_purchase.sql");
const ORDER_HISTORY_SQL: &str = include_str!("sql/order_history.sql");
const LIST_ORDER_LINES_SQL: &str = include_str!("sql/list_order_lines.sql");
const GET_PAYMENT_FOR_SELLER_UPDATE_SQL: &str =
    include_str!("sql/get_payment_for_seller_update.sql");
const UPDATE_PAYMENT_STATUS_SQL: &str = include_str!("sql/update_payment_status.sql");

/// Payment locked for a status change, with the buyer to notify.
#[derive(Debug, Clone)]
pub(crate) struct LockedPayment {
    pub(crate) payment: PaymentRecord,
    pub(crate) buyer_uuid: UserUuid,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &NewOrder,
    ) -> Result<OrderRecord, sqlx::Error> {
        let promo_uuids: Vec<Uuid> = order
            .promo_uuids
            .iter()
            .map(|uuid| uuid.into_uuid())
            .collect();

        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(OrderUuid::new().into_uuid())
            .bind(order.user_uuid.into_uuid())
            .bind(try_i64_from_u64(order.subtotal, "subtotal")?)
            .bind(try_i64_from_u64(order.discount_total, "discount_total")?)
            .bind(try_i64_from_u64(order.total_price, "total_price")?)
            .bind(promo_uuids)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_order_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        line: &NewOrderLine,
    ) -> Result<OrderLineRecord, sqlx::Error> {
        query_as::<Postgres, OrderLineRecord>(CREATE_ORDER_LINE_SQL)
            .bind(OrderLineUuid::new().into_uuid())
            .bind(order.into_uuid())
            .bind(line.product_uuid.into_uuid())
            .bind(try_i32_from_u32(line.quantity, "quantity")?)
            .bind(try_i64_from_u64(line.unit_price, "unit_price")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_payment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        method: PaymentMethod,
        status: PaymentStatus,
    ) -> Result<PaymentRecord, sqlx::Error> {
        query_as::<Postgres, PaymentRecord>(CREATE_PAYMENT_SQL)
            .bind(PaymentUuid::new().into_uuid())
            .bind(order.into_uuid())
            .bind(method.as_str())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    /// Whether the user has an order line for the product whose payment went through.
    pub(crate) async fn has_completed_purchase(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(HAS_COMPLETED_PURCHASE_SQL)
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn order_history(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<(OrderRecord, Option<PaymentRecord>)>, sqlx::Error> {
        let rows = sqlx::query(ORDER_HISTORY_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        rows.iter().map(order_with_payment).collect()
    }

    pub(crate) async fn list_order_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<OrderLineRecord>, sqlx::Error> {
        query_as::<Postgres, OrderLineRecord>(LIST_ORDER_LINES_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Lock a payment whose order contains at least one of the seller's products.
    pub(crate) async fn get_payment_for_seller_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        seller: SellerUuid,
        payment: PaymentUuid,
    ) -> Result<Option<LockedPayment>, sqlx::Error> {
        let row = sqlx::query(GET_PAYMENT_FOR_SELLER_UPDATE_SQL)
            .bind(payment.into_uuid())
            .bind(seller.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        row.map(|row| {
            Ok(LockedPayment {
                payment: PaymentRecord::from_row(&row)?,
                buyer_uuid: UserUuid::from_uuid(row.try_get("buyer_uuid")?),
            })
        })
        .transpose()
    }

    pub(crate) async fn update_payment_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        payment: PaymentUuid,
        status: PaymentStatus,
    ) -> Result<PaymentRecord, sqlx::Error> {
        query_as::<Postgres, PaymentRecord>(UPDATE_PAYMENT_STATUS_SQL)
            .bind(payment.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }
}

fn try_get_parsed<T>(row: &PgRow, col: &str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value: String = row.try_get(col)?;

    value.parse().map_err(|e: T::Err| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let promo_uuids: Vec<Uuid> = row.try_get("promo_uuids")?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            subtotal: try_get_amount(row, "subtotal")?,
            discount_total: try_get_amount(row, "discount_total")?,
            total_price: try_get_amount(row, "total_price")?,
            promo_uuids: promo_uuids.into_iter().map(DiscountUuid::from_uuid).collect(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderLineRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderLineUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            quantity: try_get_quantity(row, "quantity")?,
            unit_price: try_get_amount(row, "unit_price")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for PaymentRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: PaymentUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            method: try_get_parsed(row, "method")?,
            status: try_get_parsed(row, "status")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

fn order_with_payment(row: &PgRow) -> sqlx::Result<(OrderRecord, Option<PaymentRecord>)> {
    let order = OrderRecord::from_row(row)?;

    let payment = match row.try_get::<Option<Uuid>, _>("payment_uuid")? {
        Some(uuid) => Some(PaymentRecord {
            uuid: PaymentUuid::from_uuid(uuid),
            order_uuid: order.uuid,
            method: try_get_parsed(row, "payment_method")?,
            status: try_get_parsed(row, "payment_status")?,
            created_at: row
                .try_get::<SqlxTimestamp, _>("payment_created_at")?
                .to_jiff(),
            updated_at: row
                .try_get::<SqlxTimestamp, _>("payment_updated_at")?
                .to_jiff(),
        }),
        None => None,
    };

    Ok((order, payment))
}
