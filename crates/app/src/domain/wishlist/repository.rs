//! Wishlist Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    accounts::records::UserUuid,
    catalog::records::{ProductListing, ProductUuid},
    wishlist::records::{WishlistEntry, WishlistItemRecord, WishlistItemUuid},
};

const INSERT_WISHLIST_ITEM_SQL: &str = include_str!("sql/insert_wishlist_item.sql");
const LIST_WISHLIST_ENTRIES_SQL: &str = include_str!("sql/list_wishlist_entries.sql");
const DELETE_WISHLIST_ITEM_SQL: &str = include_str!("sql/delete_wishlist_item.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgWishlistItemsRepository;

impl PgWishlistItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert a wishlist item; `None` when the product is already on the user's list.
    pub(crate) async fn insert_wishlist_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<Option<WishlistItemRecord>, sqlx::Error> {
        query_as::<Postgres, WishlistItemRecord>(INSERT_WISHLIST_ITEM_SQL)
            .bind(WishlistItemUuid::new().into_uuid())
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_wishlist_entries(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<WishlistEntry>, sqlx::Error> {
        query_as::<Postgres, WishlistEntry>(LIST_WISHLIST_ENTRIES_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn delete_wishlist_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        item: WishlistItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_WISHLIST_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for WishlistItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: WishlistItemUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            added_at: row.try_get::<SqlxTimestamp, _>("added_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for WishlistEntry {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let listing = ProductListing::from_row(row)?;

        Ok(Self {
            item: WishlistItemRecord {
                uuid: WishlistItemUuid::from_uuid(row.try_get("wishlist_item_uuid")?),
                user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
                product_uuid: listing.product.uuid,
                added_at: row.try_get::<SqlxTimestamp, _>("added_at")?.to_jiff(),
            },
            listing,
        })
    }
}
