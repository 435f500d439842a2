//! Document store connection management

use std::str::FromStr;

use jiff::Timestamp;
use mongodb::{
    Client, Collection, Database, IndexModel,
    bson::{DateTime, doc},
    error::{Error, ErrorKind, WriteFailure},
    options::IndexOptions,
};
use thiserror::Error;

use crate::uuids::TypedUuid;

pub(crate) const REVIEWS_COLLECTION: &str = "reviews";
pub(crate) const NOTIFICATIONS_COLLECTION: &str = "notifications";

const DUPLICATE_KEY_CODE: i32 = 11000;

/// Handle on the document database holding reviews and notifications.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    database: Database,
}

impl DocumentStore {
    #[must_use]
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Connect to `MongoDB` and select the named database.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string is invalid or the client cannot be built.
    pub async fn connect(url: &str, database: &str) -> Result<Self, Error> {
        let client = Client::with_uri_str(url).await?;

        Ok(Self::new(client.database(database)))
    }

    /// Create the indexes the review and notification queries rely on.
    ///
    /// The unique `(user_uuid, product_uuid)` index on reviews is what keeps
    /// concurrent review submissions from producing two reviews for one purchase.
    ///
    /// # Errors
    ///
    /// Returns an error if index creation fails.
    pub async fn ensure_indexes(&self) -> Result<(), Error> {
        let reviews = self
            .database
            .collection::<mongodb::bson::Document>(REVIEWS_COLLECTION);

        reviews
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "user_uuid": 1, "product_uuid": 1 })
                    .options(
                        IndexOptions::builder()
                            .name("reviews_user_product_unique".to_string())
                            .unique(true)
                            .build(),
                    )
                    .build(),
            )
            .await?;

        reviews
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "product_uuid": 1, "created_at": -1 })
                    .options(
                        IndexOptions::builder()
                            .name("reviews_product_created_at".to_string())
                            .build(),
                    )
                    .build(),
            )
            .await?;

        self.database
            .collection::<mongodb::bson::Document>(NOTIFICATIONS_COLLECTION)
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "user_uuid": 1, "created_at": -1 })
                    .options(
                        IndexOptions::builder()
                            .name("notifications_user_created_at".to_string())
                            .build(),
                    )
                    .build(),
            )
            .await?;

        Ok(())
    }

    #[must_use]
    pub fn database(&self) -> &Database {
        &self.database
    }

    pub(crate) fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.database.collection(name)
    }
}

/// A stored document could not be mapped back onto its record.
#[derive(Debug, Error)]
pub enum DocumentDecodeError {
    #[error("invalid uuid in field `{field}`")]
    Uuid {
        field: &'static str,
        #[source]
        source: uuid::Error,
    },

    #[error("invalid timestamp in field `{field}`")]
    Timestamp {
        field: &'static str,
        #[source]
        source: jiff::Error,
    },

    #[error("value out of range in field `{field}`")]
    OutOfRange { field: &'static str },
}

pub(crate) fn parse_uuid<T>(
    value: &str,
    field: &'static str,
) -> Result<TypedUuid<T>, DocumentDecodeError> {
    TypedUuid::from_str(value).map_err(|source| DocumentDecodeError::Uuid { field, source })
}

pub(crate) fn to_timestamp(
    value: DateTime,
    field: &'static str,
) -> Result<Timestamp, DocumentDecodeError> {
    Timestamp::from_millisecond(value.timestamp_millis())
        .map_err(|source| DocumentDecodeError::Timestamp { field, source })
}

pub(crate) fn is_duplicate_key(error: &Error) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    )
}
