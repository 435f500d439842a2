//! Catalog service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogServiceError {
    #[error("product not found")]
    ProductNotFound,

    #[error("seller not found")]
    SellerNotFound,

    #[error("user not found")]
    UserNotFound,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CatalogServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::ProductNotFound;
        }

        Self::Sql(error)
    }
}
