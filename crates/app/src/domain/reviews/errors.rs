//! Reviews service errors.

use thiserror::Error;

use crate::{
    documents::{DocumentDecodeError, is_duplicate_key},
    domain::reviews::records::InvalidRating,
};

#[derive(Debug, Error)]
pub enum ReviewsServiceError {
    #[error("product not found")]
    ProductNotFound,

    #[error("review not found")]
    NotFound,

    #[error("user not found")]
    UserNotFound,

    #[error("seller not found")]
    SellerNotFound,

    #[error("no completed purchase of this product")]
    PurchaseNotVerified,

    #[error("product already reviewed")]
    DuplicateReview,

    #[error(transparent)]
    InvalidRating(#[from] InvalidRating),

    #[error("review belongs to someone else")]
    NotOwner,

    #[error("storage error")]
    Sql(#[source] sqlx::Error),

    #[error("document store error")]
    Document(#[source] mongodb::error::Error),

    #[error("stored review is malformed")]
    Decode(#[from] DocumentDecodeError),
}

impl From<sqlx::Error> for ReviewsServiceError {
    fn from(error: sqlx::Error) -> Self {
        if matches!(error, sqlx::Error::RowNotFound) {
            return Self::NotFound;
        }

        Self::Sql(error)
    }
}

impl From<mongodb::error::Error> for ReviewsServiceError {
    fn from(error: mongodb::error::Error) -> Self {
        if is_duplicate_key(&error) {
            return Self::DuplicateReview;
        }

        Self::Document(error)
    }
}
