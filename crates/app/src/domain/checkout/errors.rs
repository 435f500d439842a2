//! Checkout service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{
    catalog::records::ProductUuid,
    checkout::pricing::PricingError,
    orders::records::InvalidPaymentMethod,
};

#[derive(Debug, Error)]
pub enum CheckoutServiceError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("insufficient stock for product {product}")]
    InsufficientStock { product: ProductUuid },

    #[error("product not found")]
    ProductNotFound,

    #[error("quantity must be greater than zero")]
    InvalidQuantity,

    #[error(transparent)]
    InvalidPaymentMethod(#[from] InvalidPaymentMethod),

    #[error("pricing failed")]
    Pricing(#[from] PricingError),

    #[error("cart changed during checkout")]
    CartChanged,

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CheckoutServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::ProductNotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}
