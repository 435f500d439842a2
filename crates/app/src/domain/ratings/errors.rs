//! Ratings service errors.

use thiserror::Error;

use crate::documents::DocumentDecodeError;

#[derive(Debug, Error)]
pub enum RatingsServiceError {
    #[error("document store error")]
    Document(#[from] mongodb::error::Error),

    #[error("stored rating is malformed")]
    Decode(#[from] DocumentDecodeError),
}
