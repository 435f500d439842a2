//! Notifications service errors.

use thiserror::Error;

use crate::documents::DocumentDecodeError;

#[derive(Debug, Error)]
pub enum NotificationsServiceError {
    #[error("document store error")]
    Document(#[from] mongodb::error::Error),

    #[error("stored notification is malformed")]
    Decode(#[from] DocumentDecodeError),
}
