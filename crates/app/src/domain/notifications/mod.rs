//! Notifications

pub mod data;
mod documents;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::NotificationsServiceError;
pub use service::*;
