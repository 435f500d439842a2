//! Ratings

pub mod errors;
pub mod records;
pub mod service;

pub use errors::RatingsServiceError;
pub use service::*;
