//! Review Data

use crate::domain::catalog::records::ProductUuid;

/// New Review Data
///
/// `rating` is validated after the purchase and duplicate checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub product_uuid: ProductUuid,
    pub rating: u8,
    pub comment: String,
}

/// Review Update Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewUpdate {
    pub rating: u8,
    pub comment: String,
}
