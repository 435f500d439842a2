//! Review Records

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use thiserror::Error;

use crate::{
    domain::{accounts::records::UserUuid, catalog::records::ProductUuid},
    uuids::TypedUuid,
};

/// Review UUID
pub type ReviewUuid = TypedUuid<ReviewRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("rating {0} is outside 1..=5")]
pub struct InvalidRating(pub u8);

/// A star rating between 1 and 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// # Errors
    ///
    /// Returns [`InvalidRating`] when `value` is not in `1..=5`.
    pub const fn new(value: u8) -> Result<Self, InvalidRating> {
        if value >= Self::MIN && value <= Self::MAX {
            Ok(Self(value))
        } else {
            Err(InvalidRating(value))
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

/// Review Record
///
/// `user_name` and `product_name` are copied when the review is written and are not
/// kept in step with later renames.
#[derive(Debug, Clone)]
pub struct ReviewRecord {
    pub uuid: ReviewUuid,
    pub user_uuid: UserUuid,
    pub user_name: String,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub rating: Rating,
    pub comment: String,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
    pub replies: Vec<ReplyRecord>,
}

/// Seller reply; at most one per author on a review.
#[derive(Debug, Clone)]
pub struct ReplyRecord {
    pub author_name: String,
    pub comment: String,
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratings_one_through_five_are_valid() {
        for value in 1..=5 {
            assert_eq!(Rating::new(value).map(Rating::get), Ok(value));
        }
    }

    #[test]
    fn zero_and_six_are_invalid() {
        assert_eq!(Rating::new(0), Err(InvalidRating(0)));
        assert_eq!(Rating::new(6), Err(InvalidRating(6)));
    }
}
