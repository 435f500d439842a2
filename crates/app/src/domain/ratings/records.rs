//! Rating Records

/// Average star rating of a product; `(0.0, 0)` when it has no reviews.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RatingSummary {
    pub average: f64,
    pub count: u64,
}

impl RatingSummary {
    #[must_use]
    pub fn from_ratings(ratings: impl IntoIterator<Item = u8>) -> Self {
        let (sum, divisor, count) = ratings.into_iter().fold(
            (0.0_f64, 0.0_f64, 0_u64),
            |(sum, divisor, count), rating| (sum + f64::from(rating), divisor + 1.0, count + 1),
        );

        if count == 0 {
            return Self::default();
        }

        let average = sum / divisor;

        Self { average, count }
    }
}
