//! Ratings service.

use async_trait::async_trait;
use futures::TryStreamExt;
use mockall::automock;
use mongodb::{Collection, bson::doc};

use crate::{
    documents::{DocumentStore, REVIEWS_COLLECTION},
    domain::{
        catalog::records::ProductUuid,
        ratings::{errors::RatingsServiceError, records::RatingSummary},
        reviews::documents::{RatingDocument, decode_rating},
    },
};

#[derive(Debug, Clone)]
pub struct MongoRatingsService {
    reviews: Collection<RatingDocument>,
}

impl MongoRatingsService {
    #[must_use]
    pub fn new(documents: &DocumentStore) -> Self {
        Self {
            reviews: documents.collection(REVIEWS_COLLECTION),
        }
    }
}

#[async_trait]
impl RatingsService for MongoRatingsService {
    #[tracing::instrument(
        name = "ratings.service.average_rating",
        skip(self),
        fields(product_uuid = %product),
        err
    )]
    async fn average_rating(
        &self,
        product: ProductUuid,
    ) -> Result<RatingSummary, RatingsServiceError> {
        let documents: Vec<RatingDocument> = self
            .reviews
            .find(doc! { "product_uuid": product.to_string() })
            .projection(doc! { "_id": 0, "rating": 1 })
            .await?
            .try_collect()
            .await?;

        let ratings = documents
            .into_iter()
            .map(|document| decode_rating(document.rating).map(|rating| rating.get()))
            .collect::<Result<Vec<u8>, _>>()?;

        Ok(RatingSummary::from_ratings(ratings))
    }
}

#[automock]
#[async_trait]
pub trait RatingsService: Send + Sync {
    /// Average rating over every review of the product, recomputed on each call.
    async fn average_rating(
        &self,
        product: ProductUuid,
    ) -> Result<RatingSummary, RatingsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::reviews::{ReviewsService, data::NewReview},
        test::{TestContext, helpers},
    };

    use super::*;

    #[tokio::test]
    async fn unreviewed_product_averages_zero() -> TestResult {
        let ctx = TestContext::new().await;

        let summary = ctx.ratings.average_rating(ProductUuid::new()).await?;

        assert_eq!(summary, RatingSummary::default());

        Ok(())
    }

    #[tokio::test]
    async fn average_covers_every_review_of_the_product() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = helpers::seed_seller(&ctx, "Toko Maju").await;
        let product = helpers::seed_product(&ctx, seller.uuid, "Kopi", 45_000, 10).await;
        let other = helpers::seed_product(&ctx, seller.uuid, "Teh", 20_000, 10).await;

        for (name, product, rating) in [
            ("Budi", product, 5),
            ("Sari", product, 2),
            ("Joko", other, 1),
        ] {
            let buyer = helpers::seed_user(&ctx, name).await;

            helpers::purchase(&ctx, buyer, product, 1).await?;

            ctx.reviews
                .add_review(
                    buyer,
                    NewReview {
                        product_uuid: product,
                        rating,
                        comment: String::new(),
                    },
                )
                .await?;
        }

        let summary = ctx.ratings.average_rating(product).await?;

        assert_eq!(summary.count, 2);
        assert!((summary.average - 3.5).abs() < f64::EPSILON);

        Ok(())
    }
}
