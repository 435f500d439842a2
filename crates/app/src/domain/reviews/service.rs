//! Reviews service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use mongodb::bson::DateTime;
use tracing::{Span, info};

use crate::{
    database::Db,
    documents::DocumentStore,
    domain::{
        accounts::{
            records::{SellerUuid, UserUuid},
            repository::PgAccountsRepository,
        },
        catalog::{records::ProductUuid, repositories::PgProductsRepository},
        notifications::{
            NotificationsService, data::NewNotification, notify_best_effort,
            records::NotificationKind,
        },
        orders::repository::PgOrdersRepository,
        reviews::{
            data::{NewReview, ReviewUpdate},
            documents::{ReplyDocument, ReviewDocument},
            errors::ReviewsServiceError,
            records::{Rating, ReviewRecord, ReviewUuid},
            repository::MongoReviewsRepository,
        },
    },
};

/// Attempts at the replace-then-append reply upsert before giving up.
const REPLY_ATTEMPTS: usize = 3;

pub struct MongoReviewsService {
    db: Db,
    reviews: MongoReviewsRepository,
    accounts: PgAccountsRepository,
    products: PgProductsRepository,
    orders: PgOrdersRepository,
    notifications: Arc<dyn NotificationsService>,
}

impl MongoReviewsService {
    #[must_use]
    pub fn new(
        db: Db,
        documents: &DocumentStore,
        notifications: Arc<dyn NotificationsService>,
    ) -> Self {
        Self {
            db,
            reviews: MongoReviewsRepository::new(documents),
            accounts: PgAccountsRepository::new(),
            products: PgProductsRepository::new(),
            orders: PgOrdersRepository::new(),
            notifications,
        }
    }

    fn decode_all(
        documents: Vec<ReviewDocument>,
    ) -> Result<Vec<ReviewRecord>, ReviewsServiceError> {
        documents
            .into_iter()
            .map(|document| ReviewRecord::try_from(document).map_err(Into::into))
            .collect()
    }

    async fn get_owned(
        &self,
        user: UserUuid,
        review: ReviewUuid,
    ) -> Result<ReviewDocument, ReviewsServiceError> {
        let document = self
            .reviews
            .get(review)
            .await?
            .ok_or(ReviewsServiceError::NotFound)?;

        if document.user_uuid != user.to_string() {
            return Err(ReviewsServiceError::NotOwner);
        }

        Ok(document)
    }
}

#[async_trait]
impl ReviewsService for MongoReviewsService {
    #[tracing::instrument(
        name = "reviews.service.add_review",
        skip(self, review),
        fields(
            user_uuid = %user,
            product_uuid = %review.product_uuid,
            review_uuid = tracing::field::Empty
        ),
        err
    )]
    async fn add_review(
        &self,
        user: UserUuid,
        review: NewReview,
    ) -> Result<ReviewRecord, ReviewsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self
            .products
            .get_product(&mut tx, review.product_uuid)
            .await?
            .ok_or(ReviewsServiceError::ProductNotFound)?;

        let author = self
            .accounts
            .get_user(&mut tx, user)
            .await?
            .ok_or(ReviewsServiceError::UserNotFound)?;

        if !self
            .orders
            .has_completed_purchase(&mut tx, user, product.uuid)
            .await?
        {
            return Err(ReviewsServiceError::PurchaseNotVerified);
        }

        let seller = self.accounts.get_seller(&mut tx, product.seller_uuid).await?;

        tx.commit().await?;

        if self
            .reviews
            .find_by_user_and_product(user, product.uuid)
            .await?
            .is_some()
        {
            return Err(ReviewsServiceError::DuplicateReview);
        }

        let rating = Rating::new(review.rating)?;

        let uuid = ReviewUuid::new();

        Span::current().record("review_uuid", tracing::field::display(uuid));

        let document = ReviewDocument {
            id: uuid.to_string(),
            user_uuid: user.to_string(),
            user_name: author.name,
            product_uuid: product.uuid.to_string(),
            product_name: product.name,
            rating: i32::from(rating.get()),
            comment: review.comment,
            created_at: DateTime::now(),
            updated_at: None,
            replies: Vec::new(),
        };

        // The unique index turns a lost race with a concurrent insert into DuplicateReview.
        self.reviews.insert(&document).await?;

        let record = ReviewRecord::try_from(document)?;

        info!(review_uuid = %record.uuid, rating = %record.rating, "added review");

        if let Some(seller) = seller {
            notify_best_effort(
                self.notifications.as_ref(),
                NewNotification::new(
                    seller.user_uuid,
                    NotificationKind::Review,
                    "New review",
                    format!(
                        "{} rated {} {}/5.",
                        record.user_name, record.product_name, record.rating
                    ),
                ),
            )
            .await;
        }

        Ok(record)
    }

    #[tracing::instrument(
        name = "reviews.service.edit_review",
        skip(self, update),
        fields(user_uuid = %user, review_uuid = %review),
        err
    )]
    async fn edit_review(
        &self,
        user: UserUuid,
        review: ReviewUuid,
        update: ReviewUpdate,
    ) -> Result<ReviewRecord, ReviewsServiceError> {
        self.get_owned(user, review).await?;

        let rating = Rating::new(update.rating)?;

        let document = self
            .reviews
            .update_content(user, review, rating, &update.comment)
            .await?
            .ok_or(ReviewsServiceError::NotFound)?;

        info!(rating = %rating, "edited review");

        Ok(ReviewRecord::try_from(document)?)
    }

    #[tracing::instrument(
        name = "reviews.service.delete_review",
        skip(self),
        fields(user_uuid = %user, review_uuid = %review),
        err
    )]
    async fn delete_review(
        &self,
        user: UserUuid,
        review: ReviewUuid,
    ) -> Result<(), ReviewsServiceError> {
        self.get_owned(user, review).await?;

        if !self.reviews.delete(user, review).await? {
            return Err(ReviewsServiceError::NotFound);
        }

        info!("deleted review");

        Ok(())
    }

    #[tracing::instrument(
        name = "reviews.service.reply_to_review",
        skip(self, comment),
        fields(seller_uuid = %seller, review_uuid = %review),
        err
    )]
    async fn reply_to_review(
        &self,
        seller: SellerUuid,
        review: ReviewUuid,
        comment: String,
    ) -> Result<ReviewRecord, ReviewsServiceError> {
        let target = ReviewRecord::try_from(
            self.reviews
                .get(review)
                .await?
                .ok_or(ReviewsServiceError::NotFound)?,
        )?;

        let mut tx = self.db.begin_transaction().await?;

        let storefront = self
            .accounts
            .get_seller(&mut tx, seller)
            .await?
            .ok_or(ReviewsServiceError::SellerNotFound)?;

        let product = self
            .products
            .get_product(&mut tx, target.product_uuid)
            .await?
            .ok_or(ReviewsServiceError::ProductNotFound)?;

        tx.commit().await?;

        if product.seller_uuid != storefront.uuid {
            return Err(ReviewsServiceError::NotOwner);
        }

        let reply = ReplyDocument {
            author_name: storefront.store_name.clone(),
            comment,
            created_at: DateTime::now(),
        };

        let mut stored = false;

        // A concurrent first reply by the same author makes the push miss; the next
        // replace then finds it.
        for _ in 0..REPLY_ATTEMPTS {
            if self.reviews.replace_reply(review, &reply).await?
                || self.reviews.push_reply(review, &reply).await?
            {
                stored = true;
                break;
            }
        }

        if !stored {
            return Err(ReviewsServiceError::NotFound);
        }

        let updated = ReviewRecord::try_from(
            self.reviews
                .get(review)
                .await?
                .ok_or(ReviewsServiceError::NotFound)?,
        )?;

        info!(reply_count = updated.replies.len(), "replied to review");

        notify_best_effort(
            self.notifications.as_ref(),
            NewNotification::new(
                updated.user_uuid,
                NotificationKind::Review,
                "New reply",
                format!(
                    "{} replied to your review of {}.",
                    storefront.store_name, updated.product_name
                ),
            ),
        )
        .await;

        Ok(updated)
    }

    #[tracing::instrument(
        name = "reviews.service.reviews_for_user",
        skip(self),
        fields(user_uuid = %user),
        err
    )]
    async fn reviews_for_user(
        &self,
        user: UserUuid,
    ) -> Result<Vec<ReviewRecord>, ReviewsServiceError> {
        Self::decode_all(self.reviews.find_for_user(user).await?)
    }

    #[tracing::instrument(
        name = "reviews.service.reviews_for_product",
        skip(self),
        fields(product_uuid = %product),
        err
    )]
    async fn reviews_for_product(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<ReviewRecord>, ReviewsServiceError> {
        Self::decode_all(self.reviews.find_for_products(&[product]).await?)
    }

    #[tracing::instrument(
        name = "reviews.service.reply_candidates",
        skip(self),
        fields(seller_uuid = %seller),
        err
    )]
    async fn reply_candidates(
        &self,
        seller: SellerUuid,
    ) -> Result<Vec<ReviewRecord>, ReviewsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let products: Vec<ProductUuid> = self
            .products
            .list_seller_products(&mut tx, seller)
            .await?
            .into_iter()
            .map(|listing| listing.product.uuid)
            .collect();

        tx.commit().await?;

        if products.is_empty() {
            return Ok(Vec::new());
        }

        Self::decode_all(self.reviews.find_for_products(&products).await?)
    }
}

#[automock]
#[async_trait]
pub trait ReviewsService: Send + Sync {
    /// Review a product the user has a completed purchase of.
    async fn add_review(
        &self,
        user: UserUuid,
        review: NewReview,
    ) -> Result<ReviewRecord, ReviewsServiceError>;

    /// Change rating and comment of the user's own review.
    async fn edit_review(
        &self,
        user: UserUuid,
        review: ReviewUuid,
        update: ReviewUpdate,
    ) -> Result<ReviewRecord, ReviewsServiceError>;

    /// Delete the user's own review.
    async fn delete_review(&self, user: UserUuid, review: ReviewUuid)
    -> Result<(), ReviewsServiceError>;

    /// Reply as the seller's storefront, replacing any earlier reply by it.
    async fn reply_to_review(
        &self,
        seller: SellerUuid,
        review: ReviewUuid,
        comment: String,
    ) -> Result<ReviewRecord, ReviewsServiceError>;

    async fn reviews_for_user(&self, user: UserUuid)
    -> Result<Vec<ReviewRecord>, ReviewsServiceError>;

    async fn reviews_for_product(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<ReviewRecord>, ReviewsServiceError>;

    /// Reviews of the seller's own products, newest first.
    async fn reply_candidates(
        &self,
        seller: SellerUuid,
    ) -> Result<Vec<ReviewRecord>, ReviewsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        documents::DocumentDecodeError,
        domain::{
            notifications::{MockNotificationsService, NotificationsServiceError},
            orders::{OrdersService, records::PaymentStatus},
        },
        test::{TestContext, helpers},
    };

    use super::*;

    fn five_stars(product: ProductUuid) -> NewReview {
        NewReview {
            product_uuid: product,
            rating: 5,
            comment: "Mantap".to_string(),
        }
    }

    #[tokio::test]
    async fn add_review_after_purchase_snapshots_names_and_notifies_seller() -> TestResult {
        let ctx = TestContext::new().await;
        let buyer = helpers::seed_user(&ctx, "Budi").await;
        let seller = helpers::seed_seller(&ctx, "Toko Maju").await;
        let product = helpers::seed_product(&ctx, seller.uuid, "Kopi", 45_000, 5).await;

        helpers::purchase(&ctx, buyer, product, 1).await?;

        let review = ctx.reviews.add_review(buyer, five_stars(product)).await?;

        assert_eq!(review.user_uuid, buyer);
        assert_eq!(review.user_name, "Budi");
        assert_eq!(review.product_name, "Kopi");
        assert_eq!(review.rating.get(), 5);
        assert!(review.replies.is_empty());
        assert!(review.updated_at.is_none());

        let to_seller = ctx.notifications.list_for_user(seller.user_uuid, false).await?;

        assert!(
            to_seller
                .iter()
                .any(|n| n.kind == NotificationKind::Review && n.title == "New review"),
            "expected a review notification, got {to_seller:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn add_review_without_purchase_is_not_verified() {
        let ctx = TestContext::new().await;
        let buyer = helpers::seed_user(&ctx, "Budi").await;
        let seller = helpers::seed_seller(&ctx, "Toko Maju").await;
        let product = helpers::seed_product(&ctx, seller.uuid, "Kopi", 45_000, 5).await;

        let result = ctx.reviews.add_review(buyer, five_stars(product)).await;

        assert!(
            matches!(result, Err(ReviewsServiceError::PurchaseNotVerified)),
            "expected PurchaseNotVerified, got {result:?}"
        );
    }

    #[tokio::test]
    async fn add_review_after_failed_payment_is_not_verified() -> TestResult {
        let ctx = TestContext::new().await;
        let buyer = helpers::seed_user(&ctx, "Budi").await;
        let seller = helpers::seed_seller(&ctx, "Toko Maju").await;
        let product = helpers::seed_product(&ctx, seller.uuid, "Kopi", 45_000, 5).await;
        let receipt = helpers::purchase(&ctx, buyer, product, 1).await?;

        ctx.orders
            .update_payment_status(seller.uuid, receipt.payment.uuid, PaymentStatus::Failed)
            .await?;

        let result = ctx.reviews.add_review(buyer, five_stars(product)).await;

        assert!(
            matches!(result, Err(ReviewsServiceError::PurchaseNotVerified)),
            "expected PurchaseNotVerified, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn add_review_unknown_product_is_checked_first() {
        let ctx = TestContext::new().await;
        let buyer = helpers::seed_user(&ctx, "Budi").await;

        let result = ctx
            .reviews
            .add_review(
                buyer,
                NewReview {
                    product_uuid: ProductUuid::new(),
                    rating: 9,
                    comment: String::new(),
                },
            )
            .await;

        assert!(
            matches!(result, Err(ReviewsServiceError::ProductNotFound)),
            "expected ProductNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn second_review_of_the_same_product_is_a_duplicate() -> TestResult {
        let ctx = TestContext::new().await;
        let buyer = helpers::seed_user(&ctx, "Budi").await;
        let seller = helpers::seed_seller(&ctx, "Toko Maju").await;
        let product = helpers::seed_product(&ctx, seller.uuid, "Kopi", 45_000, 5).await;

        helpers::purchase(&ctx, buyer, product, 1).await?;
        helpers::purchase(&ctx, buyer, product, 1).await?;

        ctx.reviews.add_review(buyer, five_stars(product)).await?;

        let result = ctx.reviews.add_review(buyer, five_stars(product)).await;

        assert!(
            matches!(result, Err(ReviewsServiceError::DuplicateReview)),
            "expected DuplicateReview, got {result:?}"
        );
        assert_eq!(ctx.reviews.reviews_for_product(product).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_reviews_of_one_purchase_store_one_review() -> TestResult {
        let ctx = TestContext::new().await;
        let buyer = helpers::seed_user(&ctx, "Budi").await;
        let seller = helpers::seed_seller(&ctx, "Toko Maju").await;
        let product = helpers::seed_product(&ctx, seller.uuid, "Kopi", 45_000, 5).await;

        helpers::purchase(&ctx, buyer, product, 1).await?;

        let (a, b) = tokio::join!(
            ctx.reviews.add_review(buyer, five_stars(product)),
            ctx.reviews.add_review(buyer, five_stars(product)),
        );

        assert_eq!(
            [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count(),
            1,
            "expected one review to win, got {a:?} and {b:?}"
        );
        assert_eq!(ctx.reviews.reviews_for_product(product).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn add_review_rating_out_of_range_is_invalid() -> TestResult {
        let ctx = TestContext::new().await;
        let buyer = helpers::seed_user(&ctx, "Budi").await;
        let seller = helpers::seed_seller(&ctx, "Toko Maju").await;
        let product = helpers::seed_product(&ctx, seller.uuid, "Kopi", 45_000, 5).await;

        helpers::purchase(&ctx, buyer, product, 1).await?;

        let result = ctx
            .reviews
            .add_review(
                buyer,
                NewReview {
                    rating: 6,
                    ..five_stars(product)
                },
            )
            .await;

        assert!(
            matches!(result, Err(ReviewsServiceError::InvalidRating(_))),
            "expected InvalidRating, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn edit_review_updates_content_but_not_created_at() -> TestResult {
        let ctx = TestContext::new().await;
        let buyer = helpers::seed_user(&ctx, "Budi").await;
        let seller = helpers::seed_seller(&ctx, "Toko Maju").await;
        let product = helpers::seed_product(&ctx, seller.uuid, "Kopi", 45_000, 5).await;

        helpers::purchase(&ctx, buyer, product, 1).await?;

        let original = ctx.reviews.add_review(buyer, five_stars(product)).await?;

        let edited = ctx
            .reviews
            .edit_review(
                buyer,
                original.uuid,
                ReviewUpdate {
                    rating: 3,
                    comment: "Biasa saja".to_string(),
                },
            )
            .await?;

        assert_eq!(edited.uuid, original.uuid);
        assert_eq!(edited.rating.get(), 3);
        assert_eq!(edited.comment, "Biasa saja");
        assert_eq!(edited.created_at, original.created_at);
        assert!(edited.updated_at.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn edit_and_delete_of_someone_elses_review_are_refused() -> TestResult {
        let ctx = TestContext::new().await;
        let buyer = helpers::seed_user(&ctx, "Budi").await;
        let other = helpers::seed_user(&ctx, "Sari").await;
        let seller = helpers::seed_seller(&ctx, "Toko Maju").await;
        let product = helpers::seed_product(&ctx, seller.uuid, "Kopi", 45_000, 5).await;

        helpers::purchase(&ctx, buyer, product, 1).await?;

        let review = ctx.reviews.add_review(buyer, five_stars(product)).await?;

        let edit = ctx
            .reviews
            .edit_review(
                other,
                review.uuid,
                ReviewUpdate {
                    rating: 1,
                    comment: String::new(),
                },
            )
            .await;

        assert!(
            matches!(edit, Err(ReviewsServiceError::NotOwner)),
            "expected NotOwner, got {edit:?}"
        );

        let delete = ctx.reviews.delete_review(other, review.uuid).await;

        assert!(
            matches!(delete, Err(ReviewsServiceError::NotOwner)),
            "expected NotOwner, got {delete:?}"
        );
        assert_eq!(ctx.reviews.reviews_for_user(buyer).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn delete_review_twice_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let buyer = helpers::seed_user(&ctx, "Budi").await;
        let seller = helpers::seed_seller(&ctx, "Toko Maju").await;
        let product = helpers::seed_product(&ctx, seller.uuid, "Kopi", 45_000, 5).await;

        helpers::purchase(&ctx, buyer, product, 1).await?;

        let review = ctx.reviews.add_review(buyer, five_stars(product)).await?;

        ctx.reviews.delete_review(buyer, review.uuid).await?;

        let result = ctx.reviews.delete_review(buyer, review.uuid).await;

        assert!(
            matches!(result, Err(ReviewsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn replying_twice_keeps_one_reply_per_seller() -> TestResult {
        let ctx = TestContext::new().await;
        let buyer = helpers::seed_user(&ctx, "Budi").await;
        let seller = helpers::seed_seller(&ctx, "Toko Maju").await;
        let product = helpers::seed_product(&ctx, seller.uuid, "Kopi", 45_000, 5).await;

        helpers::purchase(&ctx, buyer, product, 1).await?;

        let review = ctx.reviews.add_review(buyer, five_stars(product)).await?;

        ctx.reviews
            .reply_to_review(seller.uuid, review.uuid, "Terima kasih".to_string())
            .await?;

        let replied = ctx
            .reviews
            .reply_to_review(seller.uuid, review.uuid, "Terima kasih banyak".to_string())
            .await?;

        assert_eq!(replied.replies.len(), 1);

        let reply = replied.replies.first().ok_or("expected a reply")?;

        assert_eq!(reply.author_name, "Toko Maju");
        assert_eq!(reply.comment, "Terima kasih banyak");

        let to_buyer = ctx.notifications.list_for_user(buyer, false).await?;

        assert_eq!(
            to_buyer.iter().filter(|n| n.title == "New reply").count(),
            2
        );

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_replies_by_one_seller_store_one_reply() -> TestResult {
        let ctx = TestContext::new().await;
        let buyer = helpers::seed_user(&ctx, "Budi").await;
        let seller = helpers::seed_seller(&ctx, "Toko Maju").await;
        let product = helpers::seed_product(&ctx, seller.uuid, "Kopi", 45_000, 5).await;

        helpers::purchase(&ctx, buyer, product, 1).await?;

        let review = ctx.reviews.add_review(buyer, five_stars(product)).await?;

        let (a, b) = tokio::join!(
            ctx.reviews
                .reply_to_review(seller.uuid, review.uuid, "satu".to_string()),
            ctx.reviews
                .reply_to_review(seller.uuid, review.uuid, "dua".to_string()),
        );

        a?;
        b?;

        let reviews = ctx.reviews.reviews_for_product(product).await?;
        let stored = reviews.first().ok_or("expected the review")?;

        assert_eq!(stored.replies.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn seller_cannot_reply_to_reviews_of_other_stores() -> TestResult {
        let ctx = TestContext::new().await;
        let buyer = helpers::seed_user(&ctx, "Budi").await;
        let seller = helpers::seed_seller(&ctx, "Toko Maju").await;
        let stranger = helpers::seed_seller(&ctx, "Toko Jaya").await;
        let product = helpers::seed_product(&ctx, seller.uuid, "Kopi", 45_000, 5).await;

        helpers::purchase(&ctx, buyer, product, 1).await?;

        let review = ctx.reviews.add_review(buyer, five_stars(product)).await?;

        let result = ctx
            .reviews
            .reply_to_review(stranger.uuid, review.uuid, "Mampir ke toko kami".to_string())
            .await;

        assert!(
            matches!(result, Err(ReviewsServiceError::NotOwner)),
            "expected NotOwner, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn reply_candidates_are_limited_to_the_sellers_products() -> TestResult {
        let ctx = TestContext::new().await;
        let buyer = helpers::seed_user(&ctx, "Budi").await;
        let maju = helpers::seed_seller(&ctx, "Toko Maju").await;
        let jaya = helpers::seed_seller(&ctx, "Toko Jaya").await;
        let kopi = helpers::seed_product(&ctx, maju.uuid, "Kopi", 45_000, 5).await;
        let teh = helpers::seed_product(&ctx, jaya.uuid, "Teh", 20_000, 5).await;

        helpers::purchase(&ctx, buyer, kopi, 1).await?;
        helpers::purchase(&ctx, buyer, teh, 1).await?;

        let review = ctx.reviews.add_review(buyer, five_stars(kopi)).await?;
        ctx.reviews.add_review(buyer, five_stars(teh)).await?;

        let candidates = ctx.reviews.reply_candidates(maju.uuid).await?;

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates.first().map(|r| r.uuid), Some(review.uuid));

        let none = ctx
            .reviews
            .reply_candidates(helpers::seed_seller(&ctx, "Toko Baru").await.uuid)
            .await?;

        assert!(none.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn notification_failures_do_not_undo_reviews_or_replies() -> TestResult {
        let mut notifications = MockNotificationsService::new();

        notifications.expect_notify().returning(|_| {
            Err(NotificationsServiceError::Decode(
                DocumentDecodeError::OutOfRange { field: "type" },
            ))
        });

        let ctx = TestContext::with_notifications(Arc::new(notifications)).await;
        let buyer = helpers::seed_user(&ctx, "Budi").await;
        let seller = helpers::seed_seller(&ctx, "Toko Maju").await;
        let product = helpers::seed_product(&ctx, seller.uuid, "Kopi", 45_000, 5).await;

        helpers::purchase(&ctx, buyer, product, 1).await?;

        let review = ctx.reviews.add_review(buyer, five_stars(product)).await?;

        let replied = ctx
            .reviews
            .reply_to_review(seller.uuid, review.uuid, "Terima kasih".to_string())
            .await?;

        assert_eq!(replied.replies.len(), 1);

        let stored = ctx.reviews.reviews_for_product(product).await?;

        assert_eq!(stored.len(), 1);
        assert_eq!(
            stored.first().map(|r| r.replies.len()),
            Some(1),
            "expected the reply to be stored, got {stored:?}"
        );

        Ok(())
    }
}
