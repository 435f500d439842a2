//! Reviews Repository

use futures::TryStreamExt;
use mongodb::{
    Collection,
    bson::{DateTime, Document, doc},
    error::Error,
    options::ReturnDocument,
};

use crate::{
    documents::{DocumentStore, REVIEWS_COLLECTION},
    domain::{
        accounts::records::UserUuid,
        catalog::records::ProductUuid,
        reviews::{
            documents::{ReplyDocument, ReviewDocument},
            records::{Rating, ReviewUuid},
        },
    },
};

#[derive(Debug, Clone)]
pub(crate) struct MongoReviewsRepository {
    collection: Collection<ReviewDocument>,
}

impl MongoReviewsRepository {
    #[must_use]
    pub(crate) fn new(documents: &DocumentStore) -> Self {
        Self {
            collection: documents.collection(REVIEWS_COLLECTION),
        }
    }

    pub(crate) async fn insert(&self, document: &ReviewDocument) -> Result<(), Error> {
        self.collection.insert_one(document).await?;

        Ok(())
    }

    pub(crate) async fn get(&self, review: ReviewUuid) -> Result<Option<ReviewDocument>, Error> {
        self.collection.find_one(id_filter(review)).await
    }

    pub(crate) async fn find_by_user_and_product(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<Option<ReviewDocument>, Error> {
        self.collection
            .find_one(doc! {
                "user_uuid": user.to_string(),
                "product_uuid": product.to_string(),
            })
            .await
    }

    /// Overwrite rating and comment of the user's own review.
    pub(crate) async fn update_content(
        &self,
        user: UserUuid,
        review: ReviewUuid,
        rating: Rating,
        comment: &str,
    ) -> Result<Option<ReviewDocument>, Error> {
        self.collection
            .find_one_and_update(
                doc! { "_id": review.to_string(), "user_uuid": user.to_string() },
                doc! {
                    "$set": {
                        "rating": i32::from(rating.get()),
                        "comment": comment,
                        "updated_at": DateTime::now(),
                    }
                },
            )
            .return_document(ReturnDocument::After)
            .await
    }

    pub(crate) async fn delete(&self, user: UserUuid, review: ReviewUuid) -> Result<bool, Error> {
        let result = self
            .collection
            .delete_one(doc! { "_id": review.to_string(), "user_uuid": user.to_string() })
            .await?;

        Ok(result.deleted_count == 1)
    }

    /// Replace the comment of an existing reply by `author_name`. `false` when the
    /// review has no reply from that author.
    pub(crate) async fn replace_reply(
        &self,
        review: ReviewUuid,
        reply: &ReplyDocument,
    ) -> Result<bool, Error> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": review.to_string(), "replies.author_name": reply.author_name.as_str() },
                doc! {
                    "$set": {
                        "replies.$.comment": reply.comment.as_str(),
                        "replies.$.created_at": reply.created_at,
                    }
                },
            )
            .await?;

        Ok(result.matched_count == 1)
    }

    /// Append a reply unless one by the same author is already present.
    pub(crate) async fn push_reply(
        &self,
        review: ReviewUuid,
        reply: &ReplyDocument,
    ) -> Result<bool, Error> {
        let result = self
            .collection
            .update_one(
                doc! {
                    "_id": review.to_string(),
                    "replies.author_name": { "$ne": reply.author_name.as_str() },
                },
                doc! {
                    "$push": {
                        "replies": {
                            "author_name": reply.author_name.as_str(),
                            "comment": reply.comment.as_str(),
                            "created_at": reply.created_at,
                        }
                    }
                },
            )
            .await?;

        Ok(result.matched_count == 1)
    }

    pub(crate) async fn find_for_user(&self, user: UserUuid) -> Result<Vec<ReviewDocument>, Error> {
        self.find_newest_first(doc! { "user_uuid": user.to_string() })
            .await
    }

    pub(crate) async fn find_for_products(
        &self,
        products: &[ProductUuid],
    ) -> Result<Vec<ReviewDocument>, Error> {
        let uuids: Vec<String> = products.iter().map(ToString::to_string).collect();

        self.find_newest_first(doc! { "product_uuid": { "$in": uuids } })
            .await
    }

    async fn find_newest_first(&self, filter: Document) -> Result<Vec<ReviewDocument>, Error> {
        self.collection
            .find(filter)
            .sort(doc! { "created_at": -1, "_id": -1 })
            .await?
            .try_collect()
            .await
    }
}

fn id_filter(review: ReviewUuid) -> Document {
    doc! { "_id": review.to_string() }
}
