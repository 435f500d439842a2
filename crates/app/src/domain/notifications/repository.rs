//! Notifications Repository

use futures::TryStreamExt;
use mongodb::{
    Collection,
    bson::{Document, doc},
    error::Error,
};

use crate::{
    documents::{DocumentStore, NOTIFICATIONS_COLLECTION},
    domain::{
        accounts::records::UserUuid,
        notifications::{documents::NotificationDocument, records::NotificationUuid},
    },
};

#[derive(Debug, Clone)]
pub(crate) struct MongoNotificationsRepository {
    collection: Collection<NotificationDocument>,
}

impl MongoNotificationsRepository {
    #[must_use]
    pub(crate) fn new(documents: &DocumentStore) -> Self {
        Self {
            collection: documents.collection(NOTIFICATIONS_COLLECTION),
        }
    }

    pub(crate) async fn insert(&self, document: &NotificationDocument) -> Result<(), Error> {
        self.collection.insert_one(document).await?;

        Ok(())
    }

    pub(crate) async fn find_for_user(
        &self,
        user: UserUuid,
        unread_only: bool,
    ) -> Result<Vec<NotificationDocument>, Error> {
        let mut filter = user_filter(user);

        if unread_only {
            filter.insert("is_read", false);
        }

        self.collection
            .find(filter)
            .sort(doc! { "created_at": -1, "_id": -1 })
            .await?
            .try_collect()
            .await
    }

    pub(crate) async fn mark_read(
        &self,
        user: UserUuid,
        notification: NotificationUuid,
    ) -> Result<bool, Error> {
        let result = self
            .collection
            .update_one(
                doc! {
                    "_id": notification.to_string(),
                    "user_uuid": user.to_string(),
                    "is_read": false,
                },
                doc! { "$set": { "is_read": true } },
            )
            .await?;

        Ok(result.modified_count == 1)
    }

    pub(crate) async fn mark_all_read(&self, user: UserUuid) -> Result<u64, Error> {
        let mut filter = user_filter(user);
        filter.insert("is_read", false);

        let result = self
            .collection
            .update_many(filter, doc! { "$set": { "is_read": true } })
            .await?;

        Ok(result.modified_count)
    }

    pub(crate) async fn delete(
        &self,
        user: UserUuid,
        notification: NotificationUuid,
    ) -> Result<bool, Error> {
        let result = self
            .collection
            .delete_one(doc! {
                "_id": notification.to_string(),
                "user_uuid": user.to_string(),
            })
            .await?;

        Ok(result.deleted_count == 1)
    }

    pub(crate) async fn count_unread(&self, user: UserUuid) -> Result<u64, Error> {
        let mut filter = user_filter(user);
        filter.insert("is_read", false);

        self.collection.count_documents(filter).await
    }
}

fn user_filter(user: UserUuid) -> Document {
    doc! { "user_uuid": user.to_string() }
}
