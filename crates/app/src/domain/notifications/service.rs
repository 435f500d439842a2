//! Notifications service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    documents::DocumentStore,
    domain::{
        accounts::records::UserUuid,
        notifications::{
            data::NewNotification,
            documents::NotificationDocument,
            errors::NotificationsServiceError,
            records::{NotificationRecord, NotificationUuid},
            repository::MongoNotificationsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct MongoNotificationsService {
    notifications: MongoNotificationsRepository,
}

impl MongoNotificationsService {
    #[must_use]
    pub fn new(documents: &DocumentStore) -> Self {
        Self {
            notifications: MongoNotificationsRepository::new(documents),
        }
    }
}

#[async_trait]
impl NotificationsService for MongoNotificationsService {
    #[tracing::instrument(
        name = "notifications.service.notify",
        skip(self, notification),
        fields(
            user_uuid = %notification.user_uuid,
            notification_type = %notification.kind,
            notification_uuid = tracing::field::Empty
        ),
        err
    )]
    async fn notify(
        &self,
        notification: NewNotification,
    ) -> Result<NotificationRecord, NotificationsServiceError> {
        let uuid = NotificationUuid::new();

        tracing::Span::current().record("notification_uuid", tracing::field::display(uuid));

        let document = NotificationDocument::from_new(uuid, notification);

        self.notifications.insert(&document).await?;

        info!(notification_uuid = %uuid, "created notification");

        Ok(NotificationRecord::try_from(document)?)
    }

    #[tracing::instrument(
        name = "notifications.service.list_for_user",
        skip(self),
        fields(user_uuid = %user),
        err
    )]
    async fn list_for_user(
        &self,
        user: UserUuid,
        unread_only: bool,
    ) -> Result<Vec<NotificationRecord>, NotificationsServiceError> {
        let documents = self.notifications.find_for_user(user, unread_only).await?;

        documents
            .into_iter()
            .map(|document| NotificationRecord::try_from(document).map_err(Into::into))
            .collect()
    }

    #[tracing::instrument(
        name = "notifications.service.mark_read",
        skip(self),
        fields(user_uuid = %user, notification_uuid = %notification),
        err
    )]
    async fn mark_read(
        &self,
        user: UserUuid,
        notification: NotificationUuid,
    ) -> Result<bool, NotificationsServiceError> {
        Ok(self.notifications.mark_read(user, notification).await?)
    }

    #[tracing::instrument(
        name = "notifications.service.mark_all_read",
        skip(self),
        fields(user_uuid = %user),
        err
    )]
    async fn mark_all_read(&self, user: UserUuid) -> Result<u64, NotificationsServiceError> {
        let changed = self.notifications.mark_all_read(user).await?;

        info!(changed, "marked notifications read");

        Ok(changed)
    }

    #[tracing::instrument(
        name = "notifications.service.delete",
        skip(self),
        fields(user_uuid = %user, notification_uuid = %notification),
        err
    )]
    async fn delete(
        &self,
        user: UserUuid,
        notification: NotificationUuid,
    ) -> Result<bool, NotificationsServiceError> {
        let deleted = self.notifications.delete(user, notification).await?;

        if deleted {
            info!("deleted notification");
        }

        Ok(deleted)
    }

    #[tracing::instrument(
        name = "notifications.service.unread_count",
        skip(self),
        fields(user_uuid = %user),
        err
    )]
    async fn unread_count(&self, user: UserUuid) -> Result<u64, NotificationsServiceError> {
        Ok(self.notifications.count_unread(user).await?)
    }
}

#[automock]
#[async_trait]
pub trait NotificationsService: Send + Sync {
    /// Store a new unread notification for its recipient.
    async fn notify(
        &self,
        notification: NewNotification,
    ) -> Result<NotificationRecord, NotificationsServiceError>;

    /// The user's notifications, newest first.
    async fn list_for_user(
        &self,
        user: UserUuid,
        unread_only: bool,
    ) -> Result<Vec<NotificationRecord>, NotificationsServiceError>;

    /// Mark one notification read. `false` when nothing changed.
    async fn mark_read(
        &self,
        user: UserUuid,
        notification: NotificationUuid,
    ) -> Result<bool, NotificationsServiceError>;

    /// Mark every unread notification of the user read, returning how many changed.
    async fn mark_all_read(&self, user: UserUuid) -> Result<u64, NotificationsServiceError>;

    /// Delete one notification. `false` when it did not exist.
    async fn delete(
        &self,
        user: UserUuid,
        notification: NotificationUuid,
    ) -> Result<bool, NotificationsServiceError>;

    async fn unread_count(&self, user: UserUuid) -> Result<u64, NotificationsServiceError>;
}

/// Send a notification as a side effect of an already committed write.
///
/// Failures are logged and swallowed; the committed relational state stays authoritative.
pub async fn notify_best_effort(
    notifications: &dyn NotificationsService,
    notification: NewNotification,
) -> Option<NotificationRecord> {
    let user_uuid = notification.user_uuid;
    let kind = notification.kind;

    match notifications.notify(notification).await {
        Ok(record) => Some(record),
        Err(error) => {
            warn!(
                %user_uuid,
                notification_type = %kind,
                error = %error,
                "notification not delivered"
            );

            None
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        documents::DocumentDecodeError,
        domain::notifications::records::NotificationKind,
        test::{TestContext, helpers},
    };

    use super::*;

    fn order_notification(user: UserUuid, title: &str) -> NewNotification {
        NewNotification::new(user, NotificationKind::Order, title, "Pesanan diterima")
    }

    #[tokio::test]
    async fn notify_stores_an_unread_notification() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::seed_user(&ctx, "Budi").await;

        let record = ctx
            .notifications
            .notify(order_notification(user, "Order placed"))
            .await?;

        assert_eq!(record.user_uuid, user);
        assert_eq!(record.kind, NotificationKind::Order);
        assert!(!record.is_read);

        let listed = ctx.notifications.list_for_user(user, false).await?;

        assert_eq!(listed.len(), 1);
        assert_eq!(listed.first().map(|n| n.uuid), Some(record.uuid));

        Ok(())
    }

    #[tokio::test]
    async fn list_for_user_is_newest_first_and_filters_unread() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::seed_user(&ctx, "Budi").await;

        let older = ctx.notifications.notify(order_notification(user, "first")).await?;
        let newer = ctx.notifications.notify(order_notification(user, "second")).await?;

        let listed = ctx.notifications.list_for_user(user, false).await?;
        let uuids: Vec<NotificationUuid> = listed.iter().map(|n| n.uuid).collect();

        assert_eq!(uuids, vec![newer.uuid, older.uuid]);

        assert!(ctx.notifications.mark_read(user, newer.uuid).await?);

        let unread = ctx.notifications.list_for_user(user, true).await?;
        let uuids: Vec<NotificationUuid> = unread.iter().map(|n| n.uuid).collect();

        assert_eq!(uuids, vec![older.uuid]);

        Ok(())
    }

    #[tokio::test]
    async fn mark_read_reports_whether_anything_changed() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::seed_user(&ctx, "Budi").await;
        let record = ctx.notifications.notify(order_notification(user, "x")).await?;

        assert!(ctx.notifications.mark_read(user, record.uuid).await?);
        assert!(!ctx.notifications.mark_read(user, record.uuid).await?);
        assert!(
            !ctx.notifications
                .mark_read(user, NotificationUuid::new())
                .await?
        );

        Ok(())
    }

    #[tokio::test]
    async fn other_users_cannot_touch_a_notification() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = helpers::seed_user(&ctx, "Budi").await;
        let other = helpers::seed_user(&ctx, "Sari").await;
        let record = ctx.notifications.notify(order_notification(owner, "x")).await?;

        assert!(!ctx.notifications.mark_read(other, record.uuid).await?);
        assert!(!ctx.notifications.delete(other, record.uuid).await?);
        assert_eq!(ctx.notifications.unread_count(owner).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn delete_is_true_once() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::seed_user(&ctx, "Budi").await;
        let record = ctx.notifications.notify(order_notification(user, "x")).await?;

        assert!(ctx.notifications.delete(user, record.uuid).await?);
        assert!(!ctx.notifications.delete(user, record.uuid).await?);
        assert!(ctx.notifications.list_for_user(user, false).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn mark_all_read_clears_the_unread_count() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::seed_user(&ctx, "Budi").await;

        for title in ["a", "b", "c"] {
            ctx.notifications.notify(order_notification(user, title)).await?;
        }

        assert_eq!(ctx.notifications.unread_count(user).await?, 3);
        assert_eq!(ctx.notifications.mark_all_read(user).await?, 3);
        assert_eq!(ctx.notifications.unread_count(user).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn notify_best_effort_swallows_failures() {
        let mut mock = MockNotificationsService::new();

        mock.expect_notify().times(1).returning(|_| {
            Err(NotificationsServiceError::Decode(
                DocumentDecodeError::OutOfRange { field: "type" },
            ))
        });

        let delivered =
            notify_best_effort(&mock, order_notification(UserUuid::new(), "lost")).await;

        assert!(delivered.is_none());
    }
}
