//! Notification Data

use crate::domain::{accounts::records::UserUuid, notifications::records::NotificationKind};

/// New Notification Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub user_uuid: UserUuid,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
}

impl NewNotification {
    #[must_use]
    pub fn new(
        user_uuid: UserUuid,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            user_uuid,
            title: title.into(),
            message: message.into(),
            kind,
        }
    }
}
