//! Notification Documents

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::{
    documents::{DocumentDecodeError, parse_uuid, to_timestamp},
    domain::notifications::{
        data::NewNotification,
        records::{NotificationKind, NotificationRecord, NotificationUuid},
    },
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct NotificationDocument {
    #[serde(rename = "_id")]
    pub(crate) id: String,
    pub(crate) user_uuid: String,
    pub(crate) title: String,
    pub(crate) message: String,
    #[serde(rename = "type")]
    pub(crate) kind: NotificationKind,
    pub(crate) is_read: bool,
    pub(crate) created_at: DateTime,
}

impl NotificationDocument {
    pub(crate) fn from_new(uuid: NotificationUuid, notification: NewNotification) -> Self {
        Self {
            id: uuid.to_string(),
            user_uuid: notification.user_uuid.to_string(),
            title: notification.title,
            message: notification.message,
            kind: notification.kind,
            is_read: false,
            created_at: DateTime::now(),
        }
    }
}

impl TryFrom<NotificationDocument> for NotificationRecord {
    type Error = DocumentDecodeError;

    fn try_from(document: NotificationDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            uuid: parse_uuid(&document.id, "_id")?,
            user_uuid: parse_uuid(&document.user_uuid, "user_uuid")?,
            title: document.title,
            message: document.message,
            kind: document.kind,
            is_read: document.is_read,
            created_at: to_timestamp(document.created_at, "created_at")?,
        })
    }
}
