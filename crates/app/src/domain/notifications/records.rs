//! Notification Records

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{domain::accounts::records::UserUuid, uuids::TypedUuid};

/// Notification UUID
pub type NotificationUuid = TypedUuid<NotificationRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Order,
    Review,
    Promo,
    System,
}

impl NotificationKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Order => "order",
            Self::Review => "review",
            Self::Promo => "promo",
            Self::System => "system",
        }
    }
}

impl Display for NotificationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown notification type `{0}`")]
pub struct InvalidNotificationKind(String);

impl FromStr for NotificationKind {
    type Err = InvalidNotificationKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "order" => Ok(Self::Order),
            "review" => Ok(Self::Review),
            "promo" => Ok(Self::Promo),
            "system" => Ok(Self::System),
            other => Err(InvalidNotificationKind(other.to_string())),
        }
    }
}

/// Notification Record
#[derive(Debug, Clone)]
pub struct NotificationRecord {
    pub uuid: NotificationUuid,
    pub user_uuid: UserUuid,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub is_read: bool,
    pub created_at: Timestamp,
}
