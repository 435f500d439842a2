//! Review Documents

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::{
    documents::{DocumentDecodeError, parse_uuid, to_timestamp},
    domain::reviews::records::{Rating, ReplyRecord, ReviewRecord},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ReviewDocument {
    #[serde(rename = "_id")]
    pub(crate) id: String,
    pub(crate) user_uuid: String,
    pub(crate) user_name: String,
    pub(crate) product_uuid: String,
    pub(crate) product_name: String,
    pub(crate) rating: i32,
    pub(crate) comment: String,
    pub(crate) created_at: DateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) updated_at: Option<DateTime>,
    #[serde(default)]
    pub(crate) replies: Vec<ReplyDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ReplyDocument {
    pub(crate) author_name: String,
    pub(crate) comment: String,
    pub(crate) created_at: DateTime,
}

/// Only the rating of a review, for aggregation.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RatingDocument {
    pub(crate) rating: i32,
}

pub(crate) fn decode_rating(value: i32) -> Result<Rating, DocumentDecodeError> {
    u8::try_from(value)
        .ok()
        .and_then(|value| Rating::new(value).ok())
        .ok_or(DocumentDecodeError::OutOfRange { field: "rating" })
}

impl TryFrom<ReplyDocument> for ReplyRecord {
    type Error = DocumentDecodeError;

    fn try_from(document: ReplyDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            author_name: document.author_name,
            comment: document.comment,
            created_at: to_timestamp(document.created_at, "replies.created_at")?,
        })
    }
}

impl TryFrom<ReviewDocument> for ReviewRecord {
    type Error = DocumentDecodeError;

    fn try_from(document: ReviewDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            uuid: parse_uuid(&document.id, "_id")?,
            user_uuid: parse_uuid(&document.user_uuid, "user_uuid")?,
            user_name: document.user_name,
            product_uuid: parse_uuid(&document.product_uuid, "product_uuid")?,
            product_name: document.product_name,
            rating: decode_rating(document.rating)?,
            comment: document.comment,
            created_at: to_timestamp(document.created_at, "created_at")?,
            updated_at: document
                .updated_at
                .map(|at| to_timestamp(at, "updated_at"))
                .transpose()?,
            replies: document
                .replies
                .into_iter()
                .map(ReplyRecord::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}
