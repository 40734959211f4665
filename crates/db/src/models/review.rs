//! Review entity model and DTOs.

use mediashelf_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::user::UserSummary;

/// A row from the `reviews` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: DbId,
    pub rating: f64,
    pub comment: String,
    pub user_id: DbId,
    pub media_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Review row joined with its author's name and the reviewed media's title.
#[derive(Debug, Clone, FromRow)]
pub struct ReviewWithContext {
    pub id: DbId,
    pub rating: f64,
    pub comment: String,
    pub user_id: DbId,
    pub media_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub user_name: String,
    pub media_title: String,
}

/// Reviewed media reference embedded in review payloads.
#[derive(Debug, Clone, Serialize)]
pub struct MediaSummary {
    pub id: DbId,
    pub title: String,
}

/// Review as returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    #[serde(flatten)]
    pub review: Review,
    pub user: UserSummary,
    pub media: MediaSummary,
}

impl From<ReviewWithContext> for ReviewResponse {
    fn from(row: ReviewWithContext) -> Self {
        Self {
            user: UserSummary {
                id: row.user_id,
                name: row.user_name,
            },
            media: MediaSummary {
                id: row.media_id,
                title: row.media_title,
            },
            review: Review {
                id: row.id,
                rating: row.rating,
                comment: row.comment,
                user_id: row.user_id,
                media_id: row.media_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        }
    }
}

/// DTO for creating a review. Callers validate rating and comment first.
#[derive(Debug)]
pub struct CreateReview {
    pub rating: f64,
    pub comment: String,
    pub user_id: DbId,
    pub media_id: DbId,
}

/// DTO for updating a review. `comment: None` keeps the current comment.
#[derive(Debug)]
pub struct UpdateReview {
    pub rating: f64,
    pub comment: Option<String>,
}
