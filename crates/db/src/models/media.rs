//! Media entity model and DTOs.

use mediashelf_core::rating::RatingSummary;
use mediashelf_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::review::ReviewResponse;
use crate::models::user::OwnerSummary;

/// A row from the `media` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Media row joined with its owner and aggregated review statistics.
///
/// `average_rating` is `NULL` when the media has no reviews.
#[derive(Debug, Clone, FromRow)]
pub struct MediaWithStats {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub owner_name: String,
    pub owner_email: String,
    pub average_rating: Option<f64>,
    pub total_reviews: i64,
}

/// Media as returned to clients: the row, its owner, the rating aggregate
/// and, on detail reads, the reviews themselves.
#[derive(Debug, Clone, Serialize)]
pub struct MediaResponse {
    #[serde(flatten)]
    pub media: Media,
    pub user: OwnerSummary,
    #[serde(flatten)]
    pub rating: RatingSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<ReviewResponse>>,
}

impl MediaResponse {
    /// Attach the media's reviews (detail view).
    pub fn with_reviews(mut self, reviews: Vec<ReviewResponse>) -> Self {
        self.reviews = Some(reviews);
        self
    }
}

impl From<MediaWithStats> for MediaResponse {
    fn from(row: MediaWithStats) -> Self {
        Self {
            user: OwnerSummary {
                id: row.user_id,
                name: row.owner_name,
                email: row.owner_email,
            },
            rating: RatingSummary::new(row.average_rating, row.total_reviews),
            media: Media {
                id: row.id,
                title: row.title,
                description: row.description,
                user_id: row.user_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            reviews: None,
        }
    }
}

/// DTO for creating a new media item.
#[derive(Debug)]
pub struct CreateMedia {
    pub title: String,
    pub description: String,
    pub user_id: DbId,
}

/// DTO for updating a media item. Ownership cannot change.
#[derive(Debug, Default)]
pub struct UpdateMedia {
    pub title: Option<String>,
    pub description: Option<String>,
}
