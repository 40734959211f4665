//! Repository for the `reviews` table.
//!
//! At most one review may exist per (user, media) pair. The constraint
//! `uq_reviews_user_id_media_id` enforces this in the database, and
//! [`ReviewRepo::create`] relies on it so concurrent duplicate submissions
//! resolve to a single row.

use mediashelf_core::types::DbId;
use sqlx::PgPool;

use crate::models::review::{CreateReview, Review, ReviewWithContext, UpdateReview};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, rating, comment, user_id, media_id, created_at, updated_at";

/// Reviews joined with author name and media title.
const CONTEXT_SELECT: &str = "SELECT \
        r.id, r.rating, r.comment, r.user_id, r.media_id, r.created_at, r.updated_at, \
        u.name AS user_name, m.title AS media_title \
     FROM reviews r \
     JOIN users u ON u.id = r.user_id \
     JOIN media m ON m.id = r.media_id";

const CONTEXT_ORDER: &str = "ORDER BY r.created_at DESC, r.id DESC";

/// Provides CRUD operations for reviews.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a review unless the user already reviewed this media.
    ///
    /// Returns `None` when a review for `(user_id, media_id)` already exists,
    /// including when another transaction inserted it concurrently.
    pub async fn create(pool: &PgPool, input: &CreateReview) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews (rating, comment, user_id, media_id)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (user_id, media_id) DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(input.rating)
            .bind(&input.comment)
            .bind(input.user_id)
            .bind(input.media_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a review by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE id = $1");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a review with its author name and media title.
    pub async fn find_with_context(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ReviewWithContext>, sqlx::Error> {
        let query = format!("{CONTEXT_SELECT} WHERE r.id = $1");
        sqlx::query_as::<_, ReviewWithContext>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all reviews, newest first.
    pub async fn list_with_context(pool: &PgPool) -> Result<Vec<ReviewWithContext>, sqlx::Error> {
        let query = format!("{CONTEXT_SELECT} {CONTEXT_ORDER}");
        sqlx::query_as::<_, ReviewWithContext>(&query)
            .fetch_all(pool)
            .await
    }

    /// List the reviews of one media item, newest first.
    pub async fn list_for_media(
        pool: &PgPool,
        media_id: DbId,
    ) -> Result<Vec<ReviewWithContext>, sqlx::Error> {
        let query = format!("{CONTEXT_SELECT} WHERE r.media_id = $1 {CONTEXT_ORDER}");
        sqlx::query_as::<_, ReviewWithContext>(&query)
            .bind(media_id)
            .fetch_all(pool)
            .await
    }

    /// List the reviews written by one user, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ReviewWithContext>, sqlx::Error> {
        let query = format!("{CONTEXT_SELECT} WHERE r.user_id = $1 {CONTEXT_ORDER}");
        sqlx::query_as::<_, ReviewWithContext>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Replace the rating and, if given, the comment of a review.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateReview,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "UPDATE reviews SET
                rating = $2,
                comment = COALESCE($3, comment)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .bind(input.rating)
            .bind(&input.comment)
            .fetch_optional(pool)
            .await
    }

    /// Delete a review. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
