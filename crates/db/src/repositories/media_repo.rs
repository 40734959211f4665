//! Repository for the `media` table.

use mediashelf_core::types::DbId;
use sqlx::PgPool;

use crate::models::media::{CreateMedia, Media, MediaWithStats, UpdateMedia};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, user_id, created_at, updated_at";

/// Media joined with owner and review aggregates. Callers append a `WHERE`
/// clause (or nothing) followed by [`STATS_TAIL`].
const STATS_SELECT: &str = "SELECT \
        m.id, m.title, m.description, m.user_id, m.created_at, m.updated_at, \
        u.name AS owner_name, u.email AS owner_email, \
        AVG(r.rating) AS average_rating, \
        COUNT(r.id) AS total_reviews \
     FROM media m \
     JOIN users u ON u.id = m.user_id \
     LEFT JOIN reviews r ON r.media_id = m.id";

const STATS_TAIL: &str = "GROUP BY m.id, u.name, u.email \
     ORDER BY m.created_at DESC, m.id DESC";

/// Provides CRUD operations for media items.
pub struct MediaRepo;

impl MediaRepo {
    /// Insert a new media item, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMedia) -> Result<Media, sqlx::Error> {
        let query = format!(
            "INSERT INTO media (title, description, user_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Media>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.user_id)
            .fetch_one(pool)
            .await
    }

    /// Find a media row by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Media>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media WHERE id = $1");
        sqlx::query_as::<_, Media>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a media item with its owner and rating aggregate.
    pub async fn find_with_stats(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MediaWithStats>, sqlx::Error> {
        let query = format!("{STATS_SELECT} WHERE m.id = $1 {STATS_TAIL}");
        sqlx::query_as::<_, MediaWithStats>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all media, newest first, each with owner and rating aggregate.
    pub async fn list_with_stats(pool: &PgPool) -> Result<Vec<MediaWithStats>, sqlx::Error> {
        let query = format!("{STATS_SELECT} {STATS_TAIL}");
        sqlx::query_as::<_, MediaWithStats>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update title and/or description. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMedia,
    ) -> Result<Option<Media>, sqlx::Error> {
        let query = format!(
            "UPDATE media SET
                title = COALESCE($2, title),
                description = COALESCE($3, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Media>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a media item and, by cascade, its reviews.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM media WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
