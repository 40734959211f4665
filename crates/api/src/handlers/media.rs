//! Handlers for the `/media` resource.
//!
//! Reads are public. Create requires a bearer token; update and delete are
//! additionally restricted to the media's owner.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use mediashelf_core::authorization::ensure_owner;
use mediashelf_core::error::CoreError;
use mediashelf_core::media::{validate_description, validate_title};
use mediashelf_core::types::DbId;
use mediashelf_db::models::media::{CreateMedia, Media, MediaResponse, UpdateMedia};
use mediashelf_db::models::review::ReviewResponse;
use mediashelf_db::repositories::{MediaRepo, ReviewRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::acting_user_id;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /media/criar`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMediaRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub user_id: Option<DbId>,
}

/// Request body for `PUT /media/atualizar/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateMediaRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Load a media row or fail with `NotFound`.
pub(crate) async fn find_media(pool: &sqlx::PgPool, id: DbId) -> AppResult<Media> {
    MediaRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Media", id }))
}

/// Load a media item with owner and rating aggregate.
async fn load_response(pool: &sqlx::PgPool, id: DbId) -> AppResult<MediaResponse> {
    MediaRepo::find_with_stats(pool, id)
        .await?
        .map(MediaResponse::from)
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Media", id }))
}

/* --------------------------------------------------------------------------
Handlers
-------------------------------------------------------------------------- */

/// GET /media/listar
///
/// List all media, each with its owner and `averageRating` / `totalReviews`.
pub async fn list_media(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let media: Vec<MediaResponse> = MediaRepo::list_with_stats(&state.pool)
        .await?
        .into_iter()
        .map(MediaResponse::from)
        .collect();
    Ok(Json(media))
}

/// GET /media/pesquisar/{id}
///
/// One media item with its owner, rating aggregate and reviews.
pub async fn get_media(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MediaResponse>> {
    let media = load_response(&state.pool, id).await?;

    let reviews: Vec<ReviewResponse> = ReviewRepo::list_for_media(&state.pool, id)
        .await?
        .into_iter()
        .map(ReviewResponse::from)
        .collect();

    Ok(Json(media.with_reviews(reviews)))
}

/// POST /media/criar
///
/// Create a media item owned by the caller. Returns 201.
pub async fn create_media(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateMediaRequest>,
) -> AppResult<impl IntoResponse> {
    let user_id = acting_user_id(&auth, input.user_id)?;

    validate_title(&input.title)?;
    validate_description(&input.description)?;

    let create = CreateMedia {
        title: input.title.trim().to_string(),
        description: input.description,
        user_id,
    };
    let media = MediaRepo::create(&state.pool, &create).await?;

    tracing::info!(user_id, media_id = media.id, "Media created");

    let response = load_response(&state.pool, media.id).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// PUT /media/atualizar/{id}
///
/// Update title and/or description. Owner only.
pub async fn update_media(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateMediaRequest>,
) -> AppResult<Json<MediaResponse>> {
    let media = find_media(&state.pool, id).await?;
    ensure_owner(media.user_id, auth.user_id, "update", "media")?;

    if let Some(ref title) = input.title {
        validate_title(title)?;
    }
    if let Some(ref description) = input.description {
        validate_description(description)?;
    }

    let update = UpdateMedia {
        title: input.title.map(|t| t.trim().to_string()),
        description: input.description,
    };
    MediaRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Media", id }))?;

    tracing::info!(user_id = auth.user_id, media_id = id, "Media updated");

    Ok(Json(load_response(&state.pool, id).await?))
}

/// DELETE /media/remover/{id}
///
/// Delete a media item and its reviews. Owner only.
pub async fn delete_media(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let media = find_media(&state.pool, id).await?;
    ensure_owner(media.user_id, auth.user_id, "delete", "media")?;

    if !MediaRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "Media", id }));
    }

    tracing::info!(user_id = auth.user_id, media_id = id, "Media deleted");

    Ok(StatusCode::NO_CONTENT)
}
