//! Handlers for the `/reviews` resource.
//!
//! A user may review each media item once. A second submission fails with
//! `DuplicateReview` (409) and the client is expected to update the existing
//! review instead. Update and delete are restricted to the review's author.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use mediashelf_core::authorization::ensure_owner;
use mediashelf_core::error::CoreError;
use mediashelf_core::rating::RatingSummary;
use mediashelf_core::review::{validate_comment, validate_rating, validate_review};
use mediashelf_core::types::DbId;
use mediashelf_db::models::review::{
    CreateReview, Review, ReviewResponse, ReviewWithContext, UpdateReview,
};
use mediashelf_db::repositories::ReviewRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::acting_user_id;
use crate::handlers::media::find_media;
use crate::handlers::users::find_user;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /reviews/criar`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub rating: f64,
    pub comment: String,
    pub user_id: Option<DbId>,
    pub media_id: DbId,
}

/// Request body for `PUT /reviews/atualizar/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateReviewRequest {
    pub rating: f64,
    pub comment: Option<String>,
}

/// Response for `GET /reviews/media/{mediaId}`: the reviews plus the
/// media's rating aggregate.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaReviewsResponse {
    pub media_id: DbId,
    #[serde(flatten)]
    pub rating: RatingSummary,
    pub reviews: Vec<ReviewResponse>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_review(pool: &sqlx::PgPool, id: DbId) -> AppResult<Review> {
    ReviewRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Review", id }))
}

async fn load_response(pool: &sqlx::PgPool, id: DbId) -> AppResult<ReviewResponse> {
    ReviewRepo::find_with_context(pool, id)
        .await?
        .map(ReviewResponse::from)
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Review", id }))
}

fn into_responses(rows: Vec<ReviewWithContext>) -> Vec<ReviewResponse> {
    rows.into_iter().map(ReviewResponse::from).collect()
}

// ---------------------------------------------------------------------------
// Read handlers
// ---------------------------------------------------------------------------

/// GET /reviews/listar
pub async fn list_reviews(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let rows = ReviewRepo::list_with_context(&state.pool).await?;
    Ok(Json(into_responses(rows)))
}

/// GET /reviews/pesquisar/{id}
pub async fn get_review(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ReviewResponse>> {
    Ok(Json(load_response(&state.pool, id).await?))
}

/// GET /reviews/media/{mediaId}
///
/// Reviews of one media item with its `averageRating` / `totalReviews`.
pub async fn list_for_media(
    State(state): State<AppState>,
    Path(media_id): Path<DbId>,
) -> AppResult<Json<MediaReviewsResponse>> {
    find_media(&state.pool, media_id).await?;

    let rows = ReviewRepo::list_for_media(&state.pool, media_id).await?;
    let rating = RatingSummary::from_ratings(rows.iter().map(|r| r.rating));

    Ok(Json(MediaReviewsResponse {
        media_id,
        rating,
        reviews: into_responses(rows),
    }))
}

/// GET /reviews/usuario/{userId}
pub async fn list_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_user(&state.pool, user_id).await?;

    let rows = ReviewRepo::list_for_user(&state.pool, user_id).await?;
    Ok(Json(into_responses(rows)))
}

// ---------------------------------------------------------------------------
// Write handlers
// ---------------------------------------------------------------------------

/// POST /reviews/criar
///
/// Create the caller's review of a media item. Returns 201, or 409
/// `DUPLICATE_REVIEW` if the caller already reviewed it.
pub async fn create_review(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateReviewRequest>,
) -> AppResult<impl IntoResponse> {
    let user_id = acting_user_id(&auth, input.user_id)?;
    let media_id = input.media_id;

    validate_review(input.rating, &input.comment)?;
    find_media(&state.pool, media_id).await?;

    let create = CreateReview {
        rating: input.rating,
        comment: input.comment,
        user_id,
        media_id,
    };

    // The insert is a no-op when `uq_reviews_user_id_media_id` already holds
    // a row for this pair, whether it was there before or committed by a
    // concurrent request.
    let review = ReviewRepo::create(&state.pool, &create)
        .await?
        .ok_or(AppError::Core(CoreError::DuplicateReview { user_id, media_id }))?;

    tracing::info!(
        user_id,
        media_id,
        review_id = review.id,
        rating = review.rating,
        "Review created"
    );

    let response = load_response(&state.pool, review.id).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// PUT /reviews/atualizar/{id}
///
/// Replace the rating and optionally the comment. Author only.
pub async fn update_review(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateReviewRequest>,
) -> AppResult<Json<ReviewResponse>> {
    let review = find_review(&state.pool, id).await?;
    ensure_owner(review.user_id, auth.user_id, "update", "review")?;

    validate_rating(input.rating)?;
    match input.comment {
        Some(ref comment) => validate_comment(comment)?,
        // Reviews carried over from before comments were required may still
        // hold an empty one.
        None if review.comment.trim().is_empty() => {
            return Err(AppError::Core(CoreError::Validation(
                "This review has no comment; include a comment when updating it".to_string(),
            )));
        }
        None => {}
    }

    let update = UpdateReview {
        rating: input.rating,
        comment: input.comment,
    };
    ReviewRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Review", id }))?;

    tracing::info!(user_id = auth.user_id, review_id = id, "Review updated");

    Ok(Json(load_response(&state.pool, id).await?))
}

/// DELETE /reviews/remover/{id}
///
/// Delete a review. Author only.
pub async fn delete_review(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let review = find_review(&state.pool, id).await?;
    ensure_owner(review.user_id, auth.user_id, "delete", "review")?;

    if !ReviewRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "Review", id }));
    }

    tracing::info!(user_id = auth.user_id, review_id = id, "Review deleted");

    Ok(StatusCode::NO_CONTENT)
}
