//! Route definitions for the `/reviews` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::reviews;
use crate::state::AppState;

/// Routes mounted at `/reviews`.
///
/// ```text
/// GET    /listar                -> list_reviews
/// GET    /pesquisar/{id}        -> get_review
/// GET    /media/{media_id}      -> list_for_media
/// GET    /usuario/{user_id}     -> list_for_user
/// POST   /criar                 -> create_review
/// PUT    /atualizar/{id}        -> update_review
/// DELETE /remover/{id}          -> delete_review
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/listar", get(reviews::list_reviews))
        .route("/pesquisar/{id}", get(reviews::get_review))
        .route("/media/{media_id}", get(reviews::list_for_media))
        .route("/usuario/{user_id}", get(reviews::list_for_user))
        .route("/criar", post(reviews::create_review))
        .route("/atualizar/{id}", put(reviews::update_review))
        .route("/remover/{id}", delete(reviews::delete_review))
}
