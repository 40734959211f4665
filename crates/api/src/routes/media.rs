//! Route definitions for the `/media` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::media;
use crate::state::AppState;

/// Routes mounted at `/media`.
///
/// ```text
/// GET    /listar           -> list_media
/// GET    /pesquisar/{id}   -> get_media
/// POST   /criar            -> create_media
/// PUT    /atualizar/{id}   -> update_media
/// DELETE /remover/{id}     -> delete_media
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/listar", get(media::list_media))
        .route("/pesquisar/{id}", get(media::get_media))
        .route("/criar", post(media::create_media))
        .route("/atualizar/{id}", put(media::update_media))
        .route("/remover/{id}", delete(media::delete_media))
}
