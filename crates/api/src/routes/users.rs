//! Route definitions for the `/users` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /listar           -> list_users
/// POST   /registrar        -> register
/// POST   /login            -> login
/// PUT    /atualizar/{id}   -> update_user
/// DELETE /delete/{id}      -> delete_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/listar", get(users::list_users))
        .route("/registrar", post(users::register))
        .route("/login", post(users::login))
        .route("/atualizar/{id}", put(users::update_user))
        .route("/delete/{id}", delete(users::delete_user))
}
