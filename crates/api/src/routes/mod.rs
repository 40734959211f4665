pub mod health;
pub mod media;
pub mod reviews;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// Route hierarchy (Portuguese path segments are part of the public
/// contract used by existing clients):
///
/// ```text
/// /users/listar                       list users
/// /users/registrar                    register (public)
/// /users/login                        login (public)
/// /users/atualizar/{id}               update own profile (auth)
/// /users/delete/{id}                  delete own account (auth)
///
/// /media/listar                       list with rating aggregate
/// /media/pesquisar/{id}               detail with reviews
/// /media/criar                        create (auth)
/// /media/atualizar/{id}               update (owner)
/// /media/remover/{id}                 delete (owner)
///
/// /reviews/listar                     list all
/// /reviews/pesquisar/{id}             get one
/// /reviews/media/{media_id}           reviews of a media item
/// /reviews/usuario/{user_id}          reviews by a user
/// /reviews/criar                      create (auth, once per media)
/// /reviews/atualizar/{id}             update (author)
/// /reviews/remover/{id}               delete (author)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/media", media::router())
        .nest("/reviews", reviews::router())
}
