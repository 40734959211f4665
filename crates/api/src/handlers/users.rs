//! Handlers for the `/users` resource (registration, login, profile).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use mediashelf_core::authorization::ensure_owner;
use mediashelf_core::error::CoreError;
use mediashelf_core::types::{DbId, Timestamp};
use mediashelf_core::user::{normalize_email, validate_email, validate_name};
use mediashelf_db::models::user::{CreateUser, UpdateUser, User, UserResponse};
use mediashelf_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Shown for both unknown emails and wrong passwords.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /users/registrar`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request body for `POST /users/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `PUT /users/atualizar/{id}`. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Successful login response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub created_at: Timestamp,
    pub message: String,
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a user or fail with `NotFound`.
pub(crate) async fn find_user(pool: &sqlx::PgPool, id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))
}

/// Fail with `Conflict` if `email` belongs to a user other than `except`.
async fn ensure_email_available(
    pool: &sqlx::PgPool,
    email: &str,
    except: Option<DbId>,
) -> AppResult<()> {
    if let Some(existing) = UserRepo::find_by_email(pool, email).await? {
        if Some(existing.id) != except {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "Email '{email}' is already registered"
            ))));
        }
    }
    Ok(())
}

fn hash(password: &str) -> AppResult<String> {
    hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /users/listar
pub async fn list_users(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let users: Vec<UserResponse> = UserRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();
    Ok(Json(users))
}

/// POST /users/registrar
///
/// Create an account. Returns 201 with the public user fields.
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    validate_name(&input.name)?;
    let email = normalize_email(&input.email);
    validate_email(&email)?;
    validate_password_strength(&input.password, state.config.password_min_length)?;

    ensure_email_available(&state.pool, &email, None).await?;

    let create = CreateUser {
        name: input.name.trim().to_string(),
        email,
        password_hash: hash(&input.password)?,
    };
    // A concurrent registration with the same email trips `uq_users_email`
    // and surfaces as 409.
    let user = UserRepo::create(&state.pool, &create).await?;

    tracing::info!(user_id = user.id, "User registered");

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// POST /users/login
///
/// Authenticate with email + password and issue an access token.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let email = normalize_email(&input.email);

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::debug!(user_id = user.id, "Login rejected: wrong password");
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    let access_token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(LoginResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        created_at: user.created_at,
        message: "Login successful".to_string(),
        access_token,
        expires_in: state.config.jwt.expires_in_secs(),
    }))
}

/// PUT /users/atualizar/{id}
///
/// Update the caller's own profile.
pub async fn update_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    find_user(&state.pool, id).await?;
    ensure_owner(id, auth.user_id, "update", "profile")?;

    if let Some(ref name) = input.name {
        validate_name(name)?;
    }

    let email = match input.email {
        Some(ref raw) => {
            let email = normalize_email(raw);
            validate_email(&email)?;
            ensure_email_available(&state.pool, &email, Some(id)).await?;
            Some(email)
        }
        None => None,
    };

    let password_hash = match input.password {
        Some(ref password) => {
            validate_password_strength(password, state.config.password_min_length)?;
            Some(hash(password)?)
        }
        None => None,
    };

    let update = UpdateUser {
        name: input.name.map(|n| n.trim().to_string()),
        email,
        password_hash,
    };

    let user = UserRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    tracing::info!(user_id = id, "User updated");

    Ok(Json(UserResponse::from(user)))
}

/// DELETE /users/delete/{id}
///
/// Delete the caller's own account together with their media and reviews.
pub async fn delete_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    find_user(&state.pool, id).await?;
    ensure_owner(id, auth.user_id, "delete", "account")?;

    if !UserRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }

    tracing::info!(user_id = id, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}
