pub mod media;
pub mod reviews;
pub mod users;

use mediashelf_core::error::CoreError;
use mediashelf_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;

/// Resolve the user a create request acts for.
///
/// Request bodies may name a `userId`; it must be the authenticated user.
/// When omitted, the authenticated user is used.
pub(crate) fn acting_user_id(auth: &AuthUser, claimed: Option<DbId>) -> AppResult<DbId> {
    match claimed {
        Some(user_id) if user_id != auth.user_id => Err(AppError::Core(CoreError::Forbidden(
            "Cannot act on behalf of another user".into(),
        ))),
        _ => Ok(auth.user_id),
    }
}
