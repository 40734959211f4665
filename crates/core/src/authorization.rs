//! Ownership gate for mutations.
//!
//! Media may only be changed by the user who created it, reviews only by
//! their author, and profiles only by the user themselves. Handlers call
//! [`ensure_owner`] after loading the resource and before mutating it.

use crate::error::CoreError;
use crate::types::DbId;

/// Fail with [`CoreError::Forbidden`] unless `actor_id` owns the resource.
///
/// `action` and `entity` only shape the error message, e.g.
/// `ensure_owner(media.user_id, auth.user_id, "delete", "media")`.
pub fn ensure_owner(
    owner_id: DbId,
    actor_id: DbId,
    action: &str,
    entity: &str,
) -> Result<(), CoreError> {
    if owner_id != actor_id {
        return Err(CoreError::Forbidden(format!(
            "Cannot {action} another user's {entity}"
        )));
    }
    Ok(())
}
