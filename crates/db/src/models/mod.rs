//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Joined read-models used by list/detail endpoints
//! - A create DTO for inserts and an update DTO (`Option` fields) for patches
//!
//! Everything serialized to clients uses camelCase field names.

pub mod media;
pub mod review;
pub mod user;
