//! Domain layer for the MediaShelf catalog: shared types, the error
//! taxonomy, and the validation and aggregation rules for users, media and
//! reviews. Nothing in this crate performs I/O.

pub mod authorization;
pub mod error;
pub mod media;
pub mod rating;
pub mod review;
pub mod types;
pub mod user;
