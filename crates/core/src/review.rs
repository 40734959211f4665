//! Review constants and validation functions.
//!
//! The same bounds are enforced by CHECK constraints on the `reviews` table;
//! these functions reject bad input before it reaches the database so the
//! caller gets a precise message.

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Lowest accepted star rating (inclusive).
pub const MIN_RATING: f64 = 0.0;

/// Highest accepted star rating (inclusive).
pub const MAX_RATING: f64 = 5.0;

/// Maximum length of a review comment, in characters.
pub const MAX_COMMENT_LENGTH: usize = 1_000;

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Validate that a rating is a finite value within `[MIN_RATING, MAX_RATING]`.
pub fn validate_rating(rating: f64) -> Result<(), CoreError> {
    if !rating.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(CoreError::Validation(format!(
            "Invalid rating {rating}. Must be between {MIN_RATING} and {MAX_RATING}"
        )));
    }
    Ok(())
}

/// Validate a review comment: must contain non-whitespace text and be at most
/// [`MAX_COMMENT_LENGTH`] characters.
///
/// Length is counted in `char`s to agree with PostgreSQL `char_length`.
pub fn validate_comment(comment: &str) -> Result<(), CoreError> {
    if comment.trim().is_empty() {
        return Err(CoreError::Validation(
            "Comment must not be empty".to_string(),
        ));
    }

    if comment.chars().count() > MAX_COMMENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Comment exceeds maximum length of {MAX_COMMENT_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Validate the fields of a new or replaced review.
pub fn validate_review(rating: f64, comment: &str) -> Result<(), CoreError> {
    validate_rating(rating)?;
    validate_comment(comment)
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
