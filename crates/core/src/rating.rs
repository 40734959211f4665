//! Aggregate rating for a media item, computed on read.

use serde::Serialize;

/// Mean rating and review count for one media item.
///
/// A media item without reviews has no average at all, which is distinct
/// from an average of `0.0`. The average is omitted from the serialized form
/// in that case so clients never render it as a zero-star score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    pub total_reviews: i64,
}

impl RatingSummary {
    /// Summary for a media item nobody has reviewed yet.
    pub const fn unrated() -> Self {
        Self {
            average_rating: None,
            total_reviews: 0,
        }
    }

    /// Build a summary from a database `AVG(..)` / `COUNT(..)` pair.
    ///
    /// `AVG` over zero rows is `NULL`; a zero count always yields no average
    /// regardless of what the database returned.
    pub fn new(average_rating: Option<f64>, total_reviews: i64) -> Self {
        if total_reviews <= 0 {
            return Self::unrated();
        }
        Self {
            average_rating,
            total_reviews,
        }
    }

    /// Compute the simple (unweighted) mean of a set of ratings.
    pub fn from_ratings<I>(ratings: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let (sum, count) = ratings
            .into_iter()
            .fold((0.0_f64, 0_i64), |(sum, count), r| (sum + r, count + 1));

        if count == 0 {
            return Self::unrated();
        }

        Self {
            average_rating: Some(sum / count as f64),
            total_reviews: count,
        }
    }
}

impl Default for RatingSummary {
    fn default() -> Self {
        Self::unrated()
    }
}
