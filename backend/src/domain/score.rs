//! Review score bounds shared by submissions and review filters.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Smallest score a review may carry.
pub const MIN_SCORE: i32 = 1;
/// Largest score a review may carry.
pub const MAX_SCORE: i32 = 10;

/// Raised when a score falls outside `MIN_SCORE..=MAX_SCORE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("score must be between {MIN_SCORE} and {MAX_SCORE}, got {value}")]
pub struct ScoreValidationError {
    /// Rejected value.
    pub value: i64,
}

/// Integer review score in `1..=10`.
///
/// # Examples
/// ```
/// use media_reviews::domain::Score;
///
/// assert_eq!(Score::new(9).map(Score::get), Ok(9));
/// assert!(Score::new(11).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Score(i32);

impl Score {
    /// Validate a raw score.
    pub fn new(value: i64) -> Result<Self, ScoreValidationError> {
        if !(i64::from(MIN_SCORE)..=i64::from(MAX_SCORE)).contains(&value) {
            return Err(ScoreValidationError { value });
        }
        i32::try_from(value)
            .map(Self)
            .map_err(|_| ScoreValidationError { value })
    }

    /// Lowest valid score, used as the default review filter.
    #[must_use]
    pub const fn lowest() -> Self {
        Self(MIN_SCORE)
    }

    /// Raw column value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
