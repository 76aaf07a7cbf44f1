//! Integer identifiers for the media-review schema.
//!
//! Every table keys its rows with a positive `INTEGER`. The newtypes keep the
//! different identifier spaces apart at compile time.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Errors raised when an identifier is outside the valid range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdValidationError {
    /// Identifiers start at `1`.
    #[error("identifier must be positive, got {value}")]
    NonPositive {
        /// Rejected value.
        value: i64,
    },
    /// The value does not fit the database column.
    #[error("identifier {value} exceeds the column range")]
    OutOfRange {
        /// Rejected value.
        value: i64,
    },
    /// Text input was not an integer.
    #[error("identifier must be an integer")]
    NotAnInteger,
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Validate and wrap a raw identifier.
            pub fn new(value: i64) -> Result<Self, IdValidationError> {
                if value < 1 {
                    return Err(IdValidationError::NonPositive { value });
                }
                i32::try_from(value)
                    .map(Self)
                    .map_err(|_| IdValidationError::OutOfRange { value })
            }

            /// Raw column value.
            #[must_use]
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = IdValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| IdValidationError::NotAnInteger)?;
                Self::new(value)
            }
        }
    };
}

define_id! {
    /// Identifier of a row in `users`.
    UserId
}

define_id! {
    /// Identifier of a row in `user_reviews`.
    ReviewId
}

define_id! {
    /// Identifier of a row in `media`.
    MediaId
}

define_id! {
    /// Identifier of a row in `series`.
    SeriesId
}

define_id! {
    /// Identifier of a row in `writers`.
    WriterId
}

/// Allocate the identifier following the largest one currently stored.
///
/// Mirrors the `MAX(id) + 1` policy used by review submission: an empty table
/// yields `1`. Returns `None` when the identifier space is exhausted.
///
/// This is not safe under concurrent writers: two transactions that read the
/// same maximum will allocate the same identifier and one insert will fail.
///
/// # Examples
/// ```
/// use media_reviews::domain::next_identifier;
///
/// assert_eq!(next_identifier(None), Some(1));
/// assert_eq!(next_identifier(Some(41)), Some(42));
/// assert_eq!(next_identifier(Some(i32::MAX)), None);
/// ```
#[must_use]
pub fn next_identifier(current_max: Option<i32>) -> Option<i32> {
    current_max.unwrap_or(0).max(0).checked_add(1)
}
