//! Shared parsing helpers for query-string parameters.
//!
//! Query parameters arrive as optional strings. An empty or whitespace-only
//! value behaves as if the parameter were absent.

use std::str::FromStr;

use crate::domain::{Error, Score};

/// Message returned when `minScore` is not an integer in `1..=10`.
pub(crate) const SCORE_OUT_OF_BOUNDS: &str = "Error. Score outside bounds.";

fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

/// Parse an optional identifier, rejecting values that do not parse.
pub(crate) fn parse_optional_id<T>(raw: Option<&str>, name: &'static str) -> Result<Option<T>, Error>
where
    T: FromStr,
{
    present(raw)
        .map(|value| {
            value
                .parse::<T>()
                .map_err(|_| Error::invalid_request(format!("Invalid query parameter: {name}")))
        })
        .transpose()
}

/// Keep a free-text parameter only when it carries a value.
pub(crate) fn optional_text(raw: Option<String>) -> Option<String> {
    raw.filter(|value| !value.trim().is_empty())
}

/// Parse `minScore`, defaulting to the lowest score when absent.
pub(crate) fn parse_min_score(raw: Option<&str>) -> Result<Score, Error> {
    let Some(value) = present(raw) else {
        return Ok(Score::lowest());
    };
    value
        .parse::<i64>()
        .ok()
        .and_then(|parsed| Score::new(parsed).ok())
        .ok_or_else(|| Error::invalid_request(SCORE_OUT_OF_BOUNDS))
}
