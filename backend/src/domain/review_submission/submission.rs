//! Review submission payloads and their validation.

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::domain::{MediaId, Score};

/// Required submission fields in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionField {
    /// Reviewer display name.
    Name,
    /// Opaque password string.
    Password,
    /// Reviewer email address.
    Email,
    /// Reviewed media identifier.
    MediaId,
    /// Review body.
    Review,
    /// Numeric score.
    Score,
}

impl SubmissionField {
    /// Fields in validation order; the first missing one is reported.
    pub const REQUIRED: [Self; 6] = [
        Self::Name,
        Self::Password,
        Self::Email,
        Self::MediaId,
        Self::Review,
        Self::Score,
    ];

    /// Name of the field in the JSON request body.
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Password => "password",
            Self::Email => "email",
            Self::MediaId => "mediaID",
            Self::Review => "review",
            Self::Score => "score",
        }
    }
}

impl fmt::Display for SubmissionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Client errors raised before any persistence work starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionValidationError {
    /// A required field was absent, null, blank or zero.
    #[error("Missing required field: {0}")]
    MissingField(SubmissionField),
    /// `mediaID` was present but not a positive integer.
    #[error("Invalid field: mediaID must be a positive integer")]
    InvalidMediaId,
    /// `score` was present but not an integer in range.
    #[error("Invalid field: score must be an integer between 1 and 10")]
    InvalidScore,
}

/// Numeric field as received: clients send either JSON numbers or strings.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericInput {
    /// Integral JSON number.
    Integer(i64),
    /// Non-integral or out-of-range JSON number.
    Decimal(f64),
    /// Textual value such as `"7"`.
    Text(String),
}

impl NumericInput {
    fn is_blank(&self) -> bool {
        match self {
            Self::Integer(value) => *value == 0,
            Self::Decimal(value) => *value == 0.0 || value.is_nan(),
            Self::Text(text) => text.trim().is_empty(),
        }
    }

    fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            Self::Decimal(value) => decimal_to_integer(*value),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }
}

fn decimal_to_integer(value: f64) -> Option<i64> {
    let integral = value.is_finite() && value.fract() == 0.0;
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (integral && in_range).then_some(value as i64)
}

/// Unvalidated submission assembled by an inbound adapter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionDraft {
    /// Reviewer display name.
    pub name: Option<String>,
    /// Opaque password string, stored as received.
    pub password: Option<String>,
    /// Reviewer email address.
    pub email: Option<String>,
    /// Optional profile image reference.
    pub profile_image: Option<String>,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Reviewed media identifier.
    pub media_id: Option<NumericInput>,
    /// Review body.
    pub review: Option<String>,
    /// Review score.
    pub score: Option<NumericInput>,
}

impl SubmissionDraft {
    fn is_missing(&self, field: SubmissionField) -> bool {
        match field {
            SubmissionField::Name => blank_text(self.name.as_deref()),
            SubmissionField::Password => blank_text(self.password.as_deref()),
            SubmissionField::Email => blank_text(self.email.as_deref()),
            SubmissionField::Review => blank_text(self.review.as_deref()),
            SubmissionField::MediaId => self.media_id.as_ref().is_none_or(NumericInput::is_blank),
            SubmissionField::Score => self.score.as_ref().is_none_or(NumericInput::is_blank),
        }
    }
}

fn blank_text(value: Option<&str>) -> bool {
    value.is_none_or(|text| text.trim().is_empty())
}

fn optional_text(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

/// Validated review submission ready to persist.
///
/// ## Invariants
/// - `name`, `password`, `email` and `review` are non-blank.
/// - `profile_image` and `description` are `None` rather than blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSubmission {
    name: String,
    password: String,
    email: String,
    profile_image: Option<String>,
    description: Option<String>,
    media_id: MediaId,
    review: String,
    score: Score,
}

impl ReviewSubmission {
    /// Reviewer display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Opaque password string.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Reviewer email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Optional profile image reference.
    pub fn profile_image(&self) -> Option<&str> {
        self.profile_image.as_deref()
    }

    /// Optional free-text description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Reviewed media.
    pub fn media_id(&self) -> MediaId {
        self.media_id
    }

    /// Review body.
    pub fn review(&self) -> &str {
        &self.review
    }

    /// Review score.
    pub fn score(&self) -> Score {
        self.score
    }
}

impl TryFrom<SubmissionDraft> for ReviewSubmission {
    type Error = SubmissionValidationError;

    fn try_from(draft: SubmissionDraft) -> Result<Self, Self::Error> {
        if let Some(field) = SubmissionField::REQUIRED
            .into_iter()
            .find(|field| draft.is_missing(*field))
        {
            return Err(SubmissionValidationError::MissingField(field));
        }

        let media_id = draft
            .media_id
            .as_ref()
            .and_then(NumericInput::as_integer)
            .and_then(|value| MediaId::new(value).ok())
            .ok_or(SubmissionValidationError::InvalidMediaId)?;
        let score = draft
            .score
            .as_ref()
            .and_then(NumericInput::as_integer)
            .and_then(|value| Score::new(value).ok())
            .ok_or(SubmissionValidationError::InvalidScore)?;

        // Presence checked above.
        Ok(Self {
            name: draft.name.unwrap_or_default(),
            password: draft.password.unwrap_or_default(),
            email: draft.email.unwrap_or_default(),
            profile_image: optional_text(draft.profile_image),
            description: optional_text(draft.description),
            media_id,
            review: draft.review.unwrap_or_default(),
            score,
        })
    }
}

/// Joined row returned once a submission commits.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ReviewSummary {
    /// Name of the newly created user.
    #[schema(example = "Ann")]
    pub user_name: String,
    /// Body of the newly created review.
    #[schema(example = "Great")]
    pub new_review: String,
    /// Title of the reviewed media.
    #[serde(rename = "mediaTitle")]
    #[schema(example = "Dune")]
    pub media_title: String,
    /// Mean of every recorded score for the media, including the new one.
    #[schema(example = 9.0)]
    pub avg_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn draft() -> SubmissionDraft {
        SubmissionDraft {
            name: Some("Ann".into()),
            password: Some("pw".into()),
            email: Some("a@x".into()),
            profile_image: None,
            description: None,
            media_id: Some(NumericInput::Integer(7)),
            review: Some("Great".into()),
            score: Some(NumericInput::Integer(9)),
        }
    }

    #[rstest]
    fn accepts_a_complete_draft(draft: SubmissionDraft) {
        let submission = ReviewSubmission::try_from(draft).expect("valid draft");
        assert_eq!(submission.name(), "Ann");
        assert_eq!(submission.media_id().get(), 7);
        assert_eq!(submission.score().get(), 9);
        assert!(submission.profile_image().is_none());
    }

    #[rstest]
    fn reports_the_first_missing_field_in_order(mut draft: SubmissionDraft) {
        draft.email = None;
        draft.score = None;
        assert_eq!(
            ReviewSubmission::try_from(draft),
            Err(SubmissionValidationError::MissingField(SubmissionField::Email))
        );
    }

    #[rstest]
    #[case::blank_name(|d: &mut SubmissionDraft| d.name = Some("  ".into()), SubmissionField::Name)]
    #[case::empty_password(|d: &mut SubmissionDraft| d.password = Some(String::new()), SubmissionField::Password)]
    #[case::zero_media(|d: &mut SubmissionDraft| d.media_id = Some(NumericInput::Integer(0)), SubmissionField::MediaId)]
    #[case::blank_media_text(|d: &mut SubmissionDraft| d.media_id = Some(NumericInput::Text(String::new())), SubmissionField::MediaId)]
    #[case::absent_review(|d: &mut SubmissionDraft| d.review = None, SubmissionField::Review)]
    #[case::zero_score(|d: &mut SubmissionDraft| d.score = Some(NumericInput::Decimal(0.0)), SubmissionField::Score)]
    fn treats_falsy_values_as_missing(
        mut draft: SubmissionDraft,
        #[case] mutate: fn(&mut SubmissionDraft),
        #[case] expected: SubmissionField,
    ) {
        mutate(&mut draft);
        let err = ReviewSubmission::try_from(draft).expect_err("draft should be rejected");
        assert_eq!(err, SubmissionValidationError::MissingField(expected));
        assert_eq!(err.to_string(), format!("Missing required field: {expected}"));
    }

    #[rstest]
    #[case(NumericInput::Text(" 12 ".into()), Some(12))]
    #[case(NumericInput::Decimal(3.0), Some(3))]
    #[case(NumericInput::Decimal(3.5), None)]
    #[case(NumericInput::Integer(-4), None)]
    #[case(NumericInput::Text("0".into()), None)]
    #[case(NumericInput::Text("abc".into()), None)]
    fn parses_media_identifiers(
        mut draft: SubmissionDraft,
        #[case] input: NumericInput,
        #[case] expected: Option<i32>,
    ) {
        draft.media_id = Some(input);
        let result = ReviewSubmission::try_from(draft).map(|s| s.media_id().get());
        match expected {
            Some(id) => assert_eq!(result, Ok(id)),
            None => assert_eq!(result, Err(SubmissionValidationError::InvalidMediaId)),
        }
    }

    #[rstest]
    #[case(NumericInput::Integer(11))]
    #[case(NumericInput::Integer(-1))]
    #[case(NumericInput::Text("nine".into()))]
    #[case(NumericInput::Decimal(9.5))]
    fn rejects_scores_outside_bounds(mut draft: SubmissionDraft, #[case] input: NumericInput) {
        draft.score = Some(input);
        assert_eq!(
            ReviewSubmission::try_from(draft),
            Err(SubmissionValidationError::InvalidScore)
        );
    }

    #[rstest]
    fn missing_fields_win_over_malformed_ones(mut draft: SubmissionDraft) {
        draft.media_id = Some(NumericInput::Text("abc".into()));
        draft.score = None;
        assert_eq!(
            ReviewSubmission::try_from(draft),
            Err(SubmissionValidationError::MissingField(SubmissionField::Score))
        );
    }

    #[rstest]
    fn blank_optional_fields_become_none(mut draft: SubmissionDraft) {
        draft.profile_image = Some(" ".into());
        draft.description = Some("Reads a lot".into());
        let submission = ReviewSubmission::try_from(draft).expect("valid draft");
        assert_eq!(submission.profile_image(), None);
        assert_eq!(submission.description(), Some("Reads a lot"));
    }

    #[rstest]
    fn summary_uses_wire_field_names() {
        let summary = ReviewSummary {
            user_name: "Ann".into(),
            new_review: "Great".into(),
            media_title: "Dune".into(),
            avg_score: 9.0,
        };
        let value = serde_json::to_value(&summary).expect("serialise summary");
        assert_eq!(
            value,
            serde_json::json!({
                "user_name": "Ann",
                "new_review": "Great",
                "mediaTitle": "Dune",
                "avg_score": 9.0,
            })
        );
    }
}
