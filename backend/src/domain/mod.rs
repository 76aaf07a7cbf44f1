//! Domain primitives, services and ports.
//!
//! Purpose: define the strongly typed entities and the review-submission
//! workflow used by the HTTP and persistence layers. Types document their
//! invariants and serialisation contracts in their own Rustdoc.
//!
//! Public surface:
//! - `Error`: client-safe error carrying the request trace id.
//! - `ReviewSubmissionWorkflow`: transactional user and review insertion.
//! - Catalogue read models returned by the listing endpoints.
//! - `ports`: traits implemented by outbound adapters.

pub mod catalogue;
pub mod error;
pub mod ids;
pub mod ports;
pub mod review_submission;
pub mod score;
pub mod trace_id;

pub use self::catalogue::{
    GenreCount, MediaEntry, MediaTitle, MediaTypeSummary, RECENT_RELEASE_CUTOFF,
    RecentMediaReview, RecentTitle, ReviewPattern, ReviewPatternFilter, SeriesSummary,
    WriterSummary, WriterTopReview,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{
    IdValidationError, MediaId, ReviewId, SeriesId, UserId, WriterId, next_identifier,
};
pub use self::review_submission::{
    NumericInput, ReviewSubmission, ReviewSubmissionError, ReviewSubmissionWorkflow,
    ReviewSummary, SubmissionDraft, SubmissionField, SubmissionStage, SubmissionValidationError,
};
pub use self::score::{MAX_SCORE, MIN_SCORE, Score, ScoreValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use media_reviews::domain::{ApiResult, Error};
///
/// fn lookup(found: bool) -> ApiResult<&'static str> {
///     if found {
///         Ok("Dune")
///     } else {
///         Err(Error::not_found("No media found with that name"))
///     }
/// }
///
/// assert!(lookup(false).is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
