//! Driving port for review submission.
//!
//! Inbound adapters validate the payload into a [`ReviewSubmission`] and call
//! [`ReviewSubmissionService::submit_review`]; the error they receive is
//! already client safe.

use async_trait::async_trait;

use crate::domain::{Error, ReviewSubmission, ReviewSummary};

/// Persist a user together with their first review.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewSubmissionService: Send + Sync {
    /// Run the submission transaction and return the joined summary.
    ///
    /// Fails with [`crate::domain::ErrorCode::InternalError`] naming the
    /// stage that failed; nothing is persisted in that case.
    async fn submit_review(&self, submission: ReviewSubmission) -> Result<ReviewSummary, Error>;
}
