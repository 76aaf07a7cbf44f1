//! Transactional review-submission workflow.
//!
//! A submission runs as one strictly ordered chain of statements on a single
//! [`ReviewTransaction`]: allocate a user id, insert the user, allocate a
//! review id, insert the review, read the joined summary, commit. The first
//! failure rolls the transaction back and is reported with the stage that
//! failed.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error as ThisError;
use tracing::{error, info, warn};

use crate::domain::ports::{
    NewReview, NewUser, ReviewStore, ReviewStoreError, ReviewSubmissionService, ReviewTransaction,
};
use crate::domain::{Error, IdValidationError, ReviewId, UserId, next_identifier};

use super::{ReviewSubmission, ReviewSummary};

/// Step of the submission transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionStage {
    /// Checking out a connection and opening the transaction.
    Begin,
    /// Reading the largest user id.
    NextUserId,
    /// Inserting the user row.
    InsertUser,
    /// Reading the largest review id.
    NextReviewId,
    /// Inserting the review row.
    InsertReview,
    /// Reading the joined summary row.
    Summary,
    /// Committing the transaction.
    Commit,
}

impl SubmissionStage {
    /// Client-facing message reported when this stage fails.
    pub const fn message(self) -> &'static str {
        match self {
            Self::Begin => "Transaction start failed",
            Self::NextUserId => "Failed to get next userID",
            Self::InsertUser => "User insert failed",
            Self::NextReviewId => "Failed to get next userReviewID",
            Self::InsertReview => "Review insert failed",
            Self::Summary => "Final data retrieval failed",
            Self::Commit => "Commit failed",
        }
    }
}

impl fmt::Display for SubmissionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A submission that failed inside the transaction.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("{stage}: {source}")]
pub struct ReviewSubmissionError {
    stage: SubmissionStage,
    source: ReviewStoreError,
}

impl ReviewSubmissionError {
    /// Attribute a store failure to a stage.
    pub fn new(stage: SubmissionStage, source: ReviewStoreError) -> Self {
        Self { stage, source }
    }

    /// Stage that failed.
    pub fn stage(&self) -> SubmissionStage {
        self.stage
    }

    /// Underlying store failure. Never shown to clients.
    pub fn store_error(&self) -> &ReviewStoreError {
        &self.source
    }
}

impl From<ReviewSubmissionError> for Error {
    fn from(err: ReviewSubmissionError) -> Self {
        Error::internal(err.stage.message())
    }
}

fn at(stage: SubmissionStage) -> impl Fn(ReviewStoreError) -> ReviewSubmissionError {
    move |source| ReviewSubmissionError::new(stage, source)
}

fn allocate<T>(
    stage: SubmissionStage,
    table: &str,
    current_max: Option<i32>,
    build: impl FnOnce(i64) -> Result<T, IdValidationError>,
) -> Result<T, ReviewSubmissionError> {
    let fail = |message: String| ReviewSubmissionError::new(stage, ReviewStoreError::query(message));
    let next = next_identifier(current_max)
        .ok_or_else(|| fail(format!("{table} identifier space exhausted")))?;
    build(i64::from(next)).map_err(|err| fail(err.to_string()))
}

/// Review submission service backed by a [`ReviewStore`].
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use media_reviews::domain::ReviewSubmissionWorkflow;
/// use media_reviews::outbound::persistence::{DbPool, DieselReviewStore};
///
/// fn build(pool: DbPool) -> ReviewSubmissionWorkflow<DieselReviewStore> {
///     ReviewSubmissionWorkflow::new(Arc::new(DieselReviewStore::new(pool)))
/// }
/// ```
pub struct ReviewSubmissionWorkflow<S> {
    store: Arc<S>,
}

impl<S> ReviewSubmissionWorkflow<S>
where
    S: ReviewStore,
{
    /// Create a workflow over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Persist the submission atomically and return the joined summary.
    ///
    /// Any failure before the commit rolls back; a failed rollback is logged
    /// and does not change the reported stage.
    pub async fn run(
        &self,
        submission: &ReviewSubmission,
    ) -> Result<ReviewSummary, ReviewSubmissionError> {
        let mut tx = self
            .store
            .begin()
            .await
            .map_err(at(SubmissionStage::Begin))
            .inspect_err(log_failure)?;

        let summary = match apply(tx.as_mut(), submission).await {
            Ok(summary) => summary,
            Err(err) => {
                log_failure(&err);
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(
                        stage = %err.stage(),
                        error = %rollback_err,
                        "rollback after failed review submission also failed"
                    );
                }
                return Err(err);
            }
        };

        tx.commit()
            .await
            .map_err(at(SubmissionStage::Commit))
            .inspect_err(log_failure)?;

        info!(
            media_id = %submission.media_id(),
            avg_score = summary.avg_score,
            "review submission committed"
        );
        Ok(summary)
    }
}

fn log_failure(err: &ReviewSubmissionError) {
    error!(stage = %err.stage(), error = %err.store_error(), "review submission failed");
}

async fn apply(
    tx: &mut dyn ReviewTransaction,
    submission: &ReviewSubmission,
) -> Result<ReviewSummary, ReviewSubmissionError> {
    let max_user = tx
        .max_user_id()
        .await
        .map_err(at(SubmissionStage::NextUserId))?;
    let user_id = allocate(SubmissionStage::NextUserId, "users", max_user, UserId::new)?;

    tx.insert_user(&NewUser {
        id: user_id,
        name: submission.name(),
        password: submission.password(),
        email: submission.email(),
        profile_image: submission.profile_image(),
        description: submission.description(),
    })
    .await
    .map_err(at(SubmissionStage::InsertUser))?;

    let max_review = tx
        .max_review_id()
        .await
        .map_err(at(SubmissionStage::NextReviewId))?;
    let review_id = allocate(
        SubmissionStage::NextReviewId,
        "user_reviews",
        max_review,
        ReviewId::new,
    )?;

    tx.insert_review(&NewReview {
        id: review_id,
        media_id: submission.media_id(),
        user_id,
        review: submission.review(),
        score: submission.score(),
    })
    .await
    .map_err(at(SubmissionStage::InsertReview))?;

    tx.review_summary(review_id, submission.media_id())
        .await
        .map_err(at(SubmissionStage::Summary))?
        .ok_or_else(|| {
            ReviewSubmissionError::new(
                SubmissionStage::Summary,
                ReviewStoreError::query(format!("no summary row for review {review_id}")),
            )
        })
}

#[async_trait]
impl<S> ReviewSubmissionService for ReviewSubmissionWorkflow<S>
where
    S: ReviewStore,
{
    async fn submit_review(&self, submission: ReviewSubmission) -> Result<ReviewSummary, Error> {
        self.run(&submission).await.map_err(Error::from)
    }
}
