//! Driven port for the review-submission unit of work.
//!
//! A [`ReviewStore`] hands out [`ReviewTransaction`] handles. Each handle owns
//! one database transaction exclusively; every statement issued through it is
//! part of that transaction until [`ReviewTransaction::commit`] or
//! [`ReviewTransaction::rollback`] consumes the handle.

use async_trait::async_trait;

use crate::domain::{MediaId, ReviewId, ReviewSummary, Score, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by review store adapters.
    pub enum ReviewStoreError {
        /// A connection could not be obtained or the transaction not opened.
        Connection { message: String } => "review store connection failed: {message}",
        /// A statement failed while the transaction was open.
        Query { message: String } => "review store query failed: {message}",
    }
}

/// User row created by a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser<'a> {
    /// Allocated identifier.
    pub id: UserId,
    /// Display name.
    pub name: &'a str,
    /// Opaque password string.
    pub password: &'a str,
    /// Email address.
    pub email: &'a str,
    /// Optional profile image reference.
    pub profile_image: Option<&'a str>,
    /// Optional free-text description.
    pub description: Option<&'a str>,
}

/// Review row created by a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview<'a> {
    /// Allocated identifier.
    pub id: ReviewId,
    /// Reviewed media; must reference an existing row.
    pub media_id: MediaId,
    /// Author created earlier in the same transaction.
    pub user_id: UserId,
    /// Review body.
    pub review: &'a str,
    /// Review score.
    pub score: Score,
}

/// Opens review-submission transactions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Check out a connection and begin a transaction on it.
    async fn begin(&self) -> Result<Box<dyn ReviewTransaction>, ReviewStoreError>;
}

/// Statements available inside an open review-submission transaction.
///
/// Dropping a handle without calling `commit` or `rollback` must not commit
/// anything.
#[async_trait]
pub trait ReviewTransaction: Send {
    /// Largest stored user identifier, or `None` when `users` is empty.
    async fn max_user_id(&mut self) -> Result<Option<i32>, ReviewStoreError>;

    /// Insert a user row.
    async fn insert_user(&mut self, user: &NewUser<'_>) -> Result<(), ReviewStoreError>;

    /// Largest stored review identifier, or `None` when `user_reviews` is empty.
    async fn max_review_id(&mut self) -> Result<Option<i32>, ReviewStoreError>;

    /// Insert a review row.
    async fn insert_review(&mut self, review: &NewReview<'_>) -> Result<(), ReviewStoreError>;

    /// Join the review with its author and media, averaging every score
    /// recorded for `media_id`. Returns `None` when the review row is absent.
    async fn review_summary(
        &mut self,
        review_id: ReviewId,
        media_id: MediaId,
    ) -> Result<Option<ReviewSummary>, ReviewStoreError>;

    /// Commit the transaction.
    ///
    /// When the commit fails the implementation rolls back before returning
    /// the error, so nothing from the transaction persists.
    async fn commit(self: Box<Self>) -> Result<(), ReviewStoreError>;

    /// Roll the transaction back.
    async fn rollback(self: Box<Self>) -> Result<(), ReviewStoreError>;
}
