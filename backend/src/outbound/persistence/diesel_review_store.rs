//! PostgreSQL-backed review store.
//!
//! [`DieselReviewStore::begin`] checks out an owned pooled connection and
//! opens a transaction on it with Diesel's ANSI transaction manager. The
//! returned handle issues every statement on that connection. A handle
//! dropped without `commit` or `rollback` leaves the connection mid
//! transaction; the pool treats such connections as broken and discards them,
//! so nothing is committed.

use async_trait::async_trait;
use diesel::dsl::max;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel::sql_query;
use diesel::sql_types::Integer;
use diesel_async::{AnsiTransactionManager, RunQueryDsl, TransactionManager};
use tracing::{debug, warn};

use crate::domain::ports::{NewReview, NewUser, ReviewStore, ReviewStoreError, ReviewTransaction};
use crate::domain::{MediaId, ReviewId, ReviewSummary};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewReviewRow, NewUserRow, ReviewSummaryRow};
use super::pool::{DbPool, OwnedConnection};
use super::schema::{user_reviews, users};

/// Review joined with its author and media plus the mean of every score the
/// media has received, including the new one.
const REVIEW_SUMMARY_SQL: &str = r#"
SELECT u.name AS user_name,
       r.review AS new_review,
       m.media_title AS media_title,
       (SELECT CAST(AVG(s.score) AS DOUBLE PRECISION)
          FROM user_reviews s
         WHERE s.media_id = $2) AS avg_score
  FROM user_reviews r
  JOIN users u ON u.user_id = r.user_id
  JOIN media m ON m.media_id = r.media_id
 WHERE r.user_review_id = $1
 LIMIT 1
"#;

fn query_error(operation: &'static str) -> impl FnOnce(DieselError) -> ReviewStoreError {
    move |error| {
        map_diesel_error(
            error,
            operation,
            ReviewStoreError::query,
            ReviewStoreError::connection,
        )
    }
}

/// Diesel-backed implementation of the [`ReviewStore`] port.
#[derive(Clone)]
pub struct DieselReviewStore {
    pool: DbPool,
}

impl DieselReviewStore {
    /// Create a store drawing connections from `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewStore for DieselReviewStore {
    async fn begin(&self) -> Result<Box<dyn ReviewTransaction>, ReviewStoreError> {
        let mut conn = self
            .pool
            .get_owned()
            .await
            .map_err(|err| map_pool_error(err, ReviewStoreError::connection))?;
        AnsiTransactionManager::begin_transaction(&mut *conn)
            .await
            .map_err(|err| {
                map_diesel_error(
                    err,
                    "begin transaction",
                    ReviewStoreError::connection,
                    ReviewStoreError::connection,
                )
            })?;
        debug!("review transaction opened");
        Ok(Box::new(DieselReviewTransaction { conn }))
    }
}

/// Open transaction holding its connection exclusively.
struct DieselReviewTransaction {
    conn: OwnedConnection,
}

#[async_trait]
impl ReviewTransaction for DieselReviewTransaction {
    async fn max_user_id(&mut self) -> Result<Option<i32>, ReviewStoreError> {
        users::table
            .select(max(users::user_id))
            .get_result::<Option<i32>>(&mut *self.conn)
            .await
            .map_err(query_error("select max user id"))
    }

    async fn insert_user(&mut self, user: &NewUser<'_>) -> Result<(), ReviewStoreError> {
        diesel::insert_into(users::table)
            .values(NewUserRow::from(user))
            .execute(&mut *self.conn)
            .await
            .map(drop)
            .map_err(query_error("insert user"))
    }

    async fn max_review_id(&mut self) -> Result<Option<i32>, ReviewStoreError> {
        user_reviews::table
            .select(max(user_reviews::user_review_id))
            .get_result::<Option<i32>>(&mut *self.conn)
            .await
            .map_err(query_error("select max review id"))
    }

    async fn insert_review(&mut self, review: &NewReview<'_>) -> Result<(), ReviewStoreError> {
        diesel::insert_into(user_reviews::table)
            .values(NewReviewRow::from(review))
            .execute(&mut *self.conn)
            .await
            .map(drop)
            .map_err(query_error("insert review"))
    }

    async fn review_summary(
        &mut self,
        review_id: ReviewId,
        media_id: MediaId,
    ) -> Result<Option<ReviewSummary>, ReviewStoreError> {
        let row = sql_query(REVIEW_SUMMARY_SQL)
            .bind::<Integer, _>(review_id.get())
            .bind::<Integer, _>(media_id.get())
            .get_result::<ReviewSummaryRow>(&mut *self.conn)
            .await
            .optional()
            .map_err(query_error("select review summary"))?;
        Ok(row.map(ReviewSummary::from))
    }

    async fn commit(self: Box<Self>) -> Result<(), ReviewStoreError> {
        let Self { mut conn } = *self;
        let Err(error) = AnsiTransactionManager::commit_transaction(&mut *conn).await else {
            return Ok(());
        };
        if let Err(rollback_error) = AnsiTransactionManager::rollback_transaction(&mut *conn).await
        {
            warn!(error = %rollback_error, "rollback after failed commit did not complete");
        }
        Err(query_error("commit transaction")(error))
    }

    async fn rollback(self: Box<Self>) -> Result<(), ReviewStoreError> {
        let Self { mut conn } = *self;
        AnsiTransactionManager::rollback_transaction(&mut *conn)
            .await
            .map_err(query_error("rollback transaction"))
    }
}
