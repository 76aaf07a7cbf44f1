//! Test doubles shared by unit tests across the crate.
//!
//! [`InMemoryReviewStore`] behaves like the database adapter: every
//! transaction stages its writes privately and publishes them only on commit,
//! reviews must reference known media and users, and primary keys stay unique
//! across concurrent transactions.
//! Individual operations can be made to fail so each workflow stage is
//! reachable from tests.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{NewReview, NewUser, ReviewStore, ReviewStoreError, ReviewTransaction};
use crate::domain::{MediaId, ReviewId, ReviewSummary};

/// User row as held by the in-memory store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StoredUser {
    pub id: i32,
    pub name: String,
    pub password: String,
    pub email: String,
    pub profile_image: Option<String>,
    pub description: Option<String>,
}

/// Review row as held by the in-memory store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StoredReview {
    pub id: i32,
    pub media_id: i32,
    pub user_id: i32,
    pub review: String,
    pub score: i32,
}

/// Store operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StoreOperation {
    Begin,
    MaxUserId,
    InsertUser,
    MaxReviewId,
    InsertReview,
    Summary,
    Commit,
    Rollback,
}

#[derive(Debug, Clone, Default)]
struct Tables {
    users: Vec<StoredUser>,
    reviews: Vec<StoredReview>,
}

impl Tables {
    fn has_user(&self, id: i32) -> bool {
        self.users.iter().any(|user| user.id == id)
    }

    fn has_review(&self, id: i32) -> bool {
        self.reviews.iter().any(|review| review.id == id)
    }
}

#[derive(Debug, Default)]
struct StoreState {
    committed: Tables,
    media: BTreeMap<i32, String>,
    failing: Option<StoreOperation>,
    summary_missing: bool,
    racing_user: Option<StoredUser>,
    commits: usize,
    rollbacks: usize,
}

impl StoreState {
    fn check(&self, operation: StoreOperation) -> Result<(), ReviewStoreError> {
        if self.failing == Some(operation) {
            return Err(match operation {
                StoreOperation::Begin => ReviewStoreError::connection("injected begin failure"),
                other => ReviewStoreError::query(format!("injected {other:?} failure")),
            });
        }
        Ok(())
    }

    /// Publish `writes`, refusing the whole batch if any key is taken.
    fn publish(&mut self, writes: Tables) -> Result<(), ReviewStoreError> {
        if let Some(user) = writes.users.iter().find(|user| self.committed.has_user(user.id)) {
            return Err(duplicate("user", user.id));
        }
        if let Some(review) = writes
            .reviews
            .iter()
            .find(|review| self.committed.has_review(review.id))
        {
            return Err(duplicate("review", review.id));
        }
        self.committed.users.extend(writes.users);
        self.committed.reviews.extend(writes.reviews);
        Ok(())
    }
}

fn duplicate(table: &str, id: i32) -> ReviewStoreError {
    ReviewStoreError::query(format!("duplicate {table} id {id}"))
}

/// Transactional in-memory [`ReviewStore`].
#[derive(Debug, Clone, Default)]
pub(crate) struct InMemoryReviewStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryReviewStore {
    /// Store whose `media` table holds the given `(id, title)` rows.
    pub fn with_media<'a>(media: impl IntoIterator<Item = (i32, &'a str)>) -> Self {
        let store = Self::default();
        store.lock().media = media
            .into_iter()
            .map(|(id, title)| (id, title.to_owned()))
            .collect();
        store
    }

    /// Make `operation` fail on every transaction.
    pub fn failing_at(self, operation: StoreOperation) -> Self {
        self.lock().failing = Some(operation);
        self
    }

    /// Make the summary query find no row.
    pub fn without_summary_row(self) -> Self {
        self.lock().summary_missing = true;
        self
    }

    /// Let another session commit user `id` just after the next
    /// `max_user_id` read, as a concurrent submission would.
    pub fn racing_user(self, id: i32, name: &str) -> Self {
        self.lock().racing_user = Some(stored_user(id, name));
        self
    }

    /// Seed a committed user, as if created by an earlier submission.
    pub fn seed_user(&self, id: i32, name: &str) {
        self.lock().committed.users.push(stored_user(id, name));
    }

    pub fn users(&self) -> Vec<StoredUser> {
        self.lock().committed.users.clone()
    }

    pub fn reviews(&self) -> Vec<StoredReview> {
        self.lock().committed.reviews.clone()
    }

    pub fn commits(&self) -> usize {
        self.lock().commits
    }

    pub fn rollbacks(&self) -> usize {
        self.lock().rollbacks
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        lock(&self.state)
    }
}

fn lock(state: &Mutex<StoreState>) -> MutexGuard<'_, StoreState> {
    state.lock().expect("store state lock")
}

fn stored_user(id: i32, name: &str) -> StoredUser {
    StoredUser {
        id,
        name: name.to_owned(),
        password: "pw".to_owned(),
        email: format!("{name}@example.com"),
        profile_image: None,
        description: None,
    }
}

#[async_trait]
impl ReviewStore for InMemoryReviewStore {
    async fn begin(&self) -> Result<Box<dyn ReviewTransaction>, ReviewStoreError> {
        let state = self.lock();
        state.check(StoreOperation::Begin)?;
        Ok(Box::new(InMemoryTransaction {
            state: Arc::clone(&self.state),
            snapshot: state.committed.clone(),
            writes: Tables::default(),
        }))
    }
}

/// Reads see the committed rows as of `begin` plus this transaction's own
/// writes. Inserts also fail on keys other sessions committed since, the way
/// a unique index does once the competing transaction commits.
struct InMemoryTransaction {
    state: Arc<Mutex<StoreState>>,
    snapshot: Tables,
    writes: Tables,
}

impl InMemoryTransaction {
    fn check(&self, operation: StoreOperation) -> Result<(), ReviewStoreError> {
        lock(&self.state).check(operation)
    }

    fn visible_users(&self) -> impl Iterator<Item = &StoredUser> {
        self.snapshot.users.iter().chain(&self.writes.users)
    }

    fn visible_reviews(&self) -> impl Iterator<Item = &StoredReview> {
        self.snapshot.reviews.iter().chain(&self.writes.reviews)
    }
}

#[async_trait]
impl ReviewTransaction for InMemoryTransaction {
    async fn max_user_id(&mut self) -> Result<Option<i32>, ReviewStoreError> {
        self.check(StoreOperation::MaxUserId)?;
        let max = self.visible_users().map(|user| user.id).max();
        let mut state = lock(&self.state);
        if let Some(rival) = state.racing_user.take() {
            state.committed.users.push(rival);
        }
        Ok(max)
    }

    async fn insert_user(&mut self, user: &NewUser<'_>) -> Result<(), ReviewStoreError> {
        self.check(StoreOperation::InsertUser)?;
        let id = user.id.get();
        let taken_elsewhere = lock(&self.state).committed.has_user(id);
        if taken_elsewhere || self.visible_users().any(|existing| existing.id == id) {
            return Err(duplicate("user", id));
        }
        self.writes.users.push(StoredUser {
            id,
            name: user.name.to_owned(),
            password: user.password.to_owned(),
            email: user.email.to_owned(),
            profile_image: user.profile_image.map(str::to_owned),
            description: user.description.map(str::to_owned),
        });
        Ok(())
    }

    async fn max_review_id(&mut self) -> Result<Option<i32>, ReviewStoreError> {
        self.check(StoreOperation::MaxReviewId)?;
        Ok(self.visible_reviews().map(|review| review.id).max())
    }

    async fn insert_review(&mut self, review: &NewReview<'_>) -> Result<(), ReviewStoreError> {
        self.check(StoreOperation::InsertReview)?;
        let id = review.id.get();
        let media_id = review.media_id.get();
        let user_id = review.user_id.get();
        let (media_known, taken_elsewhere) = {
            let state = lock(&self.state);
            (
                state.media.contains_key(&media_id),
                state.committed.has_review(id),
            )
        };
        if !media_known {
            return Err(ReviewStoreError::query(format!("unknown media {media_id}")));
        }
        if !self.visible_users().any(|user| user.id == user_id) {
            return Err(ReviewStoreError::query(format!("unknown user {user_id}")));
        }
        if taken_elsewhere || self.visible_reviews().any(|existing| existing.id == id) {
            return Err(duplicate("review", id));
        }
        self.writes.reviews.push(StoredReview {
            id,
            media_id,
            user_id,
            review: review.review.to_owned(),
            score: review.score.get(),
        });
        Ok(())
    }

    async fn review_summary(
        &mut self,
        review_id: ReviewId,
        media_id: MediaId,
    ) -> Result<Option<ReviewSummary>, ReviewStoreError> {
        let state = lock(&self.state);
        state.check(StoreOperation::Summary)?;
        if state.summary_missing {
            return Ok(None);
        }
        let Some(review) = self
            .visible_reviews()
            .find(|review| review.id == review_id.get())
        else {
            return Ok(None);
        };
        let user = self.visible_users().find(|user| user.id == review.user_id);
        let title = state.media.get(&review.media_id);
        let (Some(user), Some(title)) = (user, title) else {
            return Ok(None);
        };
        let scores: Vec<f64> = self
            .visible_reviews()
            .filter(|candidate| candidate.media_id == media_id.get())
            .map(|candidate| f64::from(candidate.score))
            .collect();
        let avg_score = scores.iter().sum::<f64>() / scores.len() as f64;
        Ok(Some(ReviewSummary {
            user_name: user.name.clone(),
            new_review: review.review.clone(),
            media_title: title.clone(),
            avg_score,
        }))
    }

    async fn commit(self: Box<Self>) -> Result<(), ReviewStoreError> {
        let Self { state, writes, .. } = *self;
        let mut guard = lock(&state);
        guard.check(StoreOperation::Commit)?;
        guard.publish(writes)?;
        guard.commits += 1;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), ReviewStoreError> {
        let mut state = lock(&self.state);
        state.rollbacks += 1;
        state.check(StoreOperation::Rollback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use rstest::rstest;

    async fn begin(store: &InMemoryReviewStore) -> Box<dyn ReviewTransaction> {
        match store.begin().await {
            Ok(tx) => tx,
            Err(err) => panic!("begin failed: {err}"),
        }
    }

    fn new_user(id: i32, name: &str) -> NewUser<'_> {
        NewUser {
            id: UserId::new(i64::from(id)).expect("valid id"),
            name,
            password: "pw",
            email: "reader@example.com",
            profile_image: None,
            description: None,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn interleaved_commits_cannot_share_a_user_id() {
        let store = InMemoryReviewStore::with_media([(7, "Dune")]);
        let mut first = begin(&store).await;
        let mut second = begin(&store).await;

        assert_eq!(first.max_user_id().await.expect("max"), None);
        assert_eq!(second.max_user_id().await.expect("max"), None);
        first.insert_user(&new_user(1, "Ann")).await.expect("first insert");
        second.insert_user(&new_user(1, "Bob")).await.expect("second insert");

        first.commit().await.expect("first commit");
        let err = second.commit().await.expect_err("duplicate key");

        assert_eq!(err, ReviewStoreError::query("duplicate user id 1"));
        let names: Vec<String> = store.users().into_iter().map(|user| user.name).collect();
        assert_eq!(names, vec!["Ann".to_owned()]);
        assert_eq!(store.commits(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn inserts_see_keys_committed_after_begin() {
        let store = InMemoryReviewStore::default();
        let mut tx = begin(&store).await;
        store.seed_user(1, "Ann");

        let err = tx
            .insert_user(&new_user(1, "Bob"))
            .await
            .expect_err("key already committed");

        assert_eq!(err, ReviewStoreError::query("duplicate user id 1"));
    }
}
