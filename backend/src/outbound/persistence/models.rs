//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Date, Double, Integer, Nullable, Text};

use crate::domain::ports::{NewReview, NewUser};
use crate::domain::{
    GenreCount, MediaEntry, MediaTitle, MediaTypeSummary, RecentMediaReview, RecentTitle,
    ReviewPattern, ReviewSummary, SeriesSummary, WriterSummary, WriterTopReview,
};

use super::schema::{media, media_types, series, user_reviews, users, writers};

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub user_id: i32,
    pub name: &'a str,
    pub password: &'a str,
    pub email: &'a str,
    pub profile_image: Option<&'a str>,
    pub description: Option<&'a str>,
}

impl<'a> From<&NewUser<'a>> for NewUserRow<'a> {
    fn from(user: &NewUser<'a>) -> Self {
        Self {
            user_id: user.id.get(),
            name: user.name,
            password: user.password,
            email: user.email,
            profile_image: user.profile_image,
            description: user.description,
        }
    }
}

/// Insertable struct for creating new review records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_reviews)]
pub(crate) struct NewReviewRow<'a> {
    pub user_review_id: i32,
    pub media_id: i32,
    pub user_id: i32,
    pub review: &'a str,
    pub score: Option<i32>,
}

impl<'a> From<&NewReview<'a>> for NewReviewRow<'a> {
    fn from(review: &NewReview<'a>) -> Self {
        Self {
            user_review_id: review.id.get(),
            media_id: review.media_id.get(),
            user_id: review.user_id.get(),
            review: review.review,
            score: Some(review.score.get()),
        }
    }
}

/// Review joined with its author, media title and the media's mean score.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct ReviewSummaryRow {
    #[diesel(sql_type = Text)]
    pub user_name: String,
    #[diesel(sql_type = Text)]
    pub new_review: String,
    #[diesel(sql_type = Text)]
    pub media_title: String,
    #[diesel(sql_type = Nullable<Double>)]
    pub avg_score: Option<f64>,
}

impl From<ReviewSummaryRow> for ReviewSummary {
    fn from(row: ReviewSummaryRow) -> Self {
        Self {
            user_name: row.user_name,
            new_review: row.new_review,
            media_title: row.media_title,
            // The review just inserted carries a score, so the mean is present.
            avg_score: row.avg_score.unwrap_or_default(),
        }
    }
}

/// Row struct for reading from the series table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = series)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SeriesRow {
    pub series_id: i32,
    pub series_title: String,
}

impl From<SeriesRow> for SeriesSummary {
    fn from(row: SeriesRow) -> Self {
        Self {
            series_id: row.series_id,
            series_title: row.series_title,
        }
    }
}

/// Identifier and title columns of the media table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = media)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MediaTitleRow {
    pub media_id: i32,
    pub media_title: String,
}

impl From<MediaTitleRow> for MediaTitle {
    fn from(row: MediaTitleRow) -> Self {
        Self {
            media_id: row.media_id,
            media_title: row.media_title,
        }
    }
}

/// Row struct for reading from the media_types table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = media_types)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MediaTypeRow {
    pub media_type_id: i32,
    pub name: String,
}

impl From<MediaTypeRow> for MediaTypeSummary {
    fn from(row: MediaTypeRow) -> Self {
        Self {
            media_type_id: row.media_type_id,
            name: row.name,
        }
    }
}

/// Identifier and name columns of the writers table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = writers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct WriterRow {
    pub writer_id: i32,
    pub name_first: String,
    pub name_last: String,
}

impl From<WriterRow> for WriterSummary {
    fn from(row: WriterRow) -> Self {
        Self {
            writer_id: row.writer_id,
            name_first: row.name_first,
            name_last: row.name_last,
        }
    }
}

/// Media row with genre, type and author resolved.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct MediaEntryRow {
    #[diesel(sql_type = Text)]
    pub media_title: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub genre_name: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub media_type_name: Option<String>,
    #[diesel(sql_type = Nullable<Date>)]
    pub release_date: Option<NaiveDate>,
    #[diesel(sql_type = Nullable<Text>)]
    pub author_full_name: Option<String>,
}

impl From<MediaEntryRow> for MediaEntry {
    fn from(row: MediaEntryRow) -> Self {
        Self {
            media_title: row.media_title,
            genre_name: row.genre_name,
            media_type_name: row.media_type_name,
            release_date: row.release_date,
            author_full_name: row.author_full_name,
        }
    }
}

#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct ReviewPatternRow {
    #[diesel(sql_type = Text)]
    pub user_name: String,
    #[diesel(sql_type = Text)]
    pub media_title: String,
    #[diesel(sql_type = Text)]
    pub review: String,
    #[diesel(sql_type = Integer)]
    pub score: i32,
}

impl From<ReviewPatternRow> for ReviewPattern {
    fn from(row: ReviewPatternRow) -> Self {
        Self {
            user_name: row.user_name,
            media_title: row.media_title,
            review: row.review,
            score: row.score,
        }
    }
}

#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct GenreCountRow {
    #[diesel(sql_type = Text)]
    pub genre_name: String,
    #[diesel(sql_type = BigInt)]
    pub media_count: i64,
}

impl From<GenreCountRow> for GenreCount {
    fn from(row: GenreCountRow) -> Self {
        Self {
            genre_name: row.genre_name,
            media_count: row.media_count,
        }
    }
}

#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct WriterTopReviewRow {
    #[diesel(sql_type = Text)]
    pub media_title: String,
    #[diesel(sql_type = Text)]
    pub author_lastname: String,
    #[diesel(sql_type = Text)]
    pub media_type: String,
    #[diesel(sql_type = Text)]
    pub review: String,
    #[diesel(sql_type = Integer)]
    pub score: i32,
}

impl From<WriterTopReviewRow> for WriterTopReview {
    fn from(row: WriterTopReviewRow) -> Self {
        Self {
            media_title: row.media_title,
            author_lastname: row.author_lastname,
            media_type: row.media_type,
            review: row.review,
            score: row.score,
        }
    }
}

#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct RecentTitleRow {
    #[diesel(sql_type = Text)]
    pub title: String,
}

impl From<RecentTitleRow> for RecentTitle {
    fn from(row: RecentTitleRow) -> Self {
        Self { title: row.title }
    }
}

#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct RecentMediaReviewRow {
    #[diesel(sql_type = Text)]
    pub reviewer: String,
    #[diesel(sql_type = Text)]
    pub media_title: String,
    #[diesel(sql_type = Date)]
    pub releasedate: NaiveDate,
    #[diesel(sql_type = Integer)]
    pub score: i32,
}

impl From<RecentMediaReviewRow> for RecentMediaReview {
    fn from(row: RecentMediaReviewRow) -> Self {
        Self {
            reviewer: row.reviewer,
            media_title: row.media_title,
            releasedate: row.releasedate,
            score: row.score,
        }
    }
}
