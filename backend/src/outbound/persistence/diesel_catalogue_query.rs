//! PostgreSQL-backed catalogue listings.
//!
//! Single-table listings use the Diesel DSL. The join-heavy reads are raw SQL
//! loaded into `QueryableByName` rows; optional filters are bound as nullable
//! parameters and short-circuit with `$n IS NULL`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel::sql_query;
use diesel::sql_types::{Integer, Nullable, Text};
use diesel_async::AsyncPgConnection;
use diesel_async::RunQueryDsl;
use diesel_async::pooled_connection::bb8::PooledConnection;

use crate::domain::ports::{CatalogueQuery, CatalogueQueryError};
use crate::domain::{
    GenreCount, MediaEntry, MediaTitle, MediaTypeSummary, RECENT_RELEASE_CUTOFF,
    RecentMediaReview, RecentTitle, ReviewPattern, ReviewPatternFilter, SeriesId, SeriesSummary,
    WriterId, WriterSummary, WriterTopReview,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{
    GenreCountRow, MediaEntryRow, MediaTitleRow, MediaTypeRow, RecentMediaReviewRow,
    RecentTitleRow, ReviewPatternRow, SeriesRow, WriterRow, WriterTopReviewRow,
};
use super::pool::DbPool;
use super::schema::{media, media_types, series, writers};

const MEDIA_ENTRIES_SQL: &str = r#"
SELECT m.media_title AS media_title,
       g.genre_name AS genre_name,
       t.name AS media_type_name,
       m.release_date AS release_date,
       CASE WHEN w.writer_id IS NULL THEN NULL
            ELSE CONCAT(
                w.name_first,
                CASE WHEN COALESCE(w.name_initial, '') <> ''
                     THEN ' ' || w.name_initial || '.'
                     ELSE '' END,
                ' ',
                w.name_last)
       END AS author_full_name
  FROM media m
  LEFT JOIN genres g ON g.genre_name = m.genre_name
  LEFT JOIN media_types t ON t.media_type_id = m.media_type_id
  LEFT JOIN writers w ON w.writer_id = m.author
 WHERE ($1::int IS NULL OR m.series_id = $1)
 ORDER BY m.media_title
"#;

const REVIEW_PATTERNS_SQL: &str = r#"
SELECT u.name AS user_name,
       m.media_title AS media_title,
       r.review AS review,
       r.score AS score
  FROM user_reviews r
  JOIN users u ON u.user_id = r.user_id
  JOIN media m ON m.media_id = r.media_id
 WHERE r.score >= $1
   AND ($2::int IS NULL OR r.media_id = $2)
 ORDER BY r.score DESC, u.name, m.media_title
"#;

const GENRE_COUNTS_SQL: &str = r#"
SELECT g.genre_name AS genre_name,
       COUNT(m.media_id) AS media_count
  FROM genres g
  LEFT JOIN media m ON m.genre_name = g.genre_name
 GROUP BY g.genre_name
 ORDER BY g.genre_name
"#;

const GENRE_COUNTS_OF_TYPE_SQL: &str = r#"
SELECT g.genre_name AS genre_name,
       COUNT(m.media_id) AS media_count
  FROM genres g
  JOIN media m ON m.genre_name = g.genre_name
  JOIN media_types t ON t.media_type_id = m.media_type_id
 WHERE t.name = $1
 GROUP BY g.genre_name
 ORDER BY g.genre_name
"#;

const WRITER_TOP_REVIEWS_SQL: &str = r#"
WITH top_scores AS (
    SELECT m.author AS author,
           MAX(r.score) AS max_score
      FROM user_reviews r
      JOIN media m ON m.media_id = r.media_id
     WHERE r.score IS NOT NULL
       AND m.author IS NOT NULL
     GROUP BY m.author
)
SELECT m.media_title AS media_title,
       w.name_last AS author_lastname,
       t.name AS media_type,
       r.review AS review,
       r.score AS score
  FROM user_reviews r
  JOIN media m ON m.media_id = r.media_id
  JOIN media_types t ON t.media_type_id = m.media_type_id
  JOIN writers w ON w.writer_id = m.author
  JOIN top_scores ts ON ts.author = m.author AND ts.max_score = r.score
 WHERE r.score IS NOT NULL
   AND ($1::int IS NULL OR w.writer_id = $1)
 ORDER BY r.score DESC, w.name_last, m.media_title
"#;

const RECENT_TITLES_SQL: &str = r#"
SELECT DISTINCT m.media_title AS title
  FROM media m
 WHERE m.release_date > $1::date
 ORDER BY title
"#;

const RECENT_MEDIA_REVIEWS_SQL: &str = r#"
SELECT u.name AS reviewer,
       m.media_title AS media_title,
       m.release_date AS releasedate,
       r.score AS score
  FROM user_reviews r
  JOIN users u ON u.user_id = r.user_id
  JOIN media m ON m.media_id = r.media_id
 WHERE m.release_date IS NOT NULL
   AND m.release_date > $1::date
   AND r.score IS NOT NULL
   AND ($2::text IS NULL OR m.media_title = $2)
 ORDER BY u.name, m.media_title
"#;

fn query_error(operation: &'static str) -> impl FnOnce(DieselError) -> CatalogueQueryError {
    move |error| {
        map_diesel_error(
            error,
            operation,
            CatalogueQueryError::query,
            CatalogueQueryError::connection,
        )
    }
}

fn into_domain<R, T: From<R>>(rows: Vec<R>) -> Vec<T> {
    rows.into_iter().map(T::from).collect()
}

/// Diesel-backed implementation of the [`CatalogueQuery`] port.
#[derive(Clone)]
pub struct DieselCatalogueQuery {
    pool: DbPool,
}

impl DieselCatalogueQuery {
    /// Create a query adapter drawing connections from `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn connection(
        &self,
    ) -> Result<PooledConnection<'_, AsyncPgConnection>, CatalogueQueryError> {
        self.pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, CatalogueQueryError::connection))
    }
}

#[async_trait]
impl CatalogueQuery for DieselCatalogueQuery {
    async fn series(&self) -> Result<Vec<SeriesSummary>, CatalogueQueryError> {
        let mut conn = self.connection().await?;
        let rows = series::table
            .select(SeriesRow::as_select())
            .order(series::series_title.asc())
            .load::<SeriesRow>(&mut conn)
            .await
            .map_err(query_error("list series"))?;
        Ok(into_domain(rows))
    }

    async fn media_entries(
        &self,
        series_id: Option<SeriesId>,
    ) -> Result<Vec<MediaEntry>, CatalogueQueryError> {
        let mut conn = self.connection().await?;
        let rows = sql_query(MEDIA_ENTRIES_SQL)
            .bind::<Nullable<Integer>, _>(series_id.map(SeriesId::get))
            .load::<MediaEntryRow>(&mut conn)
            .await
            .map_err(query_error("list media entries"))?;
        Ok(into_domain(rows))
    }

    async fn media_titles(&self) -> Result<Vec<MediaTitle>, CatalogueQueryError> {
        let mut conn = self.connection().await?;
        let rows = media::table
            .select(MediaTitleRow::as_select())
            .order(media::media_title.asc())
            .load::<MediaTitleRow>(&mut conn)
            .await
            .map_err(query_error("list media titles"))?;
        Ok(into_domain(rows))
    }

    async fn review_patterns(
        &self,
        filter: ReviewPatternFilter,
    ) -> Result<Vec<ReviewPattern>, CatalogueQueryError> {
        let mut conn = self.connection().await?;
        let rows = sql_query(REVIEW_PATTERNS_SQL)
            .bind::<Integer, _>(filter.min_score.get())
            .bind::<Nullable<Integer>, _>(filter.media_id.map(|id| id.get()))
            .load::<ReviewPatternRow>(&mut conn)
            .await
            .map_err(query_error("list review patterns"))?;
        Ok(into_domain(rows))
    }

    async fn media_types(&self) -> Result<Vec<MediaTypeSummary>, CatalogueQueryError> {
        let mut conn = self.connection().await?;
        let rows = media_types::table
            .select(MediaTypeRow::as_select())
            .order(media_types::name.asc())
            .load::<MediaTypeRow>(&mut conn)
            .await
            .map_err(query_error("list media types"))?;
        Ok(into_domain(rows))
    }

    async fn genre_counts(
        &self,
        type_name: Option<String>,
    ) -> Result<Vec<GenreCount>, CatalogueQueryError> {
        let mut conn = self.connection().await?;
        let rows = match type_name {
            Some(name) => {
                sql_query(GENRE_COUNTS_OF_TYPE_SQL)
                    .bind::<Text, _>(name)
                    .load::<GenreCountRow>(&mut conn)
                    .await
            }
            None => {
                sql_query(GENRE_COUNTS_SQL)
                    .load::<GenreCountRow>(&mut conn)
                    .await
            }
        }
        .map_err(query_error("count genres"))?;
        Ok(into_domain(rows))
    }

    async fn writers(&self) -> Result<Vec<WriterSummary>, CatalogueQueryError> {
        let mut conn = self.connection().await?;
        let rows = writers::table
            .select(WriterRow::as_select())
            .order((writers::name_last.asc(), writers::name_first.asc()))
            .load::<WriterRow>(&mut conn)
            .await
            .map_err(query_error("list writers"))?;
        Ok(into_domain(rows))
    }

    async fn writer_top_reviews(
        &self,
        writer_id: Option<WriterId>,
    ) -> Result<Vec<WriterTopReview>, CatalogueQueryError> {
        let mut conn = self.connection().await?;
        let rows = sql_query(WRITER_TOP_REVIEWS_SQL)
            .bind::<Nullable<Integer>, _>(writer_id.map(WriterId::get))
            .load::<WriterTopReviewRow>(&mut conn)
            .await
            .map_err(query_error("list writer top reviews"))?;
        Ok(into_domain(rows))
    }

    async fn recent_titles(&self) -> Result<Vec<RecentTitle>, CatalogueQueryError> {
        let mut conn = self.connection().await?;
        let rows = sql_query(RECENT_TITLES_SQL)
            .bind::<Text, _>(RECENT_RELEASE_CUTOFF)
            .load::<RecentTitleRow>(&mut conn)
            .await
            .map_err(query_error("list recent titles"))?;
        Ok(into_domain(rows))
    }

    async fn recent_media_reviews(
        &self,
        media_title: Option<String>,
    ) -> Result<Vec<RecentMediaReview>, CatalogueQueryError> {
        let mut conn = self.connection().await?;
        let rows = sql_query(RECENT_MEDIA_REVIEWS_SQL)
            .bind::<Text, _>(RECENT_RELEASE_CUTOFF)
            .bind::<Nullable<Text>, _>(media_title)
            .load::<RecentMediaReviewRow>(&mut conn)
            .await
            .map_err(query_error("list recent media reviews"))?;
        Ok(into_domain(rows))
    }
}
