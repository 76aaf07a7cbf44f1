//! Driven port for the read-only catalogue listings.
//!
//! Each method maps to a single parameterised query with no transactional
//! requirements; adapters return rows already in presentation order.

use async_trait::async_trait;

use crate::domain::{
    GenreCount, MediaEntry, MediaTitle, MediaTypeSummary, RecentMediaReview, RecentTitle,
    ReviewPattern, ReviewPatternFilter, SeriesId, SeriesSummary, WriterId, WriterSummary,
    WriterTopReview,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by catalogue query adapters.
    pub enum CatalogueQueryError {
        /// No connection could be checked out.
        Connection { message: String } => "catalogue connection failed: {message}",
        /// The query failed to execute or decode.
        Query { message: String } => "catalogue query failed: {message}",
    }
}

/// Read access to series, media, writers and their reviews.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueQuery: Send + Sync {
    /// All series ordered by title.
    async fn series(&self) -> Result<Vec<SeriesSummary>, CatalogueQueryError>;

    /// Media entries ordered by title, optionally limited to one series.
    async fn media_entries(
        &self,
        series_id: Option<SeriesId>,
    ) -> Result<Vec<MediaEntry>, CatalogueQueryError>;

    /// Every media identifier and title ordered by title.
    async fn media_titles(&self) -> Result<Vec<MediaTitle>, CatalogueQueryError>;

    /// Reviews at or above the filter's score, best first, then by reviewer
    /// and title.
    async fn review_patterns(
        &self,
        filter: ReviewPatternFilter,
    ) -> Result<Vec<ReviewPattern>, CatalogueQueryError>;

    /// Media types ordered by name.
    async fn media_types(&self) -> Result<Vec<MediaTypeSummary>, CatalogueQueryError>;

    /// Media counts per genre.
    ///
    /// Without a type name every genre is listed, including empty ones. With
    /// one, only genres holding media of that type appear.
    async fn genre_counts(
        &self,
        type_name: Option<String>,
    ) -> Result<Vec<GenreCount>, CatalogueQueryError>;

    /// Writers ordered by family name.
    async fn writers(&self) -> Result<Vec<WriterSummary>, CatalogueQueryError>;

    /// Reviews carrying each writer's top score, highest first.
    async fn writer_top_reviews(
        &self,
        writer_id: Option<WriterId>,
    ) -> Result<Vec<WriterTopReview>, CatalogueQueryError>;

    /// Distinct titles released after the recent-release cutoff.
    async fn recent_titles(&self) -> Result<Vec<RecentTitle>, CatalogueQueryError>;

    /// Scored reviews of recent releases ordered by reviewer, optionally for
    /// one title.
    async fn recent_media_reviews(
        &self,
        media_title: Option<String>,
    ) -> Result<Vec<RecentMediaReview>, CatalogueQueryError>;
}
