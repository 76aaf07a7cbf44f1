//! Read models for the catalogue listings.
//!
//! Field names on the wire follow the column aliases clients already consume,
//! hence the per-field `serde` renames.

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use super::{MediaId, Score};

/// Series available for filtering media entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SeriesSummary {
    /// Series identifier.
    #[serde(rename = "seriesID")]
    pub series_id: i32,
    /// Series title.
    #[serde(rename = "seriesTitle")]
    pub series_title: String,
}

/// Media row with its genre, type and author resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaEntry {
    /// Media title.
    pub media_title: String,
    /// Genre, when assigned.
    pub genre_name: Option<String>,
    /// Media type name, when assigned.
    pub media_type_name: Option<String>,
    /// Release date, when known.
    pub release_date: Option<NaiveDate>,
    /// `first [initial.] last`, or `None` without an author.
    pub author_full_name: Option<String>,
}

/// Identifier and title pair used to populate media pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MediaTitle {
    /// Media identifier.
    #[serde(rename = "mediaID")]
    pub media_id: i32,
    /// Media title.
    #[serde(rename = "mediaTitle")]
    pub media_title: String,
}

/// Review matched by a [`ReviewPatternFilter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPattern {
    /// Reviewer name.
    pub user_name: String,
    /// Reviewed media title.
    pub media_title: String,
    /// Review body.
    pub review: String,
    /// Review score.
    pub score: i32,
}

/// Filter for review patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewPatternFilter {
    /// Only reviews scoring at least this much are returned.
    pub min_score: Score,
    /// Restrict to one media item.
    pub media_id: Option<MediaId>,
}

impl Default for ReviewPatternFilter {
    fn default() -> Self {
        Self {
            min_score: Score::lowest(),
            media_id: None,
        }
    }
}

/// Media type row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MediaTypeSummary {
    /// Media type identifier.
    #[serde(rename = "mediaTypeID")]
    pub media_type_id: i32,
    /// Media type name.
    pub name: String,
}

/// Number of media items per genre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct GenreCount {
    /// Genre name.
    #[serde(rename = "genreName")]
    pub genre_name: String,
    /// Media items in the genre.
    #[serde(rename = "mediacount")]
    pub media_count: i64,
}

/// Writer row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct WriterSummary {
    /// Writer identifier.
    #[serde(rename = "writerID")]
    pub writer_id: i32,
    /// Given name.
    #[serde(rename = "nameFirst")]
    pub name_first: String,
    /// Family name.
    #[serde(rename = "nameLast")]
    pub name_last: String,
}

/// Review holding the best score any of a writer's works received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct WriterTopReview {
    /// Media title.
    #[serde(rename = "mediaTitle")]
    pub media_title: String,
    /// Writer's family name.
    pub author_lastname: String,
    /// Media type name.
    pub media_type: String,
    /// Review body.
    pub review: String,
    /// The writer's top score.
    pub score: i32,
}

/// Distinct title of media released after the recent-release cutoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RecentTitle {
    /// Media title.
    pub title: String,
}

/// Scored review of a recently released media item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RecentMediaReview {
    /// Reviewer name.
    pub reviewer: String,
    /// Media title.
    #[serde(rename = "mediaTitle")]
    pub media_title: String,
    /// Release date.
    pub releasedate: NaiveDate,
    /// Review score.
    pub score: i32,
}

/// Recent-release listings include media released strictly after this date.
pub const RECENT_RELEASE_CUTOFF: &str = "2010-01-01";
