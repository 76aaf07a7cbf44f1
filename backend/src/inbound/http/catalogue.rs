//! Catalogue read endpoints.
//!
//! ```text
//! GET /query1/series
//! GET /query1/mediaEntries?seriesID=3
//! GET /query2/mediaTitles
//! GET /query2/reviewPatterns?minScore=7&mediaID=2
//! GET /query3/mediaTypes
//! GET /query3/genreCountOfType?TypeName=Book
//! GET /query4/writers
//! GET /query4/writerDetails?writerID=5
//! GET /query5/mediaTitles
//! GET /query5/mediaDetails?mediaTitle=Dune
//! GET /query6/mediaTitles
//! ```
//!
//! Query failures are logged and answered with a fixed plain-text message per
//! endpoint; database detail never reaches the client.

use actix_web::{get, web};
use serde::Deserialize;
use tracing::error;
use utoipa::IntoParams;

use crate::domain::ports::CatalogueQueryError;
use crate::domain::{
    Error, GenreCount, MediaEntry, MediaId, MediaTitle, MediaTypeSummary, RecentMediaReview,
    RecentTitle, ReviewPattern, ReviewPatternFilter, SeriesId, SeriesSummary, WriterId,
    WriterSummary, WriterTopReview,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{optional_text, parse_min_score, parse_optional_id};

/// Answer returned by `mediaDetails` when nothing matches.
pub const NO_MEDIA_FOUND: &str = "No media found with that name";

fn query_failed(message: String) -> impl FnOnce(CatalogueQueryError) -> Error {
    move |err| {
        error!(error = %err, "{message}");
        Error::internal(message)
    }
}

/// Query string for `GET /query1/mediaEntries`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MediaEntriesParams {
    /// Restrict to one series.
    #[serde(rename = "seriesID")]
    #[param(value_type = Option<i32>)]
    pub series_id: Option<String>,
}

/// Query string for `GET /query2/reviewPatterns`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReviewPatternParams {
    /// Lowest score to include, `1..=10`; defaults to `1`.
    #[serde(rename = "minScore")]
    #[param(value_type = Option<i32>)]
    pub min_score: Option<String>,
    /// Restrict to one media item.
    #[serde(rename = "mediaID")]
    #[param(value_type = Option<i32>)]
    pub media_id: Option<String>,
}

/// Query string for `GET /query3/genreCountOfType`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GenreCountParams {
    /// Media type name to count within.
    #[serde(rename = "TypeName")]
    pub type_name: Option<String>,
}

/// Query string for `GET /query4/writerDetails`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WriterDetailsParams {
    /// Restrict to one writer.
    #[serde(rename = "writerID")]
    #[param(value_type = Option<i32>)]
    pub writer_id: Option<String>,
}

/// Query string for `GET /query5/mediaDetails`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MediaDetailsParams {
    /// Exact media title.
    #[serde(rename = "mediaTitle")]
    pub media_title: Option<String>,
}

/// List every series ordered by title.
#[utoipa::path(
    get,
    path = "/query1/series",
    responses(
        (status = 200, description = "Series", body = [SeriesSummary]),
        (status = 500, description = "Query failed", body = String, content_type = "text/plain")
    ),
    tags = ["catalogue"],
    operation_id = "listSeries"
)]
#[get("/query1/series")]
pub async fn list_series(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<SeriesSummary>>> {
    let rows = state
        .catalogue
        .series()
        .await
        .map_err(query_failed("Error fetching series list".to_owned()))?;
    Ok(web::Json(rows))
}

/// List media entries, optionally for one series.
#[utoipa::path(
    get,
    path = "/query1/mediaEntries",
    params(MediaEntriesParams),
    responses(
        (status = 200, description = "Media entries", body = [MediaEntry]),
        (status = 400, description = "Malformed seriesID", body = String, content_type = "text/plain"),
        (status = 500, description = "Query failed", body = String, content_type = "text/plain")
    ),
    tags = ["catalogue"],
    operation_id = "listMediaEntries"
)]
#[get("/query1/mediaEntries")]
pub async fn list_media_entries(
    state: web::Data<HttpState>,
    params: web::Query<MediaEntriesParams>,
) -> ApiResult<web::Json<Vec<MediaEntry>>> {
    let series_id = parse_optional_id::<SeriesId>(params.series_id.as_deref(), "seriesID")?;
    let rows = state
        .catalogue
        .media_entries(series_id)
        .await
        .map_err(query_failed("Error retrieving media entries".to_owned()))?;
    Ok(web::Json(rows))
}

/// List media identifiers and titles for the review-pattern picker.
#[utoipa::path(
    get,
    path = "/query2/mediaTitles",
    responses(
        (status = 200, description = "Media titles", body = [MediaTitle]),
        (status = 500, description = "Query failed", body = String, content_type = "text/plain")
    ),
    tags = ["catalogue"],
    operation_id = "listReviewPatternMediaTitles"
)]
#[get("/query2/mediaTitles")]
pub async fn list_media_titles(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<MediaTitle>>> {
    let rows = state
        .catalogue
        .media_titles()
        .await
        .map_err(query_failed("Error fetching media titles".to_owned()))?;
    Ok(web::Json(rows))
}

/// List reviews scoring at least `minScore`, best first.
#[utoipa::path(
    get,
    path = "/query2/reviewPatterns",
    params(ReviewPatternParams),
    responses(
        (status = 200, description = "Matching reviews", body = [ReviewPattern]),
        (status = 400, description = "Score outside bounds or malformed mediaID", body = String, content_type = "text/plain"),
        (status = 500, description = "Query failed", body = String, content_type = "text/plain")
    ),
    tags = ["catalogue"],
    operation_id = "listReviewPatterns"
)]
#[get("/query2/reviewPatterns")]
pub async fn list_review_patterns(
    state: web::Data<HttpState>,
    params: web::Query<ReviewPatternParams>,
) -> ApiResult<web::Json<Vec<ReviewPattern>>> {
    let filter = ReviewPatternFilter {
        min_score: parse_min_score(params.min_score.as_deref())?,
        media_id: parse_optional_id::<MediaId>(params.media_id.as_deref(), "mediaID")?,
    };
    let rows = state
        .catalogue
        .review_patterns(filter)
        .await
        .map_err(query_failed("Error retrieving specific review patterns".to_owned()))?;
    Ok(web::Json(rows))
}

/// List media types ordered by name.
#[utoipa::path(
    get,
    path = "/query3/mediaTypes",
    responses(
        (status = 200, description = "Media types", body = [MediaTypeSummary]),
        (status = 500, description = "Query failed", body = String, content_type = "text/plain")
    ),
    tags = ["catalogue"],
    operation_id = "listMediaTypes"
)]
#[get("/query3/mediaTypes")]
pub async fn list_media_types(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<MediaTypeSummary>>> {
    let rows = state
        .catalogue
        .media_types()
        .await
        .map_err(query_failed("Error fetching media type".to_owned()))?;
    Ok(web::Json(rows))
}

/// Count media per genre, optionally within one media type.
#[utoipa::path(
    get,
    path = "/query3/genreCountOfType",
    params(GenreCountParams),
    responses(
        (status = 200, description = "Genre counts", body = [GenreCount]),
        (status = 500, description = "Query failed", body = String, content_type = "text/plain")
    ),
    tags = ["catalogue"],
    operation_id = "countGenresOfType"
)]
#[get("/query3/genreCountOfType")]
pub async fn genre_count_of_type(
    state: web::Data<HttpState>,
    params: web::Query<GenreCountParams>,
) -> ApiResult<web::Json<Vec<GenreCount>>> {
    let type_name = optional_text(params.into_inner().type_name);
    let failure = match &type_name {
        Some(name) => format!("Error fetching media type count for {name}"),
        None => "Error fetching genre count".to_owned(),
    };
    let rows = state
        .catalogue
        .genre_counts(type_name)
        .await
        .map_err(query_failed(failure))?;
    Ok(web::Json(rows))
}

/// List writers ordered by family name.
#[utoipa::path(
    get,
    path = "/query4/writers",
    responses(
        (status = 200, description = "Writers", body = [WriterSummary]),
        (status = 500, description = "Query failed", body = String, content_type = "text/plain")
    ),
    tags = ["catalogue"],
    operation_id = "listWriters"
)]
#[get("/query4/writers")]
pub async fn list_writers(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<WriterSummary>>> {
    let rows = state
        .catalogue
        .writers()
        .await
        .map_err(query_failed("Error fetching writer list".to_owned()))?;
    Ok(web::Json(rows))
}

/// List the reviews that gave each writer their top score.
#[utoipa::path(
    get,
    path = "/query4/writerDetails",
    params(WriterDetailsParams),
    responses(
        (status = 200, description = "Top-scored reviews", body = [WriterTopReview]),
        (status = 400, description = "Malformed writerID", body = String, content_type = "text/plain"),
        (status = 500, description = "Query failed", body = String, content_type = "text/plain")
    ),
    tags = ["catalogue"],
    operation_id = "writerDetails"
)]
#[get("/query4/writerDetails")]
pub async fn writer_details(
    state: web::Data<HttpState>,
    params: web::Query<WriterDetailsParams>,
) -> ApiResult<web::Json<Vec<WriterTopReview>>> {
    let writer_id = parse_optional_id::<WriterId>(params.writer_id.as_deref(), "writerID")?;
    let rows = state
        .catalogue
        .writer_top_reviews(writer_id)
        .await
        .map_err(query_failed("Error retrieving writer details".to_owned()))?;
    Ok(web::Json(rows))
}

/// List distinct titles released after 2010-01-01.
#[utoipa::path(
    get,
    path = "/query5/mediaTitles",
    responses(
        (status = 200, description = "Recent titles", body = [RecentTitle]),
        (status = 500, description = "Query failed", body = String, content_type = "text/plain")
    ),
    tags = ["catalogue"],
    operation_id = "listRecentTitles"
)]
#[get("/query5/mediaTitles")]
pub async fn list_recent_titles(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<RecentTitle>>> {
    let rows = state
        .catalogue
        .recent_titles()
        .await
        .map_err(query_failed("Error fetching media titles".to_owned()))?;
    Ok(web::Json(rows))
}

/// List scored reviews of recent releases, optionally for one title.
#[utoipa::path(
    get,
    path = "/query5/mediaDetails",
    params(MediaDetailsParams),
    responses(
        (status = 200, description = "Reviews of recent releases", body = [RecentMediaReview]),
        (status = 404, description = "No media found with that name", body = String, content_type = "text/plain"),
        (status = 500, description = "Query failed", body = String, content_type = "text/plain")
    ),
    tags = ["catalogue"],
    operation_id = "recentMediaDetails"
)]
#[get("/query5/mediaDetails")]
pub async fn media_details(
    state: web::Data<HttpState>,
    params: web::Query<MediaDetailsParams>,
) -> ApiResult<web::Json<Vec<RecentMediaReview>>> {
    let media_title = optional_text(params.into_inner().media_title);
    let rows = state
        .catalogue
        .recent_media_reviews(media_title)
        .await
        .map_err(query_failed("Error fetching media data".to_owned()))?;
    if rows.is_empty() {
        return Err(Error::not_found(NO_MEDIA_FOUND));
    }
    Ok(web::Json(rows))
}

/// List media identifiers and titles for the review form.
#[utoipa::path(
    get,
    path = "/query6/mediaTitles",
    responses(
        (status = 200, description = "Media titles", body = [MediaTitle]),
        (status = 500, description = "Query failed", body = String, content_type = "text/plain")
    ),
    tags = ["reviews"],
    operation_id = "listReviewableMedia"
)]
#[get("/query6/mediaTitles")]
pub async fn list_reviewable_media(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<MediaTitle>>> {
    let rows = state
        .catalogue
        .media_titles()
        .await
        .map_err(query_failed("Error fetching media list".to_owned()))?;
    Ok(web::Json(rows))
}
