//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the read models and request bodies they exchange. The document backs
//! Swagger UI in debug builds and is exported by the `openapi-dump` binary.

use utoipa::OpenApi;

use crate::domain::{
    GenreCount, MediaEntry, MediaTitle, MediaTypeSummary, RecentMediaReview, RecentTitle,
    ReviewPattern, ReviewSummary, SeriesSummary, WriterSummary, WriterTopReview,
};
use crate::inbound::http::reviews::InsertReviewRequest;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Media reviews API",
        description = "Catalogue listings for series, media, writers and reviews, plus \
                       transactional review submission. Errors are plain text."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::catalogue::list_series,
        crate::inbound::http::catalogue::list_media_entries,
        crate::inbound::http::catalogue::list_media_titles,
        crate::inbound::http::catalogue::list_review_patterns,
        crate::inbound::http::catalogue::list_media_types,
        crate::inbound::http::catalogue::genre_count_of_type,
        crate::inbound::http::catalogue::list_writers,
        crate::inbound::http::catalogue::writer_details,
        crate::inbound::http::catalogue::list_recent_titles,
        crate::inbound::http::catalogue::media_details,
        crate::inbound::http::catalogue::list_reviewable_media,
        crate::inbound::http::reviews::insert_review,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        InsertReviewRequest,
        ReviewSummary,
        SeriesSummary,
        MediaEntry,
        MediaTitle,
        ReviewPattern,
        MediaTypeSummary,
        GenreCount,
        WriterSummary,
        WriterTopReview,
        RecentTitle,
        RecentMediaReview,
    )),
    tags(
        (name = "catalogue", description = "Read-only listings"),
        (name = "reviews", description = "Review submission"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
