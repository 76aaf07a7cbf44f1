//! HTTP inbound adapter exposing the query and review endpoints.

use actix_web::web;
use tracing::debug;

use crate::domain::Error;

pub mod catalogue;
pub mod error;
pub mod health;
pub mod reviews;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub(crate) mod validation;

pub use error::ApiResult;

/// Query-string extractor configuration answering undecodable query strings
/// with a plain-text `400`.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejecting malformed query string");
        Error::invalid_request("Invalid query parameter").into()
    })
}

/// Register every API endpoint and its extractor configuration.
///
/// Health probes are registered separately by the server because they depend
/// on process state rather than on domain ports.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use media_reviews::inbound::http::configure_routes;
///
/// let app = App::new().configure(configure_routes);
/// ```
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(reviews::json_config())
        .app_data(query_config())
        .service(catalogue::list_series)
        .service(catalogue::list_media_entries)
        .service(catalogue::list_media_titles)
        .service(catalogue::list_review_patterns)
        .service(catalogue::list_media_types)
        .service(catalogue::genre_count_of_type)
        .service(catalogue::list_writers)
        .service(catalogue::writer_details)
        .service(catalogue::list_recent_titles)
        .service(catalogue::media_details)
        .service(catalogue::list_reviewable_media)
        .service(reviews::insert_review);
}
