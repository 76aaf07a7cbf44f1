//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use media_reviews::Trace;
#[cfg(debug_assertions)]
use media_reviews::doc::ApiDoc;
use media_reviews::domain::ReviewSubmissionWorkflow;
use media_reviews::inbound::http::configure_routes;
use media_reviews::inbound::http::health::{HealthState, live, ready};
use media_reviews::inbound::http::state::HttpState;
use media_reviews::outbound::persistence::{DbPool, DieselCatalogueQuery, DieselReviewStore};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Wire the Diesel adapters into the HTTP state.
fn build_http_state(pool: &DbPool) -> web::Data<HttpState> {
    let review_store = Arc::new(DieselReviewStore::new(pool.clone()));
    web::Data::new(HttpState::new(
        Arc::new(ReviewSubmissionWorkflow::new(review_store)),
        Arc::new(DieselCatalogueQuery::new(pool.clone())),
    ))
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure_routes)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// The readiness probe flips to ready once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config.db_pool);

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr())?
    .run();

    health_state.mark_ready();
    Ok(server)
}
