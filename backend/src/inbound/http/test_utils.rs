//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::Trace;
use crate::domain::ports::{CatalogueQuery, ReviewSubmissionService};
use crate::inbound::http::configure_routes;
use crate::inbound::http::state::HttpState;

/// Build an application wired exactly like the server's API scope.
pub fn test_app(
    review_submission: Arc<dyn ReviewSubmissionService>,
    catalogue: Arc<dyn CatalogueQuery>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::new(review_submission, catalogue)))
        .wrap(Trace)
        .configure(configure_routes)
}
