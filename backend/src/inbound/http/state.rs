//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CatalogueQuery, ReviewSubmissionService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub review_submission: Arc<dyn ReviewSubmissionService>,
    pub catalogue: Arc<dyn CatalogueQuery>,
}

impl HttpState {
    /// Bundle the port implementations used by the handlers.
    pub fn new(
        review_submission: Arc<dyn ReviewSubmissionService>,
        catalogue: Arc<dyn CatalogueQuery>,
    ) -> Self {
        Self {
            review_submission,
            catalogue,
        }
    }
}
