//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod catalogue_query;
mod review_store;
mod review_submission;

#[cfg(test)]
pub use catalogue_query::MockCatalogueQuery;
pub use catalogue_query::{CatalogueQuery, CatalogueQueryError};
#[cfg(test)]
pub use review_store::MockReviewStore;
pub use review_store::{NewReview, NewUser, ReviewStore, ReviewStoreError, ReviewTransaction};
#[cfg(test)]
pub use review_submission::MockReviewSubmissionService;
pub use review_submission::ReviewSubmissionService;
