//! Media review backend library modules.
//!
//! The crate follows a hexagonal layout: [`domain`] holds types, the review
//! submission workflow and the ports it depends on; [`inbound`] adapts HTTP
//! requests onto those ports; [`outbound`] implements them with PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(test)]
pub(crate) mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
