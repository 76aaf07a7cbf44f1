//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the review store and catalogue query ports
//! backed by PostgreSQL through `diesel-async` and a `bb8` connection pool.
//!
//! - **Thin adapters**: implementations only translate between Diesel rows
//!   and domain types. No business logic resides here.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Typed errors**: Diesel and pool errors are mapped to port errors.
//!
//! # Example
//!
//! ```no_run
//! use media_reviews::outbound::persistence::{
//!     DbPool, DieselCatalogueQuery, DieselReviewStore, PoolConfig,
//! };
//!
//! # async fn wire() -> Result<(), media_reviews::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/reviews")).await?;
//! let store = DieselReviewStore::new(pool.clone());
//! let catalogue = DieselCatalogueQuery::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_catalogue_query;
mod diesel_error_mapping;
mod diesel_review_store;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_catalogue_query::DieselCatalogueQuery;
pub use diesel_review_store::DieselReviewStore;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{
    DEFAULT_CONNECTION_TIMEOUT, DEFAULT_POOL_MAX_SIZE, DbPool, OwnedConnection, PoolConfig,
    PoolError,
};
