//! Shared helpers for the embedded PostgreSQL integration suite.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so the
//! cluster bootstrap and database provisioning live here rather than in the
//! library.

pub mod cluster_skip;
pub mod database;
pub mod pg_embed;

pub use cluster_skip::{handle_cluster_setup_failure, pg_embedded_enabled};
pub use database::{TestDatabase, count_rows, provision_database};
pub use pg_embed::test_cluster;
