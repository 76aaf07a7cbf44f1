//! Per-test databases on an embedded cluster.
//!
//! Each test gets a freshly created database with the embedded migrations
//! applied and a small catalogue seeded, so tests never observe each other's
//! rows.

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::{Connection, RunQueryDsl};
use media_reviews::outbound::persistence::run_migrations;
use pg_embedded_setup_unpriv::TestCluster;
use uuid::Uuid;

/// Catalogue rows shared by the integration tests.
///
/// Media 7 ("Dune") is an old release by Frank P. Herbert; media 8
/// ("Arrival") was released after the recent-release cutoff.
const SEED_SQL: &str = r#"
INSERT INTO series (series_id, series_title) VALUES (1, 'Dune Chronicles');
INSERT INTO genres (genre_name) VALUES ('Sci-Fi'), ('Drama');
INSERT INTO media_types (media_type_id, name) VALUES (1, 'Book'), (2, 'Film');
INSERT INTO writers (writer_id, name_first, name_initial, name_last)
VALUES (1, 'Frank', 'P', 'Herbert'), (2, 'Ted', NULL, 'Chiang');
INSERT INTO media (media_id, media_title, genre_name, media_type_id, release_date, author, series_id)
VALUES
    (7, 'Dune', 'Sci-Fi', 1, DATE '1965-08-01', 1, 1),
    (8, 'Arrival', 'Sci-Fi', 2, DATE '2016-11-11', 2, NULL);
"#;

/// Database created for a single test.
pub struct TestDatabase {
    /// Connection URL for the database.
    pub url: String,
}

/// Create a uniquely named database, migrate it and seed the catalogue.
pub fn provision_database(cluster: &TestCluster) -> Result<TestDatabase, String> {
    let name = format!("reviews_{}", Uuid::new_v4().simple());
    let admin_url = cluster.connection().database_url("postgres");
    let mut admin = PgConnection::establish(&admin_url).map_err(|err| err.to_string())?;
    diesel::sql_query(format!("CREATE DATABASE {name}"))
        .execute(&mut admin)
        .map_err(|err| format!("create database {name}: {err}"))?;

    let url = cluster.connection().database_url(&name);
    run_migrations(&url).map_err(|err| err.to_string())?;

    let mut conn = PgConnection::establish(&url).map_err(|err| err.to_string())?;
    conn.batch_execute(SEED_SQL)
        .map_err(|err| format!("seed catalogue: {err}"))?;

    Ok(TestDatabase { url })
}

/// Run a statement that returns a single count.
pub fn count_rows(url: &str, table: &str) -> i64 {
    use diesel::QueryableByName;
    use diesel::sql_types::BigInt;

    #[derive(QueryableByName)]
    struct CountRow {
        #[diesel(sql_type = BigInt)]
        count: i64,
    }

    let mut conn = PgConnection::establish(url).expect("connect for count");
    diesel::sql_query(format!("SELECT COUNT(*) AS count FROM {table}"))
        .get_result::<CountRow>(&mut conn)
        .expect("count rows")
        .count
}
