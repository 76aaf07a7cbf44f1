//! Backend entry-point: loads settings, prepares the database pool and serves
//! the query and review endpoints.

mod server;

use std::ffi::OsString;
use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use media_reviews::inbound::http::health::HealthState;
use media_reviews::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use media_reviews::settings::{DatabaseSettings, ServerSettings};

use server::{ServerConfig, create_server};

/// Settings are read from the environment only; the server takes no flags.
fn settings_args() -> [OsString; 1] {
    [OsString::from("media-reviews")]
}

async fn apply_migrations(database_url: String) -> io::Result<()> {
    let applied = web::block(move || run_migrations(&database_url))
        .await
        .map_err(|err| io::Error::other(format!("migration task failed: {err}")))?
        .map_err(io::Error::other)?;
    if applied.is_empty() {
        info!("database schema already up to date");
    }
    Ok(())
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    let dotenv = dotenvy::dotenv();

    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    match dotenv {
        Ok(path) => debug!(path = %path.display(), "loaded .env file"),
        Err(err) => debug!(error = %err, "no .env file loaded"),
    }

    let database = DatabaseSettings::load_from_iter(settings_args())
        .map_err(|err| io::Error::other(format!("load database settings: {err}")))?;
    let server_settings = ServerSettings::load_from_iter(settings_args())
        .map_err(|err| io::Error::other(format!("load server settings: {err}")))?;
    let database_url = database.database_url().map_err(io::Error::other)?;

    if database.run_migrations {
        apply_migrations(database_url.clone()).await?;
    }

    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(database.pool_max_size()))
        .await
        .map_err(|err| io::Error::other(format!("create database pool: {err}")))?;

    let bind_addr = server_settings.bind_addr();
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, ServerConfig::new(bind_addr, pool))?;
    info!(%bind_addr, "media reviews server listening");
    server.await
}
