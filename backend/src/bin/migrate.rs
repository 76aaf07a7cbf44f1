//! Apply the embedded database migrations.
//!
//! The database URL comes from `--database-url` or, failing that, from the
//! same `DB_*` settings the server reads (including a `.env` file).

use std::ffi::OsString;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use media_reviews::outbound::persistence::run_migrations;
use media_reviews::settings::DatabaseSettings;
use ortho_config::OrthoConfig;

/// `migrate` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "migrate",
    about = "Apply pending media review schema migrations",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to the `DB_*` settings when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn resolve_database_url(explicit: Option<String>) -> Result<String> {
    if let Some(url) = explicit.filter(|url| !url.trim().is_empty()) {
        return Ok(url);
    }
    let settings = DatabaseSettings::load_from_iter([OsString::from("migrate")])
        .map_err(|err| eyre!("failed to load database settings: {err}"))?;
    settings
        .database_url()
        .wrap_err("no database URL configured")
}

fn main() -> Result<()> {
    color_eyre::install()?;
    // A missing .env file is not an error; the environment may be complete.
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();

    let database_url = resolve_database_url(args.database_url)?;
    let applied = run_migrations(&database_url).wrap_err("migration run failed")?;

    if applied.is_empty() {
        println!("schema already up to date");
    }
    for version in applied {
        println!("applied {version}");
    }
    Ok(())
}
