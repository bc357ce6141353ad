//! Application bootstrap
//!
//! Loads configuration, installs logging and opens the database pool. Called
//! from `main` before any command runs.

use std::path::Path;

use tally::{logging, Config, Environment, FrameworkError, LogConfig, DB};

use crate::config::{self, AuthConfig};

pub async fn boot(project_root: &Path) -> Result<Environment, FrameworkError> {
    let environment = Config::init(project_root);
    config::register_all();

    logging::init(&Config::get::<LogConfig>().unwrap_or_default());
    tracing::info!(%environment, "booting");
    if Config::get::<AuthConfig>().unwrap_or_default().is_open() {
        tracing::warn!("AUTH_TOKEN is not set, protected routes accept any bearer token");
    }

    DB::init().await?;
    Ok(environment)
}
