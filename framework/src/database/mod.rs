//! Database access built on SeaORM
//!
//! ```rust,ignore
//! use tally::{Config, DatabaseConfig, DB};
//!
//! Config::register(DatabaseConfig::from_env());
//! DB::init().await?;
//!
//! let conn = DB::connection()?;
//! let todos = todos::Entity::find().all(conn.inner()).await?;
//! ```

pub mod config;
pub mod connection;
pub mod testing;

pub use config::{DatabaseConfig, DatabaseConfigBuilder, DatabaseType};
pub use connection::DbConnection;

use std::sync::OnceLock;

use crate::config::Config;
use crate::error::FrameworkError;

/// Pool opened by `DB::init`, shared by every request
static CONNECTION: OnceLock<DbConnection> = OnceLock::new();

/// Database facade
///
/// Holds the process-wide pool. Code that should be testable against its own
/// database takes a [`DbConnection`] argument instead of calling
/// `DB::connection()` itself.
pub struct DB;

impl DB {
    /// Connect using the registered `DatabaseConfig`
    pub async fn init() -> Result<(), FrameworkError> {
        let config = Config::get::<DatabaseConfig>().ok_or_else(|| {
            FrameworkError::internal(
                "DatabaseConfig not registered. Call Config::register(DatabaseConfig::from_env()) first.",
            )
        })?;
        Self::init_with(config).await
    }

    /// Connect with an explicit config
    ///
    /// A second initialization keeps the first pool.
    pub async fn init_with(config: DatabaseConfig) -> Result<(), FrameworkError> {
        let connection = DbConnection::connect(&config).await?;
        if CONNECTION.set(connection).is_err() {
            tracing::warn!("DB::init called twice; keeping the existing pool");
        }
        Ok(())
    }

    /// Clone the shared pool handle
    pub fn connection() -> Result<DbConnection, FrameworkError> {
        CONNECTION
            .get()
            .cloned()
            .ok_or_else(|| FrameworkError::internal("Database not initialized. Call DB::init() first."))
    }

    pub fn is_connected() -> bool {
        CONNECTION.get().is_some()
    }
}

pub use sea_orm;
