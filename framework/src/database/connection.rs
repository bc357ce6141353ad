//! Database connection management

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::database::config::DatabaseConfig;
use crate::error::FrameworkError;

/// Cheaply clonable handle to a SeaORM connection pool
///
/// Derefs to [`DatabaseConnection`], so it can be passed anywhere SeaORM
/// expects a `&impl ConnectionTrait`:
///
/// ```rust,ignore
/// let todos = todos::Entity::find().all(&*conn).await?;
/// ```
#[derive(Clone)]
pub struct DbConnection {
    inner: Arc<DatabaseConnection>,
}

impl DbConnection {
    /// Open a pool for `config`
    ///
    /// File-backed SQLite URLs get their parent directory created and are
    /// opened in create mode.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, FrameworkError> {
        let url = normalize_sqlite_url(&config.url);

        let mut opt = ConnectOptions::new(&url);
        opt.max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .sqlx_logging(config.logging);

        if config.is_in_memory() {
            // Every pooled connection would otherwise see its own empty database.
            opt.max_connections(1).min_connections(1);
        }

        let conn = Database::connect(opt).await.map_err(|e| {
            tracing::error!(error = %e, "database connection failed");
            FrameworkError::database(e.to_string())
        })?;

        tracing::debug!(
            backend = ?conn.get_database_backend(),
            max_connections = config.max_connections,
            "database pool ready"
        );

        Ok(Self {
            inner: Arc::new(conn),
        })
    }

    /// Wrap an already opened connection
    pub fn from_connection(conn: DatabaseConnection) -> Self {
        Self {
            inner: Arc::new(conn),
        }
    }

    pub fn inner(&self) -> &DatabaseConnection {
        &self.inner
    }
}

fn normalize_sqlite_url(url: &str) -> String {
    let Some(path) = url.strip_prefix("sqlite://") else {
        return url.to_string();
    };
    let path = path.trim_start_matches("./");
    if path.starts_with(":memory:") {
        return url.to_string();
    }

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!(path = %parent.display(), error = %e, "could not create sqlite directory");
            }
        }
    }

    format!("sqlite:{}?mode=rwc", path)
}

impl AsRef<DatabaseConnection> for DbConnection {
    fn as_ref(&self) -> &DatabaseConnection {
        &self.inner
    }
}

impl std::ops::Deref for DbConnection {
    type Target = DatabaseConnection;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
