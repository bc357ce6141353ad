//! Isolated databases for tests

use sea_orm_migration::MigratorTrait;

use crate::database::{DatabaseConfig, DbConnection};
use crate::error::FrameworkError;

/// A private in-memory SQLite database with migrations applied
///
/// Each instance owns its own database, so tests can run in parallel without
/// sharing rows.
///
/// ```rust,ignore
/// let db = TestDatabase::fresh::<Migrator>().await?;
/// users::ActiveModel { .. }.insert(db.conn()).await?;
/// ```
pub struct TestDatabase {
    conn: DbConnection,
}

impl TestDatabase {
    pub async fn fresh<M: MigratorTrait>() -> Result<Self, FrameworkError> {
        let config = DatabaseConfig::builder()
            .url("sqlite::memory:")
            .max_connections(1)
            .min_connections(1)
            .build();
        let conn = DbConnection::connect(&config).await?;
        M::up(conn.inner(), None).await?;
        Ok(Self { conn })
    }

    /// Borrow the underlying SeaORM connection
    pub fn conn(&self) -> &sea_orm::DatabaseConnection {
        self.conn.inner()
    }

    /// Clone the pool handle, e.g. to hand to a service under test
    pub fn handle(&self) -> DbConnection {
        self.conn.clone()
    }
}
