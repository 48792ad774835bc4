//! PostgreSQL connection handle and schema management.
//!
//! `Database` is shared as `Arc<Database>` between the SQL repository and the
//! health check; the connection itself is never cloned.

use sea_orm::{ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr, Statement};
use sea_orm_migration::{MigrationStatus, MigratorTrait};

use crate::config::Config;

pub mod migrations;

pub use migrations::Migrator;

/// Owned SeaORM connection for the relational backend.
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Connect to `DATABASE_URL` and bring the schema up to date.
    pub async fn connect(config: &Config) -> Result<Self, DbErr> {
        let database = Self::connect_without_migrations(config).await?;

        database.run_migrations().await.map_err(|e| {
            tracing::error!("Failed to run migrations: {}", e);
            e
        })?;

        tracing::info!("Database connected and schema up to date");
        Ok(database)
    }

    /// Connect without touching the schema; the `migrate` command drives it.
    pub async fn connect_without_migrations(config: &Config) -> Result<Self, DbErr> {
        let connection = SeaDatabase::connect(config.database_url.as_str()).await?;
        Ok(Self::from_connection(connection))
    }

    /// Wrap an already open connection, such as a `MockDatabase` in tests.
    pub fn from_connection(connection: DatabaseConnection) -> Self {
        Self { connection }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    pub async fn run_migrations(&self) -> Result<(), DbErr> {
        Migrator::up(&self.connection, None).await
    }

    /// Revert the most recent migration only.
    pub async fn rollback_migration(&self) -> Result<(), DbErr> {
        Migrator::down(&self.connection, Some(1)).await
    }

    /// Every known migration paired with whether it has been applied.
    pub async fn migration_status(&self) -> Result<Vec<(String, bool)>, DbErr> {
        let migrations = Migrator::get_migration_with_status(&self.connection).await?;

        Ok(migrations
            .iter()
            .map(|m| {
                (
                    m.name().to_string(),
                    matches!(m.status(), MigrationStatus::Applied),
                )
            })
            .collect())
    }

    /// Drop every table and re-apply all migrations.
    pub async fn fresh_migrations(&self) -> Result<(), DbErr> {
        Migrator::fresh(&self.connection).await
    }

    /// Round-trip a trivial statement; used by `/health`.
    pub async fn ping(&self) -> Result<(), DbErr> {
        let backend = self.connection.get_database_backend();
        self.connection
            .execute(Statement::from_string(backend, "SELECT 1"))
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_ping_shares_one_connection() {
        let connection = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .into_connection();
        let database = Arc::new(Database::from_connection(connection));
        let shared = database.clone();

        database.ping().await.unwrap();
        shared.ping().await.unwrap();
        assert_eq!(
            shared.connection().get_database_backend(),
            DatabaseBackend::Postgres
        );
    }

    #[tokio::test]
    async fn test_ping_reports_failure() {
        let connection = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_errors([DbErr::Custom("connection refused".to_string())])
            .into_connection();

        let err = Database::from_connection(connection).ping().await.unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }
}
