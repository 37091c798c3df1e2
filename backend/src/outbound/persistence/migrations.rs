//! Embedded schema migrations, one set per record table.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::domain::ports::RecordStoreError;

const USERS: EmbeddedMigrations = embed_migrations!("migrations/users");
const PROJECTS: EmbeddedMigrations = embed_migrations!("migrations/projects");
const ASSIGNMENTS: EmbeddedMigrations = embed_migrations!("migrations/assignments");

/// Table owned by the service role being started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordTable {
    Users,
    Projects,
    Assignments,
}

impl RecordTable {
    fn migrations(self) -> EmbeddedMigrations {
        match self {
            Self::Users => USERS,
            Self::Projects => PROJECTS,
            Self::Assignments => ASSIGNMENTS,
        }
    }
}

/// Apply pending migrations for `table`.
///
/// Blocking: run it on a blocking thread, never on the async runtime.
///
/// # Errors
///
/// Returns a connection error when the database is unreachable and a query
/// error when a migration fails.
pub fn run_migrations(database_url: &str, table: RecordTable) -> Result<(), RecordStoreError> {
    let mut conn = PgConnection::establish(database_url)
        .map_err(|err| RecordStoreError::connection(err.to_string()))?;
    let applied = conn
        .run_pending_migrations(table.migrations())
        .map_err(|err| RecordStoreError::query(format!("migration: {err}")))?;
    info!(?table, applied = applied.len(), "applied pending migrations");
    Ok(())
}
