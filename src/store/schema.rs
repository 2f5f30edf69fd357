//! # Database Schema
//!
//! One append-only `jobs` table holds every posting the tracker has ever
//! processed, recommended or not. `jobUrl` is the dedup key and gets a plain
//! (non-unique) index so existence checks stay cheap as the table grows.
//!
//! Every statement is guarded with `IF NOT EXISTS`, so initializing against
//! an existing database never touches prior rows.

use crate::store::error::DbError;
use libsql::{params, Connection};

/// Initialize the database schema
pub async fn initialize_schema(conn: &Connection) -> Result<(), DbError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS jobs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            jobUrl TEXT NOT NULL,
            position TEXT NOT NULL,
            company TEXT NOT NULL,
            content TEXT NOT NULL,
            created_at DATETIME NOT NULL,
            recommended BOOLEAN NOT NULL
        )",
        params![],
    )
    .await
    .map_err(|e| DbError::Schema(format!("Failed to create jobs table: {}", e)))?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_jobs_job_url ON jobs(jobUrl)",
        params![],
    )
    .await
    .map_err(|e| DbError::Schema(format!("Failed to create index on jobs: {}", e)))?;

    Ok(())
}
