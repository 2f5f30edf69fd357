//! Database operations for the posting store

use crate::posting::Posting;
use crate::store::error::DbError;
use crate::store::schema;
use crate::store::StoredPosting;
use chrono::{DateTime, Utc};
use libsql::{params, Connection, Row};
use tracing::{debug, instrument};

/// Durable record of every processed posting
#[derive(Clone)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Create a database manager over an open connection
    #[instrument(skip(conn))]
    pub async fn new(conn: Connection) -> Result<Self, DbError> {
        schema::initialize_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Open (or create) a local database file
    pub async fn new_from_path(path: &str) -> Result<Self, DbError> {
        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DbError::Connection(format!("Failed to open database: {}", e)))?;

        let conn = db
            .connect()
            .map_err(|e| DbError::Connection(format!("Failed to connect to database: {}", e)))?;

        Self::new(conn).await
    }

    /// Whether a posting with exactly this URL was already recorded
    #[instrument(skip(self), level = "debug")]
    pub async fn exists(&self, url: &str) -> Result<bool, DbError> {
        let mut rows = self
            .conn
            .query(
                "SELECT 1 FROM jobs WHERE jobUrl = ? LIMIT 1",
                params![url.to_string()],
            )
            .await
            .map_err(|e| DbError::Query(format!("Failed to look up posting: {}", e)))?;

        match rows.next().await {
            Ok(row) => Ok(row.is_some()),
            Err(e) => Err(DbError::Data(format!("Failed to read lookup result: {}", e))),
        }
    }

    /// Append a classified posting and return its row id
    ///
    /// Records are never updated, so a verdict stays as first persisted.
    #[instrument(skip(self, posting), fields(url = %posting.url), level = "debug")]
    pub async fn persist(&self, posting: &Posting) -> Result<i64, DbError> {
        let recommended = posting.recommended.ok_or_else(|| {
            DbError::Data(format!("Posting {} has not been classified", posting.url))
        })?;

        self.conn
            .execute(
                "INSERT INTO jobs (jobUrl, position, company, content, created_at, recommended)
                 VALUES (?, ?, ?, ?, ?, ?)",
                params![
                    posting.url.clone(),
                    posting.position.clone(),
                    posting.company.clone(),
                    posting.content.clone(),
                    posting.observed_at.to_rfc3339(),
                    i64::from(recommended),
                ],
            )
            .await
            .map_err(|e| DbError::Query(format!("Failed to persist posting: {}", e)))?;

        let mut rows = self
            .conn
            .query("SELECT last_insert_rowid()", params![])
            .await
            .map_err(|e| DbError::Query(format!("Failed to get last insert ID: {}", e)))?;

        let row = match rows.next().await {
            Ok(Some(row)) => row,
            Ok(None) => {
                return Err(DbError::Data(
                    "No ID returned from last_insert_rowid()".to_string(),
                ));
            }
            Err(e) => return Err(DbError::Data(format!("Failed to get ID: {}", e))),
        };

        let id = row
            .get(0)
            .map_err(|e| DbError::Data(format!("Failed to get ID: {}", e)))?;
        debug!("Persisted posting {} as row {}", posting.url, id);
        Ok(id)
    }

    /// Number of recorded postings
    pub async fn count(&self) -> Result<i64, DbError> {
        let mut rows = self
            .conn
            .query("SELECT COUNT(*) FROM jobs", params![])
            .await
            .map_err(|e| DbError::Query(format!("Failed to count postings: {}", e)))?;

        match rows.next().await {
            Ok(Some(row)) => row
                .get(0)
                .map_err(|e| DbError::Data(format!("Failed to read count: {}", e))),
            Ok(None) => Ok(0),
            Err(e) => Err(DbError::Data(format!("Failed to count postings: {}", e))),
        }
    }

    /// All records stored under a URL, oldest first
    pub async fn get_by_url(&self, url: &str) -> Result<Vec<StoredPosting>, DbError> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, jobUrl, position, company, content, created_at, recommended
                 FROM jobs
                 WHERE jobUrl = ?
                 ORDER BY id",
                params![url.to_string()],
            )
            .await
            .map_err(|e| DbError::Query(format!("Failed to get posting: {}", e)))?;

        let mut postings = Vec::new();
        while let Ok(Some(row)) = rows.next().await {
            postings.push(self.row_to_posting(&row)?);
        }

        Ok(postings)
    }

    fn row_to_posting(&self, row: &Row) -> Result<StoredPosting, DbError> {
        let created_at: String = row
            .get(5)
            .map_err(|e| DbError::Data(format!("Failed to get created_at: {}", e)))?;
        let created_at = DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| DbError::Data(format!("Invalid created_at '{}': {}", created_at, e)))?
            .with_timezone(&Utc);
        let recommended: i64 = row
            .get(6)
            .map_err(|e| DbError::Data(format!("Failed to get recommended: {}", e)))?;

        Ok(StoredPosting {
            id: row
                .get(0)
                .map_err(|e| DbError::Data(format!("Failed to get id: {}", e)))?,
            url: row
                .get(1)
                .map_err(|e| DbError::Data(format!("Failed to get jobUrl: {}", e)))?,
            position: row
                .get(2)
                .map_err(|e| DbError::Data(format!("Failed to get position: {}", e)))?,
            company: row
                .get(3)
                .map_err(|e| DbError::Data(format!("Failed to get company: {}", e)))?,
            content: row
                .get(4)
                .map_err(|e| DbError::Data(format!("Failed to get content: {}", e)))?,
            created_at,
            recommended: recommended != 0,
        })
    }
}
