//! # Posting Store
//!
//! Durable dedup record of every posting the tracker has processed, backed by
//! a local libsql database. The store is append-only: it answers whether a
//! URL is known and records newly classified postings, but never rewrites a
//! stored verdict.

mod database;
pub mod error;
mod schema;

use chrono::{DateTime, Utc};

pub use database::Database;
pub use error::DbError;

/// A posting as read back from the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPosting {
    /// Row ID
    pub id: i64,

    /// Normalized job URL
    pub url: String,

    /// Job title
    pub position: String,

    /// Hiring company
    pub company: String,

    /// Extracted description
    pub content: String,

    /// When the posting was first processed
    pub created_at: DateTime<Utc>,

    /// Classifier verdict
    pub recommended: bool,
}
