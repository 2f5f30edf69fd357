//! Shared fixtures for unit tests

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tempfile::TempDir;

use crate::config::Config;
use crate::feed::{FetchError, JobFeed, SearchQuery};
use crate::notifier::{Notifier, NotifyError};
use crate::posting::{Posting, RawPosting};
use crate::store::{Database, DbError};

/// Feed serving canned pages and counting queries
#[derive(Clone, Default)]
pub struct StaticFeed {
    pages: Vec<Vec<RawPosting>>,
    failing_pages: Vec<u32>,
    calls: Arc<AtomicU32>,
}

impl StaticFeed {
    pub fn new(pages: Vec<Vec<RawPosting>>) -> Self {
        Self {
            pages,
            failing_pages: Vec::new(),
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Make queries for `page` fail with a server error
    pub fn failing_on(mut self, page: u32) -> Self {
        self.failing_pages.push(page);
        self
    }

    /// Number of page queries received
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl JobFeed for StaticFeed {
    async fn search(&self, _query: &SearchQuery, page: u32) -> Result<Vec<RawPosting>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_pages.contains(&page) {
            return Err(FetchError::Status {
                url: format!("feed page {}", page),
                status: 503,
            });
        }
        Ok(self.pages.get(page as usize).cloned().unwrap_or_default())
    }
}

/// Notifier that records every batch it is handed
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    batches: Arc<Mutex<Vec<Vec<Posting>>>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose deliveries fail after recording the batch
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn batches(&self) -> Vec<Vec<Posting>> {
        self.batches.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    async fn notify(&self, batch: &[Posting]) -> Result<(), NotifyError> {
        self.batches.lock().unwrap().push(batch.to_vec());
        if self.fail {
            return Err(NotifyError::Transport("connection refused".to_string()));
        }
        Ok(())
    }
}

/// A raw posting whose detail page lives under `base`
pub fn raw(base: &str, id: u32, title: &str) -> RawPosting {
    RawPosting {
        job_url: format!("{}/jobs/view/{}?refId=r{}&trackingId=t", base, id, id),
        position: title.to_string(),
        company: "Acme".to_string(),
        location: "Berlin".to_string(),
        ..Default::default()
    }
}

/// A detail page with the description container
pub fn detail_page(description: &str) -> String {
    format!(
        "<html><body><h1>Job</h1><div class=\"show-more-less-html__markup\">{}</div></body></html>",
        description
    )
}

/// Configuration without pacing delays
pub fn test_config() -> Config {
    Config::builder()
        .api_key("test-key")
        .pacing_delay(Duration::ZERO)
        .build()
}

/// A fresh database in a temporary directory
pub async fn setup_test_db() -> Result<(Database, TempDir), DbError> {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir
        .path()
        .join("test.db")
        .to_string_lossy()
        .to_string();

    let db = Database::new_from_path(&db_path).await?;

    Ok((db, temp_dir))
}

/// A second connection to the database created by `setup_test_db`
pub async fn side_connection(dir: &TempDir) -> libsql::Connection {
    let db = libsql::Builder::new_local(dir.path().join("test.db"))
        .build()
        .await
        .unwrap();
    db.connect().unwrap()
}
