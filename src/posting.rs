//! # Posting Module
//!
//! The record that flows through the pipeline. A `Posting` is built from a
//! feed entry plus the text of its detail page, classified once, persisted
//! once and, if recommended, mailed once.
//!
//! The normalized job URL is the identity of a posting: feeds decorate the
//! same listing with different tracking parameters on every request, so the
//! query string and fragment are dropped before the URL is used as the dedup
//! key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A raw entry as returned by a search feed, before detail retrieval
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPosting {
    /// Link to the detail page, possibly carrying tracking parameters
    pub job_url: String,

    /// Job title
    pub position: String,

    /// Hiring company
    pub company: String,

    /// Location as displayed by the feed
    pub location: String,

    /// Listing date, if the feed exposes one
    pub date: Option<String>,

    /// Salary line, if the feed exposes one
    pub salary: Option<String>,

    /// Relative listing age ("2 days ago")
    pub ago_time: Option<String>,
}

/// A job posting with its extracted description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    /// Normalized job URL, the dedup key
    pub url: String,

    /// Job title
    pub position: String,

    /// Hiring company
    pub company: String,

    /// Location as displayed by the feed
    pub location: String,

    /// Listing date from the feed
    pub posted_at: Option<String>,

    /// Plain text of the job description
    pub content: String,

    /// When this run first processed the posting
    pub observed_at: DateTime<Utc>,

    /// Classifier verdict, `None` until classified
    pub recommended: Option<bool>,
}

impl Posting {
    /// Build an unclassified posting from a feed entry and its description text
    pub fn from_raw(raw: RawPosting, content: String) -> Self {
        Self {
            url: normalize_url(&raw.job_url),
            position: raw.position,
            company: raw.company,
            location: raw.location,
            posted_at: raw.date,
            content,
            observed_at: Utc::now(),
            recommended: None,
        }
    }

    /// Whether the classifier marked this posting as a match
    pub fn is_recommended(&self) -> bool {
        self.recommended == Some(true)
    }
}

/// Canonicalize a job URL by dropping its query string and fragment
pub fn normalize_url(url: &str) -> String {
    url.split(['?', '#']).next().unwrap_or_default().to_string()
}
