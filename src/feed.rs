//! # Job Feed Module
//!
//! This module retrieves job postings: it queries a paginated search feed,
//! skips postings that are already known, and downloads the detail page of
//! every new posting to extract its description.
//!
//! ## Key Components
//!
//! - `JobFeed`: trait for a paginated source of raw postings
//! - `LinkedInFeed`: `JobFeed` backed by LinkedIn's public guest search
//! - `SearchQuery`: fixed search filters (keyword, location, recency, ...)
//! - `PostingFetcher`: turns a feed page into [`Posting`](crate::posting::Posting)s
//!
//! A failing detail page never fails the page: the posting is logged and
//! dropped, and the remaining postings are still returned.

mod error;
mod fetcher;
mod linkedin;
pub mod query;

use std::future::Future;

pub use error::FetchError;
pub use fetcher::{FetchedPage, PostingFetcher, DESCRIPTION_SELECTOR, DETAIL_TIMEOUT};
pub use linkedin::{parse_job_cards, LinkedInFeed, DEFAULT_BASE_URL};
pub use query::{DatePosted, JobType, SearchQuery, SortBy, PAGE_SIZE};

use crate::posting::RawPosting;

/// A paginated source of raw job postings
pub trait JobFeed {
    /// Fetch one 0-based page of results in feed order
    ///
    /// An empty page is a valid result.
    fn search(
        &self,
        query: &SearchQuery,
        page: u32,
    ) -> impl Future<Output = Result<Vec<RawPosting>, FetchError>> + Send;
}
