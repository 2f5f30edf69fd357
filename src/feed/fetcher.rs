//! Page retrieval with per-item detail scraping

use std::collections::HashSet;
use std::time::Duration;

use reqwest::Client as ReqwestClient;
use tracing::{debug, info, instrument, warn};

use crate::config::Config;
use crate::feed::error::FetchError;
use crate::feed::query::SearchQuery;
use crate::feed::JobFeed;
use crate::posting::{normalize_url, Posting, RawPosting};
use crate::store::Database;
use crate::text::extract_container_text;

/// Container holding the expanded job description on a detail page
pub const DESCRIPTION_SELECTOR: &str = ".show-more-less-html__markup";

/// Upper bound for one detail page request
pub const DETAIL_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// New postings of one feed page
#[derive(Debug, Clone, Default)]
pub struct FetchedPage {
    /// Postings with their description, in feed order
    pub postings: Vec<Posting>,

    /// Postings skipped because the dedup lookup failed
    pub lookup_failures: usize,
}

/// Fetches feed pages and the description of every new posting on them
#[derive(Debug, Clone)]
pub struct PostingFetcher<F> {
    feed: F,
    query: SearchQuery,
    client: ReqwestClient,
    pacing_delay: Duration,
}

impl<F: JobFeed> PostingFetcher<F> {
    /// Create a fetcher for the search configured in `config`
    pub fn new(feed: F, config: &Config) -> Result<Self, FetchError> {
        let client = ReqwestClient::builder()
            .timeout(DETAIL_TIMEOUT)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            feed,
            query: config.search.clone(),
            client,
            pacing_delay: config.pacing_delay,
        })
    }

    /// Fetch one page of new postings
    ///
    /// Postings already in `store`, or already seen earlier on this page, are
    /// skipped before their detail page is requested. A posting whose dedup
    /// lookup fails or whose detail page cannot be retrieved is dropped. Only a
    /// failing feed query fails the page.
    #[instrument(skip(self, store))]
    pub async fn fetch_page(&self, page: u32, store: &Database) -> Result<FetchedPage, FetchError> {
        let raw_postings = self.feed.search(&self.query, page).await?;
        info!("Page {} listed {} postings", page, raw_postings.len());

        let mut seen = HashSet::new();
        let mut fetched = FetchedPage {
            postings: Vec::with_capacity(raw_postings.len()),
            lookup_failures: 0,
        };

        for raw in raw_postings {
            let url = normalize_url(&raw.job_url);
            if !seen.insert(url.clone()) {
                debug!("Skipping duplicate on page: {}", url);
                continue;
            }
            match store.exists(&url).await {
                Ok(true) => {
                    debug!("Skipping known posting: {}", url);
                    continue;
                }
                Ok(false) => {}
                Err(e) => {
                    warn!("Dropping posting {}: dedup lookup failed: {}", url, e);
                    fetched.lookup_failures += 1;
                    continue;
                }
            }

            match self.fetch_posting(raw).await {
                Ok(posting) => fetched.postings.push(posting),
                Err(e) => warn!("Dropping posting {}: {}", url, e),
            }
        }

        Ok(fetched)
    }

    /// Download a posting's detail page and extract its description
    #[instrument(skip(self, raw), fields(url = %raw.job_url))]
    pub async fn fetch_posting(&self, raw: RawPosting) -> Result<Posting, FetchError> {
        tokio::time::sleep(self.pacing_delay).await;

        let url = normalize_url(&raw.job_url);
        debug!("Fetching detail page {}", url);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let html = response.text().await?;
        let content = extract_container_text(&html, DESCRIPTION_SELECTOR)?;
        if content.is_empty() {
            debug!("No description container on {}", url);
        }

        Ok(Posting::from_raw(raw, content))
    }
}
