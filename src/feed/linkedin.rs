//! LinkedIn guest job search
//!
//! The public guest endpoint answers with a fragment of `<li>` job cards,
//! which are parsed with CSS selectors into [`RawPosting`]s.

use std::time::Duration;

use reqwest::Client as ReqwestClient;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};
use url::Url;

use crate::feed::error::FetchError;
use crate::feed::query::SearchQuery;
use crate::feed::JobFeed;
use crate::posting::RawPosting;

/// Guest search endpoint that does not require a session
pub const DEFAULT_BASE_URL: &str =
    "https://www.linkedin.com/jobs-guest/jobs/api/seeMoreJobPostings/search";

/// Timeout for one search request in seconds
const SEARCH_TIMEOUT_SECS: u64 = 60;

/// Search feed backed by LinkedIn's guest job search
#[derive(Debug, Clone)]
pub struct LinkedInFeed {
    client: ReqwestClient,
    base_url: Url,
}

impl LinkedInFeed {
    /// Create a feed against the given endpoint
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, FetchError> {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(SEARCH_TIMEOUT_SECS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
        })
    }
}

impl JobFeed for LinkedInFeed {
    #[instrument(skip(self), level = "debug")]
    async fn search(&self, query: &SearchQuery, page: u32) -> Result<Vec<RawPosting>, FetchError> {
        debug!("Querying job feed page {}", page);
        let response = self
            .client
            .get(self.base_url.clone())
            .query(&query.params(page))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: response.url().to_string(),
                status: status.as_u16(),
            });
        }

        let html = response.text().await?;
        let mut postings = parse_job_cards(&html)?;
        postings.truncate(query.limit as usize);

        debug!("Feed page {} returned {} postings", page, postings.len());
        Ok(postings)
    }
}

/// CSS selectors of a job card
struct CardSelectors {
    card: Selector,
    link: Selector,
    title: Selector,
    company: Selector,
    location: Selector,
    date: Selector,
    salary: Selector,
    ago: Selector,
}

impl CardSelectors {
    fn new() -> Result<Self, FetchError> {
        let parse = |s: &str| {
            Selector::parse(s)
                .map_err(|e| FetchError::HtmlParse(format!("Failed to parse selector '{}': {}", s, e)))
        };

        Ok(Self {
            card: parse("li")?,
            link: parse(".base-card__full-link")?,
            title: parse(".base-search-card__title")?,
            company: parse(".base-search-card__subtitle")?,
            location: parse(".job-search-card__location")?,
            date: parse("time")?,
            salary: parse(".job-search-card__salary-info")?,
            ago: parse(".job-search-card__listdate")?,
        })
    }
}

fn first_text(card: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    card.select(selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}

fn first_attr(card: &ElementRef<'_>, selector: &Selector, attr: &str) -> Option<String> {
    card.select(selector)
        .next()
        .and_then(|element| element.value().attr(attr))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Parse the job cards of a search result fragment
///
/// Cards without a link or a title are skipped.
pub fn parse_job_cards(html: &str) -> Result<Vec<RawPosting>, FetchError> {
    let selectors = CardSelectors::new()?;
    let fragment = Html::parse_fragment(html);

    let postings = fragment
        .select(&selectors.card)
        .filter_map(|card| {
            let job_url = first_attr(&card, &selectors.link, "href")?;
            let position = first_text(&card, &selectors.title)?;

            Some(RawPosting {
                job_url,
                position,
                company: first_text(&card, &selectors.company).unwrap_or_default(),
                location: first_text(&card, &selectors.location).unwrap_or_default(),
                date: first_attr(&card, &selectors.date, "datetime"),
                salary: first_text(&card, &selectors.salary)
                    .map(|s| s.split_whitespace().collect::<Vec<_>>().join(" ")),
                ago_time: first_text(&card, &selectors.ago),
            })
        })
        .collect();

    Ok(postings)
}
