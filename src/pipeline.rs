//! # Pipeline Controller
//!
//! Drives one run: walks feed pages, classifies every new posting, records
//! each verdict and collects recommendations until either the batch is full
//! or the page ceiling is reached. A non-empty batch is mailed at the end.
//!
//! Failures are handled at the level they occur. A posting whose dedup
//! lookup, classification or insert fails is skipped, a page whose feed query
//! fails is skipped, and a failed delivery is reported in the summary. The
//! recommendations collected so far are always mailed.

use tracing::{error, info, instrument, warn};

use crate::classifier::Classifier;
use crate::config::Config;
use crate::error::Result;
use crate::feed::{FetchedPage, JobFeed, PostingFetcher};
use crate::model::CompletionModel;
use crate::notifier::Notifier;
use crate::posting::Posting;
use crate::store::Database;

/// What happened to the batch at the end of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NotificationOutcome {
    /// Nothing was recommended, so nothing was sent
    #[default]
    Skipped,
    /// A batch of this many postings was delivered
    Sent(usize),
    /// Delivery failed
    Failed(String),
}

/// Counters for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub pages_fetched: u32,
    pub postings_seen: usize,
    pub classified: usize,
    pub recommended: usize,
    pub classification_failures: usize,
    /// Postings skipped because a dedup lookup or insert failed
    pub storage_failures: usize,
    pub notified: NotificationOutcome,
}

/// One fetch, classify, persist and notify cycle
pub struct Pipeline<F, M, N> {
    fetcher: PostingFetcher<F>,
    classifier: Classifier<M>,
    store: Database,
    notifier: N,
    job_count_per_mail: usize,
    max_page_tries: u32,
}

impl<F, M, N> Pipeline<F, M, N>
where
    F: JobFeed,
    M: CompletionModel,
    N: Notifier,
{
    pub fn new(
        fetcher: PostingFetcher<F>,
        classifier: Classifier<M>,
        store: Database,
        notifier: N,
        config: &Config,
    ) -> Self {
        Self {
            fetcher,
            classifier,
            store,
            notifier,
            job_count_per_mail: config.job_count_per_mail,
            max_page_tries: config.max_page_tries,
        }
    }

    /// The posting store used for dedup
    pub fn store(&self) -> &Database {
        &self.store
    }

    /// Run the pipeline once
    #[instrument(skip(self), fields(target = self.job_count_per_mail, max_pages = self.max_page_tries))]
    pub async fn run(&self) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        let mut batch: Vec<Posting> = Vec::new();
        let mut page = 0;

        while batch.len() < self.job_count_per_mail && page < self.max_page_tries {
            let fetched = self.fetcher.fetch_page(page, &self.store).await;
            page += 1;
            summary.pages_fetched = page;

            let FetchedPage {
                postings,
                lookup_failures,
            } = match fetched {
                Ok(fetched) => fetched,
                Err(e) => {
                    warn!("Skipping page {}: {}", page - 1, e);
                    continue;
                }
            };
            summary.postings_seen += postings.len();
            summary.storage_failures += lookup_failures;

            for mut posting in postings {
                if batch.len() >= self.job_count_per_mail {
                    break;
                }

                let verdict = match self.classifier.classify(&posting).await {
                    Ok(verdict) => verdict,
                    Err(e) => {
                        warn!("Skipping {}: classification failed: {}", posting.url, e);
                        summary.classification_failures += 1;
                        continue;
                    }
                };
                summary.classified += 1;
                posting.recommended = Some(verdict);

                if let Err(e) = self.store.persist(&posting).await {
                    error!("Skipping {}: failed to record verdict: {}", posting.url, e);
                    summary.storage_failures += 1;
                    continue;
                }

                if verdict {
                    info!("Recommended: {} at {} ({})", posting.position, posting.company, posting.url);
                    batch.push(posting);
                }
            }
        }

        summary.recommended = batch.len();
        summary.notified = if batch.is_empty() {
            info!("No recommendations after {} pages", page);
            NotificationOutcome::Skipped
        } else {
            match self.notifier.notify(&batch).await {
                Ok(()) => NotificationOutcome::Sent(batch.len()),
                Err(e) => {
                    error!("Failed to deliver {} recommendations: {}", batch.len(), e);
                    NotificationOutcome::Failed(e.to_string())
                }
            }
        };

        Ok(summary)
    }
}
