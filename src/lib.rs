//! # Job Tracker
//!
//! Finds job postings worth applying to. A run pages through a job search
//! feed, scrapes the description of every posting it has not seen before,
//! asks a language model whether the posting satisfies a fixed rubric, records
//! the verdict and mails a digest of the matches.
//!
//! ## Modules
//!
//! - `feed`: search feed client and detail page retrieval
//! - `text`: plain text extraction from HTML
//! - `store`: libsql-backed dedup record of processed postings
//! - `gemini` / `model`: language model client and the completion seam
//! - `classifier`: rubric prompt and verdict parsing
//! - `notifier`: HTML digest mail over SMTP
//! - `pipeline`: the controller tying one run together
//!
//! ## Example
//!
//! ```rust,no_run
//! use job_tracker::classifier::Classifier;
//! use job_tracker::config::Config;
//! use job_tracker::feed::{LinkedInFeed, PostingFetcher};
//! use job_tracker::gemini::Client;
//! use job_tracker::model::GeminiCompletionModel;
//! use job_tracker::notifier::Mailer;
//! use job_tracker::pipeline::Pipeline;
//! use job_tracker::store::Database;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let store = Database::new_from_path(&config.database_path).await?;
//!
//!     let feed = LinkedInFeed::new(&config.feed_base_url, &config.user_agent)?;
//!     let fetcher = PostingFetcher::new(feed, &config)?;
//!     let model = GeminiCompletionModel::new(Client::with_api_key(&config.api_key)?, &config.model);
//!     let classifier = Classifier::new(model, &config);
//!     let mailer = Mailer::smtp(&config)?;
//!
//!     let summary = Pipeline::new(fetcher, classifier, store, mailer, &config).run().await?;
//!     println!("{:?}", summary);
//!     Ok(())
//! }
//! ```

mod error;

pub mod classifier;
pub mod config;
pub mod feed;
pub mod gemini;
pub mod model;
pub mod notifier;
pub mod pipeline;
pub mod posting;
pub mod store;
pub mod text;

#[cfg(test)]
mod test_support;

pub use error::{Error, Result};

/// Commonly used types
pub mod prelude {
    pub use crate::classifier::Classifier;
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::feed::{JobFeed, LinkedInFeed, PostingFetcher, SearchQuery};
    pub use crate::model::{CompletionModel, GeminiCompletionModel};
    pub use crate::notifier::{Mailer, Notifier};
    pub use crate::pipeline::{Pipeline, RunSummary};
    pub use crate::posting::{Posting, RawPosting};
    pub use crate::store::Database;
}
