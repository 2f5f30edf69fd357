//! # Job Tracker CLI
//!
//! Runs the tracker once: reads configuration from the environment, walks the
//! job feed, classifies new postings and mails the recommended ones. Intended
//! to be started by a scheduler; it takes no arguments.

mod telemetry;

use anyhow::Context;
use clap::Parser;
use job_tracker::classifier::Classifier;
use job_tracker::config::Config;
use job_tracker::feed::{LinkedInFeed, PostingFetcher};
use job_tracker::gemini::Client;
use job_tracker::model::GeminiCompletionModel;
use job_tracker::notifier::Mailer;
use job_tracker::pipeline::{NotificationOutcome, Pipeline};
use job_tracker::store::Database;
use tracing::{error, info};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Finds new job postings, asks an LLM which ones fit and mails the matches",
    long_about = None
)]
struct Cli {}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    Cli::parse();
    let _guard = telemetry::init_tracing_subscriber()?;

    if let Err(e) = run().await {
        error!("Run failed: {:#}", e);
        return Err(e);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        "Searching {} ({} per mail, up to {} pages)",
        config.search, config.job_count_per_mail, config.max_page_tries
    );

    let store = Database::new_from_path(&config.database_path)
        .await
        .with_context(|| format!("Failed to open database at {}", config.database_path))?;

    let feed = LinkedInFeed::new(&config.feed_base_url, &config.user_agent)?;
    let fetcher = PostingFetcher::new(feed, &config)?;

    let client = Client::with_api_key(config.api_key.clone())?;
    let model = GeminiCompletionModel::new(client, config.model.clone());
    let classifier = Classifier::new(model, &config);

    let mailer = Mailer::smtp(&config).context("Failed to set up mail delivery")?;

    let pipeline = Pipeline::new(fetcher, classifier, store, mailer, &config);
    let summary = pipeline.run().await?;

    info!(
        "Run finished: {} pages, {} new postings, {} classified, {} recommended, {} classification failures, {} storage failures",
        summary.pages_fetched,
        summary.postings_seen,
        summary.classified,
        summary.recommended,
        summary.classification_failures,
        summary.storage_failures
    );
    match summary.notified {
        NotificationOutcome::Sent(count) => info!("Mailed {} recommendations", count),
        NotificationOutcome::Skipped => info!("Nothing to mail"),
        NotificationOutcome::Failed(reason) => error!("Mail was not delivered: {}", reason),
    }

    Ok(())
}
