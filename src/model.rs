//! # Completion Model Module
//!
//! The seam between the classifier and a language model provider. A
//! `CompletionModel` takes one prompt and returns the model's raw text; it
//! keeps no conversation state and does not stream.
//!
//! ## Key Components
//!
//! - `CompletionModel`: single-shot prompt → text trait
//! - `GeminiCompletionModel`: implementation over the Gemini REST client
//! - `MockCompletionModel` (tests only): scripted responses and failures

use std::future::Future;

use thiserror::Error;
use tracing::{info_span, Instrument};

use crate::error::Error as CrateError;
use crate::gemini::types::Content;
use crate::gemini::Client;

#[cfg(test)]
pub mod mock_model;

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Error type for completion calls
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The provider request failed
    #[error("Provider error: {0}")]
    Provider(#[from] CrateError),

    /// The provider refused to answer the prompt
    #[error("Prompt blocked: {0}")]
    Blocked(String),
}

impl From<CompletionError> for CrateError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::Provider(e) => e,
            CompletionError::Blocked(_) => CrateError::Classify(err.to_string()),
        }
    }
}

/// A single-shot text completion endpoint
pub trait CompletionModel {
    /// Send one prompt and return the model's text response
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String, CompletionError>> + Send;
}

/// Completion model backed by the Gemini API
#[derive(Debug, Clone)]
pub struct GeminiCompletionModel {
    client: Client,
    model: String,
}

impl GeminiCompletionModel {
    pub fn new(client: Client, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Name of the model being called
    pub fn model(&self) -> &str {
        &self.model
    }
}

impl CompletionModel for GeminiCompletionModel {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let content = Content::new().with_role("user").with_text(prompt);
        let response = self
            .client
            .models()
            .generate_content(&self.model, vec![content])
            .instrument(info_span!("completion", model = %self.model))
            .await?;

        if let Some(reason) = response.block_reason() {
            return Err(CompletionError::Blocked(reason.to_string()));
        }

        Ok(response.text())
    }
}
