//! # Mock Completion Model for Testing
//!
//! Provides a `MockCompletionModel` that implements the `CompletionModel`
//! trait for use in tests. Responses can be scripted per prompt: the first
//! rule whose needle occurs in the prompt decides the answer, otherwise the
//! default response is returned.

use std::sync::Arc;
use tokio::sync::Mutex;

use super::{CompletionError, CompletionModel};
use crate::error::Error as CrateError;

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Fail(String),
}

#[derive(Debug, Default)]
struct State {
    default: Option<String>,
    rules: Vec<(String, Reply)>,
    prompts: Vec<String>,
}

/// A mock completion model for testing purposes.
#[derive(Debug, Clone, Default)]
pub struct MockCompletionModel {
    state: Arc<Mutex<State>>,
}

impl MockCompletionModel {
    /// Creates a new mock model that answers every prompt with an empty string.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the response returned when no rule matches.
    pub async fn set_text_response(&self, text: &str) {
        self.state.lock().await.default = Some(text.to_string());
    }

    /// Answers `text` to prompts containing `needle`.
    pub async fn respond_when(&self, needle: &str, text: &str) {
        self.state
            .lock()
            .await
            .rules
            .push((needle.to_string(), Reply::Text(text.to_string())));
    }

    /// Fails prompts containing `needle`.
    pub async fn fail_when(&self, needle: &str, message: &str) {
        self.state
            .lock()
            .await
            .rules
            .push((needle.to_string(), Reply::Fail(message.to_string())));
    }

    /// Every prompt received so far.
    pub async fn prompts(&self) -> Vec<String> {
        self.state.lock().await.prompts.clone()
    }
}

impl CompletionModel for MockCompletionModel {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let mut state = self.state.lock().await;
        state.prompts.push(prompt.to_string());

        let reply = state
            .rules
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, reply)| reply.clone());

        match reply {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Fail(message)) => Err(CompletionError::Provider(CrateError::Other(message))),
            None => Ok(state.default.clone().unwrap_or_default()),
        }
    }
}
