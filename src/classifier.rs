//! # Posting Classifier
//!
//! Asks a language model whether a posting satisfies the rubric. The model is
//! told to answer with a bare `true` or `false`; only a response that is
//! exactly `true` after trimming counts as a match. Anything else, including
//! `True`, an empty answer or an explanation, is a rejection.

use std::time::Duration;

use tracing::{debug, instrument};

use crate::config::Config;
use crate::model::{CompletionError, CompletionModel};
use crate::posting::Posting;

/// Rubric used when none is configured
pub const DEFAULT_RUBRIC: &str = "Please analyze the following job post and return only 'true' or 'false' \
based on whether ALL of the following conditions are met:\n\n\
1. The position is based in Germany.\n\
2. PHP or any of its frameworks (e.g., Laravel, Symfony) is a primary requirement.\n\
3. The job post is mandatory written in English.\n\
4. Remote work is available.\n\
5. The role targets mid-senior to senior-level candidates.";

/// Classifies postings against a fixed rubric
#[derive(Debug, Clone)]
pub struct Classifier<M> {
    model: M,
    rubric: String,
    pacing_delay: Duration,
}

impl<M: CompletionModel> Classifier<M> {
    /// Create a classifier with the rubric and pacing configured in `config`
    pub fn new(model: M, config: &Config) -> Self {
        Self {
            model,
            rubric: config.rubric.clone(),
            pacing_delay: config.pacing_delay,
        }
    }

    /// Build the prompt sent for a posting
    pub fn prompt(&self, posting: &Posting) -> String {
        format!(
            "{}\n\nHere is the job post:\n\n---\n\n{}\n\n---",
            self.rubric, posting.content
        )
    }

    /// Decide whether a posting is a match
    ///
    /// Errors from the model are returned to the caller.
    #[instrument(skip(self, posting), fields(url = %posting.url))]
    pub async fn classify(&self, posting: &Posting) -> Result<bool, CompletionError> {
        tokio::time::sleep(self.pacing_delay).await;

        let response = self.model.complete(&self.prompt(posting)).await?;
        let verdict = parse_verdict(&response);
        debug!("Model answered {:?}, verdict {}", response.trim(), verdict);

        Ok(verdict)
    }
}

/// Interpret a model response as a verdict
pub fn parse_verdict(response: &str) -> bool {
    response.trim() == "true"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::mock_model::MockCompletionModel;
    use crate::posting::RawPosting;
    use crate::test_support::test_config;

    fn posting(content: &str) -> Posting {
        let raw = RawPosting {
            job_url: "https://x/jobs/view/1".to_string(),
            position: "PHP Developer".to_string(),
            ..Default::default()
        };
        Posting::from_raw(raw, content.to_string())
    }

    #[test]
    fn test_parse_verdict_is_strict() {
        assert!(parse_verdict("true"));
        assert!(parse_verdict("  true\n"));
        assert!(!parse_verdict(" True "));
        assert!(!parse_verdict("TRUE"));
        assert!(!parse_verdict("false"));
        assert!(!parse_verdict(""));
        assert!(!parse_verdict("   "));
        assert!(!parse_verdict("true, because the role is remote"));
    }

    #[test]
    fn test_default_rubric_names_five_conditions() {
        for n in 1..=5 {
            assert!(DEFAULT_RUBRIC.contains(&format!("{}. ", n)));
        }
        assert!(DEFAULT_RUBRIC.contains("Germany"));
        assert!(DEFAULT_RUBRIC.contains("PHP"));
        assert!(DEFAULT_RUBRIC.contains("English"));
        assert!(DEFAULT_RUBRIC.contains("Remote"));
        assert!(DEFAULT_RUBRIC.contains("senior"));
    }

    #[tokio::test]
    async fn test_prompt_combines_rubric_and_content() {
        let model = MockCompletionModel::new();
        model.set_text_response("true").await;
        let classifier = Classifier::new(model.clone(), &test_config());

        assert!(classifier.classify(&posting("Laravel, remote")).await.unwrap());

        let prompts = model.prompts().await;
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].starts_with(DEFAULT_RUBRIC));
        assert!(prompts[0].ends_with("Here is the job post:\n\n---\n\nLaravel, remote\n\n---"));
    }

    #[tokio::test]
    async fn test_non_token_answers_are_rejections() {
        let model = MockCompletionModel::new();
        model.respond_when("case", " True ").await;
        model.respond_when("empty", "").await;
        let classifier = Classifier::new(model, &test_config());

        assert!(!classifier.classify(&posting("case variant")).await.unwrap());
        assert!(!classifier.classify(&posting("empty answer")).await.unwrap());
    }

    #[tokio::test]
    async fn test_model_errors_propagate() {
        let model = MockCompletionModel::new();
        model.fail_when("boom", "network down").await;
        let classifier = Classifier::new(model, &test_config());

        let result = classifier.classify(&posting("boom")).await;
        assert!(matches!(result, Err(CompletionError::Provider(_))));
    }
}
