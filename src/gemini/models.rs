//! Models service for the Gemini API

use crate::error::Result;
use crate::gemini::http::HttpClient;
use crate::gemini::types::{Content, GenerateContentResponse};
use serde::Serialize;
use tracing::{debug, instrument};

/// Request for generating content
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    /// The contents to generate from
    contents: Vec<Content>,
}

/// Service for interacting with Gemini models
#[derive(Debug, Clone)]
pub struct ModelsService {
    http_client: HttpClient,
}

impl ModelsService {
    pub(crate) fn new(http_client: HttpClient) -> Self {
        Self { http_client }
    }

    /// Generate content from a model
    #[instrument(skip(self, contents), level = "debug")]
    pub async fn generate_content(
        &self,
        model: &str,
        contents: Vec<Content>,
    ) -> Result<GenerateContentResponse> {
        let request = GenerateContentRequest { contents };
        let path = format!("models/{}:generateContent", model);

        debug!("Generating content from model {}", model);
        self.http_client.post(&path, &request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::types::HttpOptions;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_generate_content() {
        let mut server = Server::new_async().await;
        let mock_server = server
            .mock("POST", "/v1beta/models/gemini-2.0-flash:generateContent")
            .match_query(Matcher::Any)
            .match_body(Matcher::PartialJson(serde_json::json!({
                "contents": [{"parts": [{"text": "Hello, world!"}]}]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                "candidates": [{
                    "content": {
                        "parts": [{
                            "text": "Generated text"
                        }]
                    }
                }]
            }"#,
            )
            .create_async()
            .await;

        let options = HttpOptions {
            base_url: server.url(),
            ..HttpOptions::default()
        };
        let http_client = HttpClient::with_api_key_and_options("test-key".to_string(), options).unwrap();
        let models_service = ModelsService::new(http_client);

        let content = Content::new().with_text("Hello, world!");
        let response = models_service
            .generate_content("gemini-2.0-flash", vec![content])
            .await
            .unwrap();

        assert_eq!(response.text(), "Generated text");
        mock_server.assert_async().await;
    }

    #[tokio::test]
    async fn test_request_carries_only_contents() {
        let mut server = Server::new_async().await;
        let mock_server = server
            .mock("POST", "/v1beta/models/gemini-2.0-flash:generateContent")
            .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
            .match_body(Matcher::Json(serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "Hi"}]}]
            })))
            .with_status(200)
            .with_body(r#"{"candidates": []}"#)
            .create_async()
            .await;

        let options = HttpOptions {
            base_url: server.url(),
            ..HttpOptions::default()
        };
        let http_client = HttpClient::with_api_key_and_options("test-key".to_string(), options).unwrap();
        let response = ModelsService::new(http_client)
            .generate_content("gemini-2.0-flash", vec![Content::new().with_role("user").with_text("Hi")])
            .await
            .unwrap();

        assert_eq!(response.text(), "");
        mock_server.assert_async().await;
    }
}
