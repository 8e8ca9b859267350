// file: src/bedrock/embeddings.rs
// description: Amazon Titan embedding client over the Bedrock runtime InvokeModel API
// reference: https://docs.rs/aws-sdk-bedrockruntime

use crate::error::{Result, SearchError};
use aws_config::SdkConfig;
use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_smithy_types::error::display::DisplayErrorContext;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TitanEmbeddingRequest {
    input_text: String,

    // Titan v2 models only; v1 rejects unknown fields, so omit when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TitanEmbeddingResponse {
    #[serde(default)]
    embedding: Vec<f32>,

    #[serde(default)]
    input_text_token_count: Option<u32>,
}

#[derive(Clone)]
pub struct TitanEmbeddingClient {
    client: Client,
    model_id: String,
    dimensions: Option<usize>,
    max_concurrency: usize,
}

impl TitanEmbeddingClient {
    pub fn new(
        sdk_config: &SdkConfig,
        model_id: String,
        dimensions: Option<usize>,
        max_concurrency: usize,
    ) -> Self {
        Self {
            client: Client::new(sdk_config),
            model_id,
            dimensions,
            max_concurrency: max_concurrency.max(1),
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Embed a single text via InvokeModel
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = TitanEmbeddingRequest {
            input_text: text.to_string(),
            dimensions: self.dimensions,
        };
        let body = serde_json::to_vec(&request)?;

        debug!(
            "Requesting embedding from {} for {} chars",
            self.model_id,
            text.len()
        );

        let response = self
            .client
            .invoke_model()
            .model_id(&self.model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| {
                SearchError::Embedding(format!(
                    "InvokeModel failed for {}: {}",
                    self.model_id,
                    DisplayErrorContext(&e)
                ))
            })?;

        let parsed: TitanEmbeddingResponse = serde_json::from_slice(response.body().as_ref())
            .map_err(|e| {
                SearchError::Embedding(format!("Failed to parse embedding response: {}", e))
            })?;

        if parsed.embedding.is_empty() {
            return Err(SearchError::Embedding(
                "No embedding data returned from Bedrock".to_string(),
            ));
        }

        if let Some(tokens) = parsed.input_text_token_count {
            debug!(
                "Received embedding of dimension {} ({} input tokens)",
                parsed.embedding.len(),
                tokens
            );
        }

        Ok(parsed.embedding)
    }

    /// Embed a batch of texts with bounded concurrency.
    ///
    /// Output order matches input order; `buffered` (not `buffer_unordered`)
    /// keeps the index positions aligned with submission order.
    pub async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let results: Vec<Result<Vec<f32>>> = stream::iter(texts.iter().map(|t| self.embed(t)))
            .buffered(self.max_concurrency)
            .collect()
            .await;

        results.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_serializes_to_titan_shape() {
        let request = TitanEmbeddingRequest {
            input_text: "serverless computing options".to_string(),
            dimensions: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "inputText": "serverless computing options" })
        );
    }

    #[test]
    fn test_request_includes_dimensions_for_v2() {
        let request = TitanEmbeddingRequest {
            input_text: "query".to_string(),
            dimensions: Some(512),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["dimensions"], 512);
    }

    #[test]
    fn test_response_parses_embedding_and_tokens() {
        let body = r#"{"embedding": [0.25, -0.5, 1.0], "inputTextTokenCount": 4}"#;
        let parsed: TitanEmbeddingResponse = serde_json::from_str(body).unwrap();

        assert_eq!(parsed.embedding, vec![0.25, -0.5, 1.0]);
        assert_eq!(parsed.input_text_token_count, Some(4));
    }

    #[test]
    fn test_response_tolerates_missing_token_count() {
        let body = r#"{"embedding": [0.1]}"#;
        let parsed: TitanEmbeddingResponse = serde_json::from_str(body).unwrap();

        assert_eq!(parsed.embedding.len(), 1);
        assert_eq!(parsed.input_text_token_count, None);
    }

    #[test]
    fn test_response_with_no_embedding_is_empty() {
        let body = r#"{"inputTextTokenCount": 2}"#;
        let parsed: TitanEmbeddingResponse = serde_json::from_str(body).unwrap();

        assert!(parsed.embedding.is_empty());
    }
}
