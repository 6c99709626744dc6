use reqwest::Client;
use serde_json::Value;

use crate::{Summarizer, SummaryResponse};

/// Client for the Hugging Face hosted inference API
#[derive(Debug, Clone)]
pub struct HuggingFaceClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Debug, thiserror::Error)]
pub enum HuggingFaceError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HuggingFace API error: {message}")]
    Api { status: u16, message: String },
}

impl HuggingFaceClient {
    pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co/models";

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: Self::DEFAULT_BASE_URL.into(),
            model: <Self as Summarizer>::SUMMARIZER_MODEL.into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Posts `{ "inputs": .. }` to the model endpoint and returns the raw JSON body
    #[tracing::instrument(skip(self, inputs), fields(model = %self.model, input_len = inputs.len()))]
    pub async fn send_inference_request(&self, inputs: &str) -> Result<Value, HuggingFaceError> {
        let body = serde_json::json!({ "inputs": inputs });

        let resp = self
            .client
            .post(format!("{}/{}", self.base_url, self.model))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp
                .text()
                .await
                .inspect_err(|e| tracing::error!(error = %e, status, "Failed to read error response body"))
                .unwrap_or_default();
            return Err(HuggingFaceError::Api { status, message });
        }

        Ok(resp.json::<Value>().await?)
    }
}

/// Picks the first candidate's `summary_text`, falling back to its
/// `generated_text`. Anything else yields an empty summary.
pub fn extract_summary(response: &Value) -> String {
    let Some(candidate) = response.get(0) else {
        return String::new();
    };

    ["summary_text", "generated_text"]
        .iter()
        .filter_map(|field| candidate.get(field).and_then(Value::as_str))
        .find(|text| !text.is_empty())
        .unwrap_or_default()
        .to_string()
}

impl Summarizer for HuggingFaceClient {
    const SUMMARIZER_MODEL: &'static str = "philschmid/bart-large-cnn-samsum";
    type Error = HuggingFaceError;

    async fn summarize(&self, content: &str) -> Result<SummaryResponse, Self::Error> {
        let response = self
            .send_inference_request(content)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to summarize content"))?;

        let summary = extract_summary(&response);
        if summary.is_empty() {
            tracing::warn!(model = %self.model, "Model returned no summary for chunk");
        }

        Ok(SummaryResponse { summary })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::{header::AUTHORIZATION, HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    const TOKEN: &str = "hf_test";

    /// Echoes `inputs` back as `generated_text` for callers presenting `TOKEN`
    async fn echo_inputs(
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        let authorized = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            == Some("Bearer hf_test");
        if !authorized {
            return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Invalid token" })));
        }

        let inputs = body["inputs"].as_str().unwrap_or_default();
        (
            StatusCode::OK,
            Json(json!([{ "generated_text": format!("echo {inputs}") }])),
        )
    }

    /// Serves `/echo` and a `/loading` model that always answers 503
    async fn spawn_inference_api() -> String {
        let app = Router::new().route("/echo", post(echo_inputs)).route(
            "/loading",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "Model is currently loading") }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_summarize_posts_inputs_with_bearer_token() {
        let base_url = spawn_inference_api().await;
        let client = HuggingFaceClient::new(TOKEN)
            .with_base_url(&base_url)
            .with_model("echo");

        let response = client.summarize("Budget approved.").await.unwrap();
        assert_eq!(response.summary, "echo Budget approved.");
    }

    #[tokio::test]
    async fn test_wrong_token_is_a_hard_failure() {
        let base_url = spawn_inference_api().await;
        let client = HuggingFaceClient::new("hf_other")
            .with_base_url(&base_url)
            .with_model("echo");

        let err = client.summarize("Budget approved.").await.unwrap_err();
        assert!(matches!(err, HuggingFaceError::Api { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_non_success_status_carries_response_body() {
        let base_url = spawn_inference_api().await;
        let client = HuggingFaceClient::new(TOKEN)
            .with_base_url(&base_url)
            .with_model("loading");

        let err = client.summarize("Budget approved.").await.unwrap_err();
        assert!(matches!(err, HuggingFaceError::Api { status: 503, .. }));
        assert_eq!(
            err.to_string(),
            "HuggingFace API error: Model is currently loading"
        );
    }

    #[tokio::test]
    async fn test_unreadable_error_body_still_fails_with_status() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            // drain the request, then promise more body than is sent and hang up
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.ends_with(b"}") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket
                .write_all(b"HTTP/1.1 503 Service Unavailable\r\ncontent-length: 100\r\n\r\ntrunc")
                .await
                .unwrap();
            socket.shutdown().await.unwrap();
        });

        let client = HuggingFaceClient::new(TOKEN)
            .with_base_url(format!("http://{addr}"))
            .with_model("broken");

        let err = client.summarize("Budget approved.").await.unwrap_err();
        match err {
            HuggingFaceError::Api { status, message } => {
                assert_eq!(status, 503);
                assert!(message.is_empty());
            }
            other => panic!("Expected API error, got {other:?}"),
        }
    }

    #[test]
    fn test_extracts_summary_text() {
        let response = json!([{ "summary_text": "The team agreed to ship on Friday." }]);
        assert_eq!(
            extract_summary(&response),
            "The team agreed to ship on Friday."
        );
    }

    #[test]
    fn test_falls_back_to_generated_text() {
        let response = json!([{ "generated_text": "Budget approved." }]);
        assert_eq!(extract_summary(&response), "Budget approved.");

        let response = json!([{ "summary_text": "", "generated_text": "Budget approved." }]);
        assert_eq!(extract_summary(&response), "Budget approved.");
    }

    #[test]
    fn test_only_first_candidate_is_used() {
        let response = json!([
            { "summary_text": "First." },
            { "summary_text": "Second." }
        ]);
        assert_eq!(extract_summary(&response), "First.");
    }

    #[test]
    fn test_missing_fields_yield_empty_summary() {
        assert_eq!(extract_summary(&json!([])), "");
        assert_eq!(extract_summary(&json!([{ "label": "x" }])), "");
        assert_eq!(extract_summary(&json!({ "summary_text": "not a list" })), "");
        assert_eq!(extract_summary(&json!([{ "summary_text": 42 }])), "");
    }

    #[test]
    fn test_api_error_message_carries_body() {
        let err = HuggingFaceError::Api {
            status: 503,
            message: r#"{"error":"Model is currently loading"}"#.into(),
        };
        assert_eq!(
            err.to_string(),
            r#"HuggingFace API error: {"error":"Model is currently loading"}"#
        );
    }

    #[test]
    fn test_builder_overrides() {
        let client = HuggingFaceClient::new("hf_test")
            .with_base_url("http://localhost:8080/models")
            .with_model("facebook/bart-large-cnn");
        assert_eq!(client.model(), "facebook/bart-large-cnn");
        assert_eq!(client.base_url, "http://localhost:8080/models");
    }

    #[test]
    fn test_default_model() {
        let client = HuggingFaceClient::new("hf_test");
        assert_eq!(client.model(), "philschmid/bart-large-cnn-samsum");
    }
}
