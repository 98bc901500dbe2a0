use crate::{config::AppConfig, errors::ServiceError};
use async_trait::async_trait;
use metrics::{counter, histogram};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// A text generation backend.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Sends one user turn to `model`. `Ok(None)` means the call succeeded but
    /// produced no text.
    async fn generate(&self, model: &str, prompt: &str) -> Result<Option<String>, ServiceError>;
}

/// Folds the system instruction into the user turn as a labelled preamble.
pub fn compose_prompt(instruction: Option<&str>, message: &str) -> String {
    match instruction {
        Some(instruction) if !instruction.is_empty() => format!(
            "Instrucciones del Sistema: {}\n\nUsuario: {}",
            instruction, message
        ),
        _ => message.to_string(),
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    pub fn single_user_turn(text: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(text.into()),
                }],
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate.
    pub fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

/// Client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ServiceError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ServiceError::InternalError(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ServiceError> {
        Self::new(
            config.gemini_base_url.clone(),
            config.gemini_api_key.clone(),
            config.gemini_timeout(),
        )
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    async fn call(&self, model: &str, prompt: &str) -> Result<Option<String>, ServiceError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ServiceError::ExternalApiError("Gemini API key is not configured".to_string())
        })?;

        let response = self
            .client
            .post(self.endpoint(model))
            .query(&[("key", api_key)])
            .json(&GenerateContentRequest::single_user_turn(prompt))
            .send()
            .await
            .map_err(|e| ServiceError::ExternalApiError(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::ExternalApiError(format!(
                "{} {}",
                status,
                body.trim()
            )));
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::ExternalApiError(e.without_url().to_string()))?;

        Ok(payload.first_text())
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    async fn generate(&self, model: &str, prompt: &str) -> Result<Option<String>, ServiceError> {
        let start = Instant::now();
        let result = self.call(model, prompt).await;
        histogram!("bms_gemini.request.duration", start.elapsed());

        match &result {
            Ok(Some(_)) => {
                counter!("bms_gemini.requests", 1, "outcome" => "ok");
                debug!("Gemini answered");
            }
            Ok(None) => {
                counter!("bms_gemini.requests", 1, "outcome" => "empty");
                warn!("Gemini returned no candidates");
            }
            Err(e) => {
                counter!("bms_gemini.requests", 1, "outcome" => "error");
                warn!(error = %e, "Gemini call failed");
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn prompt_without_instruction_is_the_bare_message() {
        assert_eq!(compose_prompt(None, "Hola"), "Hola");
        assert_eq!(compose_prompt(Some(""), "Hola"), "Hola");
    }

    #[test]
    fn prompt_with_instruction_carries_both() {
        let prompt = compose_prompt(Some("Responde en francés"), "Hola");
        assert_eq!(
            prompt,
            "Instrucciones del Sistema: Responde en francés\n\nUsuario: Hola"
        );
    }

    #[test]
    fn request_body_is_a_single_user_turn() {
        let body = serde_json::to_value(GenerateContentRequest::single_user_turn("hi")).unwrap();
        assert_eq!(
            body,
            json!({"contents": [{"role": "user", "parts": [{"text": "hi"}]}]})
        );
    }

    #[test]
    fn first_text_handles_missing_pieces() {
        let empty: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.first_text(), None);

        let no_parts: GenerateContentResponse =
            serde_json::from_value(json!({"candidates": [{"content": {"parts": []}}]})).unwrap();
        assert_eq!(no_parts.first_text(), None);

        let full: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "Bonjour"}, {"text": "ignored"}]}},
                {"content": {"parts": [{"text": "second"}]}}
            ]
        }))
        .unwrap();
        assert_eq!(full.first_text().as_deref(), Some("Bonjour"));
    }

    #[tokio::test]
    async fn posts_to_model_endpoint_with_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-pro:generateContent"))
            .and(query_param("key", "test-key"))
            .and(body_json(json!({
                "contents": [{"role": "user", "parts": [{"text": "ping"}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"text": "pong"}]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::new(server.uri(), Some("test-key".into()), None).unwrap();
        let reply = client.generate("gemini-pro", "ping").await.unwrap();

        assert_eq!(reply.as_deref(), Some("pong"));
    }

    #[tokio::test]
    async fn upstream_error_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = GeminiClient::new(server.uri(), Some("k".into()), None).unwrap();
        let result = client.generate("gemini-pro", "ping").await;

        assert_matches!(result, Err(ServiceError::ExternalApiError(detail)) if detail.contains("500"));
    }

    #[tokio::test]
    async fn missing_key_fails_without_calling_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = GeminiClient::new(server.uri(), None, None).unwrap();
        let result = client.generate("gemini-pro", "ping").await;

        assert_matches!(result, Err(ServiceError::ExternalApiError(_)));
    }
}
