//! HTTP transport for the Gemini `generateContent` API.
//!
//! Configuration is via environment variables:
//! - `MAIRIS_GEMINI_URL` - Base URL (default: `https://generativelanguage.googleapis.com/v1beta`)
//! - `MAIRIS_FLASH_MODEL`, `MAIRIS_PRO_MODEL`, `MAIRIS_IMAGE_MODEL` - Model ids per tier
//!
//! The API key is read per request from the shared [`Credentials`], so a key
//! selected at runtime takes effect on the next call.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;

use super::{CollaboratorError, Credentials, ModelRequest, ModelTier, ModelTransport, ResponseFormat};

const DEFAULT_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model ids used for each tier.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub flash: String,
    pub pro: String,
    pub image: String,
}

impl ModelConfig {
    pub fn from_env() -> Self {
        let var = |name: &str, default: &str| {
            std::env::var(name).unwrap_or_else(|_| default.to_string())
        };
        Self {
            flash: var("MAIRIS_FLASH_MODEL", "gemini-3-flash-preview"),
            pro: var("MAIRIS_PRO_MODEL", "gemini-3-pro-preview"),
            image: var("MAIRIS_IMAGE_MODEL", "gemini-2.5-flash-image"),
        }
    }

    fn for_tier(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Flash => &self.flash,
            ModelTier::Pro => &self.pro,
            ModelTier::Image => &self.image,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// [`ModelTransport`] backed by the Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    base_url: String,
    models: ModelConfig,
    credentials: Credentials,
    client: Client,
}

impl GeminiClient {
    /// Create client from environment variables.
    pub fn from_env(credentials: Credentials) -> Self {
        let base_url =
            std::env::var("MAIRIS_GEMINI_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        Self::new(base_url, ModelConfig::from_env(), credentials)
    }

    /// Create with explicit configuration.
    pub fn new(base_url: impl Into<String>, models: ModelConfig, credentials: Credentials) -> Self {
        Self {
            base_url: base_url.into(),
            models,
            credentials,
            client: Client::new(),
        }
    }

    fn request_body(request: &ModelRequest) -> serde_json::Value {
        let contents = json!([{ "parts": [{ "text": request.prompt }] }]);
        match request.format {
            ResponseFormat::Json => json!({
                "contents": contents,
                "generationConfig": { "responseMimeType": "application/json" },
            }),
            ResponseFormat::Text => json!({ "contents": contents }),
            ResponseFormat::Image => json!({
                "contents": contents,
                "generationConfig": { "imageConfig": { "aspectRatio": "16:9" } },
            }),
        }
    }

    /// Handle response, converting HTTP errors to CollaboratorError.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<GenerateContentResponse, CollaboratorError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(CollaboratorError::Unauthorized(body))
            }
            _ if is_credential_rejection(&body) => Err(CollaboratorError::Unauthorized(body)),
            _ => Err(CollaboratorError::Api {
                status: status.as_u16(),
                body,
            }),
        }
    }
}

/// The API reports a bad or unknown key with these messages rather than a
/// 401.
fn is_credential_rejection(body: &str) -> bool {
    body.contains("Requested entity was not found")
        || body.contains("API key not valid")
        || body.contains("API_KEY_INVALID")
}

#[async_trait]
impl ModelTransport for GeminiClient {
    async fn generate(&self, request: &ModelRequest) -> Result<String, CollaboratorError> {
        let key = self
            .credentials
            .current()
            .ok_or_else(|| CollaboratorError::Unauthorized("no API key selected".to_string()))?;

        let model = self.models.for_tier(request.tier);
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        tracing::debug!(operation = request.operation.as_str(), model, "Calling model API");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", key)
            .json(&Self::request_body(request))
            .send()
            .await?;
        let body = self.handle_response(response).await?;

        let parts = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts)
            .unwrap_or_default();

        if request.format == ResponseFormat::Image {
            let image = parts.into_iter().find_map(|p| p.inline_data);
            return Ok(image
                .map(|data| {
                    let mime = data.mime_type.unwrap_or_else(|| "image/png".to_string());
                    format!("data:{};base64,{}", mime, data.data)
                })
                .unwrap_or_default());
        }

        Ok(parts.into_iter().filter_map(|p| p.text).collect())
    }
}

// ============================================================
// Wire types
// ============================================================

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    text: Option<String>,
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: Option<String>,
    data: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborator::Operation;

    #[test]
    fn json_requests_ask_for_json_mime_type() {
        let body = GeminiClient::request_body(&ModelRequest {
            operation: Operation::DiscoverTopics,
            tier: ModelTier::Flash,
            format: ResponseFormat::Json,
            prompt: "p".to_string(),
        });
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(body["contents"][0]["parts"][0]["text"], "p");
    }

    #[test]
    fn text_requests_have_no_generation_config() {
        let body = GeminiClient::request_body(&ModelRequest {
            operation: Operation::SynthesizeLiterature,
            tier: ModelTier::Flash,
            format: ResponseFormat::Text,
            prompt: "p".to_string(),
        });
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn recognizes_credential_rejection_messages() {
        assert!(is_credential_rejection(
            r#"{"error":{"code":404,"message":"Requested entity was not found."}}"#
        ));
        assert!(is_credential_rejection("API key not valid. Please pass a valid API key."));
        assert!(!is_credential_rejection("Resource has been exhausted"));
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let client = GeminiClient::new(
            "http://127.0.0.1:9",
            ModelConfig {
                flash: "f".into(),
                pro: "p".into(),
                image: "i".into(),
            },
            Credentials::new(None),
        );
        let err = client
            .generate(&ModelRequest {
                operation: Operation::DiscoverTopics,
                tier: ModelTier::Flash,
                format: ResponseFormat::Json,
                prompt: "p".into(),
            })
            .await
            .unwrap_err();
        assert!(err.is_auth_failure());
    }
}
