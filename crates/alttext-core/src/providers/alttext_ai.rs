//! AltText.ai provider.
//!
//! Posts the raw base64 image and a language code to the images endpoint and
//! reads `alt_text` on success or `error_code` / `errors` on failure.

use super::provider::{AltTextProvider, GenerationRequest};
use crate::error::PipelineError;
use crate::types::ProviderKind;
use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Alt text reported when a 200 response carries no `alt_text`.
pub const NO_ALT_TEXT: &str = "No alt text generated";

/// Error code reported when a failure response carries no `error_code`.
pub const UNKNOWN_ERROR_CODE: &str = "Unknown error code";

/// Detail reported when a failure response carries no `errors`.
pub const NO_ERROR_DETAILS: &str = "No error details available";

/// AltText.ai provider.
pub struct AltTextAiProvider {
    client: reqwest::Client,
    endpoint: String,
}

impl AltTextAiProvider {
    pub fn new(client: reqwest::Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }
}

// --- Request types ---

#[derive(Serialize)]
struct ImagesRequest<'a> {
    image: RawImage<'a>,
    lang: &'a str,
}

#[derive(Serialize)]
struct RawImage<'a> {
    raw: &'a str,
}

// --- Response types ---

/// Response body as AltText.ai sends it.
///
/// Fields are kept as raw JSON so a field of the wrong type falls back to
/// its default instead of failing the whole response.
#[derive(Deserialize, Default, Debug)]
struct ResponseEnvelope {
    #[serde(default)]
    alt_text: Option<Value>,
    #[serde(default)]
    error_code: Option<Value>,
    #[serde(default)]
    errors: Option<Value>,
}

impl ResponseEnvelope {
    fn alt_text(&self) -> String {
        match &self.alt_text {
            Some(Value::String(text)) => text.clone(),
            _ => NO_ALT_TEXT.to_string(),
        }
    }

    fn error_code(&self) -> String {
        match &self.error_code {
            Some(Value::String(code)) => code.clone(),
            Some(Value::Number(code)) => code.to_string(),
            _ => UNKNOWN_ERROR_CODE.to_string(),
        }
    }

    /// `errors` may be a string or a structured object (field → messages);
    /// structured values are reported as compact JSON.
    fn error_detail(&self) -> String {
        match &self.errors {
            Some(Value::String(detail)) => detail.clone(),
            None | Some(Value::Null) => NO_ERROR_DETAILS.to_string(),
            Some(other) => other.to_string(),
        }
    }
}

#[async_trait]
impl AltTextProvider for AltTextAiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::AltTextAi
    }

    async fn describe(&self, request: &GenerationRequest<'_>) -> Result<String, PipelineError> {
        let body = ImagesRequest {
            image: RawImage {
                raw: &request.image.data,
            },
            lang: request.language.code(),
        };

        tracing::debug!(
            image = %request.image_name,
            lang = body.lang,
            payload_bytes = request.image.data.len(),
            "Sending AltText.ai request"
        );

        let resp = self
            .client
            .post(&self.endpoint)
            .header("X-API-Key", request.api_key.expose_secret())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| PipelineError::transport(format!("AltText.ai request failed: {e}")))?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| {
            PipelineError::transport(format!("Failed to read AltText.ai response: {e}"))
        })?;

        tracing::debug!(
            image = %request.image_name,
            status = status.as_u16(),
            body = %text,
            "AltText.ai response"
        );

        let envelope: ResponseEnvelope = serde_json::from_str(&text).map_err(|e| {
            PipelineError::transport(format!(
                "Failed to parse AltText.ai response (HTTP {status}): {e}"
            ))
        })?;

        if status == StatusCode::OK {
            Ok(envelope.alt_text())
        } else {
            Err(PipelineError::Provider {
                code: envelope.error_code(),
                detail: envelope.error_detail(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::EncodedImage;
    use crate::types::{GenerationResult, Language, RasterFormat};
    use secrecy::SecretString;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> AltTextAiProvider {
        AltTextAiProvider::new(
            reqwest::Client::new(),
            &format!("{}/api/v1/images", server.uri()),
        )
    }

    fn request<'a>(key: &'a SecretString, language: Language) -> GenerationRequest<'a> {
        GenerationRequest {
            image_name: "cat.png".to_string(),
            image: EncodedImage {
                data: "iVBORw0KGgo=".to_string(),
                format: RasterFormat::Png,
            },
            language,
            api_key: key,
        }
    }

    #[tokio::test]
    async fn test_success_builds_snippet() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/images"))
            .and(header("X-API-Key", "test-key"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "alt_text": "a cat" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let key = SecretString::from("test-key");
        let result = provider(&server)
            .generate_alt_text(&request(&key, Language::English))
            .await;

        assert_eq!(
            result,
            GenerationResult::Success {
                image_name: "cat.png".to_string(),
                alt_text: "a cat".to_string(),
                html_snippet: r#"<img src="cat.png" alt="a cat">"#.to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_request_body_carries_raw_image_and_language_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/images"))
            .and(body_json(serde_json::json!({
                "image": { "raw": "iVBORw0KGgo=" },
                "lang": "it"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "alt_text": "un gatto" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let key = SecretString::from("k");
        let text = provider(&server)
            .describe(&request(&key, Language::Italian))
            .await
            .unwrap();
        assert_eq!(text, "un gatto");
    }

    #[tokio::test]
    async fn test_missing_alt_text_uses_sentinel() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "asset_id": "abc" })),
            )
            .mount(&server)
            .await;

        let key = SecretString::from("k");
        let text = provider(&server)
            .describe(&request(&key, Language::English))
            .await
            .unwrap();
        assert_eq!(text, NO_ALT_TEXT);
    }

    #[tokio::test]
    async fn test_error_response_becomes_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
                "error_code": "bad_image",
                "errors": "corrupt"
            })))
            .mount(&server)
            .await;

        let key = SecretString::from("k");
        let result = provider(&server)
            .generate_alt_text(&request(&key, Language::English))
            .await;
        assert_eq!(
            result,
            GenerationResult::failure("cat.png", "bad_image", "corrupt")
        );
    }

    #[tokio::test]
    async fn test_error_response_defaults_and_structured_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "errors": { "api_key": ["is invalid"] }
            })))
            .mount(&server)
            .await;

        let key = SecretString::from("k");
        let err = provider(&server)
            .describe(&request(&key, Language::English))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), UNKNOWN_ERROR_CODE);
        assert_eq!(err.error_detail(), r#"{"api_key":["is invalid"]}"#);
    }

    #[tokio::test]
    async fn test_non_json_body_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&server)
            .await;

        let key = SecretString::from("k");
        let result = provider(&server)
            .generate_alt_text(&request(&key, Language::English))
            .await;
        match result {
            GenerationResult::Failure {
                error_code,
                error_detail,
                ..
            } => {
                assert_eq!(error_code, "transport_error");
                assert!(error_detail.contains("HTTP 502"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Nothing listens on the address once the server is dropped
        let uri = {
            let server = MockServer::start().await;
            server.uri()
        };
        let provider = AltTextAiProvider::new(reqwest::Client::new(), &uri);

        let key = SecretString::from("k");
        let err = provider
            .describe(&request(&key, Language::English))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "transport_error");
    }

    #[test]
    fn test_envelope_defaults_on_wrong_types() {
        let envelope: ResponseEnvelope =
            serde_json::from_str(r#"{"alt_text": 42, "error_code": null, "errors": null}"#)
                .unwrap();
        assert_eq!(envelope.alt_text(), NO_ALT_TEXT);
        assert_eq!(envelope.error_code(), UNKNOWN_ERROR_CODE);
        assert_eq!(envelope.error_detail(), NO_ERROR_DETAILS);
    }
}
