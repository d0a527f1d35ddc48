//! OpenAI provider using the legacy text Completions API.
//!
//! The image travels as base64 text inside the prompt. A text-completion
//! model cannot see images, so the output is not grounded in the picture;
//! switching to a vision-capable chat endpoint would change what this
//! provider returns and is deliberately not done here.

use super::provider::{AltTextProvider, GenerationRequest};
use crate::error::PipelineError;
use crate::types::{Language, ProviderKind};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// OpenAI provider using the Completions API.
pub struct OpenAiProvider {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    max_tokens: u32,
}

impl OpenAiProvider {
    pub fn new(client: reqwest::Client, endpoint: &str, model: &str, max_tokens: u32) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
            model: model.to_string(),
            max_tokens,
        }
    }
}

/// Prompt sent to the completion model.
pub(crate) fn completion_prompt(language: Language, image_base64: &str) -> String {
    format!(
        "Generate an alt text for the following image in {}: {image_base64}",
        language.code()
    )
}

// --- Request types ---

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: String,
    max_tokens: u32,
}

// --- Response types ---

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl AltTextProvider for OpenAiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    async fn describe(&self, request: &GenerationRequest<'_>) -> Result<String, PipelineError> {
        let start = Instant::now();

        let body = CompletionRequest {
            model: &self.model,
            prompt: completion_prompt(request.language, &request.image.data),
            max_tokens: self.max_tokens,
        };

        tracing::debug!(
            image = %request.image_name,
            model = %self.model,
            prompt_chars = body.prompt.len(),
            "Sending OpenAI completion request"
        );

        let resp = self
            .client
            .post(&self.endpoint)
            .header(
                "Authorization",
                format!("Bearer {}", request.api_key.expose_secret()),
            )
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| PipelineError::transport(format!("OpenAI request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(PipelineError::transport(format!(
                "OpenAI HTTP {status}: {text}"
            )));
        }

        let completion: CompletionResponse = resp.json().await.map_err(|e| {
            PipelineError::transport(format!("Failed to parse OpenAI response: {e}"))
        })?;

        let text = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.text.trim().to_string())
            .ok_or_else(|| {
                PipelineError::transport("OpenAI returned empty choices array")
            })?;

        tracing::debug!(
            image = %request.image_name,
            latency_ms = start.elapsed().as_millis() as u64,
            "OpenAI response: {text}"
        );

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::EncodedImage;
    use crate::types::{GenerationResult, RasterFormat};
    use secrecy::SecretString;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> OpenAiProvider {
        OpenAiProvider::new(
            reqwest::Client::new(),
            &format!("{}/v1/completions", server.uri()),
            "text-davinci-003",
            50,
        )
    }

    fn request(key: &SecretString) -> GenerationRequest<'_> {
        GenerationRequest {
            image_name: "dog.jpg".to_string(),
            image: EncodedImage {
                data: "/9j/4AAQ".to_string(),
                format: RasterFormat::Jpeg,
            },
            language: Language::Italian,
            api_key: key,
        }
    }

    #[test]
    fn test_prompt_embeds_language_code_and_payload() {
        let prompt = completion_prompt(Language::German, "QUJD");
        assert_eq!(
            prompt,
            "Generate an alt text for the following image in de: QUJD"
        );
    }

    #[tokio::test]
    async fn test_first_choice_is_trimmed_alt_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/completions"))
            .and(header("Authorization", "Bearer sk-test"))
            .and(body_partial_json(serde_json::json!({
                "model": "text-davinci-003",
                "max_tokens": 50,
                "prompt": "Generate an alt text for the following image in it: /9j/4AAQ"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{ "text": "\n\n Un cane sul prato. " }, { "text": "ignored" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let key = SecretString::from("sk-test");
        let result = provider(&server).generate_alt_text(&request(&key)).await;
        assert_eq!(result, GenerationResult::success("dog.jpg", "Un cane sul prato."));
    }

    #[tokio::test]
    async fn test_auth_failure_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": { "message": "Incorrect API key provided" }
            })))
            .mount(&server)
            .await;

        let key = SecretString::from("sk-bad");
        let err = provider(&server).describe(&request(&key)).await.unwrap_err();
        assert_eq!(err.error_code(), "transport_error");
        assert!(err.error_detail().contains("401"));
    }

    #[tokio::test]
    async fn test_empty_choices_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
            )
            .mount(&server)
            .await;

        let key = SecretString::from("sk-test");
        let result = provider(&server).generate_alt_text(&request(&key)).await;
        assert!(matches!(
            result,
            GenerationResult::Failure { ref error_code, .. } if error_code == "transport_error"
        ));
    }
}
