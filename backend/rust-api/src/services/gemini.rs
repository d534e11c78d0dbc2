use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::prompts::{lesson_prompt, quiz_prompt};
use super::provider::{ContentProvider, ProviderError};
use crate::config::ProviderConfig;
use crate::metrics::track_provider_call;
use crate::models::Selection;

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Google Gemini `generateContent` client.
pub struct GeminiProvider {
    http_client: Client,
    endpoint: String,
    api_key: String,
}

impl GeminiProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let http_client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            http_client,
            endpoint: format!(
                "{}/v1beta/models/{}:generateContent",
                config.base_url, config.model
            ),
            api_key: config.api_key.clone(),
        })
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .http_client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::Status { status, body });
        }

        let payload: GenerateContentResponse = response.json().await?;
        extract_text(payload)
    }
}

fn extract_text(payload: GenerateContentResponse) -> Result<String, ProviderError> {
    let candidate = payload
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::EmptyResponse("no candidates".to_string()))?;

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        let reason = candidate
            .finish_reason
            .unwrap_or_else(|| "empty content".to_string());
        return Err(ProviderError::EmptyResponse(reason));
    }

    Ok(text)
}

#[async_trait]
impl ContentProvider for GeminiProvider {
    async fn generate_lesson(&self, selection: &Selection) -> Result<String, ProviderError> {
        tracing::debug!(
            "Requesting lesson: topic={}, level={}, subject={}",
            selection.topic,
            selection.level,
            selection.subject
        );
        let prompt = lesson_prompt(selection);
        track_provider_call("lesson", self.generate(&prompt)).await
    }

    async fn generate_quiz_raw(&self, selection: &Selection) -> Result<String, ProviderError> {
        tracing::debug!(
            "Requesting quiz: topic={}, level={}, subject={}",
            selection.topic,
            selection.level,
            selection.subject
        );
        let prompt = quiz_prompt(selection);
        track_provider_call("quiz", self.generate(&prompt)).await
    }
}
