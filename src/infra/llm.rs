use async_trait::async_trait;
use reqwest::{Client, header::CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::cache::SummaryCache;
use crate::domain::prompt::ChangelogPrompt;
use crate::error::{AppError, AppResult};
use crate::services::LanguageModelService;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiClient {
    http: Client,
    api_key: Option<String>,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>, model: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
            model,
        }
    }

    fn api_key(&self) -> AppResult<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            AppError::Configuration("Gemini API key not configured".to_string())
        })
    }

    fn generate_endpoint(&self) -> String {
        format!("{GEMINI_API_BASE}/models/{}:generateContent", self.model)
    }
}

#[async_trait]
impl LanguageModelService for GeminiClient {
    async fn summarize_history(&self, prompt: &ChangelogPrompt) -> AppResult<String> {
        let api_key = self.api_key()?;

        let mut cache = SummaryCache::load()?;
        let cache_key = SummaryCache::compute_key(prompt.as_str(), &self.model);
        if let Some(hit) = cache.get(&cache_key) {
            return Ok(hit);
        }

        let request_body = GenerateContentRequest::new(prompt.as_str());
        let response = self
            .http
            .post(self.generate_endpoint())
            .header("x-goog-api-key", api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|err| AppError::LanguageModel(format!("failed to call Gemini: {err}")))?;

        let status = response.status();
        let body = response.text().await.map_err(|err| {
            AppError::LanguageModel(format!("failed to read Gemini response: {err}"))
        })?;
        if !status.is_success() {
            return Err(AppError::LanguageModel(format!(
                "Gemini responded with {status}: {body}"
            )));
        }

        let payload: GenerateContentResponse = serde_json::from_str(&body).map_err(|err| {
            AppError::LanguageModel(format!(
                "failed to parse Gemini response: {err}; raw response: {body}"
            ))
        })?;

        let summary = payload
            .first_candidate_text()
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| {
                AppError::LanguageModel(format!(
                    "Gemini returned no usable text; raw response: {body}"
                ))
            })?;

        cache.insert(cache_key, &self.model, &summary);
        cache.save()?;

        Ok(summary)
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
}

impl GenerateContentRequest {
    fn new(prompt: &str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

#[derive(Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

impl GenerateContentResponse {
    fn first_candidate_text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let content = candidate.content.as_ref()?;
        let text = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect::<Vec<_>>()
            .join("");
        (!text.is_empty()).then_some(text)
    }
}

#[derive(Deserialize)]
struct ResponseCandidate {
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_request_in_generate_content_shape() {
        let request = GenerateContentRequest::new("summarize this");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value["contents"][0]["parts"][0]["text"],
            serde_json::json!("summarize this")
        );
    }

    #[test]
    fn extracts_first_candidate_text() {
        let body = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "part one "}, {"text": "part two"}]}}
            ]
        }"#;
        let payload: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            payload.first_candidate_text(),
            Some("part one part two".to_string())
        );
    }

    #[test]
    fn empty_candidates_yield_no_text() {
        let payload: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(payload.first_candidate_text(), None);

        let body = r#"{"candidates": [{"content": {"parts": []}}]}"#;
        let payload: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(payload.first_candidate_text(), None);
    }
}
