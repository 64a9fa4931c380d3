//! Gemini-backed explanations for the JSON and JWT tools.
//!
//! Callers always get text back: every failure is mapped to a fixed,
//! human-readable fallback and logged to the browser console.

use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Characters of JSON sent for analysis; larger documents are cut.
pub const MAX_JSON_CHARS: usize = 5000;

pub const MISSING_KEY_TEXT: &str =
    "API Key is missing. Set GEMINI_API_KEY when building DevForge.";
pub const SERVICE_ERROR_TEXT: &str = "Error communicating with AI service.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
}

impl AiConfig {
    /// Key baked in at compile time: `GEMINI_API_KEY`, else `API_KEY`.
    pub fn from_build_env() -> Self {
        Self::with_key(option_env!("GEMINI_API_KEY").or(option_env!("API_KEY")))
    }

    pub fn with_key(api_key: Option<&str>) -> Self {
        Self {
            api_key: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(String::from),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    pub fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}

#[derive(Debug, Error)]
pub enum AiError {
    #[error("API key is not configured")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Transport(#[from] gloo_net::Error),
    #[error("service responded with HTTP {0}")]
    Status(u16),
    #[error("response contained no text")]
    EmptyResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    JsonAnalysis,
    JwtExplanation,
}

impl Task {
    fn empty_text(self) -> &'static str {
        match self {
            Task::JsonAnalysis => "No analysis generated.",
            Task::JwtExplanation => "No explanation generated.",
        }
    }
}

pub fn fallback_text(err: &AiError, task: Task) -> &'static str {
    match err {
        AiError::MissingApiKey => MISSING_KEY_TEXT,
        AiError::EmptyResponse => task.empty_text(),
        AiError::Transport(_) | AiError::Status(_) => SERVICE_ERROR_TEXT,
    }
}

/* ---------- prompts ---------- */

pub fn json_analysis_prompt(json: &str) -> String {
    let capped = match json.char_indices().nth(MAX_JSON_CHARS) {
        Some((cut, _)) => &json[..cut],
        None => json,
    };
    format!(
        "Analyze the following JSON.\n\
         1. Provide a brief 1-sentence summary of what this data likely represents.\n\
         2. Generate a TypeScript interface that matches this JSON structure.\n\n\
         JSON:\n{capped}\n"
    )
}

pub fn jwt_claims_prompt(payload: &str) -> String {
    format!(
        "Explain the security implications and meaning of the following JWT payload claims. \
         Highlight any potential security risks (like long expiration, sensitive data in payload).\n\n\
         Payload:\n{payload}\n"
    )
}

/* ---------- wire types ---------- */

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    pub fn single(prompt: &'a str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
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
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text parts of the first candidate, joined. `None` when blank.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/* ---------- calls ---------- */

pub async fn generate(config: &AiConfig, prompt: &str) -> Result<String, AiError> {
    let key = config.api_key.as_deref().ok_or(AiError::MissingApiKey)?;
    let resp = Request::post(&config.generate_url())
        .header("x-goog-api-key", key)
        .json(&GenerateContentRequest::single(prompt))?
        .send()
        .await?;
    if !resp.ok() {
        return Err(AiError::Status(resp.status()));
    }
    let reply: GenerateContentResponse = resp.json().await?;
    reply.text().ok_or(AiError::EmptyResponse)
}

async fn run(config: &AiConfig, prompt: String, task: Task) -> String {
    match generate(config, &prompt).await {
        Ok(text) => text,
        Err(e) => {
            if !matches!(e, AiError::MissingApiKey) {
                gloo::console::error!("Gemini error:", e.to_string());
            }
            fallback_text(&e, task).to_string()
        }
    }
}

pub async fn generate_json_analysis(config: &AiConfig, json: &str) -> String {
    run(config, json_analysis_prompt(json), Task::JsonAnalysis).await
}

pub async fn explain_jwt_claims(config: &AiConfig, payload: &str) -> String {
    run(config, jwt_claims_prompt(payload), Task::JwtExplanation).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_keys_count_as_missing() {
        assert_eq!(AiConfig::with_key(None).api_key, None);
        assert_eq!(AiConfig::with_key(Some("   ")).api_key, None);
        assert_eq!(
            AiConfig::with_key(Some(" k-123 ")).api_key.as_deref(),
            Some("k-123")
        );
    }

    #[test]
    fn url_targets_the_configured_model() {
        let mut cfg = AiConfig::with_key(Some("k"));
        assert_eq!(
            cfg.generate_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
        cfg.endpoint = "http://localhost:8080/".into();
        cfg.model = "test-model".into();
        assert_eq!(
            cfg.generate_url(),
            "http://localhost:8080/models/test-model:generateContent"
        );
    }

    #[test]
    fn json_prompt_caps_input_on_char_boundary() {
        let big = "é".repeat(MAX_JSON_CHARS + 50);
        let prompt = json_analysis_prompt(&big);
        assert_eq!(prompt.matches('é').count(), MAX_JSON_CHARS);
        assert!(prompt.contains("TypeScript interface"));

        let small = json_analysis_prompt(r#"{"a":1}"#);
        assert!(small.contains(r#"{"a":1}"#));
    }

    #[test]
    fn jwt_prompt_embeds_payload() {
        let prompt = jwt_claims_prompt("{\n  \"sub\": \"42\"\n}");
        assert!(prompt.contains("security implications"));
        assert!(prompt.ends_with("{\n  \"sub\": \"42\"\n}\n"));
    }

    #[test]
    fn request_body_shape() {
        let body = serde_json::to_value(GenerateContentRequest::single("hi")).unwrap();
        assert_eq!(body, serde_json::json!({"contents": [{"parts": [{"text": "hi"}]}]}));
    }

    #[test]
    fn response_text_joins_first_candidate_parts() {
        let reply: GenerateContentResponse = serde_json::from_str(
            r#"{
                "candidates": [
                    {"content": {"parts": [{"text": "Hello, "}, {"text": "world"}], "role": "model"},
                     "finishReason": "STOP"},
                    {"content": {"parts": [{"text": "ignored"}]}}
                ],
                "usageMetadata": {"totalTokenCount": 12}
            }"#,
        )
        .unwrap();
        assert_eq!(reply.text().as_deref(), Some("Hello, world"));
    }

    #[test]
    fn blank_or_missing_text_is_none() {
        let empty: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.text(), None);
        let blocked: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap();
        assert_eq!(blocked.text(), None);
        let blank: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": [{"content": {"parts": [{"text": "  "}]}}]}"#)
                .unwrap();
        assert_eq!(blank.text(), None);
    }

    #[test]
    fn failures_map_to_fixed_text() {
        assert_eq!(
            fallback_text(&AiError::MissingApiKey, Task::JwtExplanation),
            MISSING_KEY_TEXT
        );
        assert_eq!(
            fallback_text(&AiError::EmptyResponse, Task::JsonAnalysis),
            "No analysis generated."
        );
        assert_eq!(
            fallback_text(&AiError::EmptyResponse, Task::JwtExplanation),
            "No explanation generated."
        );
        assert_eq!(
            fallback_text(&AiError::Status(429), Task::JwtExplanation),
            SERVICE_ERROR_TEXT
        );
    }
}
