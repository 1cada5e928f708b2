//! Google Gemini API generator implementation.

use std::time::Duration;

use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::config;
use crate::error::{QuizError, Result};

use super::prompts;
use super::provider::{Candidate, LlmConfig, ModelTier, Part, RawResponse, TextGenerator};

/// Harm categories whose blocking threshold is lowered. Clinical vignettes
/// routinely mention self-harm, overdoses and anatomy.
const RELAXED_SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
];

/// A configured client for one model tier.
struct GeminiModel {
    client: Client,
    endpoint: String,
    model_id: String,
}

impl GeminiModel {
    fn build(config: &LlmConfig, tier: ModelTier) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| QuizError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let model_id = config.model_for(tier).to_string();
        let endpoint = format!(
            "{}/models/{}:generateContent",
            config.api_base.trim_end_matches('/'),
            model_id
        );

        log::debug!("Initialized {} tier model {}", tier, model_id);

        Ok(Self {
            client,
            endpoint,
            model_id,
        })
    }
}

/// Gemini generator with one lazily built model handle per tier.
pub struct GeminiGenerator {
    api_key: SecretString,
    config: LlmConfig,
    primary: OnceCell<GeminiModel>,
    secondary: OnceCell<GeminiModel>,
}

impl GeminiGenerator {
    /// Create a new Gemini generator with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_config(api_key, LlmConfig::default())
    }

    /// Create a new Gemini generator with custom configuration.
    pub fn with_config(api_key: impl Into<String>, config: LlmConfig) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            config,
            primary: OnceCell::new(),
            secondary: OnceCell::new(),
        }
    }

    /// Create from `GEMINI_API_KEY` (or `GOOGLE_API_KEY`) and the given configuration.
    pub fn from_env(config: LlmConfig) -> Result<Self> {
        let api_key = config::api_key_from_env()?;
        Ok(Self {
            api_key,
            config,
            primary: OnceCell::new(),
            secondary: OnceCell::new(),
        })
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Model handle for a tier, built on first use and reused afterwards.
    fn model(&self, tier: ModelTier) -> Result<&GeminiModel> {
        let cell = match tier {
            ModelTier::Primary => &self.primary,
            ModelTier::Secondary => &self.secondary,
        };
        cell.get_or_try_init(|| GeminiModel::build(&self.config, tier))
    }

    /// Build headers for API requests.
    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(self.api_key.expose_secret())
                .map_err(|e| QuizError::Config(format!("Invalid API key: {}", e)))?,
        );
        Ok(headers)
    }

    /// Build the `generateContent` request body.
    fn request_body(&self, prompt: &str) -> Value {
        let safety_settings: Vec<Value> = RELAXED_SAFETY_CATEGORIES
            .iter()
            .map(|category| json!({ "category": category, "threshold": "BLOCK_NONE" }))
            .collect();

        json!({
            "systemInstruction": {
                "parts": [{ "text": prompts::system_prompt() }]
            },
            "contents": [
                {
                    "role": "user",
                    "parts": [{ "text": prompt }]
                }
            ],
            "generationConfig": {
                "maxOutputTokens": self.config.max_output_tokens,
                "temperature": self.config.temperature
            },
            "safetySettings": safety_settings
        })
    }
}

impl TextGenerator for GeminiGenerator {
    fn generate(&self, prompt: &str, tier: ModelTier) -> Result<RawResponse> {
        let model = self.model(tier)?;

        log::debug!("Sending {} chars to {} ({})", prompt.len(), model.model_id, tier);

        let response = model
            .client
            .post(&model.endpoint)
            .headers(self.build_headers()?)
            .json(&self.request_body(prompt))
            .send()
            .map_err(|e| QuizError::Provider(format!("Gemini request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();
            return Err(QuizError::Provider(format!(
                "Gemini API error ({}): {}",
                status, error_text
            )));
        }

        let body = response
            .text()
            .map_err(|e| QuizError::Provider(format!("Failed to read Gemini response: {}", e)))?;

        parse_response(&body)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

/// Gemini `generateContent` response structure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ApiCandidate>,
    #[serde(default)]
    prompt_feedback: Option<Value>,
}

/// Candidate in API response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiCandidate {
    #[serde(default)]
    content: Option<ApiContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiContent {
    #[serde(default)]
    parts: Vec<ApiPart>,
}

#[derive(Debug, Deserialize)]
struct ApiPart {
    #[serde(default)]
    text: Option<String>,
}

impl From<GenerateContentResponse> for RawResponse {
    fn from(api: GenerateContentResponse) -> Self {
        let candidates = api
            .candidates
            .into_iter()
            .map(|c| Candidate {
                parts: c
                    .content
                    .map(|content| {
                        content
                            .parts
                            .into_iter()
                            .map(|p| Part { text: p.text })
                            .collect()
                    })
                    .unwrap_or_default(),
                finish_reason: c.finish_reason,
            })
            .collect();

        RawResponse {
            candidates,
            prompt_feedback: api.prompt_feedback.map(describe_feedback),
        }
    }
}

/// Decode a `generateContent` response body.
fn parse_response(body: &str) -> Result<RawResponse> {
    let api: GenerateContentResponse = serde_json::from_str(body)?;
    Ok(api.into())
}

/// Short form of `promptFeedback`: the block reason when present, otherwise compact JSON.
fn describe_feedback(feedback: Value) -> String {
    match feedback.get("blockReason").and_then(Value::as_str) {
        Some(reason) => format!("blockReason={}", reason),
        None => feedback.to_string(),
    }
}
