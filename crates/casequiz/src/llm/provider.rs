//! Text generator trait and response types.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A named model configuration, tried in a fixed fallback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    /// The main model.
    Primary,
    /// A faster, cheaper ("lite") model used when the primary returns nothing.
    Secondary,
}

impl ModelTier {
    /// Tiers in the order they are tried.
    pub const LADDER: [ModelTier; 2] = [ModelTier::Primary, ModelTier::Secondary];

    pub fn label(&self) -> &'static str {
        match self {
            ModelTier::Primary => "primary",
            ModelTier::Secondary => "secondary",
        }
    }
}

impl fmt::Display for ModelTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One fragment of a candidate. Non-text parts carry no text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// One candidate completion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub parts: Vec<Part>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Response shape the quiz engine depends on.
///
/// Vendors may return zero candidates, or candidates without text parts
/// (blocked by safety filters, truncated, tool calls). [`RawResponse::text`]
/// tolerates all of these.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<String>,
}

impl RawResponse {
    /// A single-candidate response with one text part.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            candidates: vec![Candidate {
                parts: vec![Part {
                    text: Some(text.into()),
                }],
                finish_reason: Some("STOP".to_string()),
            }],
            prompt_feedback: None,
        }
    }

    /// A response with no candidates, as returned for a blocked prompt.
    pub fn blocked(finish_reason: Option<String>, prompt_feedback: Option<String>) -> Self {
        Self {
            candidates: finish_reason
                .map(|reason| {
                    vec![Candidate {
                        parts: Vec::new(),
                        finish_reason: Some(reason),
                    }]
                })
                .unwrap_or_default(),
            prompt_feedback,
        }
    }

    /// All non-empty text fragments across candidates, joined with newlines and trimmed.
    pub fn text(&self) -> String {
        self.candidates
            .iter()
            .flat_map(|c| c.parts.iter())
            .filter_map(|p| p.text.as_deref())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }

    /// Finish reason of the first candidate, if any.
    pub fn finish_reason(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
    }
}

/// Configuration for model-backed generators.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    /// Model used by [`ModelTier::Primary`].
    pub primary_model: String,

    /// Model used by [`ModelTier::Secondary`].
    pub secondary_model: String,

    /// Maximum tokens in a response.
    pub max_output_tokens: u32,

    /// Sampling temperature.
    pub temperature: f64,

    /// HTTP timeout per call, in seconds.
    pub timeout_secs: u64,

    /// Base URL of the generative language API.
    pub api_base: String,
}

impl LlmConfig {
    /// Model id for a tier, without any `models/` prefix.
    pub fn model_for(&self, tier: ModelTier) -> &str {
        let id = match tier {
            ModelTier::Primary => &self.primary_model,
            ModelTier::Secondary => &self.secondary_model,
        };
        id.strip_prefix("models/").unwrap_or(id.as_str())
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            primary_model: "gemini-2.5-flash".to_string(),
            secondary_model: "gemini-2.0-flash-lite-001".to_string(),
            max_output_tokens: 400,
            temperature: 0.6,
            timeout_secs: 60,
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }
}

/// Trait for text generators.
///
/// Implementations must be thread-safe (Send + Sync) so one generator can be
/// shared behind an `Arc`. A generator returns whatever the backend produced,
/// including empty responses; deciding what counts as usable is up to the caller.
pub trait TextGenerator: Send + Sync {
    /// Send one prompt to the model configured for `tier`.
    fn generate(&self, prompt: &str, tier: ModelTier) -> Result<RawResponse>;

    /// Get the name of this generator (for logging/debugging).
    fn name(&self) -> &str;
}

impl<T: TextGenerator + ?Sized> TextGenerator for Arc<T> {
    fn generate(&self, prompt: &str, tier: ModelTier) -> Result<RawResponse> {
        (**self).generate(prompt, tier)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_joins_fragments_and_skips_empty_parts() {
        let response = RawResponse {
            candidates: vec![
                Candidate {
                    parts: vec![
                        Part {
                            text: Some("Case".to_string()),
                        },
                        Part { text: None },
                        Part {
                            text: Some(String::new()),
                        },
                    ],
                    finish_reason: Some("STOP".to_string()),
                },
                Candidate::default(),
                Candidate {
                    parts: vec![Part {
                        text: Some("<ans>B</ans>\n".to_string()),
                    }],
                    finish_reason: None,
                },
            ],
            prompt_feedback: None,
        };

        assert_eq!(response.text(), "Case\n<ans>B</ans>");
        assert_eq!(response.finish_reason(), Some("STOP"));
    }

    #[test]
    fn test_text_of_empty_response() {
        assert_eq!(RawResponse::default().text(), "");
        let blocked = RawResponse::blocked(Some("SAFETY".into()), Some("blockReason=OTHER".into()));
        assert_eq!(blocked.text(), "");
        assert_eq!(blocked.finish_reason(), Some("SAFETY"));
    }

    #[test]
    fn test_model_for_strips_prefix() {
        let config = LlmConfig {
            primary_model: "models/gemini-2.5-flash".to_string(),
            ..Default::default()
        };
        assert_eq!(config.model_for(ModelTier::Primary), "gemini-2.5-flash");
        assert_eq!(config.model_for(ModelTier::Secondary), "gemini-2.0-flash-lite-001");
    }

    #[test]
    fn test_ladder_order() {
        assert_eq!(ModelTier::LADDER, [ModelTier::Primary, ModelTier::Secondary]);
        assert_eq!(ModelTier::Secondary.to_string(), "secondary");
    }
}
