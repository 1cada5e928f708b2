//! Configuration defaults and environment overrides.

use std::env;
use std::str::FromStr;

use secrecy::SecretString;

use crate::error::{QuizError, Result};
use crate::interpret::{AnswerPolicy, ResponseInterpreter, TagLayout};
use crate::llm::LlmConfig;

/// Configuration for quiz generation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuizConfig {
    /// Model and transport settings.
    pub llm: LlmConfig,
    /// Which marker tags the model is asked to emit.
    pub layout: TagLayout,
    /// What to do when the answer tag is missing.
    pub policy: AnswerPolicy,
}

impl QuizConfig {
    /// Defaults overridden by `CASEQUIZ_*` environment variables.
    ///
    /// Unset variables keep their defaults; set but unparseable numeric
    /// values are a configuration error.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        let llm = &mut config.llm;

        if let Ok(model) = env::var("CASEQUIZ_PRIMARY_MODEL") {
            llm.primary_model = model;
        }
        if let Ok(model) = env::var("CASEQUIZ_SECONDARY_MODEL") {
            llm.secondary_model = model;
        }
        if let Ok(base) = env::var("CASEQUIZ_API_BASE") {
            llm.api_base = base;
        }
        if let Some(tokens) = parse_var("CASEQUIZ_MAX_OUTPUT_TOKENS")? {
            llm.max_output_tokens = tokens;
        }
        if let Some(temperature) = parse_var("CASEQUIZ_TEMPERATURE")? {
            llm.temperature = temperature;
        }
        if let Some(timeout) = parse_var("CASEQUIZ_TIMEOUT_SECS")? {
            llm.timeout_secs = timeout;
        }

        Ok(config)
    }

    pub fn with_layout(mut self, layout: TagLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_policy(mut self, policy: AnswerPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Interpreter configured with this layout and policy.
    pub fn interpreter(&self) -> ResponseInterpreter {
        ResponseInterpreter::new(self.layout, self.policy)
    }
}

/// Read the API key from `GEMINI_API_KEY`, falling back to `GOOGLE_API_KEY`.
pub fn api_key_from_env() -> Result<SecretString> {
    env::var("GEMINI_API_KEY")
        .or_else(|_| env::var("GOOGLE_API_KEY"))
        .ok()
        .filter(|key| !key.trim().is_empty())
        .map(SecretString::from)
        .ok_or_else(|| {
            QuizError::Config(
                "GEMINI_API_KEY (or GOOGLE_API_KEY) environment variable not set".to_string(),
            )
        })
}

fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(raw) => parse_value(name, &raw).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_value<T: FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| QuizError::Config(format!("{} has an invalid value: '{}'", name, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = QuizConfig::default();

        assert_eq!(config.llm.primary_model, "gemini-2.5-flash");
        assert_eq!(config.llm.secondary_model, "gemini-2.0-flash-lite-001");
        assert_eq!(config.llm.max_output_tokens, 400);
        assert_eq!(config.llm.temperature, 0.6);
        assert_eq!(config.layout, TagLayout::AnswerOnly);
        assert_eq!(config.policy, AnswerPolicy::Strict);
    }

    #[test]
    fn test_from_env_with_defaults() {
        // Should use env vars if set, or fall back to defaults
        let config = QuizConfig::from_env().unwrap_or_default();
        assert!(!config.llm.primary_model.is_empty());
        assert!(!config.llm.secondary_model.is_empty());
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value::<u32>("X", " 512 ").unwrap(), 512);
        let err = parse_value::<f64>("CASEQUIZ_TEMPERATURE", "warm").unwrap_err();
        assert!(err.to_string().contains("CASEQUIZ_TEMPERATURE"));
    }

    #[test]
    fn test_builder_sets_interpreter() {
        let config = QuizConfig::default()
            .with_layout(TagLayout::AnswerAndExplanation)
            .with_policy(AnswerPolicy::LetterScan);
        let interpreter = config.interpreter();

        assert_eq!(interpreter.layout, TagLayout::AnswerAndExplanation);
        assert_eq!(interpreter.policy, AnswerPolicy::LetterScan);
    }
}
