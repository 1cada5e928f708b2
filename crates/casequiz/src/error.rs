//! Error types for the casequiz library.

use thiserror::Error;

/// Main error type for casequiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    /// Both model tiers returned no usable text.
    #[error(
        "The model returned no content after {attempts} attempt(s). \
         finish_reason={} prompt_feedback={}",
        .finish_reason.as_deref().unwrap_or("None"),
        .prompt_feedback.as_deref().unwrap_or("None")
    )]
    EmptyGeneration {
        finish_reason: Option<String>,
        prompt_feedback: Option<String>,
        attempts: usize,
    },

    /// Text was returned but carried no valid `<ans>` tag.
    #[error(
        "No valid answer tag in model output (found: {})",
        .found.as_deref().unwrap_or("nothing")
    )]
    MissingAnswer { found: Option<String> },

    /// The repair pass also failed to produce a valid `<ans>` tag.
    #[error(
        "Could not obtain the correct answer (<ans>) from the model, even after repair (found: {})",
        .found.as_deref().unwrap_or("nothing")
    )]
    UnrepairableFormat { found: Option<String> },

    /// The text generator failed to talk to its backend.
    #[error("Provider error: {0}")]
    Provider(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A user answer that is not one of A, B, C or D.
    #[error("Invalid choice '{0}': expected one of A, B, C, D")]
    InvalidChoice(String),

    /// An answer or explanation was requested before any question was built.
    #[error("No active question: generate one first")]
    NoActiveQuestion,

    /// A backend response body that is not the expected JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl QuizError {
    /// Whether the error came from the model's output shape rather than transport or input.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            QuizError::MissingAnswer { .. } | QuizError::UnrepairableFormat { .. }
        )
    }
}

/// Result type alias for casequiz operations.
pub type Result<T> = std::result::Result<T, QuizError>;
