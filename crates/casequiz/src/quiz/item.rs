//! Quiz items, explanations and generation attempt records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::llm::ModelTier;

use super::letter::AnswerLetter;

/// A generated multiple-choice question with its hidden answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizItem {
    /// Topic the question was generated for.
    pub topic: String,

    /// Case vignette, question and options as shown to the user.
    /// Never contains tag markup or the answer region.
    pub visible_text: String,

    /// The correct option.
    pub correct_answer: AnswerLetter,

    /// Explanation the model embedded alongside the question, when the
    /// two-tag layout was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedded_explanation: Option<String>,
}

impl QuizItem {
    /// Check a chosen option against the correct one.
    pub fn grade(&self, chosen: AnswerLetter) -> Verdict {
        Verdict {
            chosen,
            correct: self.correct_answer,
            passed: chosen == self.correct_answer,
        }
    }
}

/// Explanation of why an option is the correct one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    pub topic: String,
    pub correct_answer: AnswerLetter,
    /// Never empty; falls back to a placeholder.
    pub body: String,
}

/// Outcome of grading one user answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub chosen: AnswerLetter,
    pub correct: AnswerLetter,
    pub passed: bool,
}

/// Record of a single call to a text generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationAttempt {
    /// The prompt that was sent.
    pub prompt: String,

    /// Which model tier served the call.
    pub tier: ModelTier,

    /// Joined text of the response (empty when nothing usable came back).
    pub raw_text: String,

    /// Whether the call produced non-empty text.
    pub succeeded: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<String>,

    /// Transport error, if the call failed outright.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    pub started_at: DateTime<Utc>,
}
