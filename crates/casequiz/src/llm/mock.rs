//! Mock text generator for testing and offline demos.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use crate::error::{QuizError, Result};

use super::provider::{ModelTier, RawResponse, TextGenerator};

/// A scripted reply for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockReply {
    /// A normal response carrying this text.
    Text(String),
    /// A response with no usable text.
    Empty {
        finish_reason: Option<String>,
        prompt_feedback: Option<String>,
    },
    /// A transport failure.
    Fail(String),
}

impl MockReply {
    pub fn text(text: impl Into<String>) -> Self {
        MockReply::Text(text.into())
    }

    pub fn empty() -> Self {
        MockReply::Empty {
            finish_reason: None,
            prompt_feedback: None,
        }
    }

    pub fn blocked(finish_reason: impl Into<String>) -> Self {
        MockReply::Empty {
            finish_reason: Some(finish_reason.into()),
            prompt_feedback: None,
        }
    }
}

/// A call the mock received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    pub prompt: String,
    pub tier: ModelTier,
}

/// Mock generator that replays a script and records every call.
///
/// Once the script is exhausted it answers with canned, well-formed
/// content: a tagged question when the prompt asks for `<ans>`, an
/// explanation otherwise.
#[derive(Debug, Default)]
pub struct MockGenerator {
    script: Mutex<VecDeque<MockReply>>,
    calls: Mutex<Vec<MockCall>>,
}

impl MockGenerator {
    /// Create a mock that only gives canned replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that replays `replies` in order before falling back to canned replies.
    pub fn scripted(replies: impl IntoIterator<Item = MockReply>) -> Self {
        Self {
            script: Mutex::new(replies.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock whose every call returns an empty response.
    pub fn always_empty() -> Self {
        Self::scripted(std::iter::repeat_n(MockReply::empty(), 16))
    }

    /// Calls received so far, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    fn canned_reply(prompt: &str) -> MockReply {
        if !prompt.contains("<ans>") {
            return MockReply::text(
                "1) Explanation: the chosen option addresses the underlying cause; \
                 the other options treat symptoms or are contraindicated.\n\
                 2) Reference: Sepsis management guidelines (https://www.ncbi.nlm.nih.gov/books/NBK547682/)",
            );
        }

        let letter = ['A', 'B', 'C', 'D'][prompt.len() % 4];
        let explanation = if prompt.contains("<exp>") {
            "\n<exp>Early recognition and targeted therapy change outcomes.</exp>"
        } else {
            ""
        };
        MockReply::Text(format!(
            "A 58-year-old man presents with fever, hypotension and confusion.\n\
             Which is the most appropriate next step?\n\
             A) Observation\n\
             B) Oral antibiotics\n\
             C) Fluids and broad-spectrum antibiotics\n\
             D) Discharge with follow-up{explanation}\n\
             <ans>{letter}</ans>"
        ))
    }
}

impl TextGenerator for MockGenerator {
    fn generate(&self, prompt: &str, tier: ModelTier) -> Result<RawResponse> {
        lock(&self.calls).push(MockCall {
            prompt: prompt.to_string(),
            tier,
        });

        let reply = lock(&self.script)
            .pop_front()
            .unwrap_or_else(|| Self::canned_reply(prompt));

        match reply {
            MockReply::Text(text) => Ok(RawResponse::from_text(text)),
            MockReply::Empty {
                finish_reason,
                prompt_feedback,
            } => Ok(RawResponse::blocked(finish_reason, prompt_feedback)),
            MockReply::Fail(message) => Err(QuizError::Provider(message)),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
