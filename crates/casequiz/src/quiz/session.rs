//! Single-user quiz session: current question, answer, explanation.

use crate::casequiz::CaseQuiz;
use crate::error::{QuizError, Result};

use super::item::{Explanation, QuizItem, Verdict};
use super::letter::AnswerLetter;

/// State for one user working through questions one at a time.
///
/// A failed request leaves the previous question in place.
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    item: Option<QuizItem>,
    explanation: Option<Explanation>,
    verdict: Option<Verdict>,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh question and make it current.
    pub fn new_question(&mut self, engine: &CaseQuiz, topic: &str) -> Result<&QuizItem> {
        let item = engine.build_quiz(topic)?;
        Ok(self.load(item))
    }

    /// Make an existing item current, discarding any answer or explanation.
    pub fn load(&mut self, item: QuizItem) -> &QuizItem {
        self.explanation = None;
        self.verdict = None;
        self.item.insert(item)
    }

    pub fn current(&self) -> Option<&QuizItem> {
        self.item.as_ref()
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    pub fn explanation(&self) -> Option<&Explanation> {
        self.explanation.as_ref()
    }

    /// Grade a user's answer against the current question.
    pub fn submit(&mut self, user_answer: &str) -> Result<Verdict> {
        let item = self.item.as_ref().ok_or(QuizError::NoActiveQuestion)?;
        let chosen: AnswerLetter = user_answer.parse()?;

        let verdict = item.grade(chosen);
        log::info!(
            "Answer {} for '{}': {}",
            chosen,
            item.topic,
            if verdict.passed { "correct" } else { "incorrect" }
        );

        self.verdict = Some(verdict);
        Ok(verdict)
    }

    /// Explanation for the current question.
    ///
    /// Cached after the first call. An explanation embedded in the question
    /// output is used without another model call.
    pub fn reveal(&mut self, engine: &CaseQuiz) -> Result<&Explanation> {
        let explanation = match self.explanation.take() {
            Some(cached) => cached,
            None => {
                let item = self.item.as_ref().ok_or(QuizError::NoActiveQuestion)?;
                match &item.embedded_explanation {
                    Some(body) => Explanation {
                        topic: item.topic.clone(),
                        correct_answer: item.correct_answer,
                        body: body.clone(),
                    },
                    None => engine.reveal_explanation(&item.topic, item.correct_answer)?,
                }
            }
        };

        Ok(self.explanation.insert(explanation))
    }
}
