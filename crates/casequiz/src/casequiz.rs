//! Main CaseQuiz struct and public API.

use std::sync::Arc;

use chrono::Utc;

use crate::config::QuizConfig;
use crate::error::{QuizError, Result};
use crate::interpret::ResponseInterpreter;
use crate::llm::{ModelTier, TextGenerator, prompts};
use crate::quiz::{AnswerLetter, Explanation, GenerationAttempt, QuizItem};

/// A value together with the generator calls that produced it.
#[derive(Debug, Clone)]
pub struct Traced<T> {
    pub value: T,
    pub attempts: Vec<GenerationAttempt>,
}

/// The quiz engine: prompts a text generator, walks the tier fallback
/// ladder, and repairs malformed output once.
///
/// Every request is a strictly sequential chain of at most four calls:
/// primary, secondary, then (only if the answer tag is unusable) the
/// repair prompt on primary and secondary.
pub struct CaseQuiz {
    config: QuizConfig,
    interpreter: ResponseInterpreter,
    generator: Arc<dyn TextGenerator>,
}

impl CaseQuiz {
    /// Create an engine with default configuration.
    pub fn new(generator: impl TextGenerator + 'static) -> Self {
        Self::with_config(generator, QuizConfig::default())
    }

    /// Create an engine with custom configuration.
    pub fn with_config(generator: impl TextGenerator + 'static, config: QuizConfig) -> Self {
        Self::from_shared(Arc::new(generator), config)
    }

    /// Create an engine around an already shared generator.
    pub fn from_shared(generator: Arc<dyn TextGenerator>, config: QuizConfig) -> Self {
        let interpreter = config.interpreter();
        Self {
            config,
            interpreter,
            generator,
        }
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    pub fn interpreter(&self) -> &ResponseInterpreter {
        &self.interpreter
    }

    /// Generate a question for `topic`.
    pub fn build_quiz(&self, topic: &str) -> Result<QuizItem> {
        self.build_quiz_traced(topic).map(|traced| traced.value)
    }

    /// Generate a question for `topic`, returning the attempt log as well.
    pub fn build_quiz_traced(&self, topic: &str) -> Result<Traced<QuizItem>> {
        let mut attempts = Vec::new();

        let prompt = prompts::question_prompt(topic, self.config.layout);
        let raw = self.generate_with_fallback(&prompt, &mut attempts)?;

        let item = match self.interpreter.extract_quiz(topic, &raw) {
            Ok(item) => item,
            Err(QuizError::MissingAnswer { found }) => {
                log::warn!(
                    "Output for '{}' has no valid <ans> tag (found {:?}); requesting repair",
                    topic,
                    found
                );
                let repair = prompts::repair_prompt(&raw, self.config.layout);
                let repaired = self.generate_with_fallback(&repair, &mut attempts)?;

                self.interpreter
                    .extract_quiz(topic, &repaired)
                    .map_err(|e| match e {
                        QuizError::MissingAnswer { found } => {
                            log::error!("Repair pass for '{}' still has no valid <ans> tag", topic);
                            QuizError::UnrepairableFormat { found }
                        }
                        other => other,
                    })?
            }
            Err(e) => return Err(e),
        };

        log::info!(
            "Built question for '{}' after {} call(s)",
            topic,
            attempts.len()
        );

        Ok(Traced {
            value: item,
            attempts,
        })
    }

    /// Ask the model to explain why `correct_answer` is right.
    pub fn reveal_explanation(
        &self,
        topic: &str,
        correct_answer: AnswerLetter,
    ) -> Result<Explanation> {
        self.reveal_explanation_traced(topic, correct_answer)
            .map(|traced| traced.value)
    }

    /// Like [`CaseQuiz::reveal_explanation`], returning the attempt log as well.
    pub fn reveal_explanation_traced(
        &self,
        topic: &str,
        correct_answer: AnswerLetter,
    ) -> Result<Traced<Explanation>> {
        let mut attempts = Vec::new();

        let prompt = prompts::explanation_prompt(topic, correct_answer);
        let raw = self.generate_with_fallback(&prompt, &mut attempts)?;
        let body = self.interpreter.extract_explanation(&raw);

        Ok(Traced {
            value: Explanation {
                topic: topic.to_string(),
                correct_answer,
                body,
            },
            attempts,
        })
    }

    /// Send `prompt` to each tier in turn until one returns text.
    ///
    /// Every call is appended to `attempts`. A transport error on one tier
    /// falls through to the next; if no tier produced a response at all the
    /// last transport error is returned, otherwise an empty outcome is
    /// [`QuizError::EmptyGeneration`].
    pub fn generate_with_fallback(
        &self,
        prompt: &str,
        attempts: &mut Vec<GenerationAttempt>,
    ) -> Result<String> {
        let rung_start = attempts.len();
        let mut last_error = None;

        for tier in ModelTier::LADDER {
            let started_at = Utc::now();

            match self.generator.generate(prompt, tier) {
                Ok(response) => {
                    let text = response.text();
                    let succeeded = !text.is_empty();

                    attempts.push(GenerationAttempt {
                        prompt: prompt.to_string(),
                        tier,
                        raw_text: text.clone(),
                        succeeded,
                        finish_reason: response.finish_reason().map(str::to_string),
                        prompt_feedback: response.prompt_feedback.clone(),
                        error: None,
                        started_at,
                    });

                    if succeeded {
                        log::debug!(
                            "{} returned {} chars on the {} tier",
                            self.generator.name(),
                            text.len(),
                            tier
                        );
                        return Ok(text);
                    }

                    log::warn!(
                        "{} returned no text on the {} tier (finish_reason={:?})",
                        self.generator.name(),
                        tier,
                        response.finish_reason()
                    );
                }
                Err(e) => {
                    log::warn!(
                        "{} call failed on the {} tier: {}",
                        self.generator.name(),
                        tier,
                        e
                    );
                    attempts.push(GenerationAttempt {
                        prompt: prompt.to_string(),
                        tier,
                        raw_text: String::new(),
                        succeeded: false,
                        finish_reason: None,
                        prompt_feedback: None,
                        error: Some(e.to_string()),
                        started_at,
                    });
                    last_error = Some(e);
                }
            }
        }

        let rung = &attempts[rung_start..];
        if rung.iter().all(|a| a.error.is_some()) {
            if let Some(e) = last_error {
                return Err(e);
            }
        }

        let finish_reason = rung.iter().rev().find_map(|a| a.finish_reason.clone());
        let prompt_feedback = rung.iter().rev().find_map(|a| a.prompt_feedback.clone());

        log::error!(
            "No tier returned content (finish_reason={:?}, prompt_feedback={:?})",
            finish_reason,
            prompt_feedback
        );

        Err(QuizError::EmptyGeneration {
            finish_reason,
            prompt_feedback,
            attempts: attempts.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{MockGenerator, MockReply};

    #[test]
    fn test_first_tier_success_makes_one_call() {
        let mock = Arc::new(MockGenerator::scripted([MockReply::text("Case\n<ans>D</ans>")]));
        let quiz = CaseQuiz::new(mock.clone());

        let traced = quiz.build_quiz_traced("anemia").unwrap();

        assert_eq!(traced.value.correct_answer, AnswerLetter::D);
        assert_eq!(traced.attempts.len(), 1);
        assert_eq!(mock.call_count(), 1);
        assert_eq!(mock.calls()[0].tier, ModelTier::Primary);
    }

    #[test]
    fn test_empty_primary_falls_back_to_secondary() {
        let mock = Arc::new(MockGenerator::scripted([
            MockReply::blocked("SAFETY"),
            MockReply::text("Case\n<ans>B</ans>"),
        ]));
        let quiz = CaseQuiz::new(mock.clone());

        let traced = quiz.build_quiz_traced("overdose").unwrap();

        assert_eq!(traced.value.correct_answer, AnswerLetter::B);
        assert!(!traced.attempts[0].succeeded);
        assert!(traced.attempts[1].succeeded);
        assert_eq!(mock.calls()[1].tier, ModelTier::Secondary);
        assert_eq!(mock.calls()[0].prompt, mock.calls()[1].prompt);
    }

    #[test]
    fn test_empty_generation_carries_last_diagnostics() {
        let mock = MockGenerator::scripted([
            MockReply::Empty {
                finish_reason: Some("SAFETY".into()),
                prompt_feedback: Some("blockReason=SAFETY".into()),
            },
            MockReply::Empty {
                finish_reason: Some("OTHER".into()),
                prompt_feedback: None,
            },
        ]);
        let quiz = CaseQuiz::new(mock);

        let err = quiz.build_quiz("self-harm").unwrap_err();
        match err {
            QuizError::EmptyGeneration {
                finish_reason,
                prompt_feedback,
                attempts,
            } => {
                assert_eq!(finish_reason.as_deref(), Some("OTHER"));
                assert_eq!(prompt_feedback.as_deref(), Some("blockReason=SAFETY"));
                assert_eq!(attempts, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_transport_error_on_primary_falls_back() {
        let mock = Arc::new(MockGenerator::scripted([
            MockReply::Fail("timeout".into()),
            MockReply::text("Case\n<ans>A</ans>"),
        ]));
        let quiz = CaseQuiz::new(mock.clone());

        let traced = quiz.build_quiz_traced("asthma").unwrap();
        assert_eq!(traced.attempts[0].error.as_deref(), Some("Provider error: timeout"));
        assert_eq!(mock.call_count(), 2);
    }

    #[test]
    fn test_transport_errors_on_both_tiers_surface_provider_error() {
        let mock = MockGenerator::scripted([
            MockReply::Fail("dns".into()),
            MockReply::Fail("refused".into()),
        ]);
        let quiz = CaseQuiz::new(mock);

        let err = quiz.build_quiz("asthma").unwrap_err();
        assert!(matches!(err, QuizError::Provider(ref m) if m == "refused"));
    }

    #[test]
    fn test_transport_error_then_empty_is_empty_generation() {
        let mock = MockGenerator::scripted([MockReply::Fail("dns".into()), MockReply::empty()]);
        let quiz = CaseQuiz::new(mock);

        let err = quiz.build_quiz("asthma").unwrap_err();
        assert!(matches!(err, QuizError::EmptyGeneration { attempts: 2, .. }));
    }

    #[test]
    fn test_repair_prompt_wraps_original_output() {
        let mock = Arc::new(MockGenerator::scripted([
            MockReply::text("Case without tag"),
            MockReply::text("Case without tag\n<ans>C</ans>"),
        ]));
        let quiz = CaseQuiz::new(mock.clone());

        let item = quiz.build_quiz("gout").unwrap();

        assert_eq!(item.correct_answer, AnswerLetter::C);
        assert_eq!(item.visible_text, "Case without tag");
        let calls = mock.calls();
        assert!(calls[1].prompt.contains("Content to repair:\nCase without tag"));
        assert_eq!(calls[1].tier, ModelTier::Primary);
    }

    #[test]
    fn test_reveal_explanation_uses_placeholder_for_tag_only_output() {
        let mock = MockGenerator::scripted([MockReply::text("<ans>B</ans>")]);
        let quiz = CaseQuiz::new(mock);

        let explanation = quiz.reveal_explanation("gout", AnswerLetter::B).unwrap();
        assert_eq!(explanation.body, crate::interpret::EXPLANATION_PLACEHOLDER);
        assert_eq!(explanation.correct_answer, AnswerLetter::B);
    }

    #[test]
    fn test_reveal_explanation_empty_everywhere_fails() {
        let quiz = CaseQuiz::new(MockGenerator::always_empty());
        let err = quiz.reveal_explanation("gout", AnswerLetter::A).unwrap_err();
        assert!(matches!(err, QuizError::EmptyGeneration { .. }));
    }
}
