//! Turns raw model completions into quiz items and explanation bodies.

use serde::{Deserialize, Serialize};

use crate::error::{QuizError, Result};
use crate::quiz::{AnswerLetter, QuizItem};

use super::tags::{self, Marker};

/// Body returned when the model produced no explanation text.
pub const EXPLANATION_PLACEHOLDER: &str = "No explanation was returned by the model.";

/// Which marker tags the model is asked to emit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagLayout {
    /// `<ans>X</ans>` only.
    #[default]
    AnswerOnly,
    /// `<ans>X</ans>` plus `<exp>…</exp>`.
    AnswerAndExplanation,
}

/// What to do when no valid answer tag is present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerPolicy {
    /// Fail with [`QuizError::MissingAnswer`].
    #[default]
    Strict,
    /// Scan for a standalone A/B/C/D token and default to `A`.
    /// Lossy: the letter found may not be the intended answer.
    LetterScan,
}

/// Stateless parser for model output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResponseInterpreter {
    pub layout: TagLayout,
    pub policy: AnswerPolicy,
}

impl ResponseInterpreter {
    pub fn new(layout: TagLayout, policy: AnswerPolicy) -> Self {
        Self { layout, policy }
    }

    /// Extract the visible question and the correct answer from `raw_text`.
    ///
    /// Only the first `<ans>` pair is honored. Under [`AnswerPolicy::Strict`]
    /// a missing or invalid token fails with [`QuizError::MissingAnswer`];
    /// under [`AnswerPolicy::LetterScan`] this never fails.
    pub fn extract_quiz(&self, topic: &str, raw_text: &str) -> Result<QuizItem> {
        let answer_span = tags::find_pair(raw_text, Marker::Answer);
        let explanation_span = match self.layout {
            TagLayout::AnswerOnly => None,
            TagLayout::AnswerAndExplanation => tags::find_pair(raw_text, Marker::Explanation),
        };

        let visible_text = match self.layout {
            TagLayout::AnswerOnly => {
                let end = tags::first_open_marker(raw_text).unwrap_or(raw_text.len());
                clean(&raw_text[..end])
            }
            TagLayout::AnswerAndExplanation => {
                let cuts = answer_span
                    .iter()
                    .chain(explanation_span.iter())
                    .map(|span| span.outer.clone())
                    .collect();
                clean(&tags::cut_ranges(raw_text, cuts))
            }
        };

        let token = answer_span.as_ref().map(|span| span.content(raw_text).trim());
        let correct_answer = match token.and_then(AnswerLetter::parse_token) {
            Some(letter) => letter,
            None => match self.policy {
                AnswerPolicy::Strict => {
                    return Err(QuizError::MissingAnswer {
                        found: token.filter(|t| !t.is_empty()).map(str::to_string),
                    });
                }
                AnswerPolicy::LetterScan => {
                    let letter = scan_fallback(token, raw_text);
                    log::warn!(
                        "No valid <ans> tag for '{}'; letter scan fell back to {}",
                        topic,
                        letter
                    );
                    letter
                }
            },
        };

        let embedded_explanation = explanation_span
            .map(|span| clean(span.content(raw_text)))
            .filter(|body| !body.is_empty());

        Ok(QuizItem {
            topic: topic.to_string(),
            visible_text,
            correct_answer,
            embedded_explanation,
        })
    }

    /// Extract an explanation body. Never fails: an empty result becomes
    /// [`EXPLANATION_PLACEHOLDER`].
    pub fn extract_explanation(&self, raw_text: &str) -> String {
        let tagged = match self.layout {
            TagLayout::AnswerOnly => None,
            TagLayout::AnswerAndExplanation => tags::find_pair(raw_text, Marker::Explanation)
                .map(|span| span.content(raw_text).to_string()),
        };

        let body = match tagged {
            Some(content) => clean(&content),
            None => {
                let cuts = tags::find_pair(raw_text, Marker::Answer)
                    .map(|span| vec![span.outer])
                    .unwrap_or_default();
                clean(&tags::cut_ranges(raw_text, cuts))
            }
        };

        if body.is_empty() {
            EXPLANATION_PLACEHOLDER.to_string()
        } else {
            body
        }
    }
}

fn clean(text: &str) -> String {
    tags::strip_markup(text).trim().to_string()
}

fn scan_fallback(token: Option<&str>, raw_text: &str) -> AnswerLetter {
    token
        .and_then(tags::scan_letter)
        .or_else(|| tags::scan_letter(raw_text))
        .and_then(AnswerLetter::parse_token)
        .unwrap_or(AnswerLetter::A)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict() -> ResponseInterpreter {
        ResponseInterpreter::default()
    }

    fn lossy() -> ResponseInterpreter {
        ResponseInterpreter::new(TagLayout::AnswerOnly, AnswerPolicy::LetterScan)
    }

    fn two_tag() -> ResponseInterpreter {
        ResponseInterpreter::new(TagLayout::AnswerAndExplanation, AnswerPolicy::Strict)
    }

    #[test]
    fn test_extract_basic_answer() {
        let item = strict()
            .extract_quiz("sepsis", "Case... Question...\n<ans>C</ans>")
            .unwrap();
        assert_eq!(item.visible_text, "Case... Question...");
        assert_eq!(item.correct_answer, AnswerLetter::C);
        assert_eq!(item.topic, "sepsis");
        assert!(item.embedded_explanation.is_none());
    }

    #[test]
    fn test_extract_discards_trailing_text() {
        let item = strict()
            .extract_quiz("t", "Stem\nA) x\nB) y\n<ans> b </ans>\nThe answer is B because...")
            .unwrap();
        assert_eq!(item.visible_text, "Stem\nA) x\nB) y");
        assert_eq!(item.correct_answer, AnswerLetter::B);
    }

    #[test]
    fn test_strict_missing_tag() {
        let err = strict().extract_quiz("t", "No tag here at all").unwrap_err();
        assert!(matches!(err, QuizError::MissingAnswer { found: None }));
    }

    #[test]
    fn test_strict_invalid_token_is_reported() {
        let err = strict().extract_quiz("t", "Stem <ans>E</ans>").unwrap_err();
        assert!(matches!(err, QuizError::MissingAnswer { found: Some(ref f) } if f == "E"));
    }

    #[test]
    fn test_strict_empty_tag() {
        let err = strict().extract_quiz("t", "Stem <ans>  </ans>").unwrap_err();
        assert!(matches!(err, QuizError::MissingAnswer { found: None }));
    }

    #[test]
    fn test_lossy_defaults_to_a() {
        let item = lossy().extract_quiz("t", "nothing usable here").unwrap();
        assert_eq!(item.correct_answer, AnswerLetter::A);
        assert_eq!(item.visible_text, "nothing usable here");
    }

    #[test]
    fn test_lossy_scans_tag_content_before_full_text() {
        let item = lossy()
            .extract_quiz("t", "A) one\nB) two\n<ans>Option D</ans>")
            .unwrap();
        assert_eq!(item.correct_answer, AnswerLetter::D);
        assert_eq!(item.visible_text, "A) one\nB) two");
    }

    #[test]
    fn test_lossy_scans_full_text() {
        let item = lossy().extract_quiz("t", "the right option is C.").unwrap();
        assert_eq!(item.correct_answer, AnswerLetter::C);
    }

    #[test]
    fn test_two_tag_layout_cuts_both_spans() {
        let raw = "Case\n<exp>Because of X.</exp>\nQuestion?\nA) a\n<ans>A</ans>";
        let item = two_tag().extract_quiz("t", raw).unwrap();
        assert_eq!(item.visible_text, "Case\n\nQuestion?\nA) a");
        assert_eq!(item.correct_answer, AnswerLetter::A);
        assert_eq!(item.embedded_explanation.as_deref(), Some("Because of X."));
    }

    #[test]
    fn test_answer_only_layout_stops_at_first_marker() {
        let raw = "Case\n<exp>leaks D</exp>\n<ans>D</ans>";
        let item = strict().extract_quiz("t", raw).unwrap();
        assert_eq!(item.visible_text, "Case");
        assert!(item.embedded_explanation.is_none());
    }

    #[test]
    fn test_stray_markup_removed_from_visible_text() {
        let raw = "Case</ans>\n<ans>B</ans>";
        let item = strict().extract_quiz("t", raw).unwrap();
        assert_eq!(item.visible_text, "Case");
    }

    #[test]
    fn test_explanation_whole_text_when_untagged() {
        let body = strict().extract_explanation("  1) Because.\n2) Reference: X (https://x)  ");
        assert_eq!(body, "1) Because.\n2) Reference: X (https://x)");
    }

    #[test]
    fn test_explanation_uses_tag_in_two_tag_layout() {
        let body = two_tag().extract_explanation("noise <exp> The reason </exp> <ans>B</ans>");
        assert_eq!(body, "The reason");
    }

    #[test]
    fn test_embedded_explanation_matches_extracted_explanation() {
        let raw = "Case\n<exp>Because <ans>B</ans> fits.</exp>\n<ans>B</ans>";
        let interpreter = two_tag();

        let item = interpreter.extract_quiz("t", raw).unwrap();

        assert_eq!(item.embedded_explanation.as_deref(), Some("Because B fits."));
        assert_eq!(
            item.embedded_explanation.as_deref(),
            Some(interpreter.extract_explanation(raw).as_str())
        );
    }

    #[test]
    fn test_explanation_placeholder_when_empty() {
        assert_eq!(strict().extract_explanation("   "), EXPLANATION_PLACEHOLDER);
        assert_eq!(two_tag().extract_explanation("<exp> </exp>"), EXPLANATION_PLACEHOLDER);
        assert_eq!(strict().extract_explanation("<ans>C</ans>"), EXPLANATION_PLACEHOLDER);
    }

    #[test]
    fn test_extract_is_idempotent() {
        let raw = "Case\n<ans>d</ans>";
        let first = strict().extract_quiz("t", raw).unwrap();
        let second = strict().extract_quiz("t", raw).unwrap();
        assert_eq!(first, second);
    }
}
