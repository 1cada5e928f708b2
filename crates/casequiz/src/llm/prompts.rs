//! Prompt templates for quiz generation.

use crate::interpret::TagLayout;
use crate::quiz::AnswerLetter;

/// Build the prompt asking for one clinical multiple-choice question.
pub fn question_prompt(topic: &str, layout: TagLayout) -> String {
    let explanation_rule = match layout {
        TagLayout::AnswerOnly => "3) Do NOT show any explanation.".to_string(),
        TagLayout::AnswerAndExplanation => "3) Do NOT show any explanation in the question. \
             Put a short explanation (2-3 sentences) ONLY between <exp></exp>."
            .to_string(),
    };

    format!(
        r#"Generate about {topic}:
1) A brief clinical case (at most 4 lines).
2) One question with options A, B, C, D.
{explanation_rule}
4) Do NOT show the correct answer.
5) At the very end put ONLY the correct letter between <ans></ans>.
   The correct letter must match the options shown and should vary among A/B/C/D.

Strict format, no extra text outside the scheme."#
    )
}

/// Build the prompt asking the model to reformat a previous output.
pub fn repair_prompt(original: &str, layout: TagLayout) -> String {
    let exp_clause = match layout {
        TagLayout::AnswerOnly => "",
        TagLayout::AnswerAndExplanation => " Keep any explanation between <exp></exp>.",
    };

    format!(
        r#"Repair the following content so it follows the requested format and add <ans> with A/B/C/D at the end.{exp_clause}
Do not explain anything else.

Content to repair:
{original}"#
    )
}

/// Build the prompt asking why an option is correct.
pub fn explanation_prompt(topic: &str, correct: AnswerLetter) -> String {
    format!(
        r#"Explain option {correct} for the topic '{topic}':
- Why it is correct.
- Why the other options are not.
- At the end add a reference with a REAL and reliable link (PubMed/NIH/WHO/CDC) that supports the explanation.
Format:
1) Explanation.
2) Reference: Title (URL)"#
    )
}

/// System instruction shared by all calls.
pub fn system_prompt() -> &'static str {
    r#"You are a clinical tutor that writes board-style multiple-choice questions.

Guidelines:
- Write concise, realistic clinical vignettes
- Offer exactly four options labelled A, B, C and D
- Never reveal the answer outside the requested tags
- Follow the requested output format exactly
- Cite only real, verifiable sources when asked for references"#
}
