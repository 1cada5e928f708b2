//! Example: Run one quiz round against the offline mock generator.
//!
//! Usage:
//!   cargo run --example mock_quiz -- [topic]
//!
//! Example:
//!   cargo run --example mock_quiz -- "diabetic ketoacidosis"

use std::env;

use casequiz::{CaseQuiz, MockGenerator, QuizSession};

fn main() -> casequiz::Result<()> {
    let topic = env::args()
        .nth(1)
        .unwrap_or_else(|| "septic shock".to_string());

    let separator = "=".repeat(60);
    println!("{}", separator);
    println!("Case quiz: {}", topic);
    println!("{}", separator);
    println!();

    // Canned responses, no API key needed
    let quiz = CaseQuiz::new(MockGenerator::new());
    let mut session = QuizSession::new();

    let traced = quiz.build_quiz_traced(&topic)?;
    println!("{}", traced.value.visible_text);
    println!();
    println!("Model calls: {}", traced.attempts.len());
    for attempt in &traced.attempts {
        println!(
            "  {}: {}",
            attempt.tier,
            if attempt.succeeded { "ok" } else { "empty" }
        );
    }

    session.load(traced.value);
    let answer = session
        .current()
        .map(|item| item.correct_answer.to_string())
        .unwrap_or_default();
    let verdict = session.submit(&answer)?;
    println!();
    println!("Submitted {} -> passed: {}", verdict.chosen, verdict.passed);

    let explanation = session.reveal(&quiz)?;
    println!();
    println!("Explanation:");
    println!("{}", explanation.body);

    Ok(())
}
