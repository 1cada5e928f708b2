//! Generate command - build one question and print it.

use colored::Colorize;

use super::{EngineOptions, print_attempts};

pub fn run(
    options: &EngineOptions,
    topic: &str,
    json_output: bool,
    show_answer: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if topic.trim().is_empty() {
        return Err("Topic must not be empty".into());
    }

    let engine = options.build_engine()?;
    let traced = engine.build_quiz_traced(topic)?;
    let item = &traced.value;

    if json_output {
        let output = serde_json::json!({
            "item": item,
            "attempts": traced.attempts.len(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{} {}", "Topic:".cyan().bold(), topic.white());
    println!();
    println!("{}", item.visible_text);

    if show_answer {
        println!();
        println!(
            "{} {}",
            "Correct answer:".green().bold(),
            item.correct_answer.to_string().white().bold()
        );
    }

    if verbose {
        print_attempts(&traced.attempts);
    }

    Ok(())
}
