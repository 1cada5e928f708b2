//! Explain command - explain why an option is correct.

use casequiz::AnswerLetter;
use colored::Colorize;

use super::{EngineOptions, print_attempts};

pub fn run(
    options: &EngineOptions,
    topic: &str,
    answer: &str,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let letter: AnswerLetter = answer.parse()?;

    let engine = options.build_engine()?;
    let traced = engine.reveal_explanation_traced(topic, letter)?;

    println!(
        "{} option {} for {}",
        "Explanation:".cyan().bold(),
        letter.to_string().white().bold(),
        topic.white()
    );
    println!();
    println!("{}", traced.value.body);

    if verbose {
        print_attempts(&traced.attempts);
    }

    Ok(())
}
