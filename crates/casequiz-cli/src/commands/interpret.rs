//! Interpret command - parse a saved model completion offline.

use std::path::PathBuf;

use casequiz::ResponseInterpreter;
use colored::Colorize;

use super::EngineOptions;

pub fn run(
    options: &EngineOptions,
    file: PathBuf,
    topic: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let raw = std::fs::read_to_string(&file)?;
    let interpreter = ResponseInterpreter::new(options.layout, options.policy);

    let item = interpreter.extract_quiz(topic, &raw)?;

    println!("{}", "Visible text:".cyan().bold());
    println!("{}", item.visible_text);
    println!();
    println!(
        "{} {}",
        "Correct answer:".green().bold(),
        item.correct_answer.to_string().white().bold()
    );

    if let Some(ref body) = item.embedded_explanation {
        println!();
        println!("{}", "Embedded explanation:".cyan().bold());
        println!("{}", body);
    }

    Ok(())
}
