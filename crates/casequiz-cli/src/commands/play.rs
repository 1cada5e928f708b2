//! Play command - interactive question, answer and explanation.

use std::io::{self, BufRead, Write};

use casequiz::{QuizError, QuizSession};
use colored::Colorize;

use super::EngineOptions;

pub fn run(
    options: &EngineOptions,
    topic: &str,
    always_explain: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = options.build_engine()?;
    let mut session = QuizSession::new();

    println!("{} {}", "Generating question on".cyan().bold(), topic.white());
    let item = session.new_question(&engine, topic)?;
    println!();
    println!("{}", item.visible_text);
    println!();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let verdict = loop {
        print!("{} ", "Your answer (A/B/C/D):".yellow().bold());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Err("No answer given".into());
        };
        match session.submit(&line?) {
            Ok(verdict) => break verdict,
            Err(QuizError::InvalidChoice(choice)) => {
                println!("{} '{}' is not one of A, B, C, D", "Invalid:".red(), choice);
            }
            Err(e) => return Err(e.into()),
        }
    };

    println!();
    if verdict.passed {
        println!("{} The answer is {}.", "Correct!".green().bold(), verdict.correct);
    } else {
        println!(
            "{} You chose {}, the answer is {}.",
            "Incorrect.".red().bold(),
            verdict.chosen,
            verdict.correct.to_string().white().bold()
        );
    }

    let wants_explanation = always_explain || {
        print!("{} ", "Show explanation? [y/N]".yellow());
        io::stdout().flush()?;
        lines
            .next()
            .transpose()?
            .map(|l| l.trim().eq_ignore_ascii_case("y"))
            .unwrap_or(false)
    };

    if wants_explanation {
        let explanation = session.reveal(&engine)?;
        println!();
        println!("{}", "Explanation:".cyan().bold());
        println!("{}", explanation.body);
    }

    Ok(())
}
