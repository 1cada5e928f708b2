//! CLI command implementations.

pub mod explain;
pub mod generate;
pub mod interpret;
pub mod play;

use casequiz::{
    AnswerPolicy, CaseQuiz, GeminiGenerator, GenerationAttempt, MockGenerator, QuizConfig,
    TagLayout,
};
use colored::Colorize;

use crate::cli::{Cli, ProviderChoice};

/// Engine settings shared by every command.
pub struct EngineOptions {
    pub provider: ProviderChoice,
    pub layout: TagLayout,
    pub policy: AnswerPolicy,
}

impl EngineOptions {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            provider: cli.provider.clone(),
            layout: TagLayout::from(&cli.layout),
            policy: cli.policy(),
        }
    }

    /// Quiz configuration from the environment plus command-line switches.
    pub fn config(&self) -> Result<QuizConfig, Box<dyn std::error::Error>> {
        Ok(QuizConfig::from_env()?
            .with_layout(self.layout)
            .with_policy(self.policy))
    }

    /// Build the quiz engine for the chosen provider.
    pub fn build_engine(&self) -> Result<CaseQuiz, Box<dyn std::error::Error>> {
        let config = self.config()?;

        let engine = match self.provider {
            ProviderChoice::Gemini => {
                let generator = GeminiGenerator::from_env(config.llm.clone())?;
                CaseQuiz::with_config(generator, config)
            }
            ProviderChoice::Mock => CaseQuiz::with_config(MockGenerator::new(), config),
        };

        log::debug!("Using {} provider", self.provider);
        Ok(engine)
    }
}

/// Print the attempt log of one request.
pub fn print_attempts(attempts: &[GenerationAttempt]) {
    println!();
    println!("{}", "Model calls:".yellow().bold());
    for (i, attempt) in attempts.iter().enumerate() {
        let status = if attempt.succeeded {
            "ok".green()
        } else if attempt.error.is_some() {
            "error".red()
        } else {
            "empty".yellow()
        };
        println!(
            "  {}. {:9} {:5} {} chars{}",
            i + 1,
            attempt.tier.to_string(),
            status,
            attempt.raw_text.len(),
            attempt
                .finish_reason
                .as_deref()
                .map(|r| format!(" finish_reason={}", r))
                .unwrap_or_default()
        );
        if let Some(ref err) = attempt.error {
            println!("     {}", err.dimmed());
        }
    }
}
