//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use casequiz::{AnswerPolicy, TagLayout};

/// casequiz: clinical multiple-choice questions from a hosted LLM
#[derive(Parser)]
#[command(name = "casequiz")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Text generator to use
    #[arg(long, global = true, default_value = "gemini")]
    pub provider: ProviderChoice,

    /// Marker tags the model is asked to emit
    #[arg(long, global = true, default_value = "answer")]
    pub layout: LayoutChoice,

    /// Fall back to scanning for a standalone A-D letter (default A) instead of failing
    #[arg(long, global = true)]
    pub lossy: bool,
}

impl Cli {
    pub fn policy(&self) -> AnswerPolicy {
        if self.lossy {
            AnswerPolicy::LetterScan
        } else {
            AnswerPolicy::Strict
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate one question and print it
    Generate {
        /// Topic for the clinical case (e.g., "septic shock")
        #[arg(value_name = "TOPIC")]
        topic: String,

        /// Output as JSON, including the hidden answer
        #[arg(long)]
        json: bool,

        /// Print the correct answer after the question
        #[arg(long)]
        show_answer: bool,
    },

    /// Explain why an option is correct for a topic
    Explain {
        /// Topic the question was about
        #[arg(value_name = "TOPIC")]
        topic: String,

        /// The correct option (A, B, C or D)
        #[arg(value_name = "LETTER")]
        answer: String,
    },

    /// Generate a question, read an answer from stdin, grade it
    Play {
        /// Topic for the clinical case
        #[arg(value_name = "TOPIC")]
        topic: String,

        /// Show the explanation without asking
        #[arg(long)]
        explain: bool,
    },

    /// Run the response interpreter over a saved model completion
    Interpret {
        /// File holding the raw completion text
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Topic to attach to the parsed item
        #[arg(long, default_value = "unknown")]
        topic: String,
    },
}

/// Text generator choice
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ProviderChoice {
    /// Google Gemini API (requires GEMINI_API_KEY)
    #[default]
    Gemini,
    /// Mock generator for offline use
    Mock,
}

impl std::str::FromStr for ProviderChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" | "google" => Ok(ProviderChoice::Gemini),
            "mock" | "test" => Ok(ProviderChoice::Mock),
            _ => Err(format!("Unknown provider: {}. Use: gemini or mock.", s)),
        }
    }
}

impl std::fmt::Display for ProviderChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderChoice::Gemini => write!(f, "gemini"),
            ProviderChoice::Mock => write!(f, "mock"),
        }
    }
}

/// Tag layout choice
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LayoutChoice {
    /// `<ans>` only
    #[default]
    Answer,
    /// `<ans>` plus `<exp>`
    AnswerExplanation,
}

impl From<&LayoutChoice> for TagLayout {
    fn from(choice: &LayoutChoice) -> Self {
        match choice {
            LayoutChoice::Answer => TagLayout::AnswerOnly,
            LayoutChoice::AnswerExplanation => TagLayout::AnswerAndExplanation,
        }
    }
}

impl std::str::FromStr for LayoutChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "answer" | "ans" => Ok(LayoutChoice::Answer),
            "answer-explanation" | "ans-exp" | "both" => Ok(LayoutChoice::AnswerExplanation),
            _ => Err(format!(
                "Unknown layout: {}. Use: answer or answer-explanation.",
                s
            )),
        }
    }
}

impl std::fmt::Display for LayoutChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutChoice::Answer => write!(f, "answer"),
            LayoutChoice::AnswerExplanation => write!(f, "answer-explanation"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate_with_globals() {
        let cli = Cli::try_parse_from([
            "casequiz",
            "generate",
            "septic shock",
            "--provider",
            "mock",
            "--layout",
            "both",
            "--lossy",
        ])
        .unwrap();

        assert_eq!(cli.provider, ProviderChoice::Mock);
        assert_eq!(cli.layout, LayoutChoice::AnswerExplanation);
        assert_eq!(cli.policy(), AnswerPolicy::LetterScan);
        assert!(
            matches!(cli.command, Commands::Generate { ref topic, .. } if topic == "septic shock")
        );
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["casequiz", "explain", "gout", "b"]).unwrap();
        assert_eq!(cli.provider, ProviderChoice::Gemini);
        assert_eq!(TagLayout::from(&cli.layout), TagLayout::AnswerOnly);
        assert_eq!(cli.policy(), AnswerPolicy::Strict);
    }

    #[test]
    fn test_unknown_provider_rejected() {
        assert!("openai".parse::<ProviderChoice>().is_err());
    }
}
