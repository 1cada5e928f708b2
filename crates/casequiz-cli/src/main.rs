//! casequiz CLI - clinical multiple-choice questions from a hosted LLM.

mod cli;
mod commands;

use std::error::Error;

use casequiz::QuizError;
use clap::Parser;
use cli::{Cli, Commands};
use commands::EngineOptions;

fn main() {
    // A missing .env file is fine; real environment variables still apply.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = EngineOptions::from_cli(&cli);

    let result = match cli.command {
        Commands::Generate {
            topic,
            json,
            show_answer,
        } => commands::generate::run(&options, &topic, json, show_answer, cli.verbose),

        Commands::Explain { topic, answer } => {
            commands::explain::run(&options, &topic, &answer, cli.verbose)
        }

        Commands::Play { topic, explain } => {
            commands::play::run(&options, &topic, explain)
        }

        Commands::Interpret { file, topic } => commands::interpret::run(&options, file, &topic),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        if let Some(hint) = format_hint(e.as_ref()) {
            eprintln!("{}", hint);
        }
        std::process::exit(1);
    }
}

/// Extra advice when the model answered but never produced a usable answer tag.
fn format_hint(err: &(dyn Error + 'static)) -> Option<&'static str> {
    err.downcast_ref::<QuizError>()
        .filter(|e| e.is_format_error())
        .map(|_| "Hint: rerun with --lossy to accept a scanned answer letter instead.")
}

/// `RUST_LOG` wins; otherwise warnings, or debug with `--verbose`.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "casequiz=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}
