//! casequiz: clinical multiple-choice quiz generation on top of hosted LLMs.
//!
//! A model is prompted for a short clinical case with options A–D and the
//! correct letter hidden in an `<ans>` tag. The response is parsed into a
//! visible question and a validated answer; malformed output gets one
//! repair pass, and empty output falls back from the primary model tier to
//! a lighter one.
//!
//! # Core Principles
//!
//! - **Never guess silently**: a missing answer is an error unless the lossy
//!   letter-scan policy is explicitly chosen
//! - **Bounded retries**: at most four sequential model calls per question
//! - **Vendor-neutral core**: parsing and retry logic only see [`TextGenerator`]
//!
//! # Example
//!
//! ```
//! use casequiz::{CaseQuiz, MockGenerator, QuizSession};
//!
//! let quiz = CaseQuiz::new(MockGenerator::new());
//! let mut session = QuizSession::new();
//!
//! let item = session.new_question(&quiz, "septic shock").unwrap();
//! println!("{}", item.visible_text);
//!
//! let verdict = session.submit("C").unwrap();
//! println!("Correct answer: {}", verdict.correct);
//! ```

pub mod config;
pub mod error;
pub mod interpret;
pub mod llm;
pub mod quiz;

mod casequiz;

pub use crate::casequiz::{CaseQuiz, Traced};
pub use config::QuizConfig;
pub use error::{QuizError, Result};
pub use interpret::{AnswerPolicy, EXPLANATION_PLACEHOLDER, ResponseInterpreter, TagLayout};
pub use llm::{
    GeminiGenerator, LlmConfig, MockGenerator, MockReply, ModelTier, RawResponse, TextGenerator,
};
pub use quiz::{AnswerLetter, Explanation, GenerationAttempt, QuizItem, QuizSession, Verdict};
