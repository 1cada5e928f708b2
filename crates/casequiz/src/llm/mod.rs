//! Text generator integration.
//!
//! The quiz engine only depends on the narrow [`TextGenerator`] trait:
//! send a prompt to a [`ModelTier`], get back a [`RawResponse`] with zero
//! or more candidates.
//!
//! # Supported Generators
//!
//! - **Gemini** - Google generative language API (requires `GEMINI_API_KEY`)
//! - **Mock** - scripted replies, no network (for tests and demos)
//!
//! # Example
//!
//! ```no_run
//! use casequiz::{CaseQuiz, GeminiGenerator, LlmConfig};
//!
//! let generator = GeminiGenerator::from_env(LlmConfig::default()).unwrap();
//! let quiz = CaseQuiz::new(generator);
//! let item = quiz.build_quiz("diabetic ketoacidosis").unwrap();
//! println!("{}", item.visible_text);
//! ```

mod gemini;
mod mock;
pub mod prompts;
mod provider;

pub use gemini::GeminiGenerator;
pub use mock::{MockCall, MockGenerator, MockReply};
pub use provider::{Candidate, LlmConfig, ModelTier, Part, RawResponse, TextGenerator};
