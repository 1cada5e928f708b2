//! Quiz data model and the per-user session.

mod item;
mod letter;
mod session;

pub use item::{Explanation, GenerationAttempt, QuizItem, Verdict};
pub use letter::AnswerLetter;
pub use session::QuizSession;
