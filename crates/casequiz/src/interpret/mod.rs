//! Response interpretation: marker tags, answer validation, explanation bodies.
//!
//! Models are asked to append the correct option as `<ans>X</ans>` (and,
//! in the two-tag layout, an explanation as `<exp>…</exp>`). Everything
//! here is a pure function over the completion text, so it can be tested
//! without any model at all.
//!
//! # Example
//!
//! ```
//! use casequiz::{AnswerLetter, ResponseInterpreter};
//!
//! let interpreter = ResponseInterpreter::default();
//! let item = interpreter
//!     .extract_quiz("sepsis", "Case... Question...\n<ans>C</ans>")
//!     .unwrap();
//!
//! assert_eq!(item.visible_text, "Case... Question...");
//! assert_eq!(item.correct_answer, AnswerLetter::C);
//! ```

mod interpreter;
mod tags;

pub use interpreter::{AnswerPolicy, EXPLANATION_PLACEHOLDER, ResponseInterpreter, TagLayout};
