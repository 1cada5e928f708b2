//! Fuzz target for ResponseInterpreter.
//!
//! This fuzzer tests that extraction:
//! 1. Never panics on any model output
//! 2. Never leaks tag markup into the visible text
//! 3. Always yields a non-empty explanation

#![no_main]

use casequiz::{AnswerPolicy, ResponseInterpreter, TagLayout};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    let raw = String::from_utf8_lossy(data);

    for layout in [TagLayout::AnswerOnly, TagLayout::AnswerAndExplanation] {
        for policy in [AnswerPolicy::Strict, AnswerPolicy::LetterScan] {
            let interpreter = ResponseInterpreter::new(layout, policy);

            match interpreter.extract_quiz("fuzz", &raw) {
                Ok(item) => {
                    let lower = item.visible_text.to_lowercase();
                    assert!(!lower.contains("<ans>") && !lower.contains("</ans>"));
                }
                Err(_) => assert_eq!(policy, AnswerPolicy::Strict),
            }

            assert!(!interpreter.extract_explanation(&raw).is_empty());
        }
    }
});
