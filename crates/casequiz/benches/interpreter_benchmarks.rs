//! Interpreter performance benchmarks.
//!
//! Measures tag extraction across response sizes and both tag layouts.

use casequiz::{AnswerPolicy, ResponseInterpreter, TagLayout};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

/// Generate a synthetic case vignette with `sentences` lines of history.
fn generate_response(sentences: usize, with_explanation: bool) -> String {
    let mut data = String::new();

    for i in 0..sentences {
        data.push_str(&format!(
            "On day {} the patient reported worsening dyspnea and a heart rate of {}.\n",
            i + 1,
            90 + i % 40
        ));
    }
    data.push_str("Which is the most appropriate next step?\n");
    data.push_str("A) Observation\nB) Antibiotics\nC) Surgery\nD) Discharge\n");

    if with_explanation {
        data.push_str("<exp>Early antibiotics reduce mortality in sepsis.</exp>\n");
    }
    data.push_str("<ans>B</ans>");
    data
}

/// Benchmark answer-only extraction across response sizes.
fn bench_extract_answer_only(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_answer_only");
    let interpreter = ResponseInterpreter::default();

    for sentences in [5, 50, 500].iter() {
        let data = generate_response(*sentences, false);

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("sentences", sentences), &data, |b, data| {
            b.iter(|| black_box(interpreter.extract_quiz("sepsis", data).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark two-tag extraction across response sizes.
fn bench_extract_two_tags(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_two_tags");
    let interpreter =
        ResponseInterpreter::new(TagLayout::AnswerAndExplanation, AnswerPolicy::Strict);

    for sentences in [5, 50, 500].iter() {
        let data = generate_response(*sentences, true);

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("sentences", sentences), &data, |b, data| {
            b.iter(|| black_box(interpreter.extract_quiz("sepsis", data).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark the letter scan on untagged text, the slowest path.
fn bench_letter_scan(c: &mut Criterion) {
    let interpreter = ResponseInterpreter::new(TagLayout::AnswerOnly, AnswerPolicy::LetterScan);
    let data = generate_response(200, false).replace("<ans>B</ans>", "");

    c.bench_function("letter_scan_untagged", |b| {
        b.iter(|| black_box(interpreter.extract_quiz("sepsis", &data).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_extract_answer_only,
    bench_extract_two_tags,
    bench_letter_scan,
);
criterion_main!(benches);
