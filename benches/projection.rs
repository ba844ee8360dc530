//! Benchmarks for highlighting and projection
//!
//! Run with: cargo bench --bench projection

use scopelens::projection::{project, ProjectionPolicy};
use scopelens::requestor::{request_highlight_for, HighlightRequest};
use scopelens::source::SOURCE_DOCUMENT;
use scopelens::syntax::{
    Highlighter, HighlighterOptions, TokenizeOptions, REGISTERED_LANGUAGES,
};
use scopelens::theme::{Theme, DEFAULT_THEME_ID};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

fn highlighter() -> Highlighter {
    let theme = Theme::from_builtin(DEFAULT_THEME_ID).unwrap();
    Highlighter::new(HighlighterOptions {
        themes: vec![theme],
        langs: REGISTERED_LANGUAGES.to_vec(),
    })
    .unwrap()
}

fn sample_of(lines: usize) -> String {
    let mut source = String::new();
    while source.lines().count() < lines {
        source.push_str(SOURCE_DOCUMENT);
        source.push('\n');
    }
    source
}

// ============================================================================
// Engine setup
// ============================================================================

#[divan::bench]
fn build_highlighter() -> Highlighter {
    highlighter()
}

// ============================================================================
// Tokenization
// ============================================================================

#[divan::bench(args = [10, 100, 1000])]
fn tokenize(bencher: divan::Bencher, lines: usize) {
    let highlighter = highlighter();
    let source = sample_of(lines);
    let options = TokenizeOptions {
        lang: "tsx",
        theme: DEFAULT_THEME_ID,
        include_explanation: Default::default(),
    };

    bencher.bench_local(|| {
        highlighter
            .code_to_tokens(divan::black_box(&source), &options)
            .unwrap()
    });
}

// ============================================================================
// Projection
// ============================================================================

#[divan::bench(args = [10, 100, 1000])]
fn project_tokens(bencher: divan::Bencher, lines: usize) {
    let result = request_highlight_for(&sample_of(lines), &HighlightRequest::default()).unwrap();
    let policy = ProjectionPolicy::default();

    bencher.bench_local(|| project(divan::black_box(&result), &policy));
}
