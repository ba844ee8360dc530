//! End-to-end highlight runs through the requestor and runtime

mod common;

use std::time::Duration;

use scopelens::projection::ProjectionPolicy;
use scopelens::requestor::{request_highlight, request_highlight_for, HighlightRequest};
use scopelens::runtime::Runtime;
use scopelens::source::SOURCE_DOCUMENT;
use scopelens::syntax::{EngineError, ExplanationMode};
use scopelens::AppModel;

fn settle(request: HighlightRequest) -> Runtime {
    let (model, cmd) = AppModel::init(ProjectionPolicy::default(), request);
    let mut runtime = Runtime::new(model);
    runtime.run_until_settled(cmd, Duration::from_millis(10), |_| {});
    runtime
}

#[test]
fn test_sample_tokens_rebuild_each_line() {
    let result = common::sample_result();
    for (line, tokens) in SOURCE_DOCUMENT.split('\n').zip(&result.tokens) {
        let rebuilt: String = tokens.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(rebuilt, line);
    }
}

#[test]
fn test_sample_tokens_are_explained() {
    let result = common::sample_result();
    for token in result.tokens.iter().flatten() {
        assert!(token.explanation.is_some(), "{:?}", token);
    }
}

#[test]
fn test_typescript_language_highlights_plain_code() {
    let request = HighlightRequest {
        lang: "typescript".to_string(),
        ..HighlightRequest::default()
    };
    let result = request_highlight_for("const answer: number = 42;", &request).unwrap();
    assert_eq!(result.line_count(), 1);
    let number = result.tokens[0]
        .iter()
        .find(|t| t.content == "number")
        .unwrap();
    assert!(number.color.is_some());
}

#[test]
fn test_explanations_can_be_left_out() {
    let request = HighlightRequest {
        explanation: ExplanationMode::None,
        ..HighlightRequest::default()
    };
    let result = request_highlight(&request).unwrap();
    assert!(result.tokens.iter().flatten().all(|t| t.explanation.is_none()));
}

#[test]
fn test_unknown_language_fails() {
    let request = HighlightRequest {
        lang: "cobol".to_string(),
        ..HighlightRequest::default()
    };
    let err = request_highlight(&request).unwrap_err();
    assert_eq!(err, EngineError::UnknownLanguage("cobol".to_string()));
}

#[test]
fn test_unknown_theme_fails_with_cause() {
    let request = HighlightRequest {
        theme: "no-such-theme".to_string(),
        ..HighlightRequest::default()
    };
    let err = request_highlight(&request).unwrap_err();
    assert!(matches!(err, EngineError::Theme { .. }));
    assert!(err.to_string().contains("no-such-theme"), "{}", err);
}

#[test]
fn test_runtime_reaches_ready() {
    let runtime = settle(HighlightRequest::default());
    assert!(!runtime.model.is_loading());
    assert!(runtime.model.error().is_none());
    assert_eq!(
        runtime.model.projection().unwrap().source_text(),
        format!("{}\n", SOURCE_DOCUMENT)
    );
    assert!(!runtime.model.inspection().is_empty());
}

#[test]
fn test_runtime_failure_keeps_views_empty() {
    let runtime = settle(HighlightRequest {
        theme: "no-such-theme".to_string(),
        ..HighlightRequest::default()
    });
    assert!(runtime.model.display().is_empty());
    assert!(runtime.model.inspection().is_empty());
    assert!(runtime.model.error().unwrap().contains("no-such-theme"));
}
