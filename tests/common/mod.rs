//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use scopelens::projection::{project, Projection, ProjectionPolicy};
use scopelens::requestor::{request_highlight, request_highlight_for, HighlightRequest};
use scopelens::syntax::{HighlightResult, RawToken, ScopeExplanation};

/// Highlight the sample document with the default request
pub fn sample_result() -> HighlightResult {
    request_highlight(&HighlightRequest::default()).expect("sample should highlight")
}

/// Project the sample document with the default policy
pub fn sample_projection() -> Projection {
    project(&sample_result(), &ProjectionPolicy::default())
}

/// Highlight and project arbitrary TSX
pub fn project_tsx(source: &str) -> Projection {
    let result = request_highlight_for(source, &HighlightRequest::default())
        .expect("source should highlight");
    project(&result, &ProjectionPolicy::default())
}

/// A raw token explained by the given scopes, outermost first
pub fn raw(content: &str, color: Option<&str>, scopes: &[&str]) -> RawToken {
    RawToken {
        content: content.to_string(),
        color: color.map(str::to_string),
        explanation: Some(scopes.iter().map(|s| ScopeExplanation::new(*s)).collect()),
    }
}

/// A raw token without any explanation
pub fn raw_unexplained(content: &str) -> RawToken {
    RawToken {
        content: content.to_string(),
        color: None,
        explanation: None,
    }
}
