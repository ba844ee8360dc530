//! Highlight result data structures
//!
//! The engine's output is line oriented: a document is an ordered list of
//! lines, each an ordered list of tokens.

use serde::Serialize;

/// How much scope information the engine attaches to each token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExplanationMode {
    /// No explanation; `RawToken::explanation` stays `None`
    None,
    /// The chain of matched scope names, outermost first
    #[default]
    ScopeName,
}

/// One scope that matched at a token's position
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopeExplanation {
    pub scope_name: String,
}

impl ScopeExplanation {
    pub fn new(scope_name: impl Into<String>) -> Self {
        Self {
            scope_name: scope_name.into(),
        }
    }
}

/// A contiguous run of source text with a single color and scope chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawToken {
    /// Source text covered by this token
    pub content: String,
    /// Resolved theme color as a hex string, if the theme styles this token
    pub color: Option<String>,
    /// Matched scopes, present only when explanations were requested
    pub explanation: Option<Vec<ScopeExplanation>>,
}

/// Tokens of a single source line
pub type RawLine = Vec<RawToken>;

/// Complete tokenization of a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HighlightResult {
    pub tokens: Vec<RawLine>,
}

impl HighlightResult {
    /// Number of lines
    pub fn line_count(&self) -> usize {
        self.tokens.len()
    }

    /// Number of tokens across all lines
    pub fn token_count(&self) -> usize {
        self.tokens.iter().map(Vec::len).sum()
    }
}
