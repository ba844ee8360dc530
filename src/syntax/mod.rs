//! Syntax highlighting module
//!
//! Provides tree-sitter based tokenization with:
//! - A fixed set of registered languages (TypeScript, TSX)
//! - Embedded highlight queries
//! - Theme color resolution and per-token scope explanations
//!
//! ## Architecture
//!
//! ```text
//! Highlighter::new({themes, langs})        compile grammars + queries once
//!   → code_to_tokens(source, {lang, theme, include_explanation})
//!   → HighlightResult { tokens: lines → tokens }
//! ```

mod error;
mod highlighter;
mod languages;
mod tokens;

pub use error::EngineError;
pub use highlighter::{highlights_query, Highlighter, HighlighterOptions, TokenizeOptions};
pub use languages::{LanguageId, REGISTERED_LANGUAGES};
pub use tokens::{ExplanationMode, HighlightResult, RawLine, RawToken, ScopeExplanation};
