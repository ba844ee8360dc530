//! Token projection
//!
//! Flattens a line-oriented [`HighlightResult`] into the two views the
//! renderer consumes:
//!
//! - the **display sequence**: one [`DisplayToken`] per raw token, with a
//!   synthetic line-break entry after every line, so concatenating the
//!   contents rebuilds the source with each line terminated by `"\n"`;
//! - the **inspection list**: the display entries that carry visible text,
//!   each paired with its scope path.
//!
//! Projection is pure: the same result and policy always give an equal
//! [`Projection`].

use serde::Serialize;

use crate::syntax::{HighlightResult, RawToken, ScopeExplanation};

/// Color for tokens the theme leaves unstyled
pub const DEFAULT_COLOR: &str = "#fff";
/// Joins scope names into a scope path
pub const SCOPE_SEPARATOR: &str = " > ";
/// Scope path of a token without explanation
pub const UNKNOWN_SCOPE: &str = "unknown";
/// Scope path of the synthetic line-break entries
pub const NEWLINE_SCOPE: &str = "newline";

/// Presentation rules applied while projecting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionPolicy {
    pub default_color: String,
    pub separator: String,
    pub unknown_scope: String,
}

impl Default for ProjectionPolicy {
    fn default() -> Self {
        Self {
            default_color: DEFAULT_COLOR.to_string(),
            separator: SCOPE_SEPARATOR.to_string(),
            unknown_scope: UNKNOWN_SCOPE.to_string(),
        }
    }
}

/// Whether a display entry came from the engine or marks a line end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Ordinary,
    LineBreak,
}

/// A render-ready token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayToken {
    pub content: String,
    /// Always concrete; unstyled tokens get the policy's default color
    pub color: String,
    /// Scope path, e.g. "meta.tag > tag"
    pub scopes: String,
    pub kind: TokenKind,
}

impl DisplayToken {
    fn line_break(policy: &ProjectionPolicy) -> Self {
        Self {
            content: "\n".to_string(),
            color: policy.default_color.clone(),
            scopes: NEWLINE_SCOPE.to_string(),
            kind: TokenKind::LineBreak,
        }
    }

    pub fn is_line_break(&self) -> bool {
        self.kind == TokenKind::LineBreak
    }

    /// Whether this entry belongs in the inspection list
    pub fn is_inspectable(&self) -> bool {
        !self.is_line_break() && self.scopes != NEWLINE_SCOPE && !self.content.trim().is_empty()
    }
}

/// Both derived views of a highlight result
///
/// The inspection list is stored as indices into the display sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    display: Vec<DisplayToken>,
    inspection: Vec<usize>,
}

impl Projection {
    /// The flat display sequence
    pub fn display(&self) -> &[DisplayToken] {
        &self.display
    }

    /// Inspection entries in display order
    pub fn inspection(&self) -> impl Iterator<Item = &DisplayToken> + '_ {
        self.inspection.iter().map(|&i| &self.display[i])
    }

    pub fn inspection_len(&self) -> usize {
        self.inspection.len()
    }

    /// Display contents concatenated, i.e. the source with a trailing newline
    pub fn source_text(&self) -> String {
        self.display.iter().map(|t| t.content.as_str()).collect()
    }

    /// Display entries grouped by line, without the line-break markers
    pub fn lines(&self) -> impl Iterator<Item = &[DisplayToken]> + '_ {
        self.display
            .split_inclusive(DisplayToken::is_line_break)
            .map(|line| match line.split_last() {
                Some((last, rest)) if last.is_line_break() => rest,
                _ => line,
            })
    }
}

/// Build the scope path for a token's explanation
pub fn scope_path(explanation: Option<&[ScopeExplanation]>, policy: &ProjectionPolicy) -> String {
    match explanation {
        Some(entries) if !entries.is_empty() => entries
            .iter()
            .map(|e| e.scope_name.as_str())
            .collect::<Vec<_>>()
            .join(policy.separator.as_str()),
        _ => policy.unknown_scope.clone(),
    }
}

fn display_token(token: &RawToken, policy: &ProjectionPolicy) -> DisplayToken {
    DisplayToken {
        content: token.content.clone(),
        color: token
            .color
            .clone()
            .unwrap_or_else(|| policy.default_color.clone()),
        scopes: scope_path(token.explanation.as_deref(), policy),
        kind: TokenKind::Ordinary,
    }
}

/// Flatten a highlight result into display and inspection views
pub fn project(result: &HighlightResult, policy: &ProjectionPolicy) -> Projection {
    let mut display = Vec::with_capacity(result.token_count() + result.line_count());
    for line in &result.tokens {
        display.extend(line.iter().map(|token| display_token(token, policy)));
        display.push(DisplayToken::line_break(policy));
    }

    let inspection = display
        .iter()
        .enumerate()
        .filter(|(_, token)| token.is_inspectable())
        .map(|(i, _)| i)
        .collect();

    Projection {
        display,
        inspection,
    }
}
