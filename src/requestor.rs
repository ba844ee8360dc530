//! Highlight requests
//!
//! Builds a highlighter for the registered languages and the requested theme,
//! then tokenizes the sample document with scope explanations.

use crate::source::SOURCE_DOCUMENT;
use crate::syntax::{
    EngineError, ExplanationMode, HighlightResult, Highlighter, HighlighterOptions,
    TokenizeOptions, REGISTERED_LANGUAGES,
};
use crate::theme::{self, DEFAULT_THEME_ID};

/// What to highlight the sample document with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightRequest {
    pub lang: String,
    pub theme: String,
    pub explanation: ExplanationMode,
}

impl Default for HighlightRequest {
    fn default() -> Self {
        Self {
            lang: "tsx".to_string(),
            theme: DEFAULT_THEME_ID.to_string(),
            explanation: ExplanationMode::ScopeName,
        }
    }
}

/// Highlight the sample document
pub fn request_highlight(request: &HighlightRequest) -> Result<HighlightResult, EngineError> {
    request_highlight_for(SOURCE_DOCUMENT, request)
}

/// Highlight arbitrary text with the same engine setup
pub fn request_highlight_for(
    source: &str,
    request: &HighlightRequest,
) -> Result<HighlightResult, EngineError> {
    let _span = tracing::info_span!("highlight", lang = %request.lang, theme = %request.theme)
        .entered();

    let theme = theme::load_theme(&request.theme).map_err(|message| EngineError::Theme {
        id: request.theme.clone(),
        message,
    })?;

    let highlighter = Highlighter::new(HighlighterOptions {
        themes: vec![theme],
        langs: REGISTERED_LANGUAGES.to_vec(),
    })?;
    tracing::debug!(
        "Highlighter ready for {:?}",
        highlighter.languages().collect::<Vec<_>>()
    );

    let result = highlighter.code_to_tokens(
        source,
        &TokenizeOptions {
            lang: &request.lang,
            theme: &request.theme,
            include_explanation: request.explanation,
        },
    );

    match &result {
        Ok(tokens) => tracing::info!(
            "Highlighted {} lines ({} tokens)",
            tokens.line_count(),
            tokens.token_count()
        ),
        Err(e) => tracing::error!("Highlight failed: {}", e),
    }
    result
}
