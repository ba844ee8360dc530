//! Errors raised while building or running the highlighter

use super::languages::LanguageId;

/// Any failure during engine construction or tokenization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Language identifier is not in the registered set
    UnknownLanguage(String),
    /// Language is registered but was not loaded into this highlighter
    LanguageNotLoaded(LanguageId),
    /// Theme identifier was not loaded into this highlighter
    UnknownTheme(String),
    /// Highlighter was constructed without any theme
    NoThemes,
    /// Theme could not be loaded or resolved
    Theme { id: String, message: String },
    /// Grammar or highlight query could not be initialized
    Grammar {
        language: LanguageId,
        message: String,
    },
    /// Parser produced no tree
    Parse(LanguageId),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownLanguage(name) => write!(f, "Language `{}` is not registered", name),
            Self::LanguageNotLoaded(lang) => write!(
                f,
                "Language `{}` was not loaded by this highlighter",
                lang.name()
            ),
            Self::UnknownTheme(id) => write!(f, "Theme `{}` was not loaded", id),
            Self::NoThemes => write!(f, "No themes were provided to the highlighter"),
            Self::Theme { id, message } => write!(f, "Failed to load theme `{}`: {}", id, message),
            Self::Grammar { language, message } => write!(
                f,
                "Failed to initialize {} grammar: {}",
                language.display_name(),
                message
            ),
            Self::Parse(lang) => write!(f, "Parser produced no tree for {}", lang.display_name()),
        }
    }
}

impl std::error::Error for EngineError {}
