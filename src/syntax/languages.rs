//! Language identification
//!
//! Maps language names to language IDs and provides language metadata.
//! Only the TypeScript family is registered; TSX is a strict superset
//! grammar of TypeScript.

/// Supported language identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LanguageId {
    TypeScript,
    #[default]
    Tsx,
}

/// Every language the highlighter knows how to load
pub const REGISTERED_LANGUAGES: &[LanguageId] = &[LanguageId::Tsx, LanguageId::TypeScript];

impl LanguageId {
    /// Look up a language by the identifier used in requests
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "typescript" | "ts" | "mts" | "cts" => Some(LanguageId::TypeScript),
            "tsx" => Some(LanguageId::Tsx),
            _ => None,
        }
    }

    /// Canonical request identifier
    pub fn name(&self) -> &'static str {
        match self {
            LanguageId::TypeScript => "typescript",
            LanguageId::Tsx => "tsx",
        }
    }

    /// Get display name for the language
    pub fn display_name(&self) -> &'static str {
        match self {
            LanguageId::TypeScript => "TypeScript",
            LanguageId::Tsx => "TSX",
        }
    }

    pub(crate) fn grammar(&self) -> tree_sitter::Language {
        match self {
            LanguageId::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            LanguageId::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

impl std::fmt::Display for LanguageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
