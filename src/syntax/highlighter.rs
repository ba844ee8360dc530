//! Tree-sitter backed highlighter
//!
//! Parses a document, runs the embedded highlight queries over it and turns
//! the resulting captures into line-oriented tokens. Each token is a maximal
//! run of text over which the stack of enclosing captures does not change,
//! so every byte of every line lands in exactly one token.

use std::cmp::Reverse;
use std::collections::HashMap;

use streaming_iterator::StreamingIterator;
use tree_sitter::{Parser, Query, QueryCursor, Tree};

use super::error::EngineError;
use super::languages::LanguageId;
use super::tokens::{ExplanationMode, HighlightResult, RawLine, RawToken, ScopeExplanation};
use crate::theme::Theme;

// Embedded query files
const TYPESCRIPT_HIGHLIGHTS: &str = include_str!("../../queries/typescript/highlights.scm");
const TSX_HIGHLIGHTS: &str = include_str!("../../queries/tsx/highlights.scm");

/// Full highlight query source for a language
///
/// TSX patterns come first: for identical nodes the earliest pattern wins.
pub fn highlights_query(lang: LanguageId) -> String {
    match lang {
        LanguageId::TypeScript => TYPESCRIPT_HIGHLIGHTS.to_string(),
        LanguageId::Tsx => format!("{}\n{}", TSX_HIGHLIGHTS, TYPESCRIPT_HIGHLIGHTS),
    }
}

/// Construction options: what the highlighter loads up front
#[derive(Debug, Clone)]
pub struct HighlighterOptions {
    pub themes: Vec<Theme>,
    pub langs: Vec<LanguageId>,
}

/// Per-call tokenization options
#[derive(Debug, Clone, Copy)]
pub struct TokenizeOptions<'a> {
    /// Language identifier, e.g. "tsx"
    pub lang: &'a str,
    /// Theme id, e.g. "catppuccin-mocha"
    pub theme: &'a str,
    pub include_explanation: ExplanationMode,
}

/// A grammar with its compiled highlight query
struct LoadedLanguage {
    grammar: tree_sitter::Language,
    query: Query,
}

/// A captured node, in source byte offsets
#[derive(Debug, Clone, Copy)]
struct CaptureSpan {
    start: usize,
    end: usize,
    capture: u32,
    pattern: usize,
}

/// Highlighter holding compiled grammars and resolved themes
pub struct Highlighter {
    languages: HashMap<LanguageId, LoadedLanguage>,
    themes: Vec<Theme>,
}

impl std::fmt::Debug for Highlighter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Highlighter")
            .field("languages", &self.languages.keys().collect::<Vec<_>>())
            .field(
                "themes",
                &self.themes.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Highlighter {
    /// Load every requested grammar and compile its highlight query
    pub fn new(options: HighlighterOptions) -> Result<Self, EngineError> {
        if options.themes.is_empty() {
            return Err(EngineError::NoThemes);
        }

        let mut languages = HashMap::new();
        for lang in options.langs {
            if languages.contains_key(&lang) {
                continue;
            }
            let loaded = Self::load_language(lang)?;
            tracing::debug!(
                "Loaded {} grammar ({} patterns, {} captures)",
                lang.display_name(),
                loaded.query.pattern_count(),
                loaded.query.capture_names().len()
            );
            languages.insert(lang, loaded);
        }

        Ok(Self {
            languages,
            themes: options.themes,
        })
    }

    fn load_language(lang: LanguageId) -> Result<LoadedLanguage, EngineError> {
        let grammar = lang.grammar();

        // Fail early on ABI mismatches instead of on first use
        Parser::new()
            .set_language(&grammar)
            .map_err(|e| EngineError::Grammar {
                language: lang,
                message: e.to_string(),
            })?;

        let source = highlights_query(lang);
        let query = Query::new(&grammar, &source).map_err(|e| EngineError::Grammar {
            language: lang,
            message: format!(
                "highlight query error at row {}, column {}: {:?} {}",
                e.row, e.column, e.kind, e.message
            ),
        })?;

        Ok(LoadedLanguage { grammar, query })
    }

    /// Languages this highlighter can tokenize
    pub fn languages(&self) -> impl Iterator<Item = LanguageId> + '_ {
        self.languages.keys().copied()
    }

    /// Look up a loaded theme by id
    pub fn theme(&self, id: &str) -> Option<&Theme> {
        self.themes.iter().find(|t| t.id == id)
    }

    /// Tokenize `source` into lines of colored, optionally explained tokens
    pub fn code_to_tokens(
        &self,
        source: &str,
        options: &TokenizeOptions<'_>,
    ) -> Result<HighlightResult, EngineError> {
        let language = LanguageId::from_name(options.lang)
            .ok_or_else(|| EngineError::UnknownLanguage(options.lang.to_string()))?;
        let loaded = self
            .languages
            .get(&language)
            .ok_or(EngineError::LanguageNotLoaded(language))?;
        let theme = self
            .theme(options.theme)
            .ok_or_else(|| EngineError::UnknownTheme(options.theme.to_string()))?;

        let mut parser = Parser::new();
        parser
            .set_language(&loaded.grammar)
            .map_err(|e| EngineError::Grammar {
                language,
                message: e.to_string(),
            })?;
        let tree = parser
            .parse(source, None)
            .ok_or(EngineError::Parse(language))?;

        let spans = collect_spans(&loaded.query, &tree, source);
        let names = loaded.query.capture_names();

        let tokens: Vec<RawLine> = line_ranges(source)
            .map(|(start, end)| {
                tokenize_line(
                    source,
                    start,
                    end,
                    &spans,
                    names,
                    theme,
                    options.include_explanation,
                )
            })
            .collect();

        let result = HighlightResult { tokens };
        tracing::debug!(
            "Tokenized {} bytes of {} into {} lines / {} tokens",
            source.len(),
            language.display_name(),
            result.line_count(),
            result.token_count()
        );
        Ok(result)
    }
}

/// Run the highlight query and collect every non-empty capture
fn collect_spans(query: &Query, tree: &Tree, source: &str) -> Vec<CaptureSpan> {
    let mut spans = Vec::new();
    let mut cursor = QueryCursor::new();
    let mut captures = cursor.captures(query, tree.root_node(), source.as_bytes());
    while let Some((query_match, capture_idx)) = captures.next() {
        let capture = &query_match.captures[*capture_idx];
        let range = capture.node.byte_range();
        if range.is_empty() {
            continue;
        }
        spans.push(CaptureSpan {
            start: range.start,
            end: range.end,
            capture: capture.index,
            pattern: query_match.pattern_index,
        });
    }
    spans
}

/// Byte ranges of each line, excluding the `\n` terminator
///
/// A trailing newline produces a final empty line.
fn line_ranges(source: &str) -> impl Iterator<Item = (usize, usize)> + '_ {
    let mut offset = 0;
    source.split('\n').map(move |line| {
        let start = offset;
        offset += line.len() + 1;
        (start, start + line.len())
    })
}

/// Split one line into tokens with a constant capture stack
fn tokenize_line(
    source: &str,
    start: usize,
    end: usize,
    spans: &[CaptureSpan],
    names: &[&str],
    theme: &Theme,
    mode: ExplanationMode,
) -> RawLine {
    if start == end {
        return Vec::new();
    }

    let overlapping: Vec<&CaptureSpan> = spans
        .iter()
        .filter(|s| s.start < end && s.end > start)
        .collect();

    let mut boundaries = Vec::with_capacity(overlapping.len() * 2 + 2);
    boundaries.push(start);
    boundaries.push(end);
    for span in &overlapping {
        boundaries.push(span.start.max(start));
        boundaries.push(span.end.min(end));
    }
    boundaries.retain(|&b| source.is_char_boundary(b));
    boundaries.sort_unstable();
    boundaries.dedup();

    let mut tokens: Vec<RawToken> = Vec::new();
    let mut previous: Option<Vec<&str>> = None;
    for window in boundaries.windows(2) {
        let (from, to) = (window[0], window[1]);
        let chain = scope_chain(&overlapping, from, to, names);
        let text = &source[from..to];

        // Adjacent segments with the same scopes form one token
        if previous.as_ref() == Some(&chain) {
            if let Some(last) = tokens.last_mut() {
                last.content.push_str(text);
                continue;
            }
        }

        tokens.push(RawToken {
            content: text.to_string(),
            color: resolve_color(&chain, theme),
            explanation: match mode {
                ExplanationMode::None => None,
                ExplanationMode::ScopeName => {
                    Some(chain.iter().map(|name| ScopeExplanation::new(*name)).collect())
                }
            },
        });
        previous = Some(chain);
    }

    tokens
}

/// Capture names enclosing `[from, to)`, outermost first
///
/// When several patterns capture the identical node only the earliest
/// pattern is kept.
fn scope_chain<'q>(
    spans: &[&CaptureSpan],
    from: usize,
    to: usize,
    names: &[&'q str],
) -> Vec<&'q str> {
    let mut active: Vec<&CaptureSpan> = spans
        .iter()
        .copied()
        .filter(|s| s.start <= from && s.end >= to)
        .collect();
    active.sort_by_key(|s| (s.start, Reverse(s.end), s.pattern));
    active.dedup_by_key(|s| (s.start, s.end));
    active
        .iter()
        .filter_map(|s| names.get(s.capture as usize).copied())
        .collect()
}

/// Color of the innermost scope the theme styles
fn resolve_color(chain: &[&str], theme: &Theme) -> Option<String> {
    chain
        .iter()
        .rev()
        .find_map(|name| theme.color_for_scope(name))
        .map(|color| color.to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::DEFAULT_THEME_ID;

    fn highlighter() -> Highlighter {
        Highlighter::new(HighlighterOptions {
            themes: vec![Theme::default_theme()],
            langs: vec![LanguageId::Tsx, LanguageId::TypeScript],
        })
        .expect("highlighter should build")
    }

    fn tokenize(source: &str, lang: &str) -> HighlightResult {
        highlighter()
            .code_to_tokens(
                source,
                &TokenizeOptions {
                    lang,
                    theme: DEFAULT_THEME_ID,
                    include_explanation: ExplanationMode::ScopeName,
                },
            )
            .unwrap()
    }

    fn scopes(token: &RawToken) -> Vec<&str> {
        token
            .explanation
            .as_ref()
            .map(|e| e.iter().map(|s| s.scope_name.as_str()).collect())
            .unwrap_or_default()
    }

    fn find<'a>(result: &'a HighlightResult, content: &str) -> &'a RawToken {
        result
            .tokens
            .iter()
            .flatten()
            .find(|t| t.content == content)
            .unwrap_or_else(|| panic!("no token {:?} in {:#?}", content, result))
    }

    /// Each query compiles and shows a detailed error if not.
    mod query_compilation_tests {
        use super::*;

        fn assert_query_compiles(lang: LanguageId) {
            let source = highlights_query(lang);
            match Query::new(&lang.grammar(), &source) {
                Ok(query) => {
                    assert!(
                        !query.capture_names().is_empty(),
                        "{} query compiled but has no captures",
                        lang.display_name()
                    );
                }
                Err(e) => {
                    let error_line = source.lines().nth(e.row).unwrap_or("<line not found>");
                    panic!(
                        "\n{} query compilation FAILED at row {}, column {}:\n\
                         Error: {:?}\n\
                         Line {}: {}\n\
                         {}^",
                        lang.display_name(),
                        e.row,
                        e.column,
                        e.kind,
                        e.row + 1,
                        error_line,
                        " ".repeat(e.column.min(error_line.len())),
                    );
                }
            }
        }

        #[test]
        fn test_typescript_query_compiles() {
            assert_query_compiles(LanguageId::TypeScript);
        }

        #[test]
        fn test_tsx_query_compiles() {
            assert_query_compiles(LanguageId::Tsx);
        }
    }

    #[test]
    fn test_lines_are_fully_covered() {
        let source = "const a = 1;\n\n  let b = \"two\"; // note\nvar c = a + 2;";
        let result = tokenize(source, "typescript");

        assert_eq!(result.line_count(), 4);
        let rebuilt: Vec<String> = result
            .tokens
            .iter()
            .map(|line| line.iter().map(|t| t.content.as_str()).collect())
            .collect();
        assert_eq!(rebuilt.join("\n"), source);
    }

    #[test]
    fn test_empty_lines_have_no_tokens() {
        let result = tokenize("let a = 1;\n\n", "typescript");
        assert_eq!(result.line_count(), 3);
        assert!(result.tokens[1].is_empty());
        assert!(result.tokens[2].is_empty());
    }

    #[test]
    fn test_declaration_keywords_are_keywords() {
        let result = tokenize("const a = 1;\nlet count = 0;\nvar legacy = \"old\";", "tsx");
        let keyword = Theme::default_theme()
            .color_for_scope("keyword")
            .map(|c| c.to_hex());

        for kw in ["const", "let", "var"] {
            let token = find(&result, kw);
            assert_eq!(scopes(token), vec!["keyword.storage"], "{}", kw);
            assert_eq!(token.color, keyword, "{}", kw);
        }
    }

    #[test]
    fn test_whitespace_between_tokens_is_unscoped() {
        let result = tokenize("let count = 0;", "typescript");
        let line = &result.tokens[0];

        assert_eq!(line[0].content, "let");
        assert_eq!(line[1].content, " ");
        assert_eq!(line[1].explanation, Some(Vec::new()));
        assert_eq!(line[1].color, None);
        assert_eq!(scopes(&line[2]), vec!["variable"]);
        assert_eq!(scopes(find(&result, "0")), vec!["number"]);
    }

    #[test]
    fn test_jsx_tag_name_is_a_tag() {
        let result = tokenize("const el = <View />;", "tsx");
        let view = find(&result, "View");
        assert_eq!(scopes(view).last(), Some(&"tag"));
        assert!(scopes(view).contains(&"meta.tag"));
    }

    #[test]
    fn test_arrow_function_binding_is_a_function() {
        let result = tokenize("const Screen = () => 1;", "typescript");
        assert_eq!(scopes(find(&result, "Screen")), vec!["function"]);
    }

    #[test]
    fn test_string_is_one_token() {
        let result = tokenize("var legacy = \"old\";", "typescript");
        let string = find(&result, "\"old\"");
        assert_eq!(scopes(string), vec!["string"]);
    }

    #[test]
    fn test_explanation_can_be_disabled() {
        let result = highlighter()
            .code_to_tokens(
                "let count = 0;",
                &TokenizeOptions {
                    lang: "typescript",
                    theme: DEFAULT_THEME_ID,
                    include_explanation: ExplanationMode::None,
                },
            )
            .unwrap();
        assert!(result.tokens.iter().flatten().all(|t| t.explanation.is_none()));
        assert!(find(&result, "let").color.is_some());
    }

    #[test]
    fn test_unknown_language_and_theme() {
        let hl = highlighter();
        let options = TokenizeOptions {
            lang: "cobol",
            theme: DEFAULT_THEME_ID,
            include_explanation: ExplanationMode::ScopeName,
        };
        assert_eq!(
            hl.code_to_tokens("x", &options).unwrap_err(),
            EngineError::UnknownLanguage("cobol".to_string())
        );

        let options = TokenizeOptions {
            lang: "tsx",
            theme: "solarized",
            ..options
        };
        assert_eq!(
            hl.code_to_tokens("x", &options).unwrap_err(),
            EngineError::UnknownTheme("solarized".to_string())
        );
    }

    #[test]
    fn test_language_must_be_loaded() {
        let hl = Highlighter::new(HighlighterOptions {
            themes: vec![Theme::default_theme()],
            langs: vec![LanguageId::TypeScript],
        })
        .unwrap();
        assert_eq!(hl.languages().collect::<Vec<_>>(), vec![LanguageId::TypeScript]);
        let err = hl
            .code_to_tokens(
                "x",
                &TokenizeOptions {
                    lang: "tsx",
                    theme: DEFAULT_THEME_ID,
                    include_explanation: ExplanationMode::ScopeName,
                },
            )
            .unwrap_err();
        assert_eq!(err, EngineError::LanguageNotLoaded(LanguageId::Tsx));
    }

    #[test]
    fn test_no_themes_is_an_error() {
        let err = Highlighter::new(HighlighterOptions {
            themes: Vec::new(),
            langs: vec![LanguageId::Tsx],
        })
        .unwrap_err();
        assert_eq!(err, EngineError::NoThemes);
    }

    #[test]
    fn test_line_ranges() {
        let ranges: Vec<_> = line_ranges("ab\n\ncd\n").collect();
        assert_eq!(ranges, vec![(0, 2), (3, 3), (4, 6), (7, 7)]);
    }
}
