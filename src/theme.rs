//! Theme system for the highlighter
//!
//! Provides YAML-based theming support with compile-time embedded themes
//! and user-defined themes from config directories. A theme maps capture
//! names (`keyword`, `string.special`, ...) to colors and carries the few UI
//! colors the terminal renderer needs.
//!
//! Theme loading priority:
//! 1. User config: `~/.config/scopelens/themes/{id}.yaml`
//! 2. Embedded: Built-in themes compiled into binary

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

// Embed theme YAML files at compile time
pub const CATPPUCCIN_MOCHA_YAML: &str = include_str!("../themes/catppuccin-mocha.yaml");

/// Id of the theme used when nothing else is configured
pub const DEFAULT_THEME_ID: &str = "catppuccin-mocha";

/// A built-in theme entry
pub struct BuiltinTheme {
    /// Stable identifier for config and requests (e.g. "catppuccin-mocha")
    pub id: &'static str,
    /// Embedded YAML content
    pub yaml: &'static str,
}

/// Registry of all built-in themes
pub const BUILTIN_THEMES: &[BuiltinTheme] = &[BuiltinTheme {
    id: "catppuccin-mocha",
    yaml: CATPPUCCIN_MOCHA_YAML,
}];

/// Where the theme came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSource {
    /// User-defined theme in ~/.config/scopelens/themes/
    User,
    /// Built-in theme embedded in binary
    Builtin,
}

/// Information about an available theme
#[derive(Debug, Clone)]
pub struct ThemeInfo {
    /// Stable identifier (e.g., "catppuccin-mocha", "my-custom-theme")
    pub id: String,
    /// Display name from YAML (e.g., "Catppuccin Mocha")
    pub name: String,
    /// Where this theme is loaded from
    pub source: ThemeSource,
}

/// Load a theme from a YAML file, using the file stem as its id
pub fn from_file(path: &Path) -> Result<Theme, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read theme file {}: {}", path.display(), e))?;
    let mut theme = Theme::from_yaml(&content)?;
    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
        theme.id = stem.to_string();
    }
    Ok(theme)
}

/// Load theme by id with priority: user → builtin
pub fn load_theme(id: &str) -> Result<Theme, String> {
    if let Some(user_dir) = crate::config_paths::themes_dir() {
        let user_path = user_dir.join(format!("{}.yaml", id));
        if user_path.exists() {
            tracing::info!("Loading user theme from {}", user_path.display());
            return from_file(&user_path);
        }
    }

    tracing::info!("Loading builtin theme: {}", id);
    Theme::from_builtin(id)
}

/// List all available themes from all sources
///
/// User themes override builtins with the same id.
pub fn list_available_themes() -> Vec<ThemeInfo> {
    let mut themes = Vec::new();
    let mut seen_ids = std::collections::HashSet::new();

    if let Some(user_dir) = crate::config_paths::themes_dir() {
        if let Ok(entries) = std::fs::read_dir(&user_dir) {
            for entry in entries.filter_map(|e| e.ok()) {
                let path = entry.path();
                if !path
                    .extension()
                    .is_some_and(|ext| ext == "yaml" || ext == "yml")
                {
                    continue;
                }
                let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                if seen_ids.insert(id.to_string()) {
                    let name = from_file(&path)
                        .map(|t| t.name)
                        .unwrap_or_else(|_| id.to_string());
                    themes.push(ThemeInfo {
                        id: id.to_string(),
                        name,
                        source: ThemeSource::User,
                    });
                }
            }
        }
    }

    for builtin in BUILTIN_THEMES {
        if seen_ids.insert(builtin.id.to_string()) {
            let name = Theme::from_yaml(builtin.yaml)
                .map(|t| t.name)
                .unwrap_or_else(|_| builtin.id.to_string());
            themes.push(ThemeInfo {
                id: builtin.id.to_string(),
                name,
                source: ThemeSource::Builtin,
            });
        }
    }

    themes
}

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse from "#RGB", "#RGBA", "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let hex = s.trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(format!("Invalid color format: {}", s));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| format!("{}: {}", s, e))
        };
        // Shorthand digits expand by repetition: "f" -> "ff"
        let short = |i: usize| channel(i..i + 1).map(|v| v * 0x11);

        match hex.len() {
            3 => Ok(Color::rgb(short(0)?, short(1)?, short(2)?)),
            4 => Ok(Color::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Color::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }

    /// Format as "#rrggbb", or "#rrggbbaa" when not fully opaque
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Raw theme data as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeData {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub ui: UiThemeData,
    #[serde(default)]
    pub syntax: HashMap<String, String>,
}

/// UI theme colors (raw strings from YAML)
#[derive(Debug, Clone, Deserialize)]
pub struct UiThemeData {
    pub editor: EditorThemeData,
    #[serde(default)]
    pub text: TextThemeData,
}

/// Code area colors
#[derive(Debug, Clone, Deserialize)]
pub struct EditorThemeData {
    pub background: String,
    pub foreground: String,
    #[serde(default)]
    pub code_background: Option<String>,
}

/// Heading and status text colors (all optional)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TextThemeData {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub section_title: Option<String>,
    #[serde(default)]
    pub muted: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Resolved theme with parsed colors
#[derive(Debug, Clone)]
pub struct Theme {
    /// Identifier used to select this theme in highlight requests
    pub id: String,
    pub name: String,
    pub editor: EditorTheme,
    pub text: TextTheme,
    pub syntax: SyntaxTheme,
}

/// Code area colors (resolved)
#[derive(Debug, Clone)]
pub struct EditorTheme {
    pub background: Color,
    pub foreground: Color,
    pub code_background: Color,
}

/// Text colors (resolved)
#[derive(Debug, Clone)]
pub struct TextTheme {
    pub title: Color,
    pub section_title: Color,
    pub muted: Color,
    pub error: Color,
}

/// Capture name to color mapping
#[derive(Debug, Clone, Default)]
pub struct SyntaxTheme {
    styles: HashMap<String, Color>,
}

impl SyntaxTheme {
    pub fn new(styles: HashMap<String, Color>) -> Self {
        Self { styles }
    }

    /// Look up the color for a capture name
    ///
    /// Tries the exact name first, then progressively shorter parents
    /// (e.g. "keyword.control.import" -> "keyword.control" -> "keyword").
    pub fn color_for(&self, name: &str) -> Option<Color> {
        let mut current = name;
        loop {
            if let Some(color) = self.styles.get(current) {
                return Some(*color);
            }

            let dot_pos = current.rfind('.')?;
            current = &current[..dot_pos];
        }
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

/// Derive an id from a display name: "Catppuccin Mocha" -> "catppuccin-mocha"
fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

impl Theme {
    /// Load theme from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let data: ThemeData =
            serde_yaml::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))?;
        Self::from_data(data)
    }

    /// Load a built-in theme by id
    pub fn from_builtin(id: &str) -> Result<Self, String> {
        let entry = BUILTIN_THEMES
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| format!("Unknown theme id: {}", id))?;
        let mut theme = Theme::from_yaml(entry.yaml)?;
        theme.id = entry.id.to_string();
        Ok(theme)
    }

    /// Convert raw theme data to resolved theme
    pub fn from_data(data: ThemeData) -> Result<Self, String> {
        let foreground = Color::from_hex(&data.ui.editor.foreground)?;
        let optional = |value: &Option<String>, fallback: Color| -> Result<Color, String> {
            Ok(value
                .as_ref()
                .map(|s| Color::from_hex(s))
                .transpose()?
                .unwrap_or(fallback))
        };

        let text = &data.ui.text;
        let mut styles = HashMap::with_capacity(data.syntax.len());
        for (name, hex) in &data.syntax {
            let color = Color::from_hex(hex).map_err(|e| format!("syntax.{}: {}", name, e))?;
            styles.insert(name.clone(), color);
        }

        Ok(Theme {
            id: data.id.clone().unwrap_or_else(|| slugify(&data.name)),
            editor: EditorTheme {
                background: Color::from_hex(&data.ui.editor.background)?,
                foreground,
                code_background: optional(
                    &data.ui.editor.code_background,
                    Color::rgb(0x31, 0x32, 0x44),
                )?,
            },
            text: TextTheme {
                title: optional(&text.title, foreground)?,
                section_title: optional(&text.section_title, foreground)?,
                muted: optional(&text.muted, foreground)?,
                error: optional(&text.error, Color::rgb(0xFF, 0x80, 0x80))?,
            },
            syntax: SyntaxTheme::new(styles),
            name: data.name,
        })
    }

    /// Resolve the color for a capture name, with parent fallback
    pub fn color_for_scope(&self, name: &str) -> Option<Color> {
        self.syntax.color_for(name)
    }

    /// Default theme (YAML-backed with Rust fallback)
    pub fn default_theme() -> Self {
        match Theme::from_builtin(DEFAULT_THEME_ID) {
            Ok(theme) => theme,
            Err(e) => {
                tracing::error!("Builtin theme failed to parse: {}", e);
                Theme {
                    id: DEFAULT_THEME_ID.to_string(),
                    name: "Catppuccin Mocha".to_string(),
                    editor: EditorTheme {
                        background: Color::rgb(0x1E, 0x1E, 0x2E),
                        foreground: Color::rgb(0xCD, 0xD6, 0xF4),
                        code_background: Color::rgb(0x31, 0x32, 0x44),
                    },
                    text: TextTheme {
                        title: Color::rgb(0xCD, 0xD6, 0xF4),
                        section_title: Color::rgb(0x89, 0xB4, 0xFA),
                        muted: Color::rgb(0xA6, 0xAD, 0xC8),
                        error: Color::rgb(0xF3, 0x8B, 0xA8),
                    },
                    syntax: SyntaxTheme::default(),
                }
            }
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
