//! User configuration
//!
//! Reads preferences from `~/.config/scopelens/config.yaml`. Every field is
//! optional; a missing or unreadable file yields the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::projection::{ProjectionPolicy, DEFAULT_COLOR};
use crate::syntax::LanguageId;
use crate::theme::{Color, DEFAULT_THEME_ID};

/// Configuration loaded at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopelensConfig {
    /// Language used to highlight the sample (e.g., "tsx", "typescript")
    #[serde(default = "default_language")]
    pub language: String,
    /// Selected theme id (e.g., "catppuccin-mocha")
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Color for tokens the theme leaves unstyled
    #[serde(default = "default_color")]
    pub default_color: String,
}

fn default_language() -> String {
    LanguageId::default().name().to_string()
}

fn default_theme() -> String {
    DEFAULT_THEME_ID.to_string()
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

impl Default for ScopelensConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            theme: default_theme(),
            default_color: default_color(),
        }
    }
}

impl ScopelensConfig {
    /// Load config from the user config directory, or return defaults
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config at {}: {}", path.display(), e))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse config at {}: {}", path.display(), e))
    }

    /// Projection policy with this config's overrides applied
    ///
    /// A `default_color` that is not a hex color falls back to
    /// [`DEFAULT_COLOR`].
    pub fn projection_policy(&self) -> ProjectionPolicy {
        let default_color = match Color::from_hex(&self.default_color) {
            Ok(_) => self.default_color.clone(),
            Err(e) => {
                tracing::warn!("Invalid default_color in config ({}), using {}", e, DEFAULT_COLOR);
                DEFAULT_COLOR.to_string()
            }
        };
        ProjectionPolicy {
            default_color,
            ..ProjectionPolicy::default()
        }
    }
}
