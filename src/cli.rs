//! Command-line argument parsing
//!
//! Flags override the user config; anything left unset falls back to it.

use clap::Parser;

use crate::config::ScopelensConfig;
use crate::requestor::HighlightRequest;
use crate::syntax::ExplanationMode;

/// Show the grammar scopes and colors behind every highlighted token
#[derive(Parser, Debug, Default)]
#[command(
    name = "scopelens",
    version,
    about = "Show the grammar scopes and colors behind every highlighted token"
)]
pub struct CliArgs {
    /// Language to highlight the sample with (tsx, typescript)
    #[arg(short, long, value_name = "LANG")]
    pub lang: Option<String>,

    /// Theme id (builtin or from the user themes directory)
    #[arg(short, long, value_name = "ID")]
    pub theme: Option<String>,

    /// Print the inspection list as JSON instead of the colored view
    #[arg(long)]
    pub json: bool,

    /// Disable ANSI colors
    #[arg(long)]
    pub no_color: bool,

    /// List available themes and exit
    #[arg(long)]
    pub list_themes: bool,
}

/// How the settled model is written out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Terminal { color: bool },
    Json,
}

impl CliArgs {
    /// Build the highlight request, filling unset flags from config
    pub fn request(&self, config: &ScopelensConfig) -> HighlightRequest {
        HighlightRequest {
            lang: self.lang.clone().unwrap_or_else(|| config.language.clone()),
            theme: self.theme.clone().unwrap_or_else(|| config.theme.clone()),
            explanation: ExplanationMode::ScopeName,
        }
    }

    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Terminal {
                color: !self.no_color,
            }
        }
    }
}
