//! Scopelens - token scope inspector
//!
//! Highlights a TSX sample with tree-sitter, then flattens the per-line
//! tokens into a display sequence and an inspection list pairing each token
//! with its scope path. Built on the Elm Architecture pattern.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod messages;
pub mod model;
pub mod projection;
pub mod render;
pub mod requestor;
pub mod runtime;
pub mod source;
pub mod syntax;
pub mod theme;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::ScopelensConfig;
pub use messages::Msg;
pub use model::{AppModel, HighlightState};
pub use projection::{project, DisplayToken, Projection, ProjectionPolicy, TokenKind};
pub use requestor::{request_highlight, HighlightRequest};
pub use theme::Theme;
