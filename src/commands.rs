//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use crate::requestor::HighlightRequest;

/// Side effects requested by `update`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// No-op command
    None,
    /// Highlight the sample document on a worker thread.
    /// Sends Msg::HighlightCompleted when done
    RunHighlight(HighlightRequest),
}
