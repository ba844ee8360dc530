//! Message types for the Elm-style architecture
//!
//! Messages are the only way state changes reach the model.

use crate::syntax::{EngineError, HighlightResult};

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    /// The single highlight run finished, successfully or not
    HighlightCompleted(Result<HighlightResult, EngineError>),
    /// The worker went away without reporting a result
    HighlightAbandoned { reason: String },
}
