//! Application model - the complete state of a highlight run
//!
//! The run has exactly three observable states. The model starts in
//! `Loading` and moves out of it once; results are never read while loading.

use crate::commands::Cmd;
use crate::projection::{DisplayToken, Projection, ProjectionPolicy};
use crate::requestor::HighlightRequest;

/// Outcome of the highlight run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighlightState {
    /// Engine setup or tokenization still in progress
    Loading,
    /// Tokens projected and ready to render
    Ready(Projection),
    /// The run failed; holds a displayable message
    Failed(String),
}

/// Application state owned by the runtime
#[derive(Debug, Clone)]
pub struct AppModel {
    pub state: HighlightState,
    /// Presentation rules used when projecting the result
    pub policy: ProjectionPolicy,
}

impl AppModel {
    /// Create the model in its loading state along with the command that
    /// starts the run
    pub fn init(policy: ProjectionPolicy, request: HighlightRequest) -> (Self, Cmd) {
        let model = Self {
            state: HighlightState::Loading,
            policy,
        };
        (model, Cmd::RunHighlight(request))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, HighlightState::Loading)
    }

    /// Display sequence, empty unless the run succeeded
    pub fn display(&self) -> &[DisplayToken] {
        match &self.state {
            HighlightState::Ready(projection) => projection.display(),
            _ => &[],
        }
    }

    /// Inspection entries, empty unless the run succeeded
    pub fn inspection(&self) -> Vec<&DisplayToken> {
        match &self.state {
            HighlightState::Ready(projection) => projection.inspection().collect(),
            _ => Vec::new(),
        }
    }

    pub fn projection(&self) -> Option<&Projection> {
        match &self.state {
            HighlightState::Ready(projection) => Some(projection),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            HighlightState::Failed(message) => Some(message),
            _ => None,
        }
    }
}
