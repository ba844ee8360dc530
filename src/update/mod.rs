//! Update function for the Elm-style architecture
//!
//! All state transformations flow through here.

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::{AppModel, HighlightState};
use crate::projection::project;

/// Apply a message to the model
///
/// Only the first completion leaves `Loading`; anything after it is logged
/// and dropped.
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    if !model.is_loading() {
        tracing::warn!("Ignoring {}: highlight run already finished", msg_name(&msg));
        return None;
    }

    model.state = match msg {
        Msg::HighlightCompleted(Ok(result)) => {
            let projection = project(&result, &model.policy);
            tracing::debug!(
                "Projected {} display tokens, {} inspection entries",
                projection.display().len(),
                projection.inspection_len()
            );
            HighlightState::Ready(projection)
        }
        Msg::HighlightCompleted(Err(e)) => {
            tracing::error!("Highlighting failed: {}", e);
            HighlightState::Failed(e.to_string())
        }
        Msg::HighlightAbandoned { reason } => {
            tracing::error!("Highlight worker stopped: {}", reason);
            HighlightState::Failed(reason)
        }
    };

    None
}

fn msg_name(msg: &Msg) -> &'static str {
    match msg {
        Msg::HighlightCompleted(_) => "HighlightCompleted",
        Msg::HighlightAbandoned { .. } => "HighlightAbandoned",
    }
}
