//! Runtime - executes commands and feeds their results back as messages
//!
//! Side effects run on worker threads and report back over an `mpsc`
//! channel; the model is only ever touched by `update` on the runtime's
//! thread.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::AppModel;
use crate::requestor::request_highlight;
use crate::update::update;

/// Owns the model and the message channel
pub struct Runtime {
    pub model: AppModel,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
    worker: Option<JoinHandle<()>>,
}

impl Runtime {
    pub fn new(model: AppModel) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        Self {
            model,
            msg_tx,
            msg_rx,
            worker: None,
        }
    }

    /// Perform a command's side effect
    pub fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::RunHighlight(request) => {
                let tx = self.msg_tx.clone();
                let spawned = std::thread::Builder::new()
                    .name("highlight".to_string())
                    .spawn(move || {
                        let result = request_highlight(&request);
                        let _ = tx.send(Msg::HighlightCompleted(result));
                    });
                match spawned {
                    Ok(handle) => self.worker = Some(handle),
                    Err(e) => {
                        let _ = self.msg_tx.send(Msg::HighlightAbandoned {
                            reason: format!("Failed to start highlight worker: {}", e),
                        });
                    }
                }
            }
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        if let Some(cmd) = update(&mut self.model, msg) {
            self.process_cmd(cmd);
        }
    }

    /// Drain pending messages without blocking
    ///
    /// Returns true if any message was applied.
    pub fn process_async_messages(&mut self) -> bool {
        let mut changed = false;
        while let Ok(msg) = self.msg_rx.try_recv() {
            changed = true;
            self.dispatch(msg);
        }
        changed
    }

    /// Report a worker that finished without sending its result
    fn reap_worker(&mut self) {
        if !self.worker.as_ref().is_some_and(|h| h.is_finished()) {
            return;
        }
        let Some(handle) = self.worker.take() else {
            return;
        };
        // The result may have landed between the timeout and this check
        if self.process_async_messages() {
            return;
        }
        let reason = match handle.join() {
            Ok(()) => "Highlight worker exited without a result".to_string(),
            Err(payload) => {
                let detail = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                format!("Highlight worker panicked: {}", detail)
            }
        };
        self.dispatch(Msg::HighlightAbandoned { reason });
    }

    /// Run `cmd` and wait until the model leaves its loading state
    ///
    /// `on_tick` is called every `tick` while waiting. Returns right away,
    /// possibly still loading, when `cmd` started no worker.
    pub fn run_until_settled(
        &mut self,
        cmd: Cmd,
        tick: Duration,
        mut on_tick: impl FnMut(&AppModel),
    ) {
        self.process_cmd(cmd);
        if self.worker.is_none() {
            self.process_async_messages();
            return;
        }

        while self.model.is_loading() {
            match self.msg_rx.recv_timeout(tick) {
                Ok(msg) => self.dispatch(msg),
                Err(_) => {
                    self.reap_worker();
                    if self.model.is_loading() {
                        on_tick(&self.model);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::ProjectionPolicy;
    use crate::requestor::HighlightRequest;

    #[test]
    fn test_run_settles_with_projection() {
        let (model, cmd) = AppModel::init(ProjectionPolicy::default(), HighlightRequest::default());
        let mut runtime = Runtime::new(model);
        runtime.run_until_settled(cmd, Duration::from_millis(10), |_| {});

        assert!(!runtime.model.is_loading());
        assert!(runtime.model.error().is_none(), "{:?}", runtime.model.error());
        assert!(!runtime.model.display().is_empty());
    }

    #[test]
    fn test_run_settles_with_error() {
        let request = HighlightRequest {
            lang: "cobol".to_string(),
            ..HighlightRequest::default()
        };
        let (model, cmd) = AppModel::init(ProjectionPolicy::default(), request);
        let mut runtime = Runtime::new(model);
        runtime.run_until_settled(cmd, Duration::from_millis(10), |_| {});

        assert!(runtime.model.display().is_empty());
        assert!(runtime.model.error().unwrap().contains("cobol"));
    }

    #[test]
    fn test_settling_without_a_worker_returns() {
        let (model, _) = AppModel::init(ProjectionPolicy::default(), HighlightRequest::default());
        let mut runtime = Runtime::new(model);
        let mut ticks = 0;
        runtime.run_until_settled(Cmd::None, Duration::from_millis(10), |_| ticks += 1);

        assert_eq!(ticks, 0);
        assert!(runtime.model.is_loading());
    }

    #[test]
    fn test_none_command_does_nothing() {
        let (model, _) = AppModel::init(ProjectionPolicy::default(), HighlightRequest::default());
        let mut runtime = Runtime::new(model);
        runtime.process_cmd(Cmd::None);
        assert!(!runtime.process_async_messages());
        assert!(runtime.model.is_loading());
    }
}
