//! UI notification channel and popup readiness signal
//!
//! The command core talks to the embedding UI over three channels: outbound
//! notifications (confirmation requests, bundle progress), inbound boolean
//! decisions (exactly one per confirmation request), and a watch channel
//! reporting whether the popup surface is available. A closed channel is
//! read as the popup being gone: pending decisions resolve as denied.

use serde_json::Value;
use tokio::sync::{mpsc, watch};
use tracing::warn;

use crate::error::Error;

/// Outbound notification to the UI layer.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Ask the user to approve the pending operation.
    ConfirmationRequest { view: &'static str, label: String },

    /// One batch of a bundle finished; carries the raw device response.
    BundleProgress { progress: usize, response: Value },
}

/// Availability of the popup surface.
#[derive(Debug, Clone, PartialEq)]
pub enum PopupState {
    /// Surface not opened yet.
    Pending,
    /// Surface ready to display confirmation prompts.
    Ready,
    /// Surface could not be opened.
    Failed(String),
}

/// Command-side endpoint of the UI channels.
pub struct UiChannel {
    events: mpsc::Sender<UiEvent>,
    decisions: mpsc::Receiver<bool>,
    popup: watch::Receiver<PopupState>,
}

/// Host-side endpoint: consumes events, produces decisions, drives popup
/// state.
pub struct UiHost {
    pub events: mpsc::Receiver<UiEvent>,
    pub decisions: mpsc::Sender<bool>,
    pub popup: watch::Sender<PopupState>,
}

/// Create a connected pair of UI endpoints.
pub fn channel(buffer: usize) -> (UiChannel, UiHost) {
    let (event_tx, event_rx) = mpsc::channel(buffer);
    let (decision_tx, decision_rx) = mpsc::channel(buffer);
    let (popup_tx, popup_rx) = watch::channel(PopupState::Pending);

    (
        UiChannel {
            events: event_tx,
            decisions: decision_rx,
            popup: popup_rx,
        },
        UiHost {
            events: event_rx,
            decisions: decision_tx,
            popup: popup_tx,
        },
    )
}

impl UiChannel {
    /// Suspend until the popup surface is ready.
    ///
    /// No timeout at this layer; cancellation is the host's responsibility.
    pub(crate) async fn wait_popup_ready(&mut self) -> Result<(), Error> {
        let state = self
            .popup
            .wait_for(|state| !matches!(state, PopupState::Pending))
            .await
            .map_err(|_| Error::Popup("popup readiness signal dropped".into()))?;

        match &*state {
            PopupState::Ready => Ok(()),
            PopupState::Failed(reason) => Err(Error::Popup(reason.clone())),
            PopupState::Pending => unreachable!("wait_for skips Pending"),
        }
    }

    /// Emit one confirmation request and suspend for its decision.
    ///
    /// A closed channel on either side means the popup went away, which
    /// resolves as a denial.
    pub(crate) async fn request_confirmation(&mut self, view: &'static str, label: String) -> bool {
        if self
            .events
            .send(UiEvent::ConfirmationRequest { view, label })
            .await
            .is_err()
        {
            return false;
        }

        self.decisions.recv().await.unwrap_or(false)
    }

    /// Emit a bundle progress notification. Best effort: a vanished UI must
    /// not abort an in-flight bundle.
    pub(crate) async fn report_progress(&mut self, progress: usize, response: Value) {
        if self
            .events
            .send(UiEvent::BundleProgress { progress, response })
            .await
            .is_err()
        {
            warn!(progress, "UI channel closed, dropping progress notification");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_popup_failed_is_error() {
        let (mut ui, host) = channel(4);
        host.popup
            .send(PopupState::Failed("window blocked".into()))
            .expect("send state");

        let err = ui.wait_popup_ready().await.unwrap_err();
        assert_eq!(err.kind(), "PopupError");
    }

    #[tokio::test]
    async fn test_decision_roundtrip() {
        let (mut ui, mut host) = channel(4);
        host.popup.send(PopupState::Ready).expect("send state");

        ui.wait_popup_ready().await.expect("popup ready");

        let driver = tokio::spawn(async move {
            let event = host.events.recv().await.expect("event");
            assert!(matches!(event, UiEvent::ConfirmationRequest { .. }));
            host.decisions.send(true).await.expect("send decision");
            host
        });

        assert!(ui.request_confirmation("export-xpub", "label".into()).await);
        driver.await.expect("driver");
    }

    #[tokio::test]
    async fn test_closed_ui_denies() {
        let (mut ui, host) = channel(4);
        drop(host);

        assert!(!ui.request_confirmation("export-xpub", "label".into()).await);
    }
}
