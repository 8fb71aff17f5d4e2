//! Out-of-band control channel.
//!
//! # Responsibilities
//! - Answer version checks with the configured build identifier
//! - Exactly one reply per message, over the message's own reply channel
//!
//! # Design Decisions
//! - Serde-tagged message shape, matching the host page's payloads
//! - The channel task owns nothing but the build identifier; interception
//!   state is never touched
//! - The host page compares identifiers itself; this side only reports

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};

/// Control messages accepted from the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "type")]
pub enum ControlMessage {
    /// Ask for the gateway's build identifier.
    #[serde(rename = "CHECK_VERSION")]
    CheckVersion,
}

/// Reply to a version check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionReply {
    pub version: String,
}

/// The channel between handle and service task is gone.
#[derive(Debug, thiserror::Error)]
#[error("control channel closed")]
pub struct ControlClosed;

struct ControlRequest {
    message: ControlMessage,
    reply: oneshot::Sender<VersionReply>,
}

/// Service task answering control messages.
pub struct VersionChannel {
    version: String,
    rx: mpsc::Receiver<ControlRequest>,
}

/// Cloneable sender for control messages.
#[derive(Clone)]
pub struct ControlHandle {
    tx: mpsc::Sender<ControlRequest>,
}

impl VersionChannel {
    /// Create a channel reporting `version`, plus the handle that feeds it.
    pub fn new(version: impl Into<String>) -> (Self, ControlHandle) {
        let (tx, rx) = mpsc::channel(16);
        (
            Self {
                version: version.into(),
                rx,
            },
            ControlHandle { tx },
        )
    }

    /// Serve messages until every handle is dropped.
    pub async fn run(mut self) {
        while let Some(request) = self.rx.recv().await {
            match request.message {
                ControlMessage::CheckVersion => {
                    // A dropped reply sender means the asker went away; nothing to do.
                    let _ = request.reply.send(VersionReply {
                        version: self.version.clone(),
                    });
                }
            }
        }
    }
}

impl ControlHandle {
    /// Ask the gateway for its build identifier.
    pub async fn check_version(&self) -> Result<VersionReply, ControlClosed> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(ControlRequest {
                message: ControlMessage::CheckVersion,
                reply,
            })
            .await
            .map_err(|_| ControlClosed)?;
        rx.await.map_err(|_| ControlClosed)
    }
}
