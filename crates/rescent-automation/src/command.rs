//! The automation command surface.
//!
//! Commands arrive asynchronously from a privileged caller (the popup, in
//! the shipped extension) and each gets exactly one structured reply. The
//! reply channel stays open across asynchronous completion, and any error
//! raised while handling a command is converted into an error reply at the
//! dispatch boundary; the dispatcher itself never dies.

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::controller::{AutomationController, ScrollOutcome, StatusReport};
use crate::error::{AutomationError, AutomationResult};
use crate::settings::AutomationSettings;

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;

fn default_speed() -> u32 {
    5
}

/// A command addressed to the automation controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Command {
    /// Start automation with the given settings.
    Start { settings: AutomationSettings },
    /// Stop automation.
    Stop,
    /// Report the current automation status.
    Status,
    /// Scroll to the bottom of the page at the given speed.
    #[serde(rename_all = "camelCase")]
    ScrollToBottom {
        #[serde(default = "default_speed")]
        speed: u32,
    },
}

/// Reply to a [`Command`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandResponse {
    /// Reply to `status`.
    Status(StatusReport),
    /// Reply to `scrollToBottom`.
    Scroll(ScrollOutcome),
    /// A command handler failed. Ordered before `Ack` so untagged
    /// deserialization does not drop the error field.
    Error { success: bool, error: String },
    /// A `scrollToBottom` failed; its error reply carries no `success` flag.
    ScrollError { error: String },
    /// Acknowledgement for `start` and `stop`.
    Ack { success: bool },
}

impl CommandResponse {
    fn error(err: AutomationError) -> Self {
        Self::Error {
            success: false,
            error: err.to_string(),
        }
    }
}

struct CommandEnvelope {
    command: Command,
    reply: oneshot::Sender<CommandResponse>,
}

/// Sends commands to a running dispatcher and awaits their replies.
#[derive(Clone)]
pub struct CommandHandle {
    tx: mpsc::Sender<CommandEnvelope>,
}

impl CommandHandle {
    /// Send a command and wait for its reply.
    pub async fn send(&self, command: Command) -> AutomationResult<CommandResponse> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(CommandEnvelope {
                command,
                reply: reply_tx,
            })
            .await
            .map_err(|_| AutomationError::ChannelClosed)?;
        reply_rx.await.map_err(|_| AutomationError::ChannelClosed)
    }
}

/// Spawn the command dispatcher for `controller`.
///
/// The dispatcher runs until every [`CommandHandle`] clone is dropped.
pub fn spawn_dispatcher(controller: AutomationController) -> (CommandHandle, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::channel::<CommandEnvelope>(32);
    let task = tokio::spawn(async move {
        while let Some(envelope) = rx.recv().await {
            debug!("Dispatching command {:?}", envelope.command);
            let response = handle_command(&controller, envelope.command)
                .await
                .unwrap_or_else(|err| {
                    warn!("Command failed: {err}");
                    CommandResponse::error(err)
                });
            // The caller may have given up waiting; that is not our problem.
            let _ = envelope.reply.send(response);
        }
    });
    (CommandHandle { tx }, task)
}

async fn handle_command(
    controller: &AutomationController,
    command: Command,
) -> AutomationResult<CommandResponse> {
    match command {
        Command::Start { settings } => {
            controller.start(settings).await?;
            Ok(CommandResponse::Ack { success: true })
        }
        Command::Stop => {
            controller.stop().await?;
            Ok(CommandResponse::Ack { success: true })
        }
        Command::Status => Ok(CommandResponse::Status(controller.status())),
        Command::ScrollToBottom { speed } => {
            Ok(match controller.scroll_to_bottom(speed).await {
                Ok(outcome) => CommandResponse::Scroll(outcome),
                Err(err) => {
                    warn!("Scroll command failed: {err}");
                    CommandResponse::ScrollError {
                        error: err.to_string(),
                    }
                }
            })
        }
    }
}
