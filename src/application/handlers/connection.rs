//! The connection worker: a dedicated task owning the session state machine
//! and the outbound queue.
//!
//! Façade calls and network lifecycle events are commands into the worker's
//! inbox, so state transitions, enqueues and drains are serialized by
//! construction. The queue is in-memory only; a crash loses whatever has not
//! been sent yet.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::application::services::network::ChatNetworkClient;
use crate::domain::models::{
    ClientInfo, ConnectionState, DeliveryOutcome, LifecycleEvent, RenderedMessage,
};
use crate::domain::phone;

pub enum Command {
    Initialize,
    Dispatch {
        message: RenderedMessage,
        reply: oneshot::Sender<DeliveryOutcome>,
    },
    Lifecycle(LifecycleEvent),
    IsReady(oneshot::Sender<bool>),
    ClientInfo(oneshot::Sender<Option<ClientInfo>>),
    PendingCount(oneshot::Sender<usize>),
}

/// Cloneable handle into the connection worker's inbox.
#[derive(Clone)]
pub struct ConnectionHandle {
    tx: mpsc::Sender<Command>,
}

impl ConnectionHandle {
    /// Kick off the pairing handshake with the network.
    pub async fn initialize(&self) {
        if self.tx.send(Command::Initialize).await.is_err() {
            error!("connection worker is gone, cannot initialize");
        }
    }

    /// Hand a rendered message to the worker: sent immediately while the
    /// session is ready, queued otherwise. Never blocks on network I/O
    /// beyond the worker's own send timeout.
    pub async fn dispatch(&self, message: RenderedMessage) -> DeliveryOutcome {
        let (reply_tx, reply_rx) = oneshot::channel();
        let command = Command::Dispatch {
            message,
            reply: reply_tx,
        };
        if self.tx.send(command).await.is_err() {
            error!("connection worker is gone, dropping message");
            return DeliveryOutcome::Failed;
        }
        reply_rx.await.unwrap_or(DeliveryOutcome::Failed)
    }

    /// Forward a lifecycle event from the network.
    pub async fn lifecycle(&self, event: LifecycleEvent) {
        if self.tx.send(Command::Lifecycle(event)).await.is_err() {
            warn!("connection worker is gone, lifecycle event dropped");
        }
    }

    pub async fn is_ready(&self) -> bool {
        let (reply_tx, reply_rx) = oneshot::channel();
        if self.tx.send(Command::IsReady(reply_tx)).await.is_err() {
            return false;
        }
        reply_rx.await.unwrap_or(false)
    }

    pub async fn client_info(&self) -> Option<ClientInfo> {
        let (reply_tx, reply_rx) = oneshot::channel();
        if self.tx.send(Command::ClientInfo(reply_tx)).await.is_err() {
            return None;
        }
        reply_rx.await.unwrap_or(None)
    }

    /// Number of messages waiting for the session to become ready.
    pub async fn pending_count(&self) -> usize {
        let (reply_tx, reply_rx) = oneshot::channel();
        if self.tx.send(Command::PendingCount(reply_tx)).await.is_err() {
            return 0;
        }
        reply_rx.await.unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ConnectionWorkerConfig {
    pub drain_pacing: Duration,
    pub send_timeout: Duration,
}

pub struct ConnectionWorker {
    client: Arc<dyn ChatNetworkClient>,
    config: ConnectionWorkerConfig,
    rx: mpsc::Receiver<Command>,
    state: ConnectionState,
    client_info: Option<ClientInfo>,
    queue: VecDeque<RenderedMessage>,
}

impl ConnectionWorker {
    pub fn spawn(
        client: Arc<dyn ChatNetworkClient>,
        config: ConnectionWorkerConfig,
    ) -> (ConnectionHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(64);
        let worker = Self {
            client,
            config,
            rx,
            state: ConnectionState::Uninitialized,
            client_info: None,
            queue: VecDeque::new(),
        };
        let task = tokio::spawn(worker.run());
        (ConnectionHandle { tx }, task)
    }

    async fn run(mut self) {
        while let Some(command) = self.rx.recv().await {
            self.handle_command(command).await;
        }
        debug!("connection worker inbox closed, stopping");
    }

    async fn handle_command(&mut self, command: Command) {
        match command {
            Command::Initialize => self.initialize().await,
            Command::Dispatch { message, reply } => {
                let outcome = self.dispatch(message).await;
                let _ = reply.send(outcome);
            }
            Command::Lifecycle(event) => {
                if self.apply_lifecycle(event) {
                    self.drain().await;
                }
            }
            Command::IsReady(reply) => {
                let _ = reply.send(self.state == ConnectionState::Ready);
            }
            Command::ClientInfo(reply) => {
                let info = if self.state == ConnectionState::Ready {
                    self.client_info.clone()
                } else {
                    None
                };
                let _ = reply.send(info);
            }
            Command::PendingCount(reply) => {
                let _ = reply.send(self.queue.len());
            }
        }
    }

    async fn initialize(&mut self) {
        if self.state == ConnectionState::Ready {
            warn!("initialize called while session is already ready, ignoring");
            return;
        }
        info!("starting pairing handshake with the chat network");
        self.state = ConnectionState::AwaitingPairing;
        if let Err(err) = self.client.connect().await {
            // Stays in AwaitingPairing; a fresh initialize is the only way
            // forward, there is no automatic reconnect loop.
            error!(error = %err, "pairing handshake could not be started");
        }
    }

    async fn dispatch(&mut self, message: RenderedMessage) -> DeliveryOutcome {
        if self.state != ConnectionState::Ready {
            debug!(
                to = %phone::mask(message.to.as_str()),
                state = self.state.as_str(),
                "session not ready, message queued"
            );
            self.queue.push_back(message);
            return DeliveryOutcome::Queued;
        }
        if self.try_send(&message).await {
            DeliveryOutcome::Sent
        } else {
            DeliveryOutcome::Failed
        }
    }

    /// Apply a lifecycle transition. Returns true when the queue should be
    /// drained (the Ready transition).
    fn apply_lifecycle(&mut self, event: LifecycleEvent) -> bool {
        match event {
            LifecycleEvent::PairingCode(code) => {
                self.state = ConnectionState::AwaitingPairing;
                info!(
                    "scan to pair:\n========================================\n  PAIRING CODE: {code}\n========================================"
                );
                false
            }
            LifecycleEvent::Ready(client_info) => {
                info!(
                    phone = %phone::mask(&client_info.phone),
                    platform = %client_info.platform,
                    "session ready"
                );
                self.client_info = Some(client_info);
                self.state = ConnectionState::Ready;
                true
            }
            LifecycleEvent::AuthFailure(reason) => {
                error!(%reason, "authentication failed, still awaiting pairing");
                self.state = ConnectionState::AwaitingPairing;
                self.client_info = None;
                false
            }
            LifecycleEvent::Disconnected { reason } => {
                warn!(
                    reason = reason.as_deref().unwrap_or("unknown"),
                    pending = self.queue.len(),
                    "session disconnected, queued messages retained"
                );
                self.state = ConnectionState::Disconnected;
                self.client_info = None;
                false
            }
        }
    }

    /// Flush the queue head-to-tail with fixed pacing between sends. A send
    /// failure drops that one message; a disconnect stops the drain with the
    /// remainder still queued for the next Ready transition.
    async fn drain(&mut self) {
        if self.queue.is_empty() {
            return;
        }
        info!(pending = self.queue.len(), "draining outbound queue");
        while self.state == ConnectionState::Ready {
            let Some(message) = self.queue.pop_front() else {
                break;
            };
            self.try_send(&message).await;
            // Absorb first so a dispatch that arrived while the tail was
            // being sent still gets the pacing gap before its own send.
            self.absorb_pending();
            if self.state == ConnectionState::Ready && !self.queue.is_empty() {
                tokio::time::sleep(self.config.drain_pacing).await;
                self.absorb_pending();
            }
        }
    }

    /// Pull in commands that arrived mid-drain without blocking. Dispatches
    /// join the tail so global FIFO order holds; lifecycle events may end
    /// the drain.
    fn absorb_pending(&mut self) {
        while let Ok(command) = self.rx.try_recv() {
            match command {
                Command::Initialize => {
                    warn!("initialize received mid-drain, ignoring");
                }
                Command::Dispatch { message, reply } => {
                    self.queue.push_back(message);
                    let _ = reply.send(DeliveryOutcome::Queued);
                }
                Command::Lifecycle(event) => {
                    // Already draining, so a redundant Ready needs no new
                    // drain; a disconnect flips state and the loop exits.
                    let _ = self.apply_lifecycle(event);
                }
                Command::IsReady(reply) => {
                    let _ = reply.send(self.state == ConnectionState::Ready);
                }
                Command::ClientInfo(reply) => {
                    let info = if self.state == ConnectionState::Ready {
                        self.client_info.clone()
                    } else {
                        None
                    };
                    let _ = reply.send(info);
                }
                Command::PendingCount(reply) => {
                    let _ = reply.send(self.queue.len());
                }
            }
        }
    }

    async fn try_send(&self, message: &RenderedMessage) -> bool {
        let masked = phone::mask(message.to.as_str());
        let send = self.client.send(
            &message.to,
            &message.body,
            message.attachment.as_deref(),
        );
        match tokio::time::timeout(self.config.send_timeout, send).await {
            Ok(Ok(())) => {
                info!(to = %masked, "message sent");
                true
            }
            Ok(Err(err)) => {
                error!(to = %masked, error = %err, "send failed, message dropped");
                false
            }
            Err(_) => {
                error!(
                    to = %masked,
                    timeout_secs = self.config.send_timeout.as_secs(),
                    "send timed out, message dropped"
                );
                false
            }
        }
    }
}
