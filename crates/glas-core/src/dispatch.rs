//! Hand-off of resolved commands to the application.
//!
//! The controller pushes each resolved command to a [`CommandDispatcher`]
//! and moves on. It never awaits or retries; a failed dispatch is logged
//! and has no effect on session state.

use glas_types::{GlasError, ResolvedCommand, Result};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::debug;

/// Default capacity of [`ChannelDispatcher::channel`].
const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Receives resolved commands. Called synchronously from the controller.
pub trait CommandDispatcher: Send {
    fn dispatch(&mut self, command: ResolvedCommand) -> Result<()>;
}

impl<F> CommandDispatcher for F
where
    F: FnMut(ResolvedCommand) -> Result<()> + Send,
{
    fn dispatch(&mut self, command: ResolvedCommand) -> Result<()> {
        self(command)
    }
}

/// Forwards commands into a bounded tokio channel.
///
/// Uses `try_send` so the controller never blocks on a slow consumer; a
/// full or closed channel is reported as [`GlasError::Dispatch`].
#[derive(Debug, Clone)]
pub struct ChannelDispatcher {
    tx: mpsc::Sender<ResolvedCommand>,
}

impl ChannelDispatcher {
    pub fn new(tx: mpsc::Sender<ResolvedCommand>) -> Self {
        Self { tx }
    }

    /// A dispatcher and the receiving end of its channel.
    pub fn channel() -> (Self, mpsc::Receiver<ResolvedCommand>) {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> (Self, mpsc::Receiver<ResolvedCommand>) {
        let (tx, rx) = mpsc::channel(capacity);
        debug!(capacity, "command channel created");
        (Self::new(tx), rx)
    }
}

impl CommandDispatcher for ChannelDispatcher {
    fn dispatch(&mut self, command: ResolvedCommand) -> Result<()> {
        self.tx.try_send(command).map_err(|e| match e {
            TrySendError::Full(_) => GlasError::Dispatch("command channel full (backpressure)".into()),
            TrySendError::Closed(_) => GlasError::Dispatch("command channel closed".into()),
        })
    }
}
