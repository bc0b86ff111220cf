//! # Notification Sink
//!
//! Where user-visible notices go.
//!
//! ```text
//! CartStore ──notify(Notice)──► TracingNotifier  → log line (CLI)
//!                          └──► ChannelNotifier  → broadcast → UI toast
//! ```

use rocket_core::Notice;
use tokio::sync::broadcast;
use tracing::warn;

/// Default buffer for [`ChannelNotifier`]. Slow subscribers lag rather than
/// block the store.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Receives notices emitted by cart operations.
///
/// `notify` is synchronous and must not block: it is called while the cart
/// lock is held.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Writes every notice to the log at `WARN`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        warn!(notice = ?notice, "{}", notice.message());
    }
}

/// Fans notices out to any number of subscribers.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: broadcast::Sender<Notice>,
}

impl ChannelNotifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        ChannelNotifier { sender }
    }

    /// A receiver that sees every notice emitted after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.sender.subscribe()
    }
}

impl Default for ChannelNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notice: Notice) {
        // No subscribers is fine; the notice is simply dropped.
        let _ = self.sender.send(notice);
    }
}
