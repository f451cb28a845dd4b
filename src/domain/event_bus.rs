//! In-process fan-out of [`DrawEvent`]s.
//!
//! The session service publishes one event per successful mutation. The
//! binary subscribes a logging task; tests subscribe to assert on what a
//! game produced. Nobody is required to listen.

use tokio::sync::broadcast;

use super::DrawEvent;

/// Broadcast bus shared by a session and its listeners.
///
/// Subscribers only see events published after they subscribed. A
/// subscriber that falls more than `capacity` events behind gets
/// [`broadcast::error::RecvError::Lagged`] and skips the oldest ones.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DrawEvent>,
}

impl EventBus {
    /// Creates a bus buffering up to `capacity` events per subscriber
    /// (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes `event` and returns how many subscribers will see it.
    ///
    /// With no subscribers the event is dropped and `0` is returned; the
    /// game never depends on being observed.
    pub fn publish(&self, event: DrawEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// Subscribes to events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DrawEvent> {
        self.sender.subscribe()
    }
}
