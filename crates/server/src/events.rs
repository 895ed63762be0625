use tokio::sync::broadcast;

use callsheet_api::ChatMessage;

/// A chat-flow notification published to every connected stream.
#[derive(Debug, Clone)]
pub enum ChatEvent {
    /// A row was inserted into the message table.
    MessageInserted(ChatMessage),
    /// The assistant provider failed; the conversation itself is unaffected.
    AssistantError(String),
}

/// Process-wide broadcast bus for chat events.
///
/// Delivery is at-least-once from a consumer's point of view: a reconnecting
/// client re-fetches history and may then see an insert again on the stream,
/// so consumers merge by message id.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<ChatEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish to all current subscribers. Having no subscribers is normal.
    pub fn publish(&self, event: ChatEvent) {
        let receivers = self.tx.receiver_count();
        if self.tx.send(event).is_err() {
            tracing::debug!("chat event dropped, no subscribers");
        } else {
            tracing::debug!("chat event published to {receivers} subscriber(s)");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChatEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
