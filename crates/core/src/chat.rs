//! Chat messages and the ordered, duplicate-tolerant message log.
//!
//! The log is the single shared mutable resource of the chat flow. Optimistic
//! local entries and backend-confirmed rows are reconciled by message id, so
//! at-least-once delivery from the realtime channel is safe.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who produced a chat message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub fn as_str(&self) -> &str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Self::User),
            "assistant" => Some(Self::Assistant),
            _ => None,
        }
    }
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single chat message. Immutable once created.
///
/// Ids are generated client-side for optimistic user entries and echoed back
/// by the server on the persisted row, so both copies carry the same id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender,
            timestamp: Utc::now(),
        }
    }
}

/// Ordered list of chat messages.
///
/// Invariants after every operation:
/// - messages are sorted by timestamp, non-decreasing;
/// - each id appears at most once.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: Vec<ChatMessage>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.messages.iter().any(|m| m.id == id)
    }

    /// Replace the log with a fetched history, re-sorting defensively.
    ///
    /// The sort is stable so equal timestamps keep their fetch order.
    pub fn replace_with_history(&mut self, mut history: Vec<ChatMessage>) {
        history.sort_by_key(|m| m.timestamp);
        self.messages = history;
    }

    /// Merge one message into the log, keyed by id.
    ///
    /// Returns `true` if the message was inserted, `false` if its id was
    /// already present. Applying the same insert twice yields the same log as
    /// applying it once. Out-of-order arrivals are placed at their timestamp
    /// position (after any equal timestamps already present).
    pub fn merge(&mut self, msg: ChatMessage) -> bool {
        if self.contains(msg.id) {
            return false;
        }
        let pos = self
            .messages
            .partition_point(|m| m.timestamp <= msg.timestamp);
        self.messages.insert(pos, msg);
        true
    }

    /// Timestamp-sorted check, used by tests and debug assertions.
    pub fn is_ordered(&self) -> bool {
        self.messages
            .windows(2)
            .all(|w| w[0].timestamp <= w[1].timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn msg_at(sender: Sender, text: &str, offset_secs: i64) -> ChatMessage {
        ChatMessage {
            id: Uuid::new_v4(),
            text: text.to_string(),
            sender,
            timestamp: Utc::now() + Duration::seconds(offset_secs),
        }
    }

    #[test]
    fn merge_is_idempotent_by_id() {
        let mut log = MessageLog::new();
        let m = msg_at(Sender::User, "hi", 0);

        assert!(log.merge(m.clone()));
        assert!(!log.merge(m.clone()));
        assert!(!log.merge(m));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn merge_keeps_timestamp_order_for_out_of_order_delivery() {
        let mut log = MessageLog::new();
        let a = msg_at(Sender::User, "first", 0);
        let b = msg_at(Sender::Assistant, "second", 10);
        let c = msg_at(Sender::User, "third", 5);

        log.merge(a.clone());
        log.merge(b.clone());
        log.merge(c.clone());

        assert!(log.is_ordered());
        let texts: Vec<_> = log.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "third", "second"]);
    }

    #[test]
    fn equal_timestamps_keep_arrival_order() {
        let mut log = MessageLog::new();
        let ts = Utc::now();
        let mk = |text: &str| ChatMessage {
            id: Uuid::new_v4(),
            text: text.to_string(),
            sender: Sender::Assistant,
            timestamp: ts,
        };

        log.merge(mk("a"));
        log.merge(mk("b"));
        log.merge(mk("c"));

        let texts: Vec<_> = log.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn history_replace_sorts_unordered_rows() {
        let mut log = MessageLog::new();
        log.replace_with_history(vec![
            msg_at(Sender::Assistant, "late", 30),
            msg_at(Sender::User, "early", 0),
            msg_at(Sender::User, "middle", 15),
        ]);

        assert!(log.is_ordered());
        assert_eq!(log.messages()[0].text, "early");
        assert_eq!(log.messages()[2].text, "late");
    }

    #[test]
    fn sender_round_trips_through_str() {
        assert_eq!(Sender::parse("user"), Some(Sender::User));
        assert_eq!(Sender::parse("assistant"), Some(Sender::Assistant));
        assert_eq!(Sender::parse("bot"), None);
        assert_eq!(Sender::User.to_string(), "user");
    }
}
