//! Chat session orchestration: local message log, optimistic sends, and the
//! realtime subscription that delivers assistant replies.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;

use callsheet_api::{
    ChatMessage, ErrorBody, MessageLog, SendMessageRequest, Sender, SSE_EVENT_ASSISTANT_ERROR,
    SSE_EVENT_MESSAGE,
};

use crate::client::ApiClient;
use crate::sse::SseParser;

const RECONNECT_DELAY: Duration = Duration::from_secs(1);
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Whether a send is currently in flight. A UI-level guard; not required for
/// correctness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SendState {
    #[default]
    Idle,
    Sending,
}

/// One event off the realtime stream.
#[derive(Debug, Clone)]
pub enum ChatEvent {
    Message(ChatMessage),
    AssistantError(String),
}

/// Handle for a live subscription. Dropping it aborts the reader task.
pub struct Subscription {
    events: mpsc::Receiver<ChatEvent>,
    task: tokio::task::JoinHandle<()>,
}

impl Subscription {
    /// Next event, or `None` once the reader has stopped.
    pub async fn recv(&mut self) -> Option<ChatEvent> {
        self.events.recv().await
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// The message store plus send orchestration.
///
/// `send` appends the user message optimistically before any network work and
/// never rolls it back; the assistant reply arrives only through the
/// subscription. A failed send surfaces the error and leaves the log as-is,
/// so re-submission is the caller's choice.
pub struct ChatSession {
    client: Arc<ApiClient>,
    log: MessageLog,
    state: SendState,
}

impl ChatSession {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            log: MessageLog::default(),
            state: SendState::Idle,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.log.messages()
    }

    pub fn state(&self) -> SendState {
        self.state
    }

    /// Populate the log from the server. A fetch failure is logged and leaves
    /// the log empty rather than failing the session.
    pub async fn load_history(&mut self) {
        match self.client.chat_history().await {
            Ok(resp) => self.log.replace_with_history(resp.messages),
            Err(e) => tracing::warn!("failed to load chat history: {e:#}"),
        }
    }

    /// Spawn a reader over `/chat/stream`. The stream reconnects after a
    /// short delay if it drops; duplicates across reconnects collapse in
    /// [`Self::apply`] by message id.
    pub fn subscribe(&self) -> Subscription {
        let client = self.client.clone();
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let task = tokio::spawn(async move {
            loop {
                if let Err(e) = read_stream(&client, &tx).await {
                    if tx.is_closed() {
                        return;
                    }
                    tracing::warn!("chat stream dropped, reconnecting: {e:#}");
                }
                tokio::time::sleep(RECONNECT_DELAY).await;
            }
        });
        Subscription { events: rx, task }
    }

    /// Fold a stream event into the log. Message inserts merge by id, so the
    /// server echo of an optimistic send is a no-op.
    pub fn apply(&mut self, event: &ChatEvent) {
        if let ChatEvent::Message(msg) = event {
            self.log.merge(msg.clone());
        }
    }

    /// Send one user message.
    ///
    /// Blank-after-trim input is a no-op: the log is untouched and no request
    /// is issued. Otherwise the message is appended synchronously before the
    /// POST; on failure the error propagates and the optimistic entry stays.
    pub async fn send(&mut self, text: &str) -> Result<Option<ChatMessage>> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let msg = ChatMessage::new(Sender::User, trimmed);
        self.log.merge(msg.clone());
        self.state = SendState::Sending;

        let result = self
            .client
            .send_message(&SendMessageRequest {
                id: msg.id,
                message: msg.text.clone(),
            })
            .await;
        self.state = SendState::Idle;

        result?;
        Ok(Some(msg))
    }
}

async fn read_stream(client: &ApiClient, tx: &mpsc::Sender<ChatEvent>) -> Result<()> {
    let mut resp = client.open_chat_stream().await?;
    let mut parser = SseParser::new();

    while let Some(chunk) = resp.chunk().await? {
        for frame in parser.feed(&chunk) {
            let event = match frame.event.as_str() {
                SSE_EVENT_MESSAGE => match serde_json::from_str::<ChatMessage>(&frame.data) {
                    Ok(msg) => ChatEvent::Message(msg),
                    Err(e) => {
                        tracing::warn!("malformed message frame: {e}");
                        continue;
                    }
                },
                SSE_EVENT_ASSISTANT_ERROR => {
                    let error = serde_json::from_str::<ErrorBody>(&frame.data)
                        .map(|b| b.error)
                        .unwrap_or(frame.data);
                    ChatEvent::AssistantError(error)
                }
                _ => continue,
            };
            if tx.send(event).await.is_err() {
                return Ok(());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_session() -> ChatSession {
        // Nothing listens on port 9; connections fail fast.
        let client = ApiClient::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
        ChatSession::new(Arc::new(client))
    }

    #[tokio::test]
    async fn blank_send_is_a_no_op() {
        let mut session = unreachable_session();
        let sent = session.send("   \n\t").await.unwrap();
        assert!(sent.is_none());
        assert!(session.messages().is_empty());
        assert_eq!(session.state(), SendState::Idle);
    }

    #[tokio::test]
    async fn failed_send_keeps_the_optimistic_message() {
        let mut session = unreachable_session();
        let err = session.send("Hello").await;
        assert!(err.is_err());
        // No rollback, and the state returns to Idle for re-submission.
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].text, "Hello");
        assert_eq!(session.messages()[0].sender, Sender::User);
        assert_eq!(session.state(), SendState::Idle);
    }

    #[tokio::test]
    async fn load_history_failure_is_non_fatal() {
        let mut session = unreachable_session();
        session.load_history().await;
        assert!(session.messages().is_empty());
    }

    #[tokio::test]
    async fn applying_the_server_echo_does_not_duplicate() {
        let mut session = unreachable_session();
        let msg = ChatMessage::new(Sender::User, "Hi");
        session.log.merge(msg.clone());

        session.apply(&ChatEvent::Message(msg.clone()));
        assert_eq!(session.messages().len(), 1);

        let reply = ChatMessage::new(Sender::Assistant, "Hello there");
        session.apply(&ChatEvent::Message(reply));
        assert_eq!(session.messages().len(), 2);
    }
}
