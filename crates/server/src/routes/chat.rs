use std::convert::Infallible;

use axum::{
    extract::State,
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use chrono::Utc;
use tokio_stream::{wrappers::BroadcastStream, Stream, StreamExt};

use callsheet_api::{
    db, service, ChatHistoryResponse, ChatMessage, ErrorBody, SendMessageRequest,
    SendMessageResponse, Sender, SSE_EVENT_ASSISTANT_ERROR, SSE_EVENT_MESSAGE,
};

use crate::assistant::AssistantClient;
use crate::error::ApiErr;
use crate::events::{ChatEvent, EventBus};
use crate::storage::{message_from_row, sq_execute, sq_query_map, Db};
use crate::AppState;

/// GET /api/chat/messages — full history, ordered by timestamp ascending.
pub async fn history(State(db): State<Db>) -> Result<Json<ChatHistoryResponse>, ApiErr> {
    let conn = db.conn();
    let messages = sq_query_map(&conn, db::messages::list_ordered(), message_from_row)
        .map_err(ApiErr::from_db("list messages"))?;
    Ok(Json(ChatHistoryResponse { messages }))
}

/// POST /api/chat/send — persist the user message and kick off the assistant.
///
/// Returns 202 with the persisted user row. The assistant reply is delivered
/// only via `/api/chat/stream`, never in this response. A provider failure
/// surfaces as an `assistant_error` stream event; the user message stays.
pub async fn send(
    State(state): State<AppState>,
    Json(req): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<SendMessageResponse>), ApiErr> {
    let text = service::validate_message_text(&req.message)?;

    // The client-chosen id is echoed back so the optimistic entry and this
    // row reconcile by id.
    let user_msg = ChatMessage {
        id: req.id,
        text,
        sender: Sender::User,
        timestamp: Utc::now(),
    };

    {
        let conn = state.db.conn();
        sq_execute(&conn, db::messages::insert(&user_msg))
            .map_err(ApiErr::from_db("insert user message"))?;
    }
    state
        .events
        .publish(ChatEvent::MessageInserted(user_msg.clone()));

    tokio::spawn(run_assistant_turn(
        state.db.clone(),
        state.events.clone(),
        state.assistant.clone(),
        user_msg.text.clone(),
    ));

    Ok((
        StatusCode::ACCEPTED,
        Json(SendMessageResponse { message: user_msg }),
    ))
}

async fn run_assistant_turn(db: Db, events: EventBus, assistant: AssistantClient, text: String) {
    match assistant.reply(&text).await {
        Ok(reply) => {
            let msg = ChatMessage::new(Sender::Assistant, reply);
            let inserted = {
                let conn = db.conn();
                sq_execute(&conn, db::messages::insert(&msg))
            };
            match inserted {
                Ok(_) => events.publish(ChatEvent::MessageInserted(msg)),
                Err(e) => {
                    tracing::error!("insert assistant message: {e}");
                    events.publish(ChatEvent::AssistantError(
                        "failed to store assistant reply".into(),
                    ));
                }
            }
        }
        Err(e) => {
            tracing::error!("assistant reply failed: {e}");
            events.publish(ChatEvent::AssistantError(e.to_string()));
        }
    }
}

/// GET /api/chat/stream — realtime insert feed (SSE).
pub async fn stream(
    State(events): State<EventBus>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = events.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|event| match event {
        Ok(ChatEvent::MessageInserted(msg)) => Event::default()
            .event(SSE_EVENT_MESSAGE)
            .json_data(&msg)
            .ok()
            .map(Ok),
        Ok(ChatEvent::AssistantError(error)) => Event::default()
            .event(SSE_EVENT_ASSISTANT_ERROR)
            .json_data(&ErrorBody { error })
            .ok()
            .map(Ok),
        // A lagged receiver skips what it missed; history re-fetch covers it.
        Err(_) => None,
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::{AssistantClient, AssistantConfig};
    use crate::storage::init_db_in_memory;
    use uuid::Uuid;

    fn test_state() -> AppState {
        let config = AssistantConfig {
            api_key: None,
            api_base: "http://unused".into(),
            chat_model: "unused".into(),
            image_model: "unused".into(),
        };
        AppState {
            db: init_db_in_memory().unwrap(),
            events: EventBus::default(),
            assistant: AssistantClient::new(config, callsheet_core::sample::production_board())
                .unwrap(),
        }
    }

    #[tokio::test]
    async fn blank_send_is_rejected_with_no_side_effects() {
        let state = test_state();
        let req = SendMessageRequest {
            id: Uuid::new_v4(),
            message: "   ".into(),
        };
        let result = send(State(state.clone()), Json(req)).await;
        assert!(result.is_err());

        let conn = state.db.conn();
        let rows = sq_query_map(&conn, db::messages::list_ordered(), message_from_row).unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn send_persists_user_row_and_defers_the_reply() {
        let state = test_state();
        let mut rx = state.events.subscribe();
        let id = Uuid::new_v4();
        let req = SendMessageRequest {
            id,
            message: "When is the next shoot?".into(),
        };

        let (status, Json(resp)) = send(State(state.clone()), Json(req)).await.unwrap();
        assert_eq!(status, StatusCode::ACCEPTED);
        // Echoed id, user sender, no assistant text in the response.
        assert_eq!(resp.message.id, id);
        assert_eq!(resp.message.sender, Sender::User);

        // First event is the user insert, second the assistant reply
        // produced by the background turn.
        match rx.recv().await.unwrap() {
            ChatEvent::MessageInserted(m) => assert_eq!(m.id, id),
            other => panic!("unexpected event: {other:?}"),
        }
        match rx.recv().await.unwrap() {
            ChatEvent::MessageInserted(m) => {
                assert_eq!(m.sender, Sender::Assistant);
                assert!(m.timestamp >= resp.message.timestamp);
            }
            other => panic!("unexpected event: {other:?}"),
        }

        let conn = state.db.conn();
        let rows = sq_query_map(&conn, db::messages::list_ordered(), message_from_row).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sender, Sender::User);
        assert_eq!(rows[1].sender, Sender::Assistant);
    }
}
