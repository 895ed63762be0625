use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use callsheet_api::{ChatMessage, Sender};
use callsheet_api_client::{ApiClient, ChatEvent, ChatSession};

/// Interactive assistant loop. Sent messages appear immediately; assistant
/// replies arrive over the realtime stream.
pub async fn run_chat(client: Arc<ApiClient>) -> Result<()> {
    let mut session = ChatSession::new(client);

    session.load_history().await;
    for msg in session.messages() {
        print_message(msg);
    }

    let mut subscription = session.subscribe();
    println!("Type a message and press Enter. Ctrl-D exits.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            event = subscription.recv() => {
                let Some(event) = event else {
                    anyhow::bail!("chat stream closed");
                };
                session.apply(&event);
                match event {
                    // Our own sends were printed optimistically already.
                    ChatEvent::Message(msg) if msg.sender == Sender::Assistant => {
                        print_message(&msg);
                    }
                    ChatEvent::Message(_) => {}
                    ChatEvent::AssistantError(e) => eprintln!("assistant error: {e}"),
                }
            }
            line = lines.next_line() => {
                let Some(text) = line? else { break };
                match session.send(&text).await {
                    Ok(Some(msg)) => print_message(&msg),
                    Ok(None) => {} // blank input
                    // The message stays in the log; a re-send is up to the user.
                    Err(e) => eprintln!("Error: {e:#}"),
                }
            }
        }
    }
    Ok(())
}

fn print_message(msg: &ChatMessage) {
    let time = msg.timestamp.with_timezone(&chrono::Local).format("%H:%M");
    println!("[{time}] {}: {}", msg.sender, msg.text);
}
