pub mod chat;
pub mod client;
pub mod sse;

pub use callsheet_api;
pub use chat::{ChatEvent, ChatSession, SendState, Subscription};
pub use client::ApiClient;
