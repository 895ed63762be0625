//! Shared API types, validation, and SQL builders for callsheet.
//!
//! This crate is the single source of truth for every request/response shape
//! exchanged between the server, the API client, and the CLI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "backend")]
pub mod db;
pub mod service;

pub use service::ServiceError;

// Re-export domain types for convenience
pub use callsheet_core::{
    ChatMessage, CrewMember, CrewStatus, DayBucket, Lighting, MessageLog, Mood, Priority,
    SceneRender, ScheduledItem, Script, ScriptStatus, Sender, Style, VisualPrompt,
};

// ─── SSE event names ─────────────────────────────────────────────────────────

/// `/api/chat/stream` event carrying a freshly inserted [`ChatMessage`] row.
pub const SSE_EVENT_MESSAGE: &str = "message";
/// Event carrying `{"error": …}` when the assistant provider fails.
pub const SSE_EVENT_ASSISTANT_ERROR: &str = "assistant_error";

// ─── Generic responses ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

// ─── Chat ────────────────────────────────────────────────────────────────────

/// Body of `POST /api/chat/send`.
///
/// The client generates the message id up front; the server echoes it back on
/// the persisted row so the optimistic local entry and the authoritative copy
/// reconcile by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub id: Uuid,
    pub message: String,
}

/// `202 Accepted` body: the persisted user row. The assistant reply arrives
/// only on the realtime stream, never here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub message: ChatMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatHistoryResponse {
    pub messages: Vec<ChatMessage>,
}

// ─── Schedule ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleQuery {
    /// `today | tomorrow | week`; omitted means the grouped view.
    #[serde(default)]
    pub bucket: Option<String>,
}

/// Grouped view: items starting today vs everything later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub current: Vec<ScheduledItem>,
    pub upcoming: Vec<ScheduledItem>,
}

/// Single-bucket view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleBucketResponse {
    pub bucket: DayBucket,
    pub items: Vec<ScheduledItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleItemCreateRequest {
    pub title: String,
    pub location: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub participants: u32,
}

// ─── Crew ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrewListQuery {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewListResponse {
    pub members: Vec<CrewMember>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewCreateRequest {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrewUpdateRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub status: Option<CrewStatus>,
    #[serde(default)]
    pub notes: Option<String>,
}

// ─── Scripts ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScriptListQuery {
    #[serde(default)]
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptListResponse {
    pub scripts: Vec<Script>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptCreateRequest {
    pub title: String,
    pub scene_number: String,
    pub assigned_to: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScriptUpdateRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub scene_number: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub status: Option<ScriptStatus>,
    #[serde(default)]
    pub description: Option<String>,
}

// ─── Scene visualization ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualizeRequest {
    pub description: String,
    #[serde(default)]
    pub style: Style,
    #[serde(default)]
    pub mood: Mood,
    #[serde(default)]
    pub lighting: Lighting,
}

impl VisualizeRequest {
    pub fn into_prompt(self) -> VisualPrompt {
        VisualPrompt {
            description: self.description,
            style: self.style,
            mood: self.mood,
            lighting: self.lighting,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualizeResponse {
    pub render: SceneRender,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderListResponse {
    pub renders: Vec<SceneRender>,
}

// ─── Dashboard stats ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsResponse {
    pub messages: i64,
    pub schedule_items: i64,
    pub schedule_today: i64,
    pub crew_total: i64,
    pub crew_active: i64,
    pub scripts_total: i64,
    pub scripts_approved: i64,
    pub renders: i64,
}
