pub mod assist;
pub mod chat;
pub mod prompt;
pub mod roster;
pub mod sample;
pub mod schedule;

pub use chat::{ChatMessage, MessageLog, Sender};
pub use prompt::{Lighting, Mood, SceneRender, Style, VisualPrompt};
pub use roster::{CrewMember, CrewStatus, Script, ScriptStatus};
pub use schedule::{DayBucket, Priority, ScheduledItem};
