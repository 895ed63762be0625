//! Crew roster and script-tracking records.
//!
//! Plain list-CRUD entities; behavior lives in the server routes and the
//! status enums here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Availability of a crew member.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CrewStatus {
    #[default]
    Active,
    OnLeave,
    Wrapped,
}

impl CrewStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::OnLeave => "on_leave",
            Self::Wrapped => "wrapped",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "on_leave" => Some(Self::OnLeave),
            "wrapped" => Some(Self::Wrapped),
            _ => None,
        }
    }
}

impl std::fmt::Display for CrewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CrewMember {
    pub id: Uuid,
    pub name: String,
    pub role: String,
    pub status: CrewStatus,
    #[serde(default)]
    pub notes: String,
}

impl CrewMember {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            role: role.into(),
            status: CrewStatus::Active,
            notes: String::new(),
        }
    }
}

/// Review state of a script.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScriptStatus {
    #[default]
    Draft,
    InReview,
    NeedsRevisions,
    Approved,
}

impl ScriptStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Draft => "draft",
            Self::InReview => "in_review",
            Self::NeedsRevisions => "needs_revisions",
            Self::Approved => "approved",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "in_review" => Some(Self::InReview),
            "needs_revisions" => Some(Self::NeedsRevisions),
            "approved" => Some(Self::Approved),
            _ => None,
        }
    }
}

impl std::fmt::Display for ScriptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Script {
    pub id: Uuid,
    pub title: String,
    pub scene_number: String,
    pub assigned_to: String,
    pub status: ScriptStatus,
    #[serde(default)]
    pub description: String,
    pub updated_at: DateTime<Utc>,
}

impl Script {
    pub fn new(
        title: impl Into<String>,
        scene_number: impl Into<String>,
        assigned_to: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            scene_number: scene_number.into(),
            assigned_to: assigned_to.into(),
            status: ScriptStatus::Draft,
            description: String::new(),
            updated_at: Utc::now(),
        }
    }

    /// Case-insensitive match over title, scene number, and assignee —
    /// mirrors the script search box.
    pub fn matches(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        self.title.to_lowercase().contains(&q)
            || self.scene_number.to_lowercase().contains(&q)
            || self.assigned_to.to_lowercase().contains(&q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_strings_round_trip() {
        for s in [
            CrewStatus::Active,
            CrewStatus::OnLeave,
            CrewStatus::Wrapped,
        ] {
            assert_eq!(CrewStatus::parse(s.as_str()), Some(s));
        }
        for s in [
            ScriptStatus::Draft,
            ScriptStatus::InReview,
            ScriptStatus::NeedsRevisions,
            ScriptStatus::Approved,
        ] {
            assert_eq!(ScriptStatus::parse(s.as_str()), Some(s));
        }
        assert_eq!(ScriptStatus::parse("archived"), None);
    }

    #[test]
    fn script_search_matches_title_scene_and_assignee() {
        let mut script = Script::new("Desert Chase Scene", "Scene 12", "Ahmed Al-Farsi");
        script.status = ScriptStatus::Approved;

        assert!(script.matches("desert"));
        assert!(script.matches("scene 12"));
        assert!(script.matches("al-farsi"));
        assert!(!script.matches("palace"));
    }
}
