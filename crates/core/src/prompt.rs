//! Scene-visualization prompt composition.
//!
//! The image provider receives one natural-language prompt: the scene
//! description plus style, mood, and lighting qualifiers, comma-joined.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    #[default]
    Cinematic,
    Documentary,
    Artistic,
    Realistic,
}

impl Style {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Cinematic => "cinematic",
            Self::Documentary => "documentary",
            Self::Artistic => "artistic",
            Self::Realistic => "realistic",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cinematic" => Some(Self::Cinematic),
            "documentary" => Some(Self::Documentary),
            "artistic" => Some(Self::Artistic),
            "realistic" => Some(Self::Realistic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    #[default]
    Dramatic,
    Suspenseful,
    Peaceful,
    Tense,
}

impl Mood {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Dramatic => "dramatic",
            Self::Suspenseful => "suspenseful",
            Self::Peaceful => "peaceful",
            Self::Tense => "tense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "dramatic" => Some(Self::Dramatic),
            "suspenseful" => Some(Self::Suspenseful),
            "peaceful" => Some(Self::Peaceful),
            "tense" => Some(Self::Tense),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Lighting {
    #[default]
    GoldenHour,
    LowKey,
    HighKey,
    Natural,
}

impl Lighting {
    pub fn as_str(&self) -> &str {
        match self {
            Self::GoldenHour => "golden-hour",
            Self::LowKey => "low-key",
            Self::HighKey => "high-key",
            Self::Natural => "natural",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "golden-hour" => Some(Self::GoldenHour),
            "low-key" => Some(Self::LowKey),
            "high-key" => Some(Self::HighKey),
            "natural" => Some(Self::Natural),
            _ => None,
        }
    }
}

/// Prompt fields for one visualization request. Persisted alongside the
/// resulting image URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VisualPrompt {
    pub description: String,
    #[serde(default)]
    pub style: Style,
    #[serde(default)]
    pub mood: Mood,
    #[serde(default)]
    pub lighting: Lighting,
}

impl VisualPrompt {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            style: Style::default(),
            mood: Mood::default(),
            lighting: Lighting::default(),
        }
    }

    /// Comma-joined prompt text sent to the image model.
    pub fn compose(&self) -> String {
        format!(
            "{}, {} style, {} mood, {} lighting",
            self.description.trim(),
            self.style.as_str(),
            self.mood.as_str(),
            self.lighting.as_str()
        )
    }
}

/// A persisted visualization result: the originating prompt fields plus the
/// image URL returned by the provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SceneRender {
    pub id: Uuid,
    #[serde(flatten)]
    pub prompt: VisualPrompt,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

impl SceneRender {
    pub fn new(prompt: VisualPrompt, image_url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            prompt,
            image_url: image_url.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_joins_fields_with_commas() {
        let prompt = VisualPrompt {
            description: "A low-angle shot of an old market at dusk".into(),
            style: Style::Cinematic,
            mood: Mood::Dramatic,
            lighting: Lighting::GoldenHour,
        };
        assert_eq!(
            prompt.compose(),
            "A low-angle shot of an old market at dusk, cinematic style, dramatic mood, golden-hour lighting"
        );
    }

    #[test]
    fn compose_trims_description_whitespace() {
        let prompt = VisualPrompt::new("  courtyard at noon  ");
        assert!(prompt.compose().starts_with("courtyard at noon,"));
    }
}
