//! Assistant session state types

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Preference Types
// ============================================================================

/// Plushie size the user asked for during a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizePreference {
    #[serde(rename = "small")]
    Small,
    #[serde(rename = "medium")]
    Medium,
    #[serde(rename = "large")]
    Large,
    #[serde(rename = "extra large")]
    ExtraLarge,
}

impl SizePreference {
    pub fn label(self) -> &'static str {
        match self {
            SizePreference::Small => "small",
            SizePreference::Medium => "medium",
            SizePreference::Large => "large",
            SizePreference::ExtraLarge => "extra large",
        }
    }
}

impl fmt::Display for SizePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Plushie texture the user asked for during a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TexturePreference {
    Soft,
    Fluffy,
    Smooth,
    Textured,
}

impl TexturePreference {
    pub fn label(self) -> &'static str {
        match self {
            TexturePreference::Soft => "soft",
            TexturePreference::Fluffy => "fluffy",
            TexturePreference::Smooth => "smooth",
            TexturePreference::Textured => "textured",
        }
    }
}

impl fmt::Display for TexturePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Answers accumulated across the recommendation flow.
///
/// `animal_type` and `budget` are carried for layout compatibility with
/// stored sessions; the flow itself only fills `size` and `texture`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<SizePreference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<TexturePreference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animal_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
}

// ============================================================================
// Flow Markers
// ============================================================================

/// Progress marker inside the recommendation flow.
///
/// Stored as the integers 0, 1 and 2; anything else is rejected when a
/// session is deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RecommendationStep {
    /// Flow just started: ask for a size
    AskSize,
    /// Waiting for the size answer, then ask for a texture
    AskTexture,
    /// Waiting for the texture answer, then recommend
    Recommend,
}

impl From<RecommendationStep> for u8 {
    fn from(step: RecommendationStep) -> Self {
        match step {
            RecommendationStep::AskSize => 0,
            RecommendationStep::AskTexture => 1,
            RecommendationStep::Recommend => 2,
        }
    }
}

impl TryFrom<u8> for RecommendationStep {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(RecommendationStep::AskSize),
            1 => Ok(RecommendationStep::AskTexture),
            2 => Ok(RecommendationStep::Recommend),
            other => Err(format!("recommendation step out of range: {other}")),
        }
    }
}

/// Character family used to pick a story
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryTheme {
    Bear,
    Bunny,
    Cat,
    Dog,
}

// ============================================================================
// Session State
// ============================================================================

/// Which multi-turn flow, if any, is in progress.
///
/// Each variant carries only the fields that are valid for that mode, so a
/// step without a recommendation flow cannot be represented.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SessionState {
    /// No flow in progress; the next message is classified afresh
    #[default]
    Idle,

    /// Recommendation flow in progress
    Recommendation {
        #[serde(rename = "recommendationStep")]
        step: RecommendationStep,
        #[serde(default)]
        preferences: Preferences,
    },

    /// Story flow in progress
    Story {
        #[serde(
            rename = "storyTheme",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        theme: Option<StoryTheme>,
    },
}

impl SessionState {
    /// Wire name of the current mode
    pub fn mode(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Recommendation { .. } => "recommendation",
            SessionState::Story { .. } => "story",
        }
    }

    #[allow(dead_code)] // State query utility
    pub fn is_idle(&self) -> bool {
        matches!(self, SessionState::Idle)
    }
}
