//! Keyword classification of user messages
//!
//! All matching is case-insensitive substring matching over ordered tables.
//! The order of each table is part of its behavior: the first entry whose
//! keywords appear in the message wins.

use super::state::{SizePreference, StoryTheme, TexturePreference};
use serde::Serialize;

/// Coarse category of a fresh message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Recommendation,
    Story,
    Care,
    Facts,
    General,
}

/// Intent rules, checked top to bottom. `General` is the fallback.
const INTENT_RULES: &[(Intent, &[&str])] = &[
    (
        Intent::Recommendation,
        &["recommend", "suggest", "help me choose", "which plushie"],
    ),
    (Intent::Story, &["story", "tale", "tell me about"]),
    (Intent::Care, &["care", "clean", "wash", "maintain"]),
    (Intent::Facts, &["fact", "history", "origin"]),
];

// "extra large" has to be tried before "large".
const SIZE_RULES: &[(SizePreference, &[&str])] = &[
    (
        SizePreference::ExtraLarge,
        &["extra large", "extra-large", "xl", "huge", "giant", "jumbo"],
    ),
    (
        SizePreference::Small,
        &["small", "tiny", "mini", "pocket", "little"],
    ),
    (SizePreference::Large, &["large", "big"]),
    (
        SizePreference::Medium,
        &["medium", "mid", "average", "regular"],
    ),
];

// "plush" is deliberately absent: nearly every message says "plushie".
const TEXTURE_RULES: &[(TexturePreference, &[&str])] = &[
    (TexturePreference::Fluffy, &["fluffy", "fuzzy", "furry"]),
    (
        TexturePreference::Smooth,
        &["smooth", "silky", "minky", "velvet"],
    ),
    (
        TexturePreference::Textured,
        &["textur", "bumpy", "knit", "crochet", "corduroy"],
    ),
    (TexturePreference::Soft, &["soft", "squish", "cuddl"]),
];

const THEME_RULES: &[(StoryTheme, &[&str])] = &[
    (StoryTheme::Bear, &["bear", "teddy"]),
    (StoryTheme::Bunny, &["bunny", "rabbit"]),
    (StoryTheme::Cat, &["cat", "kitty"]),
    (StoryTheme::Dog, &["dog", "puppy"]),
];

const GREETING_WORDS: &[&str] = &["hi", "hey", "hello", "howdy", "greetings"];
const GREETING_PHRASES: &[&str] = &["good morning", "good afternoon", "good evening"];
const THANKS_KEYWORDS: &[&str] = &["thank", "thx", "appreciate"];
const FAREWELL_KEYWORDS: &[&str] = &["bye", "see you", "good night", "farewell"];

/// Social small talk recognized by the general handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmallTalk {
    Greeting,
    Thanks,
    Farewell,
}

fn first_match<T: Copy>(rules: &[(T, &[&str])], lowered: &str) -> Option<T> {
    rules
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(value, _)| *value)
}

/// Classify a message that arrives while no flow is in progress
pub fn classify_intent(message: &str) -> Intent {
    first_match(INTENT_RULES, &message.to_lowercase()).unwrap_or(Intent::General)
}

/// Size answer for step 1 of the recommendation flow; medium when nothing matches
pub fn classify_size(message: &str) -> SizePreference {
    first_match(SIZE_RULES, &message.to_lowercase()).unwrap_or(SizePreference::Medium)
}

/// Texture answer for step 2 of the recommendation flow; soft when nothing matches
pub fn classify_texture(message: &str) -> TexturePreference {
    first_match(TEXTURE_RULES, &message.to_lowercase()).unwrap_or(TexturePreference::Soft)
}

/// Story character family mentioned in the message, if any
pub fn detect_theme(message: &str) -> Option<StoryTheme> {
    first_match(THEME_RULES, &message.to_lowercase())
}

/// Greeting, thanks or farewell, checked in that order.
///
/// Single greeting words match whole words only so "this" or "which" do not
/// read as "hi".
pub fn detect_small_talk(message: &str) -> Option<SmallTalk> {
    let lowered = message.to_lowercase();
    let is_greeting = lowered
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| GREETING_WORDS.contains(&word))
        || GREETING_PHRASES.iter().any(|p| lowered.contains(p));

    if is_greeting {
        Some(SmallTalk::Greeting)
    } else if THANKS_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        Some(SmallTalk::Thanks)
    } else if FAREWELL_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        Some(SmallTalk::Farewell)
    } else {
        None
    }
}
