//! Pure dialogue transition function
//!
//! Given a user message and the current session state, produce a reply and
//! the next state. No I/O; the only source of variation is the injected
//! random number generator, which picks among equally valid canned replies.

use super::content;
use super::intent::{
    classify_intent, classify_size, classify_texture, detect_small_talk, detect_theme, Intent,
    SmallTalk,
};
use super::state::{Preferences, RecommendationStep, SessionState, SizePreference, StoryTheme};
use rand::seq::SliceRandom;
use rand::Rng;

/// Result of processing one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub response: String,
    pub new_state: SessionState,
    /// Handler that produced the reply
    pub intent: Intent,
}

impl Reply {
    fn new(response: impl Into<String>, new_state: SessionState, intent: Intent) -> Self {
        Self {
            response: response.into(),
            new_state,
            intent,
        }
    }

    fn idle(response: impl Into<String>, intent: Intent) -> Self {
        Self::new(response, SessionState::Idle, intent)
    }
}

/// Process a user message.
///
/// A flow already in progress takes precedence over whatever the new
/// message looks like; only an idle session classifies the message.
pub fn process_message<R: Rng + ?Sized>(
    message: &str,
    state: &SessionState,
    rng: &mut R,
) -> Reply {
    match state {
        SessionState::Recommendation { step, preferences } => {
            continue_recommendation(*step, preferences, message)
        }
        SessionState::Story { theme } => tell_story(message, *theme, rng),
        SessionState::Idle => match classify_intent(message) {
            Intent::Recommendation => continue_recommendation(
                RecommendationStep::AskSize,
                &Preferences::default(),
                message,
            ),
            Intent::Story => tell_story(message, None, rng),
            Intent::Care => Reply::idle(pick(content::CARE_TIPS, rng), Intent::Care),
            Intent::Facts => Reply::idle(pick(content::FACTS, rng), Intent::Facts),
            Intent::General => general_reply(message, rng),
        },
    }
}

// ============================================================
// Recommendation Flow
// ============================================================

fn continue_recommendation(
    step: RecommendationStep,
    preferences: &Preferences,
    message: &str,
) -> Reply {
    match step {
        // Entry: message content is not used
        RecommendationStep::AskSize => Reply::new(
            content::SIZE_QUESTION,
            SessionState::Recommendation {
                step: RecommendationStep::AskTexture,
                preferences: preferences.clone(),
            },
            Intent::Recommendation,
        ),

        RecommendationStep::AskTexture => {
            let size = classify_size(message);
            Reply::new(
                content::texture_question(size),
                SessionState::Recommendation {
                    step: RecommendationStep::Recommend,
                    preferences: Preferences {
                        size: Some(size),
                        ..preferences.clone()
                    },
                },
                Intent::Recommendation,
            )
        }

        RecommendationStep::Recommend => {
            // A stored session may reach this step without a size
            let size = preferences.size.unwrap_or(SizePreference::Medium);
            let texture = classify_texture(message);
            Reply::idle(
                content::recommendation_text(size, texture),
                Intent::Recommendation,
            )
        }
    }
}

// ============================================================
// Story Flow
// ============================================================

fn tell_story<R: Rng + ?Sized>(message: &str, stored: Option<StoryTheme>, rng: &mut R) -> Reply {
    let theme = detect_theme(message).or(stored).unwrap_or(StoryTheme::Bear);
    Reply::idle(pick(content::stories_for(theme), rng), Intent::Story)
}

// ============================================================
// General
// ============================================================

fn general_reply<R: Rng + ?Sized>(message: &str, rng: &mut R) -> Reply {
    let response = match detect_small_talk(message) {
        Some(SmallTalk::Greeting) => content::GREETING_REPLY,
        Some(SmallTalk::Thanks) => content::THANKS_REPLY,
        Some(SmallTalk::Farewell) => content::FAREWELL_REPLY,
        None => pick(content::GENERIC_PROMPTS, rng),
    };
    Reply::idle(response, Intent::General)
}

fn pick<R: Rng + ?Sized>(templates: &'static [&'static str], rng: &mut R) -> &'static str {
    templates
        .choose(rng)
        .copied()
        .unwrap_or(content::GENERIC_PROMPTS[0])
}
