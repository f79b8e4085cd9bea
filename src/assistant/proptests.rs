//! Property-based tests for the dialogue engine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::content;
use super::intent::classify_intent;
use super::state::*;
use super::transition::*;
use super::Intent;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_size() -> impl Strategy<Value = SizePreference> {
    prop_oneof![
        Just(SizePreference::Small),
        Just(SizePreference::Medium),
        Just(SizePreference::Large),
        Just(SizePreference::ExtraLarge),
    ]
}

fn arb_texture() -> impl Strategy<Value = TexturePreference> {
    prop_oneof![
        Just(TexturePreference::Soft),
        Just(TexturePreference::Fluffy),
        Just(TexturePreference::Smooth),
        Just(TexturePreference::Textured),
    ]
}

fn arb_theme() -> impl Strategy<Value = StoryTheme> {
    prop_oneof![
        Just(StoryTheme::Bear),
        Just(StoryTheme::Bunny),
        Just(StoryTheme::Cat),
        Just(StoryTheme::Dog),
    ]
}

fn arb_step() -> impl Strategy<Value = RecommendationStep> {
    prop_oneof![
        Just(RecommendationStep::AskSize),
        Just(RecommendationStep::AskTexture),
        Just(RecommendationStep::Recommend),
    ]
}

fn arb_preferences() -> impl Strategy<Value = Preferences> {
    (
        proptest::option::of(arb_size()),
        proptest::option::of(arb_texture()),
        proptest::option::of("[a-z]{1,10}"),
        proptest::option::of("[0-9$ ]{1,6}"),
    )
        .prop_map(|(size, texture, animal_type, budget)| Preferences {
            size,
            texture,
            animal_type,
            budget,
        })
}

fn arb_state() -> impl Strategy<Value = SessionState> {
    prop_oneof![
        Just(SessionState::Idle),
        (arb_step(), arb_preferences())
            .prop_map(|(step, preferences)| SessionState::Recommendation { step, preferences }),
        proptest::option::of(arb_theme()).prop_map(|theme| SessionState::Story { theme }),
    ]
}

/// Free text mixed with the words the classifiers look for
fn arb_message() -> impl Strategy<Value = String> {
    prop_oneof![
        ".{0,60}",
        proptest::collection::vec(
            prop_oneof![
                Just("recommend"),
                Just("story"),
                Just("care"),
                Just("fact"),
                Just("hello"),
                Just("thanks"),
                Just("bye"),
                Just("tiny"),
                Just("EXTRA LARGE"),
                Just("fluffy"),
                Just("knit"),
                Just("bunny"),
                Just("puppy"),
                Just("plushie"),
                Just("the"),
            ],
            0..6
        )
        .prop_map(|words| words.join(" ")),
    ]
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Every input produces a non-empty reply
    #[test]
    fn prop_reply_never_empty(
        message in arb_message(),
        state in arb_state(),
        seed in any::<u64>(),
    ) {
        let reply = process_message(&message, &state, &mut StdRng::seed_from_u64(seed));
        prop_assert!(!reply.response.trim().is_empty());
    }

    /// Randomness only picks a variant; it never changes the intent or next state
    #[test]
    fn prop_classification_independent_of_rng(
        message in arb_message(),
        seed_a in any::<u64>(),
        seed_b in any::<u64>(),
    ) {
        let a = process_message(&message, &SessionState::Idle, &mut StdRng::seed_from_u64(seed_a));
        let b = process_message(&message, &SessionState::Idle, &mut StdRng::seed_from_u64(seed_b));
        prop_assert_eq!(a.intent, b.intent);
        prop_assert_eq!(a.intent, classify_intent(&message));
        prop_assert_eq!(a.new_state, b.new_state);
    }

    /// Only a recommendation can leave an idle session outside idle
    #[test]
    fn prop_stateless_intents_stay_idle(message in arb_message(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let reply = process_message(&message, &SessionState::Idle, &mut rng);
        if reply.intent == Intent::Recommendation {
            let is_recommendation = matches!(reply.new_state, SessionState::Recommendation { .. });
            prop_assert!(is_recommendation);
        } else {
            prop_assert_eq!(reply.new_state, SessionState::Idle);
        }
    }

    /// The recommendation flow always takes exactly three exchanges
    #[test]
    fn prop_recommendation_flow_structure(
        size_answer in arb_message(),
        texture_answer in arb_message(),
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);

        let first = process_message("please recommend something", &SessionState::Idle, &mut rng);
        prop_assert_eq!(
            &first.new_state,
            &SessionState::Recommendation {
                step: RecommendationStep::AskTexture,
                preferences: Preferences::default(),
            }
        );

        let second = process_message(&size_answer, &first.new_state, &mut rng);
        match &second.new_state {
            SessionState::Recommendation { step, preferences } => {
                prop_assert_eq!(*step, RecommendationStep::Recommend);
                prop_assert!(preferences.size.is_some());
            }
            other => prop_assert!(false, "expected recommendation state, got {:?}", other),
        }

        let third = process_message(&texture_answer, &second.new_state, &mut rng);
        prop_assert_eq!(third.new_state, SessionState::Idle);
        prop_assert_eq!(third.intent, Intent::Recommendation);
        prop_assert!(!third.response.is_empty());
    }

    /// Any story exchange ends the story flow
    #[test]
    fn prop_story_always_finishes(
        message in arb_message(),
        theme in proptest::option::of(arb_theme()),
        seed in any::<u64>(),
    ) {
        let reply = process_message(
            &message,
            &SessionState::Story { theme },
            &mut StdRng::seed_from_u64(seed),
        );
        prop_assert_eq!(reply.new_state, SessionState::Idle);
        prop_assert!(reply.response.contains("The End"));
    }

    /// Care replies are always one of the care templates
    #[test]
    fn prop_care_reply_is_template(seed in any::<u64>()) {
        let reply = process_message(
            "How do I care for my plushies?",
            &SessionState::Idle,
            &mut StdRng::seed_from_u64(seed),
        );
        prop_assert!(content::CARE_TIPS.contains(&reply.response.as_str()));
        prop_assert_eq!(reply.new_state, SessionState::Idle);
    }

    /// States survive a JSON round trip through storage
    #[test]
    fn prop_state_json_round_trip(state in arb_state()) {
        let json = serde_json::to_string(&state).unwrap();
        let parsed: SessionState = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(parsed, state);
    }
}
