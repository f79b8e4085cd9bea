//! Canned reply tables
//!
//! Content lives here as immutable data; the transition code only picks
//! entries from these tables.

use super::state::{SizePreference, StoryTheme, TexturePreference};

pub const CARE_TIPS: &[&str] = &[
    "🧼 Plushie Care Guide: Everyday Cleaning\n\n\
     • Spot clean first: a damp cloth with a drop of mild soap handles most marks.\n\
     • Check the tag before anything goes in a machine. If it says surface wash only, believe it.\n\
     • For machine-safe friends, use a mesh laundry bag, cold water and the gentlest cycle.\n\
     • Air dry flat and away from direct sun or radiators, then fluff the fur with a soft brush.\n\n\
     Your plushie will thank you with years of cuddles!",
    "🪡 Plushie Care Guide: Long-Term Keeping\n\n\
     • Store plushies somewhere dry and out of strong sunlight so colors do not fade.\n\
     • Breathable cotton bags beat plastic boxes, which can trap moisture.\n\
     • Give collectibles a gentle shake and brush every few weeks to keep dust from settling.\n\
     • Fix loose seams early with a ladder stitch before stuffing starts to escape.\n\n\
     A little maintenance now keeps your collection looking brand new.",
];

pub const FACTS: &[&str] = &[
    "📜 Plushie Fact: The Teddy Bear's Name\n\n\
     The teddy bear is named after U.S. President Theodore \"Teddy\" Roosevelt. \
     In 1902 he refused to shoot a tethered bear on a hunting trip, a cartoon of the \
     story spread across the newspapers, and a Brooklyn shop owner began selling \
     \"Teddy's bears\" soon after.\n\n\
     Around the same time the Steiff company in Germany was producing its own jointed \
     mohair bears, so the teddy arrived on two continents almost at once.",
    "🧵 Plushie Fact: Not Just for Kids\n\n\
     Surveys regularly find that a large share of adults still own a stuffed animal, and \
     many sleep with one. Collectors chase limited runs, artist-made one-offs and vintage \
     pieces, and some rare bears have sold at auction for tens of thousands of dollars.\n\n\
     Plushie collecting is a real hobby with its own conventions, swaps and restoration \
     experts.",
];

pub const GENERIC_PROMPTS: &[&str] = &[
    "I'm your plushie companion! 🧸 I can recommend a new plushie, tell you a cozy story, \
     share care tips or dig up a fun plushie fact. What sounds good?",
    "Not sure where to start? Try asking me to recommend a plushie, or say \
     \"tell me a story\" for something cozy.",
    "I love talking plushies! Ask me how to clean your favorite friend, or ask for a fun \
     fact about plushie history.",
    "Looking for a new addition to your collection? Just say \"recommend a plushie\" and \
     I'll help you choose one.",
];

pub const GREETING_REPLY: &str = "Hello there, fellow plushie lover! 🧸 I can recommend \
     plushies, tell stories, share care tips and fun facts. What would you like to do?";

pub const THANKS_REPLY: &str =
    "You're very welcome! Give your plushies a squeeze from me. 💕";

pub const FAREWELL_REPLY: &str =
    "Goodbye for now! Come back any time you want to chat about plushies. 👋";

pub const SIZE_QUESTION: &str = "I'd love to help you find the perfect plushie! 🧸\n\n\
     First, what size are you looking for? Small, medium, large or extra large?";

pub fn texture_question(size: SizePreference) -> String {
    format!(
        "Got it, something {size}! Next, what texture do you like best? \
         Soft, fluffy, smooth or textured?"
    )
}

// ============================================================================
// Stories
// ============================================================================

const BEAR_STORIES: &[&str] = &[
    "🐻 Barnaby and the Midnight Picnic\n\n\
     Every night, after the lights went out, Barnaby the teddy bear tiptoed to the \
     windowsill. Tonight the moon was round and bright, so he gathered the other \
     plushies for a picnic of imaginary honey cakes. They shared stories until the \
     first birds sang, then hurried back to bed before anyone woke.\n\nThe End. 💤",
    "🐻 The Bear Who Lost a Button\n\n\
     Hugo the teddy bear lost a button eye under the sofa. He worried nobody would \
     want to hug him anymore. But when his person found him, she sewed on a bright \
     blue button and said he looked more himself than ever. Hugo decided that being \
     mended was just another way of being loved.\n\nThe End. 💙",
];

const BUNNY_STORIES: &[&str] = &[
    "🐰 Clover's Big Hop\n\n\
     Clover the bunny plushie had never hopped further than the edge of the bed. One \
     morning she saw a sunbeam on the far side of the room and decided to follow it. \
     She tumbled, bounced and rolled, and finally curled up in the warm light, proud \
     of her very first adventure.\n\nThe End. 🌼",
];

const CAT_STORIES: &[&str] = &[
    "🐱 Whiskers Keeps Watch\n\n\
     Whiskers the cat plushie took her job very seriously: guarding the bedroom from \
     bad dreams. Each night she sat at the foot of the bed with her stitched eyes wide \
     open. The bad dreams took one look at her and decided to visit somewhere else.\n\n\
     The End. 🌙",
    "🐱 The Cat Who Wanted a Bow\n\n\
     Marmalade the cat plushie admired the ribbons on the shelf for weeks. On her \
     birthday her person tied the brightest red one around her neck. Marmalade purred \
     a tiny stitched purr, and she wore that bow at every tea party after.\n\nThe End. 🎀",
];

const DOG_STORIES: &[&str] = &[
    "🐶 Biscuit Finds His Way Home\n\n\
     Biscuit the puppy plushie was left behind at the park. He waited under the bench \
     through the afternoon, tail stitched in a hopeful wag. Just before sunset he heard \
     a familiar voice calling his name, and he was scooped up into the warmest hug of \
     his life.\n\nThe End. 🏡",
];

pub fn stories_for(theme: StoryTheme) -> &'static [&'static str] {
    match theme {
        StoryTheme::Bear => BEAR_STORIES,
        StoryTheme::Bunny => BUNNY_STORIES,
        StoryTheme::Cat => CAT_STORIES,
        StoryTheme::Dog => DOG_STORIES,
    }
}

// ============================================================================
// Recommendations
// ============================================================================

/// Picks for one `(size, texture)` combination
pub struct RecommendationBucket {
    pub size: SizePreference,
    pub texture: TexturePreference,
    pub picks: &'static [&'static str],
}

/// Only three combinations have dedicated picks; everything else falls back
/// to [`FALLBACK_PICKS`].
pub const RECOMMENDATION_BUCKETS: &[RecommendationBucket] = &[
    RecommendationBucket {
        size: SizePreference::Small,
        texture: TexturePreference::Soft,
        picks: &[
            "a palm-sized mochi bunny with a squishy bean-filled belly",
            "a pocket teddy in cotton velour, perfect for a desk or bag",
            "a mini axolotl plushie in pastel pink",
        ],
    },
    RecommendationBucket {
        size: SizePreference::Large,
        texture: TexturePreference::Fluffy,
        picks: &[
            "a long-pile polar bear big enough to hug properly",
            "a shaggy highland cow floor cushion",
            "a jumbo fluffy corgi with a faux-fur coat",
        ],
    },
    RecommendationBucket {
        size: SizePreference::Medium,
        texture: TexturePreference::Smooth,
        picks: &[
            "a minky seal with a sleek, silky finish",
            "a velvet-touch whale that stays cool to the touch",
            "a smooth-fabric penguin with an embroidered face",
        ],
    },
];

pub const FALLBACK_PICKS: &[&str] = &[
    "a classic jointed teddy bear from an artist maker",
    "a cuddly cat plushie from a limited seasonal run",
    "a sleepy fox plushie with a weighted base",
];

pub fn picks_for(size: SizePreference, texture: TexturePreference) -> &'static [&'static str] {
    RECOMMENDATION_BUCKETS
        .iter()
        .find(|bucket| bucket.size == size && bucket.texture == texture)
        .map_or(FALLBACK_PICKS, |bucket| bucket.picks)
}

pub fn recommendation_text(size: SizePreference, texture: TexturePreference) -> String {
    let picks = picks_for(size, texture)
        .iter()
        .map(|pick| format!("• {pick}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Based on your love of {size}, {texture} plushies, here are my recommendations:\n\n\
         {picks}\n\n\
         Check the gallery and the community board to see what other collectors think! 🧸"
    )
}
