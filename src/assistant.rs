//! Rule-based plushie assistant
//!
//! A pure dialogue engine: keyword intent detection, canned replies and two
//! short multi-turn flows (recommendation and story).

mod content;
pub mod intent;
pub mod state;
mod transition;

#[cfg(test)]
mod proptests;

pub use intent::Intent;
pub use state::SessionState;
pub use transition::{process_message, Reply};
