//! Topic-based event bus for runtime events.
//!
//! The worker translates every engine event into a topic event, so
//! consumers can subscribe only to the topics they need.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{CombatFeedEvent, EncounterEvent, ScoreEvent};
