//! Built-in player providers.
//!
//! - [`GreedyProvider`]: a simple automatic policy used by the headless client
//! - [`ScriptedProvider`]: replays a fixed command list (tests, demos)

mod greedy;
mod scripted;

pub use greedy::GreedyProvider;
pub use scripted::ScriptedProvider;
