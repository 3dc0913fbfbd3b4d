//! Async orchestration for the dice-combat engine.
//!
//! This crate wires the deterministic [`dice_core::CombatEngine`] into a
//! worker task, a topic-based event bus and a presentation barrier.
//! Consumers embed [`Runtime`] to drive a run with a [`PlayerProvider`],
//! subscribe to events, and issue commands through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`providers`] ships the built-in player policies
//! - `workers` keeps the combat worker internal to the crate
pub mod api;
pub mod events;
pub mod providers;
pub mod runtime;

mod workers;

pub use api::{
    CombatSnapshot, CommandOutcome, DelayPresenter, DieView, EnemyView, InstantPresenter,
    PlayerCommand, PlayerProvider, Presenter, Result, RuntimeError, RuntimeHandle,
};
pub use events::{CombatFeedEvent, EncounterEvent, Event, EventBus, ScoreEvent, Topic};
pub use providers::{GreedyProvider, ScriptedProvider};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
