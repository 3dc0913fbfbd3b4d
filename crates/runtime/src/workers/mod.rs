//! Worker tasks that back the runtime orchestration.
//!
//! The combat worker is the single owner of combat state; every mutation
//! arrives as a [`Command`] over its channel.

mod combat;

pub use combat::{Command, CombatWorker, WorkerParts};
