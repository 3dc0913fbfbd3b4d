//! Data-driven combat content and loaders.
//!
//! This crate provides the enemy roster (hook-based enemies with their own
//! scaling counters) and loaders for RON/TOML data files:
//! - Combat configuration and relic modifiers (TOML)
//! - The player's loadout (RON)
//! - Scripted, data-only enemies (RON)
//! - The encounter sequence of a run (RON)
//!
//! Content is consumed by the runtime and never mutates combat state
//! directly; everything flows through `dice_core::CombatEngine`.

pub mod roster;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use roster::{
    Auditor, Compactor, Counterlock, Difficulty, EnemyKind, Hotfix, Leech, Lockdown, Lockjaw,
    Roster, Slapper, StatusTician, StraightArrow, UltraStatus, Wallop, Weakener,
};

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, EncounterLoader, EncounterSpec, EnemyLoader, LoadResult,
    LoadoutLoader, RelicLoader, RunContent,
};
