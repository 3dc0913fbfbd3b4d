//! Deterministic dice-combat rules shared by the runtime and tooling.
//!
//! `dice-core` defines the combo classifier, zone scoring, curses, special
//! dice, the enemy hook contract and the turn resolution pipeline. It performs
//! no I/O. All state mutation flows through [`engine::CombatEngine`], and the
//! supporting crates depend on the types re-exported here.
pub mod combat;
pub mod combo;
pub mod config;
pub mod dice;
pub mod enemy;
pub mod engine;
pub mod env;
pub mod error;
pub mod relic;
pub mod scoring;
pub mod special;
pub mod state;
pub mod status;

pub use combo::{ComboKind, ComboResult, ComboTable, classify, evaluate};
pub use config::CombatConfig;
pub use dice::{
    Board, BlueprintId, Die, DieBlueprint, DieFlags, DieId, DieKind, Loadout, LoadoutEntry,
    Location, PlacementError, ZoneKind,
};
pub use enemy::{
    ActiveEncounter, AttackResolution, DamageDealtEvent, DamageSource, EncounterDescriptor,
    EncounterError, Enemy, EnemyAction, EnemyActionKind, EnemyFactory, EnemyManager, EnemyMove,
    EnemyStats, IncomingAttack, RerollEvent, ScriptedEnemy,
};
pub use engine::{
    CombatEngine, CombatEvent, EngineError, EnginePhase, ResolveError, RollError, RolledDie,
    SelectionError, Side, TurnReport,
};
pub use env::{EnemyRng, PcgRng, RngOracle};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use relic::RelicModifiers;
pub use scoring::{ZoneEffect, ZoneScore, compute_zone_score};
pub use special::{DetonationReport, SpecialArena, SpecialState, UsageTick};
pub use state::{CombatPhase, CombatState, PlayerState, ResolutionStage, TurnControls, TurnState};
pub use status::{CrowdControlPlan, Curse, CurseCounts, StatusEffects};
