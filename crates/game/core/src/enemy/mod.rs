//! Enemy behavior contract.
//!
//! An [`Enemy`] exposes its move sequence plus a set of hooks the resolution
//! sequencer calls at fixed points. Every hook has a no-op default, so a
//! variant only overrides what it reacts to. Numeric state (health, block,
//! burn) is owned by the [`EnemyManager`], not by the enemy object.
mod action;
mod manager;
mod scripted;

pub use action::{EnemyAction, EnemyActionKind, EnemyMove};
pub use manager::{
    ActiveEncounter, AttackResolution, EncounterDescriptor, EncounterError, EnemyFactory, EnemyManager,
    EnemyStats,
};
pub use scripted::ScriptedEnemy;

use crate::combo::ComboKind;

/// Dice rerolled by the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RerollEvent {
    pub count: u32,
    pub is_initial_roll: bool,
}

/// The player's Attack zone result before it reaches the enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IncomingAttack {
    pub score: u32,
    pub combo: ComboKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum DamageSource {
    Attack,
    Burn,
}

/// Health the enemy lost, with the running total for the current resolution
/// and the health left after the hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageDealtEvent {
    pub amount: u32,
    pub total_damage: u32,
    pub previous_total: u32,
    pub remaining_health: u32,
    pub source: DamageSource,
}

impl DamageDealtEvent {
    /// True when this hit moved the running total from below `threshold` to
    /// at or above it.
    pub fn crossed(&self, threshold: u32) -> bool {
        self.previous_total < threshold && self.total_damage >= threshold
    }

    pub fn is_lethal(&self) -> bool {
        self.remaining_health == 0
    }
}

/// Behavior hooks of one enemy variant.
///
/// Preview methods take `&self` and must not mutate; deferred mutations are
/// applied in [`Enemy::on_turn_finished`], which also advances the move
/// cursor.
pub trait Enemy: Send {
    fn name(&self) -> &str;

    fn max_health(&self) -> u32;

    /// Called once when the encounter starts, before the first preview.
    fn on_encounter_start(&mut self) {}

    /// The move the enemy will execute at the end of the current turn.
    fn next_move(&self) -> Option<EnemyMove>;

    /// Reactions to a reroll. Initial rolls are reported too.
    fn on_player_reroll(&mut self, _event: &RerollEvent) -> Vec<EnemyAction> {
        Vec::new()
    }

    /// Attack score that actually reaches block and health.
    fn modify_incoming_attack(&self, attack: &IncomingAttack) -> u32 {
        attack.score
    }

    /// Dice outside a scoring combo are destroyed for one turn while this holds.
    fn should_destroy_dice_outside_combo(&self) -> bool {
        false
    }

    fn on_player_damage_dealt(&mut self, _event: &DamageDealtEvent) -> Vec<EnemyAction> {
        Vec::new()
    }

    /// Runs after the enemy's move (`None` when it had none). Actions returned
    /// here apply immediately.
    fn on_turn_finished(&mut self, _executed: Option<&EnemyMove>) -> Vec<EnemyAction> {
        Vec::new()
    }

    /// Per-zone cap this enemy imposes from the start of the encounter.
    fn max_dice_per_zone(&self) -> Option<u8> {
        None
    }

    fn on_max_dice_per_zone_changed(&mut self, _cap: u8) {}

    fn status_description(&self) -> Option<String> {
        None
    }

    fn intent_description(&self, next: &EnemyMove) -> String {
        next.describe()
    }
}
