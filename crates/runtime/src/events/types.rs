//! Event types for different topics.

use serde::{Deserialize, Serialize};

use dice_core::{CombatEvent, CombatPhase, EncounterDescriptor, TurnReport, ZoneScore};

/// Zone breakdowns after any change to the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEvent {
    pub turn: u32,
    pub defend: ZoneScore,
    pub attack: ZoneScore,
}

/// Anything that happened inside a turn: rolls, curses, damage, intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatFeedEvent {
    pub turn: u32,
    pub event: CombatEvent,
}

/// Encounter lifecycle and terminal states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterEvent {
    Started {
        enemy: String,
        max_health: u32,
        descriptor: EncounterDescriptor,
    },
    TurnResolved(Box<TurnReport>),
    Defeated {
        enemy: String,
        reward_gold: u32,
        healed: u32,
    },
    PhaseChanged(CombatPhase),
}
