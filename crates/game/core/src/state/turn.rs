use crate::dice::{BlueprintId, DieId};
use crate::special::DetonationReport;
use crate::status::CurseCounts;

/// Where the combat stands between encounters.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CombatPhase {
    /// No encounter started yet.
    #[default]
    Idle,
    InCombat,
    /// The enemy fell and more encounters follow.
    EncounterWon,
    GameOver,
    Victory,
}

impl CombatPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::GameOver | Self::Victory)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollCounter {
    pub remaining: u8,
    /// Rolls granted at the start of the turn.
    pub granted: u8,
    /// Unused rolls banked for the next turn.
    pub carryover: u8,
}

impl RollCounter {
    pub fn grant(&mut self, rolls: u8) {
        self.remaining = rolls;
        self.granted = rolls;
    }
}

/// Per-turn bookkeeping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// 1-based turn counter within the encounter.
    pub number: u32,
    pub rolls: RollCounter,
    pub has_rolled: bool,
    pub is_first_turn: bool,
    pub reroll_defense_bonus: u32,
}

/// A loadout entry sitting out the next turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemporaryDestruction {
    pub blueprint: BlueprintId,
    pub turns_remaining: u8,
}

/// Progress of the resolution pipeline. Anything but `Idle` means a
/// resolution is in flight.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResolutionStage {
    #[default]
    Idle,
    /// Bombs ticked; waiting for the scoring pass.
    Detonated { report: DetonationReport },
    /// Scores applied; waiting for the dice to be cleared.
    Settling {
        dice: Vec<DieId>,
        carryover: CurseCounts,
    },
}

/// Which player controls are live.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnControls {
    pub can_roll: bool,
    pub can_sort: bool,
    pub can_resolve: bool,
}
