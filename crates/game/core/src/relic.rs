//! Static numeric modifiers granted by relics.
//!
//! Relics are plain values read by scoring and the sequencer; no relic
//! carries behavior of its own.

use crate::combo::ComboTable;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RelicModifiers {
    /// Dice showing 1 act as wildcards.
    pub wild_one: bool,
    /// Defend bonus per die rerolled after the first roll of a turn.
    pub reroll_defense_per_die: u32,
    /// Added to both zones when they hold the same non-zero number of dice.
    pub perfect_balance_bonus: u32,
    /// Heal per zone that scores a Full House.
    pub family_heal_per_full_house: u32,
    /// Straight Penta or Straight Sex clears every current curse.
    pub cleanse_on_long_straights: bool,
    /// Switches to the boosted combo table.
    pub chain_reactor: bool,
    /// Halves the enemy's block before the player's attack lands.
    pub blockbuster: bool,
    /// Player burn removed at the start of each turn.
    pub burn_reduction_per_turn: u32,
    /// Extra rolls on the first turn of an encounter.
    pub first_turn_bonus_rolls: u8,
    /// Unused rolls carry into the next turn.
    pub roll_carryover: bool,
    /// Adds a Battery die in an extra hand slot.
    pub battery_included: bool,
}

impl RelicModifiers {
    pub fn combo_table(&self) -> ComboTable {
        if self.chain_reactor {
            ComboTable::chain_reactor()
        } else {
            ComboTable::standard()
        }
    }
}
