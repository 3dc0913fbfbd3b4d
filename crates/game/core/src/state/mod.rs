//! Authoritative combat state.
//!
//! [`CombatState`] owns every piece of mutable combat data: the player
//! profile, the dice on the board, queued curses, special-die records and
//! turn bookkeeping. Runtime layers read it freely but mutate it only through
//! [`crate::engine::CombatEngine`].
mod player;
mod turn;

pub use player::PlayerState;
pub use turn::{
    CombatPhase, ResolutionStage, RollCounter, TemporaryDestruction, TurnControls, TurnState,
};

use crate::config::CombatConfig;
use crate::dice::{Board, BlueprintId, DieId, Loadout, LoadoutEntry, ZoneKind};
use crate::relic::RelicModifiers;
use crate::scoring::{ScoreContext, ZoneScore, compute_zone_score};
use crate::special::SpecialArena;
use crate::status::StatusEffects;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatState {
    /// RNG seed fixed for the whole run.
    pub seed: u64,
    /// Draw counter combined with `seed`; advanced once per random draw.
    pub rng_cursor: u64,
    pub config: CombatConfig,
    pub relics: RelicModifiers,
    /// Dice the player owns; rebuilt into a [`Loadout`] at encounter start.
    pub loadout_entries: Vec<LoadoutEntry>,
    pub loadout: Loadout,
    pub phase: CombatPhase,
    pub player: PlayerState,
    pub board: Board,
    pub status: StatusEffects,
    pub specials: SpecialArena,
    pub turn: TurnState,
    pub zone_cap: u8,
    pub destroyed: Vec<TemporaryDestruction>,
    pub stage: ResolutionStage,
    next_die_id: u32,
}

impl CombatState {
    pub fn new(seed: u64, config: CombatConfig, relics: RelicModifiers) -> Self {
        let zone_cap = config.clamp_zone_cap(config.max_dice_per_zone);
        Self {
            seed,
            rng_cursor: 0,
            player: PlayerState::new(config.player_max_health),
            board: Board::new(zone_cap),
            loadout: Loadout::standard(config.hand_size),
            loadout_entries: Vec::new(),
            config,
            relics,
            phase: CombatPhase::Idle,
            status: StatusEffects::default(),
            specials: SpecialArena::default(),
            turn: TurnState::default(),
            zone_cap,
            destroyed: Vec::new(),
            stage: ResolutionStage::Idle,
            next_die_id: 0,
        }
    }

    pub fn with_loadout(mut self, entries: Vec<LoadoutEntry>) -> Self {
        self.loadout_entries = entries;
        self
    }

    pub fn is_in_combat(&self) -> bool {
        self.phase == CombatPhase::InCombat
    }

    pub fn is_resolving(&self) -> bool {
        self.stage != ResolutionStage::Idle
    }

    /// Upper bound for queued curse counts: the regular hand plus the
    /// Battery slot while a charged Battery is in the loadout.
    pub fn hand_slots(&self) -> u8 {
        let battery = u8::from(self.specials.available_battery().is_some());
        self.config.hand_size.saturating_add(battery)
    }

    pub fn is_destroyed(&self, blueprint: BlueprintId) -> bool {
        self.destroyed.iter().any(|entry| entry.blueprint == blueprint)
    }

    pub fn controls(&self) -> TurnControls {
        let live = self.is_in_combat() && !self.is_resolving();
        TurnControls {
            can_roll: live && self.turn.rolls.remaining > 0,
            can_sort: live && self.turn.has_rolled,
            can_resolve: live && self.turn.has_rolled,
        }
    }

    /// Current score of one zone.
    pub fn zone_score(&self, zone: ZoneKind) -> ZoneScore {
        let table = self.relics.combo_table();
        let dice = self.board.zone_dice(zone);
        let ctx = ScoreContext {
            relics: &self.relics,
            table: &table,
            specials: &self.specials,
            reroll_defense_bonus: self.turn.reroll_defense_bonus,
            opposing_count: self.board.zone(zone.opposite()).len(),
        };
        compute_zone_score(&dice, zone, &ctx)
    }

    pub(crate) fn allocate_die_id(&mut self) -> DieId {
        let id = DieId(self.next_die_id);
        self.next_die_id = self.next_die_id.wrapping_add(1);
        id
    }
}

impl Default for CombatState {
    fn default() -> Self {
        Self::new(0, CombatConfig::default(), RelicModifiers::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_is_idle_with_full_health() {
        let state = CombatState::default();
        assert_eq!(state.phase, CombatPhase::Idle);
        assert_eq!(state.player.health, 100);
        assert!(!state.controls().can_roll);
        assert_eq!(state.zone_cap, 6);
    }

    #[test]
    fn die_ids_are_never_reused() {
        let mut state = CombatState::default();
        let a = state.allocate_die_id();
        let b = state.allocate_die_id();
        assert_ne!(a, b);
    }
}
