//! Player actions within a turn: rolling, reroll selection, placement.

use super::{CombatEngine, CombatEvent, EngineError, RollError, RolledDie, SelectionError};
use crate::dice::{Board, Die, DieFlags, DieId, ZoneKind};
use crate::enemy::RerollEvent;
use crate::env::Entropy;
use crate::scoring::ZoneScore;
use crate::status::{self, Curse};

impl<'a> CombatEngine<'a> {
    /// Rolls dice.
    ///
    /// The first roll of a turn rebuilds the hand from the loadout (skipping
    /// temporarily destroyed entries, adding a Battery with uses left), rolls
    /// every die, then lands queued crowd control, locks, weakens and
    /// nullifies in that order. Later rolls reroll only the selected dice.
    pub fn roll(&mut self) -> Result<Vec<RolledDie>, EngineError> {
        let first_roll = !self.state.turn.has_rolled;
        self.validate_roll(first_roll)?;

        let rolled = if first_roll {
            self.rebuild_hand();
            let ids: Vec<DieId> = self.state.board.dice().map(|die| die.id).collect();
            let rolled = self.roll_dice(&ids);
            self.land_queued_curses();
            rolled
        } else {
            let ids: Vec<DieId> = self
                .state
                .board
                .dice()
                .filter(|die| die.is_selected() && !die.is_locked())
                .map(|die| die.id)
                .collect();
            let rolled = self.roll_dice(&ids);
            for id in &ids {
                if let Some(die) = self.state.board.die_mut(*id) {
                    die.set_flag(DieFlags::SELECTED, false);
                }
            }
            let count = ids.len() as u32;
            let bonus = count.saturating_mul(self.state.relics.reroll_defense_per_die);
            self.state.turn.reroll_defense_bonus =
                self.state.turn.reroll_defense_bonus.saturating_add(bonus);
            rolled
        };

        self.state.turn.rolls.remaining -= 1;
        self.state.turn.has_rolled = true;
        self.emit(CombatEvent::DiceRolled {
            dice: rolled.clone(),
            first_roll,
        });

        let reactions = self.enemies.notify_reroll(&RerollEvent {
            count: rolled.len() as u32,
            is_initial_roll: first_roll,
        });
        self.apply_reactions(reactions);
        self.publish_scores();
        Ok(rolled)
    }

    fn validate_roll(&self, first_roll: bool) -> Result<(), RollError> {
        if !self.state.is_in_combat() {
            return Err(RollError::NotInCombat);
        }
        if self.state.is_resolving() {
            return Err(RollError::Resolving);
        }
        if self.state.turn.rolls.remaining == 0 {
            return Err(RollError::NoRollsLeft);
        }
        if !first_roll
            && !self
                .state
                .board
                .dice()
                .any(|die| die.is_selected() && !die.is_locked())
        {
            return Err(RollError::NothingSelected);
        }
        Ok(())
    }

    /// Recreates the dice for a new turn. Destruction entries are consumed
    /// here: each excludes its blueprint once, then expires.
    fn rebuild_hand(&mut self) {
        let mut blueprints: Vec<_> = self.state.loadout.blueprints().to_vec();
        blueprints.extend(self.state.specials.available_battery());
        blueprints.retain(|bp| !self.state.is_destroyed(bp.id));

        for entry in &mut self.state.destroyed {
            entry.turns_remaining = entry.turns_remaining.saturating_sub(1);
        }
        self.state.destroyed.retain(|entry| entry.turns_remaining > 0);

        self.state.board = Board::new(self.state.zone_cap);
        for blueprint in blueprints {
            let id = self.state.allocate_die_id();
            self.state.board.insert(Die::new(id, blueprint));
        }
    }

    fn roll_dice(&mut self, ids: &[DieId]) -> Vec<RolledDie> {
        let state = &mut *self.state;
        let mut entropy = Entropy::new(self.oracle, state.seed, &mut state.rng_cursor);
        ids.iter()
            .filter_map(|id| {
                let die = state.board.die_mut(*id)?;
                die.set_face(entropy.roll_face(id.0));
                Some(RolledDie {
                    id: die.id,
                    kind: die.kind(),
                    face: die.face(),
                })
            })
            .collect()
    }

    fn land_queued_curses(&mut self) {
        let state = &mut *self.state;
        let mut entropy = Entropy::new(self.oracle, state.seed, &mut state.rng_cursor);

        let mut landed =
            status::apply_crowd_control(&mut state.status, &mut state.board, &state.specials, &mut entropy);
        for curse in [Curse::Lock, Curse::Weaken, Curse::Nullify] {
            let dice = status::apply_pending(
                &mut state.status,
                curse,
                &mut state.board,
                &state.specials,
                &mut entropy,
            );
            landed.extend(dice.into_iter().map(|die| (die, curse)));
        }
        for (die, curse) in landed {
            self.emit(CombatEvent::StatusApplied { die, curse });
        }
    }

    fn validate_interaction(&self) -> Result<(), SelectionError> {
        if !self.state.is_in_combat() {
            return Err(SelectionError::NotInCombat);
        }
        if self.state.is_resolving() {
            return Err(SelectionError::Resolving);
        }
        if !self.state.turn.has_rolled {
            return Err(SelectionError::NotRolled);
        }
        Ok(())
    }

    /// Flips a die's reroll selection. Returns the new selection state.
    pub fn toggle_reroll(&mut self, die: DieId) -> Result<bool, EngineError> {
        self.validate_interaction()?;
        let target = self
            .state
            .board
            .die_mut(die)
            .ok_or(SelectionError::UnknownDie { die })?;
        if target.is_locked() {
            return Err(SelectionError::Locked { die }.into());
        }
        let selected = !target.is_selected();
        target.set_flag(DieFlags::SELECTED, selected);
        Ok(selected)
    }

    /// Moves a die into `zone[slot]`.
    pub fn place(&mut self, die: DieId, zone: ZoneKind, slot: u8) -> Result<(), EngineError> {
        self.validate_interaction()?;
        self.state.board.place(die, zone, slot)?;
        self.publish_scores();
        Ok(())
    }

    /// Moves a die into the first free slot of `zone`. Returns the slot used.
    pub fn place_next(&mut self, die: DieId, zone: ZoneKind) -> Result<u8, EngineError> {
        self.validate_interaction()?;
        let slot = self.state.board.place_next(die, zone)?;
        self.publish_scores();
        Ok(slot)
    }

    /// Returns a placed die to the hand.
    pub fn remove(&mut self, die: DieId) -> Result<(), EngineError> {
        self.validate_interaction()?;
        self.state.board.remove(die)?;
        self.publish_scores();
        Ok(())
    }

    pub fn sort_hand(&mut self) -> Result<(), EngineError> {
        self.validate_interaction()?;
        self.state.board.sort_hand();
        Ok(())
    }

    /// Score preview of one zone.
    pub fn zone_score(&self, zone: ZoneKind) -> ZoneScore {
        self.state.zone_score(zone)
    }
}
