//! Encounter lifecycle: start, turn reset, enemy defeat.

use super::{CombatEngine, CombatEvent, EngineError};
use crate::combat;
use crate::dice::{Board, Loadout};
use crate::enemy::{EncounterError, EnemyFactory};
use crate::special::SpecialArena;
use crate::state::{CombatPhase, ResolutionStage, TurnState};

impl<'a> CombatEngine<'a> {
    /// Starts the next encounter of the sequence.
    ///
    /// Every per-encounter structure is rebuilt: special-die records, queued
    /// curses, temporary destructions, the zone cap and both burns. The
    /// player's health, gold, relics and loadout carry over.
    pub fn start_encounter(&mut self, factory: &dyn EnemyFactory) -> Result<(), EngineError> {
        if self.state.phase.is_terminal() {
            return Err(EncounterError::NoEncountersLeft.into());
        }
        if self.state.is_in_combat() {
            return Err(EncounterError::EncounterActive.into());
        }
        let active = self.enemies.start_next(factory, self.state.seed)?;
        let enemy_name = active.enemy().name().to_string();
        let enemy_cap = active.enemy().max_dice_per_zone();
        let started = CombatEvent::EncounterStarted {
            enemy: enemy_name,
            max_health: active.stats.max_health,
            descriptor: active.descriptor,
        };

        let state = &mut *self.state;
        state.loadout = Loadout::build(
            &state.loadout_entries,
            state.config.hand_size,
            state.relics.battery_included,
        );
        state.specials = SpecialArena::for_loadout(state.loadout.all(), &state.config);
        state.status.reset();
        state.destroyed.clear();
        state.zone_cap = state.config.clamp_zone_cap(state.config.max_dice_per_zone);
        state.board = Board::new(state.zone_cap);
        state.player.burn = 0;
        state.player.block = 0;
        state.turn = TurnState {
            is_first_turn: true,
            ..TurnState::default()
        };
        state.stage = ResolutionStage::Idle;

        self.emit(started);
        self.set_phase(CombatPhase::InCombat);
        if let Some(cap) = enemy_cap {
            let applied = self.apply_zone_cap(cap);
            self.enemies.notify_zone_cap(applied);
        }
        self.preview_enemy_move();
        self.begin_turn();
        Ok(())
    }

    /// Sets the per-zone cap, clamped to `1..=hand_size`. Returns the applied cap.
    pub fn set_max_dice_per_zone(&mut self, cap: u8) -> u8 {
        self.apply_zone_cap(cap)
    }

    /// Restores the configured per-zone cap.
    pub fn reset_zone_cap(&mut self) -> u8 {
        let cap = self.state.config.max_dice_per_zone;
        self.apply_zone_cap(cap)
    }

    /// Resets per-turn state and grants the turn's rolls.
    pub(super) fn begin_turn(&mut self) {
        let reduction = self.state.relics.burn_reduction_per_turn;
        if reduction > 0 {
            self.state.player.reduce_burn(reduction);
        }

        let turn = &mut self.state.turn;
        let mut rolls = self.state.config.base_rolls_per_turn;
        if turn.is_first_turn {
            rolls = rolls.saturating_add(self.state.relics.first_turn_bonus_rolls);
        }
        rolls = rolls.saturating_add(core::mem::take(&mut turn.rolls.carryover));
        turn.rolls.grant(rolls);
        turn.number += 1;
        turn.has_rolled = false;
        turn.reroll_defense_bonus = 0;

        let number = turn.number;
        self.emit(CombatEvent::TurnStarted {
            turn: number,
            rolls,
        });
    }

    pub(super) fn preview_enemy_move(&mut self) {
        self.enemies.prepare_next_move();
        if let Some(description) = self.enemies.intent_description() {
            self.emit(CombatEvent::EnemyIntent { description });
        }
    }

    /// Rewards the player, clears the enemy and moves to `EncounterWon`, or
    /// to `Victory` after the last encounter.
    pub(super) fn handle_enemy_defeat(&mut self) {
        let enemy = self
            .enemies
            .current_enemy()
            .map(|enemy| enemy.name().to_string())
            .unwrap_or_default();
        let Some(descriptor) = self.enemies.clear_current_enemy() else {
            return;
        };

        let player = &mut self.state.player;
        player.add_gold(descriptor.reward_gold);
        let healed = if descriptor.is_boss {
            let amount = combat::boss_recovery(player.health, player.max_health);
            player.heal(amount)
        } else {
            0
        };
        player.burn = 0;
        player.block = 0;

        self.emit(CombatEvent::EnemyDefeated {
            enemy,
            reward_gold: descriptor.reward_gold,
            healed,
        });
        self.reset_zone_cap();

        let next = if self.enemies.remaining() == 0 {
            CombatPhase::Victory
        } else {
            CombatPhase::EncounterWon
        };
        self.set_phase(next);
    }
}
