//! The turn resolution pipeline.
//!
//! Stages, in order:
//! 1. [`CombatEngine::begin_resolution`] snapshots unused bombs and ticks
//!    their countdowns.
//! 2. [`CombatEngine::resolve_turn`] scores both zones, ticks special dice,
//!    runs zone effects, then trades blows with the enemy.
//! 3. [`CombatEngine::finish_resolution`] clears the dice, carries curses
//!    over and opens the next turn.
//!
//! Callers that animate may pause between stages; the state records which
//! stage is pending so a stage can never run twice or out of order.

use super::{CombatEngine, CombatEvent, EngineError, ResolveError, Side};
use crate::combo::ComboKind;
use crate::dice::{BlueprintId, DieKind, ZoneKind};
use crate::enemy::{DamageSource, EnemyMove, IncomingAttack};
use crate::scoring::{ZoneEffect, ZoneScore};
use crate::special::{self, DetonationReport, UsageTick};
use crate::state::{CombatPhase, ResolutionStage, TemporaryDestruction};
use crate::status::{self, CurseCounts};

/// Summary of one resolved turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    pub turn: u32,
    pub defend: ZoneScore,
    pub attack: ZoneScore,
    pub detonation: DetonationReport,
    /// Block granted by the Defend zone for the enemy's turn.
    pub player_block: u32,
    pub damage_to_enemy: u32,
    pub damage_to_player: u32,
    pub enemy_move: Option<EnemyMove>,
    pub destroyed: Vec<BlueprintId>,
    pub carryover: CurseCounts,
    pub phase: CombatPhase,
}

impl<'a> CombatEngine<'a> {
    /// Runs every resolution stage back to back.
    pub fn resolve(&mut self) -> Result<TurnReport, EngineError> {
        self.begin_resolution()?;
        let report = self.resolve_turn()?;
        self.finish_resolution()?;
        Ok(report)
    }

    /// Ticks the countdown of every bomb that was neither placed nor
    /// nullified this turn.
    pub fn begin_resolution(&mut self) -> Result<DetonationReport, EngineError> {
        if !self.state.is_in_combat() {
            return Err(ResolveError::NotInCombat.into());
        }
        if self.state.is_resolving() {
            return Err(ResolveError::AlreadyResolving.into());
        }
        if !self.state.turn.has_rolled {
            return Err(ResolveError::NotRolled.into());
        }

        self.enemies.begin_resolution();
        let board = &self.state.board;
        let exempt: Vec<BlueprintId> = board
            .dice()
            .filter(|die| die.kind() == DieKind::Bomb)
            .filter(|die| board.in_any_zone(die.id) || die.is_nullified())
            .map(|die| die.blueprint.id)
            .collect();
        let report = self.state.specials.tick_bombs(&exempt);
        if !report.is_empty() {
            self.emit(CombatEvent::BombDetonated(report.clone()));
        }
        self.state.stage = ResolutionStage::Detonated {
            report: report.clone(),
        };
        Ok(report)
    }

    /// Scores the zones and plays out the exchange with the enemy.
    pub fn resolve_turn(&mut self) -> Result<TurnReport, EngineError> {
        let ResolutionStage::Detonated { report } = &self.state.stage else {
            return Err(ResolveError::WrongStage {
                expected: "detonated",
            }
            .into());
        };
        let detonation = report.clone();
        let mark = self.events.len();

        let defend = self.state.zone_score(ZoneKind::Defend);
        let mut attack = self.state.zone_score(ZoneKind::Attack);
        self.tick_usage();
        attack.add_detonation(detonation.bonus);
        self.emit(CombatEvent::ZoneScoresUpdated {
            defend: defend.clone(),
            attack: attack.clone(),
        });

        for effect in defend.pre_effects.iter().chain(&attack.pre_effects) {
            self.run_zone_effect(effect);
        }
        self.apply_combo_relics(&defend, &attack);

        let carryover = status::carryover_counts(&self.state.board);
        let destroyed = if self.enemies.should_destroy_dice_outside_combo() {
            self.destroy_dice_outside_combo(&defend, &attack)
        } else {
            Vec::new()
        };

        let mut report = TurnReport {
            turn: self.state.turn.number,
            detonation,
            destroyed,
            carryover,
            ..TurnReport::default()
        };

        if self.exchange_blows(&defend, &attack, &mut report) {
            if self.state.phase != CombatPhase::GameOver {
                for effect in defend.post_effects.iter().chain(&attack.post_effects) {
                    self.run_zone_effect(effect);
                }
            }
            if self.state.phase == CombatPhase::InCombat && self.enemies.is_current_enemy_defeated()
            {
                self.handle_enemy_defeat();
            }
        }

        report.defend = defend;
        report.attack = attack;
        self.tally_damage(mark, &mut report);
        report.phase = self.state.phase;
        self.state.stage = ResolutionStage::Settling {
            dice: self.state.board.dice_in_play(),
            carryover,
        };
        Ok(report)
    }

    /// Clears the resolved dice and opens the next turn.
    pub fn finish_resolution(&mut self) -> Result<(), EngineError> {
        let ResolutionStage::Settling { carryover, .. } = &self.state.stage else {
            return Err(ResolveError::WrongStage {
                expected: "settling",
            }
            .into());
        };
        let carryover = *carryover;

        self.state.board.clear();
        self.state.stage = ResolutionStage::Idle;
        if !self.state.is_in_combat() {
            self.publish_scores();
            return Ok(());
        }

        if !carryover.is_empty() {
            let slots = self.state.hand_slots();
            self.state.status.add_carryover(carryover, slots);
            self.emit(CombatEvent::CursesCarried(carryover));
        }
        let rolls = &mut self.state.turn.rolls;
        if self.state.relics.roll_carryover {
            rolls.carryover = rolls.remaining;
        }
        self.state.turn.is_first_turn = false;
        self.begin_turn();
        self.publish_scores();
        Ok(())
    }

    /// Usage ticks: zoned dice tick their placement counter, hand dice their
    /// unused counter.
    fn tick_usage(&mut self) {
        let state = &mut *self.state;
        let mut ticks: Vec<UsageTick> = Vec::new();
        for die in state.board.dice() {
            let tick = if state.board.in_any_zone(die.id) {
                special::tick_zoned(&mut state.specials, die)
            } else {
                special::tick_unused(&mut state.specials, die)
            };
            ticks.extend(tick);
        }
        for tick in ticks {
            self.emit(CombatEvent::SpecialUsed(tick));
        }
    }

    fn run_zone_effect(&mut self, effect: &ZoneEffect) {
        match *effect {
            ZoneEffect::HealPlayer { amount, .. } => {
                let healed = self.state.player.heal(amount);
                if healed > 0 {
                    self.emit(CombatEvent::PlayerHealed { amount: healed });
                }
            }
            ZoneEffect::CometBurst {
                die,
                blueprint,
                enemy_burn,
                self_burn,
            } => {
                if self.enemies.current().is_none() || self.enemies.is_current_enemy_defeated() {
                    return;
                }
                if !special::fire_comet(&mut self.state.specials, blueprint) {
                    return;
                }
                self.emit(CombatEvent::CometBurst {
                    die,
                    enemy_burn,
                    self_burn,
                });
                if self.enemies.apply_enemy_burn(enemy_burn) > 0 {
                    self.emit(CombatEvent::BurnApplied {
                        target: Side::Enemy,
                        amount: enemy_burn,
                    });
                }
                if self.state.player.add_burn(self_burn) > 0 {
                    self.emit(CombatEvent::BurnApplied {
                        target: Side::Player,
                        amount: self_burn,
                    });
                }
            }
        }
    }

    /// Full-house heals and the long-straight cleanse.
    fn apply_combo_relics(&mut self, defend: &ZoneScore, attack: &ZoneScore) {
        let relics = &self.state.relics;
        let full_houses = [defend, attack]
            .iter()
            .filter(|score| score.combo == ComboKind::FullHouse)
            .count() as u32;
        let heal = full_houses * relics.family_heal_per_full_house;
        let cleanse = relics.cleanse_on_long_straights
            && (defend.combo.is_long_straight() || attack.combo.is_long_straight());

        if heal > 0 {
            let healed = self.state.player.heal(heal);
            if healed > 0 {
                self.emit(CombatEvent::PlayerHealed { amount: healed });
            }
        }
        if cleanse {
            status::cleanse_all(&mut self.state.board);
            self.emit(CombatEvent::CursesCleansed);
        }
    }

    /// Marks every hand die and every die of a zone without a combo as
    /// destroyed for the next turn.
    fn destroy_dice_outside_combo(
        &mut self,
        defend: &ZoneScore,
        attack: &ZoneScore,
    ) -> Vec<BlueprintId> {
        let board = &self.state.board;
        let mut doomed: Vec<_> = board.hand().to_vec();
        for score in [defend, attack] {
            if score.combo == ComboKind::NoCombo {
                doomed.extend(score.dice.iter().copied());
            }
        }

        let mut blueprints: Vec<BlueprintId> = Vec::new();
        for id in doomed {
            let Some(die) = board.die(id) else {
                continue;
            };
            let blueprint = die.blueprint.id;
            if !blueprints.contains(&blueprint) && !self.state.is_destroyed(blueprint) {
                blueprints.push(blueprint);
            }
        }
        self.state
            .destroyed
            .extend(blueprints.iter().map(|&blueprint| TemporaryDestruction {
                blueprint,
                turns_remaining: 1,
            }));
        if !blueprints.is_empty() {
            self.emit(CombatEvent::DiceDestroyed {
                blueprints: blueprints.clone(),
            });
        }
        blueprints
    }

    /// Player burn, then the exchange with the enemy. Returns `false` when
    /// the player's burn ended the run before the enemy acted.
    fn exchange_blows(
        &mut self,
        defend: &ZoneScore,
        attack: &ZoneScore,
        report: &mut TurnReport,
    ) -> bool {
        let burned = self.state.player.take_burn_tick();
        if burned > 0 {
            self.emit(CombatEvent::DamageDealt {
                target: Side::Player,
                source: DamageSource::Burn,
                amount: burned,
                blocked: 0,
            });
        }
        if self.check_player_defeat() {
            return false;
        }
        if self.enemies.current().is_none() {
            return true;
        }

        self.state.player.block = defend.total;
        report.player_block = defend.total;
        if defend.total > 0 {
            self.emit(CombatEvent::BlockGained {
                target: Side::Player,
                amount: defend.total,
            });
        }
        let primed = self.enemies.prime_upcoming_defenses();
        if primed > 0 {
            self.emit(CombatEvent::BlockGained {
                target: Side::Enemy,
                amount: primed,
            });
        }

        let (burn_damage, reactions) = self.enemies.apply_enemy_burn_tick();
        if burn_damage > 0 {
            self.emit(CombatEvent::DamageDealt {
                target: Side::Enemy,
                source: DamageSource::Burn,
                amount: burn_damage,
                blocked: 0,
            });
        }
        if !self.apply_reactions(reactions) {
            return true;
        }

        if !self.enemies.is_current_enemy_defeated() {
            let hit = self.enemies.apply_player_attack(
                IncomingAttack {
                    score: attack.total,
                    combo: attack.combo,
                },
                self.state.relics.blockbuster,
            );
            self.emit(CombatEvent::DamageDealt {
                target: Side::Enemy,
                source: DamageSource::Attack,
                amount: hit.damage_dealt,
                blocked: hit.blocked,
            });
            if !self.apply_reactions(hit.reactions) {
                return true;
            }
        }

        if !self.enemies.is_current_enemy_defeated() {
            self.run_enemy_turn(report);
        }
        true
    }

    /// Executes the previewed move, lets the enemy settle its turn and
    /// previews the next move.
    fn run_enemy_turn(&mut self, report: &mut TurnReport) {
        let executed = self.enemies.take_upcoming_move();
        if let Some(enemy_move) = &executed {
            let actions = enemy_move.ordered_actions();
            self.emit(CombatEvent::EnemyMoveExecuted {
                label: enemy_move.label.clone(),
                actions: actions.clone(),
            });
            if !self.apply_enemy_actions(&actions, enemy_move.defenses_primed) {
                report.enemy_move = executed;
                return;
            }
        }

        self.enemies.reset_enemy_block();
        let reactions = self.enemies.finish_turn(executed.as_ref());
        report.enemy_move = executed;
        if !self.apply_reactions(reactions) {
            return;
        }
        self.state.player.block = 0;
        self.preview_enemy_move();
    }

    /// Sums the damage events recorded since `mark`.
    fn tally_damage(&self, mark: usize, report: &mut TurnReport) {
        for event in &self.events[mark..] {
            if let CombatEvent::DamageDealt { target, amount, .. } = event {
                match target {
                    Side::Enemy => report.damage_to_enemy += amount,
                    Side::Player => report.damage_to_player += amount,
                }
            }
        }
    }
}
