//! Combat operations and the turn resolution pipeline.
//!
//! [`CombatEngine`] is the only writer of [`CombatState`]. It borrows the
//! state together with the [`EnemyManager`] for the duration of one
//! operation, validates the request before touching anything, and records
//! what happened as [`CombatEvent`]s for the presentation layer.
//!
//! Resolution is split into three synchronous stages so an async caller can
//! await presentation between them:
//! [`CombatEngine::begin_resolution`] → [`CombatEngine::resolve_turn`] →
//! [`CombatEngine::finish_resolution`]. [`CombatEngine::resolve`] runs all
//! three back to back.
mod encounter;
mod errors;
mod events;
mod resolve;
mod turn;

pub use errors::{EngineError, EnginePhase, ResolveError, RollError, SelectionError};
pub use events::{CombatEvent, RolledDie, Side};
pub use resolve::TurnReport;

use crate::dice::ZoneKind;
use crate::enemy::{DamageSource, EnemyAction, EnemyManager};
use crate::env::{PcgRng, RngOracle};
use crate::state::{CombatPhase, CombatState};
use crate::status::Curse;

pub struct CombatEngine<'a> {
    state: &'a mut CombatState,
    enemies: &'a mut EnemyManager,
    oracle: &'a dyn RngOracle,
    events: Vec<CombatEvent>,
}

impl<'a> CombatEngine<'a> {
    /// Creates an engine drawing from [`PcgRng`].
    pub fn new(state: &'a mut CombatState, enemies: &'a mut EnemyManager) -> Self {
        Self::with_oracle(state, enemies, &PcgRng)
    }

    pub fn with_oracle(
        state: &'a mut CombatState,
        enemies: &'a mut EnemyManager,
        oracle: &'a dyn RngOracle,
    ) -> Self {
        Self {
            state,
            enemies,
            oracle,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &CombatState {
        self.state
    }

    pub fn enemies(&self) -> &EnemyManager {
        self.enemies
    }

    /// Drains the events recorded so far.
    pub fn take_events(&mut self) -> Vec<CombatEvent> {
        core::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    fn set_phase(&mut self, phase: CombatPhase) {
        if self.state.phase != phase {
            self.state.phase = phase;
            self.emit(CombatEvent::PhaseChanged(phase));
        }
    }

    /// Recomputes both zone scores, refreshes wildcard display faces and
    /// publishes the breakdown.
    fn publish_scores(&mut self) {
        let defend = self.state.zone_score(ZoneKind::Defend);
        let attack = self.state.zone_score(ZoneKind::Attack);
        for die in self.state.board.dice_mut() {
            let face = die.face();
            die.show_as(face);
        }
        for score in [&defend, &attack] {
            for ((id, wild), value) in score
                .dice
                .iter()
                .zip(&score.wildcard_flags)
                .zip(&score.assignments)
            {
                if *wild && let Some(die) = self.state.board.die_mut(*id) {
                    die.show_as(*value);
                }
            }
        }
        self.emit(CombatEvent::ZoneScoresUpdated { defend, attack });
    }

    /// Clamps and applies a new per-zone cap. Dice beyond it return to the hand.
    fn apply_zone_cap(&mut self, requested: u8) -> u8 {
        let cap = self.state.config.clamp_zone_cap(requested);
        self.state.zone_cap = cap;
        let evicted = self.state.board.set_zone_cap(cap);
        let moved = !evicted.is_empty();
        self.emit(CombatEvent::ZoneCapChanged { cap, evicted });
        if moved {
            self.publish_scores();
        }
        cap
    }

    /// Carries out enemy actions in the given order. Returns `false` once the
    /// player is defeated; remaining actions are dropped.
    fn apply_enemy_actions(&mut self, actions: &[EnemyAction], defenses_primed: bool) -> bool {
        let slots = self.state.hand_slots();
        for action in actions {
            match *action {
                EnemyAction::Attack(amount) => {
                    if amount == 0 {
                        continue;
                    }
                    let hit = self.state.player.take_hit(amount);
                    self.emit(CombatEvent::DamageDealt {
                        target: Side::Player,
                        source: DamageSource::Attack,
                        amount: hit.damage,
                        blocked: hit.blocked,
                    });
                    if self.check_player_defeat() {
                        return false;
                    }
                }
                EnemyAction::Heal(amount) => {
                    let healed = self.enemies.heal_current_enemy(amount);
                    if healed > 0 {
                        self.emit(CombatEvent::EnemyHealed { amount: healed });
                    }
                }
                EnemyAction::Defend(amount) => {
                    if !defenses_primed && self.enemies.add_enemy_block(amount) > 0 {
                        self.emit(CombatEvent::BlockGained {
                            target: Side::Enemy,
                            amount,
                        });
                    }
                }
                EnemyAction::Lock(count) => self.queue_curse(Curse::Lock, count, slots),
                EnemyAction::Weaken(count) => self.queue_curse(Curse::Weaken, count, slots),
                EnemyAction::Nullify(count) => self.queue_curse(Curse::Nullify, count, slots),
                EnemyAction::Burn(amount) => {
                    if self.state.player.add_burn(amount) > 0 {
                        self.emit(CombatEvent::BurnApplied {
                            target: Side::Player,
                            amount,
                        });
                    }
                }
                EnemyAction::SetMaxDicePerZone(cap) => {
                    let applied = self.apply_zone_cap(cap);
                    self.enemies.notify_zone_cap(applied);
                }
                EnemyAction::CrowdControl(plan) => {
                    if !plan.is_empty() {
                        self.state.status.queue_crowd_control(plan, slots);
                        self.emit(CombatEvent::CrowdControlQueued(plan));
                    }
                }
            }
        }
        true
    }

    fn apply_reactions(&mut self, actions: Vec<EnemyAction>) -> bool {
        if actions.is_empty() {
            return true;
        }
        let ordered = sorted_actions(actions);
        self.emit(CombatEvent::EnemyReacted {
            actions: ordered.clone(),
        });
        self.apply_enemy_actions(&ordered, false)
    }

    fn queue_curse(&mut self, curse: Curse, count: u32, slots: u8) {
        if count == 0 {
            return;
        }
        self.state.status.queue(curse, count, slots);
        self.emit(CombatEvent::CursesQueued { curse, count });
    }

    /// Moves to `GameOver` when the player has no health left.
    fn check_player_defeat(&mut self) -> bool {
        if !self.state.player.is_defeated() {
            return false;
        }
        self.set_phase(CombatPhase::GameOver);
        true
    }
}

fn sorted_actions(mut actions: Vec<EnemyAction>) -> Vec<EnemyAction> {
    actions.sort_by_key(EnemyAction::kind);
    actions
}

#[cfg(test)]
mod tests;
