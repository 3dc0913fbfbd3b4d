//! Combat worker that owns the authoritative [`dice_core::CombatState`].
//!
//! Receives commands from [`crate::RuntimeHandle`], runs them through
//! [`dice_core::CombatEngine`], and publishes the recorded engine events to
//! the [`EventBus`]. Resolutions await the [`Presenter`] between stages.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use dice_core::{
    CombatEngine, CombatEvent, CombatPhase, CombatState, DieId, EngineError, EnemyFactory,
    EnemyManager, GameError, ResolutionStage, RngOracle, RolledDie, TurnReport, ZoneKind,
};

use crate::api::{CombatSnapshot, Presenter, Result, RuntimeError};
use crate::events::{EncounterEvent, Event, EventBus};

/// Commands that can be sent to the combat worker
pub enum Command {
    StartEncounter {
        reply: oneshot::Sender<Result<()>>,
    },
    Roll {
        reply: oneshot::Sender<Result<Vec<RolledDie>>>,
    },
    ToggleReroll {
        die: DieId,
        reply: oneshot::Sender<Result<bool>>,
    },
    Place {
        die: DieId,
        zone: ZoneKind,
        slot: u8,
        reply: oneshot::Sender<Result<()>>,
    },
    PlaceNext {
        die: DieId,
        zone: ZoneKind,
        reply: oneshot::Sender<Result<u8>>,
    },
    Remove {
        die: DieId,
        reply: oneshot::Sender<Result<()>>,
    },
    SortHand {
        reply: oneshot::Sender<Result<()>>,
    },
    /// Full three-stage resolution. The handle has already raised the
    /// resolving flag; the worker lowers it when done.
    Resolve {
        reply: oneshot::Sender<Result<TurnReport>>,
    },
    Snapshot {
        reply: oneshot::Sender<CombatSnapshot>,
    },
}

/// Background task that processes combat commands one at a time.
pub struct CombatWorker {
    state: CombatState,
    enemies: EnemyManager,
    factory: Arc<dyn EnemyFactory>,
    oracle: Arc<dyn RngOracle>,
    presenter: Arc<dyn Presenter>,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    resolving: Arc<AtomicBool>,
}

/// Shared collaborators handed to the worker at spawn time.
pub struct WorkerParts {
    pub factory: Arc<dyn EnemyFactory>,
    pub oracle: Arc<dyn RngOracle>,
    pub presenter: Arc<dyn Presenter>,
    pub event_bus: EventBus,
    pub resolving: Arc<AtomicBool>,
}

impl CombatWorker {
    pub fn new(
        state: CombatState,
        enemies: EnemyManager,
        command_rx: mpsc::Receiver<Command>,
        parts: WorkerParts,
    ) -> Self {
        info!(
            target: "runtime::worker",
            encounters = enemies.encounters().len(),
            seed = state.seed,
            "combat worker initialized"
        );

        Self {
            state,
            enemies,
            factory: parts.factory,
            oracle: parts.oracle,
            presenter: parts.presenter,
            command_rx,
            event_bus: parts.event_bus,
            resolving: parts.resolving,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd).await;
                }
                else => break,
            }
        }
        debug!(target: "runtime::worker", "command channel closed, worker exiting");
    }

    async fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::StartEncounter { reply } => {
                let factory = Arc::clone(&self.factory);
                let result = self.with_engine("start_encounter", |engine| {
                    engine.start_encounter(factory.as_ref())
                });
                if result.is_ok()
                    && let Some(enemy) = self.enemies.current()
                {
                    info!(
                        target: "runtime::worker",
                        enemy = enemy.enemy().name(),
                        health = enemy.stats.max_health,
                        boss = enemy.descriptor.is_boss,
                        "encounter started"
                    );
                }
                Self::send(reply, result, "StartEncounter");
            }
            Command::Roll { reply } => {
                let result = self.with_engine("roll", |engine| engine.roll());
                Self::send(reply, result, "Roll");
            }
            Command::ToggleReroll { die, reply } => {
                let result = self.with_engine("toggle_reroll", |engine| engine.toggle_reroll(die));
                Self::send(reply, result, "ToggleReroll");
            }
            Command::Place {
                die,
                zone,
                slot,
                reply,
            } => {
                let result = self.with_engine("place", |engine| engine.place(die, zone, slot));
                Self::send(reply, result, "Place");
            }
            Command::PlaceNext { die, zone, reply } => {
                let result = self.with_engine("place_next", |engine| engine.place_next(die, zone));
                Self::send(reply, result, "PlaceNext");
            }
            Command::Remove { die, reply } => {
                let result = self.with_engine("remove", |engine| engine.remove(die));
                Self::send(reply, result, "Remove");
            }
            Command::SortHand { reply } => {
                let result = self.with_engine("sort_hand", |engine| engine.sort_hand());
                Self::send(reply, result, "SortHand");
            }
            Command::Resolve { reply } => {
                let result = self.run_resolution().await;
                self.resolving.store(false, Ordering::Release);
                Self::send(reply, result, "Resolve");
            }
            Command::Snapshot { reply } => {
                let snapshot = CombatSnapshot::capture(&self.state, &self.enemies);
                if reply.send(snapshot).is_err() {
                    debug!(target: "runtime::worker", "Snapshot reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn send<T>(reply: oneshot::Sender<Result<T>>, result: Result<T>, command: &'static str) {
        if reply.send(result).is_err() {
            debug!(target: "runtime::worker", command, "reply channel closed (caller dropped)");
        }
    }

    /// Runs one engine operation, publishes its events and maps rejections.
    ///
    /// The engine validates before mutating, so a rejected operation leaves
    /// the state untouched and is only logged.
    fn with_engine<T>(
        &mut self,
        operation: &'static str,
        op: impl FnOnce(&mut CombatEngine<'_>) -> std::result::Result<T, EngineError>,
    ) -> Result<T> {
        let mut engine =
            CombatEngine::with_oracle(&mut self.state, &mut self.enemies, self.oracle.as_ref());
        let result = op(&mut engine);
        let events = engine.take_events();
        self.publish(events);

        result.map_err(|err| {
            let ctx = err.context_at(self.state.turn.number);
            debug!(
                target: "runtime::worker",
                operation,
                turn = self.state.turn.number,
                phase = err.phase().as_str(),
                code = err.error_code(),
                context = ?ctx,
                "command rejected: {}",
                err
            );
            RuntimeError::Engine(err)
        })
    }

    async fn run_resolution(&mut self) -> Result<TurnReport> {
        let detonation = self.with_engine("begin_resolution", |engine| engine.begin_resolution())?;
        self.presenter.detonation(&detonation).await;

        let report = self.with_engine("resolve_turn", |engine| engine.resolve_turn())?;
        let dice = match &self.state.stage {
            ResolutionStage::Settling { dice, .. } => dice.clone(),
            _ => Vec::new(),
        };
        self.presenter.dice_resolved(&dice).await;

        self.with_engine("finish_resolution", |engine| engine.finish_resolution())?;

        info!(
            target: "runtime::worker",
            turn = report.turn,
            defend_combo = %report.defend.combo,
            attack_combo = %report.attack.combo,
            damage = report.damage_to_enemy,
            taken = report.damage_to_player,
            enemy = report.enemy_move.as_ref().map(|m| m.label.as_str()).unwrap_or("-"),
            "turn resolved"
        );
        self.event_bus
            .publish(Event::Encounter(EncounterEvent::TurnResolved(Box::new(
                report.clone(),
            ))));
        Ok(report)
    }

    fn publish(&self, events: Vec<CombatEvent>) {
        let turn = self.state.turn.number;
        for event in events {
            match &event {
                CombatEvent::EnemyDefeated {
                    enemy, reward_gold, ..
                } => info!(
                    target: "runtime::worker",
                    enemy = enemy.as_str(),
                    reward_gold,
                    "enemy defeated"
                ),
                CombatEvent::PhaseChanged(CombatPhase::GameOver) => {
                    warn!(target: "runtime::worker", turn, "player defeated, game over")
                }
                CombatEvent::PhaseChanged(CombatPhase::Victory) => {
                    info!(target: "runtime::worker", turn, "run won")
                }
                _ => {}
            }
            self.event_bus.publish(Event::from_combat(turn, event));
        }
    }
}
