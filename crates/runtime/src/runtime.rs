//! High-level runtime orchestrator.
//!
//! The runtime owns the combat worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive a run.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::debug;

use dice_content::RunContent;
use dice_core::{
    CombatConfig, CombatState, EncounterDescriptor, EnemyFactory, EnemyManager, LoadoutEntry,
    PcgRng, RelicModifiers, RngOracle,
};

use crate::api::{
    CombatSnapshot, CommandOutcome, InstantPresenter, PlayerProvider, Presenter, Result,
    RuntimeError, RuntimeHandle,
};
use crate::events::{Event, EventBus, Topic};
use crate::workers::{Command, CombatWorker, WorkerParts};

/// Runtime configuration shared across the orchestrator and worker.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub combat: CombatConfig,
    /// RNG seed fixed for the whole run.
    pub seed: u64,
    /// Content directory, when loading from data files.
    pub data_dir: Option<PathBuf>,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Upper bound on provider steps in [`Runtime::run_until_complete`].
    pub max_steps: usize,
}

impl RuntimeConfig {
    pub const DEFAULT_EVENT_BUFFER: usize = 256;
    pub const DEFAULT_COMMAND_BUFFER: usize = 32;
    pub const DEFAULT_MAX_STEPS: usize = 100_000;

    /// Reads `COMBAT_SEED`, `COMBAT_DATA_DIR`, `COMBAT_EVENT_BUFFER` and
    /// `COMBAT_COMMAND_BUFFER`. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Some(seed) = parse_env("COMBAT_SEED")? {
            config.seed = seed;
        }
        if let Ok(dir) = std::env::var("COMBAT_DATA_DIR") {
            config.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(size) = parse_env("COMBAT_EVENT_BUFFER")? {
            config.event_buffer_size = size;
        }
        if let Some(size) = parse_env("COMBAT_COMMAND_BUFFER")? {
            config.command_buffer_size = size;
        }
        Ok(config)
    }
}

fn parse_env<T: FromStr>(key: &'static str) -> Result<Option<T>> {
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| RuntimeError::InvalidEnv { key, value }),
        Err(_) => Ok(None),
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            combat: CombatConfig::default(),
            seed: 0,
            data_dir: None,
            event_buffer_size: Self::DEFAULT_EVENT_BUFFER,
            command_buffer_size: Self::DEFAULT_COMMAND_BUFFER,
            max_steps: Self::DEFAULT_MAX_STEPS,
        }
    }
}

/// Main runtime that orchestrates a combat run
///
/// Design: Runtime owns the worker and coordinates execution.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    config: RuntimeConfig,
    player_provider: Option<Box<dyn PlayerProvider>>,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to one event topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Asks the provider for one command and executes it.
    ///
    /// Returns `None` once the run has ended. Commands the engine rejects are
    /// logged and reported as [`CommandOutcome::Ignored`].
    pub async fn step(&mut self) -> Result<Option<CommandOutcome>> {
        let provider = self
            .player_provider
            .as_ref()
            .ok_or(RuntimeError::ProviderNotSet)?;

        let snapshot = self.handle.snapshot().await?;
        if snapshot.is_over() {
            return Ok(None);
        }

        let command = provider.next_command(&snapshot).await?;
        match self.handle.execute(command.clone()).await {
            Ok(outcome) => Ok(Some(outcome)),
            Err(err) if err.is_rejection() => {
                debug!(target: "runtime", ?command, "provider command rejected: {}", err);
                Ok(Some(CommandOutcome::Ignored))
            }
            Err(err) => Err(err),
        }
    }

    /// Steps until the run reaches `GameOver` or `Victory`.
    pub async fn run_until_complete(&mut self) -> Result<CombatSnapshot> {
        for _ in 0..self.config.max_steps {
            if self.step().await?.is_none() {
                return self.handle.snapshot().await;
            }
        }
        Err(RuntimeError::StepLimit {
            limit: self.config.max_steps,
        })
    }

    /// Set the player provider
    pub fn set_player_provider(&mut self, provider: impl PlayerProvider + 'static) {
        self.player_provider = Some(Box::new(provider));
    }

    /// Shutdown the runtime gracefully
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    state: Option<CombatState>,
    relics: RelicModifiers,
    loadout: Vec<LoadoutEntry>,
    encounters: Vec<EncounterDescriptor>,
    factory: Option<Arc<dyn EnemyFactory>>,
    oracle: Arc<dyn RngOracle>,
    presenter: Arc<dyn Presenter>,
    player_provider: Option<Box<dyn PlayerProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            state: None,
            relics: RelicModifiers::default(),
            loadout: Vec::new(),
            encounters: Vec::new(),
            factory: None,
            oracle: Arc::new(PcgRng),
            presenter: Arc::new(InstantPresenter),
            player_provider: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Takes config, relics, loadout, roster and encounters from loaded content.
    pub fn content(mut self, content: RunContent) -> Self {
        self.config.combat = content.config;
        self.relics = content.relics;
        self.loadout = content.loadout;
        self.encounters = content.encounters;
        self.factory = Some(Arc::new(content.roster));
        self
    }

    /// Provide a prepared combat state instead of building one from config
    pub fn initial_state(mut self, state: CombatState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn relics(mut self, relics: RelicModifiers) -> Self {
        self.relics = relics;
        self
    }

    pub fn loadout(mut self, loadout: Vec<LoadoutEntry>) -> Self {
        self.loadout = loadout;
        self
    }

    pub fn encounters(mut self, encounters: Vec<EncounterDescriptor>) -> Self {
        self.encounters = encounters;
        self
    }

    /// Set the required enemy factory
    pub fn enemy_factory(mut self, factory: impl EnemyFactory + 'static) -> Self {
        self.factory = Some(Arc::new(factory));
        self
    }

    /// Replace the default PCG oracle
    pub fn oracle(mut self, oracle: impl RngOracle + 'static) -> Self {
        self.oracle = Arc::new(oracle);
        self
    }

    /// Set the presentation barrier (defaults to [`InstantPresenter`])
    pub fn presenter(mut self, presenter: impl Presenter + 'static) -> Self {
        self.presenter = Arc::new(presenter);
        self
    }

    /// Set player provider (optional)
    pub fn player_provider(mut self, provider: impl PlayerProvider + 'static) -> Self {
        self.player_provider = Some(Box::new(provider));
        self
    }

    /// Build the runtime and spawn its worker
    pub async fn build(self) -> Result<Runtime> {
        let factory = self.factory.ok_or(RuntimeError::MissingEnemyFactory)?;

        let state = match self.state {
            Some(state) => state,
            None => CombatState::new(self.config.seed, self.config.combat.clone(), self.relics)
                .with_loadout(self.loadout),
        };
        let enemies = EnemyManager::new(self.encounters);

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size.max(1));
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let resolving = Arc::new(AtomicBool::new(false));

        let handle = RuntimeHandle::new(command_tx, event_bus.clone(), Arc::clone(&resolving));

        let worker = CombatWorker::new(
            state,
            enemies,
            command_rx,
            WorkerParts {
                factory,
                oracle: self.oracle,
                presenter: self.presenter,
                event_bus,
                resolving,
            },
        );

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            config: self.config,
            player_provider: self.player_provider,
            worker_handle,
        })
    }
}
