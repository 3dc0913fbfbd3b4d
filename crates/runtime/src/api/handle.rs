//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for every
//! combat operation or streaming events from specific topics.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{broadcast, mpsc, oneshot};

use dice_core::{DieId, RolledDie, TurnReport, ZoneKind};

use super::errors::{Result, RuntimeError};
use super::providers::PlayerCommand;
use super::snapshot::CombatSnapshot;
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// What a command did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    EncounterStarted,
    Rolled(Vec<RolledDie>),
    Selected { die: DieId, selected: bool },
    Placed { die: DieId, zone: ZoneKind, slot: u8 },
    Removed(DieId),
    Sorted,
    Resolved(Box<TurnReport>),
    /// Dropped because a resolution was still being presented.
    Ignored,
}

/// Clears the resolving flag on drop unless disarmed.
struct ResolvingGuard<'a> {
    flag: &'a AtomicBool,
    armed: bool,
}

impl<'a> ResolvingGuard<'a> {
    fn new(flag: &'a AtomicBool) -> Self {
        Self { flag, armed: true }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for ResolvingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.flag.store(false, Ordering::Release);
        }
    }
}

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
    resolving: Arc<AtomicBool>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_bus: EventBus,
        resolving: Arc<AtomicBool>,
    ) -> Self {
        Self {
            command_tx,
            event_bus,
            resolving,
        }
    }

    /// Hands a command to the worker, returning the receiver for its reply.
    async fn dispatch<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<oneshot::Receiver<T>> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(make(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        Ok(reply_rx)
    }

    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let reply_rx = self.dispatch(make).await?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// True while a resolution is between its first and last stage.
    pub fn is_resolving(&self) -> bool {
        self.resolving.load(Ordering::Acquire)
    }

    pub async fn start_encounter(&self) -> Result<CommandOutcome> {
        self.request(|reply| Command::StartEncounter { reply }).await??;
        Ok(CommandOutcome::EncounterStarted)
    }

    /// Rolls the hand. Ignored while a resolution is being presented.
    pub async fn roll(&self) -> Result<CommandOutcome> {
        if self.is_resolving() {
            tracing::debug!(target: "runtime::handle", "roll ignored during resolution");
            return Ok(CommandOutcome::Ignored);
        }
        let dice = self.request(|reply| Command::Roll { reply }).await??;
        Ok(CommandOutcome::Rolled(dice))
    }

    pub async fn toggle_reroll(&self, die: DieId) -> Result<CommandOutcome> {
        let selected = self
            .request(|reply| Command::ToggleReroll { die, reply })
            .await??;
        Ok(CommandOutcome::Selected { die, selected })
    }

    pub async fn place(&self, die: DieId, zone: ZoneKind, slot: u8) -> Result<CommandOutcome> {
        self.request(|reply| Command::Place {
            die,
            zone,
            slot,
            reply,
        })
        .await??;
        Ok(CommandOutcome::Placed { die, zone, slot })
    }

    pub async fn place_next(&self, die: DieId, zone: ZoneKind) -> Result<CommandOutcome> {
        let slot = self
            .request(|reply| Command::PlaceNext { die, zone, reply })
            .await??;
        Ok(CommandOutcome::Placed { die, zone, slot })
    }

    pub async fn remove(&self, die: DieId) -> Result<CommandOutcome> {
        self.request(|reply| Command::Remove { die, reply }).await??;
        Ok(CommandOutcome::Removed(die))
    }

    pub async fn sort_hand(&self) -> Result<CommandOutcome> {
        self.request(|reply| Command::SortHand { reply }).await??;
        Ok(CommandOutcome::Sorted)
    }

    /// Runs a full resolution, awaiting the presenter between stages.
    ///
    /// Only one resolution can be in flight: a second request made before the
    /// first completes is ignored rather than queued.
    pub async fn resolve(&self) -> Result<CommandOutcome> {
        if self
            .resolving
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!(target: "runtime::handle", "resolve ignored during resolution");
            return Ok(CommandOutcome::Ignored);
        }

        // Until the worker owns the command, this call is the only one that
        // can clear the flag, including when the future is dropped mid-send.
        let mut guard = ResolvingGuard::new(&self.resolving);
        let reply_rx = self.dispatch(|reply| Command::Resolve { reply }).await?;
        guard.disarm();

        let report = match reply_rx.await {
            Ok(report) => report?,
            Err(err) => {
                // The worker is gone without finishing the resolution.
                self.resolving.store(false, Ordering::Release);
                return Err(RuntimeError::ReplyChannelClosed(err));
            }
        };
        Ok(CommandOutcome::Resolved(Box::new(report)))
    }

    /// Dispatches a provider command to the matching operation.
    pub async fn execute(&self, command: PlayerCommand) -> Result<CommandOutcome> {
        match command {
            PlayerCommand::StartEncounter => self.start_encounter().await,
            PlayerCommand::Roll => self.roll().await,
            PlayerCommand::ToggleReroll(die) => self.toggle_reroll(die).await,
            PlayerCommand::Place { die, zone, slot } => self.place(die, zone, slot).await,
            PlayerCommand::PlaceNext { die, zone } => self.place_next(die, zone).await,
            PlayerCommand::Remove(die) => self.remove(die).await,
            PlayerCommand::SortHand => self.sort_hand().await,
            PlayerCommand::Resolve => self.resolve().await,
        }
    }

    /// Read-only view of the combat.
    pub async fn snapshot(&self) -> Result<CombatSnapshot> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Score` - Zone score breakdowns
    /// - `Topic::Combat` - Rolls, curses, damage and enemy intent
    /// - `Topic::Encounter` - Encounter start, defeat, terminal states
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn handle(capacity: usize) -> (RuntimeHandle, mpsc::Receiver<Command>) {
        let (command_tx, command_rx) = mpsc::channel(capacity);
        let handle = RuntimeHandle::new(
            command_tx,
            EventBus::with_capacity(8),
            Arc::new(AtomicBool::new(false)),
        );
        (handle, command_rx)
    }

    fn occupy(handle: &RuntimeHandle) {
        let (reply, _) = oneshot::channel();
        assert!(handle.command_tx.try_send(Command::Snapshot { reply }).is_ok());
    }

    #[tokio::test]
    async fn abandoned_resolve_on_a_full_queue_releases_the_flag() {
        let (handle, mut command_rx) = handle(1);
        occupy(&handle);

        let pending = tokio::time::timeout(Duration::from_millis(20), handle.resolve()).await;
        assert!(pending.is_err());
        assert!(!handle.is_resolving());

        // A later resolve is accepted instead of ignored.
        let retry = handle.clone();
        let resolving = tokio::spawn(async move { retry.resolve().await });
        assert!(matches!(command_rx.recv().await, Some(Command::Snapshot { .. })));
        assert!(matches!(command_rx.recv().await, Some(Command::Resolve { .. })));
        resolving.abort();
    }

    #[tokio::test]
    async fn resolve_owned_by_the_worker_keeps_the_flag() {
        let (handle, mut command_rx) = handle(1);
        let pending = tokio::time::timeout(Duration::from_millis(20), handle.resolve()).await;
        assert!(pending.is_err());
        assert!(handle.is_resolving());
        assert!(matches!(command_rx.recv().await, Some(Command::Resolve { .. })));
    }

    #[tokio::test]
    async fn resolve_against_a_stopped_worker_fails_and_releases_the_flag() {
        let (handle, command_rx) = handle(1);
        drop(command_rx);
        let err = handle.resolve().await.unwrap_err();
        assert!(matches!(err, RuntimeError::CommandChannelClosed));
        assert!(!handle.is_resolving());
    }
}
