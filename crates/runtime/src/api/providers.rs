//! Asynchronous abstraction for sourcing player intent.
//!
//! Runtime users plug in [`PlayerProvider`] implementations so a run can be
//! driven by human input, scripted fixtures, or an automatic policy.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use dice_core::{DieId, ZoneKind};

use super::errors::Result;
use super::snapshot::CombatSnapshot;

/// One player input, mirroring the engine operations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerCommand {
    StartEncounter,
    Roll,
    ToggleReroll(DieId),
    Place { die: DieId, zone: ZoneKind, slot: u8 },
    PlaceNext { die: DieId, zone: ZoneKind },
    Remove(DieId),
    SortHand,
    Resolve,
}

/// Trait for providing the next command based on the current combat.
#[async_trait]
pub trait PlayerProvider: Send + Sync {
    async fn next_command(&self, snapshot: &CombatSnapshot) -> Result<PlayerCommand>;
}
