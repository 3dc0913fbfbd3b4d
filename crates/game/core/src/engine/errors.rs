//! Error types for the combat operations.
//!
//! Every variant is produced by a guard that runs before any mutation, so a
//! rejected request leaves [`crate::state::CombatState`] untouched.

use crate::dice::{DieId, PlacementError};
use crate::enemy::EncounterError;
use crate::error::{ErrorContext, ErrorSeverity, GameError};

/// Identifies which stage of an operation rejected the request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnginePhase {
    Validate,
    Apply,
    Settle,
}

impl EnginePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnginePhase::Validate => "validate",
            EnginePhase::Apply => "apply",
            EnginePhase::Settle => "settle",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RollError {
    #[error("no encounter in progress")]
    NotInCombat,

    #[error("a turn is resolving")]
    Resolving,

    #[error("no rolls left this turn")]
    NoRollsLeft,

    #[error("no dice selected for reroll")]
    NothingSelected,
}

impl GameError for RollError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotInCombat => "ROLL_NOT_IN_COMBAT",
            Self::Resolving => "ROLL_RESOLVING",
            Self::NoRollsLeft => "ROLL_NO_ROLLS_LEFT",
            Self::NothingSelected => "ROLL_NOTHING_SELECTED",
        }
    }
}

/// Rejections of die interaction: reroll selection, placement, sorting.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionError {
    #[error("no encounter in progress")]
    NotInCombat,

    #[error("a turn is resolving")]
    Resolving,

    #[error("dice have not been rolled this turn")]
    NotRolled,

    #[error("{die} is not in play")]
    UnknownDie { die: DieId },

    #[error("{die} is locked")]
    Locked { die: DieId },
}

impl GameError for SelectionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownDie { .. } => ErrorSeverity::Validation,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotInCombat => "SELECTION_NOT_IN_COMBAT",
            Self::Resolving => "SELECTION_RESOLVING",
            Self::NotRolled => "SELECTION_NOT_ROLLED",
            Self::UnknownDie { .. } => "SELECTION_UNKNOWN_DIE",
            Self::Locked { .. } => "SELECTION_LOCKED",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResolveError {
    #[error("no encounter in progress")]
    NotInCombat,

    #[error("a turn is already resolving")]
    AlreadyResolving,

    #[error("dice have not been rolled this turn")]
    NotRolled,

    #[error("resolution stage mismatch: expected {expected}")]
    WrongStage { expected: &'static str },
}

impl GameError for ResolveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::WrongStage { .. } => ErrorSeverity::Internal,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotInCombat => "RESOLVE_NOT_IN_COMBAT",
            Self::AlreadyResolving => "RESOLVE_ALREADY_RESOLVING",
            Self::NotRolled => "RESOLVE_NOT_ROLLED",
            Self::WrongStage { .. } => "RESOLVE_WRONG_STAGE",
        }
    }
}

/// Errors surfaced by [`super::CombatEngine`] operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("placement rejected: {0}")]
    Placement(#[from] PlacementError),

    #[error("roll rejected: {0}")]
    Roll(#[from] RollError),

    #[error("selection rejected: {0}")]
    Selection(#[from] SelectionError),

    #[error("resolve rejected: {0}")]
    Resolve(#[from] ResolveError),

    #[error("encounter rejected: {0}")]
    Encounter(#[from] EncounterError),
}

impl EngineError {
    pub fn phase(&self) -> EnginePhase {
        match self {
            Self::Resolve(ResolveError::WrongStage { .. }) => EnginePhase::Settle,
            Self::Encounter(EncounterError::UnknownEnemy { .. }) => EnginePhase::Apply,
            _ => EnginePhase::Validate,
        }
    }

    fn inner(&self) -> &dyn GameError {
        match self {
            Self::Placement(err) => err,
            Self::Roll(err) => err,
            Self::Selection(err) => err,
            Self::Resolve(err) => err,
            Self::Encounter(err) => err,
        }
    }

    /// Diagnostic context for logging, stamped with the current turn.
    pub fn context_at(&self, turn: u32) -> ErrorContext {
        let ctx = ErrorContext::new(turn).with_message(self.phase().as_str());
        match self {
            Self::Placement(
                PlacementError::UnknownDie { die } | PlacementError::AlreadyInHand { die },
            )
            | Self::Selection(SelectionError::UnknownDie { die } | SelectionError::Locked { die }) => {
                ctx.with_die(*die)
            }
            Self::Placement(
                PlacementError::SlotOccupied { zone, .. }
                | PlacementError::ZoneFull { zone, .. }
                | PlacementError::SlotOutOfRange { zone, .. },
            ) => ctx.with_zone(*zone),
            _ => ctx,
        }
    }
}

impl GameError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        self.inner().severity()
    }

    fn error_code(&self) -> &'static str {
        self.inner().error_code()
    }
}
