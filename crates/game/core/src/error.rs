//! Common error infrastructure for dice-core.
//!
//! Domain-specific errors (e.g. `PlacementError`, `RollError`) live next to the
//! operations they guard. Every one of them is returned before any state is
//! touched, so a rejected request leaves the combat exactly as it was.
//!
//! # Design Principles
//!
//! - **Type Safety**: each guarded operation has its own error type
//! - **Rich Context**: errors carry the die, zone and turn involved
//! - **Severity Classification**: errors are categorized for logging and recovery

use crate::dice::{DieId, ZoneKind};

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the request may succeed later (e.g. slot occupied, no rolls left)
/// - **Validation**: the request names something that does not exist
/// - **Internal**: combat state disagrees with itself
/// - **Fatal**: combat cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Contextual information attached to errors for diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    pub die: Option<DieId>,
    pub zone: Option<ZoneKind>,
    /// Turn counter within the encounter at the time of the error.
    pub turn: u32,
    pub message: Option<&'static str>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(turn: u32) -> Self {
        Self {
            die: None,
            zone: None,
            turn,
            message: None,
        }
    }

    #[must_use]
    pub const fn with_die(mut self, die: DieId) -> Self {
        self.die = Some(die);
        self
    }

    #[must_use]
    pub const fn with_zone(mut self, zone: ZoneKind) -> Self {
        self.zone = Some(zone);
        self
    }

    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Common trait for all dice-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Static identifier for the variant, used in logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_builder_attaches_fields() {
        let ctx = ErrorContext::new(4)
            .with_die(DieId(7))
            .with_zone(ZoneKind::Attack)
            .with_message("slot taken");
        assert_eq!(ctx.turn, 4);
        assert_eq!(ctx.die, Some(DieId(7)));
        assert_eq!(ctx.zone, Some(ZoneKind::Attack));
        assert_eq!(ctx.message, Some("slot taken"));
    }

    #[test]
    fn only_recoverable_is_recoverable() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert_eq!(ErrorSeverity::Internal.as_str(), "internal");
    }
}
