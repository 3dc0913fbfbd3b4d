//! Combo classifier.
//!
//! Pure functions from face values (plus wildcard flags) to a [`ComboResult`].
mod classify;
mod kind;

pub use classify::{ComboResult, classify, evaluate};
pub use kind::{ComboKind, ComboTable};
