//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, the combat engine and player
//! providers so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use dice_core::EngineError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("combat worker command channel closed")]
    CommandChannelClosed,

    #[error("combat worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("combat worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    /// The engine rejected the command; combat state is unchanged.
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("player provider not set")]
    ProviderNotSet,

    #[error("player provider failed: {0}")]
    Provider(String),

    #[error("runtime requires an enemy factory before building")]
    MissingEnemyFactory,

    #[error("invalid value {value:?} for {key}")]
    InvalidEnv { key: &'static str, value: String },

    #[error("run did not finish within {limit} steps")]
    StepLimit { limit: usize },
}

impl RuntimeError {
    /// True for rejections the caller may log and move past.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Engine(_))
    }
}
