//! Presentation barrier awaited between resolution stages.
//!
//! The worker suspends on the presenter after bombs detonate and again after
//! the dice are scored, so an animated frontend can finish its effects before
//! the next stage mutates state. Player commands that would start another
//! roll or resolution in the meantime are ignored by the handle.
use std::time::Duration;

use async_trait::async_trait;
use dice_core::{DetonationReport, DieId};

#[async_trait]
pub trait Presenter: Send + Sync {
    /// Called after the bomb countdown tick, even when nothing detonated.
    async fn detonation(&self, report: &DetonationReport);

    /// Called after scoring with the dice about to be cleared.
    async fn dice_resolved(&self, dice: &[DieId]);
}

/// Completes every barrier immediately.
#[derive(Clone, Copy, Debug, Default)]
pub struct InstantPresenter;

#[async_trait]
impl Presenter for InstantPresenter {
    async fn detonation(&self, _report: &DetonationReport) {}

    async fn dice_resolved(&self, _dice: &[DieId]) {}
}

/// Sleeps a fixed time at each barrier, standing in for an animation.
#[derive(Clone, Copy, Debug)]
pub struct DelayPresenter {
    pub detonation: Duration,
    pub resolved: Duration,
}

impl DelayPresenter {
    pub fn uniform(delay: Duration) -> Self {
        Self {
            detonation: delay,
            resolved: delay,
        }
    }
}

#[async_trait]
impl Presenter for DelayPresenter {
    async fn detonation(&self, report: &DetonationReport) {
        if !report.is_empty() {
            tokio::time::sleep(self.detonation).await;
        }
    }

    async fn dice_resolved(&self, _dice: &[DieId]) {
        tokio::time::sleep(self.resolved).await;
    }
}
