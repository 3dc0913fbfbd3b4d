//! Curse lifecycle: queuing, distribution onto dice, carryover and cleanse.
//!
//! Enemies queue counts; counts land on random dice at the next first roll of
//! a turn. Curses on dice that were placed in a zone carry over as counts
//! for the following turn, all others are cleansed with the hand.
mod apply;

pub use apply::{
    apply_crowd_control, apply_pending, carryover_counts, cleanse_all, curse_die,
};

/// Player-facing die curses.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Curse {
    Lock,
    Weaken,
    Nullify,
}

impl Curse {
    pub const ALL: [Curse; 3] = [Curse::Lock, Curse::Weaken, Curse::Nullify];
}

/// Curse counts waiting for the next first roll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurseCounts {
    pub lock: u8,
    pub weaken: u8,
    pub nullify: u8,
}

impl CurseCounts {
    pub fn get(&self, curse: Curse) -> u8 {
        match curse {
            Curse::Lock => self.lock,
            Curse::Weaken => self.weaken,
            Curse::Nullify => self.nullify,
        }
    }

    pub fn get_mut(&mut self, curse: Curse) -> &mut u8 {
        match curse {
            Curse::Lock => &mut self.lock,
            Curse::Weaken => &mut self.weaken,
            Curse::Nullify => &mut self.nullify,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lock == 0 && self.weaken == 0 && self.nullify == 0
    }

    pub fn total(&self) -> u32 {
        self.lock as u32 + self.weaken as u32 + self.nullify as u32
    }
}

/// Lock, weaken and nullify counts distributed together without overlap.
pub type CrowdControlPlan = CurseCounts;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    pending: CurseCounts,
    crowd_control: Option<CrowdControlPlan>,
}

impl StatusEffects {
    pub fn pending(&self) -> CurseCounts {
        self.pending
    }

    pub fn pending_count(&self, curse: Curse) -> u8 {
        self.pending.get(curse)
    }

    pub fn crowd_control(&self) -> Option<CrowdControlPlan> {
        self.crowd_control
    }

    /// Adds `count` to a pending counter, capped at `hand_slots`. Zero is ignored.
    pub fn queue(&mut self, curse: Curse, count: u32, hand_slots: u8) {
        if count == 0 {
            return;
        }
        let slot = self.pending.get_mut(curse);
        *slot = clamp_add(*slot, count, hand_slots);
    }

    /// Merges a crowd-control request into the plan waiting for the next roll.
    pub fn queue_crowd_control(&mut self, plan: CrowdControlPlan, hand_slots: u8) {
        if plan.is_empty() {
            return;
        }
        let mut merged = self.crowd_control.unwrap_or_default();
        for curse in Curse::ALL {
            let slot = merged.get_mut(curse);
            *slot = clamp_add(*slot, plan.get(curse) as u32, hand_slots);
        }
        self.crowd_control = Some(merged);
    }

    /// Re-queues curses carried by zoned dice.
    pub fn add_carryover(&mut self, carried: CurseCounts, hand_slots: u8) {
        for curse in Curse::ALL {
            self.queue(curse, carried.get(curse) as u32, hand_slots);
        }
    }

    pub(crate) fn set_pending(&mut self, curse: Curse, count: u8) {
        *self.pending.get_mut(curse) = count;
    }

    pub(crate) fn set_crowd_control(&mut self, plan: Option<CrowdControlPlan>) {
        self.crowd_control = plan.filter(|plan| !plan.is_empty());
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn clamp_add(current: u8, count: u32, cap: u8) -> u8 {
    (current as u32).saturating_add(count).min(cap as u32) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_clamps_to_hand_slots() {
        let mut status = StatusEffects::default();
        status.queue(Curse::Lock, 4, 6);
        status.queue(Curse::Lock, 4, 6);
        assert_eq!(status.pending_count(Curse::Lock), 6);
    }

    #[test]
    fn queue_ignores_zero() {
        let mut status = StatusEffects::default();
        status.queue(Curse::Weaken, 0, 6);
        assert!(status.pending().is_empty());
    }

    #[test]
    fn crowd_control_requests_merge() {
        let mut status = StatusEffects::default();
        status.queue_crowd_control(
            CurseCounts {
                lock: 2,
                weaken: 0,
                nullify: 1,
            },
            6,
        );
        status.queue_crowd_control(
            CurseCounts {
                lock: 1,
                weaken: 2,
                nullify: 0,
            },
            6,
        );
        assert_eq!(
            status.crowd_control(),
            Some(CurseCounts {
                lock: 3,
                weaken: 2,
                nullify: 1
            })
        );
    }

    #[test]
    fn empty_plan_is_dropped() {
        let mut status = StatusEffects::default();
        status.set_crowd_control(Some(CurseCounts::default()));
        assert_eq!(status.crowd_control(), None);
    }
}
