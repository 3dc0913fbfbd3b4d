//! Special die state machines.
//!
//! Stateful kinds (Bomb, Medicine, Comet, Charger, Battery) keep their
//! counters in a [`SpecialArena`] keyed by blueprint id. The per-kind rules
//! live in the [`behavior`] table.
pub mod behavior;
mod state;

pub use behavior::{
    Decoration, KindBehavior, UsageTick, acts_as_wildcard, decorate, fire_comet,
    is_nullify_eligible, tick_unused, tick_zoned,
};
pub use state::{
    BOMB_BONUS, BOMB_BONUS_UPGRADED, BatteryState, BombState, ChargerBonus, ChargerState,
    CometState, DetonationReport, MedicineState, SpecialArena, SpecialState,
};
