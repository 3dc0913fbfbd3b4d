//! Damage, block and healing arithmetic shared by both sides.
//!
//! Every helper saturates: health never underflows, heals never exceed the
//! maximum, and zero amounts are accepted and change nothing.

/// How an incoming hit was split between block and health.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mitigation {
    pub blocked: u32,
    pub damage: u32,
}

/// Absorbs `amount` with `block`, consuming the block used.
pub fn mitigate(amount: u32, block: &mut u32) -> Mitigation {
    let blocked = amount.min(*block);
    *block -= blocked;
    Mitigation {
        blocked,
        damage: amount - blocked,
    }
}

/// Halves `block` (rounding the remainder down). Returns the amount removed.
pub fn halve_block(block: &mut u32) -> u32 {
    let removed = *block - *block / 2;
    *block /= 2;
    removed
}

/// Subtracts `damage` from `health`. Returns the health actually lost.
pub fn apply_damage(health: &mut u32, damage: u32) -> u32 {
    let lost = damage.min(*health);
    *health -= lost;
    lost
}

/// Adds up to `amount` health without exceeding `max`. Returns the health gained.
pub fn heal(health: &mut u32, max: u32, amount: u32) -> u32 {
    let gained = amount.min(max.saturating_sub(*health));
    *health += gained;
    gained
}

/// Half of the missing health, rounded up.
pub fn boss_recovery(health: u32, max: u32) -> u32 {
    max.saturating_sub(health).div_ceil(2)
}
