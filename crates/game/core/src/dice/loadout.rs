//! Loadout construction.

use super::{BlueprintId, DieBlueprint, DieKind};

/// A die the player owns, before ids are assigned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadoutEntry {
    pub kind: DieKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub upgraded: bool,
}

impl LoadoutEntry {
    pub const fn new(kind: DieKind, upgraded: bool) -> Self {
        Self { kind, upgraded }
    }
}

/// Blueprints for one encounter, ids assigned in order starting at 0.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Loadout {
    blueprints: Vec<DieBlueprint>,
    battery: Option<DieBlueprint>,
}

impl Loadout {
    /// Pads `entries` with Standard dice (or truncates) to `hand_size`, then
    /// appends a Battery blueprint when `with_battery` is set.
    pub fn build(entries: &[LoadoutEntry], hand_size: u8, with_battery: bool) -> Self {
        let hand_size = hand_size as usize;
        let blueprints: Vec<DieBlueprint> = entries
            .iter()
            .copied()
            .chain(core::iter::repeat(LoadoutEntry::default()))
            .take(hand_size)
            .enumerate()
            .map(|(idx, entry)| DieBlueprint::new(BlueprintId(idx as u32), entry.kind, entry.upgraded))
            .collect();
        let battery = with_battery
            .then(|| DieBlueprint::new(BlueprintId(hand_size as u32), DieKind::Battery, false));
        Self {
            blueprints,
            battery,
        }
    }

    pub fn standard(hand_size: u8) -> Self {
        Self::build(&[], hand_size, false)
    }

    /// Regular hand blueprints.
    pub fn blueprints(&self) -> &[DieBlueprint] {
        &self.blueprints
    }

    pub fn battery(&self) -> Option<DieBlueprint> {
        self.battery
    }

    /// Every blueprint including the battery.
    pub fn all(&self) -> impl Iterator<Item = &DieBlueprint> {
        self.blueprints.iter().chain(self.battery.iter())
    }
}
