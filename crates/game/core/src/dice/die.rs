//! Die identity, kinds and per-turn flags.

use bitflags::bitflags;

/// Identity of a die instance. Fresh ids are minted every time the hand is
/// rebuilt at a turn's first roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DieId(pub u32);

impl core::fmt::Display for DieId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "die#{}", self.0)
    }
}

/// Stable identity of a loadout entry, assigned when the loadout is built.
///
/// Special-die state is keyed by this id, so it survives die re-creation and
/// temporary destruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlueprintId(pub u32);

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub enum DieKind {
    #[default]
    Standard,
    /// Acts as a wildcard for combo classification.
    Wild,
    /// Limited-use healer.
    Medicine,
    /// Countdown bomb that detonates while left unused.
    Bomb,
    /// One-shot burner triggered by a combo.
    Comet,
    /// Charges both zones while left unused.
    Charger,
    /// Extra hand slot with a limited number of uses.
    Battery,
}

/// One loadout entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DieBlueprint {
    pub id: BlueprintId,
    pub kind: DieKind,
    pub upgraded: bool,
}

impl DieBlueprint {
    pub const fn new(id: BlueprintId, kind: DieKind, upgraded: bool) -> Self {
        Self { id, kind, upgraded }
    }

    pub const fn standard(id: BlueprintId) -> Self {
        Self::new(id, DieKind::Standard, false)
    }
}

bitflags! {
    /// Transient per-turn flags. Curses (`LOCKED`, `WEAKENED`, `NULLIFIED`) are
    /// cleared when the hand is rebuilt.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct DieFlags: u8 {
        const LOCKED    = 1 << 0;
        const WEAKENED  = 1 << 1;
        const NULLIFIED = 1 << 2;
        const SELECTED  = 1 << 3;
    }
}

impl DieFlags {
    pub const CURSES: DieFlags = DieFlags::LOCKED
        .union(DieFlags::WEAKENED)
        .union(DieFlags::NULLIFIED);
}

/// A die in play.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Die {
    pub id: DieId,
    pub blueprint: DieBlueprint,
    face: u8,
    display: u8,
    flags: DieFlags,
}

impl Die {
    pub fn new(id: DieId, blueprint: DieBlueprint) -> Self {
        Self {
            id,
            blueprint,
            face: 1,
            display: 1,
            flags: DieFlags::empty(),
        }
    }

    pub fn kind(&self) -> DieKind {
        self.blueprint.kind
    }

    pub fn is_upgraded(&self) -> bool {
        self.blueprint.upgraded
    }

    /// Records a new face value. The face is kept even if the die is nullified.
    pub fn set_face(&mut self, face: u8) {
        let face = face.clamp(1, 6);
        self.face = face;
        self.display = face;
    }

    pub fn face(&self) -> u8 {
        self.face
    }

    /// Shown face; differs from [`Die::face`] when a wildcard was assigned.
    pub fn display_value(&self) -> u8 {
        self.display
    }

    pub fn show_as(&mut self, value: u8) {
        self.display = value;
    }

    pub fn flags(&self) -> DieFlags {
        self.flags
    }

    pub fn is_locked(&self) -> bool {
        self.flags.contains(DieFlags::LOCKED)
    }

    pub fn is_weakened(&self) -> bool {
        self.flags.contains(DieFlags::WEAKENED)
    }

    pub fn is_nullified(&self) -> bool {
        self.flags.contains(DieFlags::NULLIFIED)
    }

    pub fn is_selected(&self) -> bool {
        self.flags.contains(DieFlags::SELECTED)
    }

    pub fn has_curse(&self) -> bool {
        self.flags.intersects(DieFlags::CURSES)
    }

    pub fn set_flag(&mut self, flag: DieFlags, on: bool) {
        self.flags.set(flag, on);
    }

    pub fn clear_curses(&mut self) {
        self.flags.remove(DieFlags::CURSES);
    }
}
