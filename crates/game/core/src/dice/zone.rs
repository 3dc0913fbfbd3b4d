//! Hand and scoring zones.
//!
//! [`Board`] owns every die in play and records where each one sits. A die is
//! in exactly one of the hand, a Defend slot or an Attack slot; all moves go
//! through [`Board::place`] and [`Board::remove`], which validate before they
//! mutate.

use arrayvec::ArrayVec;

use super::{Die, DieId};
use crate::config::CombatConfig;
use crate::error::{ErrorSeverity, GameError};

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
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ZoneKind {
    Defend,
    Attack,
}

impl ZoneKind {
    pub const ALL: [ZoneKind; 2] = [ZoneKind::Defend, ZoneKind::Attack];

    pub fn opposite(self) -> ZoneKind {
        match self {
            ZoneKind::Defend => ZoneKind::Attack,
            ZoneKind::Attack => ZoneKind::Defend,
        }
    }
}

/// Where a die currently sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Location {
    Hand,
    Zone { zone: ZoneKind, slot: u8 },
}

/// Errors from die placement.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("{die} is not in play")]
    UnknownDie { die: DieId },

    #[error("{zone} slot {slot} is already occupied")]
    SlotOccupied { zone: ZoneKind, slot: u8 },

    #[error("{zone} zone is full ({cap} dice)")]
    ZoneFull { zone: ZoneKind, cap: u8 },

    #[error("{zone} slot {slot} is outside the zone cap {cap}")]
    SlotOutOfRange { zone: ZoneKind, slot: u8, cap: u8 },

    #[error("{die} is already in the hand")]
    AlreadyInHand { die: DieId },
}

impl GameError for PlacementError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownDie { .. } | Self::SlotOutOfRange { .. } => ErrorSeverity::Validation,
            Self::SlotOccupied { .. } | Self::ZoneFull { .. } | Self::AlreadyInHand { .. } => {
                ErrorSeverity::Recoverable
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownDie { .. } => "PLACEMENT_UNKNOWN_DIE",
            Self::SlotOccupied { .. } => "PLACEMENT_SLOT_OCCUPIED",
            Self::ZoneFull { .. } => "PLACEMENT_ZONE_FULL",
            Self::SlotOutOfRange { .. } => "PLACEMENT_SLOT_OUT_OF_RANGE",
            Self::AlreadyInHand { .. } => "PLACEMENT_ALREADY_IN_HAND",
        }
    }
}

/// Ordered die slots of one zone.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Zone {
    kind: ZoneKind,
    slots: [Option<DieId>; CombatConfig::MAX_DICE_PER_ZONE],
    cap: u8,
}

impl Zone {
    pub fn new(kind: ZoneKind, cap: u8) -> Self {
        Self {
            kind,
            slots: [None; CombatConfig::MAX_DICE_PER_ZONE],
            cap: cap.min(CombatConfig::MAX_DICE_PER_ZONE as u8),
        }
    }

    pub fn kind(&self) -> ZoneKind {
        self.kind
    }

    pub fn cap(&self) -> u8 {
        self.cap
    }

    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dice in slot order.
    pub fn dice(&self) -> impl Iterator<Item = DieId> + '_ {
        self.slots.iter().flatten().copied()
    }

    pub fn contains(&self, die: DieId) -> bool {
        self.slot_of(die).is_some()
    }

    pub fn slot_of(&self, die: DieId) -> Option<u8> {
        self.slots
            .iter()
            .position(|slot| *slot == Some(die))
            .map(|idx| idx as u8)
    }

    /// First free slot under the cap.
    pub fn first_free_slot(&self) -> Option<u8> {
        (0..self.cap).find(|&slot| self.slots[slot as usize].is_none())
    }

    fn clear(&mut self) {
        self.slots = [None; CombatConfig::MAX_DICE_PER_ZONE];
    }
}

/// All dice in play plus their locations.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    dice: ArrayVec<Die, { CombatConfig::MAX_HAND_SIZE }>,
    hand: ArrayVec<DieId, { CombatConfig::MAX_HAND_SIZE }>,
    defend: Zone,
    attack: Zone,
}

impl Board {
    pub fn new(zone_cap: u8) -> Self {
        Self {
            dice: ArrayVec::new(),
            hand: ArrayVec::new(),
            defend: Zone::new(ZoneKind::Defend, zone_cap),
            attack: Zone::new(ZoneKind::Attack, zone_cap),
        }
    }

    /// Destroys every die in play.
    pub fn clear(&mut self) {
        self.dice.clear();
        self.hand.clear();
        self.defend.clear();
        self.attack.clear();
    }

    /// Adds a die to the end of the hand. Returns `false` when the board is full.
    pub fn insert(&mut self, die: Die) -> bool {
        if self.dice.is_full() {
            return false;
        }
        self.hand.push(die.id);
        self.dice.push(die);
        true
    }

    pub fn len(&self) -> usize {
        self.dice.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    pub fn die(&self, id: DieId) -> Option<&Die> {
        self.dice.iter().find(|die| die.id == id)
    }

    pub fn die_mut(&mut self, id: DieId) -> Option<&mut Die> {
        self.dice.iter_mut().find(|die| die.id == id)
    }

    /// Dice in creation order.
    pub fn dice(&self) -> impl Iterator<Item = &Die> {
        self.dice.iter()
    }

    pub fn dice_mut(&mut self) -> impl Iterator<Item = &mut Die> {
        self.dice.iter_mut()
    }

    pub fn hand(&self) -> &[DieId] {
        &self.hand
    }

    pub fn zone(&self, kind: ZoneKind) -> &Zone {
        match kind {
            ZoneKind::Defend => &self.defend,
            ZoneKind::Attack => &self.attack,
        }
    }

    fn zone_mut(&mut self, kind: ZoneKind) -> &mut Zone {
        match kind {
            ZoneKind::Defend => &mut self.defend,
            ZoneKind::Attack => &mut self.attack,
        }
    }

    /// Dice of a zone in slot order.
    pub fn zone_dice(&self, kind: ZoneKind) -> Vec<&Die> {
        self.zone(kind)
            .dice()
            .filter_map(|id| self.die(id))
            .collect()
    }

    /// Hand, then Defend, then Attack; each die exactly once.
    pub fn dice_in_play(&self) -> Vec<DieId> {
        self.hand
            .iter()
            .copied()
            .chain(self.defend.dice())
            .chain(self.attack.dice())
            .collect()
    }

    pub fn location(&self, id: DieId) -> Option<Location> {
        if self.hand.contains(&id) {
            return Some(Location::Hand);
        }
        ZoneKind::ALL.into_iter().find_map(|zone| {
            self.zone(zone)
                .slot_of(id)
                .map(|slot| Location::Zone { zone, slot })
        })
    }

    pub fn in_any_zone(&self, id: DieId) -> bool {
        matches!(self.location(id), Some(Location::Zone { .. }))
    }

    /// Moves a die from the hand (or another slot) into `zone[slot]`.
    pub fn place(&mut self, id: DieId, zone: ZoneKind, slot: u8) -> Result<(), PlacementError> {
        let from = self
            .location(id)
            .ok_or(PlacementError::UnknownDie { die: id })?;
        let target = self.zone(zone);
        let cap = target.cap();

        if slot >= cap {
            return Err(PlacementError::SlotOutOfRange { zone, slot, cap });
        }
        if target.slots[slot as usize].is_some() {
            return Err(PlacementError::SlotOccupied { zone, slot });
        }
        let moving_within = matches!(from, Location::Zone { zone: z, .. } if z == zone);
        if !moving_within && target.len() >= cap as usize {
            return Err(PlacementError::ZoneFull { zone, cap });
        }

        self.detach(id, from);
        self.zone_mut(zone).slots[slot as usize] = Some(id);
        Ok(())
    }

    /// Places a die in the first free slot of a zone.
    pub fn place_next(&mut self, id: DieId, zone: ZoneKind) -> Result<u8, PlacementError> {
        let target = self.zone(zone);
        let slot = target.first_free_slot().ok_or(PlacementError::ZoneFull {
            zone,
            cap: target.cap(),
        })?;
        self.place(id, zone, slot)?;
        Ok(slot)
    }

    /// Returns a placed die to the end of the hand.
    pub fn remove(&mut self, id: DieId) -> Result<(), PlacementError> {
        match self.location(id) {
            None => Err(PlacementError::UnknownDie { die: id }),
            Some(Location::Hand) => Err(PlacementError::AlreadyInHand { die: id }),
            Some(from) => {
                self.detach(id, from);
                self.hand.push(id);
                Ok(())
            }
        }
    }

    fn detach(&mut self, id: DieId, from: Location) {
        match from {
            Location::Hand => self.hand.retain(|held| *held != id),
            Location::Zone { zone, slot } => self.zone_mut(zone).slots[slot as usize] = None,
        }
    }

    /// Changes both zone caps; dice in slots at or beyond the new cap return
    /// to the hand. Returns the evicted dice.
    pub fn set_zone_cap(&mut self, cap: u8) -> Vec<DieId> {
        let cap = cap.min(CombatConfig::MAX_DICE_PER_ZONE as u8);
        let mut evicted = Vec::new();
        for kind in ZoneKind::ALL {
            let zone = self.zone_mut(kind);
            zone.cap = cap;
            for slot in cap as usize..CombatConfig::MAX_DICE_PER_ZONE {
                if let Some(id) = zone.slots[slot].take() {
                    evicted.push(id);
                }
            }
        }
        for id in &evicted {
            self.hand.push(*id);
        }
        evicted
    }

    /// Orders the hand by face value, ties by die id.
    pub fn sort_hand(&mut self) {
        let mut keyed: Vec<(u8, DieId)> = self
            .hand
            .iter()
            .map(|id| (self.die(*id).map(Die::face).unwrap_or(0), *id))
            .collect();
        keyed.sort();
        self.hand = keyed.into_iter().map(|(_, id)| id).collect();
    }
}
