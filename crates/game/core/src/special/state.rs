//! Encounter-scoped runtime state of special dice.
//!
//! Records live in [`SpecialArena`], addressed by the [`BlueprintId`] assigned
//! when the loadout was built. They are created at encounter start and
//! survive the re-creation of the die objects every turn.

use crate::config::CombatConfig;
use crate::dice::{BlueprintId, DieBlueprint, DieKind, ZoneKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BombState {
    pub countdown: u8,
    pub detonated: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MedicineState {
    pub uses_remaining: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CometState {
    pub triggers_remaining: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChargerState {
    pub triggers_remaining: u8,
    pub max_triggers: u8,
    pub charges_used: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatteryState {
    pub uses_remaining: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpecialState {
    Bomb(BombState),
    Medicine(MedicineState),
    Comet(CometState),
    Charger(ChargerState),
    Battery(BatteryState),
}

impl SpecialState {
    /// Fresh record for a blueprint, or `None` for stateless kinds.
    pub fn initial(blueprint: &DieBlueprint, config: &CombatConfig) -> Option<Self> {
        match blueprint.kind {
            DieKind::Standard | DieKind::Wild => None,
            DieKind::Bomb => Some(Self::Bomb(BombState {
                countdown: config.bomb_countdown,
                detonated: false,
            })),
            DieKind::Medicine => Some(Self::Medicine(MedicineState {
                uses_remaining: config.medicine_uses,
            })),
            DieKind::Comet => Some(Self::Comet(CometState {
                triggers_remaining: config.comet_triggers.min(1),
            })),
            DieKind::Charger => {
                let max_triggers = if blueprint.upgraded {
                    config.charger_triggers_upgraded
                } else {
                    config.charger_triggers
                };
                Some(Self::Charger(ChargerState {
                    triggers_remaining: max_triggers,
                    max_triggers,
                    charges_used: 0,
                }))
            }
            DieKind::Battery => Some(Self::Battery(BatteryState {
                uses_remaining: config.battery_uses,
            })),
        }
    }

    /// True once the automaton reached its terminal state; the die then
    /// behaves as a plain Standard die.
    pub fn is_exhausted(&self) -> bool {
        match self {
            Self::Bomb(bomb) => bomb.detonated || bomb.countdown == 0,
            Self::Medicine(med) => med.uses_remaining == 0,
            Self::Comet(comet) => comet.triggers_remaining == 0,
            Self::Charger(charger) => charger.triggers_remaining == 0,
            Self::Battery(battery) => battery.uses_remaining == 0,
        }
    }
}

/// Bombs that went off during one countdown tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetonationReport {
    pub bonus: u32,
    pub detonated: Vec<BlueprintId>,
}

impl DetonationReport {
    pub fn count(&self) -> usize {
        self.detonated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detonated.is_empty()
    }
}

/// Per-zone bonus accumulated by charger dice for the rest of the encounter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChargerBonus {
    pub defend: u32,
    pub attack: u32,
}

impl ChargerBonus {
    pub fn for_zone(&self, zone: ZoneKind) -> u32 {
        match zone {
            ZoneKind::Defend => self.defend,
            ZoneKind::Attack => self.attack,
        }
    }
}

pub const BOMB_BONUS: u32 = 20;
pub const BOMB_BONUS_UPGRADED: u32 = 30;

/// Arena of special-die records indexed by blueprint id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpecialArena {
    slots: Vec<Option<(DieBlueprint, SpecialState)>>,
    charger_bonus: ChargerBonus,
}

impl SpecialArena {
    /// Creates records for every stateful blueprint of the loadout.
    pub fn for_loadout<'a>(
        blueprints: impl IntoIterator<Item = &'a DieBlueprint>,
        config: &CombatConfig,
    ) -> Self {
        let mut arena = Self::default();
        for blueprint in blueprints {
            if let Some(state) = SpecialState::initial(blueprint, config) {
                arena.create(*blueprint, state);
            }
        }
        arena
    }

    pub fn create(&mut self, blueprint: DieBlueprint, state: SpecialState) {
        let idx = blueprint.id.0 as usize;
        if self.slots.len() <= idx {
            self.slots.resize(idx + 1, None);
        }
        self.slots[idx] = Some((blueprint, state));
    }

    pub fn remove(&mut self, id: BlueprintId) -> Option<SpecialState> {
        self.slots
            .get_mut(id.0 as usize)
            .and_then(Option::take)
            .map(|(_, state)| state)
    }

    pub fn get(&self, id: BlueprintId) -> Option<&SpecialState> {
        self.slots
            .get(id.0 as usize)
            .and_then(Option::as_ref)
            .map(|(_, state)| state)
    }

    pub fn get_mut(&mut self, id: BlueprintId) -> Option<&mut SpecialState> {
        self.slots
            .get_mut(id.0 as usize)
            .and_then(Option::as_mut)
            .map(|(_, state)| state)
    }

    pub fn is_exhausted(&self, id: BlueprintId) -> bool {
        self.get(id).is_some_and(SpecialState::is_exhausted)
    }

    pub fn records(&self) -> impl Iterator<Item = (&DieBlueprint, &SpecialState)> {
        self.slots
            .iter()
            .flatten()
            .map(|(blueprint, state)| (blueprint, state))
    }

    pub fn charger_bonus(&self) -> ChargerBonus {
        self.charger_bonus
    }

    pub(crate) fn add_charge(&mut self) {
        self.charger_bonus.defend += 1;
        self.charger_bonus.attack += 1;
    }

    /// Ticks every live bomb not in `exempt`. A bomb reaching 0 detonates once.
    pub fn tick_bombs(&mut self, exempt: &[BlueprintId]) -> DetonationReport {
        let mut report = DetonationReport::default();
        for (blueprint, state) in self.slots.iter_mut().flatten() {
            let SpecialState::Bomb(bomb) = state else {
                continue;
            };
            if bomb.detonated || exempt.contains(&blueprint.id) {
                continue;
            }
            bomb.countdown = bomb.countdown.saturating_sub(1);
            if bomb.countdown == 0 {
                bomb.detonated = true;
                report.bonus += if blueprint.upgraded {
                    BOMB_BONUS_UPGRADED
                } else {
                    BOMB_BONUS
                };
                report.detonated.push(blueprint.id);
            }
        }
        report
    }

    /// Battery blueprint whose die still holds uses.
    pub fn available_battery(&self) -> Option<DieBlueprint> {
        self.slots.iter().flatten().find_map(|(blueprint, state)| {
            matches!(state, SpecialState::Battery(b) if b.uses_remaining > 0).then_some(*blueprint)
        })
    }
}
