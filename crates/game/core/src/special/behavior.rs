//! Per-kind behavior table.
//!
//! Each [`DieKind`] maps to one [`KindBehavior`] row holding its wildcard
//! capability and the functions scoring and the sequencer call into. The row
//! is looked up once per die; nullified or exhausted dice skip their row and
//! act as Standard.

use super::state::{SpecialArena, SpecialState};
use crate::combo::ComboKind;
use crate::dice::{BlueprintId, Die, DieKind};
use crate::relic::RelicModifiers;
use crate::scoring::ZoneEffect;

pub const MEDICINE_HEAL: u32 = 3;
pub const MEDICINE_HEAL_UPGRADED: u32 = 6;
/// Below this face a zoned Medicine die heals.
pub const MEDICINE_FACE_LIMIT: u8 = 4;
pub const COMET_ENEMY_BURN: u32 = 6;
pub const COMET_ENEMY_BURN_UPGRADED: u32 = 12;
pub const COMET_SELF_BURN: u32 = 2;

/// Effects a zoned die contributes to its zone's score.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Decoration {
    pub contribution: u32,
    pub pre: Option<ZoneEffect>,
    pub post: Option<ZoneEffect>,
}

/// A counter change produced by a usage tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UsageTick {
    pub blueprint: BlueprintId,
    pub kind: DieKind,
    pub remaining: u8,
    pub exhausted: bool,
}

pub struct KindBehavior {
    pub kind: DieKind,
    pub wildcard: bool,
    pub is_nullify_eligible: fn(Option<&SpecialState>) -> bool,
    pub decorate: fn(&Die, Option<&SpecialState>, ComboKind) -> Decoration,
    pub on_zoned: fn(&Die, &mut SpecialState) -> Option<u8>,
    pub on_unused: fn(&Die, &mut SpecialState) -> Option<u8>,
}

static BEHAVIORS: [KindBehavior; 7] = [
    KindBehavior {
        kind: DieKind::Standard,
        wildcard: false,
        is_nullify_eligible: never,
        decorate: no_effects,
        on_zoned: no_tick,
        on_unused: no_tick,
    },
    KindBehavior {
        kind: DieKind::Wild,
        wildcard: true,
        is_nullify_eligible: always,
        decorate: no_effects,
        on_zoned: no_tick,
        on_unused: no_tick,
    },
    KindBehavior {
        kind: DieKind::Medicine,
        wildcard: false,
        is_nullify_eligible: has_charges,
        decorate: medicine_decorate,
        on_zoned: medicine_on_zoned,
        on_unused: no_tick,
    },
    KindBehavior {
        kind: DieKind::Bomb,
        wildcard: false,
        is_nullify_eligible: has_charges,
        decorate: no_effects,
        on_zoned: no_tick,
        on_unused: no_tick,
    },
    KindBehavior {
        kind: DieKind::Comet,
        wildcard: false,
        is_nullify_eligible: has_charges,
        decorate: comet_decorate,
        on_zoned: no_tick,
        on_unused: no_tick,
    },
    KindBehavior {
        kind: DieKind::Charger,
        wildcard: false,
        is_nullify_eligible: has_charges,
        decorate: no_effects,
        on_zoned: no_tick,
        on_unused: charger_on_unused,
    },
    KindBehavior {
        kind: DieKind::Battery,
        wildcard: false,
        is_nullify_eligible: never,
        decorate: no_effects,
        on_zoned: battery_on_zoned,
        on_unused: no_tick,
    },
];

pub fn behavior(kind: DieKind) -> &'static KindBehavior {
    &BEHAVIORS[kind as usize]
}

fn never(_: Option<&SpecialState>) -> bool {
    false
}

fn always(_: Option<&SpecialState>) -> bool {
    true
}

fn has_charges(state: Option<&SpecialState>) -> bool {
    state.is_some_and(|state| !state.is_exhausted())
}

fn no_effects(_: &Die, _: Option<&SpecialState>, _: ComboKind) -> Decoration {
    Decoration::default()
}

fn no_tick(_: &Die, _: &mut SpecialState) -> Option<u8> {
    None
}

fn medicine_decorate(die: &Die, state: Option<&SpecialState>, _: ComboKind) -> Decoration {
    let ready = matches!(state, Some(SpecialState::Medicine(med)) if med.uses_remaining > 0);
    if !ready || die.face() >= MEDICINE_FACE_LIMIT {
        return Decoration::default();
    }
    let amount = if die.is_upgraded() {
        MEDICINE_HEAL_UPGRADED
    } else {
        MEDICINE_HEAL
    };
    Decoration {
        pre: Some(ZoneEffect::HealPlayer { die: die.id, amount }),
        ..Decoration::default()
    }
}

fn medicine_on_zoned(die: &Die, state: &mut SpecialState) -> Option<u8> {
    let SpecialState::Medicine(med) = state else {
        return None;
    };
    if die.face() >= MEDICINE_FACE_LIMIT || med.uses_remaining == 0 {
        return None;
    }
    med.uses_remaining -= 1;
    Some(med.uses_remaining)
}

fn comet_decorate(die: &Die, state: Option<&SpecialState>, combo: ComboKind) -> Decoration {
    let ready = matches!(state, Some(SpecialState::Comet(comet)) if comet.triggers_remaining > 0);
    if !ready || !combo.is_combo() {
        return Decoration::default();
    }
    let (enemy_burn, self_burn) = if die.is_upgraded() {
        (COMET_ENEMY_BURN_UPGRADED, 0)
    } else {
        (COMET_ENEMY_BURN, COMET_SELF_BURN)
    };
    Decoration {
        post: Some(ZoneEffect::CometBurst {
            die: die.id,
            blueprint: die.blueprint.id,
            enemy_burn,
            self_burn,
        }),
        ..Decoration::default()
    }
}

fn charger_on_unused(_: &Die, state: &mut SpecialState) -> Option<u8> {
    let SpecialState::Charger(charger) = state else {
        return None;
    };
    if charger.triggers_remaining == 0 {
        return None;
    }
    charger.triggers_remaining -= 1;
    charger.charges_used += 1;
    Some(charger.triggers_remaining)
}

fn battery_on_zoned(_: &Die, state: &mut SpecialState) -> Option<u8> {
    let SpecialState::Battery(battery) = state else {
        return None;
    };
    if battery.uses_remaining == 0 {
        return None;
    }
    battery.uses_remaining -= 1;
    Some(battery.uses_remaining)
}

/// Kind behavior is live: the die is not nullified and its automaton is not spent.
pub fn is_active(die: &Die, state: Option<&SpecialState>) -> bool {
    !die.is_nullified() && !state.is_some_and(SpecialState::is_exhausted)
}

/// Wildcard flag fed to the classifier. Weakened and nullified dice never
/// qualify.
pub fn acts_as_wildcard(die: &Die, state: Option<&SpecialState>, relics: &RelicModifiers) -> bool {
    if die.is_weakened() || die.is_nullified() {
        return false;
    }
    let kind_wild = is_active(die, state) && behavior(die.kind()).wildcard;
    kind_wild || (relics.wild_one && die.face() == 1)
}

/// Face-value contribution and kind effects of a zoned die.
pub fn decorate(die: &Die, state: Option<&SpecialState>, combo: ComboKind) -> Decoration {
    let contribution = if die.is_weakened() {
        0
    } else {
        die.face() as u32
    };
    let mut decoration = if is_active(die, state) {
        (behavior(die.kind()).decorate)(die, state, combo)
    } else {
        Decoration::default()
    };
    decoration.contribution = contribution;
    decoration
}

/// Whether a nullify curse would change anything on this die.
pub fn is_nullify_eligible(die: &Die, state: Option<&SpecialState>) -> bool {
    !die.is_nullified() && (behavior(die.kind()).is_nullify_eligible)(state)
}

/// Usage tick for a die placed in a zone this turn.
pub fn tick_zoned(arena: &mut SpecialArena, die: &Die) -> Option<UsageTick> {
    let tick = behavior(die.kind()).on_zoned;
    apply_tick(arena, die, tick)
}

/// Usage tick for a die left in the hand this turn. Charger ticks also grow
/// the charger bonus of both zones.
pub fn tick_unused(arena: &mut SpecialArena, die: &Die) -> Option<UsageTick> {
    let tick = behavior(die.kind()).on_unused;
    let result = apply_tick(arena, die, tick)?;
    if result.kind == DieKind::Charger {
        arena.add_charge();
    }
    Some(result)
}

fn apply_tick(
    arena: &mut SpecialArena,
    die: &Die,
    tick: fn(&Die, &mut SpecialState) -> Option<u8>,
) -> Option<UsageTick> {
    // Battery ticks regardless of curses; every other kind stops when nullified.
    if die.is_nullified() && die.kind() != DieKind::Battery {
        return None;
    }
    let state = arena.get_mut(die.blueprint.id)?;
    let remaining = tick(die, state)?;
    Some(UsageTick {
        blueprint: die.blueprint.id,
        kind: die.kind(),
        remaining,
        exhausted: state.is_exhausted(),
    })
}

/// Consumes a comet trigger when its burst fires. Returns `false` when the
/// comet has no trigger left.
pub fn fire_comet(arena: &mut SpecialArena, blueprint: BlueprintId) -> bool {
    match arena.get_mut(blueprint) {
        Some(SpecialState::Comet(comet)) if comet.triggers_remaining > 0 => {
            comet.triggers_remaining -= 1;
            true
        }
        _ => false,
    }
}
