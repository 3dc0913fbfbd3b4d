//! Zone scoring.
//!
//! [`compute_zone_score`] composes face contributions, zone-level bonuses and
//! the combo bonus into one [`ZoneScore`], and collects the kind effects the
//! sequencer runs before and after the exchange of blows.

use crate::combo::{ComboKind, ComboTable, evaluate};
use crate::dice::{BlueprintId, Die, DieId, ZoneKind};
use crate::relic::RelicModifiers;
use crate::special::{self, SpecialArena};

/// Kind effect queued by a zoned die.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZoneEffect {
    HealPlayer {
        die: DieId,
        amount: u32,
    },
    CometBurst {
        die: DieId,
        blueprint: BlueprintId,
        enemy_burn: u32,
        self_burn: u32,
    },
}

/// Inputs scoring reads besides the dice themselves.
#[derive(Clone, Copy)]
pub struct ScoreContext<'a> {
    pub relics: &'a RelicModifiers,
    pub table: &'a ComboTable,
    pub specials: &'a SpecialArena,
    /// Accumulated reroll bonus; only the Defend zone receives it.
    pub reroll_defense_bonus: u32,
    /// Number of dice in the other zone.
    pub opposing_count: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneScore {
    pub zone: Option<ZoneKind>,
    pub dice: Vec<DieId>,
    pub face_sum: u32,
    pub reroll_bonus: u32,
    pub perfect_balance_bonus: u32,
    pub charger_bonus: u32,
    pub detonation_bonus: u32,
    pub base_sum: u32,
    pub combo: ComboKind,
    pub combo_bonus: u32,
    pub total: u32,
    /// Value each die was classified with, wildcards resolved.
    pub assignments: Vec<u8>,
    pub wildcard_flags: Vec<bool>,
    pub pre_effects: Vec<ZoneEffect>,
    pub post_effects: Vec<ZoneEffect>,
}

impl ZoneScore {
    /// Folds a bomb detonation bonus into the score.
    pub fn add_detonation(&mut self, bonus: u32) {
        self.detonation_bonus += bonus;
        self.base_sum += bonus;
        self.total += bonus;
    }
}

pub fn compute_zone_score(dice: &[&Die], zone: ZoneKind, ctx: &ScoreContext<'_>) -> ZoneScore {
    let classify_values: Vec<u8> = dice
        .iter()
        .map(|die| if die.is_weakened() { 0 } else { die.face() })
        .collect();
    let wildcard_flags: Vec<bool> = dice
        .iter()
        .map(|die| special::acts_as_wildcard(die, ctx.specials.get(die.blueprint.id), ctx.relics))
        .collect();

    let combo = evaluate(&classify_values, &wildcard_flags, ctx.table);

    let mut face_sum = 0;
    let mut pre_effects = Vec::new();
    let mut post_effects = Vec::new();
    for die in dice {
        let decoration = special::decorate(die, ctx.specials.get(die.blueprint.id), combo.kind);
        face_sum += decoration.contribution;
        pre_effects.extend(decoration.pre);
        post_effects.extend(decoration.post);
    }

    let reroll_bonus = match zone {
        ZoneKind::Defend => ctx.reroll_defense_bonus,
        ZoneKind::Attack => 0,
    };
    let perfect_balance_bonus = perfect_balance_bonus(dice.len(), ctx.opposing_count, ctx.relics);
    let charger_bonus = ctx.specials.charger_bonus().for_zone(zone);
    let base_sum = face_sum + reroll_bonus + perfect_balance_bonus + charger_bonus;

    ZoneScore {
        zone: Some(zone),
        dice: dice.iter().map(|die| die.id).collect(),
        face_sum,
        reroll_bonus,
        perfect_balance_bonus,
        charger_bonus,
        detonation_bonus: 0,
        base_sum,
        combo: combo.kind,
        combo_bonus: combo.bonus,
        total: base_sum + combo.bonus,
        assignments: combo.assignments,
        wildcard_flags,
        pre_effects,
        post_effects,
    }
}

/// Bonus for both zones holding the same, non-zero number of dice.
pub fn perfect_balance_bonus(count: usize, opposing: usize, relics: &RelicModifiers) -> u32 {
    if count == 0 || count != opposing {
        return 0;
    }
    relics.perfect_balance_bonus
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CombatConfig;
    use crate::dice::{DieBlueprint, DieFlags, DieKind};
    use proptest::prelude::*;

    fn dice(faces: &[u8]) -> Vec<Die> {
        faces
            .iter()
            .enumerate()
            .map(|(idx, &face)| {
                let mut die = Die::new(
                    DieId(idx as u32),
                    DieBlueprint::standard(BlueprintId(idx as u32)),
                );
                die.set_face(face);
                die
            })
            .collect()
    }

    fn score(dice: &[Die], zone: ZoneKind, relics: &RelicModifiers, opposing: usize) -> ZoneScore {
        let table = relics.combo_table();
        let specials = SpecialArena::default();
        let refs: Vec<&Die> = dice.iter().collect();
        let ctx = ScoreContext {
            relics,
            table: &table,
            specials: &specials,
            reroll_defense_bonus: 0,
            opposing_count: opposing,
        };
        compute_zone_score(&refs, zone, &ctx)
    }

    #[test]
    fn three_of_a_kind_scores_face_sum_plus_bonus() {
        let result = score(&dice(&[3, 3, 3]), ZoneKind::Attack, &RelicModifiers::default(), 0);
        assert_eq!(result.combo, ComboKind::ThreeOfAKind);
        assert_eq!(result.base_sum, 9);
        assert_eq!(result.total, 9 + 5);
    }

    #[test]
    fn pair_with_kicker_counts_every_face() {
        let result = score(&dice(&[4, 4, 6]), ZoneKind::Defend, &RelicModifiers::default(), 3);
        assert_eq!(result.combo, ComboKind::Pair);
        assert_eq!(result.base_sum, 14);
        assert_eq!(result.total, 16);
    }

    #[test]
    fn weakened_die_breaks_the_pattern_and_scores_zero() {
        let mut hand = dice(&[5, 5, 2]);
        hand[1].set_flag(DieFlags::WEAKENED, true);
        let result = score(&hand, ZoneKind::Attack, &RelicModifiers::default(), 0);
        assert_eq!(result.combo, ComboKind::NoCombo);
        assert_eq!(result.face_sum, 7);
    }

    #[test]
    fn wildcard_keeps_rolled_value_in_base_sum() {
        let relics = RelicModifiers {
            wild_one: true,
            ..Default::default()
        };
        let result = score(&dice(&[6, 6, 1]), ZoneKind::Attack, &relics, 0);
        assert_eq!(result.combo, ComboKind::ThreeOfAKind);
        assert_eq!(result.assignments, vec![6, 6, 6]);
        assert_eq!(result.wildcard_flags, vec![false, false, true]);
        assert_eq!(result.face_sum, 13);
    }

    #[test]
    fn perfect_balance_needs_equal_non_zero_counts() {
        let relics = RelicModifiers {
            perfect_balance_bonus: 4,
            ..Default::default()
        };
        assert_eq!(perfect_balance_bonus(2, 2, &relics), 4);
        assert_eq!(perfect_balance_bonus(2, 3, &relics), 0);
        assert_eq!(perfect_balance_bonus(0, 0, &relics), 0);
    }

    #[test]
    fn reroll_bonus_only_reaches_defend() {
        let relics = RelicModifiers::default();
        let table = relics.combo_table();
        let specials = SpecialArena::default();
        let hand = dice(&[1, 2]);
        let refs: Vec<&Die> = hand.iter().collect();
        let ctx = ScoreContext {
            relics: &relics,
            table: &table,
            specials: &specials,
            reroll_defense_bonus: 5,
            opposing_count: 0,
        };
        assert_eq!(compute_zone_score(&refs, ZoneKind::Defend, &ctx).reroll_bonus, 5);
        assert_eq!(compute_zone_score(&refs, ZoneKind::Attack, &ctx).reroll_bonus, 0);
    }

    #[test]
    fn detonation_adds_to_base_and_total() {
        let mut result = score(&dice(&[2]), ZoneKind::Attack, &RelicModifiers::default(), 0);
        result.add_detonation(20);
        assert_eq!(result.base_sum, 22);
        assert_eq!(result.total, 22);
        assert_eq!(result.detonation_bonus, 20);
    }

    #[test]
    fn zoned_comet_in_combo_queues_burst() {
        let config = CombatConfig::default();
        let mut hand = dice(&[4, 4]);
        hand[1].blueprint = DieBlueprint::new(BlueprintId(1), DieKind::Comet, false);
        let specials = SpecialArena::for_loadout(hand.iter().map(|d| &d.blueprint), &config);
        let relics = RelicModifiers::default();
        let table = relics.combo_table();
        let refs: Vec<&Die> = hand.iter().collect();
        let ctx = ScoreContext {
            relics: &relics,
            table: &table,
            specials: &specials,
            reroll_defense_bonus: 0,
            opposing_count: 0,
        };
        let result = compute_zone_score(&refs, ZoneKind::Attack, &ctx);
        assert_eq!(result.post_effects.len(), 1);
    }

    proptest! {
        #[test]
        fn total_is_invariant_under_permutation(
            faces in prop::collection::vec(1u8..=6, 0..=6),
            weakened in prop::collection::vec(any::<bool>(), 6),
        ) {
            let mut hand = dice(&faces);
            for (die, &weak) in hand.iter_mut().zip(weakened.iter()) {
                die.set_flag(DieFlags::WEAKENED, weak);
            }
            let relics = RelicModifiers { wild_one: true, ..Default::default() };
            let forward = score(&hand, ZoneKind::Attack, &relics, 0);
            hand.reverse();
            let backward = score(&hand, ZoneKind::Attack, &relics, 0);
            prop_assert_eq!(forward.total, backward.total);
            prop_assert_eq!(forward.combo_bonus, backward.combo_bonus);
        }

        #[test]
        fn weakened_die_contributes_nothing(face in 1u8..=6, other in 1u8..=6) {
            let mut hand = dice(&[face, other]);
            hand[0].set_flag(DieFlags::WEAKENED, true);
            let result = score(&hand, ZoneKind::Defend, &RelicModifiers::default(), 0);
            prop_assert_eq!(result.face_sum, other as u32);
        }
    }
}
