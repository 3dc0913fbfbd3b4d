//! Combo classification and wildcard optimization.
//!
//! [`classify`] maps a fixed multiset of faces to the highest-tier combo it
//! satisfies. [`evaluate`] additionally resolves wildcard dice by searching
//! every assignment of 1..=6 to each wildcard; combo tiers are not monotonic
//! in face value, so a greedy pick can miss the best pattern.

use super::{ComboKind, ComboTable};
use crate::config::CombatConfig;

/// Face counts of one zone; index 0 is unused, zero-valued faces are dropped.
#[derive(Clone, Copy, Debug, Default)]
struct FaceProfile {
    counts: [u8; 7],
}

impl FaceProfile {
    fn from_values(values: &[u8]) -> Self {
        let mut counts = [0u8; 7];
        for &value in values {
            if (CombatConfig::MIN_FACE..=CombatConfig::MAX_FACE).contains(&value) {
                counts[value as usize] += 1;
            }
        }
        Self { counts }
    }

    fn faces(&self) -> impl Iterator<Item = u8> + '_ {
        (1..=6).map(|face| self.counts[face])
    }

    fn has_group(&self, size: u8) -> bool {
        self.faces().any(|count| count >= size)
    }

    fn groups_of_at_least(&self, size: u8) -> usize {
        self.faces().filter(|&count| count >= size).count()
    }

    /// A group of `major` plus a different face with at least `minor`.
    fn has_split(&self, major: u8, minor: u8) -> bool {
        (1..=6).any(|a| {
            self.counts[a] >= major && (1..=6).any(|b| b != a && self.counts[b] >= minor)
        })
    }

    fn longest_run(&self) -> u8 {
        let mut best = 0;
        let mut current = 0;
        for count in self.faces() {
            if count > 0 {
                current += 1;
                best = best.max(current);
            } else {
                current = 0;
            }
        }
        best
    }

    fn satisfies(&self, kind: ComboKind) -> bool {
        match kind {
            ComboKind::NoCombo => true,
            ComboKind::Pair => self.has_group(2),
            ComboKind::TwoPair => self.groups_of_at_least(2) >= 2,
            ComboKind::ThreeOfAKind => self.has_group(3),
            ComboKind::StraightTri => self.longest_run() >= 3,
            ComboKind::FourOfAKind => self.has_group(4),
            ComboKind::StraightQuad => self.longest_run() >= 4,
            ComboKind::FullHouse => self.has_split(3, 2),
            ComboKind::StraightPenta => self.longest_run() >= 5,
            ComboKind::FiveOfAKind => self.has_group(5),
            ComboKind::FullerHouse => self.has_split(4, 2),
            ComboKind::TriplesPair => self.groups_of_at_least(3) >= 2,
            ComboKind::StraightSex => self.longest_run() >= 6,
            ComboKind::Yahtzee => self.has_group(6),
        }
    }
}

/// Highest-tier combo matched by a fixed set of faces.
///
/// Values outside 1..=6 (weakened dice score 0) never join a pattern.
pub fn classify(values: &[u8]) -> ComboKind {
    let profile = FaceProfile::from_values(values);
    ComboKind::ALL
        .into_iter()
        .rev()
        .find(|kind| profile.satisfies(*kind))
        .unwrap_or(ComboKind::NoCombo)
}

/// Classified combo with the per-die values that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComboResult {
    pub kind: ComboKind,
    /// Value used per die for classification, wildcards resolved.
    pub assignments: Vec<u8>,
    pub bonus: u32,
}

/// Best combo for `values` where `wildcards[i]` lets die `i` take any face.
///
/// Maximizes the combo bonus from `table`, then the assigned face sum. Among
/// equal candidates the first in enumeration order (lowest faces first) wins.
/// Wildcards beyond [`CombatConfig::MAX_WILDCARDS`] keep their rolled value.
pub fn evaluate(values: &[u8], wildcards: &[bool], table: &ComboTable) -> ComboResult {
    let wild_slots: Vec<usize> = values
        .iter()
        .enumerate()
        .filter(|(idx, value)| {
            wildcards.get(*idx).copied().unwrap_or(false) && **value > 0
        })
        .map(|(idx, _)| idx)
        .take(CombatConfig::MAX_WILDCARDS)
        .collect();

    if wild_slots.is_empty() {
        let kind = classify(values);
        return ComboResult {
            kind,
            assignments: values.to_vec(),
            bonus: table.points(kind),
        };
    }

    let mut candidate = values.to_vec();
    for &slot in &wild_slots {
        candidate[slot] = CombatConfig::MIN_FACE;
    }

    let mut best: Option<(u32, u32, ComboKind, Vec<u8>)> = None;
    loop {
        let kind = classify(&candidate);
        let bonus = table.points(kind);
        let face_sum: u32 = candidate.iter().map(|&v| v as u32).sum();
        let better = match &best {
            None => true,
            Some((best_bonus, best_sum, _, _)) => {
                bonus > *best_bonus || (bonus == *best_bonus && face_sum > *best_sum)
            }
        };
        if better {
            best = Some((bonus, face_sum, kind, candidate.clone()));
        }

        // Odometer increment over the wildcard slots.
        let mut carry = true;
        for &slot in &wild_slots {
            if candidate[slot] < CombatConfig::MAX_FACE {
                candidate[slot] += 1;
                carry = false;
                break;
            }
            candidate[slot] = CombatConfig::MIN_FACE;
        }
        if carry {
            break;
        }
    }

    match best {
        Some((bonus, _, kind, assignments)) => ComboResult {
            kind,
            assignments,
            bonus,
        },
        None => ComboResult {
            kind: ComboKind::NoCombo,
            assignments: values.to_vec(),
            bonus: 0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_house_beats_its_sub_patterns() {
        assert_eq!(classify(&[2, 2, 5, 5, 5, 6]), ComboKind::FullHouse);
    }

    #[test]
    fn classifies_every_tier() {
        let cases: &[(&[u8], ComboKind)] = &[
            (&[1, 3, 5], ComboKind::NoCombo),
            (&[4, 4, 6], ComboKind::Pair),
            (&[2, 2, 3, 3], ComboKind::TwoPair),
            (&[3, 3, 3], ComboKind::ThreeOfAKind),
            (&[2, 3, 4], ComboKind::StraightTri),
            (&[6, 6, 6, 6], ComboKind::FourOfAKind),
            (&[3, 4, 5, 6], ComboKind::StraightQuad),
            (&[1, 1, 1, 4, 4], ComboKind::FullHouse),
            (&[2, 3, 4, 5, 6], ComboKind::StraightPenta),
            (&[5, 5, 5, 5, 5], ComboKind::FiveOfAKind),
            (&[2, 2, 2, 2, 6, 6], ComboKind::FullerHouse),
            (&[1, 1, 1, 6, 6, 6], ComboKind::TriplesPair),
            (&[6, 5, 4, 3, 2, 1], ComboKind::StraightSex),
            (&[4, 4, 4, 4, 4, 4], ComboKind::Yahtzee),
        ];
        for (values, expected) in cases {
            assert_eq!(classify(values), *expected, "{values:?}");
        }
    }

    #[test]
    fn straight_and_triple_in_same_hand_prefers_higher_tier() {
        // Straight Tri outranks Three of a Kind by declaration order.
        assert_eq!(classify(&[1, 1, 1, 2, 3]), ComboKind::StraightTri);
    }

    #[test]
    fn zero_values_never_pair() {
        assert_eq!(classify(&[0, 0, 5]), ComboKind::NoCombo);
        assert_eq!(classify(&[0, 2, 3]), ComboKind::NoCombo);
        assert_eq!(classify(&[]), ComboKind::NoCombo);
    }

    #[test]
    fn single_wildcard_completes_full_house() {
        let table = ComboTable::standard();
        let result = evaluate(&[3, 3, 3, 5, 1], &[false, false, false, false, true], &table);
        assert_eq!(result.kind, ComboKind::FullHouse);
        assert_eq!(result.assignments, vec![3, 3, 3, 5, 5]);
        assert_eq!(result.bonus, 15);
    }

    #[test]
    fn wildcard_search_prefers_higher_face_sum_on_ties() {
        let table = ComboTable::standard();
        // A lone wildcard next to a 6 pairs with it rather than with a lower face.
        let result = evaluate(&[6, 2], &[false, true], &table);
        assert_eq!(result.kind, ComboKind::Pair);
        assert_eq!(result.assignments, vec![6, 6]);
    }

    #[test]
    fn all_wildcards_reach_yahtzee() {
        let table = ComboTable::standard();
        let result = evaluate(&[1, 2, 3, 4, 5, 6], &[true; 6], &table);
        assert_eq!(result.kind, ComboKind::Yahtzee);
        assert_eq!(result.assignments, vec![6; 6]);
    }

    #[test]
    fn zero_valued_wildcard_is_not_searched() {
        let table = ComboTable::standard();
        let result = evaluate(&[0, 4], &[true, false], &table);
        assert_eq!(result.kind, ComboKind::NoCombo);
        assert_eq!(result.assignments, vec![0, 4]);
    }

    #[test]
    fn no_wildcards_uses_fixed_classification() {
        let table = ComboTable::chain_reactor();
        let result = evaluate(&[4, 4, 6], &[false; 3], &table);
        assert_eq!(result.kind, ComboKind::Pair);
        assert_eq!(result.bonus, 3);
    }
}
