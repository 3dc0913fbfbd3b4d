use super::{Curse, CurseCounts, StatusEffects};
use crate::dice::{Board, Die, DieFlags, DieId};
use crate::env::{DrawPurpose, Entropy};
use crate::special::{self, SpecialArena};

fn flag_of(curse: Curse) -> DieFlags {
    match curse {
        Curse::Lock => DieFlags::LOCKED,
        Curse::Weaken => DieFlags::WEAKENED,
        Curse::Nullify => DieFlags::NULLIFIED,
    }
}

fn is_eligible(die: &Die, specials: &SpecialArena, curse: Curse) -> bool {
    match curse {
        Curse::Lock => !die.is_locked(),
        Curse::Weaken => !die.is_weakened(),
        Curse::Nullify => special::is_nullify_eligible(die, specials.get(die.blueprint.id)),
    }
}

/// Applies one curse to one die. Returns `false` (and changes nothing) when
/// the die is not in play or the curse would have no effect.
pub fn curse_die(board: &mut Board, specials: &SpecialArena, id: DieId, curse: Curse) -> bool {
    let Some(die) = board.die_mut(id) else {
        return false;
    };
    if !is_eligible(die, specials, curse) {
        return false;
    }
    die.set_flag(flag_of(curse), true);
    if curse == Curse::Lock {
        die.set_flag(DieFlags::SELECTED, false);
    }
    true
}

/// Distributes the pending count of `curse` over random eligible dice.
///
/// Locks and weakens that find too few dice stay pending; nullify counts that
/// cannot land are dropped, since spent dice never become eligible again.
pub fn apply_pending(
    status: &mut StatusEffects,
    curse: Curse,
    board: &mut Board,
    specials: &SpecialArena,
    entropy: &mut Entropy<'_>,
) -> Vec<DieId> {
    let pending = status.pending_count(curse);
    if pending == 0 {
        return Vec::new();
    }
    let candidates: Vec<DieId> = board
        .dice()
        .filter(|die| is_eligible(die, specials, curse))
        .map(|die| die.id)
        .collect();

    let picked = entropy.sample(&candidates, pending as usize, DrawPurpose::CurseTarget);
    let applied: Vec<DieId> = picked
        .into_iter()
        .filter(|id| curse_die(board, specials, *id, curse))
        .collect();

    let remaining = pending.saturating_sub(applied.len() as u8);
    let remaining = match curse {
        Curse::Nullify => 0,
        Curse::Lock | Curse::Weaken => remaining,
    };
    status.set_pending(curse, remaining);
    applied
}

/// Spreads the crowd-control plan over the dice without overlap.
///
/// The dice are shuffled once, then each curse in lock, nullify, weaken order
/// claims untouched eligible dice until its count is spent. Counts that find
/// no die stay in the plan for the next first roll.
pub fn apply_crowd_control(
    status: &mut StatusEffects,
    board: &mut Board,
    specials: &SpecialArena,
    entropy: &mut Entropy<'_>,
) -> Vec<(DieId, Curse)> {
    let Some(mut plan) = status.crowd_control() else {
        return Vec::new();
    };
    let mut order: Vec<DieId> = board.dice().map(|die| die.id).collect();
    if order.is_empty() {
        return Vec::new();
    }
    entropy.shuffle(&mut order, DrawPurpose::CrowdControl);

    let mut touched: Vec<DieId> = Vec::new();
    let mut applied = Vec::new();
    for curse in [Curse::Lock, Curse::Nullify, Curse::Weaken] {
        for id in &order {
            if plan.get(curse) == 0 {
                break;
            }
            if touched.contains(id) {
                continue;
            }
            if curse_die(board, specials, *id, curse) {
                touched.push(*id);
                applied.push((*id, curse));
                *plan.get_mut(curse) -= 1;
            }
        }
    }

    status.set_crowd_control(Some(plan));
    applied
}

/// Curses held by dice that sit in a zone.
pub fn carryover_counts(board: &Board) -> CurseCounts {
    let mut counts = CurseCounts::default();
    for die in board.dice().filter(|die| board.in_any_zone(die.id)) {
        for curse in Curse::ALL {
            if die.flags().contains(flag_of(curse)) {
                *counts.get_mut(curse) += 1;
            }
        }
    }
    counts
}

/// Clears every curse currently on a die.
pub fn cleanse_all(board: &mut Board) {
    for die in board.dice_mut() {
        die.clear_curses();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CombatConfig;
    use crate::dice::{BlueprintId, DieBlueprint, DieKind, ZoneKind};
    use crate::env::PcgRng;

    fn board(kinds: &[DieKind]) -> (Board, SpecialArena) {
        let mut board = Board::new(6);
        let blueprints: Vec<DieBlueprint> = kinds
            .iter()
            .enumerate()
            .map(|(idx, kind)| DieBlueprint::new(BlueprintId(idx as u32), *kind, false))
            .collect();
        for bp in &blueprints {
            let mut die = Die::new(DieId(bp.id.0), *bp);
            die.set_face(3);
            board.insert(die);
        }
        let specials = SpecialArena::for_loadout(&blueprints, &CombatConfig::default());
        (board, specials)
    }

    #[test]
    fn pending_locks_land_on_distinct_dice() {
        let (mut board, specials) = board(&[DieKind::Standard; 4]);
        let mut status = StatusEffects::default();
        status.queue(Curse::Lock, 2, 6);
        let mut cursor = 0;
        let mut entropy = Entropy::new(&PcgRng, 3, &mut cursor);

        let locked = apply_pending(&mut status, Curse::Lock, &mut board, &specials, &mut entropy);

        assert_eq!(locked.len(), 2);
        assert_ne!(locked[0], locked[1]);
        assert_eq!(board.dice().filter(|d| d.is_locked()).count(), 2);
        assert_eq!(status.pending_count(Curse::Lock), 0);
    }

    #[test]
    fn locks_beyond_available_dice_stay_pending() {
        let (mut board, specials) = board(&[DieKind::Standard; 2]);
        let mut status = StatusEffects::default();
        status.queue(Curse::Lock, 5, 6);
        let mut cursor = 0;
        let mut entropy = Entropy::new(&PcgRng, 3, &mut cursor);

        apply_pending(&mut status, Curse::Lock, &mut board, &specials, &mut entropy);
        assert_eq!(status.pending_count(Curse::Lock), 3);
    }

    #[test]
    fn nullify_without_eligible_dice_is_dropped() {
        let (mut board, specials) = board(&[DieKind::Standard; 3]);
        let mut status = StatusEffects::default();
        status.queue(Curse::Nullify, 2, 6);
        let mut cursor = 0;
        let mut entropy = Entropy::new(&PcgRng, 3, &mut cursor);

        let applied = apply_pending(&mut status, Curse::Nullify, &mut board, &specials, &mut entropy);
        assert!(applied.is_empty());
        assert_eq!(status.pending_count(Curse::Nullify), 0);
    }

    #[test]
    fn nullify_targets_only_eligible_dice() {
        let (mut board, specials) =
            board(&[DieKind::Standard, DieKind::Wild, DieKind::Battery, DieKind::Bomb]);
        let mut status = StatusEffects::default();
        status.queue(Curse::Nullify, 3, 6);
        let mut cursor = 0;
        let mut entropy = Entropy::new(&PcgRng, 8, &mut cursor);

        let mut applied = apply_pending(&mut status, Curse::Nullify, &mut board, &specials, &mut entropy);
        applied.sort();
        assert_eq!(applied, vec![DieId(1), DieId(3)]);
    }

    #[test]
    fn crowd_control_never_stacks_two_curses() {
        let (mut board, specials) = board(&[DieKind::Wild; 3]);
        let mut status = StatusEffects::default();
        status.queue_crowd_control(
            CurseCounts {
                lock: 1,
                weaken: 1,
                nullify: 1,
            },
            3,
        );
        let mut cursor = 0;
        let mut entropy = Entropy::new(&PcgRng, 21, &mut cursor);

        let applied = apply_crowd_control(&mut status, &mut board, &specials, &mut entropy);

        assert_eq!(applied.len(), 3);
        for die in board.dice() {
            assert_eq!(die.flags().intersection(DieFlags::CURSES).bits().count_ones(), 1);
        }
        assert_eq!(status.crowd_control(), None);
    }

    #[test]
    fn crowd_control_leftover_stays_planned() {
        let (mut board, specials) = board(&[DieKind::Standard; 2]);
        let mut status = StatusEffects::default();
        status.queue_crowd_control(
            CurseCounts {
                lock: 1,
                weaken: 0,
                nullify: 2,
            },
            6,
        );
        let mut cursor = 0;
        let mut entropy = Entropy::new(&PcgRng, 4, &mut cursor);

        apply_crowd_control(&mut status, &mut board, &specials, &mut entropy);
        assert_eq!(
            status.crowd_control(),
            Some(CurseCounts {
                lock: 0,
                weaken: 0,
                nullify: 2
            })
        );
    }

    #[test]
    fn only_zoned_curses_carry_over() {
        let (mut board, specials) = board(&[DieKind::Standard; 3]);
        assert!(curse_die(&mut board, &specials, DieId(0), Curse::Lock));
        assert!(curse_die(&mut board, &specials, DieId(1), Curse::Lock));
        assert!(curse_die(&mut board, &specials, DieId(1), Curse::Weaken));
        board.place(DieId(1), ZoneKind::Attack, 0).unwrap();

        let carried = carryover_counts(&board);
        assert_eq!(
            carried,
            CurseCounts {
                lock: 1,
                weaken: 1,
                nullify: 0
            }
        );

        cleanse_all(&mut board);
        assert!(board.dice().all(|die| !die.has_curse()));
    }

    #[test]
    fn lock_clears_reroll_selection() {
        let (mut board, specials) = board(&[DieKind::Standard]);
        board
            .die_mut(DieId(0))
            .unwrap()
            .set_flag(DieFlags::SELECTED, true);
        curse_die(&mut board, &specials, DieId(0), Curse::Lock);
        assert!(!board.die(DieId(0)).unwrap().is_selected());
        assert!(!curse_die(&mut board, &specials, DieId(0), Curse::Lock));
    }
}
