//! Read-only view of the combat handed to providers and clients.

use serde::{Deserialize, Serialize};

use dice_core::{
    CombatPhase, CombatState, DieId, DieKind, EnemyManager, EnemyMove, EnemyStats, Location,
    PlayerState, TurnControls, ZoneKind, ZoneScore,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieView {
    pub id: DieId,
    pub kind: DieKind,
    pub face: u8,
    pub display: u8,
    pub location: Location,
    pub locked: bool,
    pub weakened: bool,
    pub nullified: bool,
    pub selected: bool,
}

impl DieView {
    pub fn in_hand(&self) -> bool {
        self.location == Location::Hand
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyView {
    pub name: String,
    pub stats: EnemyStats,
    pub upcoming: Option<EnemyMove>,
    pub intent: Option<String>,
    pub status: Option<String>,
    pub is_boss: bool,
}

/// Everything a player policy may look at before choosing a command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatSnapshot {
    pub phase: CombatPhase,
    pub turn: u32,
    pub rolls_remaining: u8,
    pub has_rolled: bool,
    pub resolving: bool,
    pub controls: TurnControls,
    pub player: PlayerState,
    pub zone_cap: u8,
    pub dice: Vec<DieView>,
    pub defend: ZoneScore,
    pub attack: ZoneScore,
    pub enemy: Option<EnemyView>,
    pub encounters_remaining: usize,
}

impl CombatSnapshot {
    pub fn capture(state: &CombatState, enemies: &EnemyManager) -> Self {
        let dice = state
            .board
            .dice_in_play()
            .into_iter()
            .filter_map(|id| {
                let die = state.board.die(id)?;
                Some(DieView {
                    id,
                    kind: die.kind(),
                    face: die.face(),
                    display: die.display_value(),
                    location: state.board.location(id)?,
                    locked: die.is_locked(),
                    weakened: die.is_weakened(),
                    nullified: die.is_nullified(),
                    selected: die.is_selected(),
                })
            })
            .collect();

        let enemy = enemies.current().map(|active| EnemyView {
            name: active.enemy().name().to_string(),
            stats: active.stats,
            upcoming: active.upcoming_move().cloned(),
            intent: enemies.intent_description(),
            status: active.enemy().status_description(),
            is_boss: active.descriptor.is_boss,
        });

        Self {
            phase: state.phase,
            turn: state.turn.number,
            rolls_remaining: state.turn.rolls.remaining,
            has_rolled: state.turn.has_rolled,
            resolving: state.is_resolving(),
            controls: state.controls(),
            player: state.player.clone(),
            zone_cap: state.zone_cap,
            dice,
            defend: state.zone_score(ZoneKind::Defend),
            attack: state.zone_score(ZoneKind::Attack),
            enemy,
            encounters_remaining: enemies.remaining(),
        }
    }

    /// Dice still in the hand, highest face first.
    pub fn hand(&self) -> Vec<&DieView> {
        let mut hand: Vec<_> = self.dice.iter().filter(|die| die.in_hand()).collect();
        hand.sort_by(|a, b| b.face.cmp(&a.face).then(a.id.cmp(&b.id)));
        hand
    }

    pub fn zone_len(&self, zone: ZoneKind) -> usize {
        self.dice
            .iter()
            .filter(|die| matches!(die.location, Location::Zone { zone: z, .. } if z == zone))
            .count()
    }

    pub fn zone_has_room(&self, zone: ZoneKind) -> bool {
        self.zone_len(zone) < self.zone_cap as usize
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }
}
