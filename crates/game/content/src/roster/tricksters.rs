//! Enemies that bend the scoring rules instead of hitting harder.

use dice_core::{CrowdControlPlan, Enemy, EnemyAction, EnemyMove, IncomingAttack};

use super::{Difficulty, Rotation};

/// Takes damage only from straight combos.
#[derive(Clone, Debug)]
pub struct StraightArrow {
    difficulty: Difficulty,
    rotation: Rotation,
}

impl StraightArrow {
    const MOVES: usize = 4;

    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            rotation: Rotation::default(),
        }
    }
}

impl Enemy for StraightArrow {
    fn name(&self) -> &str {
        "Straight Arrow"
    }

    fn max_health(&self) -> u32 {
        120
    }

    fn on_encounter_start(&mut self) {
        self.rotation.reset();
    }

    fn next_move(&self) -> Option<EnemyMove> {
        let next = match self.rotation.index(Self::MOVES) {
            0 => EnemyMove::new(
                "Focused Shot",
                vec![EnemyAction::Attack(15), EnemyAction::Lock(1)],
            ),
            1 => EnemyMove::new("Pinning Volley", vec![EnemyAction::Lock(2)]),
            2 => EnemyMove::new(
                "Second Wind",
                vec![EnemyAction::Heal(self.difficulty.pick(10, 15))],
            ),
            _ => EnemyMove::new("Flaming Arrow", vec![EnemyAction::Burn(10)]),
        };
        Some(next)
    }

    fn modify_incoming_attack(&self, attack: &IncomingAttack) -> u32 {
        if attack.combo.is_straight() {
            attack.score
        } else {
            0
        }
    }

    fn on_turn_finished(&mut self, executed: Option<&EnemyMove>) -> Vec<EnemyAction> {
        if executed.is_some() {
            self.rotation.advance(Self::MOVES);
        }
        Vec::new()
    }

    fn status_description(&self) -> Option<String> {
        Some("Takes damage only from Straight combos.".to_string())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AuditStep {
    Activate,
    BurnGuard,
    LockGuard,
    Strike,
}

const AUDITOR_MOVES: [AuditStep; 4] = [
    AuditStep::Activate,
    AuditStep::BurnGuard,
    AuditStep::LockGuard,
    AuditStep::Strike,
];

/// Spends its first turn switching on dice destruction, which then stays on.
#[derive(Clone, Debug)]
pub struct Auditor {
    difficulty: Difficulty,
    moves: Vec<AuditStep>,
    burn_guard: u32,
    activated: bool,
    rotation: Rotation,
}

impl Auditor {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            moves: AUDITOR_MOVES.to_vec(),
            burn_guard: 0,
            activated: false,
            rotation: Rotation::default(),
        }
    }

    pub fn is_activated(&self) -> bool {
        self.activated
    }

    fn current(&self) -> Option<AuditStep> {
        self.moves.get(self.rotation.index(self.moves.len())).copied()
    }

    fn next_burn_guard(&self) -> u32 {
        self.burn_guard + self.difficulty.pick(4, 6)
    }
}

impl Enemy for Auditor {
    fn name(&self) -> &str {
        "Auditor"
    }

    fn max_health(&self) -> u32 {
        111
    }

    fn on_encounter_start(&mut self) {
        self.moves = AUDITOR_MOVES.to_vec();
        self.burn_guard = 0;
        self.activated = false;
        self.rotation.reset();
    }

    fn next_move(&self) -> Option<EnemyMove> {
        let next = match self.current()? {
            AuditStep::Activate => EnemyMove::new("Activate Status...", Vec::new()),
            AuditStep::BurnGuard => {
                let value = self.next_burn_guard();
                EnemyMove::new(
                    "Audit Flames",
                    vec![EnemyAction::Burn(value), EnemyAction::Defend(value)],
                )
            }
            AuditStep::LockGuard => EnemyMove::new(
                "Freeze Assets",
                vec![EnemyAction::Lock(1), EnemyAction::Defend(10)],
            ),
            AuditStep::Strike => EnemyMove::new("Penalty", vec![EnemyAction::Attack(20)]),
        };
        Some(next)
    }

    fn should_destroy_dice_outside_combo(&self) -> bool {
        self.activated
    }

    fn on_turn_finished(&mut self, executed: Option<&EnemyMove>) -> Vec<EnemyAction> {
        if executed.is_none() {
            return Vec::new();
        }
        match self.current() {
            Some(AuditStep::Activate) => {
                self.activated = true;
                self.moves.retain(|step| *step != AuditStep::Activate);
                self.rotation.removed_current(self.moves.len());
                return Vec::new();
            }
            Some(AuditStep::BurnGuard) => self.burn_guard = self.next_burn_guard(),
            _ => {}
        }
        self.rotation.advance(self.moves.len());
        Vec::new()
    }

    fn status_description(&self) -> Option<String> {
        self.activated
            .then(|| "Dice outside a combo are destroyed for a turn.".to_string())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CompactStep {
    Pressurize,
    Crush(u8),
    Scorch,
    Grip,
    FinalSmash,
}

const COMPACTOR_MOVES: [CompactStep; 6] = [
    CompactStep::Pressurize,
    CompactStep::Crush(4),
    CompactStep::Scorch,
    CompactStep::Grip,
    CompactStep::Crush(3),
    CompactStep::FinalSmash,
];

/// Shrinks every zone twice, then loops a hardening cycle.
#[derive(Clone, Debug)]
pub struct Compactor {
    difficulty: Difficulty,
    moves: Vec<CompactStep>,
    defend: u32,
    heal: u32,
    zone_cap: u8,
    rotation: Rotation,
}

impl Compactor {
    const STARTING_CAP: u8 = 5;
    const BASE_DEFEND: u32 = 15;
    const BASE_HEAL: u32 = 10;
    const GRIP: u8 = 2;

    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            moves: COMPACTOR_MOVES.to_vec(),
            defend: Self::BASE_DEFEND,
            heal: Self::BASE_HEAL,
            zone_cap: Self::STARTING_CAP,
            rotation: Rotation::default(),
        }
    }

    pub fn zone_cap(&self) -> u8 {
        self.zone_cap
    }

    fn current(&self) -> Option<CompactStep> {
        self.moves.get(self.rotation.index(self.moves.len())).copied()
    }
}

impl Enemy for Compactor {
    fn name(&self) -> &str {
        "The Compactor"
    }

    fn max_health(&self) -> u32 {
        123
    }

    fn on_encounter_start(&mut self) {
        self.moves = COMPACTOR_MOVES.to_vec();
        self.defend = Self::BASE_DEFEND;
        self.heal = Self::BASE_HEAL;
        self.zone_cap = Self::STARTING_CAP;
        self.rotation.reset();
    }

    fn next_move(&self) -> Option<EnemyMove> {
        let next = match self.current()? {
            CompactStep::Pressurize => EnemyMove::new(
                "Pressurize",
                vec![EnemyAction::Attack(15), EnemyAction::Defend(self.defend)],
            ),
            CompactStep::Crush(cap) => EnemyMove::new(
                format!("Zonal Crush: Max {cap} Dice Per Zone"),
                vec![EnemyAction::SetMaxDicePerZone(cap)],
            ),
            CompactStep::Scorch => EnemyMove::new(
                "Scorch",
                vec![EnemyAction::Burn(10), EnemyAction::Heal(self.heal)],
            ),
            CompactStep::Grip => EnemyMove::new(
                "Crushing Grip",
                vec![EnemyAction::CrowdControl(CrowdControlPlan {
                    lock: Self::GRIP,
                    weaken: Self::GRIP,
                    nullify: Self::GRIP,
                })],
            ),
            CompactStep::FinalSmash => {
                EnemyMove::new("Cataclysmic Press", vec![EnemyAction::Attack(20)])
            }
        };
        Some(next)
    }

    fn on_turn_finished(&mut self, executed: Option<&EnemyMove>) -> Vec<EnemyAction> {
        if executed.is_none() {
            return Vec::new();
        }
        match self.current() {
            Some(step @ CompactStep::Crush(_)) => {
                let slot = self.rotation.index(self.moves.len());
                if self.moves.get(slot) == Some(&step) {
                    self.moves.remove(slot);
                }
                self.rotation.removed_current(self.moves.len());
                return Vec::new();
            }
            Some(CompactStep::FinalSmash) => {
                let growth = self.difficulty.pick(5, 7);
                self.defend += growth;
                self.heal += growth;
            }
            _ => {}
        }
        self.rotation.advance(self.moves.len());
        Vec::new()
    }

    fn max_dice_per_zone(&self) -> Option<u8> {
        Some(Self::STARTING_CAP)
    }

    fn on_max_dice_per_zone_changed(&mut self, cap: u8) {
        self.zone_cap = cap;
    }

    fn status_description(&self) -> Option<String> {
        Some(format!("Max {} Dice Per Zone.", self.zone_cap))
    }
}
