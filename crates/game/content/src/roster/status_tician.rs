//! Boss whose statuses are drawn at random from its own seeded stream.
//!
//! Every move carries the active basic curse. Ultra statuses are gained,
//! cycled and upgraded by specific moves, and after twelve moves the boss
//! loops an escalating two-move barrage.

use std::collections::BTreeSet;

use dice_core::{Curse, Enemy, EnemyAction, EnemyMove, EnemyRng, IncomingAttack, RerollEvent};

use super::{Difficulty, Rotation};

const DEFAULT_ZONE_CAP: u8 = 6;
const ULTRA_ZONE_CAP: u8 = 4;
const DEFENSE_PER_REROLL: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum UltraStatus {
    DefensePerReroll,
    OnlyStraights,
    DestroyNonCombo,
    MaxFourDice,
}

impl UltraStatus {
    pub const ALL: [UltraStatus; 4] = [
        UltraStatus::DefensePerReroll,
        UltraStatus::OnlyStraights,
        UltraStatus::DestroyNonCombo,
        UltraStatus::MaxFourDice,
    ];

    fn description(self) -> &'static str {
        match self {
            Self::DefensePerReroll => "Gains 2 Defense per rerolled die.",
            Self::OnlyStraights => "Can only be damaged by Straights.",
            Self::DestroyNonCombo => "Dice outside a combo are destroyed for a turn.",
            Self::MaxFourDice => "Max 4 Dice per zone.",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tier {
    Basic,
    BasicPlus,
}

impl Tier {
    fn count(self) -> u32 {
        match self {
            Self::Basic => 1,
            Self::BasicPlus => 2,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::BasicPlus => "Basic+",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct BasicStatus {
    curse: Curse,
    tier: Tier,
}

impl BasicStatus {
    fn action(self) -> EnemyAction {
        curse_action(self.curse, self.tier.count())
    }

    fn description(self) -> String {
        let count = self.tier.count();
        let noun = if count == 1 { "Die" } else { "Dice" };
        format!(
            "{}: {} {count} {noun} per turn",
            self.tier.label(),
            curse_verb(self.curse)
        )
    }
}

fn curse_action(curse: Curse, count: u32) -> EnemyAction {
    match curse {
        Curse::Lock => EnemyAction::Lock(count),
        Curse::Weaken => EnemyAction::Weaken(count),
        Curse::Nullify => EnemyAction::Nullify(count),
    }
}

fn curse_verb(curse: Curse) -> &'static str {
    match curse {
        Curse::Lock => "Lock",
        Curse::Weaken => "Weaken",
        Curse::Nullify => "Nullify",
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    GainUltra,
    Firewall { defend: u32, burn: u32, burn_first: bool },
    StatusSlam,
    Reboot,
    VectorStrike,
    Upgrade,
    ShieldMatrix,
    TriBurst,
    Recalibration,
    DualUplink,
    EnterBarrage,
}

const BASE_MOVES: [Step; 12] = [
    Step::GainUltra,
    Step::Firewall {
        defend: 20,
        burn: 5,
        burn_first: false,
    },
    Step::StatusSlam,
    Step::Reboot,
    Step::Firewall {
        defend: 15,
        burn: 8,
        burn_first: true,
    },
    Step::VectorStrike,
    Step::Upgrade,
    Step::ShieldMatrix,
    Step::TriBurst,
    Step::Recalibration,
    Step::DualUplink,
    Step::EnterBarrage,
];

/// Alternating strike and recalibration, both growing along a
/// Fibonacci-style increment series after every recalibration.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Barrage {
    strike_next: bool,
    attack: u32,
    defend: u32,
    series: Vec<u32>,
    next_increment: usize,
}

impl Barrage {
    fn new(difficulty: Difficulty) -> Self {
        let base = difficulty.pick(10, 12);
        Self {
            strike_next: true,
            attack: base,
            defend: base,
            series: difficulty.pick(vec![2, 3], vec![3, 4]),
            next_increment: 0,
        }
    }

    fn next_increment(&mut self) -> u32 {
        let value = match self.series.get(self.next_increment) {
            Some(value) => *value,
            None => {
                let len = self.series.len();
                let value = self.series[len - 1].saturating_add(self.series[len - 2]);
                self.series.push(value);
                value
            }
        };
        self.next_increment += 1;
        value
    }

    fn escalate(&mut self) {
        let step = self.next_increment();
        self.attack = self.attack.saturating_add(step);
        self.defend = self.defend.saturating_add(step);
    }
}

/// Procedurally generated boss.
///
/// Random choices are committed in hooks only: the control curse of the
/// upcoming move is drawn ahead of time, so [`Enemy::next_move`] stays a pure
/// read.
#[derive(Clone, Debug)]
pub struct StatusTician {
    difficulty: Difficulty,
    rng: EnemyRng,
    initial_rng: EnemyRng,
    rotation: Rotation,
    basic: BasicStatus,
    ultras: BTreeSet<UltraStatus>,
    control: Curse,
    applied_cap: u8,
    barrage: Option<Barrage>,
}

impl StatusTician {
    pub fn new(difficulty: Difficulty, rng: EnemyRng) -> Self {
        let mut enemy = Self {
            difficulty,
            rng,
            initial_rng: rng,
            rotation: Rotation::default(),
            basic: BasicStatus {
                curse: Curse::Lock,
                tier: Tier::Basic,
            },
            ultras: BTreeSet::new(),
            control: Curse::Lock,
            applied_cap: DEFAULT_ZONE_CAP,
            barrage: None,
        };
        enemy.reset();
        enemy
    }

    pub fn ultras(&self) -> impl Iterator<Item = UltraStatus> + '_ {
        self.ultras.iter().copied()
    }

    pub fn basic_curse(&self) -> Curse {
        self.basic.curse
    }

    pub fn in_barrage(&self) -> bool {
        self.barrage.is_some()
    }

    fn reset(&mut self) {
        self.rng = self.initial_rng;
        self.rotation.reset();
        self.ultras.clear();
        self.applied_cap = DEFAULT_ZONE_CAP;
        self.barrage = None;
        self.basic = BasicStatus {
            curse: self.pick_curse(None),
            tier: Tier::Basic,
        };
        self.control = self.pick_curse(None);
    }

    fn control_count(&self) -> u32 {
        self.difficulty.pick(1, 2)
    }

    fn control_action(&self) -> EnemyAction {
        curse_action(self.control, self.control_count())
    }

    fn has(&self, ultra: UltraStatus) -> bool {
        self.ultras.contains(&ultra)
    }

    fn zone_cap_target(&self) -> u8 {
        if self.has(UltraStatus::MaxFourDice) {
            ULTRA_ZONE_CAP
        } else {
            DEFAULT_ZONE_CAP
        }
    }

    /// Picks a curse other than `exclude` when one is available.
    fn pick_curse(&mut self, exclude: Option<Curse>) -> Curse {
        let pool: Vec<Curse> = Curse::ALL
            .into_iter()
            .filter(|curse| Some(*curse) != exclude)
            .collect();
        self.rng.choose(&pool).unwrap_or(Curse::Lock)
    }

    fn cycle_basic(&mut self, tier: Tier) {
        let curse = self.pick_curse(Some(self.basic.curse));
        self.basic = BasicStatus { curse, tier };
    }

    /// Draws up to `count` distinct ultras, preferring ones outside `exclude`.
    fn select_ultras(&mut self, count: usize, exclude: &BTreeSet<UltraStatus>) -> Vec<UltraStatus> {
        let count = count.clamp(1, UltraStatus::ALL.len());
        let mut picks = Vec::with_capacity(count);
        while picks.len() < count {
            let unused: Vec<UltraStatus> = UltraStatus::ALL
                .into_iter()
                .filter(|ultra| !picks.contains(ultra))
                .collect();
            let fresh: Vec<UltraStatus> = unused
                .iter()
                .copied()
                .filter(|ultra| !exclude.contains(ultra))
                .collect();
            let pool = if fresh.is_empty() { &unused } else { &fresh };
            match self.rng.choose(pool) {
                Some(pick) => picks.push(pick),
                None => break,
            }
        }
        picks
    }

    fn gain_ultra(&mut self) {
        if self.ultras.len() >= UltraStatus::ALL.len() {
            return;
        }
        let active = self.ultras.clone();
        if let Some(pick) = self.select_ultras(1, &active).first() {
            self.ultras.insert(*pick);
        }
    }

    fn cycle_ultras(&mut self, count: usize) {
        let active = self.ultras.clone();
        let picks = self.select_ultras(count, &active);
        if !picks.is_empty() {
            self.ultras = picks.into_iter().collect();
        }
    }

    fn cycle_all(&mut self) {
        self.cycle_basic(Tier::Basic);
        self.cycle_ultras(self.ultras.len().max(1));
    }

    fn base_move(&self, step: Step) -> EnemyMove {
        match step {
            Step::GainUltra => {
                EnemyMove::new("Algorithm Upload: Gain a random Ultra Status", Vec::new())
            }
            Step::Firewall {
                defend,
                burn,
                burn_first,
            } => {
                let mut actions = vec![EnemyAction::Defend(defend), EnemyAction::Burn(burn)];
                if burn_first {
                    actions.reverse();
                }
                EnemyMove::new(
                    format!("Firewall Protocol: Defend {defend} + Burn {burn}"),
                    actions,
                )
            }
            Step::StatusSlam => EnemyMove::new(
                "Status Slam: Attack 10 + Defend 10 + Control 1 Die",
                vec![
                    EnemyAction::Attack(10),
                    EnemyAction::Defend(10),
                    self.control_action(),
                ],
            ),
            Step::Reboot => EnemyMove::new(
                "System Reboot: Heal 10 + Cycle Statuses",
                vec![EnemyAction::Heal(10)],
            ),
            Step::VectorStrike => EnemyMove::new(
                "Vector Strike: Attack 12 + Control 1 Die",
                vec![EnemyAction::Attack(12), self.control_action()],
            ),
            Step::Upgrade => EnemyMove::new(
                "Status Upgrade: Replace Basic with Basic+ Status",
                Vec::new(),
            ),
            Step::ShieldMatrix => {
                EnemyMove::new("Shield Matrix: Defend 25", vec![EnemyAction::Defend(25)])
            }
            Step::TriBurst => EnemyMove::new(
                "Tri-Burst: Attack 5 + Defend 5 + Burn 5",
                vec![
                    EnemyAction::Attack(5),
                    EnemyAction::Defend(5),
                    EnemyAction::Burn(5),
                ],
            ),
            Step::Recalibration => EnemyMove::new(
                "Total Recalibration: Heal 15 + Cycle Statuses",
                vec![EnemyAction::Heal(15)],
            ),
            Step::DualUplink => {
                EnemyMove::new("Dual Uplink: Gain an additional Ultra Status", Vec::new())
            }
            Step::EnterBarrage => EnemyMove::new(
                "Barrage Initialization: Heal 20 + Enter Barrage Mode",
                vec![EnemyAction::Heal(20)],
            ),
        }
    }

    fn barrage_move(&self, barrage: &Barrage) -> EnemyMove {
        let (attack, defend) = (barrage.attack, barrage.defend);
        if barrage.strike_next {
            EnemyMove::new(
                format!("Barrage Strike: Attack {attack} + Defend {defend} + Control 1 Die"),
                vec![
                    EnemyAction::Attack(attack),
                    EnemyAction::Defend(defend),
                    self.control_action(),
                ],
            )
        } else {
            EnemyMove::new(
                format!(
                    "Barrage Recalibration: Attack {attack} + Defend {defend} + Cycle Statuses"
                ),
                vec![EnemyAction::Attack(attack), EnemyAction::Defend(defend)],
            )
        }
    }

    fn current_step(&self) -> Step {
        BASE_MOVES[self.rotation.index(BASE_MOVES.len())]
    }

    fn apply_step(&mut self, step: Step) {
        match step {
            Step::GainUltra | Step::DualUplink => self.gain_ultra(),
            Step::Reboot => {
                self.cycle_basic(Tier::Basic);
                self.cycle_ultras(1);
            }
            Step::Recalibration => {
                self.cycle_basic(Tier::Basic);
                self.cycle_ultras(self.ultras.len().max(1));
            }
            Step::Upgrade => self.cycle_basic(Tier::BasicPlus),
            Step::EnterBarrage => self.barrage = Some(Barrage::new(self.difficulty)),
            _ => {}
        }
    }
}

impl Enemy for StatusTician {
    fn name(&self) -> &str {
        "Status-tician"
    }

    fn max_health(&self) -> u32 {
        250
    }

    fn on_encounter_start(&mut self) {
        self.reset();
    }

    fn next_move(&self) -> Option<EnemyMove> {
        let mut next = match &self.barrage {
            Some(barrage) => self.barrage_move(barrage),
            None => self.base_move(self.current_step()),
        };
        let cap = self.zone_cap_target();
        if cap != self.applied_cap {
            next.actions.push(EnemyAction::SetMaxDicePerZone(cap));
        }
        next.actions.push(self.basic.action());
        Some(next)
    }

    fn on_player_reroll(&mut self, event: &RerollEvent) -> Vec<EnemyAction> {
        if event.is_initial_roll || event.count == 0 || !self.has(UltraStatus::DefensePerReroll) {
            return Vec::new();
        }
        vec![EnemyAction::Defend(
            event.count.saturating_mul(DEFENSE_PER_REROLL),
        )]
    }

    fn modify_incoming_attack(&self, attack: &IncomingAttack) -> u32 {
        if self.has(UltraStatus::OnlyStraights) && !attack.combo.is_straight() {
            0
        } else {
            attack.score
        }
    }

    fn should_destroy_dice_outside_combo(&self) -> bool {
        self.has(UltraStatus::DestroyNonCombo)
    }

    fn on_turn_finished(&mut self, executed: Option<&EnemyMove>) -> Vec<EnemyAction> {
        let Some(executed) = executed else {
            return Vec::new();
        };
        for action in &executed.actions {
            if let EnemyAction::SetMaxDicePerZone(cap) = action {
                self.applied_cap = *cap;
            }
        }
        match self.barrage.as_mut() {
            Some(barrage) if barrage.strike_next => barrage.strike_next = false,
            Some(barrage) => {
                barrage.strike_next = true;
                barrage.escalate();
                self.cycle_all();
            }
            None => {
                let step = self.current_step();
                self.apply_step(step);
                self.rotation.advance(BASE_MOVES.len());
            }
        }
        self.control = self.pick_curse(None);
        Vec::new()
    }

    fn on_max_dice_per_zone_changed(&mut self, cap: u8) {
        self.applied_cap = cap;
    }

    fn status_description(&self) -> Option<String> {
        let mut lines = vec![self.basic.description()];
        lines.extend(
            self.ultras
                .iter()
                .map(|ultra| format!("Ultra: {}", ultra.description())),
        );
        Some(lines.join("\n"))
    }
}
