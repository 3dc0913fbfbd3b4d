//! Enemies that curse the player's dice.

use dice_core::{DamageDealtEvent, Enemy, EnemyAction, EnemyMove, RerollEvent};

use super::{Difficulty, Rotation};

/// Plain three-move cycle opening with a lock.
#[derive(Clone, Debug)]
pub struct Lockjaw {
    difficulty: Difficulty,
    rotation: Rotation,
}

impl Lockjaw {
    const MOVES: usize = 3;

    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            rotation: Rotation::default(),
        }
    }
}

impl Enemy for Lockjaw {
    fn name(&self) -> &str {
        "Lockjaw"
    }

    fn max_health(&self) -> u32 {
        80
    }

    fn on_encounter_start(&mut self) {
        self.rotation.reset();
    }

    fn next_move(&self) -> Option<EnemyMove> {
        let next = match self.rotation.index(Self::MOVES) {
            0 => EnemyMove::new(
                "Clamp",
                vec![EnemyAction::Lock(self.difficulty.pick(1, 2))],
            ),
            1 => EnemyMove::new(
                "Guarded Bite",
                vec![EnemyAction::Defend(10), EnemyAction::Attack(20)],
            ),
            _ => EnemyMove::new(
                "Iron Jaw",
                vec![EnemyAction::Defend(20), EnemyAction::Attack(10)],
            ),
        };
        Some(next)
    }

    fn on_turn_finished(&mut self, executed: Option<&EnemyMove>) -> Vec<EnemyAction> {
        if executed.is_some() {
            self.rotation.advance(Self::MOVES);
        }
        Vec::new()
    }
}

/// Locks two dice whenever one resolution deals it 20 or more.
#[derive(Clone, Debug)]
pub struct Counterlock {
    difficulty: Difficulty,
    heal: u32,
    rotation: Rotation,
}

impl Counterlock {
    const MOVES: usize = 3;
    const DAMAGE_THRESHOLD: u32 = 20;
    const LOCKS: u32 = 2;

    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            heal: 0,
            rotation: Rotation::default(),
        }
    }

    fn recovery_heal(&self) -> u32 {
        self.heal + self.difficulty.pick(5, 6)
    }
}

impl Enemy for Counterlock {
    fn name(&self) -> &str {
        "Counterlock"
    }

    fn max_health(&self) -> u32 {
        50
    }

    fn on_encounter_start(&mut self) {
        self.heal = 0;
        self.rotation.reset();
    }

    fn next_move(&self) -> Option<EnemyMove> {
        let next = match self.rotation.index(Self::MOVES) {
            0 => EnemyMove::new("Heavy Riposte", vec![EnemyAction::Attack(15)]),
            1 => EnemyMove::new(
                "Guarded Recovery",
                vec![
                    EnemyAction::Heal(self.recovery_heal()),
                    EnemyAction::Defend(5),
                ],
            ),
            _ => EnemyMove::new(
                "Counterstance",
                vec![EnemyAction::Attack(10), EnemyAction::Defend(10)],
            ),
        };
        Some(next)
    }

    fn on_player_damage_dealt(&mut self, event: &DamageDealtEvent) -> Vec<EnemyAction> {
        if event.is_lethal() {
            return Vec::new();
        }
        if event.crossed(Self::DAMAGE_THRESHOLD) {
            vec![EnemyAction::Lock(Self::LOCKS)]
        } else {
            Vec::new()
        }
    }

    fn on_turn_finished(&mut self, executed: Option<&EnemyMove>) -> Vec<EnemyAction> {
        if executed.is_none() {
            return Vec::new();
        }
        if self.rotation.index(Self::MOVES) == 1 {
            self.heal = self.recovery_heal();
        }
        self.rotation.advance(Self::MOVES);
        Vec::new()
    }

    fn status_description(&self) -> Option<String> {
        Some(format!(
            "Locks {} dice if hit for {}+ in one turn.",
            Self::LOCKS,
            Self::DAMAGE_THRESHOLD
        ))
    }
}

/// Gains block for every die rerolled after the first roll.
#[derive(Clone, Debug)]
pub struct Lockdown {
    difficulty: Difficulty,
    defense_per_reroll: u32,
    reroll_block: u32,
    thermal_burn: u32,
    rotation: Rotation,
}

impl Lockdown {
    const MOVES: usize = 4;
    const BASE_DEFENSE_PER_REROLL: u32 = 1;

    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            defense_per_reroll: Self::BASE_DEFENSE_PER_REROLL,
            reroll_block: 0,
            thermal_burn: difficulty.pick(8, 6),
            rotation: Rotation::default(),
        }
    }

    pub fn defense_per_reroll(&self) -> u32 {
        self.defense_per_reroll
    }
}

impl Enemy for Lockdown {
    fn name(&self) -> &str {
        "Lockdown"
    }

    fn max_health(&self) -> u32 {
        150
    }

    fn on_encounter_start(&mut self) {
        self.defense_per_reroll = Self::BASE_DEFENSE_PER_REROLL;
        self.reroll_block = 0;
        self.thermal_burn = self.difficulty.pick(8, 6);
        self.rotation.reset();
    }

    fn next_move(&self) -> Option<EnemyMove> {
        let next = match self.rotation.index(Self::MOVES) {
            0 => EnemyMove::new(
                "Iron Curtain",
                vec![EnemyAction::Defend(5), EnemyAction::Attack(15)],
            ),
            1 => EnemyMove::new(
                "Suppression Protocol",
                vec![
                    EnemyAction::Defend(5),
                    EnemyAction::Lock(2),
                    EnemyAction::Weaken(2),
                ],
            ),
            2 => EnemyMove::new(
                "Thermal Shield",
                vec![EnemyAction::Defend(5), EnemyAction::Burn(self.thermal_burn)],
            ),
            _ => EnemyMove::new(
                "Total Control",
                vec![
                    EnemyAction::Defend(10),
                    EnemyAction::Lock(self.difficulty.pick(1, 2)),
                    EnemyAction::Weaken(1),
                ],
            ),
        };
        Some(next)
    }

    fn on_player_reroll(&mut self, event: &RerollEvent) -> Vec<EnemyAction> {
        if event.is_initial_roll || event.count == 0 {
            return Vec::new();
        }
        let gained = event.count * self.defense_per_reroll;
        if gained == 0 {
            return Vec::new();
        }
        self.reroll_block += gained;
        vec![EnemyAction::Defend(gained)]
    }

    fn on_turn_finished(&mut self, executed: Option<&EnemyMove>) -> Vec<EnemyAction> {
        self.reroll_block = 0;
        if executed.is_none() {
            return Vec::new();
        }
        match self.rotation.index(Self::MOVES) {
            2 => self.thermal_burn += self.difficulty.pick(2, 4),
            3 => self.defense_per_reroll += 1,
            _ => {}
        }
        self.rotation.advance(Self::MOVES);
        Vec::new()
    }

    fn status_description(&self) -> Option<String> {
        Some(format!(
            "Gains {} Defense per rerolled die.",
            self.defense_per_reroll
        ))
    }

    fn intent_description(&self, next: &EnemyMove) -> String {
        if self.reroll_block == 0 {
            return next.describe();
        }
        format!("{} (+{} block from rerolls)", next.describe(), self.reroll_block)
    }
}

/// Weakens in bulk; every heal sharpens its attacks and guard.
#[derive(Clone, Debug)]
pub struct Weakener {
    difficulty: Difficulty,
    attack: u32,
    defend: u32,
    rotation: Rotation,
}

impl Weakener {
    const MOVES: usize = 4;
    const BASE_ATTACK: u32 = 15;
    const BASE_DEFEND: u32 = 10;

    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            attack: Self::BASE_ATTACK,
            defend: Self::BASE_DEFEND,
            rotation: Rotation::default(),
        }
    }

    fn growth(&self) -> u32 {
        self.difficulty.pick(5, 7)
    }
}

impl Enemy for Weakener {
    fn name(&self) -> &str {
        "Weakener"
    }

    fn max_health(&self) -> u32 {
        111
    }

    fn on_encounter_start(&mut self) {
        self.attack = Self::BASE_ATTACK;
        self.defend = Self::BASE_DEFEND;
        self.rotation.reset();
    }

    fn next_move(&self) -> Option<EnemyMove> {
        let next = match self.rotation.index(Self::MOVES) {
            0 => EnemyMove::new("Enervating Wave", vec![EnemyAction::Weaken(4)]),
            1 => EnemyMove::new("Crippling Strike", vec![EnemyAction::Attack(self.attack)]),
            2 => EnemyMove::new(
                "Sapping Guard",
                vec![EnemyAction::Weaken(2), EnemyAction::Defend(self.defend)],
            ),
            _ => {
                let counter = (self.attack + self.growth()).saturating_sub(15);
                EnemyMove::new(
                    "Rejuvenate",
                    vec![EnemyAction::Heal(20), EnemyAction::Attack(counter)],
                )
            }
        };
        Some(next)
    }

    fn on_turn_finished(&mut self, executed: Option<&EnemyMove>) -> Vec<EnemyAction> {
        if executed.is_none() {
            return Vec::new();
        }
        if self.rotation.index(Self::MOVES) == 3 {
            let growth = self.growth();
            self.attack += growth;
            self.defend += growth;
        }
        self.rotation.advance(Self::MOVES);
        Vec::new()
    }
}

/// Nullifies one die at the end of every turn.
#[derive(Clone, Debug)]
pub struct Leech {
    difficulty: Difficulty,
    nullify: u32,
    rotation: Rotation,
}

impl Leech {
    const MOVES: usize = 4;

    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            nullify: difficulty.pick(2, 3),
            rotation: Rotation::default(),
        }
    }
}

impl Enemy for Leech {
    fn name(&self) -> &str {
        "Leech"
    }

    fn max_health(&self) -> u32 {
        88
    }

    fn on_encounter_start(&mut self) {
        self.nullify = self.difficulty.pick(2, 3);
        self.rotation.reset();
    }

    fn next_move(&self) -> Option<EnemyMove> {
        let next = match self.rotation.index(Self::MOVES) {
            0 => EnemyMove::new(
                "Scalding Husk",
                vec![EnemyAction::Burn(10), EnemyAction::Defend(10)],
            ),
            1 => EnemyMove::new(
                "Siphon Strike",
                vec![EnemyAction::Attack(10), EnemyAction::Heal(5)],
            ),
            2 => EnemyMove::new("Draining Embrace", vec![EnemyAction::Nullify(self.nullify)]),
            _ => EnemyMove::new(
                "Gluttonous Feast",
                vec![EnemyAction::Attack(10), EnemyAction::Heal(10)],
            ),
        };
        Some(next)
    }

    fn on_turn_finished(&mut self, executed: Option<&EnemyMove>) -> Vec<EnemyAction> {
        if executed.is_some() {
            if self.rotation.index(Self::MOVES) == 3 {
                self.nullify = (self.nullify + 1).min(self.difficulty.pick(4, 5));
            }
            self.rotation.advance(Self::MOVES);
        }
        vec![EnemyAction::Nullify(1)]
    }

    fn status_description(&self) -> Option<String> {
        Some("Nullifies 1 die every turn.".to_string())
    }
}
