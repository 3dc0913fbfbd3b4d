//! Enemies built around raw damage and burn.

use dice_core::{Enemy, EnemyAction, EnemyMove};

use super::{Difficulty, Rotation};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SlapStep {
    Attack(u32),
    Heal,
}

const SLAPPER_SEQUENCE: [SlapStep; 4] = [
    SlapStep::Attack(10),
    SlapStep::Heal,
    SlapStep::Attack(15),
    SlapStep::Heal,
];

/// Alternates slaps with heals that grow each time they land.
#[derive(Clone, Debug)]
pub struct Slapper {
    difficulty: Difficulty,
    heal: u32,
    rotation: Rotation,
}

impl Slapper {
    const BASE_HEAL: u32 = 10;

    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            heal: Self::BASE_HEAL,
            rotation: Rotation::default(),
        }
    }

    fn step(&self) -> SlapStep {
        SLAPPER_SEQUENCE[self.rotation.index(SLAPPER_SEQUENCE.len())]
    }
}

impl Enemy for Slapper {
    fn name(&self) -> &str {
        "Slapper"
    }

    fn max_health(&self) -> u32 {
        50
    }

    fn on_encounter_start(&mut self) {
        self.heal = Self::BASE_HEAL;
        self.rotation.reset();
    }

    fn next_move(&self) -> Option<EnemyMove> {
        let next = match self.step() {
            SlapStep::Attack(amount) => {
                EnemyMove::new(format!("Attack for {amount}"), vec![EnemyAction::Attack(amount)])
            }
            SlapStep::Heal => EnemyMove::new(
                format!("Heal {}", self.heal),
                vec![EnemyAction::Heal(self.heal)],
            ),
        };
        Some(next)
    }

    fn on_turn_finished(&mut self, executed: Option<&EnemyMove>) -> Vec<EnemyAction> {
        if executed.is_none() {
            return Vec::new();
        }
        if self.step() == SlapStep::Heal {
            self.heal += self.difficulty.pick(2, 4);
        }
        self.rotation.advance(SLAPPER_SEQUENCE.len());
        Vec::new()
    }
}

/// Opens hard, turtles for three turns, then swings harder every turn.
#[derive(Clone, Debug)]
pub struct Wallop {
    difficulty: Difficulty,
    phase: u32,
    escalation: u32,
}

impl Wallop {
    const GUARD_TURNS: u32 = 3;
    const BASE_ESCALATION: u32 = 30;

    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            phase: 0,
            escalation: Self::BASE_ESCALATION,
        }
    }
}

impl Enemy for Wallop {
    fn name(&self) -> &str {
        "Wallop"
    }

    fn max_health(&self) -> u32 {
        99
    }

    fn on_encounter_start(&mut self) {
        self.phase = 0;
        self.escalation = Self::BASE_ESCALATION;
    }

    fn next_move(&self) -> Option<EnemyMove> {
        let next = match self.phase {
            0 => EnemyMove::new(
                "Opening Strike",
                vec![EnemyAction::Attack(25), EnemyAction::Burn(4)],
            ),
            phase if phase <= Self::GUARD_TURNS => {
                let countdown = Self::GUARD_TURNS + 1 - phase;
                EnemyMove::new(
                    format!("Wind Up ({countdown})"),
                    vec![EnemyAction::Defend(15)],
                )
            }
            _ => EnemyMove::new(
                format!("Wallop for {}", self.escalation),
                vec![EnemyAction::Attack(self.escalation)],
            ),
        };
        Some(next)
    }

    fn on_turn_finished(&mut self, executed: Option<&EnemyMove>) -> Vec<EnemyAction> {
        if executed.is_none() {
            return Vec::new();
        }
        if self.phase > Self::GUARD_TURNS {
            self.escalation += self.difficulty.pick(5, 7);
        } else {
            self.phase += 1;
        }
        Vec::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HotfixMove {
    Patch,
    Rollback,
    HotLoop,
}

const HOTFIX_MOVES: [HotfixMove; 3] = [HotfixMove::Patch, HotfixMove::Rollback, HotfixMove::HotLoop];

/// Burn that scales every time the loop closes.
#[derive(Clone, Debug)]
pub struct Hotfix {
    difficulty: Difficulty,
    scaling_burn: u32,
    rotation: Rotation,
}

impl Hotfix {
    const BASE_BURN: u32 = 1;

    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            scaling_burn: Self::BASE_BURN,
            rotation: Rotation::default(),
        }
    }

    fn current(&self) -> HotfixMove {
        HOTFIX_MOVES[self.rotation.index(HOTFIX_MOVES.len())]
    }

    fn loop_burn(&self) -> u32 {
        self.scaling_burn + self.difficulty.pick(1, 2)
    }
}

impl Enemy for Hotfix {
    fn name(&self) -> &str {
        "Hotfix"
    }

    fn max_health(&self) -> u32 {
        75
    }

    fn on_encounter_start(&mut self) {
        self.scaling_burn = Self::BASE_BURN;
        self.rotation.reset();
    }

    fn next_move(&self) -> Option<EnemyMove> {
        let next = match self.current() {
            HotfixMove::Patch => EnemyMove::new(
                "Patch",
                vec![EnemyAction::Burn(self.scaling_burn + 3)],
            ),
            HotfixMove::Rollback => EnemyMove::new(
                "Rollback",
                vec![EnemyAction::Heal(10), EnemyAction::Attack(5)],
            ),
            HotfixMove::HotLoop => EnemyMove::new(
                "Hot Loop",
                vec![EnemyAction::Burn(self.loop_burn()), EnemyAction::Defend(10)],
            ),
        };
        Some(next)
    }

    fn on_turn_finished(&mut self, executed: Option<&EnemyMove>) -> Vec<EnemyAction> {
        if executed.is_none() {
            return Vec::new();
        }
        if self.current() == HotfixMove::HotLoop {
            self.scaling_burn = self.loop_burn();
        }
        self.rotation.advance(HOTFIX_MOVES.len());
        Vec::new()
    }

    fn status_description(&self) -> Option<String> {
        Some(format!("Burn grows to {} next loop.", self.loop_burn()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finish(enemy: &mut dyn Enemy) -> EnemyMove {
        let next = enemy.next_move().unwrap();
        enemy.on_turn_finished(Some(&next));
        next
    }

    #[test]
    fn slapper_heal_grows_after_each_heal() {
        let mut slapper = Slapper::new(Difficulty::Normal);
        let moves: Vec<_> = (0..6).map(|_| finish(&mut slapper).actions).collect();
        assert_eq!(
            moves,
            vec![
                vec![EnemyAction::Attack(10)],
                vec![EnemyAction::Heal(10)],
                vec![EnemyAction::Attack(15)],
                vec![EnemyAction::Heal(12)],
                vec![EnemyAction::Attack(10)],
                vec![EnemyAction::Heal(14)],
            ]
        );
    }

    #[test]
    fn preview_does_not_advance() {
        let slapper = Slapper::new(Difficulty::Nightmare);
        assert_eq!(slapper.next_move(), slapper.next_move());
    }

    #[test]
    fn wallop_guards_three_turns_then_escalates() {
        let mut wallop = Wallop::new(Difficulty::Normal);
        let labels: Vec<_> = (0..6).map(|_| finish(&mut wallop).label).collect();
        assert_eq!(
            labels,
            [
                "Opening Strike",
                "Wind Up (3)",
                "Wind Up (2)",
                "Wind Up (1)",
                "Wallop for 30",
                "Wallop for 35",
            ]
        );
    }

    #[test]
    fn hotfix_loop_raises_every_burn() {
        let mut hotfix = Hotfix::new(Difficulty::Normal);
        assert_eq!(finish(&mut hotfix).actions, vec![EnemyAction::Burn(4)]);
        finish(&mut hotfix);
        assert_eq!(
            finish(&mut hotfix).actions,
            vec![EnemyAction::Burn(2), EnemyAction::Defend(10)]
        );
        assert_eq!(finish(&mut hotfix).actions, vec![EnemyAction::Burn(5)]);
    }
}
