use super::{Enemy, EnemyAction, EnemyMove};

/// Data-only enemy cycling through a fixed move list.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScriptedEnemy {
    pub name: String,
    pub max_health: u32,
    pub moves: Vec<EnemyMove>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_dice_per_zone: Option<u8>,
    #[cfg_attr(feature = "serde", serde(skip))]
    cursor: usize,
}

impl ScriptedEnemy {
    pub fn new(name: impl Into<String>, max_health: u32, moves: Vec<EnemyMove>) -> Self {
        Self {
            name: name.into(),
            max_health,
            moves,
            max_dice_per_zone: None,
            cursor: 0,
        }
    }

    pub fn with_max_dice_per_zone(mut self, cap: u8) -> Self {
        self.max_dice_per_zone = Some(cap);
        self
    }
}

impl Enemy for ScriptedEnemy {
    fn name(&self) -> &str {
        &self.name
    }

    fn max_health(&self) -> u32 {
        self.max_health
    }

    fn on_encounter_start(&mut self) {
        self.cursor = 0;
    }

    fn next_move(&self) -> Option<EnemyMove> {
        if self.moves.is_empty() {
            return None;
        }
        self.moves.get(self.cursor % self.moves.len()).cloned()
    }

    fn on_turn_finished(&mut self, executed: Option<&EnemyMove>) -> Vec<EnemyAction> {
        if executed.is_some() && !self.moves.is_empty() {
            self.cursor = (self.cursor + 1) % self.moves.len();
        }
        Vec::new()
    }

    fn max_dice_per_zone(&self) -> Option<u8> {
        self.max_dice_per_zone
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_cycle_after_each_finished_turn() {
        let mut enemy = ScriptedEnemy::new(
            "Cycler",
            10,
            vec![
                EnemyMove::new("A", vec![EnemyAction::Attack(1)]),
                EnemyMove::new("B", vec![EnemyAction::Attack(2)]),
            ],
        );
        let first = enemy.next_move().unwrap();
        assert_eq!(first.label, "A");
        assert_eq!(enemy.next_move().unwrap().label, "A");

        enemy.on_turn_finished(Some(&first));
        let second = enemy.next_move().unwrap();
        assert_eq!(second.label, "B");
        enemy.on_turn_finished(Some(&second));
        assert_eq!(enemy.next_move().unwrap().label, "A");
    }

    #[test]
    fn empty_script_has_no_move() {
        let enemy = ScriptedEnemy::new("Idle", 10, Vec::new());
        assert!(enemy.next_move().is_none());
    }
}
