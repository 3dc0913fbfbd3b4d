//! Hook-based enemy roster.
//!
//! Each enemy keeps its own scaling counters and a [`Rotation`] over its
//! move keys. Previews are pure: [`Enemy::next_move`] only reads, and every
//! escalation is applied in [`Enemy::on_turn_finished`] for the move that was
//! actually executed.
//!
//! [`Roster`] maps encounter indices to live enemies: indices below
//! [`EnemyKind::COUNT`] select a built-in variant, higher indices select a
//! data-driven [`ScriptedEnemy`]. Each built-in enemy receives the
//! [`EnemyRng`] of its encounter; only [`StatusTician`] draws from it.

mod brawlers;
mod lockers;
mod status_tician;
mod tricksters;

pub use brawlers::{Hotfix, Slapper, Wallop};
pub use lockers::{Counterlock, Leech, Lockdown, Lockjaw, Weakener};
pub use status_tician::{StatusTician, UltraStatus};
pub use tricksters::{Auditor, Compactor, StraightArrow};

use dice_core::{Enemy, EnemyFactory, EnemyRng, ScriptedEnemy};

/// Scaling preset applied to every built-in enemy.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Difficulty {
    #[default]
    Normal,
    Nightmare,
}

impl Difficulty {
    /// Picks the value matching this difficulty.
    pub fn pick<T>(self, normal: T, nightmare: T) -> T {
        match self {
            Self::Normal => normal,
            Self::Nightmare => nightmare,
        }
    }
}

/// Built-in enemy variants in roster order.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::EnumCount,
    strum::FromRepr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EnemyKind {
    Slapper,
    Lockjaw,
    Counterlock,
    Lockdown,
    StraightArrow,
    Auditor,
    Compactor,
    Leech,
    Weakener,
    Hotfix,
    Wallop,
    StatusTician,
}

impl EnemyKind {
    pub fn create(self, difficulty: Difficulty, rng: EnemyRng) -> Box<dyn Enemy> {
        match self {
            Self::Slapper => Box::new(Slapper::new(difficulty)),
            Self::Lockjaw => Box::new(Lockjaw::new(difficulty)),
            Self::Counterlock => Box::new(Counterlock::new(difficulty)),
            Self::Lockdown => Box::new(Lockdown::new(difficulty)),
            Self::StraightArrow => Box::new(StraightArrow::new(difficulty)),
            Self::Auditor => Box::new(Auditor::new(difficulty)),
            Self::Compactor => Box::new(Compactor::new(difficulty)),
            Self::Leech => Box::new(Leech::new(difficulty)),
            Self::Weakener => Box::new(Weakener::new(difficulty)),
            Self::Hotfix => Box::new(Hotfix::new(difficulty)),
            Self::Wallop => Box::new(Wallop::new(difficulty)),
            Self::StatusTician => Box::new(StatusTician::new(difficulty, rng)),
        }
    }
}

/// Enemy factory over the built-in variants plus scripted enemies.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    difficulty: Difficulty,
    scripted: Vec<ScriptedEnemy>,
}

impl Roster {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            scripted: Vec::new(),
        }
    }

    /// Appends scripted enemies after the built-in variants.
    pub fn with_scripted(mut self, scripted: Vec<ScriptedEnemy>) -> Self {
        self.scripted = scripted;
        self
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn len(&self) -> usize {
        <EnemyKind as strum::EnumCount>::COUNT + self.scripted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolves an enemy name to its roster index. Built-in names are
    /// matched case-insensitively in snake case, scripted names exactly.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        if let Ok(kind) = name.parse::<EnemyKind>() {
            return Some(kind as usize);
        }
        self.scripted
            .iter()
            .position(|enemy| enemy.name == name)
            .map(|pos| <EnemyKind as strum::EnumCount>::COUNT + pos)
    }
}

impl EnemyFactory for Roster {
    fn create(&self, enemy_index: usize, rng: EnemyRng) -> Option<Box<dyn Enemy>> {
        if let Some(kind) = EnemyKind::from_repr(enemy_index) {
            return Some(kind.create(self.difficulty, rng));
        }
        let scripted = self
            .scripted
            .get(enemy_index - <EnemyKind as strum::EnumCount>::COUNT)?;
        Some(Box::new(scripted.clone()))
    }
}

/// Cursor over a fixed-length move list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Rotation {
    cursor: usize,
}

impl Rotation {
    pub(crate) fn index(&self, len: usize) -> usize {
        if len == 0 { 0 } else { self.cursor % len }
    }

    pub(crate) fn advance(&mut self, len: usize) {
        if len > 0 {
            self.cursor = (self.cursor + 1) % len;
        }
    }

    /// Keeps the cursor on the same slot after the move there was removed.
    pub(crate) fn removed_current(&mut self, new_len: usize) {
        if new_len == 0 || self.cursor >= new_len {
            self.cursor = 0;
        }
    }

    pub(crate) fn reset(&mut self) {
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_builtin_index_creates_its_enemy() {
        let roster = Roster::new(Difficulty::Normal);
        for kind in EnemyKind::iter() {
            let enemy = roster.create(kind as usize, EnemyRng::new(1)).unwrap();
            assert!(enemy.max_health() > 0);
            assert!(enemy.next_move().is_some(), "{kind} has no opening move");
        }
    }

    #[test]
    fn scripted_enemies_follow_the_builtins() {
        let roster = Roster::new(Difficulty::Normal)
            .with_scripted(vec![ScriptedEnemy::new("Inferno", 100, Vec::new())]);
        let index = roster.index_of("Inferno").unwrap();
        assert_eq!(index, 12);
        let rng = EnemyRng::default();
        assert_eq!(roster.create(index, rng).unwrap().name(), "Inferno");
        assert!(roster.create(index + 1, rng).is_none());
        assert_eq!(roster.index_of("straight_arrow"), Some(4));
        assert_eq!(roster.index_of("status_tician"), Some(11));
    }

    #[test]
    fn rotation_wraps_and_survives_removal() {
        let mut rotation = Rotation::default();
        rotation.advance(3);
        rotation.advance(3);
        assert_eq!(rotation.index(3), 2);
        rotation.removed_current(2);
        assert_eq!(rotation.index(2), 0);
    }
}
