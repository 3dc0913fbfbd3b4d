//! Enemy moves as data.

use crate::status::CrowdControlPlan;

/// Tags of enemy actions in canonical execution order.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EnemyActionKind {
    Attack,
    Heal,
    Defend,
    Lock,
    Weaken,
    Nullify,
    Burn,
    SetMaxDicePerZone,
    CrowdControl,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnemyAction {
    Attack(u32),
    Heal(u32),
    Defend(u32),
    Lock(u32),
    Weaken(u32),
    Nullify(u32),
    Burn(u32),
    SetMaxDicePerZone(u8),
    CrowdControl(CrowdControlPlan),
}

impl EnemyAction {
    pub fn kind(&self) -> EnemyActionKind {
        match self {
            Self::Attack(_) => EnemyActionKind::Attack,
            Self::Heal(_) => EnemyActionKind::Heal,
            Self::Defend(_) => EnemyActionKind::Defend,
            Self::Lock(_) => EnemyActionKind::Lock,
            Self::Weaken(_) => EnemyActionKind::Weaken,
            Self::Nullify(_) => EnemyActionKind::Nullify,
            Self::Burn(_) => EnemyActionKind::Burn,
            Self::SetMaxDicePerZone(_) => EnemyActionKind::SetMaxDicePerZone,
            Self::CrowdControl(_) => EnemyActionKind::CrowdControl,
        }
    }

    /// Short intent text, e.g. `attack 15`.
    pub fn describe(&self) -> String {
        match self {
            Self::Attack(n) => format!("attack {n}"),
            Self::Heal(n) => format!("heal {n}"),
            Self::Defend(n) => format!("defend {n}"),
            Self::Lock(n) => format!("lock {n}"),
            Self::Weaken(n) => format!("weaken {n}"),
            Self::Nullify(n) => format!("nullify {n}"),
            Self::Burn(n) => format!("burn {n}"),
            Self::SetMaxDicePerZone(n) => format!("limit zones to {n}"),
            Self::CrowdControl(plan) => format!(
                "crowd control (lock {}, nullify {}, weaken {})",
                plan.lock, plan.nullify, plan.weaken
            ),
        }
    }
}

/// A labelled list of actions.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyMove {
    pub label: String,
    pub actions: Vec<EnemyAction>,
    /// Defend actions already applied ahead of the player's attack.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing))]
    pub defenses_primed: bool,
}

impl EnemyMove {
    pub fn new(label: impl Into<String>, actions: Vec<EnemyAction>) -> Self {
        Self {
            label: label.into(),
            actions,
            defenses_primed: false,
        }
    }

    /// Actions sorted into canonical execution order; equal kinds keep their
    /// listed order.
    pub fn ordered_actions(&self) -> Vec<EnemyAction> {
        let mut actions = self.actions.clone();
        actions.sort_by_key(EnemyAction::kind);
        actions
    }

    pub fn total_defense(&self) -> u32 {
        self.actions
            .iter()
            .map(|action| match action {
                EnemyAction::Defend(n) => *n,
                _ => 0,
            })
            .sum()
    }

    pub fn describe(&self) -> String {
        let parts: Vec<String> = self.actions.iter().map(EnemyAction::describe).collect();
        if parts.is_empty() {
            return self.label.clone();
        }
        format!("{}: {}", self.label, parts.join(", "))
    }
}
