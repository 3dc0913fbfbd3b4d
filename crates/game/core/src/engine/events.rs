//! Events emitted by [`super::CombatEngine`] for presentation layers.

use crate::dice::{BlueprintId, DieId, DieKind};
use crate::enemy::{DamageSource, EnemyAction, EncounterDescriptor};
use crate::scoring::ZoneScore;
use crate::special::{DetonationReport, UsageTick};
use crate::state::CombatPhase;
use crate::status::{Curse, CrowdControlPlan, CurseCounts};

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Player,
    Enemy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RolledDie {
    pub id: DieId,
    pub kind: DieKind,
    pub face: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    EncounterStarted {
        enemy: String,
        max_health: u32,
        descriptor: EncounterDescriptor,
    },
    TurnStarted {
        turn: u32,
        rolls: u8,
    },
    DiceRolled {
        dice: Vec<RolledDie>,
        first_roll: bool,
    },
    ZoneScoresUpdated {
        defend: ZoneScore,
        attack: ZoneScore,
    },
    StatusApplied {
        die: DieId,
        curse: Curse,
    },
    CursesQueued {
        curse: Curse,
        count: u32,
    },
    CrowdControlQueued(CrowdControlPlan),
    CursesCarried(CurseCounts),
    CursesCleansed,
    ZoneCapChanged {
        cap: u8,
        evicted: Vec<DieId>,
    },
    BombDetonated(DetonationReport),
    SpecialUsed(UsageTick),
    PlayerHealed {
        amount: u32,
    },
    CometBurst {
        die: DieId,
        enemy_burn: u32,
        self_burn: u32,
    },
    BurnApplied {
        target: Side,
        amount: u32,
    },
    BlockGained {
        target: Side,
        amount: u32,
    },
    DamageDealt {
        target: Side,
        source: DamageSource,
        amount: u32,
        blocked: u32,
    },
    EnemyHealed {
        amount: u32,
    },
    EnemyReacted {
        actions: Vec<EnemyAction>,
    },
    EnemyMoveExecuted {
        label: String,
        actions: Vec<EnemyAction>,
    },
    EnemyIntent {
        description: String,
    },
    DiceDestroyed {
        blueprints: Vec<BlueprintId>,
    },
    EnemyDefeated {
        enemy: String,
        reward_gold: u32,
        healed: u32,
    },
    PhaseChanged(CombatPhase),
}
