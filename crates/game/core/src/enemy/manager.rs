//! Encounter sequence and the live enemy's numeric state.

use super::{
    DamageDealtEvent, DamageSource, Enemy, EnemyAction, EnemyMove, IncomingAttack, RerollEvent,
};
use crate::combat::{self, Mitigation};
use crate::env::EnemyRng;
use crate::error::{ErrorSeverity, GameError};

/// One entry of the encounter sequence supplied by the path generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterDescriptor {
    pub enemy_index: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reward_gold: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_boss: bool,
}

/// Builds live enemies from roster indices.
///
/// `rng` is the enemy's own draw stream for the encounter; enemies with a
/// fixed move list ignore it.
pub trait EnemyFactory: Send + Sync {
    fn create(&self, enemy_index: usize, rng: EnemyRng) -> Option<Box<dyn Enemy>>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyStats {
    pub health: u32,
    pub max_health: u32,
    pub block: u32,
    pub burn: u32,
}

/// Outcome of the player's attack against the current enemy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttackResolution {
    /// Score after the enemy's modifier.
    pub incoming: u32,
    pub halved_block: u32,
    pub blocked: u32,
    pub damage_dealt: u32,
    pub reactions: Vec<EnemyAction>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EncounterError {
    #[error("no encounters left in the sequence")]
    NoEncountersLeft,

    #[error("an encounter is already in progress")]
    EncounterActive,

    #[error("no enemy is in play")]
    NoEnemy,

    #[error("enemy factory has no enemy at index {enemy_index}")]
    UnknownEnemy { enemy_index: usize },
}

impl GameError for EncounterError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoEncountersLeft | Self::EncounterActive | Self::NoEnemy => {
                ErrorSeverity::Recoverable
            }
            Self::UnknownEnemy { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoEncountersLeft => "ENCOUNTER_NONE_LEFT",
            Self::EncounterActive => "ENCOUNTER_ACTIVE",
            Self::NoEnemy => "ENCOUNTER_NO_ENEMY",
            Self::UnknownEnemy { .. } => "ENCOUNTER_UNKNOWN_ENEMY",
        }
    }
}

/// The enemy currently fought.
pub struct ActiveEncounter {
    pub descriptor: EncounterDescriptor,
    pub stats: EnemyStats,
    enemy: Box<dyn Enemy>,
    upcoming: Option<EnemyMove>,
}

impl ActiveEncounter {
    pub fn enemy(&self) -> &dyn Enemy {
        self.enemy.as_ref()
    }

    pub fn upcoming_move(&self) -> Option<&EnemyMove> {
        self.upcoming.as_ref()
    }
}

impl core::fmt::Debug for ActiveEncounter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ActiveEncounter")
            .field("enemy", &self.enemy.name())
            .field("descriptor", &self.descriptor)
            .field("stats", &self.stats)
            .field("upcoming", &self.upcoming)
            .finish()
    }
}

/// Drives the encounter sequence and applies damage to the current enemy.
#[derive(Debug, Default)]
pub struct EnemyManager {
    encounters: Vec<EncounterDescriptor>,
    next_encounter: usize,
    current: Option<ActiveEncounter>,
    resolution_damage: u32,
}

impl EnemyManager {
    pub fn new(encounters: Vec<EncounterDescriptor>) -> Self {
        let mut manager = Self::default();
        manager.set_enemies(encounters);
        manager
    }

    /// Replaces the encounter sequence and drops any live enemy.
    pub fn set_enemies(&mut self, encounters: Vec<EncounterDescriptor>) {
        self.encounters = encounters;
        self.next_encounter = 0;
        self.current = None;
        self.resolution_damage = 0;
    }

    pub fn encounters(&self) -> &[EncounterDescriptor] {
        &self.encounters
    }

    /// Encounters not started yet.
    pub fn remaining(&self) -> usize {
        self.encounters.len().saturating_sub(self.next_encounter)
    }

    /// Spawns the next enemy of the sequence, seeding its draw stream from
    /// `run_seed` and the encounter position.
    pub fn start_next(
        &mut self,
        factory: &dyn EnemyFactory,
        run_seed: u64,
    ) -> Result<&ActiveEncounter, EncounterError> {
        if self.current.is_some() {
            return Err(EncounterError::EncounterActive);
        }
        let descriptor = *self
            .encounters
            .get(self.next_encounter)
            .ok_or(EncounterError::NoEncountersLeft)?;
        let mut enemy =
            factory
                .create(
                    descriptor.enemy_index,
                    EnemyRng::for_encounter(run_seed, self.next_encounter),
                )
                .ok_or(EncounterError::UnknownEnemy {
                    enemy_index: descriptor.enemy_index,
                })?;
        enemy.on_encounter_start();
        let max_health = enemy.max_health();

        self.next_encounter += 1;
        self.resolution_damage = 0;
        Ok(&*self.current.insert(ActiveEncounter {
            descriptor,
            stats: EnemyStats {
                health: max_health,
                max_health,
                block: 0,
                burn: 0,
            },
            enemy,
            upcoming: None,
        }))
    }

    pub fn current(&self) -> Option<&ActiveEncounter> {
        self.current.as_ref()
    }

    pub fn current_enemy(&self) -> Option<&dyn Enemy> {
        self.current.as_ref().map(ActiveEncounter::enemy)
    }

    pub fn stats(&self) -> Option<&EnemyStats> {
        self.current.as_ref().map(|active| &active.stats)
    }

    pub fn is_current_enemy_defeated(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|active| active.stats.health == 0)
    }

    /// Removes the live enemy, returning what it was worth.
    pub fn clear_current_enemy(&mut self) -> Option<EncounterDescriptor> {
        self.current.take().map(|active| active.descriptor)
    }

    /// Starts a fresh damage tally for one resolution.
    pub fn begin_resolution(&mut self) {
        self.resolution_damage = 0;
    }

    pub fn add_enemy_block(&mut self, amount: u32) -> u32 {
        let Some(active) = self.current.as_mut() else {
            return 0;
        };
        active.stats.block = active.stats.block.saturating_add(amount);
        amount
    }

    pub fn reset_enemy_block(&mut self) {
        if let Some(active) = self.current.as_mut() {
            active.stats.block = 0;
        }
    }

    /// Adds burn stacks to the enemy.
    pub fn apply_enemy_burn(&mut self, amount: u32) -> u32 {
        let Some(active) = self.current.as_mut() else {
            return 0;
        };
        active.stats.burn = active.stats.burn.saturating_add(amount);
        amount
    }

    pub fn heal_current_enemy(&mut self, amount: u32) -> u32 {
        let Some(active) = self.current.as_mut() else {
            return 0;
        };
        combat::heal(&mut active.stats.health, active.stats.max_health, amount)
    }

    /// Burn damage to the enemy, bypassing block.
    pub fn apply_enemy_burn_tick(&mut self) -> (u32, Vec<EnemyAction>) {
        let Some(active) = self.current.as_mut() else {
            return (0, Vec::new());
        };
        let burn = active.stats.burn;
        let lost = combat::apply_damage(&mut active.stats.health, burn);
        let reactions = self.record_damage(lost, DamageSource::Burn);
        (lost, reactions)
    }

    /// Applies the player's Attack zone result: the enemy's modifier, an
    /// optional block halving, block mitigation, then health.
    pub fn apply_player_attack(
        &mut self,
        attack: IncomingAttack,
        blockbuster: bool,
    ) -> AttackResolution {
        let Some(active) = self.current.as_mut() else {
            return AttackResolution::default();
        };
        let incoming = active.enemy.modify_incoming_attack(&attack);
        let halved_block = if blockbuster {
            combat::halve_block(&mut active.stats.block)
        } else {
            0
        };
        let Mitigation { blocked, damage } = combat::mitigate(incoming, &mut active.stats.block);
        let damage_dealt = combat::apply_damage(&mut active.stats.health, damage);
        let reactions = self.record_damage(damage_dealt, DamageSource::Attack);
        AttackResolution {
            incoming,
            halved_block,
            blocked,
            damage_dealt,
            reactions,
        }
    }

    fn record_damage(&mut self, amount: u32, source: DamageSource) -> Vec<EnemyAction> {
        if amount == 0 {
            return Vec::new();
        }
        let Some(active) = self.current.as_mut() else {
            return Vec::new();
        };
        let previous_total = self.resolution_damage;
        self.resolution_damage = self.resolution_damage.saturating_add(amount);
        active.enemy.on_player_damage_dealt(&DamageDealtEvent {
            amount,
            total_damage: self.resolution_damage,
            previous_total,
            remaining_health: active.stats.health,
            source,
        })
    }

    /// Previews the enemy's next move without committing anything.
    pub fn prepare_next_move(&mut self) -> Option<&EnemyMove> {
        let active = self.current.as_mut()?;
        active.upcoming = active.enemy.next_move();
        active.upcoming.as_ref()
    }

    pub fn upcoming_move(&self) -> Option<&EnemyMove> {
        self.current.as_ref()?.upcoming.as_ref()
    }

    /// Applies the upcoming move's Defend actions ahead of the player's
    /// attack. Returns the block gained; a move is primed at most once.
    pub fn prime_upcoming_defenses(&mut self) -> u32 {
        let Some(active) = self.current.as_mut() else {
            return 0;
        };
        let Some(upcoming) = active.upcoming.as_mut() else {
            return 0;
        };
        if upcoming.defenses_primed {
            return 0;
        }
        upcoming.defenses_primed = true;
        let block = upcoming.total_defense();
        active.stats.block = active.stats.block.saturating_add(block);
        block
    }

    /// Takes the previewed move for execution.
    pub fn take_upcoming_move(&mut self) -> Option<EnemyMove> {
        self.current.as_mut()?.upcoming.take()
    }

    pub fn notify_reroll(&mut self, event: &RerollEvent) -> Vec<EnemyAction> {
        match self.current.as_mut() {
            Some(active) => active.enemy.on_player_reroll(event),
            None => Vec::new(),
        }
    }

    pub fn finish_turn(&mut self, executed: Option<&EnemyMove>) -> Vec<EnemyAction> {
        match self.current.as_mut() {
            Some(active) => active.enemy.on_turn_finished(executed),
            None => Vec::new(),
        }
    }

    pub fn notify_zone_cap(&mut self, cap: u8) {
        if let Some(active) = self.current.as_mut() {
            active.enemy.on_max_dice_per_zone_changed(cap);
        }
    }

    pub fn should_destroy_dice_outside_combo(&self) -> bool {
        self.current_enemy()
            .is_some_and(|enemy| enemy.should_destroy_dice_outside_combo())
    }

    pub fn intent_description(&self) -> Option<String> {
        let active = self.current.as_ref()?;
        let upcoming = active.upcoming.as_ref()?;
        Some(active.enemy.intent_description(upcoming))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combo::ComboKind;
    use crate::enemy::ScriptedEnemy;

    struct Fixed;

    impl EnemyFactory for Fixed {
        fn create(&self, enemy_index: usize, _rng: EnemyRng) -> Option<Box<dyn Enemy>> {
            (enemy_index == 0).then(|| {
                Box::new(ScriptedEnemy::new(
                    "Dummy",
                    40,
                    vec![
                        EnemyMove::new("Guard", vec![EnemyAction::Defend(5)]),
                        EnemyMove::new("Hit", vec![EnemyAction::Attack(7)]),
                    ],
                )) as Box<dyn Enemy>
            })
        }
    }

    fn encounter(enemy_index: usize) -> EncounterDescriptor {
        EncounterDescriptor {
            enemy_index,
            reward_gold: 10,
            is_boss: false,
        }
    }

    fn attack(score: u32) -> IncomingAttack {
        IncomingAttack {
            score,
            combo: ComboKind::NoCombo,
        }
    }

    #[test]
    fn start_next_walks_the_sequence() {
        let mut manager = EnemyManager::new(vec![encounter(0)]);
        let active = manager.start_next(&Fixed, 0).unwrap();
        assert_eq!(active.stats.health, 40);
        assert_eq!(
            manager.start_next(&Fixed, 0).unwrap_err(),
            EncounterError::EncounterActive
        );
        manager.clear_current_enemy();
        assert_eq!(
            manager.start_next(&Fixed, 0).unwrap_err(),
            EncounterError::NoEncountersLeft
        );
    }

    #[test]
    fn unknown_enemy_does_not_consume_the_encounter() {
        let mut manager = EnemyManager::new(vec![encounter(9)]);
        assert_eq!(
            manager.start_next(&Fixed, 0).unwrap_err(),
            EncounterError::UnknownEnemy { enemy_index: 9 }
        );
        assert_eq!(manager.remaining(), 1);
    }

    #[test]
    fn primed_defense_absorbs_the_attack_once() {
        let mut manager = EnemyManager::new(vec![encounter(0)]);
        manager.start_next(&Fixed, 0).unwrap();
        manager.prepare_next_move();
        assert_eq!(manager.prime_upcoming_defenses(), 5);
        assert_eq!(manager.prime_upcoming_defenses(), 0);

        let result = manager.apply_player_attack(attack(12), false);
        assert_eq!(result.blocked, 5);
        assert_eq!(result.damage_dealt, 7);
        assert_eq!(manager.stats().unwrap().health, 33);
    }

    #[test]
    fn blockbuster_halves_block_first() {
        let mut manager = EnemyManager::new(vec![encounter(0)]);
        manager.start_next(&Fixed, 0).unwrap();
        manager.add_enemy_block(10);
        let result = manager.apply_player_attack(attack(8), true);
        assert_eq!(result.halved_block, 5);
        assert_eq!(result.blocked, 5);
        assert_eq!(result.damage_dealt, 3);
    }

    #[test]
    fn burn_bypasses_block() {
        let mut manager = EnemyManager::new(vec![encounter(0)]);
        manager.start_next(&Fixed, 0).unwrap();
        manager.add_enemy_block(50);
        manager.apply_enemy_burn(6);
        let (lost, _) = manager.apply_enemy_burn_tick();
        assert_eq!(lost, 6);
        assert_eq!(manager.stats().unwrap().health, 34);
        assert_eq!(manager.stats().unwrap().block, 50);
    }

    #[test]
    fn lethal_damage_marks_the_enemy_defeated() {
        let mut manager = EnemyManager::new(vec![encounter(0)]);
        manager.start_next(&Fixed, 0).unwrap();
        let result = manager.apply_player_attack(attack(100), false);
        assert_eq!(result.damage_dealt, 40);
        assert!(manager.is_current_enemy_defeated());
        assert_eq!(manager.clear_current_enemy(), Some(encounter(0)));
        assert!(!manager.is_current_enemy_defeated());
    }

    #[test]
    fn block_and_burn_stacks_saturate() {
        let mut manager = EnemyManager::new(vec![encounter(0)]);
        manager.start_next(&Fixed, 0).unwrap();
        manager.add_enemy_block(u32::MAX);
        manager.add_enemy_block(10);
        manager.apply_enemy_burn(u32::MAX - 1);
        manager.apply_enemy_burn(3);
        let stats = manager.stats().unwrap();
        assert_eq!(stats.block, u32::MAX);
        assert_eq!(stats.burn, u32::MAX);
    }

    /// Reports the health left after each hit as a heal reaction.
    struct HealthEcho;

    impl Enemy for HealthEcho {
        fn name(&self) -> &str {
            "Echo"
        }

        fn max_health(&self) -> u32 {
            30
        }

        fn next_move(&self) -> Option<EnemyMove> {
            None
        }

        fn on_player_damage_dealt(&mut self, event: &DamageDealtEvent) -> Vec<EnemyAction> {
            vec![EnemyAction::Heal(event.remaining_health)]
        }
    }

    struct EchoFactory;

    impl EnemyFactory for EchoFactory {
        fn create(&self, _enemy_index: usize, _rng: EnemyRng) -> Option<Box<dyn Enemy>> {
            Some(Box::new(HealthEcho))
        }
    }

    #[test]
    fn damage_events_carry_the_remaining_health() {
        let mut manager = EnemyManager::new(vec![encounter(0)]);
        manager.start_next(&EchoFactory, 0).unwrap();
        manager.begin_resolution();
        let glancing = manager.apply_player_attack(attack(12), false);
        assert_eq!(glancing.reactions, vec![EnemyAction::Heal(18)]);
        let lethal = manager.apply_player_attack(attack(40), false);
        assert_eq!(lethal.reactions, vec![EnemyAction::Heal(0)]);
    }
}
