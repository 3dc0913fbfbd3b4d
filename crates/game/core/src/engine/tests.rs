use super::*;
use crate::combo::ComboKind;
use crate::dice::{DieFlags, DieId, DieKind, LoadoutEntry, ZoneKind};
use crate::enemy::{EncounterDescriptor, EncounterError, Enemy, EnemyFactory, EnemyMove, ScriptedEnemy};
use crate::env::EnemyRng;
use crate::status::{CrowdControlPlan, Curse};

struct Fixed(Vec<ScriptedEnemy>);

impl EnemyFactory for Fixed {
    fn create(&self, enemy_index: usize, _rng: EnemyRng) -> Option<Box<dyn Enemy>> {
        self.0
            .get(enemy_index)
            .cloned()
            .map(|enemy| Box::new(enemy) as Box<dyn Enemy>)
    }
}

/// Passive enemy whose destroy-outside-combo trait is always on.
struct Shredder;

impl Enemy for Shredder {
    fn name(&self) -> &str {
        "Shredder"
    }

    fn max_health(&self) -> u32 {
        500
    }

    fn next_move(&self) -> Option<EnemyMove> {
        Some(EnemyMove::new("Idle", Vec::new()))
    }

    fn should_destroy_dice_outside_combo(&self) -> bool {
        true
    }
}

struct ShredderFactory;

impl EnemyFactory for ShredderFactory {
    fn create(&self, _enemy_index: usize, _rng: EnemyRng) -> Option<Box<dyn Enemy>> {
        Some(Box::new(Shredder))
    }
}

fn encounter(enemy_index: usize) -> EncounterDescriptor {
    EncounterDescriptor {
        enemy_index,
        reward_gold: 25,
        is_boss: false,
    }
}

fn idle(name: &str, health: u32) -> ScriptedEnemy {
    ScriptedEnemy::new(name, health, vec![EnemyMove::new("Idle", Vec::new())])
}

fn hitter(name: &str, health: u32, damage: u32) -> ScriptedEnemy {
    ScriptedEnemy::new(
        name,
        health,
        vec![EnemyMove::new("Hit", vec![EnemyAction::Attack(damage)])],
    )
}

struct Harness {
    state: CombatState,
    enemies: EnemyManager,
}

impl Harness {
    fn new(encounters: Vec<EncounterDescriptor>) -> Self {
        Self {
            state: CombatState::default(),
            enemies: EnemyManager::new(encounters),
        }
    }

    fn engine(&mut self) -> CombatEngine<'_> {
        CombatEngine::new(&mut self.state, &mut self.enemies)
    }

    fn start(&mut self, factory: &dyn EnemyFactory) {
        self.engine().start_encounter(factory).unwrap();
    }

    /// Rolls, then overrides the faces of the hand in creation order.
    fn roll_faces(&mut self, faces: &[u8]) -> Vec<DieId> {
        self.engine().roll().unwrap();
        let ids: Vec<DieId> = self.state.board.dice().map(|die| die.id).collect();
        for (id, face) in ids.iter().zip(faces) {
            self.state.board.die_mut(*id).unwrap().set_face(*face);
        }
        ids
    }
}

#[test]
fn pair_defends_and_three_of_a_kind_attacks() {
    let mut h = Harness::new(vec![encounter(0)]);
    h.start(&Fixed(vec![hitter("Dummy", 100, 5)]));
    let ids = h.roll_faces(&[3, 3, 3, 4, 4, 6]);

    let mut engine = h.engine();
    for id in &ids[..3] {
        engine.place_next(*id, ZoneKind::Attack).unwrap();
    }
    for id in &ids[3..] {
        engine.place_next(*id, ZoneKind::Defend).unwrap();
    }
    let report = engine.resolve().unwrap();

    assert_eq!(report.attack.combo, ComboKind::ThreeOfAKind);
    assert_eq!(report.attack.total, 9 + 5);
    assert_eq!(report.defend.combo, ComboKind::Pair);
    assert_eq!(report.defend.total, 14 + 2);
    assert_eq!(report.damage_to_enemy, 14);
    assert_eq!(report.player_block, 16);
    assert_eq!(report.damage_to_player, 0);
    assert_eq!(h.enemies.stats().unwrap().health, 86);
    assert_eq!(h.state.player.health, 100);
    assert_eq!(h.state.player.block, 0);
}

#[test]
fn curse_queue_covers_the_battery_slot() {
    let mut h = Harness::new(vec![encounter(0)]);
    h.state.relics.battery_included = true;
    h.start(&Fixed(vec![idle("Dummy", 100)]));
    h.engine().roll().unwrap();

    let in_hand = h.state.board.dice().count();
    assert_eq!(in_hand, h.state.config.hand_size as usize + 1);
    assert_eq!(h.state.hand_slots() as usize, in_hand);

    let slots = h.state.hand_slots();
    h.state.status.queue(Curse::Lock, 7, slots);
    assert_eq!(h.state.status.pending_count(Curse::Lock) as usize, in_hand);
}

#[test]
fn unused_bomb_detonates_on_the_third_resolution_only() {
    let mut h = Harness::new(vec![encounter(0)]);
    h.state.loadout_entries = vec![LoadoutEntry::new(DieKind::Bomb, false)];
    h.start(&Fixed(vec![idle("Target", 1000)]));

    let mut bonuses = Vec::new();
    for _ in 0..4 {
        h.engine().roll().unwrap();
        let report = h.engine().resolve().unwrap();
        bonuses.push((report.detonation.bonus, report.attack.detonation_bonus));
    }

    assert_eq!(bonuses, vec![(0, 0), (0, 0), (20, 20), (0, 0)]);
    assert_eq!(h.enemies.stats().unwrap().health, 980);
}

#[test]
fn placed_bomb_does_not_tick() {
    let mut h = Harness::new(vec![encounter(0)]);
    h.state.loadout_entries = vec![LoadoutEntry::new(DieKind::Bomb, true)];
    h.start(&Fixed(vec![idle("Target", 1000)]));

    for _ in 0..3 {
        let ids = h.roll_faces(&[1]);
        h.engine().place_next(ids[0], ZoneKind::Defend).unwrap();
        let report = h.engine().resolve().unwrap();
        assert!(report.detonation.is_empty());
    }
}

#[test]
fn crowd_control_never_stacks_curses_on_one_die() {
    let mut h = Harness::new(vec![encounter(0)]);
    h.state.loadout_entries = vec![LoadoutEntry::new(DieKind::Wild, false); 3];
    h.start(&Fixed(vec![idle("Target", 100)]));
    let plan = CrowdControlPlan {
        lock: 1,
        weaken: 1,
        nullify: 1,
    };
    h.state.status.queue_crowd_control(plan, 6);

    h.engine().roll().unwrap();

    let cursed: Vec<_> = h
        .state
        .board
        .dice()
        .filter(|die| die.has_curse())
        .collect();
    assert_eq!(cursed.len(), 3);
    for die in &cursed {
        assert_eq!(die.flags().intersection(DieFlags::CURSES).bits().count_ones(), 1);
    }
    let nullified = cursed.iter().find(|die| die.is_nullified()).unwrap();
    assert_eq!(nullified.kind(), DieKind::Wild);
    assert_eq!(h.state.status.crowd_control(), None);
}

#[test]
fn locked_die_in_a_zone_carries_its_lock() {
    let mut h = Harness::new(vec![encounter(0)]);
    h.start(&Fixed(vec![idle("Target", 100)]));
    let ids = h.roll_faces(&[2, 5, 1, 1, 1, 1]);
    h.state.board.die_mut(ids[0]).unwrap().set_flag(DieFlags::LOCKED, true);
    h.state.board.die_mut(ids[1]).unwrap().set_flag(DieFlags::WEAKENED, true);

    let mut engine = h.engine();
    engine.place_next(ids[0], ZoneKind::Defend).unwrap();
    let report = engine.resolve().unwrap();

    assert_eq!(report.carryover.lock, 1);
    assert_eq!(report.carryover.weaken, 0);
    assert_eq!(h.state.status.pending_count(Curse::Lock), 1);

    h.engine().roll().unwrap();
    let locked = h.state.board.dice().filter(|die| die.is_locked()).count();
    assert_eq!(locked, 1);
    assert_eq!(h.state.status.pending_count(Curse::Lock), 0);
}

#[test]
fn later_rolls_only_touch_selected_dice() {
    let mut h = Harness::new(vec![encounter(0)]);
    h.state.relics.reroll_defense_per_die = 2;
    h.start(&Fixed(vec![idle("Target", 100)]));
    let ids = h.roll_faces(&[6, 6, 6, 6, 6, 6]);

    let mut engine = h.engine();
    assert_eq!(
        engine.roll().unwrap_err(),
        EngineError::Roll(RollError::NothingSelected)
    );
    assert!(engine.toggle_reroll(ids[0]).unwrap());
    assert!(engine.toggle_reroll(ids[1]).unwrap());
    let rolled = engine.roll().unwrap();

    assert_eq!(rolled.iter().map(|die| die.id).collect::<Vec<_>>(), ids[..2]);
    assert_eq!(h.state.turn.reroll_defense_bonus, 4);
    assert_eq!(h.state.turn.rolls.remaining, 1);
    assert!(h.state.board.dice().all(|die| !die.is_selected()));
    assert!(h.state.board.dice().skip(2).all(|die| die.face() == 6));
}

#[test]
fn locked_dice_cannot_be_selected() {
    let mut h = Harness::new(vec![encounter(0)]);
    h.start(&Fixed(vec![idle("Target", 100)]));
    let ids = h.roll_faces(&[1, 2, 3, 4, 5, 6]);
    h.state.board.die_mut(ids[2]).unwrap().set_flag(DieFlags::LOCKED, true);

    assert_eq!(
        h.engine().toggle_reroll(ids[2]).unwrap_err(),
        EngineError::Selection(SelectionError::Locked { die: ids[2] })
    );
}

#[test]
fn resolution_stages_reject_reentry() {
    let mut h = Harness::new(vec![encounter(0)]);
    h.start(&Fixed(vec![idle("Target", 100)]));

    assert_eq!(
        h.engine().resolve().unwrap_err(),
        EngineError::Resolve(ResolveError::NotRolled)
    );
    h.engine().roll().unwrap();

    let mut engine = h.engine();
    engine.begin_resolution().unwrap();
    assert_eq!(
        engine.begin_resolution().unwrap_err(),
        EngineError::Resolve(ResolveError::AlreadyResolving)
    );
    assert_eq!(
        engine.roll().unwrap_err(),
        EngineError::Roll(RollError::Resolving)
    );
    let finish_early = engine.finish_resolution().unwrap_err();
    assert_eq!(finish_early.phase(), EnginePhase::Settle);

    engine.resolve_turn().unwrap();
    assert!(engine.resolve_turn().is_err());
    engine.finish_resolution().unwrap();

    assert!(!h.state.is_resolving());
    assert_eq!(h.state.turn.number, 2);
    assert!(h.state.controls().can_roll);
    assert!(!h.state.controls().can_resolve);
}

#[test]
fn defeating_the_last_enemy_is_victory() {
    let mut h = Harness::new(vec![encounter(0)]);
    h.start(&Fixed(vec![hitter("Weakling", 10, 50)]));
    let ids = h.roll_faces(&[6, 6, 1, 1, 1, 1]);

    let mut engine = h.engine();
    engine.place_next(ids[0], ZoneKind::Attack).unwrap();
    engine.place_next(ids[1], ZoneKind::Attack).unwrap();
    let report = engine.resolve().unwrap();

    assert_eq!(report.phase, CombatPhase::Victory);
    assert_eq!(report.enemy_move, None);
    assert_eq!(h.state.phase, CombatPhase::Victory);
    assert_eq!(h.state.player.gold, 25);
    assert_eq!(h.state.player.health, 100);
    assert!(h.state.board.is_empty());

    let mut engine = h.engine();
    assert_eq!(
        engine.roll().unwrap_err(),
        EngineError::Roll(RollError::NotInCombat)
    );
    assert_eq!(
        engine.start_encounter(&Fixed(Vec::new())).unwrap_err(),
        EngineError::Encounter(EncounterError::NoEncountersLeft)
    );
}

#[test]
fn boss_defeat_heals_half_the_missing_health() {
    let mut h = Harness::new(vec![
        EncounterDescriptor {
            enemy_index: 0,
            reward_gold: 40,
            is_boss: true,
        },
        encounter(0),
    ]);
    let factory = Fixed(vec![idle("Boss", 5)]);
    h.state.player.health = 39;
    h.start(&factory);
    let ids = h.roll_faces(&[6, 1, 1, 1, 1, 1]);
    h.engine().place_next(ids[0], ZoneKind::Attack).unwrap();
    let report = h.engine().resolve().unwrap();

    assert_eq!(report.phase, CombatPhase::EncounterWon);
    assert_eq!(h.state.player.health, 39 + 31);
    assert_eq!(h.state.player.gold, 40);

    h.start(&factory);
    assert!(h.state.is_in_combat());
    assert_eq!(h.state.turn.number, 1);
}

#[test]
fn lethal_enemy_move_ends_the_run() {
    let mut h = Harness::new(vec![encounter(0)]);
    h.start(&Fixed(vec![hitter("Brute", 100, 500)]));
    h.engine().roll().unwrap();
    let report = h.engine().resolve().unwrap();

    assert_eq!(report.phase, CombatPhase::GameOver);
    assert_eq!(report.damage_to_player, 100);
    assert_eq!(h.state.player.health, 0);
    assert_eq!(
        h.engine().roll().unwrap_err(),
        EngineError::Roll(RollError::NotInCombat)
    );
}

#[test]
fn player_burn_short_circuits_the_exchange() {
    let mut h = Harness::new(vec![encounter(0)]);
    h.start(&Fixed(vec![hitter("Brute", 100, 5)]));
    h.state.player.burn = 150;
    h.state.player.block = 40;
    h.engine().roll().unwrap();
    let report = h.engine().resolve().unwrap();

    assert_eq!(report.phase, CombatPhase::GameOver);
    assert_eq!(report.enemy_move, None);
    assert_eq!(report.damage_to_enemy, 0);
    assert_eq!(h.enemies.stats().unwrap().health, 100);
}

#[test]
fn dice_outside_a_combo_sit_out_one_turn() {
    let mut h = Harness::new(vec![encounter(0)]);
    h.start(&ShredderFactory);
    let ids = h.roll_faces(&[3, 3, 5, 1, 2, 4]);

    let mut engine = h.engine();
    engine.place_next(ids[0], ZoneKind::Attack).unwrap();
    engine.place_next(ids[1], ZoneKind::Attack).unwrap();
    engine.place_next(ids[2], ZoneKind::Defend).unwrap();
    let report = engine.resolve().unwrap();

    assert_eq!(report.destroyed.len(), 4);
    assert_eq!(h.state.destroyed.len(), 4);

    h.engine().roll().unwrap();
    assert_eq!(h.state.board.len(), 2);
    assert!(h.state.destroyed.is_empty());
}

#[test]
fn zone_cap_evicts_dice_beyond_it() {
    let mut h = Harness::new(vec![encounter(0)]);
    h.start(&Fixed(vec![idle("Target", 100)]));
    let ids = h.roll_faces(&[1, 2, 3, 4, 5, 6]);

    let mut engine = h.engine();
    for id in &ids[..3] {
        engine.place_next(*id, ZoneKind::Attack).unwrap();
    }
    assert_eq!(engine.set_max_dice_per_zone(0), 1);
    assert_eq!(engine.zone_score(ZoneKind::Attack).dice, vec![ids[0]]);
    assert_eq!(engine.reset_zone_cap(), 6);
    let events = engine.take_events();
    assert!(events.iter().any(|event| matches!(
        event,
        CombatEvent::ZoneCapChanged { cap: 1, evicted } if evicted.len() == 2
    )));
}

#[test]
fn scripted_zone_cap_applies_at_encounter_start() {
    let mut h = Harness::new(vec![encounter(0)]);
    h.start(&Fixed(vec![idle("Squeezer", 100).with_max_dice_per_zone(2)]));
    assert_eq!(h.state.zone_cap, 2);

    let mut engine = h.engine();
    let events = engine.take_events();
    assert!(matches!(events.first(), Some(CombatEvent::EncounterStarted { .. })));
    assert!(
        events
            .iter()
            .any(|event| matches!(event, CombatEvent::TurnStarted { turn: 1, rolls: 3 }))
    );
}

#[test]
fn first_turn_bonus_and_roll_carryover() {
    let mut h = Harness::new(vec![encounter(0)]);
    h.state.relics.first_turn_bonus_rolls = 2;
    h.state.relics.roll_carryover = true;
    h.start(&Fixed(vec![idle("Target", 100)]));
    assert_eq!(h.state.turn.rolls.remaining, 5);

    h.engine().roll().unwrap();
    h.engine().resolve().unwrap();
    assert_eq!(h.state.turn.rolls.remaining, 3 + 4);
}
