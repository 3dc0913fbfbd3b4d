//! End-to-end tests driving the combat worker through the async runtime.

use std::path::PathBuf;
use std::time::Duration;

use combat_runtime::{
    CommandOutcome, DelayPresenter, EncounterEvent, Event, GreedyProvider, PlayerCommand, Runtime,
    RuntimeConfig, RuntimeError, ScriptedProvider, Topic,
};
use dice_content::{ContentFactory, Difficulty};
use dice_core::{
    CombatPhase, ComboKind, DieId, EncounterDescriptor, Enemy, EnemyAction, EnemyFactory, EnemyMove,
    EnemyRng, EngineError, ResolveError, RngOracle, ScriptedEnemy, ZoneKind,
};

/// Every die lands on 6.
struct Sixes;

impl RngOracle for Sixes {
    fn next_u32(&self, _seed: u64) -> u32 {
        5
    }
}

struct Fixed(Vec<ScriptedEnemy>);

impl EnemyFactory for Fixed {
    fn create(&self, enemy_index: usize, _rng: EnemyRng) -> Option<Box<dyn Enemy>> {
        self.0
            .get(enemy_index)
            .cloned()
            .map(|enemy| Box::new(enemy) as Box<dyn Enemy>)
    }
}

fn poker(health: u32) -> ScriptedEnemy {
    ScriptedEnemy::new(
        "Poker",
        health,
        vec![EnemyMove::new("Poke", vec![EnemyAction::Attack(5)])],
    )
}

fn encounters(count: usize) -> Vec<EncounterDescriptor> {
    (0..count)
        .map(|enemy_index| EncounterDescriptor {
            enemy_index,
            reward_gold: 10,
            is_boss: false,
        })
        .collect()
}

async fn sixes_runtime(health: u32) -> Runtime {
    Runtime::builder()
        .encounters(encounters(1))
        .enemy_factory(Fixed(vec![poker(health)]))
        .oracle(Sixes)
        .build()
        .await
        .unwrap()
}

#[tokio::test]
async fn builder_requires_an_enemy_factory() {
    let err = Runtime::builder().build().await.err().unwrap();
    assert!(matches!(err, RuntimeError::MissingEnemyFactory));
}

#[tokio::test]
async fn split_sixes_attack_and_defend() {
    let runtime = sixes_runtime(50).await;
    let handle = runtime.handle();

    handle.start_encounter().await.unwrap();
    let CommandOutcome::Rolled(dice) = handle.roll().await.unwrap() else {
        panic!("expected a roll");
    };
    assert_eq!(dice.len(), 6);
    assert!(dice.iter().all(|die| die.face == 6));

    for (idx, die) in dice.iter().enumerate() {
        let zone = if idx < 3 { ZoneKind::Attack } else { ZoneKind::Defend };
        handle.place_next(die.id, zone).await.unwrap();
    }

    let CommandOutcome::Resolved(report) = handle.resolve().await.unwrap() else {
        panic!("expected a resolution");
    };
    assert_eq!(report.attack.combo, ComboKind::ThreeOfAKind);
    assert_eq!(report.attack.total, 23);
    assert_eq!(report.damage_to_enemy, 23);
    assert_eq!(report.damage_to_player, 0);

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.enemy.unwrap().stats.health, 27);
    assert_eq!(snapshot.player.health, 100);
    assert_eq!(snapshot.player.block, 0);
    assert!(snapshot.dice.is_empty());
    assert!(!snapshot.has_rolled);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn rejected_commands_leave_state_untouched() {
    let runtime = sixes_runtime(50).await;
    let handle = runtime.handle();
    handle.start_encounter().await.unwrap();

    let before = handle.snapshot().await.unwrap();
    let err = handle.resolve().await.unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Engine(EngineError::Resolve(ResolveError::NotRolled))
    ));
    assert!(!handle.is_resolving());
    assert_eq!(handle.snapshot().await.unwrap(), before);
}

#[tokio::test]
async fn roll_and_resolve_are_ignored_while_presenting() {
    let runtime = Runtime::builder()
        .encounters(encounters(1))
        .enemy_factory(Fixed(vec![poker(500)]))
        .oracle(Sixes)
        .presenter(DelayPresenter::uniform(Duration::from_millis(50)))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    handle.start_encounter().await.unwrap();
    handle.roll().await.unwrap();

    let resolver = handle.clone();
    let first = tokio::spawn(async move { resolver.resolve().await });
    while !handle.is_resolving() {
        tokio::task::yield_now().await;
    }

    assert_eq!(handle.roll().await.unwrap(), CommandOutcome::Ignored);
    assert_eq!(handle.resolve().await.unwrap(), CommandOutcome::Ignored);

    let outcome = first.await.unwrap().unwrap();
    assert!(matches!(outcome, CommandOutcome::Resolved(_)));
    assert!(!handle.is_resolving());
    assert!(handle.snapshot().await.unwrap().controls.can_roll);
}

#[tokio::test]
async fn encounter_topic_reports_the_run() {
    let mut runtime = Runtime::builder()
        .encounters(encounters(1))
        .enemy_factory(Fixed(vec![poker(20)]))
        .oracle(Sixes)
        .player_provider(ScriptedProvider::new([
            PlayerCommand::StartEncounter,
            PlayerCommand::Roll,
            PlayerCommand::PlaceNext { die: DieId(0), zone: ZoneKind::Attack },
            PlayerCommand::PlaceNext { die: DieId(1), zone: ZoneKind::Attack },
            PlayerCommand::PlaceNext { die: DieId(2), zone: ZoneKind::Attack },
            PlayerCommand::Resolve,
        ]))
        .build()
        .await
        .unwrap();
    let mut encounter_rx = runtime.subscribe(Topic::Encounter);

    for _ in 0..6 {
        runtime.step().await.unwrap();
    }

    let mut seen = Vec::new();
    while let Ok(event) = encounter_rx.try_recv() {
        seen.push(event);
    }
    assert!(matches!(
        seen.first(),
        Some(Event::Encounter(EncounterEvent::Started { .. }))
    ));
    assert!(seen.contains(&Event::Encounter(EncounterEvent::PhaseChanged(
        CombatPhase::Victory
    ))));
    assert!(
        seen.iter()
            .any(|event| matches!(event, Event::Encounter(EncounterEvent::TurnResolved(_))))
    );
    assert_eq!(runtime.step().await.unwrap(), None);
}

#[tokio::test]
async fn provider_rejections_do_not_stop_the_run() {
    let mut runtime = sixes_runtime(50).await;
    runtime.set_player_provider(ScriptedProvider::new([PlayerCommand::Resolve]));

    let outcome = runtime.step().await.unwrap();
    assert_eq!(outcome, Some(CommandOutcome::Ignored));
}

#[tokio::test]
async fn greedy_player_finishes_the_shipped_run() {
    let data_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../game/content/data");
    let content = ContentFactory::new(data_dir)
        .load_run(Difficulty::Normal)
        .unwrap();

    let mut runtime = Runtime::builder()
        .config(RuntimeConfig {
            seed: 7,
            ..RuntimeConfig::default()
        })
        .content(content)
        .player_provider(GreedyProvider::default())
        .build()
        .await
        .unwrap();

    let snapshot = runtime.run_until_complete().await.unwrap();
    assert!(snapshot.is_over());
    assert!(matches!(
        snapshot.phase,
        CombatPhase::Victory | CombatPhase::GameOver
    ));
    runtime.shutdown().await.unwrap();
}
