//! Human-readable run summary built from encounter events.

use combat_runtime::{CombatSnapshot, EncounterEvent, Event};
use dice_core::CombatPhase;
use tokio::sync::broadcast::{self, error::RecvError};

/// Logs encounter events until the runtime shuts down.
pub async fn log_encounters(mut rx: broadcast::Receiver<Event>) {
    loop {
        match rx.recv().await {
            Ok(Event::Encounter(event)) => log_encounter_event(&event),
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "encounter reporter lagged behind");
            }
            Err(RecvError::Closed) => break,
        }
    }
}

fn log_encounter_event(event: &EncounterEvent) {
    match event {
        EncounterEvent::Started {
            enemy, max_health, ..
        } => tracing::info!("⚔ {enemy} appears ({max_health} hp)"),
        EncounterEvent::TurnResolved(report) => tracing::info!(
            "turn {}: {} for {} / {} for {}, dealt {} took {}",
            report.turn,
            report.attack.combo,
            report.attack.total,
            report.defend.combo,
            report.defend.total,
            report.damage_to_enemy,
            report.damage_to_player
        ),
        EncounterEvent::Defeated {
            enemy,
            reward_gold,
            healed,
        } => tracing::info!("{enemy} defeated: +{reward_gold} gold, healed {healed}"),
        EncounterEvent::PhaseChanged(phase) => tracing::debug!(%phase, "phase changed"),
    }
}

pub fn log_outcome(snapshot: &CombatSnapshot) {
    match snapshot.phase {
        CombatPhase::Victory => tracing::info!(
            health = snapshot.player.health,
            gold = snapshot.player.gold,
            "Run won"
        ),
        _ => tracing::warn!(
            phase = %snapshot.phase,
            encounters_left = snapshot.encounters_remaining,
            "Run lost"
        ),
    }
}
