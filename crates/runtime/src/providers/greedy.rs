use async_trait::async_trait;

use dice_core::{CombatPhase, ZoneKind};

use crate::api::{CombatSnapshot, PlayerCommand, PlayerProvider, Result, RuntimeError};

/// Rerolls low faces while rolls last, then deals the hand out highest
/// first, alternating Attack and Defend.
#[derive(Clone, Copy, Debug)]
pub struct GreedyProvider {
    /// Faces at or below this are rerolled while rolls remain.
    pub reroll_at_or_below: u8,
}

impl Default for GreedyProvider {
    fn default() -> Self {
        Self {
            reroll_at_or_below: 2,
        }
    }
}

impl GreedyProvider {
    fn choose(&self, snapshot: &CombatSnapshot) -> Result<PlayerCommand> {
        match snapshot.phase {
            CombatPhase::Idle | CombatPhase::EncounterWon => {
                return Ok(PlayerCommand::StartEncounter);
            }
            CombatPhase::GameOver | CombatPhase::Victory => {
                return Err(RuntimeError::Provider(format!(
                    "run already ended in {}",
                    snapshot.phase
                )));
            }
            CombatPhase::InCombat => {}
        }

        if !snapshot.has_rolled {
            return Ok(PlayerCommand::Roll);
        }

        let hand = snapshot.hand();
        let nothing_placed = hand.len() == snapshot.dice.len();
        if snapshot.rolls_remaining > 0 && nothing_placed {
            if let Some(die) = hand
                .iter()
                .find(|die| !die.locked && !die.selected && die.face <= self.reroll_at_or_below)
            {
                return Ok(PlayerCommand::ToggleReroll(die.id));
            }
            if hand.iter().any(|die| die.selected) {
                return Ok(PlayerCommand::Roll);
            }
        }

        if let Some(die) = hand.first() {
            let attack = snapshot.zone_len(ZoneKind::Attack);
            let defend = snapshot.zone_len(ZoneKind::Defend);
            let preferred = if attack <= defend {
                ZoneKind::Attack
            } else {
                ZoneKind::Defend
            };
            for zone in [preferred, preferred.opposite()] {
                if snapshot.zone_has_room(zone) {
                    return Ok(PlayerCommand::PlaceNext { die: die.id, zone });
                }
            }
        }

        Ok(PlayerCommand::Resolve)
    }
}

#[async_trait]
impl PlayerProvider for GreedyProvider {
    async fn next_command(&self, snapshot: &CombatSnapshot) -> Result<PlayerCommand> {
        self.choose(snapshot)
    }
}
