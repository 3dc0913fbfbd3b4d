//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

use dice_core::CombatEvent;

use super::types::{CombatFeedEvent, EncounterEvent, ScoreEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Zone score breakdowns
    Score,
    /// Damage, curses, detonations and enemy intent
    Combat,
    /// Encounter start, defeat and terminal states
    Encounter,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Score, Topic::Combat, Topic::Encounter];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Score(ScoreEvent),
    Combat(CombatFeedEvent),
    Encounter(EncounterEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Score(_) => Topic::Score,
            Event::Combat(_) => Topic::Combat,
            Event::Encounter(_) => Topic::Encounter,
        }
    }

    /// Routes one engine event to its topic.
    pub fn from_combat(turn: u32, event: CombatEvent) -> Self {
        match event {
            CombatEvent::ZoneScoresUpdated { defend, attack } => {
                Event::Score(ScoreEvent { turn, defend, attack })
            }
            CombatEvent::EncounterStarted {
                enemy,
                max_health,
                descriptor,
            } => Event::Encounter(EncounterEvent::Started {
                enemy,
                max_health,
                descriptor,
            }),
            CombatEvent::EnemyDefeated {
                enemy,
                reward_gold,
                healed,
            } => Event::Encounter(EncounterEvent::Defeated {
                enemy,
                reward_gold,
                healed,
            }),
            CombatEvent::PhaseChanged(phase) => {
                Event::Encounter(EncounterEvent::PhaseChanged(phase))
            }
            event => Event::Combat(CombatFeedEvent { turn, event }),
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Channels are created once up front, so the map
/// is immutable and needs no lock.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<HashMap<Topic, broadcast::Sender<Event>>>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let channels = Topic::ALL
            .into_iter()
            .map(|topic| (topic, broadcast::channel(capacity.max(1)).0))
            .collect();

        Self {
            channels: Arc::new(channels),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if let Some(tx) = self.channels.get(&topic)
            && tx.send(event).is_err()
        {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events published after
    /// this call.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        match self.channels.get(&topic) {
            Some(tx) => tx.subscribe(),
            None => unreachable!("every topic channel is created in with_capacity"),
        }
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dice_core::CombatPhase;

    #[test]
    fn engine_events_route_by_kind() {
        let scores = Event::from_combat(
            1,
            CombatEvent::ZoneScoresUpdated {
                defend: Default::default(),
                attack: Default::default(),
            },
        );
        assert_eq!(scores.topic(), Topic::Score);

        let phase = Event::from_combat(1, CombatEvent::PhaseChanged(CombatPhase::Victory));
        assert_eq!(phase.topic(), Topic::Encounter);

        let healed = Event::from_combat(2, CombatEvent::PlayerHealed { amount: 3 });
        assert_eq!(healed.topic(), Topic::Combat);
    }

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut encounter_rx = bus.subscribe(Topic::Encounter);

        bus.publish(Event::from_combat(1, CombatEvent::PlayerHealed { amount: 3 }));
        bus.publish(Event::from_combat(1, CombatEvent::PhaseChanged(CombatPhase::GameOver)));

        let received = encounter_rx.recv().await.unwrap();
        assert_eq!(
            received,
            Event::Encounter(EncounterEvent::PhaseChanged(CombatPhase::GameOver))
        );
        assert!(encounter_rx.try_recv().is_err());
    }
}
