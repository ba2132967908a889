//! Event bus for inter-system communication.

use crossbeam_channel::{bounded, Receiver, Sender};
use serde::{Deserialize, Serialize};

use deadfall_common::EntityId;

use crate::variant::AgentVariant;

/// Event types that can be sent through the event bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameEvent {
    /// Hostile agent spawned
    AgentSpawned {
        /// Entity ID
        entity_id: EntityId,
        /// Variant spawned
        variant: AgentVariant,
    },
    /// Hostile agent took damage
    AgentDamaged {
        /// Entity ID
        entity_id: EntityId,
        /// Damage applied after location scaling
        damage: f32,
    },
    /// Hostile agent died
    AgentDied {
        /// Entity ID
        entity_id: EntityId,
    },
    /// Corpse removed after its decay delay
    AgentDecayed {
        /// Entity ID
        entity_id: EntityId,
    },
    /// Player took damage
    PlayerDamaged {
        /// Damage amount
        damage: f32,
    },
    /// Player died
    PlayerDied,
}

/// Event bus for broadcasting events to subscribers.
#[derive(Debug)]
pub struct EventBus {
    /// Sender for broadcasting events
    sender: Sender<GameEvent>,
    /// Receiver for collecting events
    receiver: Receiver<GameEvent>,
    /// Channel capacity
    capacity: usize,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl EventBus {
    /// Creates a new event bus with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self {
            sender,
            receiver,
            capacity,
        }
    }

    /// Publishes an event to the bus.
    pub fn publish(&self, event: GameEvent) {
        // Non-blocking send - if full, event is dropped
        let _ = self.sender.try_send(event);
    }

    /// Drains all pending events.
    pub fn drain(&self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.receiver.try_recv() {
            events.push(event);
        }
        events
    }

    /// Returns the number of pending events.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Returns the channel capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Creates a new sender handle for publishing events.
    #[must_use]
    pub fn sender(&self) -> Sender<GameEvent> {
        self.sender.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_and_drain() {
        let bus = EventBus::new(16);
        let id = EntityId::from_raw(7);

        bus.publish(GameEvent::AgentSpawned {
            entity_id: id,
            variant: AgentVariant::Wolf,
        });
        bus.publish(GameEvent::AgentDied { entity_id: id });

        assert_eq!(bus.pending_count(), 2);
        let events = bus.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(bus.pending_count(), 0);
        assert!(matches!(events[1], GameEvent::AgentDied { entity_id } if entity_id == id));
    }

    #[test]
    fn test_full_bus_drops_events() {
        let bus = EventBus::new(1);
        bus.publish(GameEvent::PlayerDied);
        bus.publish(GameEvent::PlayerDied);
        assert_eq!(bus.pending_count(), 1);
    }

    #[test]
    fn test_extra_sender_handle() {
        let bus = EventBus::new(4);
        let sender = bus.sender();
        let _ = sender.try_send(GameEvent::PlayerDamaged { damage: 10.0 });
        assert_eq!(bus.drain().len(), 1);
    }
}
