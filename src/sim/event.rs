//! Typed, synchronous in-process event bus
//!
//! Collision outcomes are decoupled from the code that reacts to them.
//! `publish` invokes every subscriber registered for the event's kind, in
//! subscription order, before returning. There is no queue and no
//! unsubscription; handlers receive the bus context mutably but never the
//! bus itself, so dispatch cannot re-enter.

use serde::{Deserialize, Serialize};

use super::entity::EntityId;

// === Event types ===

/// A game event raised during a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A ball touched this block; it must leave the world
    BlockDestroyed { block: EntityId },
    /// A ball bounced off a paddle
    PaddleHit { ball: EntityId, paddle: EntityId },
    /// A ball fell past the bottom edge
    BallMissed { ball: EntityId },
    /// The pause flag changed value
    PauseToggled { paused: bool },
}

/// Discriminant tag for event types, used for subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    BlockDestroyed,
    PaddleHit,
    BallMissed,
    PauseToggled,
}

/// Total number of event kinds.
const EVENT_KIND_COUNT: usize = 4;

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::BlockDestroyed { .. } => EventKind::BlockDestroyed,
            GameEvent::PaddleHit { .. } => EventKind::PaddleHit,
            GameEvent::BallMissed { .. } => EventKind::BallMissed,
            GameEvent::PauseToggled { .. } => EventKind::PauseToggled,
        }
    }
}

impl EventKind {
    fn index(self) -> usize {
        self as usize
    }
}

// === Bus ===

/// A subscriber mutates the bus context in response to an event.
pub type Handler<C> = Box<dyn FnMut(&mut C, &GameEvent)>;

/// Publish/subscribe channel over a context type `C`
pub struct EventBus<C> {
    /// One ordered subscriber list per event kind
    subscribers: [Vec<Handler<C>>; EVENT_KIND_COUNT],
    /// Publish counters per event kind
    published: [u64; EVENT_KIND_COUNT],
}

impl<C> Default for EventBus<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> std::fmt::Debug for EventBus<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: Vec<usize> = self.subscribers.iter().map(Vec::len).collect();
        f.debug_struct("EventBus")
            .field("subscribers", &counts)
            .field("published", &self.published)
            .finish()
    }
}

impl<C> EventBus<C> {
    pub fn new() -> Self {
        Self {
            subscribers: std::array::from_fn(|_| Vec::new()),
            published: [0; EVENT_KIND_COUNT],
        }
    }

    /// Register a handler for one event kind. Handlers run in registration order.
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F)
    where
        F: FnMut(&mut C, &GameEvent) + 'static,
    {
        self.subscribers[kind.index()].push(Box::new(handler));
    }

    /// Deliver an event to every current subscriber of its kind, synchronously.
    pub fn publish(&mut self, ctx: &mut C, event: GameEvent) {
        let idx = event.kind().index();
        self.published[idx] += 1;
        for handler in &mut self.subscribers[idx] {
            handler(ctx, &event);
        }
    }

    /// Total events of a kind published since creation
    pub fn published(&self, kind: EventKind) -> u64 {
        self.published[kind.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_in_subscription_order() {
        let mut bus: EventBus<Vec<&'static str>> = EventBus::new();
        bus.subscribe(EventKind::PaddleHit, |log, _| log.push("first"));
        bus.subscribe(EventKind::PaddleHit, |log, _| log.push("second"));
        bus.subscribe(EventKind::BallMissed, |log, _| log.push("missed"));

        let mut log = Vec::new();
        bus.publish(&mut log, GameEvent::PaddleHit { ball: 1, paddle: 2 });
        assert_eq!(log, vec!["first", "second"]);

        bus.publish(&mut log, GameEvent::BallMissed { ball: 1 });
        assert_eq!(log, vec!["first", "second", "missed"]);
    }

    #[test]
    fn test_payload_reaches_handler() {
        let mut bus: EventBus<Vec<EntityId>> = EventBus::new();
        bus.subscribe(EventKind::BlockDestroyed, |seen, event| {
            if let GameEvent::BlockDestroyed { block } = event {
                seen.push(*block);
            }
        });

        let mut seen = Vec::new();
        bus.publish(&mut seen, GameEvent::BlockDestroyed { block: 7 });
        bus.publish(&mut seen, GameEvent::BlockDestroyed { block: 9 });
        assert_eq!(seen, vec![7, 9]);
    }

    #[test]
    fn test_publish_counters() {
        let mut bus: EventBus<()> = EventBus::new();
        // Publishing without subscribers still counts
        bus.publish(&mut (), GameEvent::PauseToggled { paused: true });
        bus.publish(&mut (), GameEvent::PauseToggled { paused: false });
        assert_eq!(bus.published(EventKind::PauseToggled), 2);
        assert_eq!(bus.published(EventKind::BlockDestroyed), 0);
    }
}
