//! Synchronous gameplay event bus
//!
//! Decouples the collision/state core from its audio, visual, and UI
//! sinks. Listeners run synchronously, in registration order, on the
//! emitter's call stack; nothing here assumes async scheduling. Listeners
//! receive the event by reference and have no path back into the bus, so
//! the listener list cannot change in the middle of an emit.

use std::collections::HashMap;

/// Subscription key: one per [`GameEvent`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    BumperHit,
    SlingshotHit,
    DropTargetHit,
    DropTargetBankComplete,
    SpinnerSpin,
    RolloverLane,
    RolloverComplete,
    RampComplete,
    BallDrain,
    BallLaunch,
    PlungerReleased,
    ScoreChange,
    MultiplierChange,
    ExtraBall,
    GameOver,
    GameStart,
    TriangleBumperHit,
    RocketHit,
    ArchHit,
}

/// A gameplay event and its payload. Ephemeral; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    BumperHit { index: usize },
    SlingshotHit { index: usize },
    DropTargetHit { index: usize },
    DropTargetBankComplete,
    SpinnerSpin,
    RolloverLane { index: usize },
    RolloverComplete,
    RampComplete,
    BallDrain { balls_remaining: u32 },
    BallLaunch,
    PlungerReleased { speed: f32 },
    ScoreChange { score: u64, earned: u64 },
    MultiplierChange { multiplier: u32 },
    ExtraBall,
    GameOver { score: u64, high_score: u64 },
    GameStart,
    TriangleBumperHit { index: usize },
    RocketHit,
    ArchHit { index: usize },
}

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::BumperHit { .. } => EventKind::BumperHit,
            GameEvent::SlingshotHit { .. } => EventKind::SlingshotHit,
            GameEvent::DropTargetHit { .. } => EventKind::DropTargetHit,
            GameEvent::DropTargetBankComplete => EventKind::DropTargetBankComplete,
            GameEvent::SpinnerSpin => EventKind::SpinnerSpin,
            GameEvent::RolloverLane { .. } => EventKind::RolloverLane,
            GameEvent::RolloverComplete => EventKind::RolloverComplete,
            GameEvent::RampComplete => EventKind::RampComplete,
            GameEvent::BallDrain { .. } => EventKind::BallDrain,
            GameEvent::BallLaunch => EventKind::BallLaunch,
            GameEvent::PlungerReleased { .. } => EventKind::PlungerReleased,
            GameEvent::ScoreChange { .. } => EventKind::ScoreChange,
            GameEvent::MultiplierChange { .. } => EventKind::MultiplierChange,
            GameEvent::ExtraBall => EventKind::ExtraBall,
            GameEvent::GameOver { .. } => EventKind::GameOver,
            GameEvent::GameStart => EventKind::GameStart,
            GameEvent::TriangleBumperHit { .. } => EventKind::TriangleBumperHit,
            GameEvent::RocketHit => EventKind::RocketHit,
            GameEvent::ArchHit { .. } => EventKind::ArchHit,
        }
    }
}

/// Identifies one registration, for removal with [`GameEventBus::off`].
pub type ListenerId = u64;

type Listener = Box<dyn FnMut(&GameEvent)>;

/// Single-process publish/subscribe keyed by event kind.
#[derive(Default)]
pub struct GameEventBus {
    listeners: HashMap<EventKind, Vec<(ListenerId, Listener)>>,
    next_id: ListenerId,
}

impl GameEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Duplicate registrations are allowed; each is
    /// invoked once per emit.
    pub fn on(&mut self, kind: EventKind, listener: impl FnMut(&GameEvent) + 'static) -> ListenerId {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners
            .entry(kind)
            .or_default()
            .push((id, Box::new(listener)));
        id
    }

    /// Remove the registration with the given id. Unknown ids are ignored.
    pub fn off(&mut self, kind: EventKind, id: ListenerId) {
        if let Some(list) = self.listeners.get_mut(&kind) {
            if let Some(position) = list.iter().position(|(entry, _)| *entry == id) {
                list.remove(position);
            }
        }
    }

    /// Invoke every listener registered for the event's kind, in
    /// registration order.
    pub fn emit(&mut self, event: GameEvent) {
        if let Some(list) = self.listeners.get_mut(&event.kind()) {
            for (_, listener) in list.iter_mut() {
                listener(&event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_without_listeners_is_fine() {
        let mut bus = GameEventBus::new();
        bus.emit(GameEvent::SpinnerSpin);
    }

    #[test]
    fn test_listeners_run_in_registration_order() {
        let mut bus = GameEventBus::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order = order.clone();
            bus.on(EventKind::GameStart, move |_| {
                order.borrow_mut().push(tag);
            });
        }

        bus.emit(GameEvent::GameStart);
        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_duplicate_listeners_each_fire() {
        let mut bus = GameEventBus::new();
        let count = Rc::new(RefCell::new(0));
        for _ in 0..2 {
            let count = count.clone();
            bus.on(EventKind::ExtraBall, move |_| *count.borrow_mut() += 1);
        }

        bus.emit(GameEvent::ExtraBall);
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn test_off_removes_only_that_registration() {
        let mut bus = GameEventBus::new();
        let hits = Rc::new(RefCell::new(Vec::new()));

        let first = {
            let hits = hits.clone();
            bus.on(EventKind::BallLaunch, move |_| {
                hits.borrow_mut().push("a");
            })
        };
        {
            let hits = hits.clone();
            bus.on(EventKind::BallLaunch, move |_| {
                hits.borrow_mut().push("b");
            });
        }

        bus.off(EventKind::BallLaunch, first);
        bus.emit(GameEvent::BallLaunch);
        assert_eq!(*hits.borrow(), vec!["b"]);

        // Removing again is harmless.
        bus.off(EventKind::BallLaunch, first);
        bus.emit(GameEvent::BallLaunch);
        assert_eq!(*hits.borrow(), vec!["b", "b"]);
    }

    #[test]
    fn test_listener_sees_payload() {
        let mut bus = GameEventBus::new();
        let seen = Rc::new(RefCell::new(None));
        let sink = seen.clone();
        bus.on(EventKind::ScoreChange, move |event| {
            if let GameEvent::ScoreChange { score, earned } = event {
                *sink.borrow_mut() = Some((*score, *earned));
            }
        });

        bus.emit(GameEvent::ScoreChange {
            score: 300,
            earned: 200,
        });
        assert_eq!(*seen.borrow(), Some((300, 200)));
    }
}
