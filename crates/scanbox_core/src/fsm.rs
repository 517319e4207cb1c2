//! State Machine Runtime
//!
//! Flat, typed state machines for page modes. A state type describes its own
//! transition table through [`StateTransitions`]; [`StateMachine`] drives it
//! and keeps a bounded transition history.

use std::fmt;
use std::hash::Hash;

/// Identifier for an event type
pub type EventId = u32;

/// Transition table implemented by a state enum.
///
/// ```rust
/// use scanbox_core::fsm::{EventId, StateTransitions};
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// enum Lamp { Off, On }
///
/// const TOGGLE: EventId = 1;
///
/// impl StateTransitions for Lamp {
///     fn on_event(&self, event: EventId) -> Option<Self> {
///         match (self, event) {
///             (Lamp::Off, TOGGLE) => Some(Lamp::On),
///             (Lamp::On, TOGGLE) => Some(Lamp::Off),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventId) -> Option<Self>;
}

const DEFAULT_HISTORY_LIMIT: usize = 64;

/// A state machine instance
pub struct StateMachine<S: StateTransitions> {
    current: S,
    /// Most recent transitions, oldest first
    history: Vec<(S, EventId, S)>,
    history_limit: usize,
}

impl<S: StateTransitions> StateMachine<S> {
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            history: Vec::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Builder: cap the number of retained history entries (minimum 1)
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.max(1);
        self
    }

    /// Get the current state
    pub fn current(&self) -> S {
        self.current
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current == state
    }

    /// Send an event. Returns the new state when a transition happened.
    pub fn send(&mut self, event: EventId) -> Option<S> {
        let from = self.current;
        let to = from.on_event(event)?;

        self.current = to;
        if self.history.len() == self.history_limit {
            self.history.remove(0);
        }
        self.history.push((from, event, to));
        tracing::debug!(?from, ?to, event, "state transition");

        Some(to)
    }

    /// Get transition history
    pub fn history(&self) -> &[(S, EventId, S)] {
        &self.history
    }
}

impl<S: StateTransitions> fmt::Debug for StateMachine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("current", &self.current)
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum Section {
        Above,
        Inside,
        Below,
    }

    const SCROLL_IN: EventId = 1;
    const SCROLL_PAST: EventId = 2;
    const SCROLL_BACK: EventId = 3;

    impl StateTransitions for Section {
        fn on_event(&self, event: EventId) -> Option<Self> {
            match (self, event) {
                (Section::Above, SCROLL_IN) => Some(Section::Inside),
                (Section::Inside, SCROLL_PAST) => Some(Section::Below),
                (Section::Below, SCROLL_BACK) => Some(Section::Inside),
                (Section::Inside, SCROLL_BACK) => Some(Section::Above),
                _ => None,
            }
        }
    }

    #[test]
    fn test_simple_transitions() {
        let mut fsm = StateMachine::new(Section::Above);
        assert_eq!(fsm.current(), Section::Above);

        assert_eq!(fsm.send(SCROLL_IN), Some(Section::Inside));
        assert_eq!(fsm.send(SCROLL_PAST), Some(Section::Below));
        assert_eq!(fsm.send(SCROLL_BACK), Some(Section::Inside));
        assert_eq!(fsm.send(SCROLL_BACK), Some(Section::Above));
        assert!(fsm.is_in(Section::Above));
    }

    #[test]
    fn test_invalid_event_no_transition() {
        let mut fsm = StateMachine::new(Section::Above);

        assert_eq!(fsm.send(SCROLL_PAST), None);
        assert_eq!(fsm.current(), Section::Above);
        assert!(fsm.history().is_empty());
    }

    #[test]
    fn test_history() {
        let mut fsm = StateMachine::new(Section::Above);
        fsm.send(SCROLL_IN);
        fsm.send(SCROLL_PAST);

        let history = fsm.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], (Section::Above, SCROLL_IN, Section::Inside));
        assert_eq!(history[1], (Section::Inside, SCROLL_PAST, Section::Below));
    }

    #[test]
    fn test_history_limit_drops_oldest() {
        let mut fsm = StateMachine::new(Section::Above).with_history_limit(2);
        fsm.send(SCROLL_IN);
        fsm.send(SCROLL_PAST);
        fsm.send(SCROLL_BACK);

        let history = fsm.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].0, Section::Inside);
        assert_eq!(history[1], (Section::Below, SCROLL_BACK, Section::Inside));
    }
}
