//! Finite state machines for widget interaction states
//!
//! A state enum implements [`StateTransitions`]; [`StateMachine`] holds the
//! current state and applies events to it.
//!
//! ```rust
//! use strata_core::events::event_types::*;
//! use strata_core::fsm::{StateMachine, StateTransitions};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
//! enum Button {
//!     #[default]
//!     Idle,
//!     Pressed,
//! }
//!
//! impl StateTransitions for Button {
//!     fn on_event(&self, event: u32) -> Option<Self> {
//!         match (self, event) {
//!             (Button::Idle, POINTER_DOWN) => Some(Button::Pressed),
//!             (Button::Pressed, POINTER_UP) => Some(Button::Idle),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut fsm = StateMachine::new(Button::Idle);
//! assert!(fsm.send(POINTER_DOWN));
//! assert_eq!(fsm.state(), Button::Pressed);
//! ```

use std::hash::Hash;

use crate::events::EventType;

/// Trait for state types that handle event transitions
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventType) -> Option<Self>;
}

/// Current state of a [`StateTransitions`] type
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateMachine<S: StateTransitions> {
    state: S,
}

impl<S: StateTransitions> StateMachine<S> {
    pub fn new(initial: S) -> Self {
        Self { state: initial }
    }

    pub fn state(&self) -> S {
        self.state
    }

    /// Apply an event; returns true when the state changed
    pub fn send(&mut self, event: EventType) -> bool {
        match self.state.on_event(event) {
            Some(next) if next != self.state => {
                tracing::trace!(from = ?self.state, to = ?next, event, "state transition");
                self.state = next;
                true
            }
            _ => false,
        }
    }
}

impl<S: StateTransitions + Default> Default for StateMachine<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

/// A no-op state type for elements without interaction states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NoState;

impl StateTransitions for NoState {
    fn on_event(&self, _event: EventType) -> Option<Self> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::event_types;

    #[test]
    fn test_no_state_never_transitions() {
        let mut fsm = StateMachine::new(NoState);
        assert!(!fsm.send(event_types::POINTER_DOWN));
        assert_eq!(fsm.state(), NoState);
    }
}
