//! # Keyboard State Management
//!
//! Keys relevant to range controls and a bounded queue of key presses
//! waiting to be dispatched.

use std::collections::VecDeque;

use tracing::trace;

/// Maximum number of keyboard events to keep in the queue.
///
/// When the queue exceeds this size the oldest events are dropped.
const KEEP_EVENTS_COUNT: usize = 10;

/// Named keys a control may react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Home.
    Home,
    /// End.
    End,
    /// Space bar.
    Space,
    /// Enter / Return.
    Enter,
}

/// A key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// A named key.
    Named(NamedKey),
    /// A printable character.
    Character(char),
}

impl From<NamedKey> for Key {
    fn from(key: NamedKey) -> Self {
        Self::Named(key)
    }
}

/// Manages the event queue for keyboard input.
#[derive(Default, Debug)]
pub struct KeyboardState {
    /// Key presses in chronological order, bounded by [`KEEP_EVENTS_COUNT`].
    events: VecDeque<Key>,
}

impl KeyboardState {
    /// Adds a new key press to the end of the queue, dropping the oldest one
    /// when the queue is full.
    pub fn push_event(&mut self, event: impl Into<Key>) {
        self.events.push_back(event.into());
        if self.events.len() > KEEP_EVENTS_COUNT
            && let Some(dropped) = self.events.pop_front()
        {
            trace!(?dropped, "keyboard queue full, oldest key press dropped");
        }
    }

    /// Removes and returns all queued key presses, oldest first.
    pub fn take_events(&mut self) -> Vec<Key> {
        self.events.drain(..).collect()
    }

    /// Returns `true` when no key press is queued.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_is_bounded_and_keeps_newest() {
        let mut state = KeyboardState::default();
        for _ in 0..KEEP_EVENTS_COUNT {
            state.push_event(NamedKey::ArrowLeft);
        }
        state.push_event(NamedKey::End);

        let events = state.take_events();
        assert_eq!(events.len(), KEEP_EVENTS_COUNT);
        assert_eq!(events.last(), Some(&Key::Named(NamedKey::End)));
        assert!(state.is_empty());
    }
}
