//! Cancellable scheduled callbacks.
//!
//! Controls never block waiting for time to pass. Instead they park a payload
//! in a [`TimerQueue`] with a deadline and the host's frame loop pumps the
//! queue with the current time. Every scheduled entry is addressed by a
//! [`TimerKey`]; cancelling the key guarantees the payload is never delivered,
//! and a key that was already fired or cancelled is simply stale.
//!
//! ```
//! use std::time::Duration;
//! use glide_ui::{Instant, timer::TimerQueue};
//!
//! let start = Instant::now();
//! let mut timers = TimerQueue::new();
//! let first = timers.schedule(start + Duration::from_millis(30), "first");
//! timers.schedule(start + Duration::from_millis(10), "second");
//! timers.cancel(first);
//!
//! let fired: Vec<_> = timers
//!     .drain_due(start + Duration::from_millis(50))
//!     .into_iter()
//!     .map(|(_, payload)| payload)
//!     .collect();
//! assert_eq!(fired, vec!["second"]);
//! ```

use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

use crate::Instant;

new_key_type! {
    /// Handle to a scheduled entry in a [`TimerQueue`].
    pub struct TimerKey;
}

#[derive(Debug)]
struct Timer<T> {
    deadline: Instant,
    /// Insertion order, used to break deadline ties.
    seq: u64,
    payload: T,
}

/// A queue of payloads waiting for their deadline.
#[derive(Debug)]
pub struct TimerQueue<T> {
    timers: SlotMap<TimerKey, Timer<T>>,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            next_seq: 0,
        }
    }

    /// Schedules `payload` to fire once `deadline` is reached.
    pub fn schedule(&mut self, deadline: Instant, payload: T) -> TimerKey {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.insert(Timer {
            deadline,
            seq,
            payload,
        })
    }

    /// Cancels a scheduled entry, returning its payload if it was still
    /// pending.
    pub fn cancel(&mut self, key: TimerKey) -> Option<T> {
        self.timers.remove(key).map(|timer| timer.payload)
    }

    /// Deadline of a pending entry.
    pub fn deadline(&self, key: TimerKey) -> Option<Instant> {
        self.timers.get(key).map(|timer| timer.deadline)
    }

    /// Removes and returns every entry whose deadline is at or before `now`,
    /// ordered by deadline and then by scheduling order.
    pub fn drain_due(&mut self, now: Instant) -> SmallVec<[(TimerKey, T); 2]> {
        let mut due: SmallVec<[(TimerKey, Instant, u64); 2]> = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.deadline <= now)
            .map(|(key, timer)| (key, timer.deadline, timer.seq))
            .collect();
        due.sort_by(|a, b| a.1.cmp(&b.1).then(a.2.cmp(&b.2)));

        due.into_iter()
            .filter_map(|(key, _, _)| self.timers.remove(key).map(|timer| (key, timer.payload)))
            .collect()
    }

    /// Drops every pending entry.
    pub fn clear(&mut self) {
        self.timers.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn entries_fire_in_deadline_then_schedule_order() {
        let start = Instant::now();
        let mut timers = TimerQueue::new();
        timers.schedule(start + Duration::from_millis(20), 'c');
        timers.schedule(start + Duration::from_millis(10), 'a');
        timers.schedule(start + Duration::from_millis(10), 'b');

        let fired: Vec<char> = timers
            .drain_due(start + Duration::from_millis(20))
            .into_iter()
            .map(|(_, c)| c)
            .collect();
        assert_eq!(fired, vec!['a', 'b', 'c']);
        assert!(timers.drain_due(start + Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn entries_wait_for_their_deadline() {
        let start = Instant::now();
        let mut timers = TimerQueue::new();
        let key = timers.schedule(start + Duration::from_millis(30), ());

        assert!(timers.drain_due(start + Duration::from_millis(29)).is_empty());
        assert_eq!(timers.deadline(key), Some(start + Duration::from_millis(30)));
        assert_eq!(timers.drain_due(start + Duration::from_millis(30)).len(), 1);
        assert_eq!(timers.deadline(key), None);
    }

    #[test]
    fn cancelled_and_fired_keys_are_stale() {
        let start = Instant::now();
        let mut timers = TimerQueue::new();
        let key = timers.schedule(start, 1);
        assert_eq!(timers.cancel(key), Some(1));
        assert_eq!(timers.cancel(key), None);
        assert!(timers.drain_due(start).is_empty());

        let reused = timers.schedule(start, 2);
        assert_ne!(key, reused);
        assert_eq!(timers.cancel(key), None);
        assert_eq!(timers.deadline(reused), Some(start));
    }
}
