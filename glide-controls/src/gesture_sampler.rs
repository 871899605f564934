//! Rate limiting of continuous pointer positions.
//!
//! A drag can report positions far faster than the value needs to follow
//! them. [`GestureSampler`] lets the first position after an idle period
//! through immediately and afterwards processes at most one position per
//! interval. Positions that arrive inside a closed window collapse into a
//! single pending slot holding the most recent one, and a trailing timer
//! delivers that slot once the window elapses, so the last position of a
//! burst is never lost.
//!
//! The trailing timer lives in a [`TimerQueue`] that the host pumps through
//! [`GestureSampler::poll`]. Ending a gesture either flushes the pending
//! position ([`GestureSampler::flush`]) or discards it
//! ([`GestureSampler::cancel`]); both cancel the timer, so a stale delivery
//! can never reach a later gesture.
//!
//! ```
//! use std::time::Duration;
//! use glide_controls::gesture_sampler::GestureSampler;
//! use glide_ui::{Instant, PxPosition};
//!
//! let start = Instant::now();
//! let mut sampler = GestureSampler::new(Duration::from_millis(30));
//!
//! assert!(sampler.sample(PxPosition::from_raw(1, 0), start).is_some());
//! assert!(sampler.sample(PxPosition::from_raw(2, 0), start + Duration::from_millis(5)).is_none());
//! assert!(sampler.sample(PxPosition::from_raw(3, 0), start + Duration::from_millis(9)).is_none());
//!
//! let trailing = sampler.poll(start + Duration::from_millis(30));
//! assert_eq!(trailing, Some(PxPosition::from_raw(3, 0)));
//! ```

use std::time::Duration;

use glide_ui::{Instant, PxPosition, TimerKey, TimerQueue};
use tracing::trace;

/// Default minimum interval between processed samples.
pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_millis(30);

/// Longest interval a slider accepts. A drag throttled any harder no longer
/// follows the pointer.
pub const MAX_SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy)]
struct PendingSample {
    position: PxPosition,
    /// `None` when the window end is not representable; the sample then
    /// waits for the next open window or a flush.
    timer: Option<TimerKey>,
}

/// Throttles a stream of positions with leading and trailing delivery.
#[derive(Debug)]
pub struct GestureSampler {
    interval: Duration,
    last_processed: Option<Instant>,
    pending: Option<PendingSample>,
    timers: TimerQueue<()>,
}

impl Default for GestureSampler {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_INTERVAL)
    }
}

impl GestureSampler {
    /// Creates a sampler processing at most one position per `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_processed: None,
            pending: None,
            timers: TimerQueue::new(),
        }
    }

    /// The configured interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a position is waiting for its trailing delivery.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending position will be delivered, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.and_then(|pending| self.timers.deadline(pending.timer?))
    }

    /// Offers a position observed at `now`.
    ///
    /// Returns the position when it should be processed right away. Otherwise
    /// it replaces the pending position and `None` is returned.
    pub fn sample(&mut self, position: PxPosition, now: Instant) -> Option<PxPosition> {
        match self.last_processed {
            Some(last) if now.saturating_duration_since(last) < self.interval => {
                match self.pending.as_mut() {
                    Some(pending) => pending.position = position,
                    None => {
                        let timer = last
                            .checked_add(self.interval)
                            .map(|deadline| self.timers.schedule(deadline, ()));
                        self.pending = Some(PendingSample { position, timer });
                    }
                }
                trace!(?position, "sample deferred");
                None
            }
            _ => {
                // The window is open again; anything still pending is older
                // than this position.
                self.discard_pending();
                self.last_processed = Some(now);
                Some(position)
            }
        }
    }

    /// Fires the trailing timer if it is due, returning the pending position.
    pub fn poll(&mut self, now: Instant) -> Option<PxPosition> {
        let pending = self.pending?;
        let timer = pending.timer?;
        let fired = self.timers.drain_due(now);
        if !fired.iter().any(|(key, _)| *key == timer) {
            return None;
        }
        self.pending = None;
        self.last_processed = Some(now);
        trace!(position = ?pending.position, "trailing sample delivered");
        Some(pending.position)
    }

    /// Ends the current gesture, returning the pending position so it can be
    /// applied one last time. The next sample is processed immediately.
    pub fn flush(&mut self) -> Option<PxPosition> {
        let pending = self.pending.take();
        if let Some(timer) = pending.and_then(|pending| pending.timer) {
            self.timers.cancel(timer);
        }
        self.last_processed = None;
        pending.map(|pending| pending.position)
    }

    /// Ends the current gesture, dropping any pending position.
    pub fn cancel(&mut self) {
        self.discard_pending();
        self.timers.clear();
        self.last_processed = None;
    }

    fn discard_pending(&mut self) {
        if let Some(timer) = self.pending.take().and_then(|pending| pending.timer) {
            self.timers.cancel(timer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn at(x: i32) -> PxPosition {
        PxPosition::from_raw(x, 0)
    }

    #[test]
    fn first_sample_after_idle_is_immediate() {
        let start = Instant::now();
        let mut sampler = GestureSampler::default();
        assert_eq!(sampler.sample(at(4), start), Some(at(4)));
        assert!(!sampler.has_pending());
    }

    #[test]
    fn burst_inside_one_window_delivers_only_the_last_sample() {
        let start = Instant::now();
        let mut sampler = GestureSampler::new(ms(30));
        sampler.sample(at(0), start);

        let mut processed = Vec::new();
        for i in 1..=100 {
            let now = start + Duration::from_micros(i as u64 * 250);
            processed.extend(sampler.sample(at(i), now));
            processed.extend(sampler.poll(now));
        }
        assert!(processed.is_empty());
        assert_eq!(sampler.next_deadline(), Some(start + ms(30)));

        processed.extend(sampler.poll(start + ms(30)));
        assert_eq!(processed, vec![at(100)]);
        assert_eq!(sampler.poll(start + ms(90)), None);
    }

    #[test]
    fn sample_after_window_supersedes_unfired_trailing_delivery() {
        let start = Instant::now();
        let mut sampler = GestureSampler::new(ms(30));
        sampler.sample(at(0), start);
        sampler.sample(at(1), start + ms(10));

        // The host did not pump the timer before the next move arrived.
        assert_eq!(sampler.sample(at(2), start + ms(40)), Some(at(2)));
        assert!(!sampler.has_pending());
        assert_eq!(sampler.poll(start + ms(45)), None);
    }

    #[test]
    fn trailing_delivery_restarts_the_window() {
        let start = Instant::now();
        let mut sampler = GestureSampler::new(ms(30));
        sampler.sample(at(0), start);
        sampler.sample(at(1), start + ms(10));
        assert_eq!(sampler.poll(start + ms(30)), Some(at(1)));

        assert_eq!(sampler.sample(at(2), start + ms(40)), None);
        assert_eq!(sampler.next_deadline(), Some(start + ms(60)));
        assert_eq!(sampler.poll(start + ms(60)), Some(at(2)));
    }

    #[test]
    fn flush_returns_pending_and_cancels_timer() {
        let start = Instant::now();
        let mut sampler = GestureSampler::new(ms(30));
        sampler.sample(at(0), start);
        sampler.sample(at(7), start + ms(3));

        assert_eq!(sampler.flush(), Some(at(7)));
        assert_eq!(sampler.poll(start + ms(100)), None);
        assert_eq!(sampler.flush(), None);
        assert_eq!(sampler.sample(at(8), start + ms(4)), Some(at(8)));
    }

    #[test]
    fn unrepresentable_window_end_waits_for_flush() {
        let start = Instant::now();
        let mut sampler = GestureSampler::new(Duration::MAX);
        assert_eq!(sampler.sample(at(0), start), Some(at(0)));
        assert_eq!(sampler.sample(at(6), start + ms(1)), None);
        assert_eq!(sampler.sample(at(9), start + ms(2)), None);

        assert_eq!(sampler.next_deadline(), None);
        assert_eq!(sampler.poll(start + ms(500)), None);
        assert_eq!(sampler.flush(), Some(at(9)));
    }

    #[test]
    fn cancel_discards_pending() {
        let start = Instant::now();
        let mut sampler = GestureSampler::new(ms(30));
        sampler.sample(at(0), start);
        sampler.sample(at(5), start + ms(1));

        sampler.cancel();
        assert!(!sampler.has_pending());
        assert_eq!(sampler.next_deadline(), None);
        assert_eq!(sampler.poll(start + ms(100)), None);
    }
}
