//! Timer plumbing between the animation driver and its host.
//!
//! The driver never owns a thread or an event loop. It asks a [`Scheduler`]
//! for a repeating timer when a law becomes active and cancels it on teardown;
//! the host then calls back into the driver with the [`TimerId`] of each tick.
//!
//! [`ManualScheduler`] is the bookkeeping-only scheduler for hosts that fire
//! ticks themselves. [`IntervalClock`] paces ticks on the wall clock.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Identifier of a repeating timer handed out by a [`Scheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Starts and cancels repeating timers on behalf of the driver.
pub trait Scheduler {
    /// Starts a timer that fires every `interval`.
    fn start(&mut self, interval: Duration) -> TimerId;

    /// Cancels a timer. Cancelling an unknown or already-cancelled timer is a no-op.
    fn cancel(&mut self, timer: TimerId);
}

/// Scheduler that only records which timers are live.
///
/// Ids are never reused, so a tick carrying a cancelled id can always be told
/// apart from the current timer.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    active: BTreeMap<TimerId, Duration>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of timers currently running.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn is_active(&self, timer: TimerId) -> bool {
        self.active.contains_key(&timer)
    }

    /// Live timers with their intervals, oldest first.
    pub fn active(&self) -> impl Iterator<Item = (TimerId, Duration)> + '_ {
        self.active.iter().map(|(&id, &interval)| (id, interval))
    }
}

impl Scheduler for ManualScheduler {
    fn start(&mut self, interval: Duration) -> TimerId {
        let id = TimerId::new(self.next_id);
        self.next_id += 1;
        self.active.insert(id, interval);
        log::debug!("timer {} started ({interval:?})", id.0);
        id
    }

    fn cancel(&mut self, timer: TimerId) {
        if self.active.remove(&timer).is_some() {
            log::debug!("timer {} cancelled", timer.0);
        }
    }
}

/// Wall-clock pacing for a fixed interval.
///
/// `wait` blocks until the next deadline. If the caller overran the deadline
/// the tick is due immediately and pacing restarts from now, so a slow frame
/// delays the following ticks instead of causing a burst of catch-up ticks.
#[derive(Debug)]
pub struct IntervalClock {
    interval: Duration,
    next: Instant,
}

impl IntervalClock {
    /// A clock whose first tick is due immediately.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: Instant::now(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time left until the next tick, zero if it is already due.
    pub fn remaining(&self) -> Duration {
        self.next.saturating_duration_since(Instant::now())
    }

    /// Sleeps until the next tick is due and schedules the one after it.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if let Some(left) = self.next.checked_duration_since(now) {
            std::thread::sleep(left);
            self.next += self.interval;
        } else {
            self.next = now + self.interval;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_hands_out_distinct_ids() {
        let mut s = ManualScheduler::new();
        let a = s.start(Duration::from_millis(10));
        let b = s.start(Duration::from_millis(20));
        assert_ne!(a, b);
        assert_eq!(s.active_count(), 2);
    }

    #[test]
    fn cancel_removes_only_that_timer() {
        let mut s = ManualScheduler::new();
        let a = s.start(Duration::from_millis(10));
        let b = s.start(Duration::from_millis(20));
        s.cancel(a);
        assert!(!s.is_active(a));
        assert!(s.is_active(b));
        assert_eq!(s.active().collect::<Vec<_>>(), vec![(b, Duration::from_millis(20))]);
    }

    #[test]
    fn cancel_twice_is_noop() {
        let mut s = ManualScheduler::new();
        let a = s.start(Duration::from_millis(10));
        s.cancel(a);
        s.cancel(a);
        assert_eq!(s.active_count(), 0);
    }

    #[test]
    fn ids_are_not_reused_after_cancel() {
        let mut s = ManualScheduler::new();
        let a = s.start(Duration::from_millis(10));
        s.cancel(a);
        let b = s.start(Duration::from_millis(10));
        assert_ne!(a, b);
        assert!(b.raw() > a.raw());
    }

    #[test]
    fn clock_first_tick_is_immediate() {
        let clock = IntervalClock::new(Duration::from_millis(200));
        assert_eq!(clock.remaining(), Duration::ZERO);
    }

    #[test]
    fn clock_waits_roughly_one_interval() {
        let mut clock = IntervalClock::new(Duration::from_millis(5));
        let start = Instant::now();
        clock.wait();
        clock.wait();
        clock.wait();
        assert!(start.elapsed() >= Duration::from_millis(10));
    }

    #[test]
    fn clock_overrun_does_not_burst() {
        let mut clock = IntervalClock::new(Duration::from_millis(50));
        clock.wait();
        std::thread::sleep(Duration::from_millis(80));
        clock.wait();
        assert!(
            clock.remaining() > Duration::ZERO,
            "after an overrun the next tick should be a full interval away"
        );
    }
}
