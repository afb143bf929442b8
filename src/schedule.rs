//! Timer scheduling on the single control thread.
//!
//! Every delayed action the game takes (clock ticks, the end of a reveal,
//! restoring ducked audio) is a [`Timer`] placed on a [`Scheduler`]. The game
//! drains due timers itself, so the scheduler only decides what "now" is:
//! [`ManualScheduler`] keeps virtual time that tests advance explicitly, while
//! `SystemScheduler` follows the monotonic clock.

use alloc::vec::Vec;
use core::time::Duration;

/// Identifies a scheduled timer so it can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// A delayed action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    /// One clock period elapsed.
    Tick {
        /// Game generation the tick was armed under.
        generation: u64,
    },
    /// The post-flip display window ended.
    RevealEnd {
        /// Game generation the flip happened under.
        generation: u64,
    },
    /// The ducking window of an effect ended.
    RestoreAmbient {
        /// Duck the restore belongs to.
        duck: u64,
    },
    /// A side request ran out of time.
    SideDeadline {
        /// Request the deadline belongs to.
        request: u64,
    },
}

/// Source of time and queue of pending timers.
pub trait Scheduler {
    /// Returns the time elapsed since the scheduler's epoch.
    fn now(&self) -> Duration;

    /// Schedules `timer` to become due after `delay`.
    fn schedule(&mut self, delay: Duration, timer: Timer) -> TimerId;

    /// Cancels a pending timer.
    ///
    /// Returns `false` if the timer already fired or was cancelled.
    fn cancel(&mut self, id: TimerId) -> bool;

    /// Removes and returns the earliest timer that is due now.
    fn pop_due(&mut self) -> Option<Timer>;
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    due: Duration,
    id: TimerId,
    timer: Timer,
}

/// Pending timers ordered by deadline, ties in scheduling order.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    entries: Vec<Entry>,
    next_id: u64,
}

impl TimerQueue {
    /// Creates an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Inserts a timer due at `due`.
    pub fn push(&mut self, due: Duration, timer: Timer) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;

        // Ids grow monotonically, so inserting after every entry with an
        // equal deadline keeps ties in scheduling order.
        let index = self.entries.partition_point(|entry| entry.due <= due);
        self.entries.insert(index, Entry { due, id, timer });
        id
    }

    /// Removes a pending timer.
    pub fn remove(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Removes and returns the earliest timer due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<Timer> {
        match self.entries.first() {
            Some(entry) if entry.due <= now => Some(self.entries.remove(0).timer),
            _ => None,
        }
    }

    /// Returns the earliest deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.first().map(|entry| entry.due)
    }

    /// Returns the number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no timers are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A scheduler over virtual time.
///
/// Time only moves when [`ManualScheduler::advance_to`] is called, which lets
/// tests step through a game deterministically.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    now: Duration,
    queue: TimerQueue,
}

impl ManualScheduler {
    /// Creates a scheduler at time zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
            queue: TimerQueue::new(),
        }
    }

    /// Moves virtual time forward to `time`.
    ///
    /// Time never moves backwards; earlier values are ignored.
    pub fn advance_to(&mut self, time: Duration) {
        if time > self.now {
            self.now = time;
        }
    }

    /// Returns the earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.next_deadline()
    }

    /// Returns the number of pending timers.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl Scheduler for ManualScheduler {
    fn now(&self) -> Duration {
        self.now
    }

    fn schedule(&mut self, delay: Duration, timer: Timer) -> TimerId {
        self.queue.push(self.now + delay, timer)
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.queue.remove(id)
    }

    fn pop_due(&mut self) -> Option<Timer> {
        self.queue.pop_due(self.now)
    }
}

/// A scheduler following the monotonic system clock.
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct SystemScheduler {
    epoch: std::time::Instant,
    queue: TimerQueue,
}

#[cfg(feature = "std")]
impl SystemScheduler {
    /// Creates a scheduler whose epoch is the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            epoch: std::time::Instant::now(),
            queue: TimerQueue::new(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for SystemScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Scheduler for SystemScheduler {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    fn schedule(&mut self, delay: Duration, timer: Timer) -> TimerId {
        let due = self.now() + delay;
        self.queue.push(due, timer)
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.queue.remove(id)
    }

    fn pop_due(&mut self) -> Option<Timer> {
        let now = self.now();
        self.queue.pop_due(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn tick(generation: u64) -> Timer {
        Timer::Tick { generation }
    }

    #[test]
    fn queue_orders_by_deadline_then_insertion() {
        let mut queue = TimerQueue::new();
        queue.push(Duration::from_secs(2), tick(1));
        queue.push(Duration::from_secs(1), tick(2));
        queue.push(Duration::from_secs(2), tick(3));

        let now = Duration::from_secs(5);
        assert_eq!(queue.pop_due(now), Some(tick(2)));
        assert_eq!(queue.pop_due(now), Some(tick(1)));
        assert_eq!(queue.pop_due(now), Some(tick(3)));
        assert_eq!(queue.pop_due(now), None);
    }

    #[test]
    fn queue_holds_timers_until_due() {
        let mut queue = TimerQueue::new();
        queue.push(Duration::from_millis(1500), tick(0));
        assert_eq!(queue.pop_due(Duration::from_secs(1)), None);
        assert_eq!(queue.pop_due(Duration::from_millis(1500)), Some(tick(0)));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut scheduler = ManualScheduler::new();
        let id = scheduler.schedule(Duration::from_secs(1), tick(0));
        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));

        scheduler.advance_to(Duration::from_secs(10));
        assert_eq!(scheduler.pop_due(), None);
    }

    #[test]
    fn manual_time_is_monotonic() {
        let mut scheduler = ManualScheduler::new();
        scheduler.advance_to(Duration::from_secs(3));
        scheduler.advance_to(Duration::from_secs(1));
        assert_eq!(scheduler.now(), Duration::from_secs(3));

        scheduler.schedule(Duration::from_secs(2), tick(0));
        assert_eq!(scheduler.next_deadline(), Some(Duration::from_secs(5)));
        assert_eq!(scheduler.pending(), 1);
    }
}
