//! The per-round countdown.

use core::time::Duration;

use crate::schedule::{Scheduler, Timer, TimerId};

/// Result of handling one clock tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The countdown moved to the contained value and the next tick is armed.
    Counted(u8),
    /// The countdown ran out; the clock has stopped and cards should flip.
    Expired,
}

/// A cancelable, resumable countdown ticking once per period.
///
/// The clock owns the countdown value and at most one pending [`Timer::Tick`].
#[derive(Debug, Clone)]
pub struct RoundClock {
    start_value: u8,
    countdown: u8,
    interval: Duration,
    max_rounds: u8,
    pending: Option<TimerId>,
}

impl RoundClock {
    /// Creates a stopped clock showing `start_value`.
    #[must_use]
    pub const fn new(start_value: u8, interval: Duration, max_rounds: u8) -> Self {
        Self {
            start_value,
            countdown: start_value,
            interval,
            max_rounds,
            pending: None,
        }
    }

    /// Returns the seconds left before the reveal.
    #[must_use]
    pub const fn countdown(&self) -> u8 {
        self.countdown
    }

    /// Returns the value the countdown restarts from.
    #[must_use]
    pub const fn start_value(&self) -> u8 {
        self.start_value
    }

    /// Returns whether a tick is pending.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Puts the countdown back to its start value.
    pub const fn rewind(&mut self) {
        self.countdown = self.start_value;
    }

    /// Sets the countdown to zero, as while cards are revealed.
    pub const fn clear(&mut self) {
        self.countdown = 0;
    }

    /// Starts ticking.
    ///
    /// Does nothing if the clock is already running, `round` is past the last
    /// round, or the countdown is already at zero. Returns whether a tick was
    /// armed. The round bound matters when the clock is driven on its own; a
    /// [`Game`](crate::Game) stops arming once it leaves the counting phase.
    pub fn start<S: Scheduler>(&mut self, round: u8, generation: u64, scheduler: &mut S) -> bool {
        if self.is_running() || round >= self.max_rounds || self.countdown == 0 {
            return false;
        }

        self.arm(generation, scheduler);
        true
    }

    /// Cancels the pending tick, if any.
    pub fn stop<S: Scheduler>(&mut self, scheduler: &mut S) {
        if let Some(id) = self.pending.take() {
            scheduler.cancel(id);
        }
    }

    /// Handles a fired tick.
    ///
    /// Decrements while more than one second remains, otherwise stops and
    /// reports expiry. The countdown is left at 1 on expiry; the caller clears
    /// it when the cards flip.
    pub fn tick<S: Scheduler>(&mut self, generation: u64, scheduler: &mut S) -> TickOutcome {
        self.pending = None;

        if self.countdown > 1 {
            self.countdown -= 1;
            self.arm(generation, scheduler);
            TickOutcome::Counted(self.countdown)
        } else {
            TickOutcome::Expired
        }
    }

    fn arm<S: Scheduler>(&mut self, generation: u64, scheduler: &mut S) {
        let id = scheduler.schedule(self.interval, Timer::Tick { generation });
        self.pending = Some(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ManualScheduler;

    fn clock() -> RoundClock {
        RoundClock::new(5, Duration::from_secs(1), 10)
    }

    fn fire(clock: &mut RoundClock, scheduler: &mut ManualScheduler) -> Option<TickOutcome> {
        let deadline = scheduler.next_deadline()?;
        scheduler.advance_to(deadline);
        match scheduler.pop_due()? {
            Timer::Tick { generation } => Some(clock.tick(generation, scheduler)),
            _ => None,
        }
    }

    #[test]
    fn counts_down_then_expires() {
        let mut scheduler = ManualScheduler::new();
        let mut clock = clock();
        assert!(clock.start(0, 0, &mut scheduler));

        for expected in [4, 3, 2, 1] {
            assert_eq!(
                fire(&mut clock, &mut scheduler),
                Some(TickOutcome::Counted(expected))
            );
        }
        assert_eq!(fire(&mut clock, &mut scheduler), Some(TickOutcome::Expired));
        assert!(!clock.is_running());
        assert_eq!(scheduler.now(), Duration::from_secs(5));
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn start_is_idempotent() {
        let mut scheduler = ManualScheduler::new();
        let mut clock = clock();
        assert!(clock.start(0, 0, &mut scheduler));
        assert!(!clock.start(0, 0, &mut scheduler));
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn start_refuses_after_last_round() {
        let mut scheduler = ManualScheduler::new();
        let mut clock = clock();
        assert!(!clock.start(10, 0, &mut scheduler));
        assert!(!clock.is_running());
    }

    #[test]
    fn stop_cancels_pending_tick() {
        let mut scheduler = ManualScheduler::new();
        let mut clock = clock();
        clock.start(0, 0, &mut scheduler);
        clock.stop(&mut scheduler);
        clock.stop(&mut scheduler);

        assert!(!clock.is_running());
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(clock.countdown(), 5);
    }

    #[test]
    fn cleared_clock_does_not_start() {
        let mut scheduler = ManualScheduler::new();
        let mut clock = clock();
        clock.clear();
        assert!(!clock.start(0, 0, &mut scheduler));

        clock.rewind();
        assert!(clock.start(0, 0, &mut scheduler));
    }
}
