//! Cooperative one-shot timer queue.
//!
//! Tasks are plain values handed back to the owner when their deadline has
//! passed; the owner runs them one at a time on its own thread. Periodic
//! work re-arms itself from its handler with `schedule_after`. Time comes
//! from a [`Clock`], so tests can drive the queue with a [`ManualClock`].

use std::cell::Cell;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of monotonic time, measured from an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall-clock backed monotonic time.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Virtual time that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

struct Timer<T> {
    deadline: Duration,
    seq: u64,
    task: T,
}

// Reversed so the std max-heap pops the earliest deadline first; `seq`
// keeps registration order among equal deadlines.
impl<T> Ord for Timer<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<T> PartialOrd for Timer<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> PartialEq for Timer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl<T> Eq for Timer<T> {}

/// Priority queue of one-shot timers.
pub struct Scheduler<T> {
    clock: Box<dyn Clock>,
    queue: BinaryHeap<Timer<T>>,
    next_seq: u64,
    stopped: bool,
}

impl<T> Scheduler<T> {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            clock,
            queue: BinaryHeap::new(),
            next_seq: 0,
            stopped: false,
        }
    }

    /// Current time on the scheduler's clock.
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Registers `task` to fire no earlier than `delay` from now.
    ///
    /// Ignored after [`Scheduler::shutdown`].
    pub fn schedule_after(&mut self, delay: Duration, task: T) {
        if self.stopped {
            return;
        }
        let deadline = self.now().saturating_add(delay);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Timer {
            deadline,
            seq,
            task,
        });
    }

    /// Removes and returns the earliest task whose deadline has passed.
    pub fn pop_due(&mut self) -> Option<T> {
        let now = self.now();
        match self.queue.peek() {
            Some(timer) if timer.deadline <= now => self.queue.pop().map(|t| t.task),
            _ => None,
        }
    }

    /// Time left until the earliest deadline (zero if overdue).
    pub fn time_until_next(&self) -> Option<Duration> {
        let now = self.now();
        self.queue
            .peek()
            .map(|timer| timer.deadline.saturating_sub(now))
    }

    /// Pending tasks, in no particular order.
    pub fn pending(&self) -> impl Iterator<Item = &T> {
        self.queue.iter().map(|timer| &timer.task)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Discards every pending timer and refuses new ones.
    pub fn shutdown(&mut self) {
        self.queue.clear();
        self.stopped = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> (Rc<ManualClock>, Scheduler<&'static str>) {
        let clock = Rc::new(ManualClock::new());
        let scheduler = Scheduler::new(Box::new(Rc::clone(&clock)));
        (clock, scheduler)
    }

    #[test]
    fn test_never_fires_early() {
        let (clock, mut sched) = scheduler();
        sched.schedule_after(Duration::from_millis(600), "metrics");

        assert_eq!(sched.pop_due(), None);
        clock.advance(Duration::from_millis(599));
        assert_eq!(sched.pop_due(), None);
        assert_eq!(sched.time_until_next(), Some(Duration::from_millis(1)));

        clock.advance(Duration::from_millis(1));
        assert_eq!(sched.pop_due(), Some("metrics"));
        assert!(sched.is_empty());
    }

    #[test]
    fn test_fires_in_deadline_then_registration_order() {
        let (clock, mut sched) = scheduler();
        sched.schedule_after(Duration::from_secs(2), "late");
        sched.schedule_after(Duration::from_secs(1), "first");
        sched.schedule_after(Duration::from_secs(1), "second");

        clock.advance(Duration::from_secs(5));
        assert_eq!(sched.pop_due(), Some("first"));
        assert_eq!(sched.pop_due(), Some("second"));
        assert_eq!(sched.pop_due(), Some("late"));
        assert_eq!(sched.pop_due(), None);
    }

    #[test]
    fn test_rearm_is_relative_to_firing_time() {
        let (clock, mut sched) = scheduler();
        sched.schedule_after(Duration::from_secs(1), "tick");
        clock.advance(Duration::from_secs(3));

        let task = sched.pop_due().unwrap();
        sched.schedule_after(Duration::from_secs(2), task);
        assert_eq!(sched.time_until_next(), Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_overdue_timer_reports_zero_wait() {
        let (clock, mut sched) = scheduler();
        sched.schedule_after(Duration::from_secs(1), "x");
        clock.advance(Duration::from_secs(10));
        assert_eq!(sched.time_until_next(), Some(Duration::ZERO));
    }

    #[test]
    fn test_shutdown_discards_and_rejects_timers() {
        let (clock, mut sched) = scheduler();
        sched.schedule_after(Duration::ZERO, "a");
        sched.schedule_after(Duration::from_secs(1), "b");
        sched.shutdown();

        assert!(sched.is_empty());
        sched.schedule_after(Duration::ZERO, "c");
        clock.advance(Duration::from_secs(2));
        assert_eq!(sched.pop_due(), None);
        assert_eq!(sched.time_until_next(), None);
    }
}
