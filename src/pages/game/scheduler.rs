use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
};

#[derive(Debug)]
struct Timer<T> {
    due: u64,
    seq: u64,
    task: T,
}

impl<T> PartialEq for Timer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<T> Eq for Timer<T> {}

impl<T> PartialOrd for Timer<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Timer<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

/// One-shot timers on a millisecond clock.
///
/// Timers fire in due order, ties in the order they were armed. While a timer is being handled the clock reads its
/// due time, so a task that re-arms itself keeps an exact cadence no matter how coarse `pop_due` calls are.
#[derive(Debug)]
pub struct Scheduler<T> {
    now: u64,
    seq: u64,
    timers: BinaryHeap<Reverse<Timer<T>>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Scheduler { now: 0, seq: 0, timers: BinaryHeap::new() }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    /// Arms `task` to fire `delay_ms` after the current clock reading.
    pub fn after(&mut self, delay_ms: u64, task: T) {
        let timer = Timer { due: self.now + delay_ms, seq: self.seq, task };
        self.seq += 1;
        self.timers.push(Reverse(timer));
    }

    /// Pops the earliest timer due at or before `until`, moving the clock to its due time.
    pub fn pop_due(&mut self, until: u64) -> Option<T> {
        let due = self.timers.peek().map(|Reverse(timer)| timer.due)?;
        if due > until {
            return None;
        }
        let Reverse(timer) = self.timers.pop()?;
        self.now = self.now.max(timer.due);
        Some(timer.task)
    }

    /// Moves the clock forward once every timer up to `until` has been handled.
    pub fn settle(&mut self, until: u64) {
        self.now = self.now.max(until);
    }

    pub fn next_due(&self) -> Option<u64> {
        self.timers.peek().map(|Reverse(timer)| timer.due)
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
