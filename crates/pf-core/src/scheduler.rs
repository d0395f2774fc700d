//! Virtual-time one-shot timers.
//!
//! Stands in for a browser's `setTimeout`/`clearTimeout`: tasks carry a wake
//! time in ms and fire when the owner advances past it. Tasks due at the same
//! instant fire in the order they were scheduled.

use std::collections::{BTreeMap, HashMap};

/// Handle for cancelling a scheduled task. Ordered by scheduling sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

#[derive(Debug)]
pub struct Scheduler<T> {
    queue: BTreeMap<(u64, TaskId), T>,
    wake_times: HashMap<TaskId, u64>,
    next_seq: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            queue: BTreeMap::new(),
            wake_times: HashMap::new(),
            next_seq: 0,
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule_at(&mut self, when: u64, task: T) -> TaskId {
        let id = TaskId(self.next_seq);
        self.next_seq += 1;
        self.queue.insert((when, id), task);
        self.wake_times.insert(id, when);
        id
    }

    pub fn schedule_after(&mut self, now: u64, delay: u64, task: T) -> TaskId {
        self.schedule_at(now.saturating_add(delay), task)
    }

    /// Drop a pending task. Returns false if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        match self.wake_times.remove(&id) {
            Some(when) => self.queue.remove(&(when, id)).is_some(),
            None => false,
        }
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.wake_times.contains_key(&id)
    }

    /// Earliest pending wake time.
    pub fn next_wake(&self) -> Option<u64> {
        self.queue.keys().next().map(|&(when, _)| when)
    }

    /// Pop the earliest task if it is due at or before `now`.
    pub fn pop_due(&mut self, now: u64) -> Option<(u64, T)> {
        let &(when, id) = self.queue.keys().next()?;
        if when > now {
            return None;
        }
        self.wake_times.remove(&id);
        self.queue.remove(&(when, id)).map(|task| (when, task))
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
