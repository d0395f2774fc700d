//! Debounce on top of [`Scheduler`]: a burst of signals collapses into one
//! call, fired `wait` ms after the last signal (trailing edge) or at the
//! first signal of the burst (leading edge, `immediate`).

use crate::scheduler::{Scheduler, TaskId};

#[derive(Debug, Clone)]
pub struct Debouncer {
    wait: u64,
    immediate: bool,
    pending: Option<TaskId>,
}

impl Debouncer {
    pub fn trailing(wait: u64) -> Self {
        Self {
            wait,
            immediate: false,
            pending: None,
        }
    }

    pub fn leading(wait: u64) -> Self {
        Self {
            wait,
            immediate: true,
            pending: None,
        }
    }

    /// Register a signal at `now`. Any pending settle task is cancelled and
    /// `task` is scheduled `wait` ms out. Returns true when the caller should
    /// run the debounced call right away (leading edge of a burst).
    pub fn signal<T>(&mut self, scheduler: &mut Scheduler<T>, now: u64, task: T) -> bool {
        let call_now = self.immediate && self.pending.is_none();
        if let Some(id) = self.pending.take() {
            scheduler.cancel(id);
        }
        self.pending = Some(scheduler.schedule_after(now, self.wait, task));
        call_now
    }

    /// The settle task fired. Returns true when the caller should run the
    /// debounced call now (trailing edge).
    pub fn settle(&mut self) -> bool {
        self.pending = None;
        !self.immediate
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(s: &mut Scheduler<&'static str>, d: &mut Debouncer, now: u64) -> usize {
        let mut calls = 0;
        while let Some((_, _task)) = s.pop_due(now) {
            if d.settle() {
                calls += 1;
            }
        }
        calls
    }

    #[test]
    fn test_trailing_collapses_burst() {
        let mut s = Scheduler::new();
        let mut d = Debouncer::trailing(250);
        assert!(!d.signal(&mut s, 0, "settle"));
        assert!(!d.signal(&mut s, 100, "settle"));
        assert!(!d.signal(&mut s, 200, "settle"));
        assert_eq!(s.len(), 1, "earlier settle tasks are cancelled");
        assert_eq!(drain(&mut s, &mut d, 449), 0);
        assert_eq!(s.next_wake(), Some(450));
        assert_eq!(drain(&mut s, &mut d, 450), 1);
        assert!(!d.is_pending());
    }

    #[test]
    fn test_trailing_separate_bursts() {
        let mut s = Scheduler::new();
        let mut d = Debouncer::trailing(250);
        d.signal(&mut s, 0, "settle");
        assert_eq!(drain(&mut s, &mut d, 250), 1);
        d.signal(&mut s, 1000, "settle");
        assert_eq!(drain(&mut s, &mut d, 1250), 1);
    }

    #[test]
    fn test_leading_fires_once_per_burst() {
        let mut s = Scheduler::new();
        let mut d = Debouncer::leading(250);
        assert!(d.signal(&mut s, 0, "settle"));
        assert!(!d.signal(&mut s, 100, "settle"));
        assert_eq!(drain(&mut s, &mut d, 350), 0, "no trailing call in leading mode");
        assert!(d.signal(&mut s, 400, "settle"), "new burst fires again");
    }
}
