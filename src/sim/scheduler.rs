//! Virtual clock and tick queue
//!
//! All timing runs on one millisecond timeline advanced by the host. Timers
//! fire in due order; timers due at the same instant fire in the order they
//! were scheduled. Recurring loops are not rescheduled here: the handler of a
//! tick decides whether its loop continues, so a stale tick can simply return.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Which cadence a timer belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Global spawn cadence
    Spawn,
    /// Central collision/motion poll over every falling entity
    CollisionPoll,
}

/// A pending tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    pub due_ms: u64,
    seq: u64,
    pub kind: TimerKind,
}

impl Ord for Timer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due_ms
            .cmp(&other.due_ms)
            .then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Timer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Tick queue with bulk cancellation
#[derive(Debug, Clone)]
pub struct Scheduler {
    now_ms: u64,
    next_seq: u64,
    queue: BinaryHeap<Reverse<Timer>>,
    spawn_period_ms: u64,
    poll_period_ms: u64,
}

impl Scheduler {
    pub fn new(spawn_period_ms: u64, poll_period_ms: u64) -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            queue: BinaryHeap::new(),
            spawn_period_ms: spawn_period_ms.max(1),
            poll_period_ms: poll_period_ms.max(1),
        }
    }

    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn poll_period_ms(&self) -> u64 {
        self.poll_period_ms
    }

    /// Queue the next spawn tick one period from now.
    /// Returns false if a spawn tick is already pending.
    pub fn schedule_spawn_loop(&mut self) -> bool {
        self.schedule_once(TimerKind::Spawn, self.spawn_period_ms)
    }

    /// Queue the next poll tick one period from now.
    /// Returns false if a poll tick is already pending.
    pub fn schedule_collision_poll(&mut self) -> bool {
        self.schedule_once(TimerKind::CollisionPoll, self.poll_period_ms)
    }

    /// Ticks that would fall past the end of the clock are never queued
    fn schedule_once(&mut self, kind: TimerKind, delay_ms: u64) -> bool {
        if self.is_pending(kind) {
            return false;
        }
        let Some(due_ms) = self.now_ms.checked_add(delay_ms) else {
            log::warn!("{:?} tick past the end of the clock dropped", kind);
            return false;
        };
        let timer = Timer {
            due_ms,
            seq: self.next_seq,
            kind,
        };
        self.next_seq += 1;
        self.queue.push(Reverse(timer));
        true
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.queue.iter().any(|Reverse(t)| t.kind == kind)
    }

    /// Number of queued ticks
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Drop every queued tick
    pub fn cancel_all(&mut self) {
        if !self.queue.is_empty() {
            log::debug!("Cancelling {} pending ticks", self.queue.len());
        }
        self.queue.clear();
    }

    /// Pop the earliest tick due at or before `until_ms`, moving the clock to
    /// its due time
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Timer> {
        let due = self.queue.peek().is_some_and(|Reverse(t)| t.due_ms <= until_ms);
        if !due {
            return None;
        }
        let Reverse(timer) = self.queue.pop()?;
        self.now_ms = self.now_ms.max(timer.due_ms);
        Some(timer)
    }

    /// Move the clock forward without firing anything
    pub fn advance_clock(&mut self, to_ms: u64) {
        self.now_ms = self.now_ms.max(to_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_waits_one_period() {
        let mut sched = Scheduler::new(1000, 10);
        assert!(sched.schedule_spawn_loop());
        assert!(sched.pop_due(999).is_none());
        let timer = sched.pop_due(1000).unwrap();
        assert_eq!(timer.kind, TimerKind::Spawn);
        assert_eq!(sched.now_ms(), 1000);
    }

    #[test]
    fn test_one_loop_per_cadence() {
        let mut sched = Scheduler::new(1000, 10);
        assert!(sched.schedule_spawn_loop());
        assert!(!sched.schedule_spawn_loop());
        assert!(sched.schedule_collision_poll());
        assert!(!sched.schedule_collision_poll());
        assert_eq!(sched.pending(), 2);
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut sched = Scheduler::new(30, 10);
        sched.schedule_spawn_loop();
        sched.schedule_collision_poll();

        let mut fired = Vec::new();
        while let Some(timer) = sched.pop_due(100) {
            fired.push((timer.due_ms, timer.kind));
            // Keep the poll loop alive until the spawn fires
            if timer.kind == TimerKind::CollisionPoll && sched.is_pending(TimerKind::Spawn) {
                sched.schedule_collision_poll();
            }
        }
        assert_eq!(
            fired,
            vec![
                (10, TimerKind::CollisionPoll),
                (20, TimerKind::CollisionPoll),
                (30, TimerKind::Spawn),
                (30, TimerKind::CollisionPoll),
            ]
        );
    }

    #[test]
    fn test_same_instant_keeps_schedule_order() {
        let mut sched = Scheduler::new(10, 10);
        sched.schedule_collision_poll();
        sched.schedule_spawn_loop();
        assert_eq!(sched.pop_due(10).unwrap().kind, TimerKind::CollisionPoll);
        assert_eq!(sched.pop_due(10).unwrap().kind, TimerKind::Spawn);
    }

    #[test]
    fn test_cancel_all() {
        let mut sched = Scheduler::new(1000, 10);
        sched.schedule_spawn_loop();
        sched.schedule_collision_poll();
        sched.cancel_all();
        assert_eq!(sched.pending(), 0);
        assert!(sched.pop_due(u64::MAX).is_none());
        // Clock still moves for the host
        sched.advance_clock(5000);
        assert_eq!(sched.now_ms(), 5000);
    }

    #[test]
    fn test_no_ticks_past_end_of_clock() {
        let mut sched = Scheduler::new(1000, 10);
        sched.advance_clock(u64::MAX - 500);
        assert!(!sched.schedule_spawn_loop());
        assert!(sched.schedule_collision_poll());
        assert_eq!(sched.pop_due(u64::MAX).unwrap().due_ms, u64::MAX - 490);
        assert_eq!(sched.pending(), 0);
    }
}
