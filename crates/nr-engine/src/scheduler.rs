//! Deterministic task scheduler
//!
//! A single-threaded virtual-time queue. The session schedules settlement
//! and auto-spin continuations here instead of against wall-clock timers,
//! so tests and headless simulation advance time explicitly and replay
//! byte-for-byte. Tasks due at the same instant run in scheduling order.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Work the session defers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Evaluate and pay the pending spin.
    Settle,
    /// Attempt the next automatic spin, if `generation` is still live.
    AutoSpinContinue { generation: u64 },
}

#[derive(Debug, PartialEq, Eq)]
struct Scheduled {
    due_ms: u64,
    seq: u64,
    task: Task,
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.due_ms, self.seq).cmp(&(other.due_ms, other.seq))
    }
}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Virtual-time task queue.
#[derive(Debug, Default)]
pub struct Scheduler {
    now_ms: u64,
    seq: u64,
    queue: BinaryHeap<Reverse<Scheduled>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Enqueue `task` to run `delay_ms` from now.
    pub fn schedule_in(&mut self, delay_ms: u64, task: Task) {
        let due_ms = self.now_ms.saturating_add(delay_ms);
        self.queue.push(Reverse(Scheduled {
            due_ms,
            seq: self.seq,
            task,
        }));
        self.seq += 1;
    }

    /// When the next task is due, if any.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.queue.peek().map(|Reverse(s)| s.due_ms)
    }

    /// Pop the next task due at or before `now_ms`, advancing the clock to
    /// the task's due time.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Task> {
        let due = self.next_due_ms()?;
        if due > now_ms {
            return None;
        }
        self.now_ms = self.now_ms.max(due);
        self.queue.pop().map(|Reverse(s)| s.task)
    }

    /// Advance the clock without running anything.
    pub fn advance_clock(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }
}
