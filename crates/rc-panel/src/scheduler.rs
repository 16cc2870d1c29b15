//! Cooperative timer queue with virtual time.
//!
//! Stands in for browser timers: tasks are queued with a delay and handed
//! back in due order when the owner advances the clock. Nothing runs on its
//! own and nothing blocks.

use std::collections::BTreeMap;

/// Queue of delayed tasks ordered by due time, then by insertion.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now_ms: u64,
    next_seq: u64,
    queue: BTreeMap<(u64, u64), T>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            queue: BTreeMap::new(),
        }
    }

    /// Current scheduler time.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Queue `task` to become due `delay_ms` from now.
    pub fn schedule_in(&mut self, delay_ms: u64, task: T) {
        let due = self.now_ms.saturating_add(delay_ms);
        self.queue.insert((due, self.next_seq), task);
        self.next_seq += 1;
    }

    /// Due time of the earliest queued task.
    pub fn next_due(&self) -> Option<u64> {
        self.queue.keys().next().map(|&(due, _)| due)
    }

    /// Remove the earliest task due at or before `until_ms`, moving the clock
    /// to its due time.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<T> {
        let due = self.next_due()?;
        if due > until_ms {
            return None;
        }
        let (_, task) = self.queue.pop_first()?;
        self.now_ms = self.now_ms.max(due);
        Some(task)
    }

    /// Move the clock forward without running anything.
    pub fn advance_to(&mut self, t_ms: u64) {
        self.now_ms = self.now_ms.max(t_ms);
    }

    /// Drop every queued task for which `keep` returns false.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.queue.retain(|_, task| keep(task));
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.queue.values()
    }
}
