//! Scheduler module - recurring work without wall-clock access
//!
//! Sessions never read time. They ask a [`Scheduler`] to repeat a named
//! [`Task`] every N milliseconds and get a [`TaskHandle`] back; cancelling the
//! handle guarantees the task never fires again. Whoever owns the sessions
//! (the match coordinator) drains due tasks and dispatches them.
//!
//! [`VirtualClock`] is the concrete scheduler: a millisecond counter advanced
//! explicitly by the caller (real elapsed time in the terminal front-end,
//! synthetic time in tests and headless runs).

use serde::{Deserialize, Serialize};

use crate::types::PlayerSlot;

/// Kind of recurring work a session owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    /// Automatic downward movement at the session's drop interval.
    Gravity,
    /// Automated-play decision and micro-step cycle.
    AutoPlay,
}

/// A unit of recurring work: which seat, what to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Task {
    pub slot: PlayerSlot,
    pub kind: TaskKind,
}

impl Task {
    pub fn new(slot: PlayerSlot, kind: TaskKind) -> Self {
        Self { slot, kind }
    }
}

/// Opaque identifier of one scheduled task. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskHandle(u64);

impl TaskHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// The two operations the core needs from a timer collaborator.
pub trait Scheduler {
    /// Repeat `task` every `interval_ms` until cancelled.
    fn schedule(&mut self, task: Task, interval_ms: u32) -> TaskHandle;

    /// Stop a task. Unknown or already-cancelled handles are ignored.
    fn cancel(&mut self, handle: TaskHandle);
}

#[derive(Debug, Clone)]
struct Entry {
    handle: TaskHandle,
    task: Task,
    interval_ms: u32,
    due_ms: u64,
}

/// Deterministic millisecond scheduler.
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    now_ms: u64,
    next_id: u64,
    entries: Vec<Entry>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of live (not cancelled) tasks.
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Whether `handle` is still live.
    pub fn is_scheduled(&self, handle: TaskHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    /// Interval of a live task.
    pub fn interval_of(&self, handle: TaskHandle) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.handle == handle)
            .map(|e| e.interval_ms)
    }

    /// Pop the earliest task due at or before `until_ms`.
    ///
    /// The clock moves to the task's due time and the task is re-armed one
    /// interval later. Ties fire in scheduling order. Returns `None` (and
    /// moves the clock to `until_ms`) once nothing more is due, so callers
    /// loop on this and dispatch each task before popping the next one.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(TaskHandle, Task)> {
        let next = self
            .entries
            .iter_mut()
            .filter(|e| e.due_ms <= until_ms)
            .min_by_key(|e| (e.due_ms, e.handle));

        match next {
            Some(entry) => {
                self.now_ms = self.now_ms.max(entry.due_ms);
                entry.due_ms += entry.interval_ms.max(1) as u64;
                Some((entry.handle, entry.task))
            }
            None => {
                self.now_ms = self.now_ms.max(until_ms);
                None
            }
        }
    }
}

impl Scheduler for VirtualClock {
    fn schedule(&mut self, task: Task, interval_ms: u32) -> TaskHandle {
        self.next_id += 1;
        let handle = TaskHandle(self.next_id);
        self.entries.push(Entry {
            handle,
            task,
            interval_ms,
            due_ms: self.now_ms + interval_ms.max(1) as u64,
        });
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        self.entries.retain(|e| e.handle != handle);
    }
}
