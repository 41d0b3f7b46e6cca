//! Cancellable delayed-task queue on a virtual millisecond clock.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

/// Handle of a scheduled task, unique within one scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(pub u64);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Task({})", self.0)
    }
}

/// A task waiting in the queue.
#[derive(Debug)]
struct Entry<T> {
    due: u64,
    id: TaskId,
    task: T,
}

// Min-heap on (due, id): earliest first, ties in scheduling order.
impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Entry<T> {}

/// Single-threaded delayed-task queue.
///
/// Time only moves when the owner pops tasks or calls [`Scheduler::advance_to`],
/// so sequencing is fully deterministic. Cancelled tasks are dropped from the
/// queue and can never fire.
///
/// ## Behavior
///
/// - `schedule()`: queue a task `delay_ms` after the current time
/// - `pop_due()`: take the earliest task due by a deadline, moving the clock
///   to its due time
/// - `cancel_all()` / `cancel_where()`: drop pending tasks
#[derive(Debug)]
pub struct Scheduler<T> {
    now: u64,
    next_id: u64,
    queue: BinaryHeap<Entry<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: 0,
            next_id: 0,
            queue: BinaryHeap::new(),
        }
    }
}

impl<T> Scheduler<T> {
    /// Create an empty scheduler at time 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Queue `task` to fire `delay_ms` from now.
    pub fn schedule(&mut self, delay_ms: u64, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.queue.push(Entry {
            due: self.now.saturating_add(delay_ms),
            id,
            task,
        });
        id
    }

    /// Drop every pending task. Returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.queue.len();
        self.queue.clear();
        dropped
    }

    /// Drop pending tasks matching `pred`. Returns how many were dropped.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let before = self.queue.len();
        self.queue.retain(|entry| !pred(&entry.task));
        before - self.queue.len()
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Check if nothing is queued.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Due time of the earliest pending task.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.queue.peek().map(|entry| entry.due)
    }

    /// Iterate over pending tasks in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.queue.iter().map(|entry| &entry.task)
    }

    /// Take the earliest task due at or before `deadline`.
    ///
    /// The clock moves forward to the task's due time. Returns `None` when
    /// nothing is due; the clock is left where it was.
    pub fn pop_due(&mut self, deadline: u64) -> Option<T> {
        if self.next_due()? > deadline {
            return None;
        }
        let entry = self.queue.pop()?;
        self.now = self.now.max(entry.due);
        Some(entry.task)
    }

    /// Move the clock forward. Never moves it backwards.
    pub fn advance_to(&mut self, time: u64) {
        self.now = self.now.max(time);
    }
}
