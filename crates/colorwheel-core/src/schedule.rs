//! Cancelable deferred wedge draws.
//!
//! Opening the wheel draws its wedges one after another with a fixed stagger.
//! Each draw is a task in a [`DrawSchedule`]; the platform fires them with
//! real timers (or ticks the schedule), and destroying the picker cancels
//! whatever is still pending.

use crate::surface::ArcStroke;
use crate::wheel::wedge_delay;
use std::time::Duration;

/// Identifier of a scheduled draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

/// A wedge waiting to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledDraw {
    pub id: TaskId,
    /// Delay from the moment the batch was scheduled.
    pub delay: Duration,
    pub arc: ArcStroke,
}

/// Pending draws, in wedge order.
#[derive(Debug, Clone, Default)]
pub struct DrawSchedule {
    next_id: u64,
    pending: Vec<ScheduledDraw>,
    /// Time advanced since the current batch was scheduled.
    elapsed: Duration,
}

impl DrawSchedule {
    /// Create an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one draw per arc, staggered by their index.
    ///
    /// Returns the queued tasks so the caller can arm timers for them.
    pub fn schedule(&mut self, arcs: Vec<ArcStroke>) -> Vec<ScheduledDraw> {
        if self.pending.is_empty() {
            self.elapsed = Duration::ZERO;
        }

        let batch: Vec<ScheduledDraw> = arcs
            .into_iter()
            .enumerate()
            .map(|(i, arc)| {
                let id = TaskId(self.next_id);
                self.next_id += 1;
                ScheduledDraw { id, delay: self.elapsed + wedge_delay(i), arc }
            })
            .collect();

        self.pending.extend(batch.iter().cloned());
        batch
    }

    /// Remove a task whose timer fired. `None` if it was cancelled.
    pub fn take(&mut self, id: TaskId) -> Option<ArcStroke> {
        let index = self.pending.iter().position(|task| task.id == id)?;
        Some(self.pending.remove(index).arc)
    }

    /// Advance time and drain every task that is now due, in order.
    pub fn take_due(&mut self, elapsed: Duration) -> Vec<ArcStroke> {
        self.elapsed += elapsed;
        let now = self.elapsed;
        let (due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|task| task.delay <= now);
        self.pending = waiting;
        due.into_iter().map(|task| task.arc).collect()
    }

    /// Drain every pending task regardless of its delay.
    pub fn take_all(&mut self) -> Vec<ArcStroke> {
        std::mem::take(&mut self.pending).into_iter().map(|task| task.arc).collect()
    }

    /// Drop every pending task, returning their ids.
    pub fn cancel_all(&mut self) -> Vec<TaskId> {
        std::mem::take(&mut self.pending).into_iter().map(|task| task.id).collect()
    }

    /// Whether a task is still waiting.
    pub fn contains(&self, id: TaskId) -> bool {
        self.pending.iter().any(|task| task.id == id)
    }

    /// Number of draws still waiting.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
