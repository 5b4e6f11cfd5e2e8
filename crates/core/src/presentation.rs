//! Presentation tasks queued after authoritative state changes.
//! This module exists to let renderers animate committed moves without the simulation waiting on them.
//! It does not own timing; durations are hints for whoever drains the queue.

use serde::{Deserialize, Serialize};

use crate::movement::Occupant;
use crate::types::Pos;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresentationKind {
    Move,
    Attack,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PresentationTask {
    pub id: TaskId,
    pub actor: Occupant,
    pub kind: PresentationKind,
    pub from: Pos,
    pub to: Pos,
    pub duration_millis: u32,
}

#[derive(Clone, Debug, Default)]
pub struct PresentationQueue {
    pending: Vec<PresentationTask>,
    next_id: u64,
}

impl PresentationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        actor: Occupant,
        kind: PresentationKind,
        from: Pos,
        to: Pos,
        duration_millis: u32,
    ) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.pending.push(PresentationTask { id, actor, kind, from, to, duration_millis });
        id
    }

    /// Outstanding tasks in enqueue order.
    pub fn pending(&self) -> &[PresentationTask] {
        &self.pending
    }

    /// Returns false for unknown or already finished ids.
    pub fn complete(&mut self, id: TaskId) -> bool {
        self.remove(id)
    }

    /// Abandons the animation; the state it depicts is already committed.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        self.remove(id)
    }

    /// Drops every outstanding task, e.g. when the grid they depict is replaced.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    pub fn complete_all(&mut self) -> usize {
        let finished = self.pending.len();
        self.pending.clear();
        finished
    }

    pub fn is_settled(&self) -> bool {
        self.pending.is_empty()
    }

    fn remove(&mut self, id: TaskId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|task| task.id != id);
        self.pending.len() != before
    }
}
