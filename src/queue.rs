//! Priority queue over waiting submissions.
//!
//! The nurse dashboard shows waiting patients in an explicit total order.
//! Every reorder operation works on the in-memory list first, then renumbers
//! all waiting rows to `queue_order = index` and persists the renumbering in
//! one transaction. On persistence failure the local order is kept; order
//! writes are idempotent, so the next successful persist converges.

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::Serialize;
use uuid::Uuid;

use crate::db::{self, DatabaseError};
use crate::models::{NurseDecision, Submission, TriageLevel};

/// Dashboard stat tiles over the waiting queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QueueStats {
    pub high_count: usize,
    pub moderate_count: usize,
    pub pending_count: usize,
    pub avg_wait_minutes: i64,
}

/// Ordered view over the waiting submissions.
pub struct TriageQueue {
    waiting: Vec<Submission>,
}

impl TriageQueue {
    /// Load the waiting queue from the store.
    ///
    /// Submissions that already carry a queue order keep it; never-queued
    /// submissions are appended by AI triage level (high first), oldest
    /// first within a level. The resulting order is renumbered and persisted
    /// immediately so displayed rank always matches the stored order.
    pub fn load(conn: &Connection) -> Result<Self, DatabaseError> {
        let rows = db::list_waiting(conn)?;

        let (ordered, mut unordered): (Vec<Submission>, Vec<Submission>) =
            rows.into_iter().partition(|s| s.queue_order.is_some());

        unordered.sort_by_key(|s| (TriageLevel::rank(s.ai_triage_level), s.created_at));

        let mut queue = Self { waiting: ordered };
        queue.waiting.extend(unordered);
        queue.persist_order(conn)?;
        Ok(queue)
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.waiting
    }

    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }

    fn index_of(&self, id: &Uuid) -> Option<usize> {
        self.waiting.iter().position(|s| &s.id == id)
    }

    /// Swap the submission with its predecessor. No-op at the top.
    pub fn move_up(&mut self, conn: &Connection, id: &Uuid) -> Result<bool, DatabaseError> {
        let Some(index) = self.index_of(id) else {
            return Ok(false);
        };
        if index == 0 {
            return Ok(false);
        }
        self.waiting.swap(index - 1, index);
        self.persist_order(conn)?;
        Ok(true)
    }

    /// Swap the submission with its successor. No-op at the bottom.
    pub fn move_down(&mut self, conn: &Connection, id: &Uuid) -> Result<bool, DatabaseError> {
        let Some(index) = self.index_of(id) else {
            return Ok(false);
        };
        if index + 1 >= self.waiting.len() {
            return Ok(false);
        }
        self.waiting.swap(index, index + 1);
        self.persist_order(conn)?;
        Ok(true)
    }

    /// Move the submission to a 1-based user-facing position, clamped to
    /// `[1, len]`. Array-move semantics: intervening elements shift by one.
    pub fn set_position(
        &mut self,
        conn: &Connection,
        id: &Uuid,
        position: usize,
    ) -> Result<bool, DatabaseError> {
        let Some(from) = self.index_of(id) else {
            return Ok(false);
        };
        let to = position.clamp(1, self.waiting.len()) - 1;
        self.array_move(conn, from, to)
    }

    /// Drag-reorder by index in one step. No-op when source equals
    /// destination or either index is out of range.
    pub fn drag(
        &mut self,
        conn: &Connection,
        from: usize,
        to: usize,
    ) -> Result<bool, DatabaseError> {
        if from >= self.waiting.len() || to >= self.waiting.len() {
            return Ok(false);
        }
        self.array_move(conn, from, to)
    }

    fn array_move(
        &mut self,
        conn: &Connection,
        from: usize,
        to: usize,
    ) -> Result<bool, DatabaseError> {
        if from == to {
            return Ok(false);
        }
        let sub = self.waiting.remove(from);
        self.waiting.insert(to, sub);
        self.persist_order(conn)?;
        Ok(true)
    }

    /// Record the nurse decision: the submission leaves the waiting queue
    /// and the remaining positions compact.
    pub fn decide(
        &mut self,
        conn: &Connection,
        id: &Uuid,
        decision: NurseDecision,
    ) -> Result<(), DatabaseError> {
        let Some(index) = self.index_of(id) else {
            return Err(DatabaseError::NotFound {
                entity_type: "submission".into(),
                id: id.to_string(),
            });
        };
        db::set_nurse_decision(conn, id, decision)?;
        let sub = self.waiting.remove(index);
        tracing::info!(
            submission = %sub.id,
            decision = decision.as_str(),
            "Submission moved to treatment"
        );
        self.persist_order(conn)
    }

    /// Renumber every waiting element to its array index and persist the
    /// full renumbering in one transaction.
    fn persist_order(&mut self, conn: &Connection) -> Result<(), DatabaseError> {
        for (index, sub) in self.waiting.iter_mut().enumerate() {
            sub.queue_order = Some(index as i64);
        }
        let orders: Vec<(Uuid, i64)> = self
            .waiting
            .iter()
            .map(|s| (s.id, s.queue_order.unwrap_or_default()))
            .collect();
        db::update_queue_orders(conn, &orders)
    }

    /// Stat tiles for the dashboard header.
    pub fn stats(&self, now: DateTime<Utc>) -> QueueStats {
        let high_count = self
            .waiting
            .iter()
            .filter(|s| s.ai_triage_level == Some(TriageLevel::High))
            .count();
        let moderate_count = self
            .waiting
            .iter()
            .filter(|s| s.ai_triage_level == Some(TriageLevel::Moderate))
            .count();
        let pending_count = self
            .waiting
            .iter()
            .filter(|s| s.nurse_decision.is_none())
            .count();
        let avg_wait_minutes = if self.waiting.is_empty() {
            0
        } else {
            let total: i64 = self.waiting.iter().map(|s| s.wait_minutes(now)).sum();
            total / self.waiting.len() as i64
        };
        QueueStats {
            high_count,
            moderate_count,
            pending_count,
            avg_wait_minutes,
        }
    }
}
