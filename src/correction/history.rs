use std::{collections::VecDeque, time::Instant};

use crate::{domain::text::Correction, surface::SurfaceId};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BatchKind {
    SingleWord,
    Batch,
}

/// Everything needed to put a surface back exactly as it was before a batch.
#[derive(Clone, Debug)]
pub struct UndoRecord {
    pub surface: SurfaceId,
    pub kind: BatchKind,
    pub original_text: String,
    pub corrected_text: String,
    pub corrections: Vec<Correction>,
    pub applied_at: Instant,
}

/// Bounded LIFO of applied batches. The oldest record is dropped past `cap`.
#[derive(Debug)]
pub struct History {
    cap: usize,
    records: VecDeque<UndoRecord>,
}

impl History {
    pub fn new(cap: usize) -> Self {
        let cap = cap.max(1);
        Self {
            cap,
            records: VecDeque::with_capacity(cap),
        }
    }

    pub fn push(&mut self, record: UndoRecord) {
        self.records.push_back(record);
        while self.records.len() > self.cap {
            if let Some(dropped) = self.records.pop_front() {
                tracing::trace!(surface = dropped.surface.raw(), "undo history full, oldest dropped");
            }
        }
    }

    pub fn pop(&mut self) -> Option<UndoRecord> {
        self.records.pop_back()
    }

    pub fn peek(&self) -> Option<&UndoRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Shrinks or grows the bound, dropping the oldest records if needed.
    pub fn set_cap(&mut self, cap: usize) {
        self.cap = cap.max(1);
        while self.records.len() > self.cap {
            let _ = self.records.pop_front();
        }
    }
}
