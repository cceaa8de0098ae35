//! Applies a stored allocation sheet to organizations in link id order.
//!
//! The walk can be cut into batches; each batch reports the cursor to
//! resume after, so a caller running under a time budget can stop and
//! requeue itself without assigning an organization twice.

use std::collections::btree_map;
use std::iter::Peekable;
use std::ops::Bound;

use tracing::info;

use crate::model::entity::{OrgId, Slots};
use crate::sheet::{AllocationSheet, SheetEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub assigned: Vec<(OrgId, Slots)>,
    /// Last link id of this batch when entries remain, `None` when done.
    pub resume_after: Option<OrgId>,
}

pub struct Assignment<'a> {
    entries: Peekable<btree_map::Range<'a, OrgId, SheetEntry>>,
    batch_size: usize,
}

impl<'a> Assignment<'a> {
    pub fn new(
        sheet: &'a AllocationSheet,
        resume_after: Option<&str>,
        batch_size: usize,
    ) -> Assignment<'a> {
        let lower = match resume_after {
            Some(after) => Bound::Excluded(after),
            None => Bound::Unbounded,
        };
        Assignment {
            entries: sheet.0.range::<str, _>((lower, Bound::Unbounded)).peekable(),
            batch_size: batch_size.max(1),
        }
    }

    pub fn next_batch(&mut self) -> Batch {
        let batch_size = self.batch_size;
        let assigned: Vec<(OrgId, Slots)> = self.by_ref().take(batch_size).collect();
        let resume_after = match self.entries.peek() {
            Some(_) => assigned.last().map(|(org, _)| org.clone()),
            None => None,
        };
        Batch { assigned, resume_after }
    }
}

impl Iterator for Assignment<'_> {
    type Item = (OrgId, Slots);

    fn next(&mut self) -> Option<Self::Item> {
        let (org, entry) = self.entries.next()?;
        info!(org = %org, slots = entry.slots, "assigning slots");
        Some((org.clone(), entry.slots))
    }
}
