//! Recycle queue for removed line items
//!
//! Removing a line never destroys it outright: the item lands here as a
//! timestamped snapshot and stays until someone restores it into a draft or
//! purges it. The queue belongs to the session, not to any one draft, so
//! entries survive clearing and submitting drafts.

use crate::draft::DraftEditor;
use crate::error::NotFoundError;
use crate::item::RequisitionItem;
use crate::clock::TimeStamp;
use chrono::Utc;

/// One removed item, snapshotted at removal time. The entry id is minted
/// separately from the item id so two removals of "the same" item (after a
/// restore) stay distinguishable.
#[derive(Debug, Clone, PartialEq, minicbor::Encode, minicbor::Decode)]
pub struct QueueEntry {
    #[n(0)]
    pub id: String,
    #[n(1)]
    pub item: RequisitionItem,
    #[n(2)]
    pub removed_at: TimeStamp<Utc>,
}

/// Amount sums over the queue, split by the priority flag.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct QueueTotals {
    pub priority: f64,
    pub standard: f64,
}

#[derive(Debug, Default)]
pub struct RecycleQueue {
    entries: Vec<QueueEntry>,
}

impl RecycleQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<QueueEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[QueueEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry. No deduplication: an item removed, restored and
    /// removed again yields two independent entries.
    pub fn enqueue(&mut self, entry: QueueEntry) {
        self.entries.push(entry);
    }

    /// Move an entry back into the target draft. The restored item gets a
    /// fresh id and the draft re-sorts, since the snapshot carries category
    /// and priority. Returns the new item id.
    pub fn restore(
        &mut self,
        entry_id: &str,
        target: &mut DraftEditor,
    ) -> Result<String, NotFoundError> {
        let position = self.position_of(entry_id)?;
        let entry = self.entries.remove(position);
        Ok(target.adopt_item(entry.item))
    }

    /// Permanently drop one entry. Irreversible; any confirmation dialog is
    /// the caller's business.
    pub fn purge(&mut self, entry_id: &str) -> Result<QueueEntry, NotFoundError> {
        let position = self.position_of(entry_id)?;
        Ok(self.entries.remove(position))
    }

    /// Permanently drop everything.
    pub fn purge_all(&mut self) {
        self.entries.clear();
    }

    /// Display sums for the queue view, partitioned by the priority flag.
    pub fn totals(&self) -> QueueTotals {
        let mut totals = QueueTotals::default();
        for entry in &self.entries {
            if entry.item.is_priority {
                totals.priority += entry.item.amount;
            } else {
                totals.standard += entry.item.amount;
            }
        }
        totals
    }

    fn position_of(&self, entry_id: &str) -> Result<usize, NotFoundError> {
        self.entries
            .iter()
            .position(|entry| entry.id == entry_id)
            .ok_or_else(|| NotFoundError::Entry(entry_id.to_string()))
    }
}
