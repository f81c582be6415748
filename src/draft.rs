//! The working draft and its editor
//!
//! One editing session owns exactly one draft. Every mutation goes through
//! [`DraftEditor`], which re-establishes the ordering invariant whenever an
//! edit can move an item, and refuses nothing else: validation only runs at
//! the hand-off to the lifecycle service.

use crate::clock::{Clock, TimeStamp};
use crate::error::{NotFoundError, ValidationError};
use crate::item::{ItemField, RequisitionItem};
use crate::ordering;
use crate::queue::QueueEntry;
use crate::utils::{ENTRY_HRP, ITEM_HRP, IdGen, REQUISITION_HRP};
use chrono::Utc;

/// An in-progress requisition. `id` stays `None` until the first save
/// persists it; `readable_id` is only present when the draft was loaded
/// from an existing record.
#[derive(Debug, Clone)]
pub struct Draft {
    pub id: Option<String>,
    pub readable_id: Option<String>,
    pub title: String,
    pub account: String,
    pub date: TimeStamp<Utc>,
    pub notes: String,
    pub items: Vec<RequisitionItem>,
}

impl Draft {
    pub fn empty(date: TimeStamp<Utc>) -> Self {
        Self {
            id: None,
            readable_id: None,
            title: String::new(),
            account: String::new(),
            date,
            notes: String::new(),
            items: Vec::new(),
        }
    }

    /// Gate for save and submit: a title and at least one line item.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if self.items.is_empty() {
            return Err(ValidationError::NoItems);
        }
        Ok(())
    }

    pub fn total_amount(&self) -> f64 {
        ordering::total_amount(&self.items)
    }

    pub fn group_runs(&self) -> Vec<ordering::GroupRun> {
        ordering::group_runs(&self.items)
    }
}

/// Owns the working draft plus the session's clock and id source.
pub struct DraftEditor {
    draft: Draft,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGen>,
}

impl DraftEditor {
    /// Start a session on a fresh, empty draft.
    pub fn new(clock: Box<dyn Clock>, ids: Box<dyn IdGen>) -> Self {
        let draft = Draft::empty(clock.now());
        Self { draft, clock, ids }
    }

    /// Start a session on a draft loaded from an existing requisition.
    pub fn with_draft(draft: Draft, clock: Box<dyn Clock>, ids: Box<dyn IdGen>) -> Self {
        Self { draft, clock, ids }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    /// Append a default line item and return its id. A fresh item carries
    /// no category or priority, so it already sorts last and no resort is
    /// needed.
    pub fn add_item(&mut self) -> String {
        let id = self.ids.next(ITEM_HRP);
        self.draft.items.push(RequisitionItem::new(id.clone()));
        id
    }

    /// Apply one field edit to the item with the given id, re-sorting when
    /// the edit can move the item.
    pub fn edit_field(&mut self, item_id: &str, edit: ItemField) -> Result<(), NotFoundError> {
        let resort = edit.affects_ordering();
        let item = self
            .draft
            .items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or_else(|| NotFoundError::Item(item_id.to_string()))?;

        item.apply(edit);

        if resort {
            ordering::sort_items(&mut self.draft.items);
        }
        Ok(())
    }

    /// Remove a line item, handing back a queue entry stamped with the
    /// removal time. The caller decides which recycle queue it joins.
    pub fn remove_item(&mut self, item_id: &str) -> Result<QueueEntry, NotFoundError> {
        let position = self
            .draft
            .items
            .iter()
            .position(|item| item.id == item_id)
            .ok_or_else(|| NotFoundError::Item(item_id.to_string()))?;

        let item = self.draft.items.remove(position);
        Ok(QueueEntry {
            id: self.ids.next(ENTRY_HRP),
            item,
            removed_at: self.clock.now(),
        })
    }

    /// Take in an item from outside the draft (a restore or a clone),
    /// minting a new id so it cannot collide with anything already here,
    /// then re-sort since it carries category and priority.
    pub fn adopt_item(&mut self, mut item: RequisitionItem) -> String {
        let id = self.ids.next(ITEM_HRP);
        item.id = id.clone();
        self.draft.items.push(item);
        ordering::sort_items(&mut self.draft.items);
        id
    }

    /// Mint an id for the requisition record itself, used by the lifecycle
    /// service on first save.
    pub fn mint_requisition_id(&mut self) -> String {
        self.ids.next(REQUISITION_HRP)
    }

    /// Reset the session to an empty draft. The recycle queue is not
    /// touched; removed items outlive the drafts they came from.
    pub fn clear(&mut self) {
        self.draft = Draft::empty(self.clock.now());
    }
}
