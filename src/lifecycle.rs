//! Service layer driving a requisition through its approval lifecycle
//!
//! Draft -> Submitted -> Pending Approval -> Approved | Rejected. Rejected
//! records reopen into drafts; Approved records are closed to edits and can
//! only be cloned. The service computes target states and hands the result
//! to the store; the approver's decision itself arrives from outside as a
//! plain approve or reject call.

use crate::clock::Clock;
use crate::draft::{Draft, DraftEditor};
use crate::error::{LifecycleError, NotFoundError};
use crate::requisition::{Requisition, Status};
use crate::store::RequisitionStore;
use crate::utils::IdGen;

pub struct RequisitionService<S> {
    store: S,
}

impl<S: RequisitionStore> RequisitionService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist the working draft with `Draft` status. The first save
    /// creates the record and the editor learns the assigned ids; later
    /// saves update in place, preserving the readable id. The draft stays
    /// in the editor for further work.
    pub fn save_draft(&self, editor: &mut DraftEditor) -> anyhow::Result<Requisition> {
        self.persist(editor, Status::Draft)
    }

    /// Validate and persist with `Submitted` status, then clear the editor.
    /// The clear only happens once the persist has succeeded, so a failed
    /// store call leaves the draft intact for retry.
    pub fn submit(&self, editor: &mut DraftEditor) -> anyhow::Result<Requisition> {
        let stored = self.persist(editor, Status::Submitted)?;
        editor.clear();
        Ok(stored)
    }

    /// Record the approver's positive decision. Only a requisition still
    /// awaiting a decision can be approved.
    pub fn approve(&self, id: &str) -> anyhow::Result<Requisition> {
        self.decide(id, Status::Approved, "approve")
    }

    /// Record the approver's negative decision.
    pub fn reject(&self, id: &str) -> anyhow::Result<Requisition> {
        self.decide(id, Status::Rejected, "reject")
    }

    /// Reopen a stored requisition as a working draft. Items are deep
    /// copied with their ids intact; the original record is untouched until
    /// the next save. Approved records refuse this path.
    pub fn load_for_edit(&self, id: &str) -> anyhow::Result<Draft> {
        let requisition = self.fetch(id)?;

        if requisition.status == Status::Approved {
            return Err(LifecycleError::EditAfterApproval { id: id.to_string() }.into());
        }
        if !requisition.status.allows_edit() {
            return Err(LifecycleError::InvalidTransition {
                action: "edit",
                status: requisition.status,
            }
            .into());
        }

        Ok(Draft {
            id: Some(requisition.id),
            readable_id: requisition.readable_id,
            title: requisition.title,
            account: requisition.account,
            date: requisition.date,
            notes: requisition.notes,
            items: requisition.items,
        })
    }

    /// Spawn a brand-new draft from any stored requisition: fresh item
    /// ids, no readable id, date reset to now, other header fields copied.
    /// The source record is never mutated.
    pub fn clone_requisition(
        &self,
        id: &str,
        clock: &dyn Clock,
        ids: &mut dyn IdGen,
    ) -> anyhow::Result<Draft> {
        use crate::utils::ITEM_HRP;

        let requisition = self.fetch(id)?;

        let items = requisition
            .items
            .into_iter()
            .map(|mut item| {
                item.id = ids.next(ITEM_HRP);
                item
            })
            .collect();

        Ok(Draft {
            id: None,
            readable_id: None,
            title: requisition.title,
            account: requisition.account,
            date: clock.now(),
            notes: requisition.notes,
            items,
        })
    }

    pub fn delete(&self, id: &str) -> anyhow::Result<()> {
        self.store.delete_requisition(id)
    }

    fn fetch(&self, id: &str) -> anyhow::Result<Requisition> {
        self.store
            .fetch_requisition(id)?
            .ok_or_else(|| NotFoundError::Requisition(id.to_string()).into())
    }

    fn decide(&self, id: &str, target: Status, action: &'static str) -> anyhow::Result<Requisition> {
        let mut requisition = self.fetch(id)?;

        if !requisition.status.awaits_decision() {
            return Err(LifecycleError::InvalidTransition {
                action,
                status: requisition.status,
            }
            .into());
        }

        requisition.status = target;
        self.store.update_requisition(&requisition)?;

        Ok(requisition)
    }

    fn persist(&self, editor: &mut DraftEditor, status: Status) -> anyhow::Result<Requisition> {
        editor.draft().validate()?;

        let draft = editor.draft().clone();
        match draft.id {
            Some(id) => {
                let requisition = Requisition {
                    id,
                    readable_id: draft.readable_id,
                    title: draft.title,
                    account: draft.account,
                    date: draft.date,
                    notes: draft.notes,
                    items: draft.items,
                    status,
                };
                self.store.update_requisition(&requisition)?;
                Ok(requisition)
            }
            None => {
                let requisition = Requisition {
                    id: editor.mint_requisition_id(),
                    readable_id: None,
                    title: draft.title,
                    account: draft.account,
                    date: draft.date,
                    notes: draft.notes,
                    items: draft.items,
                    status,
                };
                let stored = self.store.create_requisition(&requisition)?;
                // the editor learns the assigned ids so the next save updates
                editor.draft_mut().id = Some(stored.id.clone());
                editor.draft_mut().readable_id = stored.readable_id.clone();
                Ok(stored)
            }
        }
    }
}
