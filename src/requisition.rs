//! Persisted requisition records and their status
use crate::clock::TimeStamp;
use crate::item::RequisitionItem;
use chrono::Utc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, minicbor::Encode, minicbor::Decode)]
pub enum Status {
    #[n(0)]
    Draft,
    #[n(1)]
    Submitted,
    #[n(2)]
    PendingApproval,
    #[n(3)]
    Approved,
    #[n(4)]
    Rejected,
}

impl Status {
    /// Statuses a requisition can be reopened for editing from. Approved
    /// records are closed to edits and must be cloned instead.
    pub fn allows_edit(self) -> bool {
        matches!(self, Status::Draft | Status::Submitted | Status::Rejected)
    }

    /// Statuses an approver's decision (approve or reject) applies to.
    pub fn awaits_decision(self) -> bool {
        matches!(self, Status::Submitted | Status::PendingApproval)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Status::Draft => "Draft",
            Status::Submitted => "Submitted",
            Status::PendingApproval => "Pending Approval",
            Status::Approved => "Approved",
            Status::Rejected => "Rejected",
        };
        f.write_str(label)
    }
}

/// A stored requisition. `readable_id` is the human-facing code the store
/// assigns on first creation and never changes afterwards.
#[derive(Debug, Clone, PartialEq, minicbor::Encode, minicbor::Decode)]
pub struct Requisition {
    #[n(0)]
    pub id: String,
    #[n(1)]
    pub readable_id: Option<String>,
    #[n(2)]
    pub title: String,
    #[n(3)]
    pub account: String,
    #[n(4)]
    pub date: TimeStamp<Utc>,
    #[n(5)]
    pub notes: String,
    #[n(6)]
    pub items: Vec<RequisitionItem>,
    #[n(7)]
    pub status: Status,
}
