use crate::requisition::Status;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("a requisition needs a title before it can be saved or submitted")]
    MissingTitle,
    #[error("a requisition needs at least one line item")]
    NoItems,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("requisition {id} is approved and can no longer be edited, clone it instead")]
    EditAfterApproval { id: String },
    #[error("cannot {action} a requisition while it is {status}")]
    InvalidTransition { action: &'static str, status: Status },
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("no line item with id {0} in the current draft")]
    Item(String),
    #[error("no recycle queue entry with id {0}")]
    Entry(String),
    #[error("no requisition with id {0} in the store")]
    Requisition(String),
}
