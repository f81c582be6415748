//! Requisition draft and recycle-queue engine
//!
//! Staff compose multi-line purchase requests, keep them grouped by
//! priority and category with running subtotals, soft-delete lines into a
//! recoverable recycle queue, and drive the finished requisition through
//! submit, approve and reject.

pub mod clock;
pub mod draft;
pub mod error;
pub mod item;
pub mod lifecycle;
pub mod ordering;
pub mod queue;
pub mod requisition;
pub mod store;
pub mod utils;
