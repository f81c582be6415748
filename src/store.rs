//! Requisition store collaborator
//!
//! The engine computes target states; durable storage lives behind
//! [`RequisitionStore`]. The shipped implementation keeps CBOR-encoded
//! records in sled, keyed by requisition id, and owns the human-facing
//! readable-id sequence.

use crate::queue::{QueueEntry, RecycleQueue};
use crate::requisition::Requisition;
use sled::{Batch, Db};
use std::sync::Arc;

/// Storage interface the lifecycle service is built against.
pub trait RequisitionStore {
    /// Persist a brand-new requisition. The store assigns the readable id
    /// and returns the record as stored.
    fn create_requisition(&self, requisition: &Requisition) -> anyhow::Result<Requisition>;

    /// Re-persist an existing requisition under its id. Status changes
    /// (submit, approve, reject) go through here as well.
    fn update_requisition(&self, requisition: &Requisition) -> anyhow::Result<()>;

    fn delete_requisition(&self, id: &str) -> anyhow::Result<()>;

    fn fetch_requisition(&self, id: &str) -> anyhow::Result<Option<Requisition>>;
}

// Reserved keys; requisition ids are bech32 strings and cannot collide
// with the double-underscore prefix.
const READABLE_SEQ_KEY: &[u8] = b"__readable_seq";
const RECYCLE_QUEUE_KEY: &[u8] = b"__recycle_queue";

/// Sled-backed store. One database holds the requisition records, the
/// readable-id counter and the persisted recycle queue.
pub struct SledStore {
    instance: Arc<Db>,
}

impl SledStore {
    pub fn new(instance: Arc<Db>) -> Self {
        Self { instance }
    }

    /// Bump the persisted sequence and format the next readable code.
    fn next_readable_id(&self) -> anyhow::Result<String> {
        let previous = self.instance.fetch_and_update(READABLE_SEQ_KEY, |current| {
            let next = decode_seq(current) + 1;
            Some(next.to_be_bytes().to_vec())
        })?;
        let assigned = decode_seq(previous.as_deref()) + 1;
        Ok(format!("REQ-{assigned:06}"))
    }

    /// Persist the whole recycle queue as one blob. Written explicitly at
    /// the points the hosting application chooses; a failed write leaves
    /// the in-memory queue untouched for retry.
    pub fn save_queue(&self, queue: &RecycleQueue) -> anyhow::Result<()> {
        let encoded = minicbor::to_vec(queue.entries())?;
        self.instance.insert(RECYCLE_QUEUE_KEY, encoded)?;
        Ok(())
    }

    /// Load the persisted recycle queue, or an empty one when nothing has
    /// been saved yet.
    pub fn load_queue(&self) -> anyhow::Result<RecycleQueue> {
        match self.instance.get(RECYCLE_QUEUE_KEY)? {
            Some(bytes) => {
                let entries: Vec<QueueEntry> = minicbor::decode(&bytes)?;
                Ok(RecycleQueue::from_entries(entries))
            }
            None => Ok(RecycleQueue::new()),
        }
    }
}

fn decode_seq(bytes: Option<&[u8]>) -> u64 {
    match bytes {
        Some(raw) => {
            let mut buf = [0u8; 8];
            let len = raw.len().min(8);
            buf[8 - len..].copy_from_slice(&raw[raw.len() - len..]);
            u64::from_be_bytes(buf)
        }
        None => 0,
    }
}

impl RequisitionStore for SledStore {
    fn create_requisition(&self, requisition: &Requisition) -> anyhow::Result<Requisition> {
        let mut stored = requisition.clone();
        stored.readable_id = Some(self.next_readable_id()?);

        let mut batch = Batch::default();
        batch.insert(stored.id.as_bytes(), minicbor::to_vec(&stored)?);
        self.instance.apply_batch(batch)?;

        Ok(stored)
    }

    fn update_requisition(&self, requisition: &Requisition) -> anyhow::Result<()> {
        self.instance
            .insert(requisition.id.as_bytes(), minicbor::to_vec(requisition)?)?;
        Ok(())
    }

    fn delete_requisition(&self, id: &str) -> anyhow::Result<()> {
        self.instance.remove(id.as_bytes())?;
        Ok(())
    }

    fn fetch_requisition(&self, id: &str) -> anyhow::Result<Option<Requisition>> {
        match self.instance.get(id.as_bytes())? {
            Some(bytes) => Ok(Some(minicbor::decode(&bytes)?)),
            None => Ok(None),
        }
    }
}
