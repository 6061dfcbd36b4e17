//! Attribute Mutation Records
//!
//! Per-observer record queues for attribute changes. Records are queued at
//! mutation time and delivered only when the owner drains them, the
//! non-event-loop rendition of asynchronous batched observer delivery.

use crate::NodeId;

/// Observer handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(crate) u32);

/// One attribute mutation on one element
#[derive(Debug, Clone)]
pub struct MutationRecord {
    pub target: NodeId,
    pub attribute_name: String,
    /// Value before the mutation (None if the attribute was absent)
    pub old_value: Option<String>,
}

/// Registered attribute observer with its pending record queue
#[derive(Debug)]
pub(crate) struct AttributeObserver {
    pub(crate) id: ObserverId,
    pub(crate) target: NodeId,
    filter: Option<Vec<String>>,
    records: Vec<MutationRecord>,
    connected: bool,
}

impl AttributeObserver {
    pub(crate) fn new(id: ObserverId, target: NodeId, filter: Option<Vec<String>>) -> Self {
        Self {
            id,
            target,
            filter,
            records: Vec::new(),
            connected: true,
        }
    }

    /// Whether a mutation of `name` on `target` belongs to this observer
    pub(crate) fn matches(&self, target: NodeId, name: &str) -> bool {
        if !self.connected || self.target != target {
            return false;
        }
        match &self.filter {
            Some(names) => names.iter().any(|n| n == name),
            None => true,
        }
    }

    pub(crate) fn push_record(&mut self, record: MutationRecord) {
        self.records.push(record);
    }

    pub(crate) fn take_records(&mut self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.records)
    }

    pub(crate) fn disconnect(&mut self) {
        self.connected = false;
        self.records.clear();
    }
}
