//! wai-dom - Attribute-bearing host DOM
//!
//! Minimal arena DOM backing the wai-aria mediation core: elements with
//! attribute maps, document-wide ID lookup, and attribute mutation records
//! delivered through per-observer queues.

mod document;
mod mutation;
mod node;

pub use document::Document;
pub use mutation::{MutationRecord, ObserverId};
pub use node::{Attr, ElementData};

/// Node identifier (index into the document arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Arena index of this node
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
