//! Document - element arena and mutation surface
//!
//! All attribute changes go through the document so they can be routed to
//! registered observers. Invalid node handles degrade to `None`/`false`
//! rather than panicking.

use tracing::trace;

use crate::mutation::AttributeObserver;
use crate::{ElementData, MutationRecord, NodeId, ObserverId};

/// Element arena with attribute observation
#[derive(Debug, Default)]
pub struct Document {
    nodes: Vec<ElementData>,
    observers: Vec<AttributeObserver>,
    next_observer: u32,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an element and return its handle
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(ElementData::new(tag));
        id
    }

    /// Number of elements in the document
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Access an element
    pub fn element(&self, node: NodeId) -> Option<&ElementData> {
        self.nodes.get(node.index())
    }

    /// Get an attribute value
    pub fn get_attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.get_attr(name)
    }

    /// Set an attribute; returns false for an invalid handle
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> bool {
        let Some(element) = self.nodes.get_mut(node.index()) else {
            return false;
        };
        let old = element.set_attr(name, value);
        self.queue_attribute_record(node, name, old);
        true
    }

    /// Remove an attribute; returns true if it was present
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> bool {
        let Some(element) = self.nodes.get_mut(node.index()) else {
            return false;
        };
        match element.remove_attr(name) {
            Some(old) => {
                self.queue_attribute_record(node, name, Some(old));
                true
            }
            None => false,
        }
    }

    /// Check if an attribute exists
    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.element(node).is_some_and(|e| e.has_attr(name))
    }

    /// Attribute names of an element, in insertion order
    pub fn attribute_names(&self, node: NodeId) -> Vec<&str> {
        self.element(node).map(|e| e.attr_names()).unwrap_or_default()
    }

    /// Document-wide ID lookup (first match, case-sensitive)
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.nodes
            .iter()
            .position(|e| e.get_attr("id") == Some(id))
            .map(|i| NodeId(i as u32))
    }

    /// Observe attribute mutations on one element.
    ///
    /// `filter` restricts delivery to the named attributes; `None` delivers
    /// every attribute change.
    pub fn observe_attributes(
        &mut self,
        target: NodeId,
        filter: Option<Vec<String>>,
    ) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push(AttributeObserver::new(id, target, filter));
        id
    }

    /// Drain the pending records of one observer
    pub fn take_records(&mut self, observer: ObserverId) -> Vec<MutationRecord> {
        self.observers
            .iter_mut()
            .find(|o| o.id == observer)
            .map(|o| o.take_records())
            .unwrap_or_default()
    }

    /// Stop delivering records to an observer and drop its queue
    pub fn disconnect(&mut self, observer: ObserverId) {
        if let Some(o) = self.observers.iter_mut().find(|o| o.id == observer) {
            o.disconnect();
        }
    }

    fn queue_attribute_record(&mut self, target: NodeId, name: &str, old_value: Option<String>) {
        for observer in self.observers.iter_mut() {
            if observer.matches(target, name) {
                trace!(target: "wai_dom", ?target, attribute = name, "queueing mutation record");
                observer.push_record(MutationRecord {
                    target,
                    attribute_name: name.to_string(),
                    old_value: old_value.clone(),
                });
            }
        }
    }
}
