//! Element References
//!
//! Identity of one element for ARIA purposes: lazy ID generation and
//! resolution of elements, ID strings, or existing references. Arena
//! `NodeId`s give stable value identity, so no element cache is needed.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;
use wai_dom::{Document, NodeId};

use crate::value::Input;

/// Prefix for generated element IDs
pub const GENERATED_ID_PREFIX: &str = "wai-";

static NEXT_GENERATED: AtomicU64 = AtomicU64::new(0);

/// Reference to one element, or the distinguished null reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ElementRef(Option<NodeId>);

impl ElementRef {
    /// "No element"
    pub const NULL: ElementRef = ElementRef(None);

    pub fn new(node: NodeId) -> Self {
        Self(Some(node))
    }

    pub fn node(&self) -> Option<NodeId> {
        self.0
    }

    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }

    /// Ensure the element has an `id` attribute and return it.
    ///
    /// Idempotent: an existing non-blank ID is returned unchanged. Generated
    /// candidates come from a monotonic counter and skip IDs already present
    /// in the document. `None` for the null reference or a stale handle.
    pub fn identify(&self, doc: &mut Document) -> Option<String> {
        let node = self.0?;
        doc.element(node)?;

        if let Some(existing) = doc.get_attribute(node, "id") {
            // Blank IDs are not addressable; regenerate instead.
            if !existing.trim().is_empty() {
                return Some(existing.to_string());
            }
        }

        let id = loop {
            let n = NEXT_GENERATED.fetch_add(1, Ordering::Relaxed);
            let candidate = format!("{GENERATED_ID_PREFIX}{n}");
            if doc.get_element_by_id(&candidate).is_none() {
                break candidate;
            }
        };
        debug!(target: "wai_aria", id = %id, "generated element id");
        doc.set_attribute(node, "id", &id);
        Some(id)
    }

    /// Resolve an input into a reference: an element handle is wrapped, an
    /// ID string is looked up, anything else yields the null reference.
    pub fn interpret(doc: &Document, input: &Input) -> ElementRef {
        match input {
            Input::Node(node) if doc.element(*node).is_some() => ElementRef::new(*node),
            Input::Text(id) => match doc.get_element_by_id(id.trim()) {
                Some(node) => ElementRef::new(node),
                None => ElementRef::NULL,
            },
            _ => ElementRef::NULL,
        }
    }
}

impl From<NodeId> for ElementRef {
    fn from(node: NodeId) -> Self {
        Self::new(node)
    }
}
