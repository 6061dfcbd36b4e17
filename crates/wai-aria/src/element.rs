//! Aria Element
//!
//! Front door of the crate: one `AriaElement` per DOM element, dispatching
//! property access to lazily materialized Mediators and reconciling
//! external attribute mutations through an explicit `sync` step. Mutations
//! the element caused itself are counted and skipped during `sync`, so its
//! own writes never echo back as updates.

use std::cell::RefCell;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, trace};
use wai_dom::{Document, NodeId, ObserverId};

use crate::attribute::AriaAttribute;
use crate::factory::PropertyFactory;
use crate::mediator::Mediator;
use crate::observer::ListenerId;
use crate::reference::ElementRef;
use crate::value::{Input, Value};
use crate::AriaError;

/// Property access surface of one element
#[derive(Debug)]
pub struct AriaElement {
    node: NodeId,
    registry: Rc<RefCell<PropertyFactory>>,
    mediators: HashMap<String, Mediator>,
    observer: ObserverId,
    /// Pending self-inflicted mutation records per attribute name
    suppressed: HashMap<String, usize>,
}

impl AriaElement {
    /// Bind to `node` and start observing its attribute mutations
    pub fn attach(
        doc: &mut Document,
        node: NodeId,
        registry: Rc<RefCell<PropertyFactory>>,
    ) -> Self {
        let observer = doc.observe_attributes(node, None);
        debug!(target: "wai_aria", ?node, "attaching aria element");
        Self {
            node,
            registry,
            mediators: HashMap::new(),
            observer,
            suppressed: HashMap::new(),
        }
    }

    /// Bind with a private registry holding the standard vocabulary
    pub fn standard(doc: &mut Document, node: NodeId) -> Self {
        Self::attach(doc, node, Rc::new(RefCell::new(PropertyFactory::standard())))
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Current value of `name` (registered name or full attribute name).
    /// First access materializes the Mediator, seeded from the attribute.
    pub fn get(&mut self, doc: &mut Document, name: &str) -> Result<Value, AriaError> {
        Ok(self.mediator(doc, name)?.read().clone())
    }

    /// Coerce `input` into the property and push the result into the
    /// attribute. Returns whether the stored value is non-empty.
    pub fn set(
        &mut self,
        doc: &mut Document,
        name: &str,
        input: impl Into<Input>,
    ) -> Result<bool, AriaError> {
        let (stored, mutated, attribute) = {
            let mediator = self.mediator(doc, name)?;
            let existed = mediator.exists(doc);
            let stored = mediator.write(doc, input);
            // A non-empty store always writes; an empty one only removes
            // an attribute that was present.
            (stored, stored || existed, mediator.attribute_name().to_string())
        };
        if mutated {
            self.suppress(attribute);
        }
        Ok(stored)
    }

    /// Empty the property and remove its attribute
    pub fn clear(&mut self, doc: &mut Document, name: &str) -> Result<(), AriaError> {
        let (existed, attribute) = {
            let mediator = self.mediator(doc, name)?;
            let existed = mediator.exists(doc);
            mediator.clear(doc);
            (existed, mediator.attribute_name().to_string())
        };
        if existed {
            self.suppress(attribute);
        }
        Ok(())
    }

    /// Register a listener on one property's value updates
    pub fn observe(
        &mut self,
        doc: &mut Document,
        name: &str,
        listener: impl FnMut(&Value) + 'static,
    ) -> Result<ListenerId, AriaError> {
        Ok(self.mediator(doc, name)?.observe(listener))
    }

    pub fn unobserve(
        &mut self,
        doc: &mut Document,
        name: &str,
        id: ListenerId,
    ) -> Result<bool, AriaError> {
        Ok(self.mediator(doc, name)?.unobserve(id))
    }

    /// The Mediator behind `name`, materializing it on first access.
    ///
    /// DOM writes made directly through the returned Mediator are not
    /// counted as self-inflicted; the next `sync` pulls them back in, which
    /// is idempotent but re-announces the value.
    pub fn mediator(&mut self, doc: &mut Document, name: &str) -> Result<&mut Mediator, AriaError> {
        let property = self
            .registry
            .borrow()
            .recognize(&[name, AriaAttribute::unprefix(name)])
            .ok_or_else(|| AriaError::UnknownProperty(name.to_string()))?
            .to_string();
        match self.mediators.entry(property) {
            Entry::Occupied(slot) => Ok(slot.into_mut()),
            Entry::Vacant(slot) => {
                let mut mediator = self
                    .registry
                    .borrow()
                    .create(slot.key(), ElementRef::new(self.node))?;
                // Seed from whatever the markup already carries.
                mediator.update_from_attribute(doc);
                trace!(target: "wai_aria", property = %slot.key(), "materialized mediator");
                Ok(slot.insert(mediator))
            }
        }
    }

    /// Drain pending attribute mutation records and pull external changes
    /// into their Mediators, materializing Mediators on demand for
    /// recognized attributes. Self-inflicted records are consumed against
    /// the suppression counts.
    pub fn sync(&mut self, doc: &mut Document) {
        for record in doc.take_records(self.observer) {
            let attribute = record.attribute_name;
            if let Entry::Occupied(mut count) = self.suppressed.entry(attribute.clone()) {
                *count.get_mut() -= 1;
                if *count.get() == 0 {
                    count.remove();
                }
                trace!(
                    target: "wai_aria",
                    attribute = %attribute,
                    "skipping self-inflicted mutation"
                );
                continue;
            }
            let property = self
                .registry
                .borrow()
                .recognize(&[AriaAttribute::unprefix(&attribute), attribute.as_str()])
                .map(str::to_string);
            let Some(property) = property else {
                trace!(
                    target: "wai_aria",
                    attribute = %attribute,
                    "ignoring unrecognized attribute mutation"
                );
                continue;
            };
            debug!(
                target: "wai_aria",
                attribute = %attribute,
                "pulling external mutation"
            );
            match self.mediators.entry(property) {
                Entry::Occupied(mut slot) => slot.get_mut().update_from_attribute(doc),
                Entry::Vacant(slot) => {
                    if let Ok(mut mediator) = self
                        .registry
                        .borrow()
                        .create(slot.key(), ElementRef::new(self.node))
                    {
                        mediator.update_from_attribute(doc);
                        slot.insert(mediator);
                    }
                }
            }
        }
    }

    /// Stop observing the element's attribute mutations
    pub fn detach(&mut self, doc: &mut Document) {
        doc.disconnect(self.observer);
    }

    fn suppress(&mut self, attribute: String) {
        *self.suppressed.entry(attribute).or_insert(0) += 1;
    }
}
