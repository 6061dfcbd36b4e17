//! Mediator
//!
//! Binds one typed value to one attribute on one element and keeps the two
//! sides converged: value writes push into the attribute within the same
//! call, external attribute changes pull back into the value. An empty
//! value means an absent attribute, never a present-but-blank one.

use std::rc::Rc;

use tracing::trace;
use wai_dom::Document;

use crate::attribute::AttributeAccess;
use crate::observer::ListenerId;
use crate::reference::ElementRef;
use crate::value::{Input, PropertyValue, Value};

/// Synchronizes one `PropertyValue` with one DOM attribute
#[derive(Debug)]
pub struct Mediator {
    value: PropertyValue,
    attribute: Rc<dyn AttributeAccess>,
    target: ElementRef,
}

impl Mediator {
    pub fn new(value: PropertyValue, attribute: Rc<dyn AttributeAccess>, target: ElementRef) -> Self {
        Self {
            value,
            attribute,
            target,
        }
    }

    pub fn target(&self) -> ElementRef {
        self.target
    }

    pub fn attribute_name(&self) -> &str {
        self.attribute.name()
    }

    /// Coerce and store `input`, then push the result into the attribute.
    /// Returns whether the stored value is non-empty.
    pub fn write(&mut self, doc: &mut Document, input: impl Into<Input>) -> bool {
        let input = input.into();
        let stored = self.value.write(doc, &input);
        self.update_from_value(doc);
        stored
    }

    pub fn read(&self) -> &Value {
        self.value.read()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Whether the attribute is currently present on the target
    pub fn exists(&self, doc: &Document) -> bool {
        self.attribute.exists(doc, self.target.node())
    }

    /// Empty the value and remove the attribute
    pub fn clear(&mut self, doc: &mut Document) {
        self.value.clear();
        self.update_from_value(doc);
    }

    /// Register a listener on the underlying value's updates
    pub fn observe(&mut self, listener: impl FnMut(&Value) + 'static) -> ListenerId {
        self.value.observe(listener)
    }

    pub fn unobserve(&mut self, id: ListenerId) -> bool {
        self.value.unobserve(id)
    }

    /// Push the current value into the attribute: empty clears (attribute
    /// absent), anything else writes the serialized form. Returns whether
    /// the DOM was touched.
    pub fn update_from_value(&mut self, doc: &mut Document) -> bool {
        let node = self.target.node();
        if self.value.is_empty() {
            if self.attribute.exists(doc, node) {
                trace!(
                    target: "wai_aria",
                    attribute = self.attribute.name(),
                    "clearing attribute for empty value"
                );
                self.attribute.clear(doc, node)
            } else {
                false
            }
        } else {
            let serialized = self.value.serialize(doc);
            trace!(
                target: "wai_aria",
                attribute = self.attribute.name(),
                value = %serialized,
                "pushing value into attribute"
            );
            self.attribute.write(doc, node, &serialized)
        }
    }

    /// Pull the attribute's current state into the value: absent or blank
    /// clears, anything else re-coerces the raw string. Never writes back
    /// into the DOM, so pulls cannot feed the observer loop.
    pub fn update_from_attribute(&mut self, doc: &mut Document) {
        let node = self.target.node();
        if self.attribute.is_empty(doc, node) {
            self.value.clear();
        } else if let Some(raw) = self.attribute.read(doc, node) {
            trace!(
                target: "wai_aria",
                attribute = self.attribute.name(),
                raw = %raw,
                "pulling attribute into value"
            );
            self.value.write(doc, &Input::Text(raw));
        }
    }

    // List forwarding. Any change re-pushes into the attribute.

    pub fn add(&mut self, doc: &mut Document, items: &[Input]) -> bool {
        let changed = self.value.add(doc, items);
        if changed {
            self.update_from_value(doc);
        }
        changed
    }

    pub fn remove(&mut self, doc: &mut Document, items: &[Input]) -> bool {
        let changed = self.value.remove(doc, items);
        if changed {
            self.update_from_value(doc);
        }
        changed
    }

    pub fn contains(&self, doc: &Document, item: &Input) -> bool {
        self.value.contains(doc, item)
    }

    /// Toggle one token/element; returns the new state
    pub fn toggle(&mut self, doc: &mut Document, item: &Input, force: Option<bool>) -> bool {
        let before = self.value.contains(doc, item);
        let state = self.value.toggle(doc, item, force);
        if state != before {
            self.update_from_value(doc);
        }
        state
    }

    pub fn replace(&mut self, doc: &mut Document, old: &Input, new: &Input) -> bool {
        let changed = self.value.replace(doc, old, new);
        if changed {
            self.update_from_value(doc);
        }
        changed
    }

    pub fn item(&self, index: usize) -> Option<Value> {
        self.value.item(index)
    }
}
