//! Property Factory
//!
//! Registry mapping property names to their kind/attribute pair, and the
//! construction point for Mediators. Registries are explicitly constructed
//! and passed around; `standard()` is the convenience instance pre-loaded
//! with the WAI-ARIA vocabulary.

use std::collections::HashMap;
use std::rc::Rc;

use tracing::trace;

use crate::attribute::{AriaAttribute, Attribute, AttributeAccess};
use crate::mediator::Mediator;
use crate::reference::ElementRef;
use crate::value::{PropertyKind, PropertyValue};
use crate::AriaError;

/// Whether `add` may replace an existing registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Override {
    Deny,
    Allow,
}

#[derive(Debug, Clone)]
struct Entry {
    kind: PropertyKind,
    attribute: Rc<dyn AttributeAccess>,
}

/// Name-keyed registry of property definitions
#[derive(Debug, Default)]
pub struct PropertyFactory {
    entries: HashMap<String, Entry>,
    /// Shared accessors, memoized by canonical attribute name
    attributes: HashMap<String, Rc<AriaAttribute>>,
}

impl PropertyFactory {
    /// An empty registry (isolated/test vocabularies)
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-loaded with the WAI-ARIA property vocabulary
    pub fn standard() -> Self {
        let mut factory = Self::new();
        factory.install_standard_vocabulary();
        factory
    }

    /// Register `name` with its kind/attribute pair. Duplicate names fail
    /// unless `Override::Allow` is passed explicitly.
    pub fn add(
        &mut self,
        name: &str,
        kind: PropertyKind,
        attribute: Rc<dyn AttributeAccess>,
        replace: Override,
    ) -> Result<(), AriaError> {
        if name.is_empty() {
            return Err(AriaError::InvalidPropertyName);
        }
        if replace == Override::Deny && self.entries.contains_key(name) {
            return Err(AriaError::AlreadyRegistered(name.to_string()));
        }
        trace!(target: "wai_aria", property = name, ?kind, "registering property");
        self.entries.insert(name.to_string(), Entry { kind, attribute });
        Ok(())
    }

    /// Register `name` against its canonically prefixed ARIA attribute,
    /// sharing one accessor per attribute name
    pub fn add_aria(&mut self, name: &str, kind: PropertyKind) -> Result<(), AriaError> {
        let attribute = self.aria_attribute(name)?;
        self.add(name, kind, attribute, Override::Deny)
    }

    /// Memoized accessor lookup: `"label"` and `"aria-label"` share one
    /// instance
    pub fn aria_attribute(&mut self, name: &str) -> Result<Rc<AriaAttribute>, AriaError> {
        let canonical = AriaAttribute::prefix(name);
        if let Some(existing) = self.attributes.get(&canonical) {
            return Ok(Rc::clone(existing));
        }
        let attribute = Rc::new(AriaAttribute::new(&canonical)?);
        self.attributes.insert(canonical, Rc::clone(&attribute));
        Ok(attribute)
    }

    /// First of the candidate names with a registration
    pub fn recognize<'a>(&self, candidates: &[&'a str]) -> Option<&'a str> {
        candidates
            .iter()
            .copied()
            .find(|name| self.entries.contains_key(*name))
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered property names, unordered
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Build a Mediator for `name` bound to `target`
    pub fn create(&self, name: &str, target: ElementRef) -> Result<Mediator, AriaError> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| AriaError::UnknownProperty(name.to_string()))?;
        Ok(Mediator::new(
            PropertyValue::new(entry.kind),
            Rc::clone(&entry.attribute),
            target,
        ))
    }

    fn install_standard_vocabulary(&mut self) {
        use PropertyKind::*;

        let properties: &[(&str, PropertyKind)] = &[
            // Plain strings
            ("autocomplete", Text),
            ("current", Text),
            ("haspopup", Text),
            ("invalid", Text),
            ("keyshortcuts", Text),
            ("label", Text),
            ("live", Text),
            ("orientation", Text),
            ("placeholder", Text),
            ("roledescription", Text),
            ("sort", Text),
            ("valuetext", Text),
            // Numeric
            ("valuemax", Float),
            ("valuemin", Float),
            ("valuenow", Float),
            ("colcount", Integer),
            ("colindex", Integer),
            ("colspan", Integer),
            ("level", Integer),
            ("posinset", Integer),
            ("rowcount", Integer),
            ("rowindex", Integer),
            ("rowspan", Integer),
            ("setsize", Integer),
            // Booleans, absent when false
            ("atomic", State),
            ("busy", State),
            ("disabled", State),
            ("modal", State),
            ("multiline", State),
            ("multiselectable", State),
            ("readonly", State),
            ("required", State),
            // true/false/mixed
            ("checked", Tristate),
            ("pressed", Tristate),
            // true/false/undefined
            ("expanded", UndefinedState),
            ("grabbed", UndefinedState),
            ("hidden", UndefinedState),
            ("selected", UndefinedState),
            // Token lists
            ("dropeffect", List),
            ("relevant", List),
            // Element references
            ("activedescendant", Reference),
            ("details", Reference),
            ("errormessage", Reference),
            ("controls", ReferenceList),
            ("describedby", ReferenceList),
            ("flowto", ReferenceList),
            ("labelledby", ReferenceList),
            ("owns", ReferenceList),
        ];

        for (name, kind) in properties {
            // Names above are static and prefix-clean; registration cannot
            // fail on a fresh registry.
            let _ = self.add_aria(name, *kind);
        }

        // role is the one unprefixed attribute in the vocabulary.
        if let Ok(role) = Attribute::new("role") {
            let _ = self.add("role", List, Rc::new(role), Override::Deny);
        }
    }
}
