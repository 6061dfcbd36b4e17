//! Attribute Accessors
//!
//! Thin accessors bound to one validated attribute name. Stateless with
//! respect to any element: every call takes the document and an optional
//! target explicitly, and detached targets degrade to `None`/`false`.

use std::ops::Deref;

use wai_dom::{Document, NodeId};

use crate::AriaError;

/// Accessor seam the mediation core reads and writes attributes through
pub trait AttributeAccess: std::fmt::Debug {
    /// The full attribute name this accessor is bound to
    fn name(&self) -> &str;

    /// Raw attribute string; `None` for a detached target or absent attribute
    fn read(&self, doc: &Document, element: Option<NodeId>) -> Option<String>;

    /// Set the attribute; false for a detached target
    fn write(&self, doc: &mut Document, element: Option<NodeId>, value: &str) -> bool;

    /// Remove the attribute; false for a detached target
    fn clear(&self, doc: &mut Document, element: Option<NodeId>) -> bool;

    fn exists(&self, doc: &Document, element: Option<NodeId>) -> bool;

    /// True if the attribute is absent or present but blank
    fn is_empty(&self, doc: &Document, element: Option<NodeId>) -> bool;
}

/// Accessor for one plain attribute (e.g. `role`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: String,
}

impl Attribute {
    /// Validate and bind an attribute name
    pub fn new(name: &str) -> Result<Self, AriaError> {
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(AriaError::InvalidAttributeName(name.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
        })
    }
}

impl AttributeAccess for Attribute {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self, doc: &Document, element: Option<NodeId>) -> Option<String> {
        let node = element?;
        doc.get_attribute(node, &self.name).map(str::to_string)
    }

    fn write(&self, doc: &mut Document, element: Option<NodeId>, value: &str) -> bool {
        match element {
            Some(node) => doc.set_attribute(node, &self.name, value),
            None => false,
        }
    }

    fn clear(&self, doc: &mut Document, element: Option<NodeId>) -> bool {
        match element {
            Some(node) => {
                doc.remove_attribute(node, &self.name);
                true
            }
            None => false,
        }
    }

    fn exists(&self, doc: &Document, element: Option<NodeId>) -> bool {
        element.is_some_and(|node| doc.has_attribute(node, &self.name))
    }

    fn is_empty(&self, doc: &Document, element: Option<NodeId>) -> bool {
        match element.and_then(|node| doc.get_attribute(node, &self.name)) {
            Some(value) => value.is_empty(),
            None => true,
        }
    }
}

/// Accessor for one `aria-` prefixed attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AriaAttribute {
    inner: Attribute,
}

impl AriaAttribute {
    pub const PREFIX: &'static str = "aria-";

    /// Bind an already-prefixed name; rejects names without the prefix
    pub fn new(name: &str) -> Result<Self, AriaError> {
        if !name.starts_with(Self::PREFIX) {
            return Err(AriaError::MissingAriaPrefix(name.to_string()));
        }
        Ok(Self {
            inner: Attribute::new(name)?,
        })
    }

    /// Canonicalize (prefix when missing) and bind, so `create("label")`
    /// and `create("aria-label")` are interchangeable
    pub fn create(name: &str) -> Result<Self, AriaError> {
        Self::new(&Self::prefix(name))
    }

    /// Add the prefix unless already present
    pub fn prefix(name: &str) -> String {
        if name.starts_with(Self::PREFIX) {
            name.to_string()
        } else {
            format!("{}{}", Self::PREFIX, name)
        }
    }

    /// Strip the prefix if present
    pub fn unprefix(name: &str) -> &str {
        name.strip_prefix(Self::PREFIX).unwrap_or(name)
    }
}

impl Deref for AriaAttribute {
    type Target = Attribute;

    fn deref(&self) -> &Attribute {
        &self.inner
    }
}

impl AttributeAccess for AriaAttribute {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn read(&self, doc: &Document, element: Option<NodeId>) -> Option<String> {
        self.inner.read(doc, element)
    }

    fn write(&self, doc: &mut Document, element: Option<NodeId>, value: &str) -> bool {
        self.inner.write(doc, element, value)
    }

    fn clear(&self, doc: &mut Document, element: Option<NodeId>) -> bool {
        self.inner.clear(doc, element)
    }

    fn exists(&self, doc: &Document, element: Option<NodeId>) -> bool {
        self.inner.exists(doc, element)
    }

    fn is_empty(&self, doc: &Document, element: Option<NodeId>) -> bool {
        self.inner.is_empty(doc, element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_validation() {
        assert!(Attribute::new("role").is_ok());
        assert!(Attribute::new("aria-label").is_ok());
        assert_eq!(
            Attribute::new(""),
            Err(AriaError::InvalidAttributeName(String::new()))
        );
        assert_eq!(
            Attribute::new("bad name"),
            Err(AriaError::InvalidAttributeName("bad name".to_string()))
        );
    }

    #[test]
    fn test_aria_prefix_enforced() {
        assert!(AriaAttribute::new("aria-label").is_ok());
        assert_eq!(
            AriaAttribute::new("label"),
            Err(AriaError::MissingAriaPrefix("label".to_string()))
        );
    }

    #[test]
    fn test_create_canonicalizes() {
        let bare = AriaAttribute::create("label").unwrap();
        let prefixed = AriaAttribute::create("aria-label").unwrap();
        assert_eq!(bare, prefixed);
        assert_eq!(bare.name(), "aria-label");
    }

    #[test]
    fn test_prefix_unprefix() {
        assert_eq!(AriaAttribute::prefix("busy"), "aria-busy");
        assert_eq!(AriaAttribute::prefix("aria-busy"), "aria-busy");
        assert_eq!(AriaAttribute::unprefix("aria-busy"), "busy");
        assert_eq!(AriaAttribute::unprefix("busy"), "busy");
    }

    #[test]
    fn test_detached_element_sentinels() {
        let mut doc = Document::new();
        let attr = Attribute::new("aria-label").unwrap();

        assert!(attr.read(&doc, None).is_none());
        assert!(!attr.write(&mut doc, None, "x"));
        assert!(!attr.clear(&mut doc, None));
        assert!(!attr.exists(&doc, None));
        assert!(attr.is_empty(&doc, None));
    }

    #[test]
    fn test_read_write_clear() {
        let mut doc = Document::new();
        let el = doc.create_element("div");
        let attr = AriaAttribute::create("label").unwrap();

        assert!(attr.read(&doc, Some(el)).is_none());
        assert!(attr.write(&mut doc, Some(el), "Close"));
        assert_eq!(attr.read(&doc, Some(el)), Some("Close".to_string()));
        assert!(attr.exists(&doc, Some(el)));
        assert!(!attr.is_empty(&doc, Some(el)));

        assert!(attr.clear(&mut doc, Some(el)));
        assert!(!attr.exists(&doc, Some(el)));
    }

    #[test]
    fn test_is_empty_for_blank_value() {
        let mut doc = Document::new();
        let el = doc.create_element("div");
        let attr = AriaAttribute::create("label").unwrap();

        attr.write(&mut doc, Some(el), "");
        assert!(attr.exists(&doc, Some(el)));
        assert!(attr.is_empty(&doc, Some(el)));
    }
}
