//! Typed Property Values
//!
//! In-memory representation of one ARIA value, independent of any DOM
//! attribute. The kind tag selects the coercion rule; writes announce an
//! `"updated"` event on the instance's own bus.

mod coerce;
mod tokens;

pub use tokens::TokenList;

use tracing::trace;
use wai_dom::{Document, NodeId};

use crate::observer::{EventBus, ListenerId};
use crate::reference::ElementRef;

/// Event announced after every stored write
pub const UPDATED: &str = "updated";

/// Coercion rule tag for one ARIA property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// Plain string (aria-label and friends)
    Text,
    /// Numeric or absent (aria-valuemax)
    Float,
    /// Floored numeric (aria-level)
    Integer,
    /// true/false, absent when false (aria-busy)
    State,
    /// true/false/mixed (aria-checked)
    Tristate,
    /// true/false/undefined (aria-expanded)
    UndefinedState,
    /// Unique ordered tokens (aria-relevant, role)
    List,
    /// One element by ID (aria-activedescendant)
    Reference,
    /// Many elements by ID (aria-controls)
    ReferenceList,
}

impl PropertyKind {
    /// The representation meaning "unspecified" for this kind
    pub fn empty_value(self) -> Value {
        match self {
            Self::Text => Value::Text(String::new()),
            Self::Float | Self::Integer => Value::Number(None),
            Self::State | Self::Tristate | Self::UndefinedState => Value::State(State::False),
            Self::List => Value::Tokens(TokenList::new()),
            Self::Reference => Value::Node(ElementRef::NULL),
            Self::ReferenceList => Value::Nodes(Vec::new()),
        }
    }
}

/// Boolean-family value; which third state is legal depends on the kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    False,
    True,
    Mixed,
    Undefined,
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::False => "false",
            Self::True => "true",
            Self::Mixed => "mixed",
            Self::Undefined => "undefined",
        };
        write!(f, "{s}")
    }
}

/// Canonical stored representation, one variant per kind family
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(Option<f64>),
    State(State),
    Tokens(TokenList),
    Node(ElementRef),
    Nodes(Vec<NodeId>),
}

impl Value {
    /// True iff this equals the owning kind's empty value
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Number(n) => n.is_none(),
            Self::State(s) => *s == State::False,
            Self::Tokens(t) => t.is_empty(),
            Self::Node(r) => r.is_null(),
            Self::Nodes(n) => n.is_empty(),
        }
    }
}

/// Anything a caller may write into a property. Coercion decides what the
/// kind makes of it; nothing here can make a write fail.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Text(String),
    Number(f64),
    Bool(bool),
    Node(NodeId),
    List(Vec<Input>),
    /// The explicit "unset" marker undefined-states accept as a value
    Undefined,
    Empty,
}

impl From<&str> for Input {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Input {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for Input {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for Input {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<bool> for Input {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<NodeId> for Input {
    fn from(node: NodeId) -> Self {
        Self::Node(node)
    }
}

impl From<ElementRef> for Input {
    fn from(reference: ElementRef) -> Self {
        match reference.node() {
            Some(node) => Self::Node(node),
            None => Self::Empty,
        }
    }
}

impl<T: Into<Input>> From<Option<T>> for Input {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Self::Undefined,
        }
    }
}

impl<T: Into<Input>> From<Vec<T>> for Input {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

/// One typed ARIA value with change announcement
#[derive(Debug)]
pub struct PropertyValue {
    kind: PropertyKind,
    value: Value,
    events: EventBus<Value>,
}

impl PropertyValue {
    /// A fresh, empty value of the given kind
    pub fn new(kind: PropertyKind) -> Self {
        Self {
            kind,
            value: kind.empty_value(),
            events: EventBus::new(),
        }
    }

    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    /// Coerce and store `input`; announces `"updated"` and returns whether
    /// the stored value is non-empty. Never fails: invalid input stores the
    /// kind's empty value.
    pub fn write(&mut self, doc: &Document, input: &Input) -> bool {
        self.value = coerce::coerce(self.kind, doc, input);
        trace!(target: "wai_aria", kind = ?self.kind, value = ?self.value, "value written");
        self.announce();
        !self.value.is_empty()
    }

    pub fn read(&self) -> &Value {
        &self.value
    }

    /// Reset to the kind's empty value
    pub fn clear(&mut self) {
        self.value = self.kind.empty_value();
        self.announce();
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Attribute string form. Reference kinds resolve through `identify`,
    /// generating element IDs on demand.
    pub fn serialize(&self, doc: &mut Document) -> String {
        match &self.value {
            Value::Text(s) => s.clone(),
            Value::Number(None) => String::new(),
            Value::Number(Some(n)) => coerce::format_number(*n),
            Value::State(s) => s.to_string(),
            Value::Tokens(t) => t.value(),
            Value::Node(r) => r.identify(doc).unwrap_or_default(),
            Value::Nodes(nodes) => nodes
                .iter()
                .filter_map(|n| ElementRef::new(*n).identify(doc))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// Register a listener fired after each of this instance's own updates
    pub fn observe(&mut self, listener: impl FnMut(&Value) + 'static) -> ListenerId {
        self.events.add_listener(UPDATED, listener)
    }

    pub fn unobserve(&mut self, id: ListenerId) -> bool {
        self.events.remove_listener(UPDATED, id)
    }

    fn announce(&mut self) {
        let snapshot = self.value.clone();
        self.events.emit(UPDATED, &snapshot);
    }

    // List operations. Only the list kinds respond; everything else is a
    // no-op returning false/None, matching the degrade-not-panic contract.

    /// Unique-insert every token/element contributed by `items`
    pub fn add(&mut self, doc: &Document, items: &[Input]) -> bool {
        let changed = match &mut self.value {
            Value::Tokens(list) => {
                let mut changed = false;
                for item in items {
                    for token in coerce::tokens_of(item) {
                        changed |= list.add(&token);
                    }
                }
                changed
            }
            Value::Nodes(nodes) => {
                let mut changed = false;
                for item in items {
                    for node in coerce::nodes_of(doc, item) {
                        if !nodes.contains(&node) {
                            nodes.push(node);
                            changed = true;
                        }
                    }
                }
                changed
            }
            _ => false,
        };
        if changed {
            self.announce();
        }
        changed
    }

    pub fn remove(&mut self, doc: &Document, items: &[Input]) -> bool {
        let changed = match &mut self.value {
            Value::Tokens(list) => {
                let mut changed = false;
                for item in items {
                    for token in coerce::tokens_of(item) {
                        changed |= list.remove(&token);
                    }
                }
                changed
            }
            Value::Nodes(nodes) => {
                let before = nodes.len();
                for item in items {
                    for node in coerce::nodes_of(doc, item) {
                        nodes.retain(|n| *n != node);
                    }
                }
                nodes.len() != before
            }
            _ => false,
        };
        if changed {
            self.announce();
        }
        changed
    }

    pub fn contains(&self, doc: &Document, item: &Input) -> bool {
        match &self.value {
            Value::Tokens(list) => coerce::tokens_of(item)
                .first()
                .is_some_and(|token| list.contains(token)),
            Value::Nodes(nodes) => coerce::nodes_of(doc, item)
                .first()
                .is_some_and(|node| nodes.contains(node)),
            _ => false,
        }
    }

    /// Toggle presence of one token/element; returns the new state
    pub fn toggle(&mut self, doc: &Document, item: &Input, force: Option<bool>) -> bool {
        let present = self.contains(doc, item);
        let want = force.unwrap_or(!present);
        if want == present {
            return present;
        }
        if want {
            self.add(doc, std::slice::from_ref(item));
        } else {
            self.remove(doc, std::slice::from_ref(item));
        }
        self.contains(doc, item)
    }

    /// Swap one token/element for another in place; false if `old` is
    /// absent or `new` does not resolve
    pub fn replace(&mut self, doc: &Document, old: &Input, new: &Input) -> bool {
        let changed = match &mut self.value {
            Value::Tokens(list) => {
                let old_token = coerce::tokens_of(old);
                let new_token = coerce::tokens_of(new);
                match (old_token.first(), new_token.first()) {
                    (Some(o), Some(n)) => list.replace(o, n),
                    _ => false,
                }
            }
            Value::Nodes(nodes) => {
                let old_node = coerce::nodes_of(doc, old);
                let new_node = coerce::nodes_of(doc, new);
                match (old_node.first(), new_node.first()) {
                    (Some(o), Some(n)) => match nodes.iter().position(|x| x == o) {
                        Some(pos) => {
                            if nodes.contains(n) && n != o {
                                nodes.remove(pos);
                            } else {
                                nodes[pos] = *n;
                            }
                            true
                        }
                        None => false,
                    },
                    _ => false,
                }
            }
            _ => false,
        };
        if changed {
            self.announce();
        }
        changed
    }

    /// Item at `index`: a token for lists, a resolved element for
    /// reference lists; `None` out of range or for scalar kinds
    pub fn item(&self, index: usize) -> Option<Value> {
        match &self.value {
            Value::Tokens(list) => list.item(index).map(|t| Value::Text(t.to_string())),
            Value::Nodes(nodes) => nodes
                .get(index)
                .map(|n| Value::Node(ElementRef::new(*n))),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_write_returns_non_empty() {
        let doc = Document::new();
        let mut value = PropertyValue::new(PropertyKind::Text);

        assert!(value.write(&doc, &"hello".into()));
        assert!(!value.write(&doc, &"".into()));
        assert!(value.is_empty());
    }

    #[test]
    fn test_clear_resets_to_empty() {
        let doc = Document::new();
        let mut value = PropertyValue::new(PropertyKind::Integer);

        value.write(&doc, &5.0.into());
        assert_eq!(value.read(), &Value::Number(Some(5.0)));

        value.clear();
        assert!(value.is_empty());
        assert_eq!(value.read(), &Value::Number(None));
    }

    #[test]
    fn test_invalid_input_degrades_to_empty() {
        let doc = Document::new();
        let mut value = PropertyValue::new(PropertyKind::Float);

        value.write(&doc, &"10".into());
        assert!(!value.is_empty());

        assert!(!value.write(&doc, &"garbage".into()));
        assert!(value.is_empty());
    }

    #[test]
    fn test_write_is_idempotent_on_canonical_form() {
        let mut doc = Document::new();
        let mut value = PropertyValue::new(PropertyKind::Integer);

        value.write(&doc, &"10.9".into());
        let first = value.serialize(&mut doc);
        let reread = first.clone();

        value.write(&doc, &reread.into());
        assert_eq!(value.serialize(&mut doc), first);
    }

    #[test]
    fn test_observe_fires_on_own_updates() {
        let doc = Document::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut value = PropertyValue::new(PropertyKind::State);

        let sink = Rc::clone(&seen);
        let id = value.observe(move |v| sink.borrow_mut().push(v.clone()));

        value.write(&doc, &true.into());
        value.clear();
        assert_eq!(
            *seen.borrow(),
            vec![Value::State(State::True), Value::State(State::False)]
        );

        assert!(value.unobserve(id));
        value.write(&doc, &true.into());
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_list_add_remove() {
        let doc = Document::new();
        let mut value = PropertyValue::new(PropertyKind::List);

        value.write(&doc, &vec!["a", "b", "a"].into());
        assert_eq!(value.read(), &Value::Tokens(TokenList::parse("a b")));

        assert!(!value.add(&doc, &["a".into()]));
        assert!(value.add(&doc, &["c".into()]));
        assert!(value.remove(&doc, &["b".into()]));
        assert_eq!(value.read(), &Value::Tokens(TokenList::parse("a c")));
    }

    #[test]
    fn test_list_toggle_and_replace() {
        let doc = Document::new();
        let mut value = PropertyValue::new(PropertyKind::List);

        assert!(value.toggle(&doc, &"copy".into(), None));
        assert!(!value.toggle(&doc, &"copy".into(), None));
        assert!(value.toggle(&doc, &"move".into(), Some(true)));
        assert!(value.replace(&doc, &"move".into(), &"link".into()));
        assert_eq!(value.read(), &Value::Tokens(TokenList::parse("link")));
    }

    #[test]
    fn test_item_access() {
        let doc = Document::new();
        let mut value = PropertyValue::new(PropertyKind::List);
        value.write(&doc, &"a b".into());

        assert_eq!(value.item(0), Some(Value::Text("a".to_string())));
        assert_eq!(value.item(5), None);

        let scalar = PropertyValue::new(PropertyKind::Text);
        assert_eq!(scalar.item(0), None);
    }

    #[test]
    fn test_list_ops_are_noops_for_scalar_kinds() {
        let doc = Document::new();
        let mut value = PropertyValue::new(PropertyKind::State);

        assert!(!value.add(&doc, &["true".into()]));
        assert!(!value.remove(&doc, &["true".into()]));
        assert!(!value.contains(&doc, &"true".into()));
        assert!(!value.replace(&doc, &"a".into(), &"b".into()));
    }

    #[test]
    fn test_reference_list_ops() {
        let mut doc = Document::new();
        let a = doc.create_element("div");
        let b = doc.create_element("div");
        doc.set_attribute(a, "id", "a");
        doc.set_attribute(b, "id", "b");

        let mut value = PropertyValue::new(PropertyKind::ReferenceList);
        assert!(value.add(&doc, &[a.into(), "b".into()]));
        assert!(value.contains(&doc, &a.into()));
        assert!(value.contains(&doc, &"b".into()));
        assert_eq!(value.item(1), Some(Value::Node(ElementRef::new(b))));

        assert!(value.remove(&doc, &["a".into()]));
        assert_eq!(value.read(), &Value::Nodes(vec![b]));
    }

    #[test]
    fn test_serialize() {
        let mut doc = Document::new();

        let mut text = PropertyValue::new(PropertyKind::Text);
        text.write(&doc, &"Close".into());
        assert_eq!(text.serialize(&mut doc), "Close");

        let mut level = PropertyValue::new(PropertyKind::Integer);
        level.write(&doc, &10.9.into());
        assert_eq!(level.serialize(&mut doc), "10");

        let mut checked = PropertyValue::new(PropertyKind::Tristate);
        checked.write(&doc, &"mixed".into());
        assert_eq!(checked.serialize(&mut doc), "mixed");

        let empty = PropertyValue::new(PropertyKind::Float);
        assert_eq!(empty.serialize(&mut doc), "");
    }

    #[test]
    fn test_serialize_references_generates_ids() {
        let mut doc = Document::new();
        let a = doc.create_element("div");
        let mut value = PropertyValue::new(PropertyKind::Reference);

        value.write(&doc, &a.into());
        let serialized = value.serialize(&mut doc);
        assert!(!serialized.is_empty());
        assert_eq!(doc.get_attribute(a, "id"), Some(serialized.as_str()));
    }
}
