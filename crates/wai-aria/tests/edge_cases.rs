//! Edge case tests for wai-aria
//!
//! Degenerate inputs, detached targets, and observer corner cases.

use wai_aria::{
    AriaAttribute, AriaElement, AriaError, ElementRef, Input, Mediator, PropertyFactory,
    PropertyKind, PropertyValue, State, Value,
};
use wai_dom::Document;
use std::rc::Rc;

fn standard_element(doc: &mut Document) -> AriaElement {
    let node = doc.create_element("div");
    AriaElement::standard(doc, node)
}

#[test]
fn test_garbage_numeric_input_removes_attribute() {
    let mut doc = Document::new();
    let mut el = standard_element(&mut doc);

    el.set(&mut doc, "valuemax", 100).unwrap();
    assert_eq!(doc.get_attribute(el.node(), "aria-valuemax"), Some("100"));

    assert!(!el.set(&mut doc, "valuemax", "lots").unwrap());
    assert!(!doc.has_attribute(el.node(), "aria-valuemax"));
    assert_eq!(el.get(&mut doc, "valuemax").unwrap(), Value::Number(None));
}

#[test]
fn test_non_finite_numbers_are_empty() {
    let mut doc = Document::new();
    let mut el = standard_element(&mut doc);

    assert!(!el.set(&mut doc, "valuenow", f64::NAN).unwrap());
    assert!(!el.set(&mut doc, "valuenow", f64::INFINITY).unwrap());
    assert!(!doc.has_attribute(el.node(), "aria-valuenow"));
}

#[test]
fn test_unresolvable_references_drop_out() {
    let mut doc = Document::new();
    let named = doc.create_element("span");
    doc.set_attribute(named, "id", "real");

    let mut el = standard_element(&mut doc);
    el.set(&mut doc, "controls", vec!["ghost", "real", "phantom"])
        .unwrap();
    assert_eq!(doc.get_attribute(el.node(), "aria-controls"), Some("real"));

    assert!(!el.set(&mut doc, "controls", "ghost phantom").unwrap());
    assert!(!doc.has_attribute(el.node(), "aria-controls"));
}

#[test]
fn test_reference_to_missing_id_is_null() {
    let mut doc = Document::new();
    let mut el = standard_element(&mut doc);

    assert!(!el.set(&mut doc, "activedescendant", "nobody").unwrap());
    assert!(!doc.has_attribute(el.node(), "aria-activedescendant"));
    assert_eq!(
        el.get(&mut doc, "activedescendant").unwrap(),
        Value::Node(ElementRef::NULL)
    );
}

#[test]
fn test_blank_attribute_reads_as_empty_value() {
    let mut doc = Document::new();
    let node = doc.create_element("div");
    doc.set_attribute(node, "aria-label", "");

    let mut el = AriaElement::standard(&mut doc, node);
    assert_eq!(
        el.get(&mut doc, "label").unwrap(),
        Value::Text(String::new())
    );
}

#[test]
fn test_whitespace_only_tokens() {
    let mut doc = Document::new();
    let mut el = standard_element(&mut doc);

    assert!(!el.set(&mut doc, "relevant", "   \t  ").unwrap());
    assert!(!doc.has_attribute(el.node(), "aria-relevant"));

    el.set(&mut doc, "relevant", "  additions   text  ").unwrap();
    assert_eq!(
        doc.get_attribute(el.node(), "aria-relevant"),
        Some("additions text")
    );
}

#[test]
fn test_detached_mediator_never_panics() {
    let mut doc = Document::new();
    let attribute = Rc::new(AriaAttribute::create("label").unwrap());
    let mut mediator = Mediator::new(
        PropertyValue::new(PropertyKind::Text),
        attribute,
        ElementRef::NULL,
    );

    assert!(mediator.write(&mut doc, "orphan"));
    mediator.clear(&mut doc);
    mediator.update_from_attribute(&mut doc);
    assert!(mediator.is_empty());
}

#[test]
fn test_identify_rejects_blank_existing_id() {
    let mut doc = Document::new();
    let node = doc.create_element("div");
    doc.set_attribute(node, "id", "  ");

    let id = ElementRef::new(node).identify(&mut doc).unwrap();
    assert!(id.starts_with("wai-"));
    assert_eq!(doc.get_attribute(node, "id"), Some(id.as_str()));
}

#[test]
fn test_same_attribute_external_change_within_suppressed_batch() {
    let mut doc = Document::new();
    let mut el = standard_element(&mut doc);

    // One own write and one external write before the next sync: the
    // suppression consumes exactly the first record.
    el.set(&mut doc, "level", 1).unwrap();
    doc.set_attribute(el.node(), "aria-level", "2");

    el.sync(&mut doc);
    assert_eq!(el.get(&mut doc, "level").unwrap(), Value::Number(Some(2.0)));
}

#[test]
fn test_repeated_sync_is_idempotent() {
    let mut doc = Document::new();
    let mut el = standard_element(&mut doc);

    doc.set_attribute(el.node(), "aria-hidden", "true");
    el.get(&mut doc, "hidden").unwrap();

    el.sync(&mut doc);
    el.sync(&mut doc);
    assert_eq!(
        el.get(&mut doc, "hidden").unwrap(),
        Value::State(State::True)
    );
}

#[test]
fn test_unprefixed_lookup_does_not_leak_to_role() {
    let mut doc = Document::new();
    let mut el = standard_element(&mut doc);

    // "aria-role" is not a property; only bare "role" is registered.
    el.set(&mut doc, "role", "tab").unwrap();
    assert_eq!(doc.get_attribute(el.node(), "role"), Some("tab"));
    assert!(!doc.has_attribute(el.node(), "aria-role"));
}

#[test]
fn test_factory_rejects_blank_names() {
    let mut factory = PropertyFactory::new();
    assert_eq!(
        factory.add_aria("", PropertyKind::Text).unwrap_err(),
        AriaError::InvalidPropertyName
    );
}

#[test]
fn test_list_input_nested_flattening() {
    let mut doc = Document::new();
    let mut el = standard_element(&mut doc);

    let input = Input::List(vec![
        "copy move".into(),
        Input::List(vec!["link".into(), "copy".into()]),
    ]);
    el.set(&mut doc, "dropeffect", input).unwrap();
    assert_eq!(
        doc.get_attribute(el.node(), "aria-dropeffect"),
        Some("copy move link")
    );
}
