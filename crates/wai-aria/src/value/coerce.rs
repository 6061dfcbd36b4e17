//! Value Coercion
//!
//! Free functions normalizing arbitrary inputs into each property kind's
//! canonical representation. Coercion never fails: anything that does not
//! fit a kind degrades to its empty value, so garbage coerces to absence
//! instead of reaching the accessibility tree.

use tracing::debug;
use wai_dom::{Document, NodeId};

use crate::reference::ElementRef;
use crate::value::{Input, PropertyKind, State, TokenList, Value};

/// Coerce `input` into the canonical representation of `kind`
pub(crate) fn coerce(kind: PropertyKind, doc: &Document, input: &Input) -> Value {
    match kind {
        PropertyKind::Text => Value::Text(text_of(input)),
        PropertyKind::Float => Value::Number(float_of(input)),
        PropertyKind::Integer => Value::Number(float_of(input).map(f64::floor)),
        PropertyKind::State | PropertyKind::Tristate | PropertyKind::UndefinedState => {
            Value::State(state_of(kind, input))
        }
        PropertyKind::List => Value::Tokens(token_list_of(input)),
        PropertyKind::Reference => Value::Node(ElementRef::interpret(doc, input)),
        PropertyKind::ReferenceList => Value::Nodes(nodes_of(doc, input)),
    }
}

/// Stringify for the basic text kind
fn text_of(input: &Input) -> String {
    match input {
        Input::Text(s) => s.clone(),
        Input::Number(n) => format_number(*n),
        Input::Bool(b) => b.to_string(),
        Input::Node(_) | Input::List(_) | Input::Undefined | Input::Empty => {
            if !matches!(input, Input::Empty) {
                debug!(target: "wai_aria", ?input, "non-text input degraded to empty");
            }
            String::new()
        }
    }
}

/// Numeric coercion; non-numeric and non-finite inputs are empty
fn float_of(input: &Input) -> Option<f64> {
    let n = match input {
        Input::Number(n) => Some(*n),
        Input::Text(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|n| n.is_finite())
}

/// Boolean-family coercion; `kind` decides which third state is legal
fn state_of(kind: PropertyKind, input: &Input) -> State {
    match input {
        Input::Bool(true) => State::True,
        Input::Undefined if kind == PropertyKind::UndefinedState => State::Undefined,
        Input::Text(s) => {
            let token = s.trim();
            if token.eq_ignore_ascii_case("true") {
                State::True
            } else if kind == PropertyKind::Tristate && token.eq_ignore_ascii_case("mixed") {
                State::Mixed
            } else if kind == PropertyKind::UndefinedState
                && token.eq_ignore_ascii_case("undefined")
            {
                State::Undefined
            } else {
                State::False
            }
        }
        _ => State::False,
    }
}

/// Tokens contributed by one input: strings split on whitespace, numbers
/// and booleans singleton-wrapped, nested lists flattened
pub(crate) fn tokens_of(input: &Input) -> Vec<String> {
    match input {
        Input::Text(s) => s.split_whitespace().map(str::to_string).collect(),
        Input::Number(n) => vec![format_number(*n)],
        Input::Bool(b) => vec![b.to_string()],
        Input::List(items) => items.iter().flat_map(tokens_of).collect(),
        Input::Node(_) | Input::Undefined | Input::Empty => Vec::new(),
    }
}

fn token_list_of(input: &Input) -> TokenList {
    let mut list = TokenList::new();
    for token in tokens_of(input) {
        list.add(&token);
    }
    list
}

/// Elements contributed by one input, resolved through reference
/// interpretation: handles directly, ID strings token-wise, nested lists
/// flattened. Unresolvable items drop out; order is kept, duplicates are not.
pub(crate) fn nodes_of(doc: &Document, input: &Input) -> Vec<NodeId> {
    let mut nodes = Vec::new();
    collect_nodes(doc, input, &mut nodes);
    nodes
}

fn collect_nodes(doc: &Document, input: &Input, out: &mut Vec<NodeId>) {
    match input {
        Input::Text(s) => {
            for token in s.split_whitespace() {
                push_resolved(doc, &Input::Text(token.to_string()), out);
            }
        }
        Input::List(items) => {
            for item in items {
                collect_nodes(doc, item, out);
            }
        }
        _ => push_resolved(doc, input, out),
    }
}

fn push_resolved(doc: &Document, input: &Input, out: &mut Vec<NodeId>) {
    if let Some(node) = ElementRef::interpret(doc, input).node() {
        if !out.contains(&node) {
            out.push(node);
        }
    }
}

/// Attribute string form of a number: integral values drop the fraction
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
