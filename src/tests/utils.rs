//! Shared test helpers: turning a `serde_json::Value` into the event stream a
//! streaming tokenizer would produce, and generating documents for the
//! quickcheck properties.
//!
//! `serde_json` is built with `preserve_order`, so object iteration follows
//! document order and minification is deterministic.

use std::collections::BTreeMap;

use quickcheck::{Arbitrary, Gen};
use serde_json::Value;

use crate::{ParseEvent, PathComponent, Selectors, Span, build_index, error::ParseError, path::Path};

/// The events a conforming tokenizer reports for `value`, in document order.
pub fn events_for(value: &Value) -> Vec<Result<ParseEvent, ParseError>> {
    let mut events = Vec::new();
    walk(value, &mut Vec::new(), &mut events);
    events
}

fn walk(value: &Value, path: &mut Path, out: &mut Vec<Result<ParseEvent, ParseError>>) {
    match value {
        Value::Null => out.push(Ok(ParseEvent::Null { path: path.clone() })),
        Value::Bool(b) => out.push(Ok(ParseEvent::Boolean {
            path: path.clone(),
            value: *b,
        })),
        Value::Number(n) => out.push(Ok(ParseEvent::Number {
            path: path.clone(),
            literal: n.to_string(),
        })),
        Value::String(s) => out.push(Ok(ParseEvent::String {
            path: path.clone(),
            value: s.clone(),
        })),
        Value::Array(items) => {
            out.push(Ok(ParseEvent::ArrayStart { path: path.clone() }));
            for (i, item) in items.iter().enumerate() {
                path.push(PathComponent::Index(i));
                walk(item, path, out);
                path.pop();
            }
            out.push(Ok(ParseEvent::ArrayEnd { path: path.clone() }));
        }
        Value::Object(members) => {
            out.push(Ok(ParseEvent::ObjectBegin { path: path.clone() }));
            for (key, member) in members {
                out.push(Ok(ParseEvent::Key {
                    path: path.clone(),
                    name: key.clone(),
                }));
                path.push(PathComponent::Key(key.clone()));
                walk(member, path, out);
                path.pop();
            }
            out.push(Ok(ParseEvent::ObjectEnd { path: path.clone() }));
        }
    }
}

/// Minifies `value` through [`build_index`], returning the output bytes and
/// the recorded index.
pub fn minify(value: &Value, selectors: &Selectors) -> (Vec<u8>, BTreeMap<String, Span>) {
    let mut out = Vec::new();
    let index = build_index(events_for(value), &mut out, selectors).unwrap();
    (out, index)
}

/// Resolves a rendered dotted path against a document. Only unambiguous for
/// documents whose object keys contain no dots, which the generator below
/// guarantees.
pub fn value_at_path<'a>(doc: &'a Value, path: &str) -> &'a Value {
    let mut current = doc;
    if path.is_empty() {
        return current;
    }
    for segment in path.split('.') {
        current = match current {
            Value::Array(items) => &items[segment.parse::<usize>().unwrap()],
            Value::Object(members) => &members[segment],
            other => panic!("path {path:?} descends into scalar {other:?}"),
        };
    }
    current
}

/// A generated JSON document rooted at a container, with object keys drawn
/// from a dot-free alphabet so rendered paths stay unambiguous.
#[derive(Debug, Clone)]
pub struct ArbitraryDoc(pub Value);

const KEYS: &[&str] = &["a", "b", "c", "id", "name", "rows", "k0", "k1"];

fn arbitrary_value(g: &mut Gen, depth: usize) -> Value {
    let scalar_only = depth == 0;
    let pick = if scalar_only {
        u8::arbitrary(g) % 4
    } else {
        u8::arbitrary(g) % 6
    };
    match pick {
        0 => Value::Null,
        1 => Value::Bool(bool::arbitrary(g)),
        2 => Value::Number(i64::arbitrary(g).into()),
        3 => Value::String(String::arbitrary(g)),
        4 => arbitrary_array(g, depth - 1),
        _ => arbitrary_object(g, depth - 1),
    }
}

fn arbitrary_array(g: &mut Gen, depth: usize) -> Value {
    let len = usize::arbitrary(g) % 4;
    Value::Array((0..len).map(|_| arbitrary_value(g, depth)).collect())
}

fn arbitrary_object(g: &mut Gen, depth: usize) -> Value {
    let len = usize::arbitrary(g) % 4;
    let mut members = serde_json::Map::new();
    for _ in 0..len {
        let key = *g.choose(KEYS).unwrap();
        members.insert(key.to_string(), arbitrary_value(g, depth));
    }
    Value::Object(members)
}

impl Arbitrary for ArbitraryDoc {
    fn arbitrary(g: &mut Gen) -> Self {
        let root = if bool::arbitrary(g) {
            arbitrary_object(g, 3)
        } else {
            arbitrary_array(g, 3)
        };
        ArbitraryDoc(root)
    }
}
