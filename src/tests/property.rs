//! Quickcheck properties over generated documents.

use std::io::Cursor;

use quickcheck::QuickCheck;
use serde_json::Value;

use crate::{BoundedStream, Selectors, build_index};

use super::utils::{ArbitraryDoc, events_for, minify, value_at_path};

/// Property: minified bytes decode to a value deeply equal to the source
/// document, and minifying the decoded result reproduces the bytes exactly.
#[test]
fn roundtrip_and_idempotence_quickcheck() {
    fn prop(doc: ArbitraryDoc) -> bool {
        let ArbitraryDoc(doc) = doc;
        let (once, _) = minify(&doc, &Selectors::new());
        let Ok(decoded) = serde_json::from_slice::<Value>(&once) else {
            return false;
        };
        if decoded != doc {
            return false;
        }
        let (twice, _) = minify(&decoded, &Selectors::new());
        once == twice
    }

    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(ArbitraryDoc) -> bool);
}

/// Property: with a match-everything pattern, every container in the document
/// gets a span, and every span reopened through a bounded window reparses to
/// the sub-document at its path.
#[test]
fn every_indexed_span_reopens_to_its_subdocument() {
    fn prop(doc: ArbitraryDoc) -> bool {
        let ArbitraryDoc(doc) = doc;
        let selectors = Selectors::new().pattern(".*").unwrap();
        let (minified, index) = minify(&doc, &selectors);

        index.iter().all(|(path, span)| {
            let window =
                BoundedStream::new(Cursor::new(minified.as_slice()), span.start, span.end)
                    .unwrap();
            let sub: Value = match serde_json::from_reader(window) {
                Ok(sub) => sub,
                Err(_) => return false,
            };
            sub == *value_at_path(&doc, path)
        })
    }

    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(ArbitraryDoc) -> bool);
}

/// Property: the frame stack ends balanced — a full document's event stream
/// never errors, whatever the nesting.
#[test]
fn generated_event_streams_always_index_cleanly() {
    fn prop(doc: ArbitraryDoc) -> bool {
        let ArbitraryDoc(doc) = doc;
        let mut out = Vec::new();
        build_index(events_for(&doc), &mut out, &Selectors::new()).is_ok()
    }

    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(ArbitraryDoc) -> bool);
}
