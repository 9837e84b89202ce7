//! Single-pass streaming JSON minifier with a container offset index.
//!
//! This crate does two cooperating things:
//!
//! 1. [`build_index`] consumes a stream of structural parse events (produced
//!    by any streaming JSON tokenizer that reports the current path per
//!    event), writes a minified byte-for-byte-equivalent copy of the document
//!    to a sink, and records the byte span — in the *minified* output's
//!    coordinate space — of every object or array whose path matches a set of
//!    [`Selectors`].
//! 2. [`BoundedStream`] exposes an arbitrary `[start, stop)` byte range of an
//!    underlying stream as an independent read-only stream whose offset 0 is
//!    `start`. Handing a recorded span's window to an ordinary JSON reader
//!    re-materialises the sub-document without re-parsing anything else.
//!
//! # Examples
//!
//! ```
//! use std::io::Cursor;
//!
//! use jsonindex::{BoundedStream, ParseEvent, Selectors, build_index, path};
//!
//! // Event stream for `{"a":[1]}`, as a tokenizer would report it.
//! let events = vec![
//!     Ok(ParseEvent::ObjectBegin { path: path![] }),
//!     Ok(ParseEvent::Key {
//!         path: path![],
//!         name: "a".into(),
//!     }),
//!     Ok(ParseEvent::ArrayStart { path: path!["a"] }),
//!     Ok(ParseEvent::Number {
//!         path: path!["a", 0],
//!         literal: "1".into(),
//!     }),
//!     Ok(ParseEvent::ArrayEnd { path: path!["a"] }),
//!     Ok(ParseEvent::ObjectEnd { path: path![] }),
//! ];
//!
//! let selectors = Selectors::new().exact("a");
//! let mut minified = Vec::new();
//! let index = build_index(events, &mut minified, &selectors)?;
//!
//! assert_eq!(minified, br#"{"a":[1]}"#);
//! let span = index["a"];
//! assert_eq!((span.start, span.end), (5, 8));
//!
//! // Reopen just the indexed array.
//! let mut window = BoundedStream::new(Cursor::new(minified), span.start, span.end)?;
//! let mut sub = Vec::new();
//! std::io::Read::read_to_end(&mut window, &mut sub)?;
//! assert_eq!(sub, b"[1]");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod event;
mod indexer;
mod path;
mod selector;
mod substream;

#[cfg(test)]
mod tests;

pub use error::{IndexError, ParseError};
pub use event::{ParseEvent, PathComponent, PathComponentFrom};
pub use indexer::{Span, build_index};
pub use path::{Path, path_string};
pub use selector::Selectors;
pub use substream::BoundedStream;

/// Macro to build a [`Path`] from a heterogeneous list of keys and indices.
///
/// ```rust
/// # use jsonindex::{PathComponent, path};
/// let p = path![0, "foo", 2];
/// assert_eq!(
///     p,
///     vec![
///         PathComponent::Index(0),
///         PathComponent::Key("foo".into()),
///         PathComponent::Index(2)
///     ]
/// );
/// ```
#[macro_export]
macro_rules! path {
    ( $( $elem:expr ),* $(,)? ) => {{
        use $crate::PathComponentFrom;
        ::std::vec![$($crate::PathComponent::from_path_component($elem)),*]
    }};
}
