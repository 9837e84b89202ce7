//! The single-pass minifying / indexing transform.
//!
//! [`build_index`] walks a sequence of structural parse events, echoes the
//! document to the sink with all insignificant whitespace removed, and
//! records the output byte span of every container whose path matches the
//! caller's selectors.
//!
//! The pass is a small explicit state machine: a stack of [`Frame`]s tracks,
//! per nesting level, whether the previously completed value still owes a
//! separating comma, and where each currently-open container began in the
//! output. Space is O(max nesting depth); time is O(output bytes).

use std::collections::BTreeMap;
use std::io::Write;

use crate::{
    ParseEvent, PathComponent, Selectors,
    error::{IndexError, ParseError},
    path::path_string,
};

/// A half-open byte range `[start, end)` in the minified output, covering one
/// matched container including its enclosing brackets.
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize)
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Offset of the container's opening `{` or `[`.
    pub start: u64,
    /// Offset one past the container's closing `}` or `]`.
    pub end: u64,
}

impl Span {
    /// The number of bytes covered by the span. The fields are public, so a
    /// hand-built span may have `end < start`; such a span covers no bytes.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if the span covers no bytes. Never the case for a span
    /// produced by [`build_index`]; the smallest container is two bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContainerKind {
    Object,
    Array,
}

/// One entry on the parse frame stack.
///
/// A container open pushes `Pending` *under* its `Container` record: the
/// record is consumed when the container closes, leaving the marker to stand
/// for the container's own value-ness relative to its parent, exactly as a
/// scalar pushes a marker after being written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    /// The most recently completed value at this nesting level may need a
    /// comma before the next sibling token.
    Pending,
    /// An open container and the output offset of its opening bracket.
    Container { kind: ContainerKind, start: u64 },
}

/// Minifies an event stream into `sink` and returns the offset index of all
/// containers whose rendered path matches `selectors`.
///
/// The returned map's offsets are positions in the *minified output*, not the
/// original input. Scalar leaves are never indexed. If the same rendered path
/// closes more than once (duplicate object keys), the later entry wins.
///
/// # Errors
///
/// - [`IndexError::Parse`] if the event sequence yields an `Err` item — the
///   upstream tokenizer rejected the input. The sink may have received a
///   prefix of the output; the caller must discard it.
/// - [`IndexError::Sink`] if a write to `sink` fails. Nothing is retried.
/// - [`IndexError::UnbalancedClose`] if a close event arrives with no open
///   container, which indicates a broken event source.
pub fn build_index<I, W>(
    events: I,
    sink: &mut W,
    selectors: &Selectors,
) -> Result<BTreeMap<String, Span>, IndexError>
where
    I: IntoIterator<Item = Result<ParseEvent, ParseError>>,
    W: Write,
{
    let mut pass = Pass {
        sink,
        pos: 0,
        stack: Vec::new(),
        index: BTreeMap::new(),
        selectors,
    };
    for event in events {
        pass.step(event?)?;
    }
    Ok(pass.index)
}

struct Pass<'a, W> {
    sink: &'a mut W,
    /// Bytes written so far; the coordinate space of every recorded span.
    pos: u64,
    stack: Vec<Frame>,
    index: BTreeMap<String, Span>,
    selectors: &'a Selectors,
}

impl<W: Write> Pass<'_, W> {
    fn step(&mut self, event: ParseEvent) -> Result<(), IndexError> {
        // A pending marker on top means the previous sibling value is
        // complete. Anything but a closer gets a comma first; a closer never
        // does, because the value just completed has no following sibling.
        if self.stack.last() == Some(&Frame::Pending) {
            if !event.is_container_close() {
                self.put(b",")?;
            }
            self.stack.pop();
        }

        match event {
            ParseEvent::ObjectBegin { .. } => self.open(ContainerKind::Object, b"{"),
            ParseEvent::ArrayStart { .. } => self.open(ContainerKind::Array, b"["),
            ParseEvent::ObjectEnd { path } => self.close(ContainerKind::Object, b"}", &path),
            ParseEvent::ArrayEnd { path } => self.close(ContainerKind::Array, b"]", &path),
            ParseEvent::Key { name, .. } => {
                self.put(b"\"")?;
                self.put_escaped(&name)?;
                self.put(b"\":")
            }
            ParseEvent::Null { .. } => self.scalar(b"null"),
            ParseEvent::Boolean { value, .. } => {
                self.scalar(if value { b"true" as &[u8] } else { b"false" })
            }
            ParseEvent::Number { literal, .. } => self.scalar(literal.as_bytes()),
            ParseEvent::String { value, .. } => {
                self.put(b"\"")?;
                self.put_escaped(&value)?;
                self.put(b"\"")?;
                self.stack.push(Frame::Pending);
                Ok(())
            }
        }
    }

    fn open(&mut self, kind: ContainerKind, bracket: &[u8]) -> Result<(), IndexError> {
        let start = self.pos;
        self.put(bracket)?;
        self.stack.push(Frame::Pending);
        self.stack.push(Frame::Container { kind, start });
        Ok(())
    }

    fn close(
        &mut self,
        kind: ContainerKind,
        bracket: &[u8],
        path: &[PathComponent],
    ) -> Result<(), IndexError> {
        self.put(bracket)?;
        match self.stack.pop() {
            Some(Frame::Container { kind: opened, start }) if opened == kind => {
                let rendered = path_string(path);
                if self.selectors.matches(&rendered) {
                    self.index.insert(
                        rendered,
                        Span {
                            start,
                            end: self.pos,
                        },
                    );
                }
                Ok(())
            }
            _ => Err(IndexError::UnbalancedClose {
                path: path_string(path),
            }),
        }
    }

    fn scalar(&mut self, bytes: &[u8]) -> Result<(), IndexError> {
        self.put(bytes)?;
        self.stack.push(Frame::Pending);
        Ok(())
    }

    fn put(&mut self, bytes: &[u8]) -> Result<(), IndexError> {
        self.sink.write_all(bytes).map_err(IndexError::Sink)?;
        self.pos += bytes.len() as u64;
        Ok(())
    }

    fn put_escaped(&mut self, text: &str) -> Result<(), IndexError> {
        let written = write_escaped(self.sink, text).map_err(IndexError::Sink)?;
        self.pos += written;
        Ok(())
    }
}

/// Writes `src` with JSON string escaping applied and returns the number of
/// bytes written (no surrounding quotes).
///
/// The tokenizer hands back decoded text, so content must be re-escaped on
/// the way out: `"`, `\`, control characters, and the Unicode line
/// separators U+2028/U+2029 which pre-2019 JSON parsers may not handle
/// correctly.
fn write_escaped<W: Write>(sink: &mut W, src: &str) -> std::io::Result<u64> {
    let mut written = 0u64;
    let mut run_start = 0usize;
    for (i, c) in src.char_indices() {
        let escaped: Option<&[u8]> = match c {
            '"' => Some(b"\\\""),
            '\\' => Some(b"\\\\"),
            '\u{2028}' | '\u{2029}' => Some(&[]),
            // JSON escapes are exactly 4 hex digits; characters outside the
            // BMP never need escaping and pass through as UTF-8.
            c if c.is_ascii_control() || (c.is_control() && c as u32 <= 0xFFFF) => Some(&[]),
            _ => None,
        };
        let Some(replacement) = escaped else {
            continue;
        };
        if run_start < i {
            sink.write_all(&src.as_bytes()[run_start..i])?;
            written += (i - run_start) as u64;
        }
        if replacement.is_empty() {
            write!(sink, "\\u{:04X}", c as u32)?;
            written += 6;
        } else {
            sink.write_all(replacement)?;
            written += replacement.len() as u64;
        }
        run_start = i + c.len_utf8();
    }
    if run_start < src.len() {
        sink.write_all(&src.as_bytes()[run_start..])?;
        written += (src.len() - run_start) as u64;
    }
    Ok(written)
}
