//! A read-only window over a byte range of an underlying stream.

use std::io::{self, BufRead, ErrorKind, Read, Seek, SeekFrom, Write};

/// Restricts an underlying stream to the half-open byte range
/// `[start, stop)`, re-based so that offset 0 of the window is `start`.
///
/// For seekable streams the window keeps no cursor of its own: the underlying
/// stream's position is the sole mutable state, and every position this type
/// reports is derived from it. Consequently a `BoundedStream` assumes
/// exclusive use of the stream it wraps; interleaving reads through a second
/// handle moves the shared cursor out from under it. A forward-only stream
/// (one whose `seek` reports [`ErrorKind::Unsupported`]) cannot be asked for
/// its position, so the window counts consumed bytes itself instead and
/// supports a single sequential pass; seeking such a window fails.
///
/// Seeks are clamped into `[start, stop]`, never an error; reads stop at the
/// window end and return `Ok(0)` rather than failing. Writes always fail with
/// [`ErrorKind::Unsupported`] — the window is strictly read-only.
///
/// Dropping the window drops (and thereby closes) the underlying stream;
/// [`into_inner`](Self::into_inner) hands it back instead.
///
/// # Examples
///
/// ```
/// use std::io::{Cursor, Read, Seek, SeekFrom};
///
/// use jsonindex::BoundedStream;
///
/// let mut window = BoundedStream::new(Cursor::new(b"hello, world"), 7, 12)?;
/// let mut text = String::new();
/// window.read_to_string(&mut text)?;
/// assert_eq!(text, "world");
///
/// window.seek(SeekFrom::Start(0))?;
/// assert_eq!(window.stream_position()?, 0);
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct BoundedStream<S> {
    inner: S,
    start: u64,
    stop: u64,
    /// Absolute position, tracked here only when the stream cannot report it.
    /// `None` on the seekable path.
    forward_pos: Option<u64>,
}

impl<S: Read + Seek> BoundedStream<S> {
    /// Wraps `inner`, restricting it to `[start, stop)`, and positions its
    /// cursor at `start`.
    ///
    /// Positioning seeks directly when the stream supports it; if the seek
    /// reports [`ErrorKind::Unsupported`], the first `start` bytes are
    /// discarded by reading instead, so forward-only sources can still be
    /// windowed for a single sequential pass.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::InvalidInput`] if `start > stop`; otherwise any I/O error
    /// from positioning the underlying stream.
    pub fn new(mut inner: S, start: u64, stop: u64) -> io::Result<Self> {
        if start > stop {
            return Err(io::Error::new(
                ErrorKind::InvalidInput,
                "window start exceeds window stop",
            ));
        }
        let forward_pos = match inner.seek(SeekFrom::Start(start)) {
            Ok(_) => None,
            Err(e) if e.kind() == ErrorKind::Unsupported => {
                // Reaching EOF before `start` is not an error here; the first
                // read will simply return 0 bytes.
                let skipped = io::copy(&mut inner.by_ref().take(start), &mut io::sink())?;
                Some(skipped)
            }
            Err(e) => return Err(e),
        };
        Ok(Self {
            inner,
            start,
            stop,
            forward_pos,
        })
    }

    /// The window length in bytes, `stop - start`.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.stop - self.start
    }

    /// Returns `true` if the window covers no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.stop
    }

    /// Bytes left between the current position and the window end.
    ///
    /// # Errors
    ///
    /// Any error from querying the underlying stream's position.
    pub fn remaining(&mut self) -> io::Result<u64> {
        let pos = self.position()?;
        Ok(self.stop.saturating_sub(pos))
    }

    /// Absolute position in the underlying stream's coordinates.
    fn position(&mut self) -> io::Result<u64> {
        match self.forward_pos {
            Some(pos) => Ok(pos),
            None => self.inner.stream_position(),
        }
    }

    /// Records `n` consumed bytes on the forward-only path.
    fn advance(&mut self, n: u64) {
        if let Some(pos) = &mut self.forward_pos {
            *pos += n;
        }
    }

    /// Returns a shared reference to the underlying stream.
    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    /// Returns a mutable reference to the underlying stream.
    ///
    /// Moving the underlying cursor through this reference breaks the
    /// window's position bookkeeping until the next `seek`.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Consumes the window, returning the underlying stream.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: BufRead + Seek> BoundedStream<S> {
    /// Reads one line (through the next `\n`, inclusive) into `buf`,
    /// consuming at most `min(limit, remaining-in-window)` bytes. Returns the
    /// number of bytes appended; 0 means end-of-window or end-of-stream.
    ///
    /// # Errors
    ///
    /// Any I/O error from the underlying stream.
    pub fn read_line(&mut self, buf: &mut Vec<u8>, limit: Option<usize>) -> io::Result<usize> {
        let mut cap = usize::try_from(self.remaining()?).unwrap_or(usize::MAX);
        if let Some(limit) = limit {
            cap = cap.min(limit);
        }
        let mut total = 0;
        while total < cap {
            let available = self.inner.fill_buf()?;
            if available.is_empty() {
                break;
            }
            let take = available.len().min(cap - total);
            match available[..take].iter().position(|&b| b == b'\n') {
                Some(i) => {
                    buf.extend_from_slice(&available[..=i]);
                    self.inner.consume(i + 1);
                    self.advance((i + 1) as u64);
                    total += i + 1;
                    break;
                }
                None => {
                    buf.extend_from_slice(&available[..take]);
                    self.inner.consume(take);
                    self.advance(take as u64);
                    total += take;
                }
            }
        }
        Ok(total)
    }

    /// Reads lines until the window (or stream) is exhausted. With a positive
    /// `size_hint`, stops early after the line that brings the accumulated
    /// byte count to at least the hint.
    ///
    /// # Errors
    ///
    /// Any I/O error from the underlying stream.
    pub fn read_lines(&mut self, size_hint: Option<usize>) -> io::Result<Vec<Vec<u8>>> {
        let mut lines = Vec::new();
        let mut accumulated = 0;
        loop {
            let mut line = Vec::new();
            let n = self.read_line(&mut line, None)?;
            if n == 0 {
                break;
            }
            accumulated += n;
            lines.push(line);
            if size_hint.is_some_and(|hint| hint > 0 && accumulated >= hint) {
                break;
            }
        }
        Ok(lines)
    }
}

impl<S: Read + Seek> Read for BoundedStream<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = self.remaining()?;
        if remaining == 0 {
            return Ok(0);
        }
        let cap = usize::try_from(remaining).map_or(buf.len(), |r| buf.len().min(r));
        let n = self.inner.read(&mut buf[..cap])?;
        self.advance(n as u64);
        Ok(n)
    }
}

impl<S: Read + Seek> Seek for BoundedStream<S> {
    /// Seeks within the window and returns the new window-relative position.
    ///
    /// The target is computed against the window's coordinate space
    /// (`Start` → `start + offset`, `End` → `stop + offset`) and clamped into
    /// `[start, stop]`; seeking can therefore never leave the window, and
    /// out-of-range offsets are not errors.
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(offset) => self.start.saturating_add(offset),
            SeekFrom::Current(offset) => add_offset(self.position()?, offset),
            SeekFrom::End(offset) => add_offset(self.stop, offset),
        };
        let clamped = target.clamp(self.start, self.stop);
        self.inner.seek(SeekFrom::Start(clamped))?;
        // The seek succeeded, so the stream can report positions after all.
        self.forward_pos = None;
        Ok(clamped - self.start)
    }
}

impl<S> Write for BoundedStream<S> {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(unsupported())
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(unsupported())
    }
}

fn unsupported() -> io::Error {
    io::Error::new(ErrorKind::Unsupported, "stream window is read-only")
}

/// Saturating `u64 + i64`, clamping at zero on underflow.
fn add_offset(base: u64, offset: i64) -> u64 {
    if offset >= 0 {
        base.saturating_add(offset.unsigned_abs())
    } else {
        base.saturating_sub(offset.unsigned_abs())
    }
}
