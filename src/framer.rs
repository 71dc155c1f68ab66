//! Incremental line framer for raw transport bytes.
//!
//! Bytes are pushed in whatever chunks the transport delivers, and complete
//! lines are pulled out one at a time. Both `\n` and `\r\n` terminate a line.
//!
//! No line length limit is applied: a stream that never sends a terminator
//! grows the pending buffer until the framer is cleared.

use bytes::{Buf, BytesMut};

/// Splits a byte stream into trimmed, non-empty text lines.
///
/// ```rust
/// use nmea0183_stream::framer::StreamFramer;
///
/// let mut framer = StreamFramer::new();
/// framer.push(b"$GPHDT,274.07,T*03\r\n$GPH");
/// assert_eq!(framer.next_line().as_deref(), Some("$GPHDT,274.07,T*03"));
/// assert_eq!(framer.next_line(), None);
///
/// framer.push(b"DT,274.07,T*03\n");
/// assert_eq!(framer.next_line().as_deref(), Some("$GPHDT,274.07,T*03"));
/// ```
#[derive(Debug, Default)]
pub struct StreamFramer {
    buf: BytesMut,
}

impl StreamFramer {
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Appends a chunk of received bytes.
    pub fn push(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// Removes and returns the next complete line.
    ///
    /// Blank lines are consumed and skipped. Bytes that are not valid UTF-8 are
    /// replaced rather than rejected so the tokenizer can report them.
    pub fn next_line(&mut self) -> Option<String> {
        while let Some(end) = self.buf.iter().position(|&b| b == b'\n') {
            let raw = self.buf.split_to(end);
            self.buf.advance(1);

            let line = String::from_utf8_lossy(&raw);
            let line = line.trim();
            if !line.is_empty() {
                return Some(line.to_string());
            }
        }
        None
    }

    /// Iterates over every complete line currently buffered.
    pub fn lines(&mut self) -> impl Iterator<Item = String> + '_ {
        std::iter::from_fn(move || self.next_line())
    }

    /// Number of buffered bytes not yet returned as a line.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    /// Drops any partial line.
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}
