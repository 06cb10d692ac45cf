//! Line framing for the telemetry stream.
//!
//! Records arrive as UTF-8 text terminated by `\n`. The accumulator turns
//! the raw byte stream into complete lines:
//! - bytes are collected until a newline closes the record
//! - a trailing `\r` (CRLF hosts) is stripped
//! - a line that outgrows [`MAX_LINE_LEN`] is reported once as
//!   [`LineError::Oversize`], then swallowed until the next newline
//!   resynchronizes the stream

use heapless::Vec;

/// Maximum accepted line length in bytes.
///
/// Matches the document buffer of the original controller; a full record
/// from a 16-core host with a discrete GPU stays well under this.
pub const MAX_LINE_LEN: usize = 1536;

/// One complete telemetry line, newline stripped.
pub type Line = Vec<u8, MAX_LINE_LEN>;

/// Errors that can occur while accumulating a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded [`MAX_LINE_LEN`] before a newline arrived
    Oversize,
}

/// Accumulates raw serial bytes into newline-terminated records
#[derive(Debug, Default)]
pub struct LineAccumulator {
    buffer: Line,
    /// Set while discarding the remainder of an oversized line
    discarding: bool,
}

impl LineAccumulator {
    /// Create a new, empty accumulator
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            discarding: false,
        }
    }

    /// Reset the accumulator state
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.discarding = false;
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(line))` when a newline completes a record,
    /// `Ok(None)` when more bytes are needed, or `Err` the moment a line
    /// overflows the buffer.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Line>, LineError> {
        if byte == b'\n' {
            if self.discarding {
                // Oversized line fully consumed; ready for the next record
                self.reset();
                return Ok(None);
            }

            let mut line = core::mem::take(&mut self.buffer);
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            return Ok(Some(line));
        }

        if self.discarding {
            return Ok(None);
        }

        if self.buffer.push(byte).is_err() {
            self.buffer.clear();
            self.discarding = true;
            return Err(LineError::Oversize);
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_str(acc: &mut LineAccumulator, s: &str) -> Option<Line> {
        let mut out = None;
        for &b in s.as_bytes() {
            if let Ok(Some(line)) = acc.feed(b) {
                out = Some(line);
            }
        }
        out
    }

    #[test]
    fn test_complete_line() {
        let mut acc = LineAccumulator::new();
        let line = feed_str(&mut acc, "{\"cpu\":{}}\n").unwrap();
        assert_eq!(line.as_slice(), b"{\"cpu\":{}}");
    }

    #[test]
    fn test_line_split_across_feeds() {
        let mut acc = LineAccumulator::new();
        assert!(feed_str(&mut acc, "{\"cpu\"").is_none());
        let line = feed_str(&mut acc, ":{}}\n").unwrap();
        assert_eq!(line.as_slice(), b"{\"cpu\":{}}");
    }

    #[test]
    fn test_crlf_stripped() {
        let mut acc = LineAccumulator::new();
        let line = feed_str(&mut acc, "abc\r\n").unwrap();
        assert_eq!(line.as_slice(), b"abc");
    }

    #[test]
    fn test_two_lines_sequential() {
        let mut acc = LineAccumulator::new();
        let first = feed_str(&mut acc, "one\n").unwrap();
        let second = feed_str(&mut acc, "two\n").unwrap();
        assert_eq!(first.as_slice(), b"one");
        assert_eq!(second.as_slice(), b"two");
    }

    #[test]
    fn test_oversize_reported_once_then_resync() {
        let mut acc = LineAccumulator::new();

        let mut errors = 0;
        for _ in 0..MAX_LINE_LEN + 100 {
            if acc.feed(b'x') == Err(LineError::Oversize) {
                errors += 1;
            }
        }
        assert_eq!(errors, 1);

        // The closing newline of the oversized line yields nothing
        assert_eq!(acc.feed(b'\n'), Ok(None));

        // The stream is resynchronized afterwards
        let line = feed_str(&mut acc, "ok\n").unwrap();
        assert_eq!(line.as_slice(), b"ok");
    }

    #[test]
    fn test_empty_line() {
        let mut acc = LineAccumulator::new();
        let line = feed_str(&mut acc, "\n").unwrap();
        assert!(line.is_empty());
    }
}
