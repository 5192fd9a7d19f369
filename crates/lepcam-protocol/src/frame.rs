//! Frame encoding/decoding utilities.
//!
//! Commands and small responses travel between a start marker and a
//! stop marker so a stream transport can recover message boundaries:
//!
//! ```text
//! +------+---------------------+------+
//! | 0x02 | json[0..len]        | 0x03 |
//! +------+---------------------+------+
//! ```
//!
//! Image documents are not framed; they are delivered whole by the
//! transport.

use bytes::{Buf, BytesMut};

use crate::constants::{MAX_CMD_TEXT_LEN, MSG_START, MSG_STOP};

/// A codec for reading and writing marker-framed messages.
#[derive(Debug, Default)]
pub struct FrameCodec {
    /// Buffer for accumulating incoming data.
    buffer: BytesMut,
}

impl FrameCodec {
    /// Create a new frame codec.
    pub fn new() -> Self {
        FrameCodec {
            buffer: BytesMut::with_capacity(MAX_CMD_TEXT_LEN),
        }
    }

    /// Add received data to the buffer.
    pub fn push(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Try to decode the next complete message payload, markers
    /// stripped.
    ///
    /// Garbage ahead of a start marker is discarded. A message that
    /// runs past [`MAX_CMD_TEXT_LEN`] without its stop marker is
    /// dropped and the scan resynchronizes on the next start marker.
    ///
    /// Returns `Some(payload)` if a complete message is available, or
    /// `None` if more data is needed.
    pub fn decode(&mut self) -> Option<Vec<u8>> {
        loop {
            // Scan for the start marker, discarding any preceding garbage
            while !self.buffer.is_empty() && self.buffer[0] != MSG_START {
                self.buffer.advance(1);
            }
            if self.buffer.is_empty() {
                return None;
            }

            // Look for the stop marker after the start byte
            if let Some(stop) = self.buffer[1..].iter().position(|&b| b == MSG_STOP) {
                let payload = self.buffer[1..1 + stop].to_vec();
                self.buffer.advance(stop + 2);
                return Some(payload);
            }

            if self.buffer.len() > MAX_CMD_TEXT_LEN {
                // Unterminated oversize message: drop its start marker
                // and rescan from the next one.
                self.buffer.advance(1);
                continue;
            }

            return None;
        }
    }

    /// Wrap a payload in the marker pair for transmission.
    pub fn encode(payload: &[u8]) -> Vec<u8> {
        let mut buf = Vec::with_capacity(payload.len() + 2);
        buf.push(MSG_START);
        buf.extend_from_slice(payload);
        buf.push(MSG_STOP);
        buf
    }

    /// Get the number of buffered bytes.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Clear the buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}
