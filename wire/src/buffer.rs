//! Byte accumulator that re-frames arbitrary read chunks.

use crate::error::FrameResult;
use crate::frame::{decode_frame, Compression};
use crate::limits::Limits;

/// Accumulates socket reads and yields complete frames.
///
/// TCP reads return arbitrary chunks: a frame may arrive split across
/// several reads or coalesced with its neighbors. Feed every chunk through
/// [`push`](Self::push) and drain complete frames with
/// [`next_frame`](Self::next_frame) until it returns `None`.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    buf: Vec<u8>,
}

impl FrameBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of buffered, not-yet-framed bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Appends freshly read bytes.
    pub fn push(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Pops the next complete frame's packet payload, if one is buffered.
    ///
    /// # Errors
    ///
    /// Propagates frame codec errors; after an error the buffer contents
    /// are unspecified and the connection should be torn down.
    pub fn next_frame(
        &mut self,
        compression: Compression,
        limits: &Limits,
    ) -> FrameResult<Option<Vec<u8>>> {
        match decode_frame(&self.buf, compression, limits)? {
            Some((payload, consumed)) => {
                self.buf.drain(..consumed);
                Ok(Some(payload))
            }
            None => Ok(None),
        }
    }
}
