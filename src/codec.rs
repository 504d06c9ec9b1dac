//! Incremental JSON frame decoding
//!
//! Clients write UTF-8 JSON objects back-to-back with no delimiter, and
//! a single socket read may carry zero, one, or several objects, or end
//! in the middle of one. The decoder accumulates bytes across reads and
//! yields each complete message, carrying a partial trailing frame over
//! to the next read.

use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Upper bound on the bytes a single frame may accumulate.
///
/// A partial frame that grows past this cap is treated as malformed
/// input rather than buffered forever.
pub const MAX_FRAME_BYTES: usize = 64 * 1024;

/// Accumulating decoder for a stream of concatenated JSON values
#[derive(Debug, Default)]
pub struct MessageDecoder {
    buf: Vec<u8>,
}

impl MessageDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append freshly read bytes to the frame buffer
    pub fn push(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Number of buffered bytes awaiting completion
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    /// Decode every complete message currently buffered.
    ///
    /// A trailing incomplete frame stays buffered for the next read. On
    /// a hard syntax error the messages decoded before the poisoned
    /// bytes are still returned, the rest of the buffer is discarded,
    /// and the error is reported alongside them so the caller can log
    /// it and keep the connection alive.
    pub fn drain<T: DeserializeOwned>(&mut self) -> (Vec<T>, Option<AppError>) {
        let mut messages = Vec::new();
        let mut error = None;
        let mut consumed = 0;

        {
            let mut stream = serde_json::Deserializer::from_slice(&self.buf).into_iter::<T>();
            loop {
                match stream.next() {
                    Some(Ok(msg)) => {
                        messages.push(msg);
                        consumed = stream.byte_offset();
                    }
                    // Incomplete trailing frame: keep it for the next read
                    Some(Err(err)) if err.is_eof() => break,
                    Some(Err(err)) => {
                        error = Some(AppError::Json(err));
                        consumed = self.buf.len();
                        break;
                    }
                    None => {
                        consumed = self.buf.len();
                        break;
                    }
                }
            }
        }
        self.buf.drain(..consumed);

        if error.is_none() && self.buf.len() > MAX_FRAME_BYTES {
            self.buf.clear();
            error = Some(AppError::FrameTooLarge);
        }
        (messages, error)
    }
}
