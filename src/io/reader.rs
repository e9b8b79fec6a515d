//! Reads named tags from an async byte stream.

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::codec::Decode;
use crate::error::NbtError;
use crate::unmarshal::{skip_tag, unmarshal};

/// Default cap on the bytes one root tag may span (16 MiB).
pub const DEFAULT_MAX_DOCUMENT_SIZE: usize = 16 * 1024 * 1024;

/// Reads root tags from an `AsyncRead` stream.
///
/// Bytes are pulled as they arrive until the buffer holds one complete root
/// tag, which is then decoded. A tag that arrives in full is returned
/// without waiting for the stream to close.
pub struct NbtReader<R> {
    reader: R,
    max_document_size: usize,
    buf: BytesMut,
}

impl<R: AsyncRead + Unpin> NbtReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            max_document_size: DEFAULT_MAX_DOCUMENT_SIZE,
            buf: BytesMut::new(),
        }
    }

    /// Sets the maximum number of bytes buffered for one root tag.
    pub fn max_document_size(mut self, bytes: usize) -> Self {
        self.max_document_size = bytes;
        self
    }

    /// Reads the next root tag into `target` and returns its name, or `None`
    /// once the stream ends cleanly between tags.
    pub async fn read_tag<T: Decode + ?Sized>(
        &mut self,
        target: &mut T,
    ) -> Result<Option<String>, NbtError> {
        let len = loop {
            let mut pending = &self.buf[..];
            match skip_tag(&mut pending) {
                Ok(()) => break self.buf.len() - pending.len(),
                Err(e) if e.is_truncated() => {
                    if !self.fill().await? {
                        if self.buf.is_empty() {
                            return Ok(None);
                        }
                        tracing::debug!(error = %e, "stream ended inside a tag");
                        return Err(e);
                    }
                }
                Err(e) => {
                    tracing::debug!(error = %e, "malformed tag");
                    return Err(e);
                }
            }
        };

        let mut tag = self.buf.split_to(len).freeze();
        tracing::debug!(bytes = len, "buffered tag");
        match unmarshal(&mut tag, target) {
            Ok(name) => Ok(Some(name)),
            Err(e) => {
                tracing::debug!(error = %e, "failed to decode tag");
                Err(e)
            }
        }
    }

    /// Reads more bytes into the buffer. Returns `false` at end of stream.
    async fn fill(&mut self) -> Result<bool, NbtError> {
        let allowance = self.max_document_size.saturating_sub(self.buf.len());
        if allowance == 0 {
            return Err(NbtError::ResourceExhausted(format!(
                "tag exceeds {} bytes",
                self.max_document_size
            )));
        }
        let n = (&mut self.reader)
            .take(allowance as u64)
            .read_buf(&mut self.buf)
            .await?;
        Ok(n > 0)
    }
}
