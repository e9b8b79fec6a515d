//! Writes named tags to an async byte stream.

use bytes::BytesMut;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::codec::Encode;
use crate::error::NbtError;
use crate::marshal::marshal;

/// Writes root tags to an `AsyncWrite` stream.
///
/// Each tag is marshalled into an internal buffer first, so a value that
/// fails to encode never reaches the stream.
pub struct NbtWriter<W> {
    writer: W,
    buf: BytesMut,
}

impl<W: AsyncWrite + Unpin> NbtWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buf: BytesMut::new(),
        }
    }

    /// Writes `value` as a root tag named `name`.
    pub async fn write_tag<T: Encode + ?Sized>(
        &mut self,
        name: &str,
        value: &T,
    ) -> Result<(), NbtError> {
        self.buf.clear();
        marshal(&mut self.buf, name, value)?;
        self.writer.write_all(&self.buf).await?;
        tracing::debug!(name, bytes = self.buf.len(), "wrote tag");
        Ok(())
    }

    /// Flushes the underlying writer.
    pub async fn flush(&mut self) -> Result<(), NbtError> {
        self.writer.flush().await?;
        Ok(())
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
