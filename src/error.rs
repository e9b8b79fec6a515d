//! Error types for NBT encoding and decoding.

use std::string::FromUtf8Error;

use crate::wire::TagType;

/// Errors that can occur while marshalling or unmarshalling NBT data.
///
/// Every error is terminal for the call that produced it: the stream and the
/// target are left in an unspecified partial state.
#[derive(Debug, thiserror::Error)]
pub enum NbtError {
    #[error("truncated input: need {needed} bytes but only {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    #[error("source over-read: requested {requested} bytes, consumed {consumed}")]
    OverRead { requested: usize, consumed: usize },

    #[error("negative byte array length: {0}")]
    NegativeLength(i32),

    #[error("{what} too long: {len} exceeds its length prefix")]
    TooLong { what: &'static str, len: usize },

    #[error("invalid UTF-8 string: {0}")]
    InvalidString(#[from] FromUtf8Error),

    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    #[error("{tag} is incompatible with {target}")]
    TypeMismatch { tag: TagType, target: &'static str },

    #[error("size mismatch: target holds {capacity} elements, stream has {count}")]
    SizeMismatch { capacity: usize, count: usize },

    #[error("compound key must be text, got {0}")]
    InvalidKeyType(&'static str),

    #[error("no field named {0:?}")]
    UnknownField(String),

    #[error("presence gate {0:?} is not a bool field")]
    InvalidPresence(String),

    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl NbtError {
    /// Shorthand for a [`NbtError::TypeMismatch`].
    pub fn mismatch(tag: TagType, target: &'static str) -> Self {
        Self::TypeMismatch { tag, target }
    }

    /// Returns `true` if the error was caused by running out of input.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::Truncated { .. })
    }
}
