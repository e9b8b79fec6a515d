//! NBT primitive wire encoding.
//!
//! All multi-byte values are big-endian. Strings carry an unsigned 16-bit
//! byte-length prefix; arrays and lists carry a signed 32-bit count.

pub mod decode;
pub mod encode;
pub mod tag;

pub use tag::TagType;
