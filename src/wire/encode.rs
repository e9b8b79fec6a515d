//! Primitive encoding: fixed-width big-endian values and length-prefixed blocks.

use bytes::BufMut;

use super::TagType;
use crate::error::NbtError;

/// Writes a tag type byte.
pub fn put_tag_type(buf: &mut dyn BufMut, tag: TagType) {
    buf.put_u8(tag.as_u8());
}

/// Writes one unsigned byte.
pub fn put_byte(buf: &mut dyn BufMut, value: u8) {
    buf.put_u8(value);
}

/// Writes a big-endian `i16`.
pub fn put_short(buf: &mut dyn BufMut, value: i16) {
    buf.put_i16(value);
}

/// Writes a big-endian `i32`.
pub fn put_int(buf: &mut dyn BufMut, value: i32) {
    buf.put_i32(value);
}

/// Writes a big-endian `i64`.
pub fn put_long(buf: &mut dyn BufMut, value: i64) {
    buf.put_i64(value);
}

/// Writes a big-endian IEEE-754 `f32`.
pub fn put_float(buf: &mut dyn BufMut, value: f32) {
    buf.put_f32(value);
}

/// Writes a big-endian IEEE-754 `f64`.
pub fn put_double(buf: &mut dyn BufMut, value: f64) {
    buf.put_f64(value);
}

/// Writes the signed 32-bit count that prefixes lists and arrays.
pub fn put_len(buf: &mut dyn BufMut, what: &'static str, len: usize) -> Result<(), NbtError> {
    let len = i32::try_from(len).map_err(|_| NbtError::TooLong { what, len })?;
    buf.put_i32(len);
    Ok(())
}

/// Encodes a string (prefix = byte length, not char count).
pub fn put_string(buf: &mut dyn BufMut, value: &str) -> Result<(), NbtError> {
    let len = u16::try_from(value.len()).map_err(|_| NbtError::TooLong {
        what: "string",
        len: value.len(),
    })?;
    buf.put_u16(len);
    buf.put_slice(value.as_bytes());
    Ok(())
}

/// Writes a byte array: `i32` count, then the raw bytes.
pub fn put_byte_array(buf: &mut dyn BufMut, value: &[u8]) -> Result<(), NbtError> {
    put_len(buf, "byte array", value.len())?;
    buf.put_slice(value);
    Ok(())
}

/// Writes an int array: `i32` count, then big-endian `i32`s.
pub fn put_int_array(buf: &mut dyn BufMut, value: &[i32]) -> Result<(), NbtError> {
    put_len(buf, "int array", value.len())?;
    for &v in value {
        buf.put_i32(v);
    }
    Ok(())
}

/// Writes a long array: `i32` count, then big-endian `i64`s.
pub fn put_long_array(buf: &mut dyn BufMut, value: &[i64]) -> Result<(), NbtError> {
    put_len(buf, "long array", value.len())?;
    for &v in value {
        buf.put_i64(v);
    }
    Ok(())
}
