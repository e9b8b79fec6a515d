//! Primitive decoding: bytes → fixed-width values and length-prefixed blocks.
//!
//! Every read consumes an exact number of bytes. A short source fails with
//! [`NbtError::Truncated`]; a source that consumes more than it was asked for
//! fails with [`NbtError::OverRead`].

use bytes::Buf;

use super::TagType;
use crate::error::NbtError;

fn ensure_remaining(buf: &dyn Buf, needed: usize) -> Result<(), NbtError> {
    if buf.remaining() < needed {
        Err(NbtError::Truncated {
            needed,
            remaining: buf.remaining(),
        })
    } else {
        Ok(())
    }
}

fn check_consumed(before: usize, after: usize, requested: usize) -> Result<(), NbtError> {
    let consumed = before.saturating_sub(after);
    if consumed > requested {
        return Err(NbtError::OverRead {
            requested,
            consumed,
        });
    }
    Ok(())
}

fn take<const N: usize>(buf: &mut dyn Buf) -> Result<[u8; N], NbtError> {
    ensure_remaining(buf, N)?;
    let before = buf.remaining();
    let mut out = [0u8; N];
    buf.copy_to_slice(&mut out);
    check_consumed(before, buf.remaining(), N)?;
    Ok(out)
}

fn take_vec(buf: &mut dyn Buf, len: usize) -> Result<Vec<u8>, NbtError> {
    ensure_remaining(buf, len)?;
    let before = buf.remaining();
    let mut out = vec![0u8; len];
    buf.copy_to_slice(&mut out);
    check_consumed(before, buf.remaining(), len)?;
    Ok(out)
}

/// Reads a tag type byte. Bytes outside the table map to [`TagType::Unknown`].
pub fn get_tag_type(buf: &mut dyn Buf) -> Result<TagType, NbtError> {
    get_byte(buf).map(TagType::from)
}

/// Reads one unsigned byte.
pub fn get_byte(buf: &mut dyn Buf) -> Result<u8, NbtError> {
    take::<1>(buf).map(|b| b[0])
}

/// Reads a big-endian `i16`.
pub fn get_short(buf: &mut dyn Buf) -> Result<i16, NbtError> {
    take(buf).map(i16::from_be_bytes)
}

/// Reads a big-endian `i32`.
pub fn get_int(buf: &mut dyn Buf) -> Result<i32, NbtError> {
    take(buf).map(i32::from_be_bytes)
}

/// Reads a big-endian `i64`.
pub fn get_long(buf: &mut dyn Buf) -> Result<i64, NbtError> {
    take(buf).map(i64::from_be_bytes)
}

/// Reads a big-endian IEEE-754 `f32`.
pub fn get_float(buf: &mut dyn Buf) -> Result<f32, NbtError> {
    take(buf).map(|b| f32::from_bits(u32::from_be_bytes(b)))
}

/// Reads a big-endian IEEE-754 `f64`.
pub fn get_double(buf: &mut dyn Buf) -> Result<f64, NbtError> {
    take(buf).map(|b| f64::from_bits(u64::from_be_bytes(b)))
}

/// Advances past `len` bytes.
pub fn skip(buf: &mut dyn Buf, len: usize) -> Result<(), NbtError> {
    ensure_remaining(buf, len)?;
    buf.advance(len);
    Ok(())
}

/// Reads a list or int/long array count. Negative counts clamp to zero.
pub fn get_len_clamped(buf: &mut dyn Buf) -> Result<usize, NbtError> {
    let len = get_int(buf)?;
    Ok(usize::try_from(len).unwrap_or(0))
}

/// Reads a length-prefixed string. Modified UTF-8 is not handled.
pub fn get_string(buf: &mut dyn Buf) -> Result<String, NbtError> {
    let len = usize::from(u16::from_be_bytes(take(buf)?));
    if len == 0 {
        return Ok(String::new());
    }
    let data = take_vec(buf, len)?;
    Ok(String::from_utf8(data)?)
}

/// Reads a byte array. The count is not clamped: a negative count is an error.
pub fn get_byte_array(buf: &mut dyn Buf) -> Result<Vec<u8>, NbtError> {
    let len = get_int(buf)?;
    let len = usize::try_from(len).map_err(|_| NbtError::NegativeLength(len))?;
    take_vec(buf, len)
}

/// Reads the payload of an int array whose count has already been read.
pub fn get_ints(buf: &mut dyn Buf, count: usize) -> Result<Vec<i32>, NbtError> {
    ensure_remaining(buf, count.saturating_mul(4))?;
    (0..count).map(|_| get_int(buf)).collect()
}

/// Reads the payload of a long array whose count has already been read.
pub fn get_longs(buf: &mut dyn Buf, count: usize) -> Result<Vec<i64>, NbtError> {
    ensure_remaining(buf, count.saturating_mul(8))?;
    (0..count).map(|_| get_long(buf)).collect()
}

/// Reads an int array: clamped count, then that many `i32`s.
pub fn get_int_array(buf: &mut dyn Buf) -> Result<Vec<i32>, NbtError> {
    let count = get_len_clamped(buf)?;
    get_ints(buf, count)
}

/// Reads a long array: clamped count, then that many `i64`s.
pub fn get_long_array(buf: &mut dyn Buf) -> Result<Vec<i64>, NbtError> {
    let count = get_len_clamped(buf)?;
    get_longs(buf, count)
}
