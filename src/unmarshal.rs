//! Unmarshalling: named NBT tags → pre-typed host targets.

use std::cell::Cell;

use bytes::Buf;

use crate::codec::Decode;
use crate::error::NbtError;
use crate::record::{field_index, Record};
use crate::wire::{decode, TagType};

/// Deepest list/compound nesting accepted by a decode.
pub const MAX_DEPTH: usize = 512;

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// One level of list or compound nesting on the current thread. Dropping it
/// leaves the level, including on early return.
struct Nesting;

impl Nesting {
    fn enter() -> Result<Self, NbtError> {
        DEPTH.with(|depth| {
            let current = depth.get();
            if current >= MAX_DEPTH {
                return Err(NbtError::ResourceExhausted(format!(
                    "nesting deeper than {MAX_DEPTH} levels"
                )));
            }
            depth.set(current + 1);
            Ok(Nesting)
        })
    }
}

impl Drop for Nesting {
    fn drop(&mut self) {
        DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// Reads one root tag into `target` and returns its name.
///
/// A root `End` tag decodes to nothing: the name is empty and `target` is
/// left untouched.
pub fn unmarshal<B, T>(buf: &mut B, target: &mut T) -> Result<String, NbtError>
where
    B: Buf,
    T: Decode + ?Sized,
{
    let Some((tag, name)) = read_header(buf)? else {
        tracing::trace!("unmarshal empty root");
        return Ok(String::new());
    };
    tracing::trace!(%tag, name = %name, "unmarshal root tag");
    target.read_payload(tag, buf)?;
    Ok(name)
}

/// Unmarshals a root tag from a byte slice.
pub fn from_bytes<T: Decode + ?Sized>(data: &[u8], target: &mut T) -> Result<String, NbtError> {
    let mut cursor = data;
    unmarshal(&mut cursor, target)
}

/// Reads a tag type byte, rejecting bytes outside the tag table.
pub fn read_tag_type(buf: &mut dyn Buf) -> Result<TagType, NbtError> {
    match decode::get_tag_type(buf)? {
        TagType::Unknown => Err(NbtError::UnsupportedType("unknown tag type".into())),
        tag => Ok(tag),
    }
}

/// Reads a tag header. `End` carries no name and yields `None`.
pub fn read_header(buf: &mut dyn Buf) -> Result<Option<(TagType, String)>, NbtError> {
    let tag = read_tag_type(buf)?;
    if tag == TagType::End {
        return Ok(None);
    }
    let name = decode::get_string(buf)?;
    Ok(Some((tag, name)))
}

/// Reads a list's element type and clamped count.
pub fn read_list_header(buf: &mut dyn Buf) -> Result<(TagType, usize), NbtError> {
    let elem = read_tag_type(buf)?;
    let count = decode::get_len_clamped(buf)?;
    Ok((elem, count))
}

/// Reads a list payload into `out`, replacing its contents with exactly
/// `count` decoded elements.
pub fn read_list_vec<T: Decode + Default>(
    buf: &mut dyn Buf,
    out: &mut Vec<T>,
) -> Result<(), NbtError> {
    let _nesting = Nesting::enter()?;
    let (elem, count) = read_list_header(buf)?;
    out.clear();
    // Every element payload is at least one byte.
    out.reserve(count.min(buf.remaining()));
    for _ in 0..count {
        let mut item = T::default();
        item.read_payload(elem, buf)?;
        out.push(item);
    }
    Ok(())
}

/// Reads a list payload into a fixed-size slice. Slots past the list's count
/// are left untouched.
pub fn read_list_slice<T: Decode>(buf: &mut dyn Buf, out: &mut [T]) -> Result<(), NbtError> {
    let _nesting = Nesting::enter()?;
    let (elem, count) = read_list_header(buf)?;
    if count > out.len() {
        return Err(NbtError::SizeMismatch {
            capacity: out.len(),
            count,
        });
    }
    for item in &mut out[..count] {
        item.read_payload(elem, buf)?;
    }
    Ok(())
}

/// Reads named tags until `End`, handing each to `visit` positioned at its
/// payload.
pub fn read_compound(
    buf: &mut dyn Buf,
    mut visit: impl FnMut(TagType, String, &mut dyn Buf) -> Result<(), NbtError>,
) -> Result<(), NbtError> {
    let _nesting = Nesting::enter()?;
    while let Some((tag, name)) = read_header(buf)? {
        visit(tag, name, &mut *buf)?;
    }
    Ok(())
}

/// Steps over one complete root tag without decoding it.
///
/// Fails with [`NbtError::Truncated`] if `buf` ends before the tag does.
pub fn skip_tag(buf: &mut dyn Buf) -> Result<(), NbtError> {
    match read_header(buf)? {
        Some((tag, _)) => skip_payload(tag, buf),
        None => Ok(()),
    }
}

/// Steps over a payload of type `tag`.
pub fn skip_payload(tag: TagType, buf: &mut dyn Buf) -> Result<(), NbtError> {
    match tag {
        TagType::End => Ok(()),
        TagType::Byte => decode::skip(buf, 1),
        TagType::Short => decode::skip(buf, 2),
        TagType::Int | TagType::Float => decode::skip(buf, 4),
        TagType::Long | TagType::Double => decode::skip(buf, 8),
        TagType::ByteArray => {
            let len = decode::get_int(buf)?;
            let len = usize::try_from(len).map_err(|_| NbtError::NegativeLength(len))?;
            decode::skip(buf, len)
        }
        TagType::String => {
            let len = decode::get_short(buf)? as u16;
            decode::skip(buf, usize::from(len))
        }
        TagType::List => {
            let _nesting = Nesting::enter()?;
            let (elem, count) = read_list_header(buf)?;
            if elem != TagType::End {
                for _ in 0..count {
                    skip_payload(elem, buf)?;
                }
            }
            Ok(())
        }
        TagType::Compound => {
            let _nesting = Nesting::enter()?;
            while let Some((tag, _)) = read_header(buf)? {
                skip_payload(tag, buf)?;
            }
            Ok(())
        }
        TagType::IntArray => {
            let count = decode::get_len_clamped(buf)?;
            decode::skip(buf, count.saturating_mul(4))
        }
        TagType::LongArray => {
            let count = decode::get_len_clamped(buf)?;
            decode::skip(buf, count.saturating_mul(8))
        }
        TagType::Unknown => Err(NbtError::UnsupportedType("unknown tag type".into())),
    }
}

/// Reads a compound into a record, binding entries to fields by wire name.
///
/// Field order on the wire is irrelevant. A name with no matching field is
/// an error; fields absent from the stream keep their current value.
pub fn read_record<R: Record + 'static>(
    record: &mut R,
    tag: TagType,
    buf: &mut dyn Buf,
) -> Result<(), NbtError> {
    if tag != TagType::Compound {
        return Err(crate::codec::incompatible(tag, std::any::type_name::<R>()));
    }
    let index = field_index::<R>();
    read_compound(buf, |tag, name, buf| {
        let field = index
            .get(name.as_str())
            .and_then(|&i| record.field_mut(i))
            .ok_or(NbtError::UnknownField(name))?;
        field.read_payload(tag, buf)
    })
}
