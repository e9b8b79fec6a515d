//! Marshalling: host values → named NBT tags.

use bytes::{BufMut, BytesMut};

use crate::codec::{Encode, MapKey};
use crate::error::NbtError;
use crate::record::Record;
use crate::wire::{encode, TagType};

/// Writes `value` as a root tag named `name`.
///
/// Nothing is retried on failure; the sink may hold a truncated tag.
pub fn marshal<B, T>(buf: &mut B, name: &str, value: &T) -> Result<(), NbtError>
where
    B: BufMut,
    T: Encode + ?Sized,
{
    tracing::trace!(tag = %value.tag_type(), name, "marshal root tag");
    write_tag(buf, name, value)
}

/// Marshals `value` into a fresh buffer.
pub fn to_bytes<T: Encode + ?Sized>(name: &str, value: &T) -> Result<BytesMut, NbtError> {
    let mut buf = BytesMut::new();
    marshal(&mut buf, name, value)?;
    Ok(buf)
}

/// Writes a tag header: type byte then name.
pub fn write_header(buf: &mut dyn BufMut, tag: TagType, name: &str) -> Result<(), NbtError> {
    if tag == TagType::Unknown {
        return Err(NbtError::UnsupportedType(format!(
            "no tag type for {name:?}"
        )));
    }
    encode::put_tag_type(buf, tag);
    encode::put_string(buf, name)
}

/// Writes a full named tag: header then payload.
pub fn write_tag<T: Encode + ?Sized>(
    buf: &mut dyn BufMut,
    name: &str,
    value: &T,
) -> Result<(), NbtError> {
    write_header(buf, value.tag_type(), name)?;
    value.write_payload(buf)
}

/// Writes a generic list payload.
///
/// The element type is taken from the elements themselves and is `End` for
/// an empty list regardless of `T`. Every element must share that type.
pub fn write_list<T: Encode>(buf: &mut dyn BufMut, items: &[T]) -> Result<(), NbtError> {
    let elem = items.first().map_or(TagType::End, |item| item.tag_type());
    if elem == TagType::Unknown {
        return Err(NbtError::UnsupportedType("list element".into()));
    }
    encode::put_tag_type(buf, elem);
    encode::put_len(buf, "list", items.len())?;
    for item in items {
        let tag = item.tag_type();
        if tag != elem {
            return Err(NbtError::mismatch(tag, "list element"));
        }
        item.write_payload(buf)?;
    }
    Ok(())
}

/// Writes map entries as named tags followed by `End`.
pub fn write_compound_entries<'a, K, V>(
    buf: &mut dyn BufMut,
    entries: impl Iterator<Item = (&'a K, &'a V)>,
) -> Result<(), NbtError>
where
    K: MapKey + 'a,
    V: Encode + 'a,
{
    for (key, value) in entries {
        write_tag(buf, &key.to_name()?, value)?;
    }
    encode::put_tag_type(buf, TagType::End);
    Ok(())
}

/// Writes a record's fields in declaration order followed by `End`.
pub fn write_record<R: Record>(record: &R, buf: &mut dyn BufMut) -> Result<(), NbtError> {
    for (index, field) in R::FIELDS.iter().enumerate() {
        if field.skip {
            continue;
        }
        if let Some(gate) = field.present_if {
            if !presence(record, gate)? {
                continue;
            }
        }
        let value = record
            .field(index)
            .ok_or_else(|| NbtError::UnknownField(field.name().to_owned()))?;
        if field.list {
            write_header(buf, TagType::List, field.name())?;
            value.write_list_payload(buf)?;
        } else {
            write_tag(buf, field.name(), value)?;
        }
    }
    encode::put_tag_type(buf, TagType::End);
    Ok(())
}

/// Reads the sibling bool field `gate` of `record`.
fn presence<R: Record>(record: &R, gate: &str) -> Result<bool, NbtError> {
    R::FIELDS
        .iter()
        .position(|f| f.ident == gate)
        .and_then(|index| record.field(index))
        .and_then(|value| value.as_flag())
        .ok_or_else(|| NbtError::InvalidPresence(gate.to_owned()))
}
