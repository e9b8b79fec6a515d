//! Host value ⇄ NBT payload mapping.
//!
//! [`Encode`] decides which [`TagType`] a host value is written as and writes
//! its payload; [`Decode`] reads a payload of a given tag type into a
//! pre-typed target in place. Both traits are object safe so record field
//! tables can hand out `&dyn Encode` / `&mut dyn Decode`.
//!
//! Sequences are resolved through their element type: a slice of `u8`,
//! `i32` or `i64` is a dedicated array tag, every other element type is a
//! generic list. The `slice_*` / `read_vec` / `read_slice` hooks carry that
//! choice.

mod map;
mod scalar;
mod seq;
mod value;

use bytes::{Buf, BufMut};

pub use map::MapKey;

use crate::error::NbtError;
use crate::wire::TagType;

/// A host value that can be written as an NBT payload.
pub trait Encode {
    /// The tag type this value is written as.
    fn tag_type(&self) -> TagType;

    /// Writes the payload only: no tag byte, no name.
    fn write_payload(&self, buf: &mut dyn BufMut) -> Result<(), NbtError>;

    /// Writes this value as a generic list payload, even where the element
    /// type would otherwise select a dedicated array tag.
    fn write_list_payload(&self, _buf: &mut dyn BufMut) -> Result<(), NbtError> {
        Err(NbtError::UnsupportedType(format!(
            "{} cannot be written as {}",
            self.tag_type(),
            TagType::List
        )))
    }

    /// The value as a presence flag. Only `bool` answers.
    fn as_flag(&self) -> Option<bool> {
        None
    }

    /// Tag type of a sequence whose elements are `Self`.
    fn slice_tag_type(_items: &[Self]) -> TagType
    where
        Self: Sized,
    {
        TagType::List
    }

    /// Writes the payload of a sequence whose elements are `Self`.
    fn write_slice_payload(items: &[Self], buf: &mut dyn BufMut) -> Result<(), NbtError>
    where
        Self: Sized,
    {
        crate::marshal::write_list(buf, items)
    }
}

/// A pre-typed target that an NBT payload can be decoded into.
pub trait Decode {
    /// Reads a payload of type `tag` into `self`.
    fn read_payload(&mut self, tag: TagType, buf: &mut dyn Buf) -> Result<(), NbtError>;

    /// Reads a sequence payload into a growable vector of `Self`.
    fn read_vec(tag: TagType, buf: &mut dyn Buf, out: &mut Vec<Self>) -> Result<(), NbtError>
    where
        Self: Sized + Default,
    {
        match tag {
            TagType::List => crate::unmarshal::read_list_vec(buf, out),
            other => Err(incompatible(other, "Vec")),
        }
    }

    /// Reads a sequence payload into a fixed-size slice of `Self`.
    fn read_slice(tag: TagType, buf: &mut dyn Buf, out: &mut [Self]) -> Result<(), NbtError>
    where
        Self: Sized,
    {
        match tag {
            TagType::List => crate::unmarshal::read_list_slice(buf, out),
            other => Err(incompatible(other, "array")),
        }
    }
}

/// Error for a tag that `target` cannot hold.
///
/// A compound aimed at a target that is neither a record nor a map has no
/// decoding at all and reports [`NbtError::UnsupportedType`].
pub(crate) fn incompatible(tag: TagType, target: &'static str) -> NbtError {
    match tag {
        TagType::Compound => {
            NbtError::UnsupportedType(format!("{target} is not a compound target"))
        }
        TagType::Unknown => NbtError::UnsupportedType(format!("{tag} into {target}")),
        _ => NbtError::mismatch(tag, target),
    }
}

/// Copies a decoded array into a fixed-size target.
pub(crate) fn fill_slice<T: Copy>(out: &mut [T], data: &[T]) -> Result<(), NbtError> {
    if data.len() > out.len() {
        return Err(NbtError::SizeMismatch {
            capacity: out.len(),
            count: data.len(),
        });
    }
    out[..data.len()].copy_from_slice(data);
    Ok(())
}

// References and boxes forward the value hooks only. A sequence of them is
// always a generic list, so `Vec<Box<i32>>` is a List of Int where
// `Vec<i32>` is an IntArray.
impl<T: Encode + ?Sized> Encode for &T {
    fn tag_type(&self) -> TagType {
        (**self).tag_type()
    }

    fn write_payload(&self, buf: &mut dyn BufMut) -> Result<(), NbtError> {
        (**self).write_payload(buf)
    }

    fn write_list_payload(&self, buf: &mut dyn BufMut) -> Result<(), NbtError> {
        (**self).write_list_payload(buf)
    }

    fn as_flag(&self) -> Option<bool> {
        (**self).as_flag()
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn tag_type(&self) -> TagType {
        (**self).tag_type()
    }

    fn write_payload(&self, buf: &mut dyn BufMut) -> Result<(), NbtError> {
        (**self).write_payload(buf)
    }

    fn write_list_payload(&self, buf: &mut dyn BufMut) -> Result<(), NbtError> {
        (**self).write_list_payload(buf)
    }

    fn as_flag(&self) -> Option<bool> {
        (**self).as_flag()
    }
}

impl<T: Decode + ?Sized> Decode for Box<T> {
    fn read_payload(&mut self, tag: TagType, buf: &mut dyn Buf) -> Result<(), NbtError> {
        (**self).read_payload(tag, buf)
    }
}

// An absent value is an empty compound.
impl<T: Encode> Encode for Option<T> {
    fn tag_type(&self) -> TagType {
        match self {
            Some(v) => v.tag_type(),
            None => TagType::Compound,
        }
    }

    fn write_payload(&self, buf: &mut dyn BufMut) -> Result<(), NbtError> {
        match self {
            Some(v) => v.write_payload(buf),
            None => {
                crate::wire::encode::put_tag_type(buf, TagType::End);
                Ok(())
            }
        }
    }

    fn write_list_payload(&self, buf: &mut dyn BufMut) -> Result<(), NbtError> {
        match self {
            Some(v) => v.write_list_payload(buf),
            None => crate::marshal::write_list::<T>(buf, &[]),
        }
    }

    fn as_flag(&self) -> Option<bool> {
        self.as_ref().and_then(|v| v.as_flag())
    }
}

// An empty compound reads back as `None`, whatever `T` is. A `Some` holding
// an empty record or map therefore also decodes to `None`.
impl<T: Decode + Default> Decode for Option<T> {
    fn read_payload(&mut self, tag: TagType, buf: &mut dyn Buf) -> Result<(), NbtError> {
        if tag == TagType::Compound && buf.chunk().first() == Some(&TagType::End.as_u8()) {
            buf.advance(1);
            *self = None;
            return Ok(());
        }
        self.get_or_insert_with(T::default).read_payload(tag, buf)
    }
}
