//! Scalar mappings: integers, floats, booleans and strings.

use bytes::{Buf, BufMut};

use super::{fill_slice, incompatible, Decode, Encode};
use crate::error::NbtError;
use crate::wire::{decode, encode, TagType};

// Integer tags a target of a given width accepts.
const WIDTH_8: &[TagType] = &[TagType::Byte];
const WIDTH_16: &[TagType] = &[TagType::Byte, TagType::Short];
const WIDTH_32: &[TagType] = &[TagType::Byte, TagType::Short, TagType::Int];
const WIDTH_64: &[TagType] = &[TagType::Byte, TagType::Short, TagType::Int, TagType::Long];

/// Reads an integer payload widened to `i64`. Bytes are unsigned on the wire.
fn read_integer(
    tag: TagType,
    buf: &mut dyn Buf,
    accepts: &[TagType],
    target: &'static str,
) -> Result<i64, NbtError> {
    if !accepts.contains(&tag) {
        return Err(incompatible(tag, target));
    }
    Ok(match tag {
        TagType::Byte => i64::from(decode::get_byte(buf)?),
        TagType::Short => i64::from(decode::get_short(buf)?),
        TagType::Int => i64::from(decode::get_int(buf)?),
        _ => decode::get_long(buf)?,
    })
}

macro_rules! impl_integer {
    ($ty:ty => $tag:ident, $put:ident, $accepts:expr) => {
        impl_integer!($ty => $tag, $put, $accepts; {} {});
    };
    ($ty:ty => $tag:ident, $put:ident, $accepts:expr; { $($enc:tt)* } { $($dec:tt)* }) => {
        impl Encode for $ty {
            fn tag_type(&self) -> TagType {
                TagType::$tag
            }

            fn write_payload(&self, buf: &mut dyn BufMut) -> Result<(), NbtError> {
                encode::$put(buf, *self as _);
                Ok(())
            }

            $($enc)*
        }

        impl Decode for $ty {
            fn read_payload(&mut self, tag: TagType, buf: &mut dyn Buf) -> Result<(), NbtError> {
                *self = read_integer(tag, buf, $accepts, stringify!($ty))? as $ty;
                Ok(())
            }

            $($dec)*
        }
    };
}

impl_integer!(i8 => Byte, put_byte, WIDTH_8);
impl_integer!(i16 => Short, put_short, WIDTH_16);
impl_integer!(u16 => Short, put_short, WIDTH_16);
impl_integer!(u32 => Int, put_int, WIDTH_32);
impl_integer!(u64 => Long, put_long, WIDTH_64);

// u8, i32 and i64 sequences are the dedicated array tags.

impl_integer!(u8 => Byte, put_byte, WIDTH_8; {
    fn slice_tag_type(_items: &[Self]) -> TagType {
        TagType::ByteArray
    }

    fn write_slice_payload(items: &[Self], buf: &mut dyn BufMut) -> Result<(), NbtError> {
        encode::put_byte_array(buf, items)
    }
} {
    fn read_vec(tag: TagType, buf: &mut dyn Buf, out: &mut Vec<Self>) -> Result<(), NbtError> {
        match tag {
            TagType::ByteArray => {
                *out = decode::get_byte_array(buf)?;
                Ok(())
            }
            TagType::List => crate::unmarshal::read_list_vec(buf, out),
            other => Err(incompatible(other, "Vec<u8>")),
        }
    }

    fn read_slice(tag: TagType, buf: &mut dyn Buf, out: &mut [Self]) -> Result<(), NbtError> {
        match tag {
            TagType::ByteArray => fill_slice(out, &decode::get_byte_array(buf)?),
            TagType::List => crate::unmarshal::read_list_slice(buf, out),
            other => Err(incompatible(other, "[u8]")),
        }
    }
});

impl_integer!(i32 => Int, put_int, WIDTH_32; {
    fn slice_tag_type(_items: &[Self]) -> TagType {
        TagType::IntArray
    }

    fn write_slice_payload(items: &[Self], buf: &mut dyn BufMut) -> Result<(), NbtError> {
        encode::put_int_array(buf, items)
    }
} {
    fn read_vec(tag: TagType, buf: &mut dyn Buf, out: &mut Vec<Self>) -> Result<(), NbtError> {
        match tag {
            TagType::IntArray => {
                *out = decode::get_int_array(buf)?;
                Ok(())
            }
            TagType::List => crate::unmarshal::read_list_vec(buf, out),
            other => Err(incompatible(other, "Vec<i32>")),
        }
    }

    fn read_slice(tag: TagType, buf: &mut dyn Buf, out: &mut [Self]) -> Result<(), NbtError> {
        match tag {
            TagType::IntArray => fill_slice(out, &decode::get_int_array(buf)?),
            TagType::List => crate::unmarshal::read_list_slice(buf, out),
            other => Err(incompatible(other, "[i32]")),
        }
    }
});

impl_integer!(i64 => Long, put_long, WIDTH_64; {
    fn slice_tag_type(_items: &[Self]) -> TagType {
        TagType::LongArray
    }

    fn write_slice_payload(items: &[Self], buf: &mut dyn BufMut) -> Result<(), NbtError> {
        encode::put_long_array(buf, items)
    }
} {
    fn read_vec(tag: TagType, buf: &mut dyn Buf, out: &mut Vec<Self>) -> Result<(), NbtError> {
        match tag {
            TagType::LongArray => {
                *out = decode::get_long_array(buf)?;
                Ok(())
            }
            TagType::IntArray => {
                *out = decode::get_int_array(buf)?.into_iter().map(i64::from).collect();
                Ok(())
            }
            TagType::List => crate::unmarshal::read_list_vec(buf, out),
            other => Err(incompatible(other, "Vec<i64>")),
        }
    }

    fn read_slice(tag: TagType, buf: &mut dyn Buf, out: &mut [Self]) -> Result<(), NbtError> {
        match tag {
            TagType::LongArray => fill_slice(out, &decode::get_long_array(buf)?),
            TagType::IntArray => {
                let wide: Vec<i64> = decode::get_int_array(buf)?.into_iter().map(i64::from).collect();
                fill_slice(out, &wide)
            }
            TagType::List => crate::unmarshal::read_list_slice(buf, out),
            other => Err(incompatible(other, "[i64]")),
        }
    }
});

impl Encode for bool {
    fn tag_type(&self) -> TagType {
        TagType::Byte
    }

    fn write_payload(&self, buf: &mut dyn BufMut) -> Result<(), NbtError> {
        encode::put_byte(buf, u8::from(*self));
        Ok(())
    }

    fn as_flag(&self) -> Option<bool> {
        Some(*self)
    }
}

impl Decode for bool {
    fn read_payload(&mut self, tag: TagType, buf: &mut dyn Buf) -> Result<(), NbtError> {
        match tag {
            TagType::Byte => {
                *self = decode::get_byte(buf)? == 1;
                Ok(())
            }
            other => Err(incompatible(other, "bool")),
        }
    }
}

impl Encode for f32 {
    fn tag_type(&self) -> TagType {
        TagType::Float
    }

    fn write_payload(&self, buf: &mut dyn BufMut) -> Result<(), NbtError> {
        encode::put_float(buf, *self);
        Ok(())
    }
}

impl Decode for f32 {
    fn read_payload(&mut self, tag: TagType, buf: &mut dyn Buf) -> Result<(), NbtError> {
        *self = match tag {
            TagType::Float => decode::get_float(buf)?,
            TagType::Double => decode::get_double(buf)? as f32,
            other => return Err(incompatible(other, "f32")),
        };
        Ok(())
    }
}

impl Encode for f64 {
    fn tag_type(&self) -> TagType {
        TagType::Double
    }

    fn write_payload(&self, buf: &mut dyn BufMut) -> Result<(), NbtError> {
        encode::put_double(buf, *self);
        Ok(())
    }
}

impl Decode for f64 {
    fn read_payload(&mut self, tag: TagType, buf: &mut dyn Buf) -> Result<(), NbtError> {
        match tag {
            TagType::Double => {
                *self = decode::get_double(buf)?;
                Ok(())
            }
            other => Err(incompatible(other, "f64")),
        }
    }
}

impl Encode for str {
    fn tag_type(&self) -> TagType {
        TagType::String
    }

    fn write_payload(&self, buf: &mut dyn BufMut) -> Result<(), NbtError> {
        encode::put_string(buf, self)
    }
}

impl Encode for String {
    fn tag_type(&self) -> TagType {
        TagType::String
    }

    fn write_payload(&self, buf: &mut dyn BufMut) -> Result<(), NbtError> {
        encode::put_string(buf, self)
    }
}

impl Decode for String {
    fn read_payload(&mut self, tag: TagType, buf: &mut dyn Buf) -> Result<(), NbtError> {
        match tag {
            TagType::String => {
                *self = decode::get_string(buf)?;
                Ok(())
            }
            other => Err(incompatible(other, "String")),
        }
    }
}
