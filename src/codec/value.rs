//! `Value` as the any-kind target.

use bytes::{Buf, BufMut};

use super::{Decode, Encode};
use crate::error::NbtError;
use crate::marshal::write_list;
use crate::types::{Compound, Value};
use crate::unmarshal::read_list_vec;
use crate::wire::{decode, encode, TagType};

impl Encode for Value {
    fn tag_type(&self) -> TagType {
        self.tag()
    }

    fn write_payload(&self, buf: &mut dyn BufMut) -> Result<(), NbtError> {
        match self {
            Self::Byte(b) => encode::put_byte(buf, *b),
            Self::Short(s) => encode::put_short(buf, *s),
            Self::Int(i) => encode::put_int(buf, *i),
            Self::Long(l) => encode::put_long(buf, *l),
            Self::Float(v) => encode::put_float(buf, *v),
            Self::Double(v) => encode::put_double(buf, *v),
            Self::ByteArray(b) => return encode::put_byte_array(buf, b),
            Self::String(s) => return encode::put_string(buf, s),
            Self::List(items) => return write_list(buf, items),
            Self::Compound(map) => return map.write_payload(buf),
            Self::IntArray(v) => return encode::put_int_array(buf, v),
            Self::LongArray(v) => return encode::put_long_array(buf, v),
        }
        Ok(())
    }

    fn write_list_payload(&self, buf: &mut dyn BufMut) -> Result<(), NbtError> {
        match self {
            Self::ByteArray(b) => write_list(buf, b),
            Self::IntArray(v) => write_list(buf, v),
            Self::LongArray(v) => write_list(buf, v),
            Self::List(items) => write_list(buf, items),
            other => Err(NbtError::UnsupportedType(format!(
                "{} cannot be written as {}",
                other.tag(),
                TagType::List
            ))),
        }
    }
}

impl Decode for Value {
    fn read_payload(&mut self, tag: TagType, buf: &mut dyn Buf) -> Result<(), NbtError> {
        *self = read_value(tag, buf)?;
        Ok(())
    }
}

/// Decodes a payload of type `tag` into its natively sized [`Value`].
pub fn read_value(tag: TagType, buf: &mut dyn Buf) -> Result<Value, NbtError> {
    Ok(match tag {
        TagType::Byte => Value::Byte(decode::get_byte(buf)?),
        TagType::Short => Value::Short(decode::get_short(buf)?),
        TagType::Int => Value::Int(decode::get_int(buf)?),
        TagType::Long => Value::Long(decode::get_long(buf)?),
        TagType::Float => Value::Float(decode::get_float(buf)?),
        TagType::Double => Value::Double(decode::get_double(buf)?),
        TagType::ByteArray => Value::ByteArray(decode::get_byte_array(buf)?),
        TagType::String => Value::String(decode::get_string(buf)?),
        TagType::List => {
            let mut items = Vec::new();
            read_list_vec(buf, &mut items)?;
            Value::List(items)
        }
        TagType::Compound => {
            let mut map = Compound::new();
            map.read_payload(tag, buf)?;
            Value::Compound(map)
        }
        TagType::IntArray => Value::IntArray(decode::get_int_array(buf)?),
        TagType::LongArray => Value::LongArray(decode::get_long_array(buf)?),
        TagType::End | TagType::Unknown => {
            return Err(NbtError::UnsupportedType(format!("{tag} has no payload")));
        }
    })
}
