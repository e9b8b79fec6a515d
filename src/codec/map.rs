//! Dynamically keyed compounds: `HashMap` and `BTreeMap` with text keys.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

use bytes::{Buf, BufMut};

use super::{incompatible, Decode, Encode};
use crate::error::NbtError;
use crate::marshal::write_compound_entries;
use crate::unmarshal::read_compound;
use crate::wire::TagType;

/// A map key that can stand in for a compound entry name.
///
/// Only text keys are valid names; other key types are accepted by the type
/// system so that a map of them fails with [`NbtError::InvalidKeyType`]
/// instead of being silently re-keyed.
pub trait MapKey: Sized {
    /// Human-readable key type, used in error messages.
    const KIND: &'static str;

    /// Whether this key type is text.
    const TEXT: bool;

    fn to_name(&self) -> Result<Cow<'_, str>, NbtError>;

    fn from_name(name: String) -> Result<Self, NbtError>;
}

impl MapKey for String {
    const KIND: &'static str = "String";
    const TEXT: bool = true;

    fn to_name(&self) -> Result<Cow<'_, str>, NbtError> {
        Ok(Cow::Borrowed(self))
    }

    fn from_name(name: String) -> Result<Self, NbtError> {
        Ok(name)
    }
}

impl MapKey for Box<str> {
    const KIND: &'static str = "Box<str>";
    const TEXT: bool = true;

    fn to_name(&self) -> Result<Cow<'_, str>, NbtError> {
        Ok(Cow::Borrowed(self))
    }

    fn from_name(name: String) -> Result<Self, NbtError> {
        Ok(name.into_boxed_str())
    }
}

impl MapKey for Arc<str> {
    const KIND: &'static str = "Arc<str>";
    const TEXT: bool = true;

    fn to_name(&self) -> Result<Cow<'_, str>, NbtError> {
        Ok(Cow::Borrowed(self))
    }

    fn from_name(name: String) -> Result<Self, NbtError> {
        Ok(Arc::from(name))
    }
}

macro_rules! impl_non_text_key {
    ($($ty:ty),*) => {
        $(
            impl MapKey for $ty {
                const KIND: &'static str = stringify!($ty);
                const TEXT: bool = false;

                fn to_name(&self) -> Result<Cow<'_, str>, NbtError> {
                    Err(NbtError::InvalidKeyType(Self::KIND))
                }

                fn from_name(_name: String) -> Result<Self, NbtError> {
                    Err(NbtError::InvalidKeyType(Self::KIND))
                }
            }
        )*
    };
}

impl_non_text_key!(u8, i8, i16, u16, i32, u32, i64, u64, char, bool);

fn check_key<K: MapKey>() -> Result<(), NbtError> {
    if K::TEXT {
        Ok(())
    } else {
        Err(NbtError::InvalidKeyType(K::KIND))
    }
}

impl<K: MapKey, V: Encode, S> Encode for HashMap<K, V, S> {
    fn tag_type(&self) -> TagType {
        TagType::Compound
    }

    fn write_payload(&self, buf: &mut dyn BufMut) -> Result<(), NbtError> {
        check_key::<K>()?;
        write_compound_entries(buf, self.iter())
    }
}

impl<K, V, S> Decode for HashMap<K, V, S>
where
    K: MapKey + Eq + Hash,
    V: Decode + Default,
    S: BuildHasher,
{
    fn read_payload(&mut self, tag: TagType, buf: &mut dyn Buf) -> Result<(), NbtError> {
        if tag != TagType::Compound {
            return Err(incompatible(tag, "map"));
        }
        check_key::<K>()?;
        read_compound(buf, |tag, name, buf| {
            let mut value = V::default();
            value.read_payload(tag, buf)?;
            self.insert(K::from_name(name)?, value);
            Ok(())
        })
    }
}

impl<K: MapKey, V: Encode> Encode for BTreeMap<K, V> {
    fn tag_type(&self) -> TagType {
        TagType::Compound
    }

    fn write_payload(&self, buf: &mut dyn BufMut) -> Result<(), NbtError> {
        check_key::<K>()?;
        write_compound_entries(buf, self.iter())
    }
}

impl<K, V> Decode for BTreeMap<K, V>
where
    K: MapKey + Ord,
    V: Decode + Default,
{
    fn read_payload(&mut self, tag: TagType, buf: &mut dyn Buf) -> Result<(), NbtError> {
        if tag != TagType::Compound {
            return Err(incompatible(tag, "map"));
        }
        check_key::<K>()?;
        read_compound(buf, |tag, name, buf| {
            let mut value = V::default();
            value.read_payload(tag, buf)?;
            self.insert(K::from_name(name)?, value);
            Ok(())
        })
    }
}
