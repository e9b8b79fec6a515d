//! Keyed records: fixed-shape structs bound to compound tags.
//!
//! A record carries a `const` table of [`Field`] descriptors, one per bound
//! struct field in declaration order. Encoding walks the table; decoding
//! resolves wire names to table indices through a process-wide cache built
//! the first time a record type is decoded.
//!
//! The [`nbt_record!`](crate::nbt_record) macro generates the table and the
//! [`Record`], [`Encode`] and [`Decode`](crate::Decode) impls.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::codec::{Decode, Encode};

/// Per-field encoding descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Struct field identifier.
    pub ident: &'static str,
    /// Wire name override.
    pub rename: Option<&'static str>,
    /// Never written, never matched on read.
    pub skip: bool,
    /// Written as a generic list even where an array tag would be chosen.
    pub list: bool,
    /// Identifier of a sibling `bool` field gating emission.
    pub present_if: Option<&'static str>,
}

impl Field {
    /// A field whose wire name is its identifier.
    pub const DEFAULT: Field = Field {
        ident: "",
        rename: None,
        skip: false,
        list: false,
        present_if: None,
    };

    pub const fn rename(self, name: &'static str) -> Self {
        Self {
            rename: Some(name),
            ..self
        }
    }

    pub const fn skip(self) -> Self {
        Self { skip: true, ..self }
    }

    pub const fn list(self) -> Self {
        Self { list: true, ..self }
    }

    pub const fn present_if(self, flag: &'static str) -> Self {
        Self {
            present_if: Some(flag),
            ..self
        }
    }

    /// Attaches the struct field identifier. Used by `nbt_record!`.
    pub const fn bind(self, ident: &'static str) -> Self {
        Self { ident, ..self }
    }

    /// The name this field is written under.
    pub fn name(&self) -> &'static str {
        self.rename.unwrap_or(self.ident)
    }
}

/// A struct whose fields map to the entries of a compound tag.
///
/// `field` and `field_mut` return the field at a position of [`FIELDS`],
/// or `None` past its end.
///
/// [`FIELDS`]: Record::FIELDS
pub trait Record {
    const FIELDS: &'static [Field];

    fn field(&self, index: usize) -> Option<&dyn Encode>;

    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Decode>;
}

type FieldIndex = HashMap<&'static str, usize>;

static FIELD_INDEX: OnceLock<RwLock<HashMap<TypeId, Arc<FieldIndex>>>> = OnceLock::new();

/// Returns the wire name → field index map for `R`, building it on first use.
pub(crate) fn field_index<R: Record + 'static>() -> Arc<FieldIndex> {
    let cache = FIELD_INDEX.get_or_init(Default::default);
    let id = TypeId::of::<R>();

    if let Some(index) = cache
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&id)
    {
        return Arc::clone(index);
    }

    let mut map = cache.write().unwrap_or_else(PoisonError::into_inner);
    let index = map.entry(id).or_insert_with(|| {
        tracing::trace!(record = std::any::type_name::<R>(), "building field index");
        Arc::new(
            R::FIELDS
                .iter()
                .enumerate()
                .filter(|(_, f)| !f.skip)
                .map(|(i, f)| (f.name(), i))
                .collect(),
        )
    });
    Arc::clone(index)
}

/// Binds a struct to a compound tag.
///
/// Each listed field takes an optional [`Field`] descriptor; a bare field
/// uses [`Field::DEFAULT`]. Struct fields left out of the list are never
/// written or read. Listed fields must implement [`Encode`] and
/// [`Decode`](crate::Decode), skipped ones included. The struct must
/// implement `Default`, which is the shape list elements and option slots
/// are decoded into.
///
/// ```
/// use nbtr::{Field, nbt_record};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Player {
///     name: String,
///     health: f32,
///     has_pet: bool,
///     pet: String,
///     scratch: u32,
/// }
///
/// nbt_record! {
///     Player {
///         name: Field::DEFAULT.rename("Name"),
///         health,
///         has_pet,
///         pet: Field::DEFAULT.present_if("has_pet"),
///         scratch: Field::DEFAULT.skip(),
///     }
/// }
///
/// let player = Player { name: "Steve".into(), health: 20.0, ..Default::default() };
/// let bytes = nbtr::to_bytes("", &player).unwrap();
/// let mut decoded = Player::default();
/// nbtr::from_bytes(&bytes, &mut decoded).unwrap();
/// assert_eq!(decoded, player);
/// ```
#[macro_export]
macro_rules! nbt_record {
    ($ty:ty { $($field:ident $(: $desc:expr)?),* $(,)? }) => {
        impl $crate::Record for $ty {
            const FIELDS: &'static [$crate::Field] = &[
                $($crate::__nbt_field!($field $(, $desc)?)),*
            ];

            #[allow(unused_mut, unused_variables, unused_assignments)]
            fn field(&self, index: usize) -> ::core::option::Option<&dyn $crate::Encode> {
                let mut i = 0usize;
                $(
                    if index == i {
                        return ::core::option::Option::Some(&self.$field);
                    }
                    i += 1;
                )*
                ::core::option::Option::None
            }

            #[allow(unused_mut, unused_variables, unused_assignments)]
            fn field_mut(&mut self, index: usize) -> ::core::option::Option<&mut dyn $crate::Decode> {
                let mut i = 0usize;
                $(
                    if index == i {
                        return ::core::option::Option::Some(&mut self.$field);
                    }
                    i += 1;
                )*
                ::core::option::Option::None
            }
        }

        impl $crate::Encode for $ty {
            fn tag_type(&self) -> $crate::TagType {
                $crate::TagType::Compound
            }

            fn write_payload(
                &self,
                buf: &mut dyn $crate::bytes::BufMut,
            ) -> ::core::result::Result<(), $crate::NbtError> {
                $crate::marshal::write_record(self, buf)
            }
        }

        impl $crate::Decode for $ty {
            fn read_payload(
                &mut self,
                tag: $crate::TagType,
                buf: &mut dyn $crate::bytes::Buf,
            ) -> ::core::result::Result<(), $crate::NbtError> {
                $crate::unmarshal::read_record(self, tag, buf)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __nbt_field {
    ($field:ident) => {
        $crate::Field::DEFAULT.bind(::core::stringify!($field))
    };
    ($field:ident, $desc:expr) => {
        ($desc).bind(::core::stringify!($field))
    };
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::{from_bytes, to_bytes, Compound, NbtError, TagType, Value};

    #[derive(Debug, Default, PartialEq)]
    struct UnnamedRoot {
        byte_tag: u8,
        string_tag: String,
    }

    nbt_record! {
        UnnamedRoot {
            byte_tag: Field::DEFAULT.rename("ByteTag"),
            string_tag: Field::DEFAULT.rename("StringTag"),
        }
    }

    fn unnamed_root_bytes() -> Vec<u8> {
        let mut data = vec![0x0A, 0x00, 0x00];
        data.extend_from_slice(&[0x01, 0x00, 0x07]);
        data.extend_from_slice(b"ByteTag");
        data.push(0xFF);
        data.extend_from_slice(&[0x08, 0x00, 0x09]);
        data.extend_from_slice(b"StringTag");
        data.extend_from_slice(&[0x00, 0x0C]);
        data.extend_from_slice(b"hello, world");
        data.push(0x00);
        data
    }

    #[test]
    fn unnamed_root_compound_encodes_exactly() {
        let record = UnnamedRoot {
            byte_tag: 0xFF,
            string_tag: "hello, world".into(),
        };
        let buf = to_bytes("", &record).unwrap();
        assert_eq!(&buf[..], &unnamed_root_bytes()[..]);
    }

    #[test]
    fn unnamed_root_compound_decodes() {
        let mut record = UnnamedRoot::default();
        let name = from_bytes(&unnamed_root_bytes(), &mut record).unwrap();
        assert_eq!(name, "");
        assert_eq!(
            record,
            UnnamedRoot {
                byte_tag: 0xFF,
                string_tag: "hello, world".into(),
            }
        );
    }

    #[test]
    fn field_order_on_wire_is_irrelevant() {
        let mut data = vec![0x0A, 0x00, 0x00];
        data.extend_from_slice(&[0x08, 0x00, 0x09]);
        data.extend_from_slice(b"StringTag");
        data.extend_from_slice(&[0x00, 0x01, b'x']);
        data.extend_from_slice(&[0x01, 0x00, 0x07]);
        data.extend_from_slice(b"ByteTag");
        data.push(0x02);
        data.push(0x00);

        let mut record = UnnamedRoot::default();
        from_bytes(&data, &mut record).unwrap();
        assert_eq!(record.byte_tag, 2);
        assert_eq!(record.string_tag, "x");
    }

    #[test]
    fn unknown_field_is_rejected() {
        let buf = to_bytes("", &Value::from(Compound::from([("Other".to_string(), Value::Int(1))])))
            .unwrap();
        let mut record = UnnamedRoot::default();
        assert!(matches!(
            from_bytes(&buf, &mut record),
            Err(NbtError::UnknownField(name)) if name == "Other"
        ));
    }

    #[test]
    fn non_compound_into_record_is_mismatch() {
        let buf = to_bytes("", &1i32).unwrap();
        let mut record = UnnamedRoot::default();
        assert!(matches!(
            from_bytes(&buf, &mut record),
            Err(NbtError::TypeMismatch {
                tag: TagType::Int,
                ..
            })
        ));
    }

    #[derive(Debug, Default, PartialEq)]
    struct Item {
        name: String,
        created_on: i64,
    }

    nbt_record! {
        Item {
            name,
            created_on: Field::DEFAULT.rename("created-on"),
        }
    }

    #[derive(Debug, Default, PartialEq)]
    struct Level {
        long_test: i64,
        short_test: i16,
        double_test: f64,
        bytes: Vec<u8>,
        ints: Vec<i32>,
        forced: Vec<i32>,
        items: Vec<Item>,
        pair: [Item; 2],
        nested: HashMap<String, Value>,
        has_extra: bool,
        extra: i32,
        cache: u32,
    }

    nbt_record! {
        Level {
            long_test: Field::DEFAULT.rename("longTest"),
            short_test: Field::DEFAULT.rename("shortTest"),
            double_test: Field::DEFAULT.rename("doubleTest"),
            bytes,
            ints,
            forced: Field::DEFAULT.list(),
            items: Field::DEFAULT.rename("listTest (compound)"),
            pair,
            nested: Field::DEFAULT.rename("nested compound test"),
            has_extra,
            extra: Field::DEFAULT.present_if("has_extra"),
            cache: Field::DEFAULT.skip(),
        }
    }

    fn sample_level() -> Level {
        Level {
            long_test: 9_223_372_036_854_775_807,
            short_test: 32_767,
            double_test: 0.493_128_713_218_231_5,
            bytes: vec![0, 62, 34, 16, 8],
            ints: vec![1, -2, 3],
            forced: vec![7, 8],
            items: vec![
                Item {
                    name: "Compound tag #0".into(),
                    created_on: 1_264_099_775_885,
                },
                Item {
                    name: "Compound tag #1".into(),
                    created_on: 1_264_099_775_885,
                },
            ],
            pair: [
                Item {
                    name: "left".into(),
                    created_on: 1,
                },
                Item {
                    name: "right".into(),
                    created_on: 2,
                },
            ],
            nested: HashMap::from([
                ("name".to_string(), Value::from("Hampus")),
                ("value".to_string(), Value::Float(0.75)),
            ]),
            has_extra: false,
            extra: 5,
            cache: 99,
        }
    }

    #[test]
    fn nested_record_round_trip() {
        let level = sample_level();
        let buf = to_bytes("Level", &level).unwrap();

        let mut decoded = Level::default();
        assert_eq!(from_bytes(&buf, &mut decoded).unwrap(), "Level");
        assert_eq!(
            decoded,
            Level {
                extra: 0,
                cache: 0,
                ..sample_level()
            }
        );
    }

    #[test]
    fn wire_shape_of_nested_record() {
        let buf = to_bytes("Level", &sample_level()).unwrap();
        let mut value = Value::default();
        from_bytes(&buf, &mut value).unwrap();

        assert_eq!(value.get("longTest"), Some(&Value::Long(i64::MAX)));
        assert_eq!(value.get("bytes"), Some(&Value::ByteArray(vec![0, 62, 34, 16, 8])));
        assert_eq!(value.get("ints"), Some(&Value::IntArray(vec![1, -2, 3])));
        assert_eq!(
            value.get("forced"),
            Some(&Value::List(vec![Value::Int(7), Value::Int(8)]))
        );
        assert_eq!(value.get("has_extra"), Some(&Value::Byte(0)));
        assert_eq!(value.get("extra"), None);
        assert_eq!(value.get("cache"), None);

        let Some(Value::List(items)) = value.get("listTest (compound)") else {
            panic!("items should be a list");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[1].get("created-on"),
            Some(&Value::Long(1_264_099_775_885))
        );
        assert_eq!(
            value.get("pair").and_then(|p| match p {
                Value::List(items) => items.first().and_then(|i| i.get("name")),
                _ => None,
            }),
            Some(&Value::from("left"))
        );
    }

    #[test]
    fn gated_field_written_when_flag_set() {
        let level = Level {
            has_extra: true,
            extra: 5,
            ..Level::default()
        };
        let buf = to_bytes("", &level).unwrap();

        let mut decoded = Level::default();
        from_bytes(&buf, &mut decoded).unwrap();
        assert!(decoded.has_extra);
        assert_eq!(decoded.extra, 5);
    }

    #[test]
    fn skipped_field_is_never_matched() {
        let mut data = vec![0x0A, 0x00, 0x00];
        data.extend_from_slice(&[0x03, 0x00, 0x05]);
        data.extend_from_slice(b"cache");
        data.extend_from_slice(&[0, 0, 0, 1]);
        data.push(0x00);

        let mut level = Level::default();
        assert!(matches!(
            from_bytes(&data, &mut level),
            Err(NbtError::UnknownField(name)) if name == "cache"
        ));
    }

    #[test]
    fn fixed_array_of_records_overflow() {
        let items = vec![Item::default(), Item::default(), Item::default()];
        let buf = to_bytes("", &items).unwrap();
        let mut pair: [Item; 2] = Default::default();
        assert!(matches!(
            from_bytes(&buf, &mut pair),
            Err(NbtError::SizeMismatch {
                capacity: 2,
                count: 3
            })
        ));
    }

    #[derive(Debug, Default)]
    struct BadGate {
        flag: i32,
        value: i32,
    }

    nbt_record! {
        BadGate {
            flag,
            value: Field::DEFAULT.present_if("flag"),
        }
    }

    #[derive(Debug, Default)]
    struct MissingGate {
        value: i32,
    }

    nbt_record! {
        MissingGate {
            value: Field::DEFAULT.present_if("nope"),
        }
    }

    #[test]
    fn gate_must_be_sibling_bool() {
        assert!(matches!(
            to_bytes("", &BadGate::default()),
            Err(NbtError::InvalidPresence(gate)) if gate == "flag"
        ));
        assert!(matches!(
            to_bytes("", &MissingGate::default()),
            Err(NbtError::InvalidPresence(gate)) if gate == "nope"
        ));
    }

    #[test]
    fn field_index_is_cached() {
        let first = field_index::<Level>();
        let second = field_index::<Level>();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.get("longTest"), Some(&0));
        assert_eq!(first.get("long_test"), None);
        assert_eq!(first.get("cache"), None);
        assert_eq!(first.get("extra"), Some(&10));
    }

    #[test]
    fn descriptor_builders() {
        const F: Field = Field::DEFAULT.rename("X").list().bind("x");
        assert_eq!(F.name(), "X");
        assert!(F.list);
        assert!(!F.skip);
        assert_eq!(Field::DEFAULT.bind("y").name(), "y");
        assert_eq!(Level::FIELDS.len(), 12);
        assert_eq!(Level::FIELDS[11].ident, "cache");
        assert!(Level::FIELDS[11].skip);
    }
}
