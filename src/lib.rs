//! nbtr: a pure-Rust Named Binary Tag (NBT) codec.
//!
//! NBT is a tagged, big-endian binary format: every value is a typed payload,
//! and compounds hold named tags terminated by an `End` byte. This crate maps
//! host values to and from that format through the [`Encode`] and [`Decode`]
//! traits, selected by the static type of the value or target.
//!
//! # Architecture
//!
//! - **`wire`**: Tag type table and big-endian primitive readers/writers
//! - **`codec`**: `Encode` / `Decode` impls for scalars, sequences, maps, `Value`
//! - **`marshal`** / **`unmarshal`**: Root tag entry points and compound/list drivers
//! - **`record`**: Field descriptors and the `nbt_record!` macro for keyed structs
//! - **`types`**: The dynamic `Value` tree
//! - **`io`**: Async reader/writer over tokio byte streams
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use nbtr::Value;
//!
//! let map = BTreeMap::from([("ByteTag".to_string(), Value::Byte(0xFF))]);
//! let bytes = nbtr::to_bytes("", &map).unwrap();
//! assert_eq!(bytes[0], 0x0A);
//!
//! let mut decoded: BTreeMap<String, Value> = BTreeMap::new();
//! let name = nbtr::from_bytes(&bytes, &mut decoded).unwrap();
//! assert_eq!(name, "");
//! assert_eq!(decoded, map);
//! ```

pub mod codec;
pub mod error;
pub mod io;
pub mod marshal;
pub mod record;
pub mod types;
pub mod unmarshal;
pub mod wire;

#[doc(hidden)]
pub use bytes;

pub use codec::{Decode, Encode, MapKey};
pub use error::NbtError;
pub use marshal::{marshal, to_bytes};
pub use record::{Field, Record};
pub use types::{Compound, Value};
pub use unmarshal::{from_bytes, unmarshal};
pub use wire::TagType;
