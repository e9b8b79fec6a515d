//! Dynamic NBT value types.

mod value;

pub use value::{Compound, Value};
