//! Async stream adapters over tokio byte streams.

pub mod reader;
pub mod writer;

pub use reader::NbtReader;
pub use writer::NbtWriter;
