//! Structure template documents and their NBT encoding.
//!
//! Structure templates are the files written by an in-game structure block:
//! a gzip-compressed NBT compound holding a bounding size, a block palette and
//! a list of positioned palette references.

pub mod io;
pub mod json;
pub mod structure;

pub use io::{decode_structure, encode_structure, read_structure, read_value, write_structure};
pub use structure::{BlockEntry, BlockState, StructureFile, DATA_VERSION};
