//! Reading and writing structure templates.
//!
//! Templates saved by the game are gzip-compressed. Uncompressed NBT is also
//! accepted on read; everything written is gzipped.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::Context;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::structure::StructureFile;

/// Leading bytes of a gzip stream.
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Strip gzip compression if present, otherwise return the bytes as they are.
pub fn decompress(data: &[u8]) -> anyhow::Result<Vec<u8>> {
    if data.starts_with(&GZIP_MAGIC) {
        let mut decoder = GzDecoder::new(data);
        let mut decompressed = Vec::new();
        decoder.read_to_end(&mut decompressed)?;
        Ok(decompressed)
    } else {
        Ok(data.to_vec())
    }
}

pub fn decode_structure(data: &[u8]) -> anyhow::Result<StructureFile> {
    let nbt = decompress(data)?;
    let structure: StructureFile = fastnbt::from_bytes(&nbt)?;
    Ok(structure)
}

/// Serialize to NBT and gzip it.
pub fn encode_structure(structure: &StructureFile) -> anyhow::Result<Vec<u8>> {
    let nbt = fastnbt::to_bytes(structure)?;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&nbt)?;
    Ok(encoder.finish()?)
}

pub fn read_structure(path: &Path) -> anyhow::Result<StructureFile> {
    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    decode_structure(&data).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Read any NBT file as an untyped value tree.
pub fn read_value(path: &Path) -> anyhow::Result<fastnbt::Value> {
    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let nbt = decompress(&data)?;
    let value: fastnbt::Value = fastnbt::from_bytes(&nbt)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(value)
}

/// Write a structure, creating parent directories. Any existing file is replaced.
pub fn write_structure(path: &Path, structure: &StructureFile) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let data = encode_structure(structure)?;
    fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{BlockEntry, BlockState, DATA_VERSION};

    fn sample() -> StructureFile {
        let mut structure = StructureFile::new([3, 2, 3], DATA_VERSION);
        structure.palette.push(BlockState::new("minecraft:oak_log").with_property("axis", "y"));
        structure.palette.push(BlockState::new("minecraft:oak_leaves"));
        structure.blocks.push(BlockEntry::new(0, [1, 0, 1]));
        structure.blocks.push(BlockEntry::new(1, [1, 1, 1]));
        structure
    }

    #[test]
    fn test_encoded_structure_is_gzipped() {
        let bytes = encode_structure(&sample()).unwrap();
        assert!(bytes.starts_with(&GZIP_MAGIC));

        let decoded = decode_structure(&bytes).unwrap();
        assert_eq!(decoded.size, vec![3, 2, 3]);
        assert_eq!(decoded.data_version, Some(DATA_VERSION));
        assert_eq!(decoded.palette, sample().palette);
        assert_eq!(decoded.blocks.len(), 2);
        assert_eq!(decoded.blocks[1].pos, vec![1, 1, 1]);
        assert_eq!(decoded.blocks[1].state, 1);
    }

    #[test]
    fn test_uncompressed_structure_is_accepted() {
        let raw = fastnbt::to_bytes(&sample()).unwrap();
        let decoded = decode_structure(&raw).unwrap();
        assert_eq!(decoded.palette.len(), 2);
        assert!(decoded.palette[1].properties.is_empty());
    }

    #[test]
    fn test_missing_optional_fields() {
        // Templates from older versions may lack DataVersion and entities.
        #[derive(serde::Serialize)]
        struct Bare {
            size: Vec<i32>,
            blocks: Vec<BlockEntry>,
            palette: Vec<BlockState>,
        }
        let bare = Bare {
            size: vec![1, 1, 1],
            blocks: vec![BlockEntry::new(0, [0, 0, 0])],
            palette: vec![BlockState::new("minecraft:oak_log")],
        };
        let decoded = decode_structure(&fastnbt::to_bytes(&bare).unwrap()).unwrap();
        assert_eq!(decoded.data_version, None);
        assert!(decoded.entities.is_empty());
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = std::env::temp_dir().join(format!("arborist-nbt-io-{}", std::process::id()));
        let path = dir.join("nested").join("1.nbt");

        write_structure(&path, &sample()).unwrap();
        let mut smaller = sample();
        smaller.blocks.truncate(1);
        write_structure(&path, &smaller).unwrap();

        let read_back = read_structure(&path).unwrap();
        assert_eq!(read_back.blocks.len(), 1);

        let value = read_value(&path).unwrap();
        assert!(matches!(value, fastnbt::Value::Compound(_)));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
