//! NBT structures for structure template files.
//!
//! These structures are serialized using fastnbt and follow the layout the
//! game itself uses for `.nbt` structure templates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Data version stamped on emitted structures (1.18.2).
/// Matching the game's version keeps it from running its upgrader on placement.
pub const DATA_VERSION: i32 = 2975;

/// Root compound of a structure template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureFile {
    #[serde(rename = "DataVersion", default, skip_serializing_if = "Option::is_none")]
    pub data_version: Option<i32>,

    // Bounding size as [x, y, z]
    pub size: Vec<i32>,

    // Entities are never produced, but templates saved in-game may carry some.
    #[serde(default)]
    pub entities: Vec<fastnbt::Value>,

    pub blocks: Vec<BlockEntry>,

    pub palette: Vec<BlockState>,
}

impl StructureFile {
    /// An empty document of the given size, ready to be filled.
    pub fn new(size: [i32; 3], data_version: i32) -> Self {
        Self {
            data_version: Some(data_version),
            size: size.to_vec(),
            entities: Vec::new(),
            blocks: Vec::new(),
            palette: Vec::new(),
        }
    }

    /// The bounding size, checked to be exactly three integers.
    pub fn dimensions(&self) -> anyhow::Result<[i32; 3]> {
        match self.size.as_slice() {
            &[x, y, z] => Ok([x, y, z]),
            other => anyhow::bail!("Structure size must have 3 components, found {:?}", other),
        }
    }
}

// --- Palette entry ---
// Compared by value: two entries with the same name and properties are the same state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockState {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Properties", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

impl BlockState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: BTreeMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}

// --- Single placement ---
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockEntry {
    // Index into the palette
    pub state: i32,

    // Structure-local [x, y, z]
    pub pos: Vec<i32>,

    // Block entity data, only present for blocks like chests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbt: Option<fastnbt::Value>,
}

impl BlockEntry {
    pub fn new(state: usize, pos: [i32; 3]) -> Self {
        Self {
            state: state as i32,
            pos: pos.to_vec(),
            nbt: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        let structure = StructureFile::new([5, 9, 7], DATA_VERSION);
        assert_eq!(structure.dimensions().unwrap(), [5, 9, 7]);

        let broken = StructureFile {
            size: vec![5, 9],
            ..structure
        };
        assert!(broken.dimensions().is_err());
    }

    #[test]
    fn test_block_state_equality_ignores_insertion_order() {
        let a = BlockState::new("tfc:wood/log/oak")
            .with_property("axis", "y")
            .with_property("natural", "true");
        let b = BlockState::new("tfc:wood/log/oak")
            .with_property("natural", "true")
            .with_property("axis", "y");
        assert_eq!(a, b);
        assert_eq!(a.property("axis"), Some("y"));
        assert_eq!(a.property("distance"), None);
    }
}
