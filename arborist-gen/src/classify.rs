//! Splits a structure's placements into logs, leaves and roots.

use std::collections::{BTreeSet, HashMap};

use arborist_nbt::StructureFile;

use crate::error::{DecomposeError, Result};
use crate::pos::BlockPos;

/// Which block ids count as logs, wood and leaves.
#[derive(Debug, Clone)]
pub struct BlockFilter {
    pub logs: Vec<String>,
    pub woods: Vec<String>,
    pub leaves: Vec<String>,
}

impl BlockFilter {
    /// Templates are built in-game out of oak.
    pub fn vanilla() -> Self {
        Self {
            logs: vec!["minecraft:oak_log".to_string()],
            woods: vec!["minecraft:oak_wood".to_string()],
            leaves: vec!["minecraft:oak_leaves".to_string()],
        }
    }

    /// Matches the blocks written by the re-emitter, so output can be fed back in.
    pub fn emitted(namespace: &str, wood: &str) -> Self {
        Self {
            logs: vec![format!("{}:wood/log/{}", namespace, wood)],
            woods: vec![format!("{}:wood/wood/{}", namespace, wood)],
            leaves: vec![format!("{}:wood/leaves/{}", namespace, wood)],
        }
    }

    fn class_of(&self, name: &str) -> Option<BlockClass> {
        if self.logs.iter().any(|n| n == name) {
            Some(BlockClass::Log(LogKind::Log))
        } else if self.woods.iter().any(|n| n == name) {
            Some(BlockClass::Log(LogKind::Wood))
        } else if self.leaves.iter().any(|n| n == name) {
            Some(BlockClass::Leaf)
        } else {
            None
        }
    }
}

impl Default for BlockFilter {
    fn default() -> Self {
        Self::vanilla()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockClass {
    Log(LogKind),
    Leaf,
}

/// Logs keep their bark-less or all-bark look through the rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogKind {
    Log,
    Wood,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogBlock {
    /// Palette index in the source structure.
    pub state: usize,
    pub kind: LogKind,
    pub axis: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Classification {
    pub size: [i32; 3],
    pub logs: HashMap<BlockPos, LogBlock>,
    /// Leaf position to source palette index.
    pub leaves: HashMap<BlockPos, usize>,
    /// Logs on the floor layer (y = 0).
    pub roots: BTreeSet<BlockPos>,
    /// Palette names matched by nothing in the filter.
    pub unrecognized: BTreeSet<String>,
}

impl Classification {
    /// The log every random or overlay tree grows from: `(width / 2, 0, depth / 2)`.
    pub fn center_root(&self) -> Result<BlockPos> {
        let [x, _, z] = self.size;
        let center = BlockPos::new(x / 2, 0, z / 2);
        if self.roots.contains(&center) {
            Ok(center)
        } else {
            Err(DecomposeError::MissingCenterRoot {
                center,
                roots: self.roots.iter().copied().collect(),
            })
        }
    }

    /// Moves every position by `offset`, leaving roots recomputed for the new floor.
    pub fn translated(&self, offset: BlockPos) -> Classification {
        let logs: HashMap<BlockPos, LogBlock> =
            self.logs.iter().map(|(p, b)| (*p + offset, b.clone())).collect();
        let leaves = self.leaves.iter().map(|(p, s)| (*p + offset, *s)).collect();
        let roots = logs.keys().filter(|p| p.y == 0).copied().collect();
        Classification {
            size: self.size,
            logs,
            leaves,
            roots,
            unrecognized: self.unrecognized.clone(),
        }
    }
}

/// Checks the horizontal extents are odd, so the structure has a center column.
pub fn require_odd_width(size: [i32; 3]) -> Result<()> {
    let [x, _, z] = size;
    if x % 2 == 1 && z % 2 == 1 {
        Ok(())
    } else {
        Err(DecomposeError::EvenWidth { x, z })
    }
}

pub fn classify(structure: &StructureFile, filter: &BlockFilter) -> Result<Classification> {
    let size = structure.dimensions()?;
    require_odd_width(size)?;

    let classes: Vec<Option<BlockClass>> =
        structure.palette.iter().map(|b| filter.class_of(&b.name)).collect();
    let unrecognized = structure
        .palette
        .iter()
        .zip(&classes)
        .filter(|(_, class)| class.is_none())
        .map(|(b, _)| b.name.clone())
        .collect();

    let mut logs = HashMap::new();
    let mut leaves = HashMap::new();

    // A later placement at the same position replaces an earlier one.
    for (index, entry) in structure.blocks.iter().enumerate() {
        let pos =
            BlockPos::from_slice(&entry.pos).ok_or_else(|| DecomposeError::MalformedPlacement {
                index,
                reason: format!("position {:?} is not three integers", entry.pos),
            })?;
        let state = usize::try_from(entry.state)
            .ok()
            .filter(|s| *s < classes.len())
            .ok_or_else(|| DecomposeError::MalformedPlacement {
                index,
                reason: format!(
                    "state {} is outside the palette of {}",
                    entry.state,
                    classes.len()
                ),
            })?;

        match classes[state] {
            Some(BlockClass::Log(kind)) => {
                let axis = structure.palette[state].property("axis").map(str::to_string);
                leaves.remove(&pos);
                logs.insert(pos, LogBlock { state, kind, axis });
            }
            Some(BlockClass::Leaf) => {
                logs.remove(&pos);
                leaves.insert(pos, state);
            }
            None => {
                logs.remove(&pos);
                leaves.remove(&pos);
            }
        }
    }

    let roots = logs.keys().filter(|p| p.y == 0).copied().collect();

    Ok(Classification {
        size,
        logs,
        leaves,
        roots,
        unrecognized,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use arborist_nbt::{BlockEntry, BlockState, DATA_VERSION};

    fn structure(size: [i32; 3]) -> StructureFile {
        let mut structure = StructureFile::new(size, DATA_VERSION);
        structure.palette = vec![
            BlockState::new("minecraft:oak_log").with_property("axis", "y"),
            BlockState::new("minecraft:oak_wood").with_property("axis", "x"),
            BlockState::new("minecraft:oak_leaves").with_property("persistent", "true"),
            BlockState::new("minecraft:structure_void"),
        ];
        structure
    }

    #[test]
    fn test_partitions_positions() {
        let mut s = structure([3, 3, 3]);
        s.blocks = vec![
            BlockEntry::new(0, [1, 0, 1]),
            BlockEntry::new(0, [0, 0, 1]),
            BlockEntry::new(1, [1, 1, 1]),
            BlockEntry::new(2, [1, 2, 1]),
            BlockEntry::new(3, [0, 2, 0]),
        ];

        let classes = classify(&s, &BlockFilter::vanilla()).unwrap();
        assert_eq!(classes.logs.len(), 3);
        assert_eq!(classes.leaves.len(), 1);
        assert_eq!(classes.leaves[&BlockPos::new(1, 2, 1)], 2);
        assert_eq!(
            classes.roots.iter().copied().collect::<Vec<_>>(),
            vec![BlockPos::new(0, 0, 1), BlockPos::new(1, 0, 1)]
        );

        let wood = &classes.logs[&BlockPos::new(1, 1, 1)];
        assert_eq!(wood.kind, LogKind::Wood);
        assert_eq!(wood.axis.as_deref(), Some("x"));
        assert_eq!(wood.state, 1);

        let unrecognized: Vec<&String> = classes.unrecognized.iter().collect();
        assert_eq!(unrecognized, vec!["minecraft:structure_void"]);
        assert_eq!(classes.center_root().unwrap(), BlockPos::new(1, 0, 1));
    }

    #[test]
    fn test_even_width_is_rejected() {
        let s = structure([4, 3, 3]);
        match classify(&s, &BlockFilter::vanilla()) {
            Err(DecomposeError::EvenWidth { x: 4, z: 3 }) => {}
            other => panic!("Expected EvenWidth, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_center_root() {
        let mut s = structure([5, 3, 5]);
        s.blocks = vec![BlockEntry::new(0, [1, 0, 2]), BlockEntry::new(0, [2, 1, 2])];

        let classes = classify(&s, &BlockFilter::vanilla()).unwrap();
        match classes.center_root() {
            Err(DecomposeError::MissingCenterRoot { center, roots }) => {
                assert_eq!(center, BlockPos::new(2, 0, 2));
                assert_eq!(roots, vec![BlockPos::new(1, 0, 2)]);
            }
            other => panic!("Expected MissingCenterRoot, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_placements() {
        let mut s = structure([3, 1, 3]);
        s.blocks = vec![BlockEntry::new(9, [1, 0, 1])];
        assert!(matches!(
            classify(&s, &BlockFilter::vanilla()),
            Err(DecomposeError::MalformedPlacement { index: 0, .. })
        ));

        let mut s = structure([3, 1, 3]);
        s.blocks = vec![BlockEntry::new(0, [1, 0, 1]), BlockEntry::new(0, [1, 0, 1])];
        s.blocks[1].pos = vec![1, 0];
        assert!(matches!(
            classify(&s, &BlockFilter::vanilla()),
            Err(DecomposeError::MalformedPlacement { index: 1, .. })
        ));
    }

    #[test]
    fn test_translated_recomputes_roots() {
        let mut s = structure([3, 3, 3]);
        s.blocks = vec![BlockEntry::new(0, [1, 0, 1]), BlockEntry::new(0, [1, 1, 1])];
        let classes = classify(&s, &BlockFilter::vanilla()).unwrap();

        let moved = classes.translated(BlockPos::new(1, 2, 1));
        assert!(moved.logs.contains_key(&BlockPos::new(2, 2, 2)));
        assert!(moved.logs.contains_key(&BlockPos::new(2, 3, 2)));
        assert!(moved.roots.is_empty());
    }
}
