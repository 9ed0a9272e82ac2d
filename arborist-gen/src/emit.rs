//! Rebuilds a structure from resolved logs and leaves.

use std::collections::HashMap;

use arborist_nbt::{BlockEntry, BlockState, StructureFile};

use crate::classify::{LogBlock, LogKind};
use crate::direction::BranchDirection;
use crate::pos::BlockPos;

/// Append-only palette with value deduplication, plus the placements using it.
#[derive(Debug, Default)]
pub struct Palette {
    blocks: Vec<BlockEntry>,
    palette: Vec<BlockState>,
    index: HashMap<BlockState, usize>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `block` at `pos`, reusing the palette entry of an equal state.
    pub fn add_block(&mut self, pos: BlockPos, block: BlockState) -> usize {
        let state = match self.index.get(&block) {
            Some(&state) => state,
            None => {
                let state = self.palette.len();
                self.palette.push(block.clone());
                self.index.insert(block, state);
                state
            }
        };
        self.blocks.push(BlockEntry::new(state, pos.to_array()));
        state
    }

    pub fn states(&self) -> &[BlockState] {
        &self.palette
    }

    pub fn blocks(&self) -> &[BlockEntry] {
        &self.blocks
    }

    pub fn into_structure(self, size: [i32; 3], data_version: i32) -> StructureFile {
        let mut structure = StructureFile::new(size, data_version);
        structure.palette = self.palette;
        structure.blocks = self.blocks;
        structure
    }
}

/// Block ids of one wood type in the mod's namespace.
#[derive(Debug, Clone)]
pub struct WoodBlocks {
    pub namespace: String,
    pub wood: String,
}

impl WoodBlocks {
    pub fn new(namespace: impl Into<String>, wood: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            wood: wood.into(),
        }
    }

    pub fn log_block(&self, source: &LogBlock, direction: BranchDirection) -> BlockState {
        let form = match source.kind {
            LogKind::Log => "log",
            LogKind::Wood => "wood",
        };
        let mut block = BlockState::new(format!("{}:wood/{}/{}", self.namespace, form, self.wood));
        if let Some(axis) = &source.axis {
            block = block.with_property("axis", axis.as_str());
        }
        block
            .with_property("natural", "true")
            .with_property("branch_direction", direction.name())
    }

    pub fn leaf_block(&self, distance: u32) -> BlockState {
        BlockState::new(format!("{}:wood/leaves/{}", self.namespace, self.wood))
            .with_property("persistent", "false")
            .with_property("distance", distance.to_string())
    }
}

/// Logs with their resolved directions and leaves with their distances, in shared coordinates.
#[derive(Debug, Clone, Default)]
pub struct Resolved {
    pub logs: HashMap<BlockPos, LogBlock>,
    pub log_paths: HashMap<BlockPos, BranchDirection>,
    pub leaf_paths: HashMap<BlockPos, u32>,
}

impl Resolved {
    /// Builds a palette from every position accepted by `keep`, shifted back by `origin`.
    ///
    /// Logs are placed before leaves, each in ascending position order.
    ///
    /// Every resolved log must have its source block in `logs`.
    pub fn emit(
        &self,
        blocks: &WoodBlocks,
        origin: BlockPos,
        keep: impl Fn(BlockPos) -> bool,
    ) -> Palette {
        let mut palette = Palette::new();

        let mut log_positions: Vec<BlockPos> =
            self.log_paths.keys().copied().filter(|p| keep(*p)).collect();
        log_positions.sort();
        for pos in log_positions {
            let block = blocks.log_block(&self.logs[&pos], self.log_paths[&pos]);
            palette.add_block(pos - origin, block);
        }

        let mut leaf_positions: Vec<BlockPos> =
            self.leaf_paths.keys().copied().filter(|p| keep(*p)).collect();
        leaf_positions.sort();
        for pos in leaf_positions {
            palette.add_block(pos - origin, blocks.leaf_block(self.leaf_paths[&pos]));
        }

        palette
    }
}
