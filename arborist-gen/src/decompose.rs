//! Per-structure pipeline: classify, resolve logs, resolve leaves, re-emit.

use arborist_nbt::{StructureFile, DATA_VERSION};

use crate::classify::{classify, BlockFilter, Classification};
use crate::emit::{Resolved, WoodBlocks};
use crate::error::{DecomposeError, Result};
use crate::paths::{find_leaf_paths, find_log_paths, LeafConnectivity};
use crate::pos::BlockPos;

#[derive(Debug, Clone)]
pub struct DecomposeOptions {
    /// Which template blocks are logs, wood and leaves.
    pub filter: BlockFilter,
    /// Namespace of the emitted block ids.
    pub namespace: String,
    pub connectivity: LeafConnectivity,
    pub data_version: i32,
}

impl Default for DecomposeOptions {
    fn default() -> Self {
        Self {
            filter: BlockFilter::vanilla(),
            namespace: "tfc".to_string(),
            connectivity: LeafConnectivity::default(),
            data_version: DATA_VERSION,
        }
    }
}

/// A rebuilt structure, with what went into it.
#[derive(Debug, Clone)]
pub struct Decomposed {
    pub structure: StructureFile,
    pub logs: usize,
    pub leaves: usize,
}

pub struct Decomposer {
    options: DecomposeOptions,
}

impl Decomposer {
    pub fn new(options: DecomposeOptions) -> Self {
        Self { options }
    }

    /// A whole tree growing from the center of its floor.
    pub fn random(&self, label: &str, wood: &str, template: &StructureFile) -> Result<Decomposed> {
        let classes = self.classify(label, template)?;
        let center = classes.center_root()?;
        let resolved = self.resolve(&classes, &[center])?;
        Ok(self.emit(&resolved, wood, classes.size, BlockPos::ZERO, |_| true))
    }

    /// One layer of a stacked tree. Every log on the floor grows into the layer.
    pub fn layer(&self, label: &str, wood: &str, template: &StructureFile) -> Result<Decomposed> {
        let classes = self.classify(label, template)?;
        if classes.roots.is_empty() {
            return Err(DecomposeError::MissingRoots);
        }
        let seeds: Vec<BlockPos> = classes.roots.iter().copied().collect();
        let resolved = self.resolve(&classes, &seeds)?;
        Ok(self.emit(&resolved, wood, classes.size, BlockPos::ZERO, |_| true))
    }

    /// A base tree, and an overlay resolved as if placed over it.
    ///
    /// The base stands on its own. The overlay is centered on the base and
    /// aligned with its top; overlay blocks replace base blocks they cover.
    /// Only the overlay's own blocks are emitted for it.
    pub fn overlay(
        &self,
        label: &str,
        wood: &str,
        base: &StructureFile,
        overlay: &StructureFile,
    ) -> Result<(Decomposed, Decomposed)> {
        let base_classes = self.classify(label, base)?;
        let center = base_classes.center_root()?;
        let base_resolved = self.resolve(&base_classes, &[center])?;
        let base_out = self.emit(&base_resolved, wood, base_classes.size, BlockPos::ZERO, |_| true);

        let overlay_label = format!("{} (overlay)", label);
        let overlay_classes = self.classify(&overlay_label, overlay)?;
        let offset = overlay_offset(base_classes.size, overlay_classes.size);
        let moved = overlay_classes.translated(offset);

        let mut combined = base_classes.clone();
        for pos in moved.logs.keys().chain(moved.leaves.keys()) {
            combined.logs.remove(pos);
            combined.leaves.remove(pos);
        }
        combined.logs.extend(moved.logs.iter().map(|(p, b)| (*p, b.clone())));
        combined.leaves.extend(moved.leaves.iter().map(|(p, s)| (*p, *s)));
        combined.roots = combined.logs.keys().filter(|p| p.y == 0).copied().collect();
        let center = combined.center_root()?;

        let combined_resolved = self.resolve(&combined, &[center])?;
        let overlay_out = self.emit(&combined_resolved, wood, overlay_classes.size, offset, |p| {
            moved.logs.contains_key(&p) || moved.leaves.contains_key(&p)
        });

        Ok((base_out, overlay_out))
    }

    fn classify(&self, label: &str, template: &StructureFile) -> Result<Classification> {
        let classes = classify(template, &self.options.filter)?;
        if !classes.unrecognized.is_empty() {
            let names: Vec<&str> = classes.unrecognized.iter().map(String::as_str).collect();
            log::warn!("Unrecognized blocks in {}: {}", label, names.join(", "));
        }
        Ok(classes)
    }

    fn resolve(&self, classes: &Classification, seeds: &[BlockPos]) -> Result<Resolved> {
        let log_paths = find_log_paths(seeds, &classes.logs)?;
        let leaf_paths =
            find_leaf_paths(&classes.logs, &classes.leaves, self.options.connectivity)?;
        Ok(Resolved {
            logs: classes.logs.clone(),
            log_paths,
            leaf_paths,
        })
    }

    fn emit(
        &self,
        resolved: &Resolved,
        wood: &str,
        size: [i32; 3],
        origin: BlockPos,
        keep: impl Fn(BlockPos) -> bool,
    ) -> Decomposed {
        let blocks = WoodBlocks::new(self.options.namespace.as_str(), wood);
        let palette = resolved.emit(&blocks, origin, keep);
        let structure = palette.into_structure(size, self.options.data_version);

        let placed = structure.blocks.len();
        let logs = structure
            .blocks
            .iter()
            .filter(|b| structure.palette[b.state as usize].property("branch_direction").is_some())
            .count();
        log::debug!(
            "Rebuilt {} blocks ({} logs) with {} palette entries",
            placed,
            logs,
            structure.palette.len()
        );

        Decomposed {
            structure,
            logs,
            leaves: placed - logs,
        }
    }
}

/// Where the overlay's origin lands in base coordinates.
pub fn overlay_offset(base: [i32; 3], overlay: [i32; 3]) -> BlockPos {
    let diff = BlockPos::new(base[0] - overlay[0], base[1] - overlay[1], base[2] - overlay[2]);
    BlockPos::new(diff.x.div_euclid(2), diff.y, diff.z.div_euclid(2))
}
