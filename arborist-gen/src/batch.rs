//! Runs every selected tree through the pipeline.
//!
//! A failing structure is logged and counted, then the batch moves on: the
//! inputs are static files, so stopping early would only hide later failures.

use crate::decompose::{DecomposeOptions, Decomposed, Decomposer};
use crate::error::{DecomposeError, Result};
use crate::report::BatchReport;
use crate::store::StructureStore;
use crate::trees::{Feature, Tree, TreeSet, TreeTables};

#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub options: DecomposeOptions,
    pub tables: TreeTables,
    pub sets: Vec<TreeSet>,
    /// Restrict to these tree names. Empty means every tree.
    pub only: Vec<String>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            options: DecomposeOptions::default(),
            tables: TreeTables::builtin(),
            sets: TreeSet::ALL.to_vec(),
            only: Vec::new(),
        }
    }
}

pub fn run(store: &dyn StructureStore, config: &GenerateConfig) -> BatchReport {
    let decomposer = Decomposer::new(config.options.clone());
    let mut report = BatchReport::new();

    for &set in &config.sets {
        for tree in config.tables.get(set) {
            if !config.only.is_empty() && !config.only.iter().any(|name| *name == tree.name) {
                continue;
            }
            build_tree(store, &decomposer, tree, set, &mut report);
        }
    }

    report.finish();
    report
}

fn build_tree(
    store: &dyn StructureStore,
    decomposer: &Decomposer,
    tree: &Tree,
    set: TreeSet,
    report: &mut BatchReport,
) {
    let target = tree.target(set);
    match &tree.feature {
        Feature::Random { count } => {
            for n in 1..=*count {
                let template = format!("{}{}", tree.variant, n);
                let result = store
                    .load(&template)
                    .map_err(DecomposeError::from)
                    .and_then(|t| decomposer.random(&template, &tree.name, &t))
                    .and_then(|out| save(store, &target, &n.to_string(), out, report));
                if let Err(e) = result {
                    log::error!("Error: {} in random tree {}.nbt, in {}", e, template, tree.name);
                    report.record_failure(&tree.name, &template, e.to_string());
                }
            }
        }
        Feature::Overlay => {
            let base_template = tree.variant.clone();
            let overlay_template = format!("{}_overlay", tree.variant);
            let result = load_pair(store, &base_template, &overlay_template)
                .and_then(|(base, overlay)| {
                    decomposer.overlay(&base_template, &tree.name, &base, &overlay)
                })
                .and_then(|(base, overlay)| {
                    save(store, &target, "base", base, report)?;
                    save(store, &target, "overlay", overlay, report)
                });
            if let Err(e) = result {
                log::error!("Error: {} in overlay tree {}, in {}", e, tree.variant, tree.name);
                report.record_failure(&tree.name, &base_template, e.to_string());
            }
        }
        Feature::Stacked { layers } => {
            for (i, count) in layers.iter().enumerate() {
                for j in 1..=*count {
                    let file = format!("layer{}_{}", i + 1, j);
                    let template = format!("{}_{}", tree.variant, file);
                    let result = store
                        .load(&template)
                        .map_err(DecomposeError::from)
                        .and_then(|t| decomposer.layer(&template, &tree.name, &t))
                        .and_then(|out| save(store, &target, &file, out, report));
                    if let Err(e) = result {
                        log::error!(
                            "Error: {} in stacked tree {}.nbt, in {}",
                            e,
                            template,
                            tree.name
                        );
                        report.record_failure(&tree.name, &template, e.to_string());
                    }
                }
            }
        }
    }
}

fn load_pair(
    store: &dyn StructureStore,
    first: &str,
    second: &str,
) -> Result<(arborist_nbt::StructureFile, arborist_nbt::StructureFile)> {
    Ok((store.load(first)?, store.load(second)?))
}

fn save(
    store: &dyn StructureStore,
    target: &str,
    file: &str,
    out: Decomposed,
    report: &mut BatchReport,
) -> Result<()> {
    store.save(target, file, &out.structure)?;
    report.record_written(&out);
    Ok(())
}
