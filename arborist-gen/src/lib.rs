//! Tree structure decomposition.
//!
//! Reads hand-built tree templates, reconstructs which log each log grows
//! from and how far each leaf is from a log, and rebuilds the templates with
//! that information stored in block state properties:
//!
//! 1. [`classify()`] splits placements into logs, leaves and floor roots
//! 2. [`paths::find_log_paths`] joins logs into a spanning tree of [`BranchDirection`]s
//! 3. [`paths::find_leaf_paths`] labels leaves with their distance to a log
//! 4. [`emit`] builds a fresh, deduplicated palette
//!
//! [`batch::run`] drives this over the tree tables.

pub mod batch;
pub mod classify;
pub mod decompose;
pub mod direction;
pub mod emit;
pub mod error;
pub mod paths;
pub mod pos;
pub mod report;
pub mod store;
pub mod trees;

pub use batch::{run, GenerateConfig};
pub use classify::{classify, BlockFilter, Classification};
pub use decompose::{DecomposeOptions, Decomposed, Decomposer};
pub use direction::BranchDirection;
pub use error::DecomposeError;
pub use paths::LeafConnectivity;
pub use pos::BlockPos;
pub use report::BatchReport;
pub use store::{DirectoryStore, MemoryStore, StructureStore};
pub use trees::{Feature, Tree, TreeSet, TreeTables};
