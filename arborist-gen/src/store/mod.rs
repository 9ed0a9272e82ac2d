mod directory;
mod memory;

pub use directory::DirectoryStore;
pub use memory::MemoryStore;

use arborist_nbt::StructureFile;

/// Where templates come from and rebuilt structures go.
///
/// Implementations:
/// - `DirectoryStore` - gzip NBT files on disk
/// - `MemoryStore` - in-memory maps (for testing)
pub trait StructureStore: Send + Sync {
    /// Load a template by name, without extension (e.g. `acacia12`).
    fn load(&self, template: &str) -> anyhow::Result<StructureFile>;

    /// Save a rebuilt structure as `<target>/<file>`, replacing any previous one.
    fn save(&self, target: &str, file: &str, structure: &StructureFile) -> anyhow::Result<()>;
}
